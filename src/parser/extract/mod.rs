pub mod acceptance;
pub mod announcements;
pub mod hostel;
pub mod postgraduate;
pub mod requirements;
pub mod undergraduate;

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tracing::warn;

use super::Page;
use crate::records::Snapshot;

/// Why an extractor fell back to (part of) its default record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("section `{0}` not found on page")]
    MissingSection(&'static str),
    #[error("malformed amount token {0:?}")]
    Amount(String),
}

/// Convert an extractor outcome into its record, degrading to the default
/// record on failure so sibling extractors are unaffected.
pub(crate) fn guarded<T: Default>(extractor: &'static str, outcome: Result<T, ExtractError>) -> T {
    outcome.unwrap_or_else(|e| {
        warn!(extractor, error = %e, "extraction degraded to default");
        T::default()
    })
}

/// Run every extractor against one page.
pub fn extract_all(page: &Page) -> Snapshot {
    Snapshot {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        undergraduate_fees: undergraduate::extract(page),
        postgraduate_fees: postgraduate::extract(page),
        hostel_fees: hostel::extract(page),
        acceptance_fees: acceptance::extract(page),
        announcements: announcements::extract(page),
        requirements: requirements::extract(page),
    }
}

// ── Tests ──
