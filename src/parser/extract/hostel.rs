use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{guarded, ExtractError};
use crate::parser::sections::{phrase, Bounds};
use crate::parser::text::{normalize, parse_amount, AMOUNT};
use crate::parser::Page;
use crate::records::{HostelFee, NO_DEMARCATION};

static SECTION: LazyLock<Bounds> = LazyLock::new(|| {
    let end = format!("{}|{}", phrase("THE FORMER CHARGES"), phrase("RETURNING STUDENTS"));
    Bounds::new(
        "hostel",
        &phrase("THE HOSTEL ACCOMMODATION FEES FROM 2024/2025"),
        Some(&end),
    )
    .unwrap()
});

/// A wing/block designation: optional qualifiers, a unit word, and an
/// optional single-character suffix ("NORTH WING", "BLOCK A", "UPPER FLOOR").
/// The vocabulary is closed: any other trailing word (e.g. "FEMALE") stays in
/// the hostel name and the entry reports no demarcation.
const DEMARCATION: &str = r"(?:(?:NORTH|SOUTH|EAST|WEST|CENTRAL|MAIN|NEW|OLD|UPPER|LOWER|GROUND|FIRST|SECOND|THIRD|TOP|FRONT|BACK)\s+)*(?:WING|BLOCK|FLOOR|ANNEXE?|EXTENSION)\b(?:\s+[A-Z\d]\b)?";

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(\d+)\.\s+([A-Z\s()/\d]+?)(?:\s+({DEMARCATION}))?\s+({AMOUNT})"
    ))
    .unwrap()
});

pub fn extract(page: &Page) -> Vec<HostelFee> {
    guarded("hostel", try_extract(page))
}

fn try_extract(page: &Page) -> Result<Vec<HostelFee>, ExtractError> {
    let section = SECTION.require(&page.text)?;
    let entries = parse_entries(section);
    debug!(entries = entries.len(), "hostel fees extracted");
    Ok(entries)
}

/// Scan `sn. NAME [DEMARCATION] amount` entries left to right.
pub fn parse_entries(section: &str) -> Vec<HostelFee> {
    let mut entries = Vec::new();
    for caps in ENTRY_RE.captures_iter(section) {
        let amount = match parse_amount(&caps[4]) {
            Ok(a) => a,
            Err(e) => {
                debug!(sn = &caps[1], error = %e, "skipping hostel entry");
                continue;
            }
        };
        entries.push(HostelFee {
            sn: caps[1].to_string(),
            hostel_name: normalize(&caps[2]),
            demarcation: caps
                .get(3)
                .map(|m| normalize(m.as_str()))
                .unwrap_or_else(|| NO_DEMARCATION.to_string()),
            amount,
        });
    }
    entries
}
