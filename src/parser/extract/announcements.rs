use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{guarded, ExtractError};
use crate::parser::sections::Bounds;
use crate::parser::text::{normalize, truncate_chars};
use crate::parser::Page;
use crate::records::Announcement;

const EXCERPT_CHARS: usize = 500;

/// (title, start marker, end marker), in output order.
const NOTICES: &[(&str, &str, &str)] = &[
    (
        "Hostel Accommodation Guidelines",
        r"UNIBEN HOSTEL ACCOMMODATION.*?GUIDELINES",
        r"\*\* Accommodation Booking",
    ),
    (
        "Accommodation Booking Information",
        r"\*\* Accommodation Booking",
        r"NEWLY ADMITTED",
    ),
    (
        "Requirements for Newly Admitted Students",
        r"NEWLY ADMITTED STUDENTS REQUIREMENTS",
        r"THE ACCEPTANCE FEE",
    ),
    (
        "Information for Returning Students",
        r"RETURNING STUDENTS",
        r"NOTE THAT ALL STUDENTS|THE HOSTEL",
    ),
];

static SECTIONS: LazyLock<Vec<(&'static str, Bounds)>> = LazyLock::new(|| {
    NOTICES
        .iter()
        .map(|&(title, start, end)| (title, Bounds::new(title, start, Some(end)).unwrap()))
        .collect()
});
static BOOKING_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Accommodation Booking.*?SATURDAY (\d+ \w+ \d+)").unwrap());

pub fn extract(page: &Page) -> Vec<Announcement> {
    guarded("announcements", try_extract(page))
}

fn try_extract(page: &Page) -> Result<Vec<Announcement>, ExtractError> {
    let mut announcements: Vec<Announcement> = SECTIONS
        .iter()
        .filter_map(|(title, bounds)| bounds.span(&page.text).map(|span| notice(title, span)))
        .collect();

    if let Some(date) = booking_start_date(&page.text) {
        announcements.push(Announcement {
            title: "Accommodation Booking Start Date".to_string(),
            excerpt: format!("Booking starts on {}", date),
            full_content: format!(
                "Accommodation booking using HOS Activation Code starts on {}",
                date
            ),
        });
    }

    debug!(count = announcements.len(), "announcements extracted");
    Ok(announcements)
}

fn notice(title: &str, span: &str) -> Announcement {
    Announcement {
        title: title.to_string(),
        excerpt: format!("{}...", normalize(truncate_chars(span, EXCERPT_CHARS))),
        full_content: normalize(span),
    }
}

pub fn booking_start_date(text: &str) -> Option<&str> {
    BOOKING_DATE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
