use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{guarded, ExtractError};
use crate::parser::sections::phrase;
use crate::parser::text::{parse_pair, AMOUNT};
use crate::parser::Page;
use crate::records::AcceptanceFees;

pub const ITEMS: &[&str] = &[
    "BANK/PORTAL CHARGES",
    "ADMISSION CLEARANCE",
    "ICT LEVY",
    "MAINTENANCE FEE",
    "MTN NET LIBRARY",
    "COLLEGE DEVELOPMENT LEVY",
];

static ITEM_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ITEMS
        .iter()
        .map(|item| {
            let re = Regex::new(&format!(r"(?i){}\s+({AMOUNT})\s+({AMOUNT}|-)", phrase(item))).unwrap();
            (*item, re)
        })
        .collect()
});
static TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"TOTAL\s+({AMOUNT})\s+({AMOUNT})")).unwrap());

pub fn extract(page: &Page) -> AcceptanceFees {
    guarded("acceptance", try_extract(page))
}

fn try_extract(page: &Page) -> Result<AcceptanceFees, ExtractError> {
    let mut fees = AcceptanceFees::default();

    for (item, re) in ITEM_RES.iter() {
        let Some(caps) = re.captures(&page.text) else { continue };
        match parse_pair(&caps[1], &caps[2]) {
            Ok((medical, other)) => {
                fees.medical_sciences.insert(*item, medical);
                fees.other_candidates.insert(*item, other);
            }
            Err(e) => debug!(item, error = %e, "skipping acceptance item"),
        }
    }

    if let Some((medical, other)) = last_total(&page.text) {
        fees.medical_sciences.insert("TOTAL", medical);
        fees.other_candidates.insert("TOTAL", other);
    }

    debug!(items = fees.medical_sciences.len(), "acceptance fees extracted");
    Ok(fees)
}

/// The acceptance table is the last fee table on the page, so its total is
/// the last `TOTAL a b` line. A malformed total is dropped; the items stay.
fn last_total(text: &str) -> Option<(f64, f64)> {
    let caps = TOTAL_RE.captures_iter(text).last()?;
    match parse_pair(&caps[1], &caps[2]) {
        Ok(pair) => Some(pair),
        Err(e) => {
            debug!(line = &caps[0], error = %e, "unparseable acceptance total");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_means_zero() {
        let fees = extract(&Page::from_text("ICT LEVY 2,000.00 -"));
        assert_eq!(fees.medical_sciences.get("ICT LEVY"), Some(&2000.0));
        assert_eq!(fees.other_candidates.get("ICT LEVY"), Some(&0.0));
        assert_eq!(fees.medical_sciences.len(), 1);
    }

    #[test]
    fn labels_match_case_insensitively() {
        let fees = extract(&Page::from_text("Mtn Net Library\n 1,000.00\n 1,000.00"));
        assert_eq!(fees.other_candidates.get("MTN NET LIBRARY"), Some(&1000.0));
    }

    #[test]
    fn last_total_wins() {
        let fees = extract(&Page::from_text(
            "TOTAL 67,500.00 50,000.00 GRAND TOTAL 75,000.00 57,500.00 ICT LEVY 2,000.00 - TOTAL 59,500.00 37,500.00",
        ));
        assert_eq!(fees.medical_sciences.get("TOTAL"), Some(&59500.0));
        assert_eq!(fees.other_candidates.get("TOTAL"), Some(&37500.0));
    }

    #[test]
    fn malformed_total_keeps_items() {
        let fees = extract(&Page::from_text(
            "ICT LEVY 2,000.00 - MAINTENANCE FEE 5,000.00 5,000.00 TOTAL 7,00.00 5,000.00",
        ));
        let labels: Vec<&str> = fees.medical_sciences.iter().map(|(k, _)| k).collect();
        assert_eq!(labels, ["ICT LEVY", "MAINTENANCE FEE"]);
        assert_eq!(fees.other_candidates.get("MAINTENANCE FEE"), Some(&5000.0));
        assert_eq!(fees.medical_sciences.get("TOTAL"), None);
    }

    #[test]
    fn fixture_page() {
        let html = std::fs::read_to_string("tests/fixtures/uniben.html").unwrap();
        let fees = extract(&Page::parse(&html));

        let labels: Vec<&str> = fees.medical_sciences.iter().map(|(k, _)| k).collect();
        let mut expected: Vec<&str> = ITEMS.to_vec();
        expected.push("TOTAL");
        assert_eq!(labels, expected);

        assert_eq!(fees.other_candidates.get("COLLEGE DEVELOPMENT LEVY"), Some(&0.0));
        assert_eq!(fees.medical_sciences.get("ADMISSION CLEARANCE"), Some(&40000.0));
        assert_eq!(fees.medical_sciences.get("TOTAL"), Some(&59500.0));
        assert_eq!(fees.other_candidates.get("TOTAL"), Some(&37500.0));
    }
}
