use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{guarded, ExtractError};
use crate::parser::tables::TableRow;
use crate::parser::text::{parse_amount, parse_pair, AMOUNT};
use crate::parser::Page;
use crate::records::{ChargePair, TrackFees, UndergraduateFees};

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(AMOUNT).unwrap());
/// School charges are whole naira; a cell priced in kobo is not a fee cell.
static FEE_CELL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d,]+\.00").unwrap());
static TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TOTAL\s+(\d[\d,]+\.00)\s+(\d[\d,]+\.00)").unwrap());
static GRAND_TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"GRAND TOTAL\s+(\d[\d,]+\.00)\s+(\d[\d,]+\.00)").unwrap());
static NOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Please Note that there is added charge of N([\d,]+) for New Students.*?and N([\d,]+) for Returning Students",
    )
    .unwrap()
});

/// Rows whose label names one of these are one-off charges, not tuition items.
const ADDITIONAL_KEYWORDS: &[&str] = &["Orientation", "Certificate", "Academic Gown", "Forensic"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Additional,
    Total,
    Itemized,
}

/// Classify a fee table row. Rows without an amount in both value cells are
/// not fee rows at all.
pub fn classify(row: &TableRow) -> Option<RowKind> {
    if row.label.is_empty() || !FEE_CELL_RE.is_match(&row.first) || !FEE_CELL_RE.is_match(&row.second) {
        return None;
    }
    let kind = if ADDITIONAL_KEYWORDS.iter().any(|kw| row.label.contains(kw)) {
        RowKind::Additional
    } else if row.label.contains("TOTAL") || row.label.contains("GRAND") {
        RowKind::Total
    } else {
        RowKind::Itemized
    };
    Some(kind)
}

pub fn extract(page: &Page) -> UndergraduateFees {
    guarded("undergraduate", try_extract(page))
}

fn try_extract(page: &Page) -> Result<UndergraduateFees, ExtractError> {
    let mut fees = UndergraduateFees {
        note: extract_note(&page.text).unwrap_or_default(),
        ..Default::default()
    };

    for row in &page.rows {
        let Some(kind) = classify(row) else { continue };
        if kind == RowKind::Total {
            continue;
        }
        let (science, non_science) = match row_amounts(row) {
            Ok(pair) => pair,
            Err(e) => {
                debug!(label = %row.label, error = %e, "skipping fee row");
                continue;
            }
        };
        match kind {
            RowKind::Additional => fees
                .additional_charges
                .insert(row.label.clone(), ChargePair { science, non_science }),
            _ => {
                fees.fresh_students.science.insert(row.label.clone(), science);
                fees.fresh_students.non_science.insert(row.label.clone(), non_science);
            }
        }
    }

    insert_total(&mut fees.fresh_students, "TOTAL", &TOTAL_RE, &page.text);
    insert_total(&mut fees.fresh_students, "GRAND TOTAL", &GRAND_TOTAL_RE, &page.text);

    debug!(
        itemized = fees.fresh_students.science.len(),
        additional = fees.additional_charges.len(),
        "undergraduate fees extracted"
    );
    Ok(fees)
}

fn row_amounts(row: &TableRow) -> Result<(f64, f64), ExtractError> {
    let token = |cell: &str| {
        AMOUNT_RE
            .find(cell)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ExtractError::Amount(cell.to_string()))
    };
    parse_pair(&token(&row.first)?, &token(&row.second)?)
}

/// Totals come from the first matching text line, not from table rows.
fn insert_total(tier: &mut TrackFees, label: &str, re: &Regex, text: &str) {
    let Some(caps) = re.captures(text) else { return };
    match (parse_amount(&caps[1]), parse_amount(&caps[2])) {
        (Ok(science), Ok(non_science)) => {
            tier.science.insert(label, science);
            tier.non_science.insert(label, non_science);
        }
        _ => debug!(label, line = &caps[0], "unparseable total line"),
    }
}

/// The "added charge" sentence, with amounts kept exactly as printed.
pub fn extract_note(text: &str) -> Option<String> {
    let caps = NOTE_RE.captures(text)?;
    Some(format!(
        "Additional charge: N{} for Freshers, N{} for Returning Students",
        &caps[1], &caps[2]
    ))
}
