use std::sync::LazyLock;

use regex::Regex;

use super::extract::ExtractError;

/// Amount token as it appears in page text: `12,345.00`.
pub const AMOUNT: &str = r"\d[\d,]*\.\d{2}";

static STRICT_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:,\d{3})*\.\d{2}$").unwrap());

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a grouped decimal amount (`45,000.00`) into a number.
pub fn parse_amount(token: &str) -> Result<f64, ExtractError> {
    let token = token.trim();
    if !STRICT_AMOUNT_RE.is_match(token) {
        return Err(ExtractError::Amount(token.to_string()));
    }
    token
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| ExtractError::Amount(token.to_string()))
}

/// Parse an amount pair where the second column may be a "-" placeholder for zero.
pub fn parse_pair(first: &str, second: &str) -> Result<(f64, f64), ExtractError> {
    let a = parse_amount(first)?;
    let b = if second.trim() == "-" {
        0.0
    } else {
        parse_amount(second)?
    };
    Ok((a, b))
}

/// Render an amount with `,` grouping and two decimals.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac)
}

/// First `max` characters of `s`, never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
