use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{guarded, ExtractError};
use crate::parser::sections::{phrase, Bounds};
use crate::parser::text::{normalize, parse_pair, AMOUNT};
use crate::parser::Page;
use crate::records::{PostgraduateFees, ProgramFee};

static SECTION: LazyLock<Bounds> = LazyLock::new(|| {
    Bounds::new(
        "postgraduate",
        &phrase("POST GRADUATE FULL TIME CHARGES"),
        Some(&phrase("THE CHARGES FOR SCIENCE")),
    )
    .unwrap()
});
static AMOUNT_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"({AMOUNT})\s+({AMOUNT})")).unwrap());

pub fn extract(page: &Page) -> PostgraduateFees {
    guarded("postgraduate", try_extract(page))
}

fn try_extract(page: &Page) -> Result<PostgraduateFees, ExtractError> {
    // Line structure matters here, so work on the raw text.
    let section = SECTION.require(&page.raw_text)?;
    let programs = parse_programs(section);
    debug!(programs = programs.len(), "postgraduate fees extracted");
    Ok(PostgraduateFees { programs })
}

/// Pair every "freshers returning" amount line with the non-empty line above it.
pub fn parse_programs(section: &str) -> Vec<ProgramFee> {
    let lines: Vec<&str> = section.lines().filter(|l| !l.trim().is_empty()).collect();
    let mut programs = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(caps) = AMOUNT_LINE_RE.captures(line) else { continue };
        if i == 0 {
            continue;
        }
        let program = normalize(lines[i - 1]);
        match parse_pair(&caps[1], &caps[2]) {
            Ok((freshers, returning)) => programs.push(ProgramFee {
                program,
                freshers,
                returning,
            }),
            Err(e) => debug!(%program, error = %e, "skipping programme line"),
        }
    }

    programs
}
