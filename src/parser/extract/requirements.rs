use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{guarded, ExtractError};
use crate::parser::text::normalize;
use crate::parser::Page;
use crate::records::{RequiredDocument, Requirements};

static DOCUMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\.\s+([A-Za-z\s()/\-:]+(?:Certificate|result|Card|letter|Affidavit|PASSPORT))")
        .unwrap()
});

/// Reported in this order whenever they appear on the page.
pub const INSTRUCTIONS: &[&str] = &[
    "PAY YOUR ACCEPTANCE FEE",
    "UPLOAD RELEVANT DOCUMENTS",
    "REQUEST CLEARANCE",
    "REMEMBER TO UPLOAD SCAN OF SCRATCH CARD",
    "NO NEED TO COME INTO CAMPUS",
    "PAY SCHOOL CHARGES",
    "REGISTER YOUR COURSES ONLINE",
    "VISIT COURSE ADVISER FOR VALIDATION",
];

pub fn extract(page: &Page) -> Requirements {
    guarded("requirements", try_extract(page))
}

fn try_extract(page: &Page) -> Result<Requirements, ExtractError> {
    let requirements = Requirements {
        documents_required: documents(&page.text),
        instructions: instructions(&page.text),
    };
    debug!(
        documents = requirements.documents_required.len(),
        instructions = requirements.instructions.len(),
        "requirements extracted"
    );
    Ok(requirements)
}

/// Numbered checklist entries ending in a document noun.
pub fn documents(text: &str) -> Vec<RequiredDocument> {
    DOCUMENT_RE
        .captures_iter(text)
        .map(|caps| RequiredDocument {
            number: caps[1].to_string(),
            document: normalize(&caps[2]),
        })
        .collect()
}

pub fn instructions(text: &str) -> Vec<String> {
    INSTRUCTIONS
        .iter()
        .filter(|phrase| text.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect()
}
