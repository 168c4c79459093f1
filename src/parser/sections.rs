use regex::Regex;

use super::extract::ExtractError;

/// A document section delimited by a start marker and an optional end marker.
///
/// Markers are regex patterns. The end marker is searched only after the
/// start marker; when it is missing the section runs to end-of-text.
#[derive(Debug)]
pub struct Bounds {
    name: &'static str,
    start: Regex,
    end: Option<Regex>,
}

/// Turn a literal heading into a pattern that tolerates any whitespace
/// between its words (headings wrap across lines in the raw page text).
pub fn phrase(literal: &str) -> String {
    literal
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

impl Bounds {
    pub fn new(name: &'static str, start: &str, end: Option<&str>) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            start: Regex::new(start)?,
            end: end.map(Regex::new).transpose()?,
        })
    }

    /// Text strictly between the markers.
    pub fn body<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.locate(text).map(|(_, body_start, end)| &text[body_start..end])
    }

    /// Text from the start of the start marker up to the end marker.
    pub fn span<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.locate(text).map(|(start, _, end)| &text[start..end])
    }

    /// Like [`Bounds::body`], but a missing section is reported as an error.
    pub fn require<'t>(&self, text: &'t str) -> Result<&'t str, ExtractError> {
        self.body(text).ok_or(ExtractError::MissingSection(self.name))
    }

    fn locate(&self, text: &str) -> Option<(usize, usize, usize)> {
        let start = self.start.find(text)?;
        let end = self
            .end
            .as_ref()
            .and_then(|re| re.find_at(text, start.end()))
            .map(|m| m.start())
            .unwrap_or(text.len());
        Some((start.start(), start.end(), end))
    }
}
