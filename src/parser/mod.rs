pub mod extract;
pub mod sections;
pub mod tables;
pub mod text;

use std::sync::LazyLock;

use scraper::{Html, Selector};

use tables::TableRow;

static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// A fetched page reduced to what the extractors read.
///
/// `raw_text` keeps the body's line structure; `text` is the same content
/// with whitespace collapsed.
#[derive(Debug, Clone)]
pub struct Page {
    pub raw_text: String,
    pub text: String,
    pub rows: Vec<TableRow>,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let raw_text = document
            .select(&BODY)
            .next()
            .map(|body| body.text().collect::<String>())
            .unwrap_or_default();
        let text = text::normalize(&raw_text);
        let rows = tables::table_rows(&document);
        Self { raw_text, text, rows }
    }

    /// Page with no table structure, for exercising the text extractors.
    #[cfg(test)]
    pub fn from_text(raw: &str) -> Self {
        Self {
            raw_text: raw.to_string(),
            text: text::normalize(raw),
            rows: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_text_and_rows() {
        let page = Page::parse(
            "<html><head><title>ignored</title></head><body>\n<h1>FEES</h1>\n\
             <table><tr><td>Tuition</td><td>50,000.00</td><td>45,000.00</td></tr></table>\n</body></html>",
        );
        assert!(page.raw_text.contains('\n'));
        assert_eq!(page.text, "FEES Tuition50,000.0045,000.00");
        assert!(!page.text.contains("ignored"));
        assert_eq!(page.rows.len(), 1);
    }

    #[test]
    fn garbage_still_parses() {
        let page = Page::parse("<<<not really html");
        assert!(page.rows.is_empty());
    }
}
