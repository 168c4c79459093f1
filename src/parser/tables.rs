use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::text::normalize;

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// First three cells of a table row, normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub first: String,
    pub second: String,
}

/// Walk every table row in document order. Rows with fewer than three
/// `td` cells (headers, spacers) are skipped.
pub fn table_rows(document: &Html) -> Vec<TableRow> {
    let mut rows = Vec::new();
    for table in document.select(&TABLE) {
        for row in table.select(&ROW) {
            let cells: Vec<ElementRef> = row.select(&CELL).take(3).collect();
            if let [label, first, second] = cells.as_slice() {
                rows.push(TableRow {
                    label: cell_text(label),
                    first: cell_text(first),
                    second: cell_text(second),
                });
            }
        }
    }
    rows
}

fn cell_text(cell: &ElementRef) -> String {
    normalize(&cell.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(html: &str) -> Vec<TableRow> {
        table_rows(&Html::parse_document(html))
    }

    #[test]
    fn short_rows_skipped() {
        let r = rows(
            "<table><tr><td>Note</td><td>see below</td></tr>\
             <tr><td>Tuition</td><td>50,000.00</td><td>45,000.00</td></tr></table>",
        );
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].label, "Tuition");
    }

    #[test]
    fn header_cells_are_not_data() {
        let r = rows("<table><tr><th>ITEM</th><th>SCIENCE</th><th>NON-SCIENCE</th></tr></table>");
        assert!(r.is_empty());
    }

    #[test]
    fn extra_cells_ignored_and_text_normalized() {
        let r = rows(
            "<table><tr><td> Academic\n  Gown </td><td>4,500.00</td><td>4,500.00</td><td>x</td></tr></table>",
        );
        assert_eq!(
            r,
            vec![TableRow {
                label: "Academic Gown".into(),
                first: "4,500.00".into(),
                second: "4,500.00".into(),
            }]
        );
    }

    #[test]
    fn document_order_across_tables() {
        let r = rows(
            "<table><tr><td>A</td><td>1</td><td>2</td></tr><tr><td>B</td><td>3</td><td>4</td></tr></table>\
             <p>between</p>\
             <table><tr><td>C</td><td>5</td><td>6</td></tr></table>",
        );
        let labels: Vec<&str> = r.iter().map(|x| x.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "C"]);
    }
}
