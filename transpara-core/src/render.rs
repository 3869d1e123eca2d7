//! Pure label formatting helpers.
//!
//! Selection label: `2024`, `Jun 2024`, `15 Jun 2024`, or `Any`
//! Range label:     `01 Jan 2024 .. 30 Jun 2024` (open sides as `..`)

use crate::document::Document;
use crate::selection::{DateRange, DateSelection, Precision};
use chrono::NaiveDate;

/// The human-readable label of a selection at its current precision.
pub fn format_selection(sel: &DateSelection) -> String {
    let resolved = sel.range_start();
    match (sel.precision, resolved) {
        (Precision::Year, Some(_)) => format!("{}", sel.year.unwrap_or_default()),
        (Precision::Month, Some(date)) => date.format("%b %Y").to_string(),
        (Precision::Day, Some(date)) => date.format("%d %b %Y").to_string(),
        _ => "Any".to_string(),
    }
}

/// `{start} .. {end}` with open sides left blank around the separator.
pub fn format_range(range: &DateRange, date_format: &str) -> String {
    let side = |d: Option<NaiveDate>| match d {
        Some(date) => format_date(date, date_format),
        None => String::new(),
    };
    format!("{} .. {}", side(range.start), side(range.end))
        .trim()
        .to_string()
}

/// Formats a date according to the user's configuration.
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    date.format(date_format).to_string()
}

/// One-line document summary: `{date}  {title} [{tag}] ({size})`.
pub fn format_document_line(doc: &Document, date_format: &str) -> String {
    let date = format_date(doc.date, date_format);
    let mut line = format!("{} - {} [{}]", date, doc.title.trim(), doc.tag.as_ref());
    if !doc.size.trim().is_empty() {
        line.push_str(&format!(" ({})", doc.size.trim()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Tag;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn selection_labels_follow_precision() {
        assert_eq!(format_selection(&DateSelection::year(2024)), "2024");
        assert_eq!(format_selection(&DateSelection::month(2024, 6)), "Jun 2024");
        assert_eq!(
            format_selection(&DateSelection::day(2024, 6, 15)),
            "15 Jun 2024"
        );
        assert_eq!(format_selection(&DateSelection::default()), "Any");
    }

    #[test]
    fn range_label_renders_open_sides() {
        let closed = DateRange::new(Some(d(2024, 1, 1)), Some(d(2024, 6, 30)));
        assert_eq!(
            format_range(&closed, "%d %b %Y"),
            "01 Jan 2024 .. 30 Jun 2024"
        );
        let open_start = DateRange::new(None, Some(d(2024, 6, 30)));
        assert_eq!(format_range(&open_start, "%d %b %Y"), ".. 30 Jun 2024");
        let open_end = DateRange::new(Some(d(2024, 1, 1)), None);
        assert_eq!(format_range(&open_end, "%d %b %Y"), "01 Jan 2024 ..");
    }

    #[test]
    fn document_line_includes_tag_and_size() {
        let doc = Document {
            id: 1,
            title: "Annual Expense Statement".to_string(),
            description: String::new(),
            date: d(2024, 1, 15),
            size: "2.1 MB".to_string(),
            tag: Tag::FinancialStatement,
            file_ref: String::new(),
        };
        assert_eq!(
            format_document_line(&doc, "%d %b %Y"),
            "15 Jan 2024 - Annual Expense Statement [financial-statement] (2.1 MB)"
        );
    }
}
