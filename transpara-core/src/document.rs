use chrono::NaiveDate;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// The fixed set of category tags a document can carry.
///
/// Spellings are kebab-case everywhere (catalog file, CLI, display), so the
/// same token parses and prints on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Tag {
    FinancialStatement,
    Receipt,
    Turnover,
    Minutes,
    Resolution,
    Report,
}

/// A single published document as the filter engine sees it.
///
/// The catalog boundary parses the stored date string into a `NaiveDate`;
/// nothing past that boundary ever compares dates as text.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    /// Display-only size string (e.g. "1.2 MB"), passed through untouched.
    pub size: String,
    pub tag: Tag,
    /// Opaque reference to the stored file.
    pub file_ref: String,
}

/// Category selector for the search stage: everything, or one exact tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Only(Tag),
}

impl TagFilter {
    pub fn matches(self, tag: Tag) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Only(t) => t == tag,
        }
    }
}
