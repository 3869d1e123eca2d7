//! The `Catalog` struct and its associated types, providing the primary API
//! for loading and querying the document list.

use crate::config::Config;
use crate::document::{Document, Tag};
use crate::filter::{FilterState, final_documents};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::str::FromStr;

/// A document record exactly as it sits in the catalog file: the date is
/// still a formatted string and the tag a free token. Both are parsed into
/// structured values before anything downstream sees them.
#[derive(Debug, Deserialize)]
struct RawDocument {
    id: u32,
    title: String,
    #[serde(default)]
    description: String,
    date: String,
    #[serde(default)]
    size: String,
    tag: String,
    #[serde(default)]
    file_ref: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    documents: Vec<RawDocument>,
}

/// Represents a non-critical issue with a single catalog record.
///
/// This is used to report problems (e.g., an unparseable date, an unknown
/// tag) without discarding the rest of the catalog.
#[derive(Debug)]
pub enum CatalogError {
    InvalidDate { id: u32, input: String },
    UnknownTag { id: u32, input: String },
}

/// The central struct for all catalog operations.
///
/// A `Catalog` holds the configuration, the documents that loaded cleanly,
/// and the per-record errors collected while loading.
#[derive(Debug)]
pub struct Catalog {
    pub config: Config,
    documents: Vec<Document>,
    pub errors: Vec<CatalogError>,
}

impl Catalog {
    /// Creates a new `Catalog`, loading configuration from standard paths
    /// and the document list from the configured catalog file.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Catalog` with a specific `Config`.
    ///
    /// A missing or unreadable catalog file is a hard error; individual
    /// records that fail to parse are collected into `errors` instead.
    pub fn with_config(config: Config) -> Result<Self> {
        let content = fs::read_to_string(&config.catalog_path)
            .with_context(|| format!("reading {}", config.catalog_path.display()))?;
        let file: CatalogFile = toml::from_str(&content)
            .with_context(|| format!("parsing {}", config.catalog_path.display()))?;

        let mut documents = Vec::new();
        let mut errors = Vec::new();
        for raw in file.documents {
            match parse_record(raw, &config.input_date_formats) {
                Ok(doc) => documents.push(doc),
                Err(error) => errors.push(error),
            }
        }

        Ok(Self {
            config,
            documents,
            errors,
        })
    }

    /// The loaded document list, in catalog order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Runs the filter pipeline over the loaded documents.
    pub fn filter(&self, state: &FilterState) -> Vec<&Document> {
        final_documents(&self.documents, state)
    }
}

/// Parses one raw record, converting the date string and tag token at the
/// boundary so nothing downstream ever compares dates as text.
fn parse_record(raw: RawDocument, formats: &[String]) -> Result<Document, CatalogError> {
    let date = parse_date(&raw.date, formats).ok_or(CatalogError::InvalidDate {
        id: raw.id,
        input: raw.date.clone(),
    })?;
    let tag = Tag::from_str(&raw.tag).map_err(|_| CatalogError::UnknownTag {
        id: raw.id,
        input: raw.tag.clone(),
    })?;
    Ok(Document {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        date,
        size: raw.size,
        tag,
        file_ref: raw.file_ref,
    })
}

fn parse_date(s: &str, formats: &[String]) -> Option<NaiveDate> {
    formats
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s.trim(), fmt).ok())
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::mk_config;
    use crate::document::TagFilter;
    use crate::filter::NameSort;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[[documents]]
id = 1
title = "Annual Expense Statement"
description = "Expenses for the fiscal year"
date = "01/15/2024"
size = "2.1 MB"
tag = "financial-statement"
file_ref = "files/annual-expense-2024.pdf"

[[documents]]
id = 2
title = "Fund & Asset Turnover"
date = "01/10/2024"
tag = "turnover"

[[documents]]
id = 3
title = "Q3 Official Receipt File"
date = "2023-12-20"
tag = "receipt"
"#;

    fn mk_catalog(content: &str) -> (Catalog, NamedTempFile) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let cfg = mk_config(file.path().to_path_buf());
        let catalog = Catalog::with_config(cfg).unwrap();
        (catalog, file)
    }

    #[test]
    fn loads_documents_in_catalog_order() {
        let (catalog, _file) = mk_catalog(SAMPLE);
        assert!(catalog.errors.is_empty());
        let docs = catalog.documents();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].title, "Annual Expense Statement");
        assert_eq!(docs[0].tag, Tag::FinancialStatement);
        assert_eq!(
            docs[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        // ISO fallback format
        assert_eq!(
            docs[2].date,
            NaiveDate::from_ymd_opt(2023, 12, 20).unwrap()
        );
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let (catalog, _file) = mk_catalog(SAMPLE);
        let doc = &catalog.documents()[1];
        assert!(doc.description.is_empty());
        assert!(doc.size.is_empty());
        assert!(doc.file_ref.is_empty());
    }

    #[test]
    fn bad_date_is_collected_not_fatal() {
        let content = r#"
[[documents]]
id = 1
title = "Good"
date = "01/15/2024"
tag = "report"

[[documents]]
id = 2
title = "Bad date"
date = "sometime in March"
tag = "report"
"#;
        let (catalog, _file) = mk_catalog(content);
        assert_eq!(catalog.documents().len(), 1);
        assert_eq!(catalog.errors.len(), 1);
        assert!(matches!(
            &catalog.errors[0],
            CatalogError::InvalidDate { id: 2, .. }
        ));
    }

    #[test]
    fn unknown_tag_is_collected_not_fatal() {
        let content = r#"
[[documents]]
id = 7
title = "Mystery"
date = "01/15/2024"
tag = "blueprints"
"#;
        let (catalog, _file) = mk_catalog(content);
        assert!(catalog.documents().is_empty());
        assert!(matches!(
            &catalog.errors[0],
            CatalogError::UnknownTag { id: 7, .. }
        ));
    }

    #[test]
    fn missing_catalog_file_is_a_hard_error() {
        let cfg = mk_config("/definitely/not/here/catalog.toml".into());
        let result = Catalog::with_config(cfg);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("reading"));
    }

    #[test]
    fn empty_catalog_is_valid() {
        let (catalog, _file) = mk_catalog("");
        assert!(catalog.documents().is_empty());
        assert!(catalog.errors.is_empty());
    }

    #[test]
    fn filter_runs_the_pipeline_over_loaded_documents() {
        let (catalog, _file) = mk_catalog(SAMPLE);
        let state = FilterState {
            query: "turnover".to_string(),
            tag: TagFilter::All,
            ranges: Vec::new(),
            sort: NameSort::Unsorted,
        };
        let out = catalog.filter(&state);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Fund & Asset Turnover");
    }
}
