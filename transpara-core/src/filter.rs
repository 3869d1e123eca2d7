//! The three-stage document filter pipeline: search/tag predicate, date
//! ranges, then the optional title sort. Every stage is a pure function of
//! its input; the document list itself is never mutated.

use crate::document::{Document, TagFilter};
use crate::selection::DateRange;
use std::cmp::Ordering;

/// Alphabetical title sort toggle. `Unsorted` preserves input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameSort {
    #[default]
    Unsorted,
    Asc,
    Desc,
}

/// Everything the pipeline needs to narrow a document list.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub query: String,
    pub tag: TagFilter,
    /// Zero or more committed ranges; a document passes when it falls in
    /// any of them. Empty means the date stage is a no-op.
    pub ranges: Vec<DateRange>,
    pub sort: NameSort,
}

/// Stage 1: free-text and tag predicate.
///
/// Keeps documents whose title or description contains `query` as a
/// case-insensitive substring (an empty or blank query matches everything),
/// and whose tag passes the tag filter.
pub fn search_tag_filter<'a>(
    documents: &'a [Document],
    query: &str,
    tag: TagFilter,
) -> Vec<&'a Document> {
    let needle = query.trim().to_lowercase();
    documents
        .iter()
        .filter(|doc| tag.matches(doc.tag))
        .filter(|doc| {
            needle.is_empty()
                || doc.title.to_lowercase().contains(&needle)
                || doc.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Stage 2: keeps documents that fall inside at least one range.
pub fn date_filter<'a>(documents: Vec<&'a Document>, ranges: &[DateRange]) -> Vec<&'a Document> {
    if ranges.is_empty() {
        return documents;
    }
    documents
        .into_iter()
        .filter(|doc| ranges.iter().any(|r| r.contains(doc.date)))
        .collect()
}

/// Stage 3: optional alphabetical sort by title.
///
/// `Asc` is a stable case-insensitive sort, so equal titles keep their
/// input order. `Desc` is the exact reverse of the `Asc` result rather
/// than an independent descending sort, which keeps tie order mirrored.
pub fn sort_by_title<'a>(mut documents: Vec<&'a Document>, sort: NameSort) -> Vec<&'a Document> {
    if sort == NameSort::Unsorted {
        return documents;
    }
    documents.sort_by(|a, b| compare_titles(&a.title, &b.title));
    if sort == NameSort::Desc {
        documents.reverse();
    }
    documents
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// The fixed composition: predicate, then date ranges, then sort.
///
/// Pure and deterministic: re-running with the same documents and state
/// yields the same list in the same order, no matter how many times a UI
/// control triggers recomputation.
pub fn final_documents<'a>(documents: &'a [Document], state: &FilterState) -> Vec<&'a Document> {
    let matched = search_tag_filter(documents, &state.query, state.tag);
    let dated = date_filter(matched, &state.ranges);
    sort_by_title(dated, state.sort)
}
