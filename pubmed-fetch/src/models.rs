use serde::{Deserialize, Serialize};

use crate::responses::ESummaryDocSum;

/// Placeholder written when a summary document omits a field
pub const MISSING_FIELD: &str = "N/A";

/// One row of search output: the fields extracted from an ESummary document
///
/// Field renames fix the CSV header row, so serializing a batch of records
/// produces `PubmedID,Title,Publication Date,Authors` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// PubMed identifier
    #[serde(rename = "PubmedID")]
    pub pmid: String,
    /// Article title
    #[serde(rename = "Title")]
    pub title: String,
    /// Publication date as reported by PubMed
    #[serde(rename = "Publication Date")]
    pub pub_date: String,
    /// Author names joined by ", "
    #[serde(rename = "Authors")]
    pub authors: String,
}

impl PaperRecord {
    /// Build a record from an ESummary document, applying "N/A" fallbacks
    /// for a missing title, a missing publication date, and a missing or
    /// empty author list.
    pub(crate) fn from_docsum(doc: ESummaryDocSum) -> Self {
        let authors: Vec<String> = doc.authors.into_iter().map(|a| a.name).collect();
        let authors = if authors.is_empty() {
            MISSING_FIELD.to_string()
        } else {
            authors.join(", ")
        };

        Self {
            pmid: doc.uid,
            title: doc.title.unwrap_or_else(|| MISSING_FIELD.to_string()),
            pub_date: doc.pubdate.unwrap_or_else(|| MISSING_FIELD.to_string()),
            authors,
        }
    }
}

/// One row of identifier-only output, as produced by XML format searches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PmidRecord {
    /// PubMed identifier
    #[serde(rename = "PubMed_ID")]
    pub pmid: String,
}
