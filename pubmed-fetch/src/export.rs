//! CSV export for search results

use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::error::Result;
use crate::models::{PaperRecord, PmidRecord};

/// Write article records to a CSV file with a header row.
///
/// The target file is created if missing and truncated if present. Zero
/// records produce an empty file.
///
/// # Example
///
/// ```no_run
/// use pubmed_fetch::export::write_records;
/// use pubmed_fetch::models::PaperRecord;
///
/// let records = vec![PaperRecord {
///     pmid: "31978945".to_string(),
///     title: "A Novel Coronavirus from Patients with Pneumonia in China, 2019.".to_string(),
///     pub_date: "2020 Feb".to_string(),
///     authors: "Zhu N, Zhang D".to_string(),
/// }];
/// write_records(&records, "pubmed_results.csv")?;
/// # Ok::<(), pubmed_fetch::PubMedError>(())
/// ```
pub fn write_records<P: AsRef<Path>>(records: &[PaperRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = Writer::from_path(path)?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = records.len(), "Wrote records to CSV");
    Ok(())
}

/// Write a list of PMIDs to a single-column CSV file.
///
/// Used for XML format searches, which return identifiers without article
/// metadata. Overwrite semantics match [`write_records`].
pub fn write_pmids<P: AsRef<Path>>(pmids: &[String], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = Writer::from_path(path)?;

    for pmid in pmids {
        writer.serialize(PmidRecord { pmid: pmid.clone() })?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = pmids.len(), "Wrote PMIDs to CSV");
    Ok(())
}
