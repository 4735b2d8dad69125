//! # PubMed Fetch
//!
//! A Rust client library for searching PubMed and exporting article
//! metadata to CSV files.
//!
//! ## Features
//!
//! - **PubMed Search**: Query the ESearch API in JSON or XML format
//! - **Metadata Retrieval**: Fetch title, publication date, and authors per PMID
//! - **CSV Export**: Write search results as flat tabular files
//! - **Async Support**: Built on tokio for async/await support
//! - **Error Handling**: Structured error types with retryability classification
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_fetch::{export, PubMedClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new();
//!
//!     // Search and fetch metadata for the top ten hits
//!     let records = client.search_and_fetch("cancer immunotherapy", 10).await?;
//!
//!     for record in &records {
//!         println!("{}: {}", record.pmid, record.title);
//!     }
//!
//!     export::write_records(&records, "pubmed_results.csv")?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod retry;

mod parser;
mod responses;

// Re-export main types for convenience
pub use client::{PubMedClient, ResponseFormat};
pub use config::ClientConfig;
pub use error::{PubMedError, Result};
pub use models::{MISSING_FIELD, PaperRecord, PmidRecord};
pub use retry::RetryConfig;
