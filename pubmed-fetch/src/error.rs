use std::result;

use crate::retry::RetryableError;
use thiserror::Error;

/// Error types for PubMed fetch operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// ESummary response did not describe the requested PMID
    #[error("Summary not found for PMID {pmid}")]
    SummaryNotFound { pmid: String },

    /// Search matched no articles
    #[error("No results found for query: {query}")]
    NoResults { query: String },

    /// Generic API error with HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// CSV serialization failed
    #[error("CSV writing failed: {0}")]
    CsvError(#[from] csv::Error),

    /// IO error for file operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = result::Result<T, PubMedError>;

impl RetryableError for PubMedError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network errors are typically transient
            PubMedError::RequestError(err) => {
                if err.is_timeout() || err.is_connect() {
                    return true;
                }

                // Check for server errors (5xx)
                if let Some(status) = err.status() {
                    return status.is_server_error() || status.as_u16() == 429;
                }

                // DNS and other network errors
                !err.is_builder() && !err.is_redirect() && !err.is_decode()
            }

            // Server errors (5xx) and rate limiting (429) are retryable
            PubMedError::ApiError { status, .. } => {
                (*status >= 500 && *status < 600) || *status == 429
            }

            // All other errors are not retryable
            PubMedError::JsonError(_)
            | PubMedError::XmlError(_)
            | PubMedError::SummaryNotFound { .. }
            | PubMedError::NoResults { .. }
            | PubMedError::CsvError(_)
            | PubMedError::IoError(_) => false,
        }
    }

    fn retry_reason(&self) -> &str {
        match self {
            PubMedError::RequestError(err) if err.is_timeout() => "Request timeout",
            PubMedError::RequestError(err) if err.is_connect() => "Connection error",
            PubMedError::RequestError(_) => "Network error",
            PubMedError::ApiError { status, .. } => match status {
                429 => "Rate limit exceeded",
                500..=599 => "Server error",
                _ => "API error",
            },
            _ => "Non-transient error",
        }
    }
}
