use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::models::PaperRecord;
use crate::parser::parse_pmids_from_xml;
use crate::responses::{ESearchResult, ESummaryDocSum, ESummaryResponse};
use crate::retry::with_retry;

/// Retrieval format for ESearch requests
///
/// The format controls the `retmode` parameter and, downstream, what a
/// pipeline can do with the results: JSON searches can be followed by
/// per-PMID summary fetches, XML searches yield the identifier list only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// JSON response body
    Json,
    /// XML response body
    Xml,
}

impl ResponseFormat {
    /// Value passed as the `retmode` query parameter
    pub fn as_retmode(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
        }
    }
}

/// Client for the PubMed E-utilities API
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a new PubMed client with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_fetch::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new PubMed client with custom configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration including timeout and retry policy
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use pubmed_fetch::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_timeout(Duration::from_secs(60))
    ///     .with_max_retries(2);
    ///
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();

        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            config,
        }
    }

    /// Search for articles matching a query string
    ///
    /// Sends an ESearch request and returns the matching PMIDs in the order
    /// PubMed reports them.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text search query
    /// * `limit` - Maximum number of results to return
    /// * `format` - Retrieval format for the request
    ///
    /// # Errors
    ///
    /// * `PubMedError::NoResults` - If the search matched no articles
    /// * `PubMedError::ApiError` - On non-success HTTP status or an in-band NCBI error
    /// * `PubMedError::RequestError` - If the HTTP request fails
    /// * `PubMedError::XmlError` - If an XML response cannot be parsed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_fetch::{PubMedClient, ResponseFormat};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let pmids = client
    ///         .search_pmids("cancer immunotherapy", 10, ResponseFormat::Json)
    ///         .await?;
    ///     println!("Found {} articles", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(query = %query, limit = limit))]
    pub async fn search_pmids(
        &self,
        query: &str,
        limit: usize,
        format: ResponseFormat,
    ) -> Result<Vec<String>> {
        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmode={}&retmax={}",
            self.base_url,
            urlencoding::encode(query),
            format.as_retmode(),
            limit
        );

        debug!("Making ESearch API request");
        let response = self.make_request(&url).await?;

        let pmids = match format {
            ResponseFormat::Json => {
                let search_result: ESearchResult = response.json().await?;

                // NCBI sometimes returns 200 OK with an ERROR field
                if let Some(error_msg) = &search_result.esearchresult.error {
                    return Err(PubMedError::ApiError {
                        status: 200,
                        message: format!("NCBI ESearch API error: {}", error_msg),
                    });
                }

                search_result.esearchresult.idlist
            }
            ResponseFormat::Xml => {
                let xml_text = response.text().await?;
                parse_pmids_from_xml(&xml_text)?
            }
        };

        if pmids.is_empty() {
            return Err(PubMedError::NoResults {
                query: query.to_string(),
            });
        }

        info!(results_found = pmids.len(), "ESearch completed");

        Ok(pmids)
    }

    /// Fetch the summary record for a single PMID using the ESummary API
    ///
    /// # Arguments
    ///
    /// * `pmid` - PubMed ID as a string
    ///
    /// # Errors
    ///
    /// * `PubMedError::SummaryNotFound` - If the response does not describe the PMID
    /// * `PubMedError::ApiError` - On non-success HTTP status or a per-document error
    /// * `PubMedError::JsonError` - If the response cannot be parsed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_fetch::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let record = client.fetch_summary("31978945").await?;
    ///     println!("{}: {}", record.pmid, record.title);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(pmid = %pmid))]
    pub async fn fetch_summary(&self, pmid: &str) -> Result<PaperRecord> {
        let url = format!(
            "{}/esummary.fcgi?db=pubmed&id={}&retmode=json",
            self.base_url,
            urlencoding::encode(pmid)
        );

        debug!("Making ESummary API request");
        let response = self.make_request(&url).await?;
        let json_text = response.text().await?;

        Self::parse_esummary_response(&json_text, pmid)
    }

    /// Fetch summary records for multiple PMIDs, one request per PMID
    ///
    /// Requests are issued sequentially. A failure for one PMID logs a
    /// warning and skips it; the remaining PMIDs are still fetched, so the
    /// returned records can be a partial result. Input order is preserved.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_fetch::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let records = client.fetch_summaries(&["31978945", "33515491"]).await;
    ///     for record in &records {
    ///         println!("{}: {}", record.pmid, record.title);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(pmids_count = pmids.len()))]
    pub async fn fetch_summaries(&self, pmids: &[&str]) -> Vec<PaperRecord> {
        let mut records = Vec::with_capacity(pmids.len());

        for pmid in pmids {
            match self.fetch_summary(pmid).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(pmid = %pmid, error = %e, "Failed to fetch summary, skipping");
                }
            }
        }

        info!(
            requested = pmids.len(),
            fetched = records.len(),
            "ESummary fetches completed"
        );

        records
    }

    /// Search and fetch summary records in a single operation
    ///
    /// Combines `search_pmids()` in JSON format with `fetch_summaries()`.
    /// PMIDs whose summary fetch fails are skipped, so the result can hold
    /// fewer records than the search returned.
    ///
    /// # Errors
    ///
    /// Fails only when the search itself fails; see [`Self::search_pmids`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_fetch::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let records = client.search_and_fetch("cancer immunotherapy", 10).await?;
    ///     for record in &records {
    ///         println!("{} ({}): {}", record.pmid, record.pub_date, record.title);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn search_and_fetch(&self, query: &str, limit: usize) -> Result<Vec<PaperRecord>> {
        let pmids = self
            .search_pmids(query, limit, ResponseFormat::Json)
            .await?;

        let pmid_refs: Vec<&str> = pmids.iter().map(|s| s.as_str()).collect();
        Ok(self.fetch_summaries(&pmid_refs).await)
    }

    /// Internal helper for making HTTP requests with retry handling
    pub(crate) async fn make_request(&self, url: &str) -> Result<Response> {
        let response = with_retry(
            || async {
                debug!("Making API request to: {}", url);
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(PubMedError::from)?;

                // Convert server error status to a retryable error
                if response.status().is_server_error() || response.status().as_u16() == 429 {
                    return Err(PubMedError::ApiError {
                        status: response.status().as_u16(),
                        message: response
                            .status()
                            .canonical_reason()
                            .unwrap_or("Unknown error")
                            .to_string(),
                    });
                }

                Ok(response)
            },
            &self.config.retry_config,
            "NCBI API request",
        )
        .await?;

        // Check for any non-success status (client errors, etc.)
        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(PubMedError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }

    /// Parse an ESummary JSON response into the record for `pmid`
    pub(crate) fn parse_esummary_response(json_text: &str, pmid: &str) -> Result<PaperRecord> {
        let response: ESummaryResponse = serde_json::from_str(json_text)?;
        let result = &response.result;

        let Some(doc_value) = result.get(pmid) else {
            return Err(PubMedError::SummaryNotFound {
                pmid: pmid.to_string(),
            });
        };

        // Per-document errors come back as an "error" field instead of metadata
        if let Some(error) = doc_value.get("error") {
            return Err(PubMedError::ApiError {
                status: 200,
                message: format!("NCBI ESummary API error: {}", error),
            });
        }

        let doc: ESummaryDocSum = serde_json::from_value(doc_value.clone())?;

        Ok(PaperRecord::from_docsum(doc))
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}
