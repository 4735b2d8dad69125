use std::time::Duration;

use crate::retry::RetryConfig;

/// Default NCBI E-utilities endpoint
const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for PubMedClient
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pubmed_fetch::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_max_retries(2);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Override for the E-utilities base URL
    pub base_url: Option<String>,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Retry policy for transient failures
    pub retry_config: RetryConfig,
    /// Override for the HTTP User-Agent header
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            retry_config: RetryConfig::default(),
            user_agent: None,
        }
    }

    /// Set a custom base URL for the E-utilities API
    ///
    /// Mainly useful for pointing the client at a mock server in tests.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of retry attempts for transient failures
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.retry_config = self.retry_config.with_max_retries(max_retries);
        self
    }

    /// Replace the retry policy wholesale
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Set a custom User-Agent header
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The base URL requests are sent to
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// The User-Agent header sent with requests
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("pubmed-fetch/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
