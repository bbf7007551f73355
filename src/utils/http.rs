//! HTTP client utilities.

use reqwest::Client;

use crate::config::HttpConfig;
use crate::sources::SourceError;

/// User agent sent with every outbound request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client with sensible defaults
///
/// Timeouts live here rather than in the search logic; a timed-out request
/// surfaces as an ordinary transport error.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(&HttpConfig::default())
    }

    /// Create a new HTTP client with the given timeouts
    pub fn with_config(config: &HttpConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Start a GET request
    pub fn get(&self, url: impl reqwest::IntoUrl) -> reqwest::RequestBuilder {
        self.client.get(url)
    }
}
