//! The Movie Database (TMDB) source implementation.
//!
//! Uses the v3 `search/movie` endpoint with API-key authentication.
//! API documentation: <https://developer.themoviedb.org/reference/search-movie>

use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

use crate::config::{ApiKeyProvider, Config, TmdbConfig, TMDB_API_KEY_ENV};
use crate::models::{
    MovieCard, SearchError, SearchOutcome, SearchQuery, TmdbErrorBody, TmdbMovie,
    TmdbSearchResponse, MAX_MOVIES,
};
use crate::sources::{MovieSource, SourceError};
use crate::utils::HttpClient;

/// TMDB movie search source
#[derive(Debug, Clone)]
pub struct TmdbSource {
    client: HttpClient,
    search_url: Url,
    image_base_url: String,
    api_key: Arc<dyn ApiKeyProvider>,
}

impl TmdbSource {
    /// Create a source from application configuration
    pub fn new(config: &Config, api_key: Arc<dyn ApiKeyProvider>) -> Result<Self, SourceError> {
        let client = HttpClient::with_config(&config.http)?;
        Self::with_client(client, &config.tmdb, api_key)
    }

    /// Create a source using an existing HTTP client
    pub fn with_client(
        client: HttpClient,
        tmdb: &TmdbConfig,
        api_key: Arc<dyn ApiKeyProvider>,
    ) -> Result<Self, SourceError> {
        let search_url = Url::parse(&tmdb.search_url).map_err(|e| SourceError::InvalidUrl {
            url: tmdb.search_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            search_url,
            image_base_url: tmdb.image_base_url.clone(),
            api_key,
        })
    }

    /// Build the search URL for one request
    fn build_url(&self, api_key: &str, query: &SearchQuery) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", api_key)
            .append_pair("query", &query.query)
            .append_pair("page", &query.page.to_string())
            .append_pair("include_adult", if query.include_adult { "true" } else { "false" });
        url
    }

    /// Perform the request and decode the result list
    async fn fetch(
        &self,
        api_key: &str,
        query: &SearchQuery,
    ) -> Result<Vec<TmdbMovie>, SearchError> {
        tracing::debug!(query = %query.query, page = query.page, "Searching TMDB");

        // reqwest errors embed the request URL, which carries the API key
        let response = self
            .client
            .get(self.build_url(api_key, query))
            .send()
            .await
            .map_err(|e| SearchError::network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.text().await {
                Ok(body) => error_detail(&body),
                Err(_) => None,
            };
            return Err(SearchError::UpstreamHttp {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::network(e.without_url().to_string()))?;

        let data: TmdbSearchResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::network(format!("Failed to parse TMDB response: {}", e)))?;

        Ok(data.results)
    }

    fn to_cards(&self, results: &[TmdbMovie]) -> Vec<MovieCard> {
        results
            .iter()
            .take(MAX_MOVIES)
            .map(|movie| MovieCard::from_tmdb(movie, &self.image_base_url))
            .collect()
    }
}

/// Best-effort extraction of TMDB's `status_message` from an error body
fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<TmdbErrorBody>(body)
        .ok()
        .and_then(|b| b.status_message)
        .filter(|m| !m.trim().is_empty())
}

#[async_trait]
impl MovieSource for TmdbSource {
    fn id(&self) -> &str {
        "tmdb"
    }

    fn name(&self) -> &str {
        "The Movie Database"
    }

    async fn search(&self, query: &SearchQuery) -> SearchOutcome {
        let Some(api_key) = self.api_key.tmdb_api_key() else {
            tracing::warn!("{} is not set; skipping TMDB request", TMDB_API_KEY_ENV);
            return SearchOutcome::failed(&query.query, SearchError::MissingCredential);
        };

        let outcome = match self.fetch(&api_key, query).await {
            Ok(results) => SearchOutcome::found(&query.query, self.to_cards(&results)),
            Err(e) => SearchOutcome::failed(&query.query, e),
        };

        match &outcome.error {
            None => tracing::info!(
                query = %query.query,
                count = outcome.movies.len(),
                "TMDB search succeeded"
            ),
            Some(e) => tracing::warn!(
                query = %query.query,
                kind = ?e.kind(),
                "TMDB search degraded: {}",
                e
            ),
        }

        outcome
    }
}
