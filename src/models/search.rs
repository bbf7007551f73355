//! Search request and outcome models.

use serde::{Deserialize, Serialize};

use super::movie::MovieCard;

/// Maximum number of movie cards carried by a [`SearchOutcome`]
pub const MAX_MOVIES: usize = 3;

/// Fallback text for transport failures that carry no message
pub const UNKNOWN_NETWORK_ERROR: &str = "Unknown network error";

/// Search query parameters sent upstream
///
/// Only the first page is ever requested and adult titles are always excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text movie title; may be empty
    pub query: String,

    /// Result page to request
    pub page: u32,

    /// Whether adult titles are included
    pub include_adult: bool,
}

impl SearchQuery {
    /// Create a new search query for the first page, adult content excluded
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            include_adult: false,
        }
    }
}

/// Classification of a degraded search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    UpstreamHttp,
    NoResults,
    NetworkOrParse,
}

/// Reasons a search produced no movies
///
/// None of these are fatal: each is carried inside a [`SearchOutcome`] and its
/// `Display` text becomes the `error` field handed to the widget.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// `TMDB_API_KEY` is not configured
    #[error("TMDB_API_KEY is not configured. Set it in the server environment to enable movie search.")]
    MissingCredential,

    /// Non-2xx response from TMDB
    #[error("{}", upstream_message(.status, .detail))]
    UpstreamHttp { status: u16, detail: Option<String> },

    /// TMDB answered with an empty result set
    #[error("No movies found for \"{query}\".")]
    NoResults { query: String },

    /// Transport failure or a body that does not match the expected shape
    #[error("{0}")]
    NetworkOrParse(String),
}

fn upstream_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("TMDB request failed with status {}: {}", status, detail),
        None => format!("TMDB request failed with status {}", status),
    }
}

impl SearchError {
    /// Build a network/parse failure, substituting a fixed text for empty messages
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            SearchError::NetworkOrParse(UNKNOWN_NETWORK_ERROR.to_string())
        } else {
            SearchError::NetworkOrParse(message)
        }
    }

    /// The error's classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::MissingCredential => ErrorKind::MissingCredential,
            SearchError::UpstreamHttp { .. } => ErrorKind::UpstreamHttp,
            SearchError::NoResults { .. } => ErrorKind::NoResults,
            SearchError::NetworkOrParse(_) => ErrorKind::NetworkOrParse,
        }
    }
}

/// Result of one movie search
///
/// Either `movies` is non-empty and `error` is `None`, or `movies` is empty
/// and `error` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The query text exactly as received
    pub query: String,

    /// At most [`MAX_MOVIES`] cards in upstream relevance order
    pub movies: Vec<MovieCard>,

    /// Why the search came back empty
    pub error: Option<SearchError>,
}

impl SearchOutcome {
    /// Create a successful outcome, truncating to [`MAX_MOVIES`]
    pub fn found(query: impl Into<String>, mut movies: Vec<MovieCard>) -> Self {
        let query = query.into();
        if movies.is_empty() {
            return Self::failed(query.clone(), SearchError::NoResults { query });
        }
        movies.truncate(MAX_MOVIES);
        Self {
            query,
            movies,
            error: None,
        }
    }

    /// Create a degraded outcome with no movies
    pub fn failed(query: impl Into<String>, error: SearchError) -> Self {
        Self {
            query: query.into(),
            movies: Vec::new(),
            error: Some(error),
        }
    }

    /// Whether the search produced movies
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Classification of the failure, if any
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(SearchError::kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i64) -> MovieCard {
        MovieCard {
            id,
            title: format!("Movie {}", id),
            release_year: "2000".to_string(),
            rating: 5.0,
            poster_url: None,
        }
    }

    #[test]
    fn test_query_defaults() {
        let query = SearchQuery::new("Alien");
        assert_eq!(query.query, "Alien");
        assert_eq!(query.page, 1);
        assert!(!query.include_adult);
    }

    #[test]
    fn test_found_truncates_in_order() {
        let outcome = SearchOutcome::found("x", (1..=5).map(card).collect());
        let ids: Vec<i64> = outcome.movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(outcome.is_success());
    }

    #[test]
    fn test_found_empty_is_no_results() {
        let outcome = SearchOutcome::found("Nothing Here", Vec::new());
        assert_eq!(outcome.error_kind(), Some(ErrorKind::NoResults));
        assert_eq!(
            outcome.error.unwrap().to_string(),
            "No movies found for \"Nothing Here\"."
        );
    }

    #[test]
    fn test_upstream_message() {
        let with_detail = SearchError::UpstreamHttp {
            status: 401,
            detail: Some("Invalid API key: You must be granted a valid key.".to_string()),
        };
        assert_eq!(
            with_detail.to_string(),
            "TMDB request failed with status 401: Invalid API key: You must be granted a valid key."
        );

        let bare = SearchError::UpstreamHttp {
            status: 503,
            detail: None,
        };
        assert_eq!(bare.to_string(), "TMDB request failed with status 503");
    }

    #[test]
    fn test_network_fallback_message() {
        assert_eq!(SearchError::network("").to_string(), UNKNOWN_NETWORK_ERROR);
        assert_eq!(
            SearchError::network("connection refused").to_string(),
            "connection refused"
        );
    }

    #[test]
    fn test_missing_credential_mentions_env_var() {
        assert!(SearchError::MissingCredential
            .to_string()
            .contains("TMDB_API_KEY"));
    }
}
