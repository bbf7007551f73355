//! Shaping search outcomes into MCP tool results.
//!
//! A tool result carries two channels: a one-line status text for the model
//! and a structured payload (`{ query, movies, error? }`) that the movie widget
//! renders. This module performs no I/O.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::{ErrorKind, MovieCard, SearchOutcome};

/// Template URI of the widget that renders the structured payload
pub const WIDGET_TEMPLATE_URI: &str = "ui://widget/movie-search.html";

pub const MISSING_CREDENTIAL_TEXT: &str =
    "Sorry, movie search is not available right now because the TMDB API key is not configured.";
pub const UPSTREAM_ERROR_TEXT: &str = "The external movie API returned an error.";
pub const NETWORK_ERROR_TEXT: &str =
    "A network or parsing error occurred while searching for movies.";

/// Structured payload handed to the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub query: String,

    pub movies: Vec<MovieCard>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The dual-channel result of a `search_movies` call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResponse {
    /// Human-readable status line
    pub text: String,

    /// Widget payload
    pub payload: SearchPayload,
}

impl ToolResponse {
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        let error = outcome
            .error
            .as_ref()
            .map(ToString::to_string)
            .filter(|e| !e.is_empty());

        Self {
            text: status_text(outcome),
            payload: SearchPayload {
                query: outcome.query.clone(),
                movies: outcome.movies.clone(),
                error,
            },
        }
    }

    /// Render as an MCP `CallToolResult` object
    pub fn into_value(self) -> Value {
        json!({
            "content": [
                { "type": "text", "text": self.text }
            ],
            "structuredContent": self.payload,
            "_meta": {
                "openai/outputTemplate": WIDGET_TEMPLATE_URI
            }
        })
    }
}

/// One-line summary of an outcome
pub fn status_text(outcome: &SearchOutcome) -> String {
    match outcome.error_kind() {
        Some(ErrorKind::MissingCredential) => MISSING_CREDENTIAL_TEXT.to_string(),
        Some(ErrorKind::UpstreamHttp) => UPSTREAM_ERROR_TEXT.to_string(),
        Some(ErrorKind::NoResults) => format!("No movies found for \"{}\".", outcome.query),
        Some(ErrorKind::NetworkOrParse) => NETWORK_ERROR_TEXT.to_string(),
        None => format!(
            "Found {} movie result(s) for \"{}\".",
            outcome.movies.len(),
            outcome.query
        ),
    }
}
