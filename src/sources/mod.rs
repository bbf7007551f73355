//! Movie sources.
//!
//! A [`MovieSource`] turns a [`SearchQuery`] into a [`SearchOutcome`]. Sources
//! never fail the call: every upstream problem is folded into the outcome's
//! `error` so the widget always receives a payload it can render.
//!
//! [`TmdbSource`] is the production implementation backed by The Movie
//! Database; [`MockSource`] returns canned outcomes for tests.

pub mod mock;
mod tmdb;

pub use mock::MockSource;
pub use tmdb::TmdbSource;

use crate::models::{SearchOutcome, SearchQuery};
use async_trait::async_trait;

/// Interface for movie search providers
#[async_trait]
pub trait MovieSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "tmdb")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search for movies matching the query
    ///
    /// Issues at most one upstream request and never retries.
    async fn search(&self, query: &SearchQuery) -> SearchOutcome;
}

/// Errors that can occur while constructing a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// A configured URL is not valid
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
