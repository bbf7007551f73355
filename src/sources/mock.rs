//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{MovieCard, SearchError, SearchOutcome, SearchQuery};
use crate::sources::MovieSource;

/// A mock source for testing that returns predefined outcomes.
///
/// Without a configured response it reports no results for the query.
#[derive(Debug, Default)]
pub struct MockSource {
    search_response: Mutex<Option<SearchOutcome>>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outcome to return.
    pub fn set_search_response(&self, outcome: SearchOutcome) {
        let mut guard = self.search_response.lock().unwrap();
        *guard = Some(outcome);
    }

    /// Number of searches performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, query: &SearchQuery) -> SearchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.search_response.lock().unwrap();
        match &*guard {
            Some(outcome) => outcome.clone(),
            None => SearchOutcome::failed(
                &query.query,
                SearchError::NoResults {
                    query: query.query.clone(),
                },
            ),
        }
    }
}

/// Helper function to create a mock movie card for testing.
pub fn make_movie(id: i64, title: &str, release_year: &str, rating: f64) -> MovieCard {
    MovieCard {
        id,
        title: title.to_string(),
        release_year: release_year.to_string(),
        rating,
        poster_url: Some(format!("https://image.tmdb.org/t/p/w500/{}.jpg", id)),
    }
}
