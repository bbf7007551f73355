//! Core data models for movie searches.

mod movie;
mod search;

pub use movie::{
    poster_url, release_year, round_rating, MovieCard, TmdbErrorBody, TmdbMovie,
    TmdbSearchResponse, UNKNOWN_YEAR,
};
pub use search::{
    ErrorKind, SearchError, SearchOutcome, SearchQuery, MAX_MOVIES, UNKNOWN_NETWORK_ERROR,
};
