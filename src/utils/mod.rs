//! Utility modules shared by the movie sources.
//!
//! - [`HttpClient`]: reqwest client with the crate's user agent and timeouts

mod http;

pub use http::{HttpClient, USER_AGENT};
