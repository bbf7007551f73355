//! # Movie Search MCP
//!
//! A Model Context Protocol (MCP) server exposing a single `search_movies` tool
//! backed by The Movie Database (TMDB). Results come back as a short status
//! line plus a structured payload that an embedded widget renders as cards.
//!
//! ## Architecture
//!
//! - [`models`]: Search query, TMDB wire types, movie cards and search outcomes
//! - [`sources`]: The [`MovieSource`] trait and the TMDB implementation
//! - [`mcp`]: Tool result shaping, the tool registry and the MCP server
//! - [`utils`]: HTTP client
//! - [`config`]: Configuration management and credential access

pub mod config;
pub mod mcp;
pub mod models;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{MovieCard, SearchOutcome};
pub use sources::{MovieSource, TmdbSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
