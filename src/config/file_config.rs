//! The commented configuration file written by `init-config`.
//!
//! Reading goes through [`super::load_config`]; this module only renders and
//! writes the starting template, with every value set to its default.

use std::path::Path;

use super::{Config, ENV_PREFIX, TMDB_API_KEY_ENV};

/// Render the default configuration as commented TOML
pub fn default_config_toml() -> String {
    let defaults = Config::default();

    format!(
        r#"# movie-search configuration
#
# Every key is optional; the values below are the defaults.
# Any key can be overridden from the environment as
# {prefix}_<SECTION>__<KEY>, e.g. {prefix}_HTTP__TIMEOUT_SECS=10.

[tmdb]
# TMDB v3 API key, used only when {key_env} is not set.
# api_key = "your-tmdb-api-key"
search_url = "{search_url}"
# Poster URLs are this base followed by the poster path.
image_base_url = "{image_base_url}"

[http]
# Whole-request timeout in seconds
timeout_secs = {timeout}
connect_timeout_secs = {connect_timeout}

[logging]
# Default filter directive when RUST_LOG is not set
level = "{level}"
# Set to "json" for one JSON object per log event.
# format = "json"
"#,
        prefix = ENV_PREFIX,
        key_env = TMDB_API_KEY_ENV,
        search_url = defaults.tmdb.search_url,
        image_base_url = defaults.tmdb.image_base_url,
        timeout = defaults.http.timeout_secs,
        connect_timeout = defaults.http.connect_timeout_secs,
        level = defaults.logging.level,
    )
}

/// Write the default template to `path`, creating parent directories
pub fn write_default_config(path: &Path) -> Result<(), ConfigFileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),
}
