//! Configuration management.
//!
//! Settings come from an optional TOML file layered with `MOVIE_SEARCH_*`
//! environment variables. Tool calls resolve the TMDB credential through an
//! [`ApiKeyProvider`] on every invocation rather than reading it from [`Config`].

mod file_config;

pub use file_config::{default_config_toml, write_default_config, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the TMDB API key
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

/// Default TMDB movie search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://api.themoviedb.org/3/search/movie";

/// Default TMDB poster CDN base (w500 rendition)
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream provider settings
    #[serde(default)]
    pub tmdb: TmdbConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// TMDB settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// API key used when `TMDB_API_KEY` is not set
    #[serde(default)]
    pub api_key: Option<String>,

    /// Search endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Poster image base URL
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            search_url: default_search_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"json"` for structured output, plain text otherwise
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.as_deref() == Some("json")
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "MOVIE_SEARCH";

/// `MOVIE_SEARCH_<SECTION>__<KEY>`, e.g. `MOVIE_SEARCH_TMDB__SEARCH_URL`
fn env_overrides() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Load configuration from a file, with `MOVIE_SEARCH_*` overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_overrides())
        .build()?;

    settings.try_deserialize()
}

/// Load configuration from `MOVIE_SEARCH_*` environment variables only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(env_overrides())
        .build()?
        .try_deserialize()
}

/// Find a configuration file in the default locations
///
/// Checks `./movie-search.toml`, then `<config dir>/movie-search/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("movie-search.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("movie-search").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Access to the TMDB credential
///
/// Resolved once per tool invocation so the key can be rotated without a
/// restart and substituted in tests.
pub trait ApiKeyProvider: Send + Sync + std::fmt::Debug {
    /// The API key, or `None` when not configured
    fn tmdb_api_key(&self) -> Option<String>;
}

/// Reads `TMDB_API_KEY` from the process environment on every call
///
/// A blank variable counts as unset. When unset, the optional fallback
/// (usually from the config file) is used.
#[derive(Debug, Clone, Default)]
pub struct EnvApiKey {
    fallback: Option<String>,
}

impl EnvApiKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `key` when the environment variable is absent
    pub fn with_fallback(key: Option<String>) -> Self {
        Self {
            fallback: key.and_then(non_blank),
        }
    }
}

impl ApiKeyProvider for EnvApiKey {
    fn tmdb_api_key(&self) -> Option<String> {
        std::env::var(TMDB_API_KEY_ENV)
            .ok()
            .and_then(non_blank)
            .or_else(|| self.fallback.clone())
    }
}

/// A fixed credential
#[derive(Debug, Clone, Default)]
pub struct StaticApiKey(Option<String>);

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(non_blank(key.into()))
    }

    /// A provider that never yields a key
    pub fn missing() -> Self {
        Self(None)
    }
}

impl ApiKeyProvider for StaticApiKey {
    fn tmdb_api_key(&self) -> Option<String> {
        self.0.clone()
    }
}

fn non_blank(key: String) -> Option<String> {
    if key.trim().is_empty() {
        None
    } else {
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.tmdb.api_key.is_none());
        assert_eq!(config.tmdb.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.tmdb.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.http.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_load_config_partial_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[tmdb]
search_url = "http://localhost:9999/3/search/movie"

[http]
timeout_secs = 5

[logging]
format = "json"
"#
        )
        .unwrap();

        let unset: [(&str, Option<&str>); 3] = [
            ("MOVIE_SEARCH_TMDB__IMAGE_BASE_URL", None),
            ("MOVIE_SEARCH_HTTP__CONNECT_TIMEOUT_SECS", None),
            ("MOVIE_SEARCH_LOGGING__LEVEL", None),
        ];
        temp_env::with_vars(unset, || {
            let config = load_config(file.path()).unwrap();
            assert_eq!(config.tmdb.search_url, "http://localhost:9999/3/search/movie");
            assert_eq!(config.tmdb.image_base_url, DEFAULT_IMAGE_BASE_URL);
            assert_eq!(config.http.timeout_secs, 5);
            assert_eq!(config.http.connect_timeout_secs, 10);
            assert!(config.logging.is_json());
            assert_eq!(config.logging.level, "info");
        });
    }

    #[test]
    fn test_static_api_key() {
        assert_eq!(
            StaticApiKey::new("abc").tmdb_api_key(),
            Some("abc".to_string())
        );
        assert_eq!(StaticApiKey::new("   ").tmdb_api_key(), None);
        assert_eq!(StaticApiKey::missing().tmdb_api_key(), None);
    }

    #[test]
    fn test_env_overrides_use_single_underscore_after_prefix() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[http]\ntimeout_secs = 5").unwrap();

        temp_env::with_vars(
            [
                ("MOVIE_SEARCH_TMDB__SEARCH_URL", Some("http://localhost:4010/search")),
                ("MOVIE_SEARCH_HTTP__CONNECT_TIMEOUT_SECS", Some("3")),
                ("MOVIE_SEARCH_LOGGING__FORMAT", Some("json")),
            ],
            || {
                let config = load_config(file.path()).unwrap();
                assert_eq!(config.tmdb.search_url, "http://localhost:4010/search");
                assert_eq!(config.http.connect_timeout_secs, 3);
                assert_eq!(config.http.timeout_secs, 5);
                assert!(config.logging.is_json());

                let config = get_config().unwrap();
                assert_eq!(config.tmdb.search_url, "http://localhost:4010/search");
                assert_eq!(config.http.connect_timeout_secs, 3);
                assert_eq!(config.http.timeout_secs, 30);
            },
        );
    }

    #[test]
    fn test_env_overrides_beat_file_values() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();

        temp_env::with_var("MOVIE_SEARCH_LOGGING__LEVEL", Some("debug"), || {
            let config = load_config(file.path()).unwrap();
            assert_eq!(config.logging.level, "debug");
        });
    }

    #[test]
    fn test_env_api_key_reads_environment() {
        temp_env::with_var(TMDB_API_KEY_ENV, Some("from-env"), || {
            assert_eq!(
                EnvApiKey::new().tmdb_api_key(),
                Some("from-env".to_string())
            );
            assert_eq!(
                EnvApiKey::with_fallback(Some("from-file".to_string())).tmdb_api_key(),
                Some("from-env".to_string())
            );
        });
    }

    #[test]
    fn test_env_api_key_unset_uses_fallback() {
        temp_env::with_var_unset(TMDB_API_KEY_ENV, || {
            assert_eq!(EnvApiKey::new().tmdb_api_key(), None);
            assert_eq!(
                EnvApiKey::with_fallback(Some("from-file".to_string())).tmdb_api_key(),
                Some("from-file".to_string())
            );
            assert_eq!(EnvApiKey::with_fallback(Some("  ".to_string())).tmdb_api_key(), None);
        });
    }

    #[test]
    fn test_env_api_key_blank_counts_as_missing() {
        temp_env::with_var(TMDB_API_KEY_ENV, Some("   "), || {
            assert_eq!(EnvApiKey::new().tmdb_api_key(), None);
            assert_eq!(
                EnvApiKey::with_fallback(Some("from-file".to_string())).tmdb_api_key(),
                Some("from-file".to_string())
            );
        });
    }

    #[test]
    fn test_env_api_key_rereads_on_every_call() {
        let provider = EnvApiKey::new();

        temp_env::with_var(TMDB_API_KEY_ENV, Some("first"), || {
            assert_eq!(provider.tmdb_api_key(), Some("first".to_string()));
        });
        temp_env::with_var(TMDB_API_KEY_ENV, Some("rotated"), || {
            assert_eq!(provider.tmdb_api_key(), Some("rotated".to_string()));
        });
        temp_env::with_var_unset(TMDB_API_KEY_ENV, || {
            assert_eq!(provider.tmdb_api_key(), None);
        });
    }
}
