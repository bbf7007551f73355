use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use movie_search::config::{
    find_config_file, get_config, load_config, write_default_config, Config, EnvApiKey,
    TMDB_API_KEY_ENV,
};
use movie_search::mcp::server::McpServer;
use movie_search::mcp::ToolResponse;
use movie_search::models::SearchQuery;
use movie_search::sources::{MovieSource, TmdbSource};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Movie Search MCP - search The Movie Database from any MCP client
#[derive(Parser, Debug)]
#[command(name = "movie-search-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server exposing a TMDB movie search tool", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server
    Serve {
        /// Use stdio transport (default)
        #[arg(long, conflicts_with = "http")]
        stdio: bool,

        /// Use streamable HTTP transport
        #[arg(long)]
        http: bool,

        /// Port for HTTP mode
        #[arg(long, short, default_value_t = 3000)]
        port: u16,

        /// Host to bind to for HTTP mode
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Run one movie search and print the result
    #[command(alias = "s")]
    Search {
        /// Movie title to search for
        query: String,

        /// Print the full tool result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a commented default configuration file
    InitConfig {
        /// Destination (default: <config dir>/movie-search/config.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Movie Search MCP - Environment Variables");
    println!();
    println!("API Keys:");
    println!("  {}                TMDB v3 API key (required for searches)", TMDB_API_KEY_ENV);
    println!();
    println!("Configuration Overrides:");
    println!("  MOVIE_SEARCH_TMDB__SEARCH_URL          TMDB search endpoint");
    println!("  MOVIE_SEARCH_TMDB__IMAGE_BASE_URL      Poster image base URL");
    println!("  MOVIE_SEARCH_HTTP__TIMEOUT_SECS        Request timeout in seconds (default: 30)");
    println!("  MOVIE_SEARCH_HTTP__CONNECT_TIMEOUT_SECS  Connect timeout in seconds (default: 10)");
    println!("  MOVIE_SEARCH_LOGGING__LEVEL            Default log level (default: info)");
    println!("  MOVIE_SEARCH_LOGGING__FORMAT           Log format: text or json");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                    Rust logging filter (overrides everything else)");
    println!();
    println!("Example:");
    println!("  export {}=\"your-key-here\"", TMDB_API_KEY_ENV);
    std::process::exit(0);
}

/// Resolve configuration from --config, a default location, or the environment
fn resolve_config(path: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        return Ok(load_config(path)?);
    }
    match find_config_file() {
        Some(path) => Ok(load_config(&path)?),
        None => Ok(get_config()?),
    }
}

/// Initialize tracing; logs go to stderr so the stdio transport stays clean
fn init_tracing(cli: &Cli, config: &Config) {
    let default_level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => config.logging.level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!(
            "movie_search={},movie_search_mcp={}",
            default_level, default_level
        )
    }));

    let json = match cli.log_format {
        Some(format) => format == LogFormat::Json,
        None => config.logging.is_json(),
    };

    let layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn build_source(config: &Config) -> Result<Arc<dyn MovieSource>> {
    let api_key = Arc::new(EnvApiKey::with_fallback(config.tmdb.api_key.clone()));
    let source = TmdbSource::new(config, api_key)?;
    Ok(Arc::new(source))
}

fn print_response(response: &ToolResponse) {
    println!("{}", response.text);
    if let Some(error) = &response.payload.error {
        println!("  {}", error);
    }
    for (i, movie) in response.payload.movies.iter().enumerate() {
        println!(
            "  {}. {} ({}) - rating {:.1}",
            i + 1,
            movie.title,
            movie.release_year,
            movie.rating
        );
        if let Some(poster) = &movie.poster_url {
            println!("     {}", poster);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
    }

    let config = resolve_config(cli.config.as_ref())?;
    init_tracing(&cli, &config);

    match cli.command {
        Some(Commands::Serve { http, port, host, .. }) => {
            let server = McpServer::new(build_source(&config)?)?;

            if http {
                let addr = format!("{}:{}", host, port);
                let (bound_addr, handle) = server.run_http(&addr).await?;
                tracing::info!("MCP server listening on {}", bound_addr);

                handle
                    .await
                    .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
            } else {
                server.run().await?;
            }
        }

        Some(Commands::Search { query, json }) => {
            let source = build_source(&config)?;
            let outcome = source.search(&SearchQuery::new(query)).await;
            let response = ToolResponse::from_outcome(&outcome);

            if json {
                println!("{}", serde_json::to_string_pretty(&response.into_value())?);
            } else {
                print_response(&response);
            }
        }

        Some(Commands::InitConfig { path, force }) => {
            let path = match path {
                Some(path) => path,
                None => dirs::config_dir()
                    .map(|dir| dir.join("movie-search").join("config.toml"))
                    .ok_or_else(|| {
                        anyhow::anyhow!("No config directory on this platform; pass a path")
                    })?,
            };

            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }

            write_default_config(&path)?;
            println!("Wrote {}", path.display());
        }

        None => {
            tracing::info!("No command given; serving over stdio");
            McpServer::new(build_source(&config)?)?.run().await?;
        }
    }

    Ok(())
}
