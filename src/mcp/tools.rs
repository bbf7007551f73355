//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::response::ToolResponse;
use crate::models::SearchQuery;
use crate::sources::MovieSource;

/// Name of the movie search tool
pub const SEARCH_MOVIES_TOOL: &str = "search_movies";

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search_movies")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    ///
    /// `Err` is reserved for malformed arguments; domain failures are part of
    /// the returned value.
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Handler for `search_movies`
#[derive(Debug)]
pub struct SearchMoviesHandler {
    pub source: Arc<dyn MovieSource>,
}

#[async_trait::async_trait]
impl ToolHandler for SearchMoviesHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'query' parameter")?;

        let outcome = self.source.search(&SearchQuery::new(query)).await;

        Ok(ToolResponse::from_outcome(&outcome).into_value())
    }
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry exposing `search_movies` backed by the given source
    pub fn from_source(source: Arc<dyn MovieSource>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register(Tool {
            name: SEARCH_MOVIES_TOOL.to_string(),
            description: format!(
                "Search {} for movies by title and show the top matches with year, rating and poster",
                source.name()
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Movie title to search for"
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(SearchMoviesHandler { source }),
        });

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}
