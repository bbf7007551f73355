//! The movie-search MCP server on top of pmcp.
//!
//! Every registry tool is registered with widget metadata, so pmcp keeps the
//! handler's value as structured content, and both transports lift that value
//! into the final `CallToolResult` (see [`super::wire`]).

use crate::mcp::response::WIDGET_TEMPLATE_URI;
use crate::mcp::tools::ToolRegistry;
use crate::mcp::wire::{ToolResultMiddleware, ToolResultTransport};
use crate::sources::MovieSource;
use async_trait::async_trait;
use pmcp::{
    server::http_middleware::ServerHttpMiddlewareChain,
    server::streamable_http_server::{StreamableHttpServer, StreamableHttpServerConfig},
    Error, RequestHandlerExtra, Server, ServerCapabilities, StdioTransport, ToolHandler, ToolInfo,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Server name advertised during MCP initialization
pub const SERVER_NAME: &str = "movie-search";

/// `_meta` key tying a tool to the widget that renders its output
pub const OUTPUT_TEMPLATE_META_KEY: &str = "openai/outputTemplate";

/// MCP server exposing `search_movies`
#[derive(Debug, Clone)]
pub struct McpServer {
    server: Arc<Mutex<Server>>,
}

impl McpServer {
    pub fn new(source: Arc<dyn MovieSource>) -> Result<Self, pmcp::Error> {
        let server = Self::build_server(ToolRegistry::from_source(source))?;
        Ok(Self {
            server: Arc::new(Mutex::new(server)),
        })
    }

    fn build_server(tools: ToolRegistry) -> Result<Server, pmcp::Error> {
        let mut builder = Server::builder()
            .name(SERVER_NAME)
            .version(crate::VERSION)
            .capabilities(ServerCapabilities::default());

        for tool in tools.all() {
            let wrapper = ToolWrapper {
                name: tool.name.clone(),
                description: Some(tool.description.clone()),
                input_schema: tool.input_schema.clone(),
                handler: tool.handler.clone(),
            };
            builder = builder.tool(wrapper.name.clone(), wrapper);
        }

        builder.build()
    }

    /// Serve over stdio until the client disconnects
    pub async fn run(self) -> Result<(), pmcp::Error> {
        tracing::info!("Starting MCP server in stdio mode");

        let server = Arc::try_unwrap(self.server)
            .map_err(|_| Error::internal("MCP server is shared and cannot take over stdio"))?
            .into_inner();

        server
            .run(ToolResultTransport::new(StdioTransport::new()))
            .await
    }

    /// Serve streamable HTTP on `addr`; returns the bound address and the server task
    pub async fn run_http(&self, addr: &str) -> Result<(SocketAddr, JoinHandle<()>), pmcp::Error> {
        tracing::info!("Starting MCP server in HTTP mode on {}", addr);

        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::invalid_params(format!("Invalid address: {}", e)))?;

        let mut middleware = ServerHttpMiddlewareChain::new();
        middleware.add(Arc::new(ToolResultMiddleware));

        let config = StreamableHttpServerConfig {
            http_middleware: Some(Arc::new(middleware)),
            ..Default::default()
        };

        StreamableHttpServer::with_config(socket_addr, self.server.clone(), config)
            .start()
            .await
    }
}

/// Adapts a registry [`Tool`](crate::mcp::Tool) to pmcp's `ToolHandler`
#[derive(Clone)]
struct ToolWrapper {
    name: String,
    description: Option<String>,
    input_schema: Value,
    handler: Arc<dyn crate::mcp::tools::ToolHandler>,
}

#[async_trait]
impl ToolHandler for ToolWrapper {
    async fn handle(&self, args: Value, _extra: RequestHandlerExtra) -> Result<Value, Error> {
        self.handler
            .execute(args)
            .await
            .map_err(|e| Error::invalid_params(e))
    }

    fn metadata(&self) -> Option<ToolInfo> {
        Some(
            ToolInfo::new(
                self.name.clone(),
                self.description.clone(),
                self.input_schema.clone(),
            )
            .with_meta_entry(OUTPUT_TEMPLATE_META_KEY, json!(WIDGET_TEMPLATE_URI)),
        )
    }
}
