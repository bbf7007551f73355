//! MCP (Model Context Protocol) implementation.

mod response;
pub mod server;
mod tools;
mod wire;

pub use response::{status_text, SearchPayload, ToolResponse, WIDGET_TEMPLATE_URI};
pub use server::McpServer;
pub use tools::{SearchMoviesHandler, Tool, ToolHandler, ToolRegistry, SEARCH_MOVIES_TOOL};
pub use wire::{lift_call_result, ToolResultMiddleware, ToolResultTransport};
