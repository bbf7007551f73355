//! Putting handler-built tool results on the wire.
//!
//! pmcp wraps whatever a tool handler returns: the value is stringified into
//! a single text block and, for tools that carry widget metadata, copied into
//! `structuredContent`. `search_movies` builds its own `CallToolResult`
//! object (status line, payload, `_meta`), so outgoing responses are
//! rewritten here to carry those channels directly. The stdio transport is
//! wrapped in [`ToolResultTransport`]; streamable HTTP gets
//! [`ToolResultMiddleware`].

use async_trait::async_trait;
use pmcp::server::http_middleware::{ServerHttpContext, ServerHttpMiddleware, ServerHttpResponse};
use pmcp::shared::{Transport, TransportMessage};
use pmcp::types::jsonrpc::ResponsePayload;
use pmcp::types::JSONRPCResponse;
use serde_json::{Map, Value};

/// Replace a pmcp-wrapped call result with the one the handler built
///
/// Returns `false` and leaves `result` alone unless its `structuredContent`
/// is itself a call result (a `content` array next to `structuredContent`).
pub fn lift_call_result(result: &mut Value) -> bool {
    let Some(outer) = result.as_object_mut() else {
        return false;
    };

    let wraps_call_result = outer
        .get("structuredContent")
        .and_then(Value::as_object)
        .is_some_and(|inner| {
            inner.get("content").is_some_and(Value::is_array)
                && inner.contains_key("structuredContent")
        });
    if !wraps_call_result {
        return false;
    }

    let Some(Value::Object(mut inner)) = outer.remove("structuredContent") else {
        return false;
    };

    if let Some(content) = inner.remove("content") {
        outer.insert("content".to_string(), content);
    }
    if let Some(structured) = inner.remove("structuredContent") {
        outer.insert("structuredContent".to_string(), structured);
    }
    if let Some(Value::Object(meta)) = inner.remove("_meta") {
        let target = outer
            .entry("_meta")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(target) = target.as_object_mut() {
            target.extend(meta);
        }
    }

    true
}

/// Lift the call result carried by a JSON-RPC response, if any
pub fn lift_response(response: &mut JSONRPCResponse) -> bool {
    match &mut response.payload {
        ResponsePayload::Result(result) => lift_call_result(result),
        ResponsePayload::Error(_) => false,
    }
}

/// Lift the call result inside a serialized JSON-RPC response body
fn lift_body(body: &mut Vec<u8>) -> Result<bool, serde_json::Error> {
    let mut message: Value = serde_json::from_slice(body)?;

    let lifted = message
        .get_mut("result")
        .is_some_and(|result| lift_call_result(result));
    if lifted {
        *body = serde_json::to_vec(&message)?;
    }

    Ok(lifted)
}

/// Transport decorator that lifts tool results before they are sent
#[derive(Debug)]
pub struct ToolResultTransport<T> {
    inner: T,
}

impl<T> ToolResultTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: Transport> Transport for ToolResultTransport<T> {
    async fn send(&mut self, mut message: TransportMessage) -> pmcp::Result<()> {
        if let TransportMessage::Response(response) = &mut message {
            lift_response(response);
        }
        self.inner.send(message).await
    }

    async fn receive(&mut self) -> pmcp::Result<TransportMessage> {
        self.inner.receive().await
    }

    async fn close(&mut self) -> pmcp::Result<()> {
        self.inner.close().await
    }

    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    fn transport_type(&self) -> &'static str {
        self.inner.transport_type()
    }
}

/// HTTP middleware that lifts tool results in JSON response bodies
#[derive(Debug, Default)]
pub struct ToolResultMiddleware;

#[async_trait]
impl ServerHttpMiddleware for ToolResultMiddleware {
    async fn on_response(
        &self,
        response: &mut ServerHttpResponse,
        _context: &ServerHttpContext,
    ) -> pmcp::Result<()> {
        if let Err(e) = lift_body(&mut response.body) {
            tracing::debug!("Response body is not JSON, left as is: {}", e);
        }
        Ok(())
    }
}
