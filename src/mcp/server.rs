use crate::error::Result;
use crate::mcp::dispatch::Dispatcher;
use crate::mcp::transport::LineTransport;
use crate::mcp::types::{
    error_codes, InitializeResult, JsonRpcRequest, JsonRpcResponse, McpToolCall, ToolListResponse,
};
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

/// MCP server loop: reads JSON-RPC messages line by line and answers requests.
pub struct McpServer<R, W> {
    transport: LineTransport<R, W>,
    dispatcher: Dispatcher,
}

impl<R, W> McpServer<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(transport: LineTransport<R, W>, dispatcher: Dispatcher) -> Self {
        Self {
            transport,
            dispatcher,
        }
    }

    /// Runs until the input is closed.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            tools = self.dispatcher.registry().len(),
            session = self.dispatcher.has_session(),
            "MCP Pachca server started"
        );

        while let Some(line) = self.transport.read_line().await? {
            if line.is_empty() {
                continue;
            }
            if let Some(response) = handle_message(&self.dispatcher, &line).await {
                let encoded = serde_json::to_string(&response)?;
                self.transport.write_line(&encoded).await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    pub fn into_transport(self) -> LineTransport<R, W> {
        self.transport
    }
}

/// Handles one raw message. Returns `None` for notifications.
pub async fn handle_message(dispatcher: &Dispatcher, line: &str) -> Option<JsonRpcResponse> {
    let raw: Value = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "failed to parse JSON-RPC message");
            return Some(JsonRpcResponse::error(
                Value::Null,
                error_codes::PARSE_ERROR,
                format!("Parse error: {}", e),
            ));
        }
    };

    let request: JsonRpcRequest = match serde_json::from_value(raw.clone()) {
        Ok(request) => request,
        Err(e) => {
            let id = raw.get("id").cloned().unwrap_or(Value::Null);
            return Some(JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Invalid request: {}", e),
            ));
        }
    };

    let Some(id) = request.id.clone() else {
        debug!(method = %request.method, "received notification");
        return None;
    };

    debug!(method = %request.method, id = %id, "received request");
    Some(handle_request(dispatcher, id, &request).await)
}

async fn handle_request(
    dispatcher: &Dispatcher,
    id: Value,
    request: &JsonRpcRequest,
) -> JsonRpcResponse {
    let result = match request.method.as_str() {
        "initialize" => {
            let protocol = request
                .params
                .as_ref()
                .and_then(|p| p.get("protocolVersion"))
                .and_then(Value::as_str);
            serde_json::to_value(InitializeResult::new(protocol))
        }
        "ping" => Ok(json!({})),
        "tools/list" => serde_json::to_value(ToolListResponse {
            tools: dispatcher.registry().definitions(),
        }),
        "tools/call" => {
            let call = request
                .params
                .clone()
                .ok_or_else(|| "tools/call requires params".to_string())
                .and_then(|p| {
                    serde_json::from_value::<McpToolCall>(p)
                        .map_err(|e| format!("invalid tools/call params: {}", e))
                });
            match call {
                Ok(call) => serde_json::to_value(dispatcher.call(&call.name, call.arguments).await),
                Err(msg) => {
                    return JsonRpcResponse::error(id, error_codes::INVALID_PARAMS, msg);
                }
            }
        }
        other => {
            return JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            );
        }
    };

    match result {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}
