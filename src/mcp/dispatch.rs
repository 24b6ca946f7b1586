use crate::api::Transport;
use crate::error::{PachcaError, Result};
use crate::mcp::types::McpToolResult;
use crate::tools::{ToolArgs, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

pub const NO_SESSION_MESSAGE: &str =
    "No active session. Log in to Pachca to create a session file, then restart the server.";

/// Routes `tools/call` requests to handlers and turns every outcome into a
/// well-formed tool result. Never fails itself.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    transport: Option<Arc<dyn Transport>>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn has_session(&self) -> bool {
        self.transport.is_some()
    }

    pub async fn call(&self, name: &str, arguments: Option<Value>) -> McpToolResult {
        let Some(transport) = self.transport.as_deref() else {
            return McpToolResult::error(NO_SESSION_MESSAGE);
        };

        let Some(tool) = self.registry.get(name) else {
            return McpToolResult::error(format!("Unknown tool: {}", name));
        };

        debug!(tool = name, "dispatching tool call");
        let outcome = match into_args(arguments) {
            Ok(args) => self.invoke(name, tool.handler, transport, args).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(text) => McpToolResult::text(text),
                Err(e) => {
                    error!(tool = name, error = %e, "failed to serialize tool result");
                    McpToolResult::error(format!("Failed to serialize result: {}", e))
                }
            },
            Err(e) => {
                error!(tool = name, kind = e.kind(), error = %e, "tool call failed");
                McpToolResult::error(e.to_string())
            }
        }
    }

    async fn invoke(
        &self,
        name: &str,
        handler: crate::tools::HandlerFn,
        transport: &dyn Transport,
        args: ToolArgs,
    ) -> Result<Value> {
        self.registry
            .validate_arguments(name, &Value::Object(args.clone()))?;
        handler(transport, &args).await
    }
}

/// Explicit `null` values count as not supplied and are dropped before the
/// schema check.
fn into_args(arguments: Option<Value>) -> Result<ToolArgs> {
    match arguments {
        None | Some(Value::Null) => Ok(ToolArgs::new()),
        Some(Value::Object(map)) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        Some(_) => Err(PachcaError::invalid_argument(
            "tool arguments must be a JSON object",
        )),
    }
}
