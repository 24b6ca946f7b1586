pub mod dispatch;
pub mod server;
pub mod transport;
pub mod types;

pub use dispatch::Dispatcher;
pub use server::{handle_message, McpServer};
pub use transport::LineTransport;
pub use types::{McpTool, McpToolCall, McpToolResult};
