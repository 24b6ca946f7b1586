pub mod args;
pub mod catalogue;
pub mod handlers;
mod registry;

pub use args::ToolArgs;
pub use registry::{HandlerFn, HandlerFuture, RegisteredTool, ToolRegistry};
