pub mod api;
pub mod cli;
pub mod client_config;
pub mod config;
pub mod error;
pub mod mcp;
pub mod models;
pub mod session;
pub mod tools;
