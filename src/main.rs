use clap::Parser;
use colored::*;
use std::env;
use std::process;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mcp_pachca::api::{PachcaClient, Transport};
use mcp_pachca::cli::{Args, ClientKind, ConfigScope, LogFormat};
use mcp_pachca::client_config;
use mcp_pachca::config::Config;
use mcp_pachca::mcp::{Dispatcher, LineTransport, McpServer};
use mcp_pachca::session::{FilesystemSessionStore, SessionStore};
use mcp_pachca::tools::ToolRegistry;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    init_logging(&config);

    if let Some(client) = args.write_client_config {
        match write_client_config(client, args.scope) {
            Ok(path) => {
                eprintln!("{}", format!("Config written to {}", path).green());
                eprintln!("{}", "Restart your MCP client to apply changes.".dimmed());
                return;
            }
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red(), e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = run(config).await {
        error!(error = %format!("{:#}", e), "Fatal error");
        process::exit(1);
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the protocol, so logs always go to stderr.
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init(),
    }
}

fn write_client_config(client: ClientKind, scope: ConfigScope) -> anyhow::Result<String> {
    let cwd = env::current_dir()?;
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    let command = env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "mcp-pachca".to_string());

    let path = client_config::config_path(client, scope, &cwd, &home);
    client_config::write_server_entry(&path, client_config::server_entry(&command))?;
    Ok(path.display().to_string())
}

async fn run(config: Config) -> anyhow::Result<()> {
    let store = FilesystemSessionStore::new(config.session_path.clone());
    let transport: Option<Arc<dyn Transport>> = match store.current_credentials() {
        Some(credentials) => {
            let client = PachcaClient::new(&config.base_url, &credentials)?
                .with_timeout(config.request_timeout);
            Some(Arc::new(client))
        }
        None => {
            warn!(
                path = %store.path().display(),
                "No session found; every tool call will fail until you log in"
            );
            None
        }
    };

    let dispatcher = Dispatcher::new(Arc::new(ToolRegistry::new()), transport);
    let mut server = McpServer::new(
        LineTransport::new(tokio::io::stdin(), tokio::io::stdout()),
        dispatcher,
    );

    tokio::select! {
        result = server.run() => result?,
        signal = shutdown_signal() => info!(signal, "Received signal, shutting down"),
    }

    Ok(())
}

async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => tokio::select! {
                _ = tokio::signal::ctrl_c() => "SIGINT",
                _ = sigterm.recv() => "SIGTERM",
            },
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                "SIGINT"
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        "SIGINT"
    }
}
