//! HTTP server command
//!
//! Opens the database, ensures the schema and runs the user service.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use usersvc_server::db;
use usersvc_server::http::{run_server, ServerConfig};

use crate::config::UsersvcConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:8000)
    #[arg(long, short = 'b', env = "USERSVC_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,
}

impl ServeArgs {
    /// Merge flags over the config file.
    fn resolve(self, config: UsersvcConfig) -> (ServerConfig, String, u32) {
        let server = ServerConfig {
            bind_addr: self.bind.unwrap_or(config.server.bind),
            cors_permissive: self.cors_permissive || config.server.cors_permissive,
        };
        let url = self.database_url.unwrap_or(config.database.url);
        let max = self.max_connections.unwrap_or(config.database.max_connections);
        (server, url, max)
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: UsersvcConfig) -> Result<()> {
    let (server, database_url, max_connections) = args.resolve(config);

    tracing::info!(database = %database_url, "Starting user service on {}", server.bind_addr);

    let pool = db::open(&database_url, max_connections)
        .await
        .with_context(|| format!("Failed to open database at {database_url}"))?;

    // Blocks until shutdown
    run_server(pool, server).await.context("Server error")?;

    Ok(())
}
