//! usersvc CLI - user records over HTTP
//!
//! Entry point for the user service:
//! - `serve`: run the HTTP API and the bundled pages
//! - `dump`: print stored users straight from the database
//! - `config`: manage `~/.usersvc/config.toml`

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::UsersvcConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "usersvc",
    author,
    version,
    about = "User records over HTTP, backed by SQLite"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Config file location
    #[arg(long = "config", global = true, env = "USERSVC_CONFIG")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Print every stored user
    Dump(commands::dump::DumpArgs),
    /// Manage usersvc configuration (init, show, path)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env feeds clap's env fallbacks, so load it before parsing
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let config_path = cli.config_file.unwrap_or_else(UsersvcConfig::default_path);

    let result = match cli.command {
        Commands::Serve(args) => {
            let config = UsersvcConfig::load_from(&config_path)?;
            commands::run_serve(args, config).await
        }
        Commands::Dump(args) => {
            let config = UsersvcConfig::load_from(&config_path)?;
            commands::run_dump(args, config).await
        }
        Commands::Config(args) => config::run_config(args, &config_path),
    };

    tracing_setup::shutdown_otel();
    result
}
