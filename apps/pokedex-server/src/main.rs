#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod config;
mod logging;
mod signals;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use pokedex::{Pokedex, RestSettings};

use crate::config::{AppConfig, CliOverrides};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Pokedex Server - multilingual pokemon catalogue over REST
#[derive(Parser)]
#[command(name = "pokedex-server")]
#[command(about = "Pokedex Server - multilingual pokemon catalogue over REST")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML (if provided) -> 3) env (POKEDEX__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    });

    logging::init_logging(&config.logging);
    tracing::info!("Pokedex Server starting");

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_pretty_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    parse_bind_address(&config.server.bind_addr)?;
    println!("Configuration is valid");
    println!("{}", config.to_pretty_json()?);
    Ok(())
}

fn parse_bind_address(bind_addr: &str) -> Result<SocketAddr> {
    bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))
}

async fn build_module(config: &AppConfig) -> Result<Pokedex> {
    match &config.database {
        Some(db) => Pokedex::connect(&db.dsn, &config.pokedex).await,
        None => Pokedex::in_memory(&config.pokedex).await,
    }
}

/// Bind, serve until a termination signal, then release storage.
async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing pokedex module...");
    let addr = parse_bind_address(&config.server.bind_addr)?;
    let module = build_module(&config).await?;

    let settings = RestSettings {
        cors: config.cors,
        assets_dir: config.assets.dir,
    };
    let router = module.router(&settings);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let cancel = signals::shutdown_token();
    tracing::info!("HTTP server bound on {}", addr);

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e));

    module.shutdown().await?;
    tracing::info!("Pokedex Server stopped");
    served
}
