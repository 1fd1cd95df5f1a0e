//! Store health service.
//!
//! # Architecture Overview
//!
//! ```text
//!   GET /health ──▶ http::server ──▶ HealthRegistry ──▶ StoreHealthProbe ──▶ Lease ──▶ Redis
//!                                          ▲
//!   interval ────▶ HealthMonitor ──────────┘
//! ```
//!
//! `--once` runs a single round, prints the composite report and exits with a
//! non-zero status when anything is DOWN.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use store_health::config::{load_config, HealthServiceConfig};
use store_health::health::{HealthMonitor, HealthRegistry, StoreHealthProbe};
use store_health::http::HealthServer;
use store_health::lifecycle::{signals, Shutdown};
use store_health::observability::{logging, metrics};
use store_health::store::RedisConnectionProvider;

#[derive(Parser)]
#[command(name = "store-health")]
#[command(about = "Health endpoint for a Redis-compatible store", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run one check, print the report and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HealthServiceConfig::default(),
    };

    logging::init(&config.observability);
    tracing::info!("store-health v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        mode = ?config.store.mode,
        bind_address = %config.listener.bind_address,
        interval_secs = config.health_check.interval_secs,
        "Configuration loaded"
    );

    let provider = RedisConnectionProvider::from_config(&config.store)?;
    let mut registry = HealthRegistry::new();
    registry.register(Arc::new(StoreHealthProbe::new(provider)))?;
    let registry = Arc::new(registry);

    if cli.once {
        let report = registry.check_all().await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(if report.status().is_up() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    let monitor = HealthMonitor::new(registry.clone(), config.health_check.clone());
    let monitor_task = tokio::spawn(monitor.run(shutdown.subscribe()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HealthServer::new(registry, &config.listener);
    server.run(listener, shutdown.subscribe()).await?;

    if let Err(e) = monitor_task.await {
        tracing::warn!(error = %e, "Health monitor task ended abnormally");
    }

    tracing::info!("Shutdown complete");
    Ok(ExitCode::SUCCESS)
}
