//! # Ferrous CDN
//!
//! Fetch-through edge cache: serves stored copies of origin resources and
//! fetches each missing resource from the origin at most once at a time.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use di::CdnServices;
use ferrous_cdn_domain::CliOverrides;
use ferrous_cdn_jobs::{CacheSweepJob, JobRunner};
use server::{create_app, start_web_server, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "ferrous-cdn")]
#[command(version)]
#[command(about = "🦀 A fetch-through edge cache for static libraries")]
struct Cli {
    /// Path to the TOML config file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Web server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Origin base URL (must end with '/')
    #[arg(short = 'o', long)]
    origin: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        bind_address: cli.bind,
        port: cli.port,
        origin_url: cli.origin,
        log_level: cli.log_level,
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;

    bootstrap::init_logging(&config.logging);
    bootstrap::log_config_summary(&config, cli.config.as_deref());

    info!("🦀 Ferrous CDN Starting...");

    let services = CdnServices::new(&config)?;
    let shutdown = CancellationToken::new();

    JobRunner::new()
        .with_cache_sweep(
            CacheSweepJob::new(Arc::clone(&services.store) as _)
                .with_interval(config.cache.sweep_interval_secs)
                .with_cancellation(shutdown.clone()),
        )
        .start()
        .await;

    let app = create_app(AppState {
        serve_resource: Arc::clone(&services.serve_resource),
        get_cache_stats: Arc::clone(&services.get_cache_stats),
        route_prefix: Arc::from(config.server.route_prefix.as_str()),
    });

    let addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.port).parse()?;

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
        signal_token.cancel();
    });

    info!("✅ Server ready! Press Ctrl+C to stop");
    start_web_server(addr, app, shutdown.clone()).await?;

    shutdown.cancel();
    let stats = services.coordinator.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        coalesced = stats.coalesced,
        negative_stored = stats.negative_stored,
        "Final cache statistics"
    );
    services.store.clear();

    Ok(())
}
