//! kitchen-finder - meal ideas from the ingredients you have
//!
//! Serves a search page and JSON API on top of TheMealDB.

use anyhow::Result;
use clap::Parser;
use kitchen_common::config::{save_resolved_config, ConfigOverrides, ConfigResolver};
use kitchen_finder::api::BuildInfo;
use kitchen_finder::services::MealDbClient;
use kitchen_finder::{build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "kitchen-finder", version, about = "Find meals by ingredients, mood and time")]
struct Args {
    /// Listen address (e.g. 127.0.0.1:5730)
    #[arg(long)]
    bind: Option<String>,

    /// Recipe database API base URL
    #[arg(long)]
    mealdb_url: Option<String>,

    /// Site base URL for recipe page links
    #[arg(long)]
    site_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Path to TOML config file
    #[arg(long, env = "KITCHEN_CONFIG")]
    config: Option<PathBuf>,

    /// Write the resolved configuration to this TOML file and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigResolver::new(ConfigOverrides {
        bind_address: args.bind,
        mealdb_base_url: args.mealdb_url,
        site_url: args.site_url,
        log_level: args.log_level,
        config_path: args.config,
    })
    .resolve()?;

    // RUST_LOG wins over the configured level
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Some(path) = &args.write_config {
        save_resolved_config(&config, path)?;
        return Ok(());
    }

    info!("Starting kitchen-finder {}", BuildInfo::current());
    info!(
        mealdb = %config.mealdb_base_url,
        site = %config.site_url,
        connect_timeout = ?config.connect_timeout,
        request_timeout = ?config.request_timeout,
        "Configuration loaded"
    );

    let client = MealDbClient::from_config(&config)?;
    let state = AppState::new(Arc::new(client), config.site_url.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("kitchen-finder listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
