// Mumbai Housing Dashboard - Web Server
// JSON API over the prediction model and regional price map

use anyhow::{Context, Result};
use clap::Parser;
use mumbai_housing::{api, AppConfig, AppContext};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "housing-server")]
#[command(version)]
#[command(about = "JSON API for the Mumbai housing price predictor")]
struct Args {
    /// Directory holding the model artifact and both CSV tables
    #[arg(long, env = "MUMBAI_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[arg(long, env = "MUMBAI_MODEL")]
    model: Option<PathBuf>,

    #[arg(long, env = "MUMBAI_COORDS")]
    coords: Option<PathBuf>,

    #[arg(long, env = "MUMBAI_LISTINGS")]
    listings: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "MUMBAI_BIND", default_value = mumbai_housing::config::DEFAULT_BIND_ADDR)]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::from_data_dir(&args.data_dir)
        .with_overrides(args.model, args.coords, args.listings)
        .with_bind_addr(args.bind);

    tracing::info!(version = mumbai_housing::VERSION, "starting Mumbai housing server");

    // Everything is loaded once; handlers only read it
    let ctx = AppContext::load(&config).with_context(|| {
        format!("Failed to load dashboard inputs from {}", args.data_dir.display())
    })?;

    let app = api::router(Arc::new(ctx));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "server running, API under /api");

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
