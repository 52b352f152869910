use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod dataset;
mod routes;

use dataset::ParkDataset;
use park_watch_engine::{ParkConditionEngine, StatusPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "park-watch-dashboard",
    about = "Single-page dashboard for campus shuttle park conditions",
    long_about = "Serves queue condition metrics, trend charts, and a time \
                  lookup widget over an observation dataset. Datasets are \
                  plain JSON; without --data the bundled sample session is \
                  used."
)]
struct Args {
    /// Dataset JSON file (queue observations and fleet table)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8630)]
    port: u16,

    /// Use the earlier threshold policy (BUSY above 70, MODERATE floor)
    #[arg(long)]
    legacy_policy: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if args.verbose { "debug" } else { "info" })
        }))
        .init();

    let dataset = match &args.data {
        Some(path) => {
            tracing::info!("loading dataset from {}", path.display());
            ParkDataset::load(path)?
        }
        None => {
            tracing::info!("no dataset supplied, using bundled sample session");
            ParkDataset::sample()?
        }
    };

    let policy = if args.legacy_policy {
        StatusPolicy::legacy()
    } else {
        StatusPolicy::standard()
    };

    // Malformed data aborts startup; nothing should render over a bad table.
    let engine = ParkConditionEngine::with_policy(dataset.queue, dataset.fleet, policy)
        .context("dataset failed validation")?;

    tracing::info!(
        observations = engine.slots().len(),
        fleet_classes = engine.fleet_summary().len(),
        "engine ready, latest status {}",
        engine.classify_latest().status
    );

    let app = routes::create_router(Arc::new(engine));

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("dashboard listening on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
