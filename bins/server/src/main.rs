//! Tally report server
//!
//! Main entry point for the report-generation service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_api::{AppState, create_router};
use tally_core::jobs::JobOrchestrator;
use tally_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    info!(
        input_dir = %config.reports.input_dir.display(),
        output_dir = %config.reports.output_dir.display(),
        batch_size = config.reports.batch_size,
        unit_timeout_secs = config.jobs.unit_timeout_secs,
        "Report pipelines configured"
    );

    let orchestrator = JobOrchestrator::from_config(config.reports, config.jobs.unit_timeout_secs);
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
