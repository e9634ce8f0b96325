mod api;
mod config;
mod error;
mod models;
mod report;

use chrono::Utc;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::AppConfig;
pub use error::{AppError, AppResult, FetchError};

use api::{fetch_all, HttpFetcher};
use models::{Shift, Workplace};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Report failed");
            ExitCode::FAILURE
        }
    }
}

/// Stdout carries the report, so every log line goes to stderr.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,top_workplaces=info".into());

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run() -> AppResult<()> {
    let config = AppConfig::from_env()?;
    tracing::info!(base_url = %config.api_base_url, "Building completed-shift report");

    let fetcher = HttpFetcher::new(config.request_timeout)?;
    let workplaces_url = config.endpoint("workplaces")?;
    let shifts_url = config.endpoint("shifts")?;

    // Both collections paginate independently; the first failure aborts the run
    let (workplaces, shifts) = tokio::try_join!(
        fetch_all::<Workplace, _>(&fetcher, workplaces_url),
        fetch_all::<Shift, _>(&fetcher, shifts_url),
    )?;

    let top = report::top_workplaces(&workplaces, &shifts, Utc::now());

    let rendered = serde_json::to_string_pretty(&top)
        .map_err(|e| AppError::Output(format!("Failed to serialize report: {}", e)))?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered)
        .and_then(|_| stdout.flush())
        .map_err(|e| AppError::Output(e.to_string()))?;

    Ok(())
}
