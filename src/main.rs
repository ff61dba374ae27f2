//! Test insights CLI - Main entry point.
//!
//! Enriches the current CTRF report with insights computed across previous
//! reports, writes it back, and logs a Markdown summary.

use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use test_insights_lib::config::Config;
use test_insights_lib::error::AppResult;
use test_insights_lib::models::Report;
use test_insights_lib::services::{
    FormatterRegistry, enrich_report, extract_historical_runs, render_markdown_summary, storage,
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - TSI_CURRENT_REPORT must point to a CTRF JSON report");
            error!("  - TSI_HISTORY_DIR, if set, must be a directory of previous reports");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config).await {
        error!("Failed to compute insights: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> AppResult<()> {
    info!("Loading current report from {}", config.current_report.display());
    let current = storage::load_report(&config.current_report).await?;

    if current.tests().is_none() {
        warn!("Current report has no valid results.tests; its tests get no insights");
    }

    let previous: Vec<Report> = match &config.history_dir {
        Some(dir) => match storage::load_history(
            dir,
            config.max_previous_reports,
            Some(&config.current_report),
        )
        .await
        {
            Ok(reports) => reports,
            Err(e) => {
                warn!("Continuing without history: {}", e);
                Vec::new()
            }
        },
        None => {
            info!("No history directory configured");
            Vec::new()
        }
    };

    // History is sorted newest first, so the first entry is the baseline.
    let enriched = enrich_report(&current, &previous, previous.first(), config.identity);
    storage::save_report(&config.output_path, &enriched).await?;

    let runs = extract_historical_runs(&previous);
    let helpers = FormatterRegistry::with_defaults();
    let summary = render_markdown_summary(&enriched, &runs, &helpers, &config.summary_options());
    info!("\n{}", summary);

    Ok(())
}
