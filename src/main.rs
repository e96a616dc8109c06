use record_match::config::Settings;
use record_match::core::{EngineError, RecordEngine};
use record_match::models::{DetectorStats, IngestSummary, Record};
use serde::Serialize;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Errors surfaced by the command-line driver
#[derive(Debug, Error)]
enum CliError {
    #[error("Usage: record-match <records.json>")]
    MissingInput,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ingest failed: {0}")]
    Engine(#[from] EngineError),
}

/// JSON summary printed to stdout
#[derive(Debug, Serialize)]
struct IngestReport {
    summary: IngestSummary,
    stats: DetectorStats,
    #[serde(rename = "treeHeight")]
    tree_height: usize,
    #[serde(rename = "lowestScore")]
    lowest_score: Option<f64>,
    #[serde(rename = "highestScore")]
    highest_score: Option<f64>,
    #[serde(rename = "topPriorities")]
    top_priorities: Vec<String>,
}

fn init_logging(settings: &Settings) {
    // Environment wins over the settings file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn run(settings: &Settings) -> Result<IngestReport, CliError> {
    let path = std::env::args().nth(1).ok_or(CliError::MissingInput)?;

    let raw = std::fs::read_to_string(&path)?;
    let records: Vec<Record> = serde_json::from_str(&raw)?;
    info!("Loaded {} records from {}", records.len(), path);

    let mut engine = RecordEngine::from_settings(settings)?;
    let summary = engine.ingest_all(records)?;

    let ratings = engine.ratings();
    let tree_height = ratings.height();
    let lowest_score = ratings.min().map(|(score, _)| score);
    let highest_score = ratings.max().map(|(score, _)| score);

    let queue = engine.queue_mut();
    let top_priorities = std::iter::from_fn(|| queue.extract_max())
        .take(settings.matching.top_priorities)
        .map(|record| record.id.clone())
        .collect();

    Ok(IngestReport {
        summary,
        stats: engine.detector().stats(),
        tree_height,
        lowest_score,
        highest_score,
        top_priorities,
    })
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings);
    info!("Starting record-match ingest (buckets: {})", settings.index.bucket_count);

    let report = match run(&settings) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize report: {}", e);
            ExitCode::FAILURE
        }
    }
}
