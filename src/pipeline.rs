//! Single-pass batch pipeline: ingest → train → forecast → evaluate →
//! feedback-write
//!
//! One invocation runs the whole cycle start to finish, single-threaded,
//! with no suspension points. All reads of the error history happen before
//! the one feedback write at the end, which keeps the loop consistent
//! without any locking as long as invocations are serialized.

use crate::data::SourceLoader;
use crate::engine::{ForecastEngine, ForecastPoint};
use crate::error::{ForecastError, Result};
use crate::evaluate::{evaluate, Evaluation};
use crate::feedback::FeedbackWriter;
use crate::history::ErrorHistory;
use crate::models::seasonal_smoothing::SeasonalSmoothing;
use std::path::PathBuf;
use tracing::info;

/// What downstream presentation will show. Consumed by the pipeline only
/// to decide whether the evaluator's report is required in the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DisplayMode {
    /// Predicted values only
    Predicted,
    /// Predicted against actuals
    Both,
}

/// Recognized configuration for one pipeline invocation
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory of historical-reading source files
    pub data_dir: PathBuf,
    /// Optional ground-truth actuals file
    pub actuals_file: Option<PathBuf>,
    /// Forecast artifact, fully overwritten each run
    pub forecast_file: PathBuf,
    /// Error history artifact, append-and-dedup across runs
    pub history_file: PathBuf,
    /// Number of days to forecast
    pub num_days: usize,
    /// Forecast points per day (cadence is fixed at one point per hour;
    /// this scales only the horizon length)
    pub hours_per_day: usize,
    /// Downstream presentation mode
    pub display: DisplayMode,
}

impl PipelineConfig {
    /// Total horizon length in points
    pub fn horizon(&self) -> usize {
        self.num_days * self.hours_per_day
    }
}

/// What one invocation produced
#[derive(Debug)]
pub struct RunOutcome {
    /// The forecast horizon, in timestamp order
    pub forecast: Vec<ForecastPoint>,
    /// Accuracy evaluation, when ground truth was available
    pub evaluation: Evaluation,
    /// Error history size after the feedback write
    pub history_len: usize,
    /// Presentation mode, passed through for downstream consumers
    pub display: DisplayMode,
}

/// Run one complete forecast-and-feedback cycle
pub fn run(config: &PipelineConfig) -> Result<RunOutcome> {
    if config.horizon() == 0 {
        return Err(ForecastError::InvalidParameter(
            "Forecast horizon must be positive".to_string(),
        ));
    }

    let series = SourceLoader::load_dir(&config.data_dir)?;
    info!(
        readings = series.len(),
        last = %series.last_timestamp(),
        "canonical series assembled"
    );

    let mut history = ErrorHistory::load(&config.history_file)?;
    info!(records = history.len(), "error history loaded");

    let engine = ForecastEngine::new(SeasonalSmoothing::hourly()?);
    let trained = engine.train(&series, &history)?;
    let forecast = trained.forecast(config.horizon())?;
    write_forecast(&forecast, config)?;

    let actuals = match &config.actuals_file {
        Some(path) => SourceLoader::load_actuals(path)?,
        None => Vec::new(),
    };
    let evaluation = evaluate(&forecast, &actuals);

    let writer = FeedbackWriter::new(&config.history_file);
    if let Some(report) = evaluation.report() {
        writer.commit(&mut history, &report.records)?;
    }

    Ok(RunOutcome {
        forecast,
        evaluation,
        history_len: history.len(),
        display: config.display,
    })
}

/// Overwrite the forecast artifact with this run's horizon
fn write_forecast(forecast: &[ForecastPoint], config: &PipelineConfig) -> Result<()> {
    if let Some(parent) = config.forecast_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(&config.forecast_file)?;
    for point in forecast {
        writer.serialize(point)?;
    }
    writer.flush()?;
    info!(
        points = forecast.len(),
        path = %config.forecast_file.display(),
        "forecast artifact written"
    );
    Ok(())
}
