//! # Energy Forecast
//!
//! Short-horizon energy consumption forecasting that improves itself using
//! its own past prediction errors.
//!
//! ## Features
//!
//! - Canonical hourly time series assembled from overlapping source files
//! - Persisted error history with a trailing rolling error signal
//! - Forecast engine wiring the rolling signal into the model as an
//!   auxiliary regressor
//! - Accuracy evaluation against ground truth (MAPE, 100 − MAPE accuracy)
//! - Feedback write merging new errors back into the history for the next
//!   cycle
//!
//! ## The feedback loop
//!
//! Each invocation is one discrete batch cycle: the rolling mean of past
//! forecast errors is attached to every training point as a regressor, the
//! last value of that signal is held constant across the forecast horizon,
//! and once ground truth arrives the new errors are merged back into the
//! same history, ready for the next cycle. The error history is the only
//! state that survives across invocations.
//!
//! ## Quick Start
//!
//! ```no_run
//! use energy_forecast::pipeline::{run, DisplayMode, PipelineConfig};
//!
//! let config = PipelineConfig {
//!     data_dir: "data".into(),
//!     actuals_file: Some("comparison/actual_energy.csv".into()),
//!     forecast_file: "comparison/next_day_forecast.csv".into(),
//!     history_file: "comparison/error_history.csv".into(),
//!     num_days: 1,
//!     hours_per_day: 24,
//!     display: DisplayMode::Both,
//! };
//!
//! let outcome = run(&config)?;
//! if let Some(report) = outcome.evaluation.report() {
//!     println!("{report}");
//! }
//! # Ok::<(), energy_forecast::ForecastError>(())
//! ```

pub mod data;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod feedback;
pub mod history;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use crate::data::{Reading, SourceLoader, TimeSeries};
pub use crate::engine::{ForecastEngine, ForecastPoint, TrainedEngine};
pub use crate::error::ForecastError;
pub use crate::evaluate::{AccuracyReport, Evaluation};
pub use crate::feedback::FeedbackWriter;
pub use crate::history::{ErrorHistory, ErrorRecord, ROLLING_WINDOW};
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
