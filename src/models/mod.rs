//! Forecasting model capability traits
//!
//! The statistical model is an opaque fit/predict capability behind two
//! traits, so the feedback wiring in [`crate::engine`] can be exercised
//! against a deterministic stub model in tests. The regressor column is the
//! rolling error signal computed by [`crate::history::ErrorHistory`].

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use std::fmt::Debug;

/// Forecast result containing predicted values and prediction intervals
#[derive(Debug, Clone)]
pub struct ForecastResult {
    values: Vec<f64>,
    intervals: Vec<(f64, f64)>,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, intervals: Vec<(f64, f64)>) -> Result<Self> {
        if values.len() != intervals.len() {
            return Err(ForecastError::EngineError(format!(
                "Values length ({}) doesn't match intervals length ({})",
                values.len(),
                intervals.len()
            )));
        }
        Ok(Self { values, intervals })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the (lower, upper) prediction intervals
    pub fn intervals(&self) -> &[(f64, f64)] {
        &self.intervals
    }

    /// Number of forecasted periods
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the forecast is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Forecast model that can be trained on a time series with an auxiliary
/// regressor column
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model. `regressor` carries one value per series point.
    fn train(&self, series: &TimeSeries, regressor: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecasts for future periods. `regressor` carries one
    /// value per horizon point.
    fn forecast(&self, horizon: usize, regressor: &[f64]) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

pub mod seasonal_smoothing;
