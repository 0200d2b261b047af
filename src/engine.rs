//! Forecast engine adapter: regressor wiring and horizon construction
//!
//! The adapter owns the coupling between the error history and the opaque
//! forecasting model. It computes the rolling error signal for every
//! historical timestamp, feeds it to the model as an auxiliary regressor,
//! and builds the future horizon at the series' hourly cadence. The
//! statistical method itself lives behind [`ForecastModel`].

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::history::ErrorHistory;
use crate::models::{ForecastModel, TrainedForecastModel};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

/// One forecasted point on the future horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Forecasted instant, strictly after the last historical timestamp
    pub timestamp: NaiveDateTime,
    /// Point forecast
    pub predicted: f64,
    /// Lower prediction bound
    pub lower: f64,
    /// Upper prediction bound
    pub upper: f64,
}

/// Adapter wrapping a [`ForecastModel`] with the rolling-error regressor
#[derive(Debug, Clone)]
pub struct ForecastEngine<M: ForecastModel> {
    model: M,
}

impl<M: ForecastModel> ForecastEngine<M> {
    /// Create an engine around a forecasting model
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Train the wrapped model on the canonical series, attaching the
    /// rolling error signal at each historical timestamp as the regressor.
    ///
    /// Model failures propagate unmodified; the engine performs no retry,
    /// so systematic data problems stay visible to the caller.
    pub fn train(
        &self,
        series: &TimeSeries,
        history: &ErrorHistory,
    ) -> Result<TrainedEngine<M::Trained>> {
        let regressor: Vec<f64> = series
            .timestamps()
            .iter()
            .map(|ts| history.rolling_signal_at(*ts))
            .collect();
        let horizon_signal = regressor[regressor.len() - 1];
        debug!(
            model = self.model.name(),
            points = series.len(),
            horizon_signal,
            "training forecast engine"
        );

        let trained = self.model.train(series, &regressor)?;
        Ok(TrainedEngine {
            trained,
            last_timestamp: series.last_timestamp(),
            horizon_signal,
        })
    }
}

/// A trained engine, ready to produce the forecast horizon
#[derive(Debug)]
pub struct TrainedEngine<T: TrainedForecastModel> {
    trained: T,
    last_timestamp: NaiveDateTime,
    horizon_signal: f64,
}

impl<T: TrainedForecastModel> TrainedEngine<T> {
    /// The rolling signal at the end of the training series. Future points
    /// have no observed error yet, so this value is held constant across
    /// the entire horizon: the correction for tomorrow is informed by the
    /// most recent error trend, not by a forecast of the error trend.
    pub fn horizon_signal(&self) -> f64 {
        self.horizon_signal
    }

    /// Produce `horizon` consecutive forecast points strictly after the
    /// last historical timestamp, at a fixed one-hour cadence
    pub fn forecast(&self, horizon: usize) -> Result<Vec<ForecastPoint>> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be positive".to_string(),
            ));
        }

        let regressor = vec![self.horizon_signal; horizon];
        let result = self.trained.forecast(horizon, &regressor)?;

        let points = result
            .values()
            .iter()
            .zip(result.intervals().iter())
            .enumerate()
            .map(|(step, (value, (lower, upper)))| ForecastPoint {
                timestamp: self.last_timestamp + Duration::hours(step as i64 + 1),
                predicted: *value,
                lower: *lower,
                upper: *upper,
            })
            .collect();
        Ok(points)
    }
}
