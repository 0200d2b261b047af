//! Additive seasonal smoothing model with a regressor column

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use chrono::Timelike;
use statrs::distribution::{ContinuousCDF, Normal};

/// Default confidence level for the prediction intervals
const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Seasonal smoothing model: additive hour-of-day seasonal indices around
/// the series mean, a least-squares coefficient on the auxiliary regressor,
/// and a smoothed residual level for recent drift.
#[derive(Debug, Clone)]
pub struct SeasonalSmoothing {
    /// Name of the model
    name: String,
    /// Smoothing parameter for the residual level
    alpha: f64,
    /// Seasonal period in points (24 for hourly data with daily seasonality)
    period: usize,
    /// Normal quantile for the prediction intervals
    z_score: f64,
}

/// Trained seasonal smoothing model
#[derive(Debug, Clone)]
pub struct TrainedSeasonalSmoothing {
    name: String,
    /// Series mean the seasonal indices are centered on
    mean: f64,
    /// Additive seasonal index per slot
    seasonal: Vec<f64>,
    /// Regressor coefficient
    beta: f64,
    /// Smoothed residual level at the end of training
    level: f64,
    /// Residual standard deviation
    sigma: f64,
    /// Normal quantile for the prediction intervals
    z_score: f64,
    /// Slot of the last training point; the horizon continues from here
    last_slot: usize,
    period: usize,
}

impl SeasonalSmoothing {
    /// Create a new seasonal smoothing model
    pub fn new(alpha: f64, period: usize) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }
        if period == 0 {
            return Err(ForecastError::InvalidParameter(
                "Seasonal period must be positive".to_string(),
            ));
        }
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
        let z_score = normal.inverse_cdf(0.5 + DEFAULT_CONFIDENCE_LEVEL / 2.0);

        Ok(Self {
            name: format!("Seasonal Smoothing (alpha={alpha}, period={period})"),
            alpha,
            period,
            z_score,
        })
    }

    /// Hourly model with daily seasonality and default smoothing
    pub fn hourly() -> Result<Self> {
        Self::new(0.3, 24)
    }
}

impl ForecastModel for SeasonalSmoothing {
    type Trained = TrainedSeasonalSmoothing;

    fn train(&self, series: &TimeSeries, regressor: &[f64]) -> Result<Self::Trained> {
        let values = series.values();
        if regressor.len() != values.len() {
            return Err(ForecastError::EngineError(format!(
                "Regressor length ({}) doesn't match series length ({})",
                regressor.len(),
                values.len()
            )));
        }

        let slots: Vec<usize> = series
            .timestamps()
            .iter()
            .map(|ts| ts.hour() as usize % self.period)
            .collect();
        let mean = series.mean();

        // Additive seasonal index per slot, centered on the series mean
        let mut seasonal = vec![0.0; self.period];
        let mut counts = vec![0usize; self.period];
        for (slot, value) in slots.iter().zip(values.iter()) {
            seasonal[*slot] += value - mean;
            counts[*slot] += 1;
        }
        for (index, count) in seasonal.iter_mut().zip(counts.iter()) {
            if *count > 0 {
                *index /= *count as f64;
            }
        }

        // Deseasonalized residuals carry the regressor effect
        let residuals: Vec<f64> = slots
            .iter()
            .zip(values.iter())
            .map(|(slot, value)| value - mean - seasonal[*slot])
            .collect();

        // Least-squares coefficient on the regressor. A constant regressor
        // (all zero on a first run with no error history) fits beta = 0.
        let n = residuals.len() as f64;
        let x_mean = regressor.iter().sum::<f64>() / n;
        let r_mean = residuals.iter().sum::<f64>() / n;
        let var_x: f64 = regressor.iter().map(|x| (x - x_mean).powi(2)).sum();
        let beta = if var_x > f64::EPSILON {
            let cov: f64 = regressor
                .iter()
                .zip(residuals.iter())
                .map(|(x, r)| (x - x_mean) * (r - r_mean))
                .sum();
            cov / var_x
        } else {
            0.0
        };

        // Smooth what the seasonal and regressor terms leave behind
        let leftovers: Vec<f64> = residuals
            .iter()
            .zip(regressor.iter())
            .map(|(r, x)| r - beta * x)
            .collect();
        let mut level = leftovers[0];
        for &value in &leftovers[1..] {
            level = self.alpha * value + (1.0 - self.alpha) * level;
        }

        let sigma = (leftovers.iter().map(|e| e.powi(2)).sum::<f64>() / n).sqrt();

        if !(mean.is_finite() && beta.is_finite() && level.is_finite() && sigma.is_finite()) {
            return Err(ForecastError::EngineError(
                "seasonal smoothing failed to converge to finite parameters".to_string(),
            ));
        }

        Ok(TrainedSeasonalSmoothing {
            name: self.name.clone(),
            mean,
            seasonal,
            beta,
            level,
            sigma,
            z_score: self.z_score,
            last_slot: slots[slots.len() - 1],
            period: self.period,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedSeasonalSmoothing {
    fn forecast(&self, horizon: usize, regressor: &[f64]) -> Result<ForecastResult> {
        if regressor.len() != horizon {
            return Err(ForecastError::EngineError(format!(
                "Regressor length ({}) doesn't match horizon ({})",
                regressor.len(),
                horizon
            )));
        }

        let mut values = Vec::with_capacity(horizon);
        let mut intervals = Vec::with_capacity(horizon);
        for step in 0..horizon {
            let slot = (self.last_slot + 1 + step) % self.period;
            let value = self.mean + self.seasonal[slot] + self.beta * regressor[step] + self.level;
            if !value.is_finite() {
                return Err(ForecastError::EngineError(format!(
                    "non-finite forecast value at step {step}"
                )));
            }
            let margin = self.z_score * self.sigma;
            values.push(value);
            intervals.push((value - margin, value + margin));
        }

        ForecastResult::new(values, intervals)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
