//! Forecast accuracy evaluation against observed actuals

use crate::data::Reading;
use crate::engine::ForecastPoint;
use crate::history::ErrorRecord;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::info;

/// Aggregate accuracy over the evaluated subset
#[derive(Debug, Clone)]
pub struct AccuracyReport {
    /// One record per timestamp present in both forecast and actuals
    pub records: Vec<ErrorRecord>,
    /// Mean Absolute Percentage Error over the evaluated subset
    pub mape: f64,
    /// 100 − MAPE
    pub accuracy: f64,
}

impl std::fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy:")?;
        writeln!(f, "  Evaluated points: {}", self.records.len())?;
        writeln!(f, "  MAPE:     {:.2}%", self.mape)?;
        writeln!(f, "  Accuracy: {:.2}%", self.accuracy)?;
        Ok(())
    }
}

/// Outcome of an evaluation attempt
#[derive(Debug, Clone)]
pub enum Evaluation {
    /// Ground truth overlapped the forecast; accuracy was computed
    Report(AccuracyReport),
    /// No ground truth overlapped the forecast. Not an error: forecasting
    /// must still succeed when verification data is unavailable.
    InsufficientGroundTruth,
}

impl Evaluation {
    /// The report, when ground truth was available
    pub fn report(&self) -> Option<&AccuracyReport> {
        match self {
            Evaluation::Report(report) => Some(report),
            Evaluation::InsufficientGroundTruth => None,
        }
    }
}

/// Align a forecast with observed actuals and compute per-point and
/// aggregate error metrics.
///
/// Only timestamps present in both inputs are evaluated. A zero actual
/// substitutes 1 in the percentage-error denominator (see
/// [`ErrorRecord::new`]).
pub fn evaluate(forecast: &[ForecastPoint], actuals: &[Reading]) -> Evaluation {
    let observed: BTreeMap<NaiveDateTime, f64> = actuals
        .iter()
        .map(|reading| (reading.timestamp, reading.value))
        .collect();

    let records: Vec<ErrorRecord> = forecast
        .iter()
        .filter_map(|point| {
            observed
                .get(&point.timestamp)
                .map(|actual| ErrorRecord::new(point.timestamp, point.predicted, *actual))
        })
        .collect();

    if records.is_empty() {
        info!("no ground truth overlaps the forecast, skipping accuracy");
        return Evaluation::InsufficientGroundTruth;
    }

    let mape = records
        .iter()
        .map(|r| r.absolute_percentage_error)
        .sum::<f64>()
        / records.len() as f64;
    let accuracy = 100.0 - mape;
    info!(
        evaluated = records.len(),
        mape, accuracy, "forecast evaluated against actuals"
    );

    Evaluation::Report(AccuracyReport {
        records,
        mape,
        accuracy,
    })
}
