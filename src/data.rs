//! Historical reading ingestion and the canonical time series

use crate::error::{ForecastError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// A single observed hourly reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Hourly-resolution instant the value was observed at
    pub timestamp: NaiveDateTime,
    /// Observed consumption value
    pub value: f64,
}

/// Canonical ordered time series built from raw reading batches.
///
/// Guaranteed non-empty, sorted ascending by timestamp, with at most one
/// reading per timestamp. When source batches overlap, the last reading
/// encountered after the stable sort wins, so later batches override
/// earlier ones for identical timestamps.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    readings: Vec<Reading>,
}

impl TimeSeries {
    /// Normalize raw reading batches into one canonical series.
    ///
    /// Fails with [`ForecastError::NoSourceData`] when the combined input
    /// is empty; there is nothing to forecast from.
    pub fn from_batches(batches: Vec<Vec<Reading>>) -> Result<Self> {
        let mut readings: Vec<Reading> = batches.into_iter().flatten().collect();
        if readings.is_empty() {
            return Err(ForecastError::NoSourceData(
                "no readings in any input batch".to_string(),
            ));
        }

        // Stable sort preserves batch order among equal timestamps,
        // so keeping the last of each run keeps the last encountered.
        readings.sort_by_key(|r| r.timestamp);
        readings.dedup_by(|next, kept| {
            if next.timestamp == kept.timestamp {
                *kept = *next;
                true
            } else {
                false
            }
        });

        Ok(Self { readings })
    }

    /// Get the readings in canonical order
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Get the timestamps as a vector
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.readings.iter().map(|r| r.timestamp).collect()
    }

    /// Get the observed values as a vector
    pub fn values(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.value).collect()
    }

    /// The last (most recent) timestamp in the series
    pub fn last_timestamp(&self) -> NaiveDateTime {
        self.readings[self.readings.len() - 1].timestamp
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Check if the series is empty (never true for a constructed series)
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Mean of the observed values
    pub fn mean(&self) -> f64 {
        let sum: f64 = self.readings.iter().map(|r| r.value).sum();
        sum / self.readings.len() as f64
    }
}

/// One row of a source file: `date,hour,energy`
#[derive(Debug, Deserialize)]
struct SourceRow {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Hour")]
    hour: String,
    #[serde(alias = "Energy", alias = "Actual", alias = "actual")]
    energy: f64,
}

impl SourceRow {
    fn into_reading(self) -> Result<Reading> {
        let hour = parse_hour(&self.hour)?;
        let timestamp = self.date.and_hms_opt(hour, 0, 0).ok_or_else(|| {
            ForecastError::DataError(format!("invalid hour {} on {}", self.hour, self.date))
        })?;
        Ok(Reading {
            timestamp,
            value: self.energy,
        })
    }
}

/// Accepts `13` as well as clock-style `13:00`
fn parse_hour(raw: &str) -> Result<u32> {
    let digits = raw.trim().split(':').next().unwrap_or("");
    let hour: u32 = digits
        .parse()
        .map_err(|_| ForecastError::DataError(format!("unparseable hour value: {raw:?}")))?;
    if hour >= 24 {
        return Err(ForecastError::DataError(format!(
            "hour out of range: {hour}"
        )));
    }
    Ok(hour)
}

/// Loader for historical-reading source files and ground-truth actuals
#[derive(Debug)]
pub struct SourceLoader;

impl SourceLoader {
    /// Load every `*.csv` source in a directory into one canonical series.
    ///
    /// A source that fails to read or parse is logged and skipped; the load
    /// fails with [`ForecastError::NoSourceData`] only when no source yields
    /// any readings.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<TimeSeries> {
        let dir = dir.as_ref();
        let mut paths: Vec<_> = std::fs::read_dir(dir)
            .map_err(|e| {
                ForecastError::NoSourceData(format!("cannot read {}: {}", dir.display(), e))
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        let mut batches = Vec::with_capacity(paths.len());
        for path in &paths {
            match Self::read_file(path) {
                Ok(batch) => {
                    info!(source = %path.display(), readings = batch.len(), "loaded source");
                    batches.push(batch);
                }
                Err(e) => warn!(source = %path.display(), "skipping unreadable source: {e}"),
            }
        }

        if batches.iter().all(|b| b.is_empty()) {
            return Err(ForecastError::NoSourceData(format!(
                "no readable source files in {}",
                dir.display()
            )));
        }

        TimeSeries::from_batches(batches)
    }

    /// Load the optional ground-truth actuals file.
    ///
    /// A missing file is a valid degraded state and returns an empty batch;
    /// the run still produces a forecast, just no accuracy evaluation.
    pub fn load_actuals<P: AsRef<Path>>(path: P) -> Result<Vec<Reading>> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(actuals = %path.display(), "actuals file not found, skipping evaluation");
            return Ok(Vec::new());
        }
        Self::read_file(path)
    }

    /// Read one `date,hour,energy` file into a batch of readings
    fn read_file(path: &Path) -> Result<Vec<Reading>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut batch = Vec::new();
        for row in reader.deserialize::<SourceRow>() {
            batch.push(row?.into_reading()?);
        }
        Ok(batch)
    }
}
