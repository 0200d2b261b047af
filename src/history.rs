//! Persisted forecast-error history and the rolling error signal

use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Trailing window length for the rolling error signal, in records
pub const ROLLING_WINDOW: usize = 24;

/// One evaluated forecast error, keyed by timestamp in the history store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Timestamp the forecast was evaluated at
    pub timestamp: NaiveDateTime,
    /// Forecasted value
    pub predicted: f64,
    /// Observed ground-truth value
    pub actual: f64,
    /// Signed error, predicted − actual
    pub error: f64,
    /// |error|
    pub absolute_error: f64,
    /// Absolute percentage error, |error| / actual × 100. A zero actual
    /// substitutes 1 as the unscaled denominator, making the value equal
    /// |error| itself (compatibility with prior error logs, not a true
    /// percentage at that point)
    pub absolute_percentage_error: f64,
}

impl ErrorRecord {
    /// Build a record from a matched (predicted, actual) pair
    pub fn new(timestamp: NaiveDateTime, predicted: f64, actual: f64) -> Self {
        let error = predicted - actual;
        let absolute_error = error.abs();
        let absolute_percentage_error = if actual == 0.0 {
            absolute_error
        } else {
            (absolute_error / actual) * 100.0
        };
        Self {
            timestamp,
            predicted,
            actual,
            error,
            absolute_error,
            absolute_percentage_error,
        }
    }
}

/// The set of all [`ErrorRecord`]s accumulated across runs, keyed uniquely
/// by timestamp.
///
/// This is the only state that survives across invocations. All reads
/// (the rolling signal) are pure functions of the store contents, never of
/// wall-clock time or invocation order, so re-running the same inputs
/// reproduces the same signal. Mutation happens exclusively through
/// [`merge`](ErrorHistory::merge), invoked by the feedback writer.
#[derive(Debug, Clone, Default)]
pub struct ErrorHistory {
    records: BTreeMap<NaiveDateTime, ErrorRecord>,
}

impl ErrorHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted history, or an empty store when the file does
    /// not exist yet. "No prior history" is a valid first-run state that
    /// degrades gracefully to a zero-valued rolling signal.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let mut reader = csv::Reader::from_path(path)?;
        let mut records = BTreeMap::new();
        for row in reader.deserialize::<ErrorRecord>() {
            let record = row?;
            records.insert(record.timestamp, record);
        }
        Ok(Self { records })
    }

    /// Mean signed error over the trailing window of up to
    /// [`ROLLING_WINDOW`] chronologically ordered records at or before
    /// `timestamp`. Returns 0 when no record qualifies.
    pub fn rolling_signal_at(&self, timestamp: NaiveDateTime) -> f64 {
        let errors: Vec<f64> = self
            .records
            .range(..=timestamp)
            .map(|(_, r)| r.error)
            .collect();
        let window = &errors[errors.len().saturating_sub(ROLLING_WINDOW)..];
        if window.is_empty() {
            return 0.0;
        }
        window.iter().sum::<f64>() / window.len() as f64
    }

    /// Union new records into the store, overwriting any existing record
    /// with the same timestamp (last-write-wins)
    pub fn merge<I: IntoIterator<Item = ErrorRecord>>(&mut self, records: I) {
        for record in records {
            self.records.insert(record.timestamp, record);
        }
    }

    /// Persist the store as an ordered-by-timestamp CSV artifact
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(path)?;
        for record in self.records.values() {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Records in chronological order
    pub fn records(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.records.values()
    }

    /// Look up the record at an exact timestamp
    pub fn get(&self, timestamp: &NaiveDateTime) -> Option<&ErrorRecord> {
        self.records.get(timestamp)
    }

    /// Number of records in the store
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
