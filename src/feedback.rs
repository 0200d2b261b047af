//! Feedback writer: the single mutation point for the error history

use crate::error::Result;
use crate::history::{ErrorHistory, ErrorRecord};
use std::path::{Path, PathBuf};
use tracing::info;

/// Merges newly evaluated [`ErrorRecord`]s into the persisted error
/// history, deduplicating by timestamp (last-write-wins).
///
/// All mutation of the cross-run store is confined here and performed once
/// per run, after every read for that run has completed. The store assumes
/// at most one invocation runs at a time: there is no file locking, and a
/// concurrent writer racing this load-merge-save cycle can lose records.
#[derive(Debug)]
pub struct FeedbackWriter {
    path: PathBuf,
}

impl FeedbackWriter {
    /// Create a writer targeting the history artifact at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Merge `records` into `history` and persist the result.
    ///
    /// A run that produced no records performs no write at all, leaving
    /// prior history untouched. Returns whether a write happened.
    pub fn commit(&self, history: &mut ErrorHistory, records: &[ErrorRecord]) -> Result<bool> {
        if records.is_empty() {
            info!("no new error records, leaving history untouched");
            return Ok(false);
        }

        history.merge(records.iter().copied());
        history.save(&self.path)?;
        info!(
            merged = records.len(),
            total = history.len(),
            path = %self.path.display(),
            "error history updated"
        );
        Ok(true)
    }
}
