//! # Dedupe Module
//!
//! Deletes duplicates listed in a previously generated report, after
//! re-verifying each one against the file it was matched with.
//!
//! Deletion is the only destructive operation in the tool, so every
//! record is checked again at deletion time: both files must still exist
//! and both must still hash to the value recorded during organize. Any
//! drift means skip, never delete.
//!
//! Confirmation is an injected capability so the pipeline is testable
//! without a terminal; it is asked at most once for the whole batch.

use crate::core::hasher::hash_file;
use crate::core::report::{read_report, DuplicateRecord};
use crate::error::{Result, SetupError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Counts surfaced at the end of a dedupe run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupeOutcome {
    /// Verified duplicates that were deleted
    pub deleted: usize,
    /// Records skipped: failed verification, failed deletion, or the
    /// whole batch was declined
    pub skipped: usize,
}

/// The dedupe pipeline over one report file
pub struct DedupePipeline {
    report_path: PathBuf,
}

impl DedupePipeline {
    /// Validate that the report exists and build the pipeline
    pub fn new(report_path: &Path) -> Result<Self> {
        if !report_path.is_file() {
            return Err(SetupError::ReportNotFound {
                path: report_path.to_path_buf(),
            }
            .into());
        }
        Ok(Self {
            report_path: report_path.to_path_buf(),
        })
    }

    /// Run verification and deletion.
    ///
    /// `confirm` is called once with the number of verified duplicates
    /// before anything is deleted; returning false aborts with zero
    /// deletions. It is not called at all when nothing verified.
    pub fn run<F>(&self, confirm: F) -> Result<DedupeOutcome>
    where
        F: FnOnce(usize) -> bool,
    {
        let records = read_report(&self.report_path)?;
        let mut outcome = DedupeOutcome::default();

        let mut verified = Vec::new();
        for record in &records {
            if verify_record(record) {
                verified.push(record);
            } else {
                outcome.skipped += 1;
            }
        }

        if verified.is_empty() {
            info!("no verified duplicates to delete");
            return Ok(outcome);
        }

        if !confirm(verified.len()) {
            info!(candidates = verified.len(), "deletion declined, nothing removed");
            outcome.skipped += verified.len();
            return Ok(outcome);
        }

        for record in verified {
            match fs::remove_file(&record.duplicate_path) {
                Ok(()) => outcome.deleted += 1,
                Err(e) => {
                    warn!(
                        path = %record.duplicate_path.display(),
                        error = %e,
                        "failed to delete duplicate"
                    );
                    outcome.skipped += 1;
                }
            }
        }

        info!(
            deleted = outcome.deleted,
            skipped = outcome.skipped,
            "dedupe run complete"
        );
        Ok(outcome)
    }
}

/// A record may only be deleted when both files still exist and both
/// still hash to the recorded value. Content drift since the organize
/// run is expected, not an error.
fn verify_record(record: &DuplicateRecord) -> bool {
    if !record.kept_path.exists() {
        warn!(path = %record.kept_path.display(), "kept file missing, skipping record");
        return false;
    }
    if !record.duplicate_path.exists() {
        warn!(path = %record.duplicate_path.display(), "duplicate already gone, skipping record");
        return false;
    }

    let duplicate_hash = match hash_file(&record.duplicate_path) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(path = %record.duplicate_path.display(), error = %e, "could not re-hash duplicate");
            return false;
        }
    };
    if duplicate_hash != record.hash {
        warn!(
            path = %record.duplicate_path.display(),
            "duplicate content changed since report, skipping"
        );
        return false;
    }

    let kept_hash = match hash_file(&record.kept_path) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(path = %record.kept_path.display(), error = %e, "could not re-hash kept file");
            return false;
        }
    };
    if kept_hash != record.hash {
        warn!(
            path = %record.kept_path.display(),
            "kept content changed since report, skipping"
        );
        return false;
    }

    true
}
