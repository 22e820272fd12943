//! # Report Module
//!
//! The duplicate report is the only artifact that bridges the organize and
//! dedupe pipelines: a CSV file with one row per detected duplicate.
//!
//! Columns: `duplicate_path,kept_path,hash,detected_at`. The organize run
//! creates the file fresh and appends rows as duplicates are found; the
//! dedupe run reads it back. Paths with delimiters or newlines are quoted
//! per standard CSV rules by the csv crate.

use crate::error::ReportError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// One detected duplicate: the file that was not transferred, the file it
/// matched, and the content hash both shared at detection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateRecord {
    pub duplicate_path: PathBuf,
    pub kept_path: PathBuf,
    pub hash: String,
    pub detected_at: DateTime<Utc>,
}

/// Append-only writer for the duplicate report.
///
/// Creating the writer truncates any previous report; each record is
/// flushed as it is written so an interrupted run leaves usable rows.
pub struct ReportWriter {
    writer: csv::Writer<File>,
    records_written: usize,
}

impl ReportWriter {
    /// Create (or overwrite) the report at `path`
    ///
    /// The header row is written immediately so even a duplicate-free run
    /// leaves a well-formed report behind.
    pub fn create(path: &Path) -> Result<Self, ReportError> {
        let file = File::create(path).map_err(|source| ReportError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(["duplicate_path", "kept_path", "hash", "detected_at"])
            .and_then(|_| writer.flush().map_err(Into::into))
            .map_err(|source| ReportError::Write { source })?;
        Ok(Self {
            writer,
            records_written: 0,
        })
    }

    /// Append one duplicate record and flush it to disk
    pub fn write(&mut self, record: &DuplicateRecord) -> Result<(), ReportError> {
        self.writer
            .serialize(record)
            .map_err(|source| ReportError::Write { source })?;
        self.writer
            .flush()
            .map_err(|source| ReportError::Write { source: source.into() })?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }
}

/// Read all duplicate records from a report file
pub fn read_report(path: &Path) -> Result<Vec<DuplicateRecord>, ReportError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: DuplicateRecord = result.map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
