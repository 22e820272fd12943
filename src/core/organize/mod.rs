//! # Organize Module
//!
//! Orchestrates the organize run: discover photos, extract capture dates,
//! hash contents, detect duplicates, and move or copy everything else into
//! the `YYYY/MM/DD` hierarchy.
//!
//! ## Per-file state machine
//! discovered -> metadata-extracted -> hashed -> one of:
//! - moved/copied into its date directory
//! - recorded as a duplicate (no transfer)
//! - errored (logged, counted, batch continues)
//!
//! A single bad file never aborts the batch; only setup problems are fatal.

use crate::core::hasher::hash_file;
use crate::core::metadata::{extract_capture_date, DateSource};
use crate::core::planner::{date_directory, DestinationPlanner};
use crate::core::report::{DuplicateRecord, ReportWriter};
use crate::core::scanner::{find_photo_files, PhotoFile};
use crate::error::{Result, SetupError, TransferError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Whether organized files are moved or copied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    /// Move files into the destination (default)
    #[default]
    Move,
    /// Copy files, leaving sources in place
    Copy,
}

/// Configuration for an organize run
#[derive(Debug, Clone)]
pub struct OrganizeConfig {
    pub sources: Vec<PathBuf>,
    pub destination: PathBuf,
    pub report_path: PathBuf,
    pub mode: TransferMode,
}

impl OrganizeConfig {
    pub fn new(sources: Vec<PathBuf>, destination: PathBuf, mode: TransferMode) -> Self {
        let report_path = destination.join("duplicates.csv");
        Self {
            sources,
            destination,
            report_path,
            mode,
        }
    }
}

/// Aggregate counts surfaced at the end of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizeOutcome {
    /// Files moved or copied into the destination
    pub organized: usize,
    /// Files recorded as duplicates and left in place
    pub duplicates: usize,
    /// Files that hit EXIF fallback rather than a real capture date
    pub fallback_dates: usize,
    /// Per-file failures (logged, non-fatal)
    pub errors: usize,
}

/// The organize pipeline. Single-threaded by design: sequential
/// processing keeps conflict resolution and duplicate detection
/// deterministic, and the workload is I/O-bound anyway.
pub struct OrganizePipeline {
    config: OrganizeConfig,
    planner: DestinationPlanner,
    /// content hash -> destination path that owns that content
    known_hashes: HashMap<String, PathBuf>,
    /// directories whose pre-existing files have been hashed already
    seeded_dirs: HashSet<PathBuf>,
}

impl OrganizePipeline {
    /// Validate setup and build a pipeline.
    ///
    /// Fails fast when a source is missing, source and destination
    /// overlap, or the destination cannot be created.
    pub fn new(config: OrganizeConfig) -> Result<Self> {
        for source in &config.sources {
            if !source.exists() {
                return Err(SetupError::SourceNotFound {
                    path: source.clone(),
                }
                .into());
            }
            if !source.is_dir() {
                return Err(SetupError::SourceNotADirectory {
                    path: source.clone(),
                }
                .into());
            }
        }

        fs::create_dir_all(&config.destination).map_err(|source| {
            SetupError::CreateDestination {
                path: config.destination.clone(),
                source,
            }
        })?;

        let destination = canonical(&config.destination);
        for source in &config.sources {
            let source_dir = canonical(source);
            if source_dir == destination
                || source_dir.starts_with(&destination)
                || destination.starts_with(&source_dir)
            {
                return Err(SetupError::OverlappingPaths {
                    source_dir: source.clone(),
                    destination: config.destination.clone(),
                }
                .into());
            }
        }

        Ok(Self {
            config,
            planner: DestinationPlanner::new(),
            known_hashes: HashMap::new(),
            seeded_dirs: HashSet::new(),
        })
    }

    /// Run the pipeline, invoking `on_progress(done, total, path)` per file
    pub fn run<F>(mut self, mut on_progress: F) -> Result<OrganizeOutcome>
    where
        F: FnMut(usize, usize, &Path),
    {
        let photos = find_photo_files(&self.config.sources);
        info!(count = photos.len(), "discovered photo files");

        let mut report = ReportWriter::create(&self.config.report_path)?;
        let mut outcome = OrganizeOutcome::default();
        let total = photos.len();

        for (i, photo) in photos.iter().enumerate() {
            on_progress(i + 1, total, &photo.path);

            match self.process_photo(photo, &mut report, &mut outcome) {
                Ok(()) => {}
                Err(e) => {
                    warn!(path = %photo.path.display(), error = %e, "failed to organize file");
                    outcome.errors += 1;
                }
            }
        }

        info!(
            organized = outcome.organized,
            duplicates = outcome.duplicates,
            errors = outcome.errors,
            "organize run complete"
        );
        Ok(outcome)
    }

    fn process_photo(
        &mut self,
        photo: &PhotoFile,
        report: &mut ReportWriter,
        outcome: &mut OrganizeOutcome,
    ) -> Result<()> {
        let capture = extract_capture_date(&photo.path);
        if capture.source == DateSource::FileModified {
            outcome.fallback_dates += 1;
        }

        let hash = hash_file(&photo.path)?;
        let target_dir = date_directory(&self.config.destination, capture.timestamp);

        self.seed_directory(&target_dir);

        // Content already placed (this run or pre-existing): record the
        // duplicate and leave the source file alone
        if let Some(kept) = self.known_hashes.get(&hash) {
            if *kept != photo.path {
                report.write(&DuplicateRecord {
                    duplicate_path: photo.path.clone(),
                    kept_path: kept.clone(),
                    hash,
                    detected_at: Utc::now(),
                })?;
                outcome.duplicates += 1;
                return Ok(());
            }
        }

        // Lossy conversion keeps most of a non-UTF-8 name instead of
        // collapsing distinct files onto one placeholder
        let filename = photo
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        let final_name = self.planner.reserve_filename(&target_dir, &filename);
        let destination = target_dir.join(final_name);

        transfer_file(&photo.path, &destination, self.config.mode)?;

        self.known_hashes.insert(hash, destination);
        outcome.organized += 1;
        Ok(())
    }

    /// Hash files already present in a destination directory the first
    /// time the run touches it, so pre-existing content counts for
    /// duplicate detection.
    fn seed_directory(&mut self, directory: &Path) {
        if !self.seeded_dirs.insert(directory.to_path_buf()) {
            return;
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(_) => return, // directory does not exist yet
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match hash_file(&path) {
                Ok(hash) => {
                    self.known_hashes.entry(hash).or_insert(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not hash existing file");
                }
            }
        }
    }
}

/// Best-effort canonicalization for overlap checks; falls back to the
/// path as given when it cannot be resolved
fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Move or copy `from` to `to`, creating parent directories as needed.
///
/// Moves use rename, falling back to copy + size verification + delete
/// when rename fails (for example across filesystems).
fn transfer_file(from: &Path, to: &Path, mode: TransferMode) -> Result<()> {
    if !from.exists() {
        return Err(TransferError::SourceMissing {
            path: from.to_path_buf(),
        }
        .into());
    }

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|source| TransferError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    match mode {
        TransferMode::Copy => {
            fs::copy(from, to).map_err(|source| TransferError::Copy {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
            })?;
        }
        TransferMode::Move => {
            if fs::rename(from, to).is_err() {
                move_across_filesystems(from, to)?;
            }
        }
    }

    Ok(())
}

fn move_across_filesystems(from: &Path, to: &Path) -> Result<()> {
    let source_size = fs::metadata(from)
        .map_err(|source| TransferError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?
        .len();

    fs::copy(from, to).map_err(|source| TransferError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;

    // Verify the copy landed intact before deleting the source
    let dest_size = fs::metadata(to)
        .map_err(|source| TransferError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?
        .len();
    if dest_size != source_size {
        let _ = fs::remove_file(to);
        return Err(TransferError::CopyVerification {
            to: to.to_path_buf(),
            expected: source_size,
            actual: dest_size,
        }
        .into());
    }

    fs::remove_file(from).map_err(|source| TransferError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;

    Ok(())
}
