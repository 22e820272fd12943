//! # Error Module
//!
//! User-friendly error types for the photo organizer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Per-file errors stay per-file** - only setup failures abort a run
//! - **User-friendly messages** - non-technical users should understand

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum PhotoOrganizerError {
    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Fatal errors detected before any file is touched
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Source is not a directory: {path}")]
    SourceNotADirectory { path: PathBuf },

    #[error("Source and destination directories cannot overlap: {source_dir} vs {destination}")]
    OverlappingPaths {
        source_dir: PathBuf,
        destination: PathBuf,
    },

    #[error("Failed to create destination directory {path}: {source}")]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate report not found: {path}")]
    ReportNotFound { path: PathBuf },
}

/// Errors that occur while computing a content hash
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to open {path} for hashing: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path} while hashing: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while moving or copying a file to its destination
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Source file disappeared before transfer: {path}")]
    SourceMissing { path: PathBuf },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Copy verification failed for {to}: source {expected} bytes, destination {actual} bytes"
    )]
    CopyVerification {
        to: PathBuf,
        expected: u64,
        actual: u64,
    },
}

/// Errors that occur while writing or reading the duplicate report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create report at {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report row: {source}")]
    Write {
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read report at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PhotoOrganizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_error_includes_path() {
        let error = SetupError::SourceNotFound {
            path: PathBuf::from("/photos/vacation"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/vacation"));
    }

    #[test]
    fn hash_error_includes_path_and_cause() {
        let error = HashError::Read {
            path: PathBuf::from("/photos/broken.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/broken.jpg"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn copy_verification_reports_both_sizes() {
        let error = TransferError::CopyVerification {
            to: PathBuf::from("/dst/2021/05/03/img.jpg"),
            expected: 1024,
            actual: 512,
        };
        let message = error.to_string();
        assert!(message.contains("1024"));
        assert!(message.contains("512"));
    }

    #[test]
    fn overlap_error_names_both_directories() {
        let error = SetupError::OverlappingPaths {
            source_dir: PathBuf::from("/photos"),
            destination: PathBuf::from("/photos/sorted"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos"));
        assert!(message.contains("/photos/sorted"));
    }
}
