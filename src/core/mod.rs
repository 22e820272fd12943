//! # Core Module
//!
//! The terminal-agnostic organize-and-dedupe engine.
//!
//! ## Modules
//! - `scanner` - Discovers photo files in source directories
//! - `metadata` - Extracts capture dates (EXIF with mtime fallback)
//! - `hasher` - Computes SHA-256 content digests
//! - `planner` - Date directories and deterministic conflict resolution
//! - `organize` - The organize pipeline
//! - `report` - The duplicate report (CSV) shared between pipelines
//! - `dedupe` - The verify-then-delete pipeline

pub mod dedupe;
pub mod hasher;
pub mod metadata;
pub mod organize;
pub mod planner;
pub mod report;
pub mod scanner;

// Re-export commonly used types
pub use dedupe::{DedupeOutcome, DedupePipeline};
pub use metadata::{CaptureDate, DateSource};
pub use organize::{OrganizeConfig, OrganizeOutcome, OrganizePipeline, TransferMode};
pub use report::DuplicateRecord;
pub use scanner::PhotoFile;
