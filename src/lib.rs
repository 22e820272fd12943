//! # Photo Organizer
//!
//! Organizes photos into a date-based `YYYY/MM/DD` hierarchy and safely
//! removes byte-identical duplicates.
//!
//! ## Core Philosophy
//! - **Never delete unverified** - duplicates are re-hashed at deletion time
//! - **One bad file never sinks the batch** - per-file errors are logged
//!   and counted, processing continues
//! - **Deterministic** - the same inputs produce the same layout
//!
//! ## Architecture
//! The library is split into a core engine (terminal-agnostic) and a
//! presentation layer:
//! - `core` - The organize and dedupe pipelines
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{PhotoOrganizerError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
