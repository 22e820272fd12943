//! # Planner Module
//!
//! Computes canonical destination paths and resolves filename conflicts.
//!
//! Photos land in `root/YYYY/MM/DD/` derived from the capture timestamp.
//! A conflicting filename gets a numeric suffix: `name (1).ext`,
//! `name (2).ext`, and so on until an unused name is found. Resolution is
//! checked against both the names already on disk and the names handed
//! out earlier in the same run, so two source files can never race to the
//! same destination within one batch.

use chrono::{Datelike, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Canonical date directory for a capture timestamp: `root/YYYY/MM/DD`
pub fn date_directory(root: &Path, timestamp: NaiveDateTime) -> PathBuf {
    let date = timestamp.date();
    root.join(format!(
        "{:04}/{:02}/{:02}",
        date.year(),
        date.month(),
        date.day()
    ))
}

/// Tracks reserved filenames per destination directory for one run.
///
/// The first time a directory is touched its on-disk entries are loaded;
/// every name handed out afterwards is reserved so reruns and in-run
/// collisions both resolve deterministically.
#[derive(Debug, Default)]
pub struct DestinationPlanner {
    reserved: HashMap<PathBuf, HashSet<String>>,
}

impl DestinationPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a final filename for `desired` in `directory`.
    ///
    /// Returns the desired name unchanged when it is unused, otherwise the
    /// first free `name (n).ext` variant. The returned name is recorded as
    /// taken for the rest of the run.
    pub fn reserve_filename(&mut self, directory: &Path, desired: &str) -> String {
        let names = self
            .reserved
            .entry(directory.to_path_buf())
            .or_insert_with(|| names_on_disk(directory));

        let final_name = resolve_conflict(desired, names);
        names.insert(final_name.clone());
        final_name
    }
}

/// Pick the first unused variant of `desired` given the taken names
fn resolve_conflict(desired: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(desired) {
        return desired.to_string();
    }

    let path = Path::new(desired);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    let ext = path.extension().and_then(|e| e.to_str());

    let mut counter = 1;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{} ({}).{}", stem, counter, ext),
            None => format!("{} ({})", stem, counter),
        };
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn names_on_disk(directory: &Path) -> HashSet<String> {
    let mut names = HashSet::new();
    if let Ok(entries) = std::fs::read_dir(directory) {
        for entry in entries.flatten() {
            if let Ok(name) = entry.file_name().into_string() {
                names.insert(name);
            }
        }
    }
    names
}
