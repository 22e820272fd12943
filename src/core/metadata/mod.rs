//! # Metadata Module
//!
//! Extracts a capture timestamp from photo files.
//!
//! EXIF `DateTimeOriginal` is preferred (with `DateTime` as a secondary
//! tag); when no EXIF date can be read the file's modified time stands in.
//! A missing date must never prevent a photo from being organized, so this
//! boundary degrades instead of erroring.

use chrono::{DateTime, Local, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Where a capture timestamp came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// EXIF capture date (DateTimeOriginal or DateTime)
    Exif,
    /// Filesystem modified time, used when EXIF is missing or unreadable
    FileModified,
}

/// A best-effort capture timestamp for a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureDate {
    pub timestamp: NaiveDateTime,
    pub source: DateSource,
}

impl CaptureDate {
    /// True when the timestamp did not come from reliable EXIF data
    pub fn is_fallback(&self) -> bool {
        self.source == DateSource::FileModified
    }
}

/// Extract the capture date for a photo, falling back to the modified time.
///
/// Never fails: any EXIF problem (unreadable file, corrupt container,
/// missing tag, unparseable value) degrades to the filesystem fallback.
pub fn extract_capture_date(path: &Path) -> CaptureDate {
    if let Some(timestamp) = read_exif_datetime(path) {
        return CaptureDate {
            timestamp,
            source: DateSource::Exif,
        };
    }

    debug!(path = %path.display(), "no EXIF capture date, using modified time");

    CaptureDate {
        timestamp: modified_time(path),
        source: DateSource::FileModified,
    }
}

/// Read an EXIF capture date-time, if the file carries one
pub fn read_exif_datetime(path: &Path) -> Option<NaiveDateTime> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut reader).ok()?;

    // DateTimeOriginal is when the photo was taken; DateTime is the
    // file-level timestamp some cameras write instead
    for tag in [Tag::DateTimeOriginal, Tag::DateTime] {
        if let Some(field) = exif.get_field(tag, In::PRIMARY) {
            if let Some(timestamp) = parse_exif_datetime(&field.value) {
                return Some(timestamp);
            }
        }
    }

    None
}

fn parse_exif_datetime(value: &Value) -> Option<NaiveDateTime> {
    if let Value::Ascii(ref vec) = value {
        let bytes = vec.first()?;
        let s = std::str::from_utf8(bytes).ok()?;
        // EXIF date format: "YYYY:MM:DD HH:MM:SS", sometimes NUL-padded
        let s = s.trim_end_matches('\0').trim();
        return NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S").ok();
    }
    None
}

fn modified_time(path: &Path) -> NaiveDateTime {
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or_else(|_| std::time::SystemTime::now());
    let datetime: DateTime<Local> = modified.into();
    datetime.naive_local()
}
