//! Integration tests for the organize pipeline.
//!
//! These tests verify end-to-end organize behavior including:
//! - EXIF-driven date placement
//! - Modification-time fallback
//! - Duplicate detection and report generation
//! - Collision-safe reruns

use photo_organizer::core::{OrganizeConfig, OrganizePipeline, TransferMode};
use photo_organizer::core::report::read_report;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a minimal JPEG carrying an EXIF DateTimeOriginal of
/// 2021-05-03 14:30:00. Hand-built APP1 segment: IFD0 points at an Exif
/// sub-IFD holding the single ASCII date field.
fn create_exif_jpeg(path: &Path, trailer: &[u8]) -> std::io::Result<()> {
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(&[0xFF, 0xD8]); // SOI
    bytes.extend_from_slice(&[0xFF, 0xE1, 0x00, 0x48]); // APP1, length 72
    bytes.extend_from_slice(b"Exif\0\0");
    // TIFF header, little-endian, IFD0 at offset 8
    bytes.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00]);
    // IFD0: one entry, ExifIFD pointer -> offset 26
    bytes.extend_from_slice(&[0x01, 0x00]);
    bytes.extend_from_slice(&[
        0x69, 0x87, 0x04, 0x00, 0x01, 0x00, 0x00, 0x00, 0x1A, 0x00, 0x00, 0x00,
    ]);
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    // Exif IFD: one entry, DateTimeOriginal (ASCII, 20 bytes) -> offset 44
    bytes.extend_from_slice(&[0x01, 0x00]);
    bytes.extend_from_slice(&[
        0x03, 0x90, 0x02, 0x00, 0x14, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00, 0x00,
    ]);
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    bytes.extend_from_slice(b"2021:05:03 14:30:00\0");
    bytes.extend_from_slice(&[0xFF, 0xD9]); // EOI
    // Distinguish otherwise-identical fixtures by content
    bytes.extend_from_slice(trailer);
    fs::write(path, bytes)
}

fn run_organize(sources: Vec<PathBuf>, destination: &Path, mode: TransferMode) -> (usize, usize) {
    let config = OrganizeConfig::new(sources, destination.to_path_buf(), mode);
    let outcome = OrganizePipeline::new(config)
        .unwrap()
        .run(|_, _, _| {})
        .unwrap();
    (outcome.organized, outcome.duplicates)
}

#[test]
fn exif_dated_photo_lands_in_its_capture_date_directory() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    create_exif_jpeg(&src.path().join("img1.jpg"), b"a").unwrap();

    let (organized, duplicates) = run_organize(
        vec![src.path().to_path_buf()],
        dest.path(),
        TransferMode::Move,
    );

    assert_eq!(organized, 1);
    assert_eq!(duplicates, 0);
    assert!(dest.path().join("2021/05/03/img1.jpg").exists());
    assert!(!src.path().join("img1.jpg").exists());
}

#[test]
fn byte_identical_copy_is_reported_not_transferred() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    create_exif_jpeg(&src.path().join("img1.jpg"), b"").unwrap();
    create_exif_jpeg(&src.path().join("img2.jpg"), b"").unwrap();

    let config = OrganizeConfig::new(
        vec![src.path().to_path_buf()],
        dest.path().to_path_buf(),
        TransferMode::Move,
    );
    let report_path = config.report_path.clone();
    let outcome = OrganizePipeline::new(config)
        .unwrap()
        .run(|_, _, _| {})
        .unwrap();

    assert_eq!(outcome.organized, 1);
    assert_eq!(outcome.duplicates, 1);

    let records = read_report(&report_path).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].kept_path.starts_with(dest.path().join("2021/05/03")));
    // The duplicate source stays on disk until dedupe removes it
    assert!(records[0].duplicate_path.exists());
}

#[test]
fn file_without_exif_falls_back_to_modification_date() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(src.path().join("plain.jpg"), b"no exif here").unwrap();

    let config = OrganizeConfig::new(
        vec![src.path().to_path_buf()],
        dest.path().to_path_buf(),
        TransferMode::Move,
    );
    let outcome = OrganizePipeline::new(config)
        .unwrap()
        .run(|_, _, _| {})
        .unwrap();

    assert_eq!(outcome.organized, 1);
    assert_eq!(outcome.fallback_dates, 1);

    // Freshly written fixture: modified today, so it lands in today's slot
    let today = chrono::Local::now().date_naive();
    let expected = dest.path().join(format!(
        "{:04}/{:02}/{:02}/plain.jpg",
        chrono::Datelike::year(&today),
        chrono::Datelike::month(&today),
        chrono::Datelike::day(&today)
    ));
    assert!(expected.exists());
}

#[test]
fn rerun_with_new_content_never_overwrites_existing_files() {
    let dest = TempDir::new().unwrap();

    let first_src = TempDir::new().unwrap();
    create_exif_jpeg(&first_src.path().join("img.jpg"), b"first run").unwrap();
    run_organize(
        vec![first_src.path().to_path_buf()],
        dest.path(),
        TransferMode::Move,
    );

    let placed = dest.path().join("2021/05/03/img.jpg");
    assert!(placed.exists());
    let original_contents = fs::read(&placed).unwrap();

    // Second run: same filename and date, different bytes
    let second_src = TempDir::new().unwrap();
    create_exif_jpeg(&second_src.path().join("img.jpg"), b"second run").unwrap();
    let (organized, duplicates) = run_organize(
        vec![second_src.path().to_path_buf()],
        dest.path(),
        TransferMode::Move,
    );

    assert_eq!(organized, 1);
    assert_eq!(duplicates, 0);
    assert_eq!(fs::read(&placed).unwrap(), original_contents);
    assert!(dest.path().join("2021/05/03/img (1).jpg").exists());
}

#[test]
fn rerun_with_same_content_detects_preexisting_duplicate() {
    let dest = TempDir::new().unwrap();

    let first_src = TempDir::new().unwrap();
    create_exif_jpeg(&first_src.path().join("img.jpg"), b"stable").unwrap();
    run_organize(
        vec![first_src.path().to_path_buf()],
        dest.path(),
        TransferMode::Move,
    );

    let second_src = TempDir::new().unwrap();
    create_exif_jpeg(&second_src.path().join("copy.jpg"), b"stable").unwrap();
    let (organized, duplicates) = run_organize(
        vec![second_src.path().to_path_buf()],
        dest.path(),
        TransferMode::Move,
    );

    assert_eq!(organized, 0);
    assert_eq!(duplicates, 1);
    assert!(second_src.path().join("copy.jpg").exists());
}

#[test]
fn copy_mode_leaves_all_sources_untouched() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    create_exif_jpeg(&src.path().join("img1.jpg"), b"a").unwrap();
    create_exif_jpeg(&src.path().join("img2.jpg"), b"b").unwrap();

    let (organized, _) = run_organize(
        vec![src.path().to_path_buf()],
        dest.path(),
        TransferMode::Copy,
    );

    assert_eq!(organized, 2);
    assert!(src.path().join("img1.jpg").exists());
    assert!(src.path().join("img2.jpg").exists());
}

#[test]
fn per_file_failure_is_counted_and_batch_continues() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    // The EXIF-dated photo wants dest/2021/05/03, but a regular file at
    // dest/2021 blocks directory creation for it
    create_exif_jpeg(&src.path().join("blocked.jpg"), b"a").unwrap();
    fs::write(src.path().join("fine.jpg"), b"no exif, lands in today").unwrap();
    fs::write(dest.path().join("2021"), b"in the way").unwrap();

    let config = OrganizeConfig::new(
        vec![src.path().to_path_buf()],
        dest.path().to_path_buf(),
        TransferMode::Move,
    );
    let outcome = OrganizePipeline::new(config)
        .unwrap()
        .run(|_, _, _| {})
        .unwrap();

    assert_eq!(outcome.errors, 1);
    assert_eq!(outcome.organized, 1);
    // The failed file stays where it was; the good one moved
    assert!(src.path().join("blocked.jpg").exists());
    assert!(!src.path().join("fine.jpg").exists());
}

#[test]
fn non_photo_files_are_ignored() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fs::write(src.path().join("notes.txt"), b"not a photo").unwrap();
    fs::write(src.path().join("archive.zip"), b"still not a photo").unwrap();

    let (organized, duplicates) = run_organize(
        vec![src.path().to_path_buf()],
        dest.path(),
        TransferMode::Move,
    );

    assert_eq!(organized, 0);
    assert_eq!(duplicates, 0);
    assert!(src.path().join("notes.txt").exists());
}
