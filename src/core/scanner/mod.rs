//! # Scanner Module
//!
//! Discovers photo files in source directories.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - WebP (.webp)
//! - HEIC (.heic, .heif) - iPhone photos
//! - GIF (.gif)
//! - BMP (.bmp)
//! - TIFF (.tiff, .tif)
//!
//! Discovery never aborts the run: unreadable entries are logged and
//! skipped so one bad directory cannot sink the whole batch.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Represents a discovered photo file
#[derive(Debug, Clone)]
pub struct PhotoFile {
    /// Path to the photo file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

const PHOTO_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif", "heic", "heif",
];

/// Check if a path looks like a photo file, by extension
pub fn is_photo_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| PHOTO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// Recursively discover photo files under the given source roots.
///
/// Hidden files and directories are skipped. Entries that cannot be read
/// are logged as warnings and left out of the result.
pub fn find_photo_files(sources: &[PathBuf]) -> Vec<PhotoFile> {
    let mut photos = Vec::new();

    for source in sources {
        let walker = WalkDir::new(source)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !is_photo_file(path) {
                continue;
            }

            match fs::metadata(path) {
                Ok(metadata) => photos.push(PhotoFile {
                    path: path.to_path_buf(),
                    size: metadata.len(),
                }),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable file");
                }
            }
        }
    }

    photos
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_photo(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        // Minimal JPEG header is enough - discovery filters by extension
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        path
    }

    #[test]
    fn is_photo_file_matches_known_extensions() {
        assert!(is_photo_file(Path::new("photo.jpg")));
        assert!(is_photo_file(Path::new("photo.JPG")));
        assert!(is_photo_file(Path::new("image.HEIC")));
        assert!(is_photo_file(Path::new("shot.png")));
        assert!(!is_photo_file(Path::new("doc.pdf")));
        assert!(!is_photo_file(Path::new("notes.txt")));
        assert!(!is_photo_file(Path::new("noextension")));
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let photos = find_photo_files(&[temp_dir.path().to_path_buf()]);
        assert!(photos.is_empty());
    }

    #[test]
    fn scan_finds_photos_and_sizes() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(temp_dir.path(), "photo.jpg");

        let photos = find_photo_files(&[temp_dir.path().to_path_buf()]);

        assert_eq!(photos.len(), 1);
        assert!(photos[0].path.ends_with("photo.jpg"));
        assert_eq!(photos[0].size, 4);
    }

    #[test]
    fn scan_traverses_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        create_test_photo(temp_dir.path(), "root.jpg");
        create_test_photo(&subdir, "nested.jpg");

        let photos = find_photo_files(&[temp_dir.path().to_path_buf()]);
        assert_eq!(photos.len(), 2);
    }

    #[test]
    fn scan_excludes_non_photo_files() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(temp_dir.path(), "photo.jpg");
        File::create(temp_dir.path().join("document.txt")).unwrap();

        let photos = find_photo_files(&[temp_dir.path().to_path_buf()]);
        assert_eq!(photos.len(), 1);
    }

    #[test]
    fn scan_excludes_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(temp_dir.path(), "visible.jpg");
        create_test_photo(temp_dir.path(), ".hidden.jpg");

        let photos = find_photo_files(&[temp_dir.path().to_path_buf()]);

        assert_eq!(photos.len(), 1);
        assert!(photos[0].path.ends_with("visible.jpg"));
    }

    #[test]
    fn scan_collects_from_multiple_sources() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        create_test_photo(a.path(), "one.jpg");
        create_test_photo(b.path(), "two.png");

        let photos = find_photo_files(&[a.path().to_path_buf(), b.path().to_path_buf()]);
        assert_eq!(photos.len(), 2);
    }
}
