//! # Hasher Module
//!
//! Computes SHA-256 content digests for duplicate detection.
//!
//! Files are read in fixed-size chunks so memory use stays bounded no
//! matter how large the photo is. Equality of digests is the sole
//! duplicate criterion - byte-identical files, nothing fuzzier.

use crate::error::HashError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 8192;

/// Compute the hex-encoded SHA-256 digest of a file's contents.
///
/// Reads the file in 8 KiB chunks. Fails with a path-carrying error if
/// the file cannot be opened or becomes unreadable mid-read.
pub fn hash_file(path: &Path) -> Result<String, HashError> {
    let file = File::open(path).map_err(|source| HashError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let read = reader.read(&mut chunk).map_err(|source| HashError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if read == 0 {
            break;
        }
        hasher.update(&chunk[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
