//! Content hashing for change detection.

use blake3::Hasher as Blake3Hasher;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Streaming buffer size for hashing.
const CHUNK_SIZE: usize = 64 * 1024;

/// Computes content fingerprints for manifest records.
pub struct Hasher;

impl Hasher {
    /// Generate a BLAKE3 hash of file contents.
    ///
    /// Streams the file in fixed-size chunks so large images are never
    /// loaded whole.
    pub fn content_hash(path: &Path) -> std::io::Result<String> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut hasher = Blake3Hasher::new();

        let mut buffer = vec![0u8; CHUNK_SIZE];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize().to_hex().to_string())
    }

    /// Hash a file for a manifest record, degrading to an empty string.
    pub fn content_hash_or_empty(path: &Path) -> String {
        match Self::content_hash(path) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!("Hash failed for {:?}: {}", path, e);
                String::new()
            }
        }
    }

    /// Generate a BLAKE3 hash from an in-memory byte buffer.
    pub fn content_hash_from_bytes(data: &[u8]) -> String {
        let mut hasher = Blake3Hasher::new();
        hasher.update(data);
        hasher.finalize().to_hex().to_string()
    }
}
