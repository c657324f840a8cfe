//! Content digests for files, streamed in fixed-size chunks

use crate::error::HashError;
use crate::types::{Digest, HashAlgorithm};
use sha2::Digest as _;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Default read chunk. Memory per hashed file is bounded by this.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Incremental hash accumulator for the supported algorithms
pub enum ContentHasher {
    Sha256(sha2::Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl ContentHasher {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => ContentHasher::Sha256(sha2::Sha256::new()),
            HashAlgorithm::Blake3 => ContentHasher::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            ContentHasher::Sha256(hasher) => hasher.update(data),
            ContentHasher::Blake3(hasher) => {
                hasher.update(data);
            }
        }
    }

    pub fn finalize(self) -> Digest {
        match self {
            ContentHasher::Sha256(hasher) => Digest::from_bytes(hasher.finalize().into()),
            ContentHasher::Blake3(hasher) => Digest::from_bytes(*hasher.finalize().as_bytes()),
        }
    }
}

/// Compute content hash for in-memory bytes
pub fn compute_content_hash(content: &[u8], algorithm: HashAlgorithm) -> Digest {
    let mut hasher = ContentHasher::new(algorithm);
    hasher.update(content);
    hasher.finalize()
}

/// Digest a file with the default chunk size
pub fn digest_file(path: &Path, algorithm: HashAlgorithm) -> Result<Digest, HashError> {
    digest_file_chunked(path, algorithm, CHUNK_SIZE)
}

/// Digest a file, reading `chunk_size` bytes at a time.
///
/// The handle is dropped on every return path, including a failed read
/// partway through the file.
pub fn digest_file_chunked(
    path: &Path,
    algorithm: HashAlgorithm,
    chunk_size: usize,
) -> Result<Digest, HashError> {
    let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
    let mut hasher = ContentHasher::new(algorithm);
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(HashError::from_io(path, e)),
        };
        hasher.update(&buffer[..read]);
    }

    Ok(hasher.finalize())
}
