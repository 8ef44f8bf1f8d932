//! File hashing for content comparison using SHA-256

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use sha2::{Digest, Sha256};

use crate::config::DEFAULT_BLOCK_SIZE;
use crate::error::Result;

/// File hash result
pub type FileHash = [u8; 32];

/// Streaming content hasher with a fixed block size
#[derive(Debug, Clone, Copy)]
pub struct ContentHasher {
    block_size: usize,
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}

impl ContentHasher {
    /// Create a hasher reading `block_size` bytes at a time
    #[must_use]
    pub const fn new(block_size: usize) -> Self {
        let block_size = if block_size == 0 { 1 } else { block_size };
        Self { block_size }
    }

    /// Compute the SHA-256 digest of a file by streaming its contents
    ///
    /// Memory use is bounded by the block size, not the file size.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or a read fails.
    pub fn hash(&self, path: &Path) -> Result<FileHash> {
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;

        let mut hasher = Sha256::new();
        let mut buffer = vec![0; self.block_size];

        loop {
            let bytes_read = match file.read(&mut buffer) {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to read file: {}", path.display()));
                }
            };

            if bytes_read == 0 {
                break;
            }

            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize().into())
    }
}
