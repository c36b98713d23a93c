//! Content digests for skipping rewrites of unchanged headers

use anyhow::{Context, Result};
use blake3::Hasher;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::utils::config::HashingConsts;

/// Hash a file with blake3 using chunked reads. Returns `None` if the file does not exist.
pub fn hash_file(path: &Path) -> Result<Option<[u8; 32]>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("open {}", path.display())),
    };
    let mut hasher = Hasher::new();
    let mut reader = std::io::BufReader::with_capacity(HashingConsts::HASH_READ_CHUNK_SIZE, file);
    let mut buffer = vec![0u8; HashingConsts::HASH_READ_CHUNK_SIZE];
    loop {
        let n = reader
            .read(&mut buffer)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(Some(*hasher.finalize().as_bytes()))
}

/// Hash an in-memory buffer with blake3.
pub fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    *blake3::hash(bytes).as_bytes()
}
