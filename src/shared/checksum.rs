use crate::shared::Result;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Hex-encoded digests of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigests {
    pub sha1: String,
    pub sha256: String,
    pub md5: String,
}

/// Computes SHA-1, SHA-256 and MD5 of a file in a single streaming pass.
pub fn digest_file(path: &Path) -> Result<FileDigests> {
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open {} for hashing: {}", path.display(), e))?;
    let mut reader = BufReader::new(file);

    let mut sha1 = Sha1::new();
    let mut sha256 = Sha256::new();
    let mut md5 = Md5::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let read = reader
            .read(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        if read == 0 {
            break;
        }
        let chunk = &buffer[..read];
        sha1.update(chunk);
        sha256.update(chunk);
        md5.update(chunk);
    }

    Ok(FileDigests {
        sha1: hex::encode(sha1.finalize()),
        sha256: hex::encode(sha256.finalize()),
        md5: hex::encode(md5.finalize()),
    })
}
