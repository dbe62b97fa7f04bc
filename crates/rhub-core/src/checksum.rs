//! Content hash sent alongside the upload-URL request.
//!
//! The control plane identifies LoRA files by MD5, so the digest is computed
//! locally before any network call is made.

use md5::{Digest, Md5};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::UploadError;

const CHUNK_SIZE: usize = 4096;

/// Compute MD5 of a reader and return the digest as lowercase hex.
pub fn md5_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Md5::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compute MD5 of a file in 4 KiB chunks; the file is closed before returning.
pub fn md5_path(path: &Path) -> Result<String, UploadError> {
    let hash_err = |error| UploadError::Hash {
        path: path.to_path_buf(),
        error,
    };
    let f = File::open(path).map_err(hash_err)?;
    md5_reader(f).map_err(hash_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn md5_path_empty_file() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let digest = md5_path(f.path()).unwrap();
        assert_eq!(digest, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn md5_path_known_content() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello\n").unwrap();
        f.flush().unwrap();
        let digest = md5_path(f.path()).unwrap();
        assert_eq!(digest, "b1946ac92492d2347c6235b4d2611184");
    }

    #[test]
    fn md5_spans_multiple_chunks() {
        // 10_000 bytes crosses two chunk boundaries; must match the one-shot digest.
        let data: Vec<u8> = (0u8..=255).cycle().take(10_000).collect();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&data).unwrap();
        f.flush().unwrap();
        let expected = hex::encode(Md5::digest(&data));
        assert_eq!(md5_path(f.path()).unwrap(), expected);
        assert_eq!(md5_path(f.path()).unwrap(), expected);
    }

    #[test]
    fn md5_path_missing_file_is_hash_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = md5_path(&dir.path().join("nope.safetensors")).unwrap_err();
        assert!(matches!(err, UploadError::Hash { .. }));
    }
}
