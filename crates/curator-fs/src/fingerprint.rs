//! Content fingerprints for change detection
//!
//! Provides a single canonical fingerprint format (`b3:<hex>:<len>`) used
//! throughout the workspace: a BLAKE3 digest plus the content length.
//! Fingerprints exist to detect change, not to prove integrity.

use std::path::Path;

use crate::{Error, Result};

/// Prefix for all fingerprints produced by this module
const PREFIX: &str = "b3:";

/// Compute the fingerprint of in-memory content.
///
/// Returns a string in the canonical format `"b3:<hex>:<len>"`.
pub fn content_fingerprint(bytes: &[u8]) -> String {
    format!("{}{}:{}", PREFIX, blake3::hash(bytes).to_hex(), bytes.len())
}

/// Compute the fingerprint of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn file_fingerprint(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(content_fingerprint(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_has_prefix_and_length() {
        let fp = content_fingerprint(b"hello world");
        assert!(fp.starts_with("b3:"));
        assert!(fp.ends_with(":11"));
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = content_fingerprint(b"test");
        let b = content_fingerprint(b"test");
        assert_eq!(a, b);
    }

    #[test]
    fn different_content_different_fingerprint() {
        let a = content_fingerprint(b"aaa");
        let b = content_fingerprint(b"bbb");
        assert_ne!(a, b);
    }

    #[test]
    fn file_fingerprint_matches_content_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.bin");
        std::fs::write(&path, b"hello world").unwrap();

        let file_fp = file_fingerprint(&path).unwrap();
        let content_fp = content_fingerprint(b"hello world");
        assert_eq!(file_fp, content_fp);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = file_fingerprint(&dir.path().join("absent.bin"));
        assert!(result.is_err());
    }
}
