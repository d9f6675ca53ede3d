//! Content-type detection.
//!
//! Types come from the file's bytes, never from its name. [`InferDetector`]
//! uses the `infer` crate's magic-number tables and falls back to a small
//! text/binary check for content `infer` does not know.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Reported for readable files that `infer` does not recognize and look like text.
pub const TEXT_PLAIN: &str = "text/plain";
/// Reported for unrecognized binary content.
pub const OCTET_STREAM: &str = "application/octet-stream";
/// Reported for zero-length files.
pub const EMPTY: &str = "inode/x-empty";

/// Number of leading bytes inspected by the text fallback.
const SAMPLE_SIZE: u64 = 8192;

/// Produces a content-type identifier for a file.
pub trait ContentDetector {
    /// Always returns a value; an empty string means the file could not be read.
    fn detect(&self, path: &Path) -> String;
}

/// Detects content types from magic numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferDetector;

impl InferDetector {
    pub fn new() -> Self {
        Self
    }

    fn fallback(path: &Path) -> std::io::Result<&'static str> {
        let mut sample = Vec::new();
        File::open(path)?.take(SAMPLE_SIZE).read_to_end(&mut sample)?;

        if sample.is_empty() {
            return Ok(EMPTY);
        }
        Ok(if looks_like_text(&sample) {
            TEXT_PLAIN
        } else {
            OCTET_STREAM
        })
    }
}

impl ContentDetector for InferDetector {
    fn detect(&self, path: &Path) -> String {
        let detected = match infer::get_from_path(path) {
            Ok(Some(kind)) => Ok(kind.mime_type()),
            Ok(None) => Self::fallback(path),
            Err(e) => Err(e),
        };

        match detected {
            Ok(mime) => {
                debug!(path = %path.display(), mime, "detected content type");
                mime.to_string()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read file for detection");
                String::new()
            }
        }
    }
}

/// Valid UTF-8 without NUL bytes; a multi-byte sequence cut off by the sample
/// boundary still counts as text.
fn looks_like_text(sample: &[u8]) -> bool {
    if sample.contains(&0) {
        return false;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PNG_HEADER: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52,
    ];

    #[test]
    fn test_detects_png_regardless_of_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.jpg");
        fs::write(&path, PNG_HEADER).unwrap();

        assert_eq!(InferDetector::new().detect(&path), "image/png");
    }

    #[test]
    fn test_detects_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc");
        fs::write(&path, b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n").unwrap();

        assert_eq!(InferDetector::new().detect(&path), "application/pdf");
    }

    #[test]
    fn test_text_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.md");
        fs::write(&path, "# Notes\nplain words, café\n").unwrap();

        assert_eq!(InferDetector::new().detect(&path), TEXT_PLAIN);
    }

    #[test]
    fn test_binary_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob.bin");
        fs::write(&path, b"\x01\x00\xFE\x7F\x00\x13").unwrap();

        assert_eq!(InferDetector::new().detect(&path), OCTET_STREAM);
    }

    #[test]
    fn test_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");
        fs::write(&path, b"").unwrap();

        assert_eq!(InferDetector::new().detect(&path), EMPTY);
    }

    #[test]
    fn test_unreadable_file_yields_empty_type() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(
            InferDetector::new().detect(&temp_dir.path().join("missing.png")),
            ""
        );
    }

    #[test]
    fn test_truncated_utf8_counts_as_text() {
        assert!(looks_like_text("héllo".as_bytes()));
        assert!(looks_like_text(&"é".as_bytes()[..1]));
        assert!(!looks_like_text(&[0xFF, 0xFE, b'a', b'b']));
    }
}
