//! # Error Module
//!
//! Error types for the duplicate image finder.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, characters, what went wrong
//! - **Per-file errors are recoverable** - a bad image is skipped, the scan
//!   continues; only an inaccessible scan root is fatal
//! - **Malformed fingerprints are not masked** - they indicate a programming
//!   or data-integrity error and must propagate

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ImgdupError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),

    #[error("Relocation error: {0}")]
    Relocate(#[from] RelocateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while discovering image files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while hashing a single image
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to decode image {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("Image cannot be resampled ({width}x{height} source)")]
    InvalidImage { width: u32, height: u32 },

    #[error("Failed to open image file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by fingerprint decoding.
///
/// A fingerprint string reaching the distance function with characters outside
/// `0-9a-fA-F` is corrupt; it is rejected, never treated as zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("Malformed fingerprint: invalid hex character {character:?} at position {position}")]
    MalformedCharacter { character: char, position: usize },
}

/// Errors that occur while relocating a duplicate.
///
/// Relocation failures leave the file in place; the duplicate detection result
/// itself remains valid.
#[derive(Error, Debug)]
pub enum RelocateError {
    #[error("Cannot move {} to {}: a file with that name already exists", source_path.display(), destination.display())]
    AlreadyExists {
        source_path: PathBuf,
        destination: PathBuf,
    },

    #[error("Failed to move {} to {}: {source}", source_path.display(), destination.display())]
    Io {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ImgdupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::DirectoryNotFound {
            path: PathBuf::from("/images/vacation"),
        };
        assert!(error.to_string().contains("/images/vacation"));
    }

    #[test]
    fn hash_error_includes_reason() {
        let error = HashError::Decode {
            path: PathBuf::from("/images/broken.jpg"),
            reason: "invalid JPEG".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/images/broken.jpg"));
        assert!(message.contains("invalid JPEG"));
    }

    #[test]
    fn fingerprint_error_names_the_character() {
        let error = FingerprintError::MalformedCharacter {
            character: 'z',
            position: 3,
        };
        let message = error.to_string();
        assert!(message.contains("'z'"));
        assert!(message.contains("position 3"));
    }

    #[test]
    fn relocate_error_names_both_paths() {
        let error = RelocateError::AlreadyExists {
            source_path: PathBuf::from("/images/a.jpg"),
            destination: PathBuf::from("/dups/a.jpg"),
        };
        let message = error.to_string();
        assert!(message.contains("/images/a.jpg"));
        assert!(message.contains("/dups/a.jpg"));
    }
}
