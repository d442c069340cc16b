//! # Relocate Module
//!
//! Moves detected duplicates into a destination directory.
//!
//! Only the file name is kept, so two duplicates with the same name in
//! different source directories collide; the second move fails with
//! [`RelocateError::AlreadyExists`] and the file stays where it was. A failed
//! move never invalidates the detection result.

use crate::error::RelocateError;
use std::fs;
use std::path::{Path, PathBuf};

/// Moves duplicate files into one destination directory
#[derive(Debug, Clone)]
pub struct Relocator {
    destination: PathBuf,
}

impl Relocator {
    /// Create a relocator targeting `destination`.
    ///
    /// The directory is expected to exist; callers validate it up front.
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// The destination directory
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Move `source` into the destination directory, returning the new path.
    pub fn relocate(&self, source: &Path) -> Result<PathBuf, RelocateError> {
        let file_name = source.file_name().ok_or_else(|| RelocateError::Io {
            source_path: source.to_path_buf(),
            destination: self.destination.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "source has no file name",
            ),
        })?;
        let target = self.destination.join(file_name);

        if target.exists() {
            return Err(RelocateError::AlreadyExists {
                source_path: source.to_path_buf(),
                destination: target,
            });
        }

        fs::rename(source, &target).map_err(|e| RelocateError::Io {
            source_path: source.to_path_buf(),
            destination: target.clone(),
            source: e,
        })?;

        Ok(target)
    }
}
