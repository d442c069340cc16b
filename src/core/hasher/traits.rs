//! Trait definitions for the hashing engine.

use crate::core::fingerprint::Fingerprint;
use crate::error::HashError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmKind {
    /// Average Hash (aHash) - brightness vs. the 8x8 mean
    Average,
    /// Difference Hash (dHash) - left-to-right gradient direction
    Difference,
    /// Perceptual Hash (pHash) - DCT low-frequency coefficients
    Perceptual,
}

impl AlgorithmKind {
    /// Human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            AlgorithmKind::Average => {
                "Average Hash (aHash) - fast comparison against the mean brightness"
            }
            AlgorithmKind::Difference => {
                "Difference Hash (dHash) - compares brightness gradients between neighbors"
            }
            AlgorithmKind::Perceptual => {
                "Perceptual Hash (pHash) - DCT-based, robust to scaling and color shifts"
            }
        }
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgorithmKind::Average => write!(f, "aHash"),
            AlgorithmKind::Difference => write!(f, "dHash"),
            AlgorithmKind::Perceptual => write!(f, "pHash"),
        }
    }
}

/// Trait for hash algorithm implementations.
///
/// Hashing is a pure function of the decoded raster: each algorithm resamples
/// the source to its own working resolution, derives 64 bits and packs them
/// into a [`Fingerprint`]. A raster that cannot be resampled (zero-sized
/// source) fails with [`HashError::InvalidImage`]; callers skip that image and
/// continue the scan.
pub trait HashAlgorithm: Send + Sync {
    /// Compute a fingerprint from an already-decoded image
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError>;

    /// Compute a fingerprint directly from a file path.
    ///
    /// A file that cannot be read at all is an [`HashError::Io`]; a file that
    /// reads but does not decode is an [`HashError::Decode`].
    fn hash_file(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let image = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(source) => HashError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => HashError::Decode {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;
        self.hash_image(&image)
    }

    /// The algorithm kind
    fn kind(&self) -> AlgorithmKind;
}

/// Reject rasters that cannot be resampled to a target size.
pub(crate) fn ensure_resamplable(image: &DynamicImage) -> Result<(), HashError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(HashError::InvalidImage {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_kind_display() {
        assert_eq!(AlgorithmKind::Average.to_string(), "aHash");
        assert_eq!(AlgorithmKind::Difference.to_string(), "dHash");
        assert_eq!(AlgorithmKind::Perceptual.to_string(), "pHash");
    }

    #[test]
    fn descriptions_mention_the_mechanism() {
        assert!(AlgorithmKind::Perceptual.description().contains("DCT"));
        assert!(AlgorithmKind::Difference.description().contains("gradient"));
    }

    #[test]
    fn zero_sized_image_is_not_resamplable() {
        let empty = DynamicImage::new_rgb8(0, 0);
        assert!(ensure_resamplable(&empty).is_err());
    }
}
