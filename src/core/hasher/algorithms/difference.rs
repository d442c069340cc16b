//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Resampling the image to 9x8 (one extra column) and reducing to one
//!    intensity channel
//! 2. For each row, comparing each pixel to its right-hand neighbor
//! 3. Bit 1 if the left value is not less than the right (the per-pixel delta
//!    compared against a fixed threshold of 0)
//!
//! The 64 bits encode the left-to-right gradient direction across the 8x8
//! visible grid.

use super::super::traits::{ensure_resamplable, AlgorithmKind, HashAlgorithm};
use crate::core::fingerprint::Fingerprint;
use crate::error::HashError;
use image::{imageops::FilterType, DynamicImage};

const GRID: u32 = 8;

/// Difference Hash (dHash) implementation
pub struct DifferenceHasher;

impl DifferenceHasher {
    /// Create a new dHash hasher
    pub fn new() -> Self {
        Self
    }
}

impl Default for DifferenceHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl HashAlgorithm for DifferenceHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        ensure_resamplable(image)?;

        let gray = image
            .resize_exact(GRID + 1, GRID, FilterType::CatmullRom)
            .to_luma8();

        let mut bits = Vec::with_capacity((GRID * GRID) as usize);
        for y in 0..GRID {
            for x in 0..GRID {
                let left = gray.get_pixel(x, y)[0];
                let right = gray.get_pixel(x + 1, y)[0];
                bits.push(left >= right);
            }
        }

        Ok(Fingerprint::pack_bits(bits))
    }

    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Difference
    }
}
