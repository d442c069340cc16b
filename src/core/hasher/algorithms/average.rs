//! Average Hash (aHash) implementation.
//!
//! aHash works by:
//! 1. Resampling the image to 8x8 and reducing to one intensity channel
//! 2. Computing the arithmetic mean of the 64 values
//! 3. For each pixel in row-major order: bit 1 if the value is not less
//!    than the mean, else 0
//!
//! Pixels exactly at the mean count as 1; a uniform raster therefore hashes
//! to all ones.

use super::super::traits::{ensure_resamplable, AlgorithmKind, HashAlgorithm};
use crate::core::fingerprint::Fingerprint;
use crate::error::HashError;
use image::{imageops::FilterType, DynamicImage};

const GRID: u32 = 8;

/// Average Hash (aHash) implementation
pub struct AverageHasher;

impl AverageHasher {
    /// Create a new aHash hasher
    pub fn new() -> Self {
        Self
    }
}

impl Default for AverageHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl HashAlgorithm for AverageHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        ensure_resamplable(image)?;

        let gray = image
            .resize_exact(GRID, GRID, FilterType::CatmullRom)
            .to_luma8();

        let values: Vec<f32> = gray.pixels().map(|p| f32::from(p[0])).collect();
        let mean = values.iter().sum::<f32>() / values.len() as f32;

        Ok(Fingerprint::pack_bits(values.iter().map(|&v| v >= mean)))
    }

    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Average
    }
}
