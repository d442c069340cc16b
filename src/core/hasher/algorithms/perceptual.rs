//! Perceptual Hash (pHash) implementation.
//!
//! pHash works by:
//! 1. Resampling the image to 32x32 and converting to luma with weights
//!    0.2126 / 0.7512 / 0.0722, shifted into a signed range around 0
//! 2. Applying a full 2-D DCT and keeping the top-left 8x8 block of
//!    lowest-frequency coefficients
//! 3. Thresholding each coefficient against the block mean, computed with
//!    column 0 excluded (the DC-heavy first column would swamp it)
//!
//! Concentrating on low frequencies makes the hash resistant to scaling,
//! compression artifacts and minor color changes.

use super::super::dct::dct_2d;
use super::super::traits::{ensure_resamplable, AlgorithmKind, HashAlgorithm};
use crate::core::fingerprint::Fingerprint;
use crate::error::HashError;
use image::{imageops::FilterType, DynamicImage};

const INPUT_SIZE: u32 = 32;
const BLOCK: usize = 8;

/// Perceptual Hash (pHash) implementation
pub struct PerceptualHasher;

impl PerceptualHasher {
    /// Create a new pHash hasher
    pub fn new() -> Self {
        Self
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl HashAlgorithm for PerceptualHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        ensure_resamplable(image)?;

        let rgb = image
            .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom)
            .to_rgb8();

        // Luma, centered on zero (-127.5..=127.5)
        let mut field = vec![vec![0.0f64; INPUT_SIZE as usize]; INPUT_SIZE as usize];
        for (y, row) in field.iter_mut().enumerate() {
            for (x, value) in row.iter_mut().enumerate() {
                let p = rgb.get_pixel(x as u32, y as u32);
                let luma =
                    0.2126 * f64::from(p[0]) + 0.7512 * f64::from(p[1]) + 0.0722 * f64::from(p[2]);
                *value = luma - 127.5;
            }
        }

        let coefficients = dct_2d(&field);

        // Top-left 8x8 block, row-major
        let mut block = [0.0f64; BLOCK * BLOCK];
        let mut mean = 0.0;
        for y in 0..BLOCK {
            for x in 0..BLOCK {
                let value = coefficients[y][x];
                block[y * BLOCK + x] = value;
                if x != 0 {
                    mean += value;
                }
            }
        }
        // Column 0 is excluded from the sum but still hashed. The divisor is
        // 63, not 56; the mean is deliberately pulled toward zero.
        mean /= (BLOCK * BLOCK - 1) as f64;

        Ok(Fingerprint::pack_bits(block.iter().map(|&v| v >= mean)))
    }

    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Perceptual
    }
}
