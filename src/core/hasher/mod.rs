//! # Hasher Module
//!
//! Computes 64-bit perceptual fingerprints for images.
//!
//! ## Supported Algorithms
//! - **aHash (Average Hash)** - fastest, good for exact duplicates
//! - **dHash (Difference Hash)** - good balance of speed and accuracy
//! - **pHash (Perceptual Hash)** - most robust, survives scaling and edits
//!
//! ## How It Works
//! 1. Resample the image to a tiny working raster (8x8, 9x8 or 32x32)
//! 2. Reduce to a single intensity channel
//! 3. Derive one bit per grid position from pixel relationships
//! 4. Pack the 64 bits into a 16-character hex fingerprint
//!
//! ## Example
//! ```rust,ignore
//! use imgdup::core::hasher::{build_hasher, AlgorithmKind};
//!
//! let hasher = build_hasher(AlgorithmKind::Difference);
//! let fingerprint = hasher.hash_file(&path)?;
//! ```

mod algorithms;
pub mod dct;
mod traits;

pub use algorithms::{AverageHasher, DifferenceHasher, PerceptualHasher};
pub use traits::{AlgorithmKind, HashAlgorithm};

/// Build the hasher for an algorithm kind.
pub fn build_hasher(kind: AlgorithmKind) -> Box<dyn HashAlgorithm> {
    match kind {
        AlgorithmKind::Average => Box::new(AverageHasher::new()),
        AlgorithmKind::Difference => Box::new(DifferenceHasher::new()),
        AlgorithmKind::Perceptual => Box::new(PerceptualHasher::new()),
    }
}
