//! # Core Module
//!
//! The duplicate detection engine.
//!
//! ## Modules
//! - `scanner` - discovers image files in directories
//! - `hasher` - computes perceptual fingerprints
//! - `fingerprint` - the fingerprint type and Hamming distance
//! - `index` - groups fingerprints into duplicate groups
//! - `relocate` - moves detected duplicates aside
//! - `pipeline` - orchestrates the full workflow

pub mod fingerprint;
pub mod hasher;
pub mod index;
pub mod pipeline;
pub mod relocate;
pub mod scanner;

// Re-export commonly used types
pub use fingerprint::{hamming_distance, Fingerprint};
pub use hasher::{AlgorithmKind, HashAlgorithm};
pub use index::{DuplicateGroup, DuplicateIndex, ImageRecord, MatchOutcome};
