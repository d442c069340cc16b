//! # Scanner Module
//!
//! Discovers candidate image files in directories.
//!
//! Files are selected by extension (jpg/jpeg, png, gif, bmp, tiff/tif, webp);
//! whether they actually decode is decided later by the hasher. Traversal is
//! non-recursive unless configured otherwise, and hidden entries are skipped
//! by default. A root that is not an accessible directory aborts the scan;
//! everything encountered below a valid root is recoverable.

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{ScanConfig, Scanner};

use crate::error::ScanError;
use std::path::PathBuf;

/// Result of a traversal
#[derive(Debug)]
pub struct ScanResult {
    /// Candidate image files, in traversal order
    pub images: Vec<PathBuf>,
    /// Non-fatal errors encountered along the way
    pub errors: Vec<ScanError>,
}
