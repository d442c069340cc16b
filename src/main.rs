//! # imgdup CLI
//!
//! Finds near-duplicate images under a directory tree.
//!
//! ## Usage
//! ```bash
//! imgdup scan ~/Pictures --recursive --threshold 5
//! imgdup scan ~/Pictures --move-to ~/dups --output json
//! ```

mod cli;

use imgdup::Result;

fn main() -> Result<()> {
    imgdup::init_tracing();
    cli::run()
}
