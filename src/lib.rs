//! # imgdup
//!
//! Finds near-duplicate images by reducing each one to a 64-bit perceptual
//! fingerprint and grouping images whose fingerprints are within a configurable
//! Hamming distance of an existing group's representative.
//!
//! ## Architecture
//! The library is split into a core engine and presentation layers:
//! - `core` - hashing, distance, duplicate grouping, scan pipeline
//! - `events` - channel-based progress reporting
//! - `error` - error types
//!
//! The core performs no I/O of its own except the explicit relocation step;
//! traversal and decoding feed it already-resident values.

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{ImgdupError, Result};

/// Initialize tracing for the library.
///
/// This should be called once by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
