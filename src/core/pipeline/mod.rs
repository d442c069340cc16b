//! # Pipeline Module
//!
//! Orchestrates the full scan: traverse -> hash -> group -> relocate.
//!
//! Hashing runs in parallel across images with rayon; group submission is
//! strictly sequential in traversal order, so the resulting grouping is
//! deterministic for a given directory listing.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, PipelineResult};
