//! Listing QA Adapters - External adapters for listing-qa.
//!
//! This crate provides adapters for:
//! - Filesystem image decoding
//! - Submission payload files (category, attributes, known hashes)

pub mod fs;
pub mod payload;

pub use fs::FsImageSource;
pub use payload::Submission;
