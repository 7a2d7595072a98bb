//! Test support utilities for listing-qa.
//!
//! Provides mocks and synthetic listing photos for testing the scoring
//! pipeline.
//!
//! # Example
//!
//! ```
//! use listing_qa_test_support::{MockImageSource, SyntheticImageBuilder};
//!
//! // A clean shot and a blurry one
//! let clean = SyntheticImageBuilder::product_shot(240, 240);
//! let blurry = SyntheticImageBuilder::uniform_gray(240, 240, 128);
//!
//! // Create mock image source
//! let source = MockImageSource::new(vec![clean, blurry]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use mocks::{MockImageSource, MockProgressSink, MockResultOutput};
