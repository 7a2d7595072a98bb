//! Ports between the scoring core and its transport.
//!
//! Decoding, output and progress display live in adapters; the core only
//! sees these traits.

mod image_source;
mod progress;
mod result_output;

pub use image_source::{ImageLoadError, ImageSource};
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
