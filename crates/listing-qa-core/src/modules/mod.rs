//! Per-image metric implementations.
//!
//! Each module measures one independent signal on an intensity image.

pub mod fingerprint;
pub mod sharpness;
pub mod watermark;

pub use fingerprint::perceptual_hash;
pub use sharpness::laplacian_variance;
pub use watermark::{corner_edge_density, corner_regions, Region, WatermarkConfig};
