//! # scanwrap-projection
//!
//! Cylindrical unwrap projection for rotating-laser scan clouds.
//!
//! This crate turns a [`scanwrap_core::ScanCloud`] into either per-point polar
//! coordinates ([`unwrap_cloud`]) or a 2D angle/height raster of per-cell
//! point lists ([`unwrap_to_image`]). A tangent-tree angle quantizer
//! ([`TanQuantizer`]) is provided for callers that want to discretize slopes
//! without evaluating an inverse-trigonometric function per point.

pub mod quantizer;
pub mod raster;
pub mod unwrap;

// Re-export commonly used items
pub use quantizer::*;
pub use raster::*;
pub use unwrap::*;
