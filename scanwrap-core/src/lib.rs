//! Core data structures for scanwrap
//!
//! This crate provides the types shared by every scanwrap consumer: scan
//! points (position, color, opaque per-point metadata), the scan cloud
//! container, and the common error type.

pub mod point;
pub mod cloud;
pub mod error;

pub use point::*;
pub use cloud::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};

/// Common result type for scanwrap operations
pub type Result<T> = std::result::Result<T, Error>;
