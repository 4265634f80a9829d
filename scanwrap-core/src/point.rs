//! Scan point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use bytemuck::{Pod, Zeroable};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A single point captured by a rotating laser scanner.
///
/// `meta` is an opaque per-point value (source-scan index, auxiliary sensor
/// reading) carried alongside the geometry; scanwrap never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct ScanPoint {
    pub position: Point3f,
    pub color: [u8; 3],
    pub meta: u32,
}

unsafe impl Pod for ScanPoint {}
unsafe impl Zeroable for ScanPoint {}

impl ScanPoint {
    pub fn new(position: Point3f, color: [u8; 3], meta: u32) -> Self {
        Self { position, color, meta }
    }
}

impl Default for ScanPoint {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            color: [255, 255, 255],
            meta: 0,
        }
    }
}
