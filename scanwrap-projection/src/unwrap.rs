//! Cylindrical unwrap of scan clouds
//!
//! A rotating-laser scanner sweeps the object around the Z axis, so the
//! natural 2D representation of a capture is polar: angle around the axis on
//! one dimension, z-height on the other, with the planar distance from the
//! axis as the cell value.

use crate::raster::{CellPoint, UnwrapRaster};
use log::debug;
use rayon::prelude::*;
use scanwrap_core::{Error, Result, ScanCloud};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// A scan cloud in cylindrical coordinates: five index-aligned sequences,
/// one entry per input point.
///
/// `angles` are in radians in the atan2 range (-pi, pi]; `radii` are planar
/// distances from the Z rotation axis; `heights` are the untouched z values.
/// An empty cloud unwraps to five empty sequences, never an absent value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolarCloud {
    pub angles: Vec<f32>,
    pub radii: Vec<f32>,
    pub heights: Vec<f32>,
    pub colors: Vec<[u8; 3]>,
    pub meta: Vec<u32>,
}

impl PolarCloud {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            angles: Vec::with_capacity(capacity),
            radii: Vec::with_capacity(capacity),
            heights: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            meta: Vec::with_capacity(capacity),
        }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Check if the polar cloud is empty
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

/// Unwrap a scan cloud into cylindrical coordinates.
///
/// A pure per-point transform: angle = atan2(y, x), radius = sqrt(x^2 + y^2)
/// (distance from the Z rotation axis, not the 3D norm), height = z. Colors
/// and metadata pass through untouched.
pub fn unwrap_cloud(cloud: &ScanCloud) -> PolarCloud {
    let polar: Vec<(f32, f32, f32)> = cloud
        .points
        .par_iter()
        .map(|p| {
            let angle = p.position.y.atan2(p.position.x);
            let radius = (p.position.x * p.position.x + p.position.y * p.position.y).sqrt();
            (angle, radius, p.position.z)
        })
        .collect();

    let mut out = PolarCloud::with_capacity(cloud.len());
    for (point, (angle, radius, height)) in cloud.iter().zip(polar) {
        out.angles.push(angle);
        out.radii.push(radius);
        out.heights.push(height);
        out.colors.push(point.color);
        out.meta.push(point.meta);
    }
    out
}

/// Rasterize a scan cloud into a `width x height` angle/height grid.
///
/// The angle range (-pi, pi] maps linearly onto buckets `[0, width)`, with a
/// modulo wrap so the +/-pi seam lands in adjacent buckets rather than being
/// split. Height buckets come from `round(z * z_scale)`; points whose height
/// bucket falls outside `[0, height)` lie outside the requested vertical
/// window and are dropped, not clamped. A single out-of-window point never
/// aborts the rest of the cloud.
///
/// An empty cloud yields a raster of the requested dimensions with every
/// cell empty.
pub fn unwrap_to_image(
    cloud: &ScanCloud,
    width: usize,
    height: usize,
    z_scale: f32,
) -> Result<UnwrapRaster> {
    if !(z_scale.is_finite() && z_scale > 0.0) {
        return Err(Error::InvalidConfiguration(format!(
            "z_scale must be a positive finite value, got {}",
            z_scale
        )));
    }
    let mut raster = UnwrapRaster::new(width, height)?;

    let polar = unwrap_cloud(cloud);
    let buckets_per_radian = width as f32 / (2.0 * PI);
    let mut dropped = 0usize;

    for i in 0..polar.len() {
        // (angle + pi) is non-negative, so the rounded value sits in
        // [0, width]; the modulo folds the +pi seam onto bucket 0.
        let angle_bucket = ((polar.angles[i] + PI) * buckets_per_radian).round() as usize % width;
        let h = (polar.heights[i] * z_scale).round();
        if h >= 0.0 && h < height as f32 {
            raster.push(
                angle_bucket,
                h as usize,
                CellPoint {
                    radius: polar.radii[i],
                    color: polar.colors[i],
                    meta: polar.meta[i],
                },
            );
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        debug!(
            "unwrap_to_image: dropped {} of {} points outside height window [0, {})",
            dropped,
            polar.len(),
            height
        );
    }
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scanwrap_core::{Point3f, ScanPoint};

    fn point(x: f32, y: f32, z: f32) -> ScanPoint {
        ScanPoint::new(Point3f::new(x, y, z), [255, 255, 255], 0)
    }

    #[test]
    fn test_unwrap_cloud_alignment() {
        let cloud = ScanCloud::from_points(vec![
            point(1.0, 0.0, 0.0),
            point(0.0, 1.0, 1.0),
            point(-1.0, -1.0, 2.0),
        ]);
        let polar = unwrap_cloud(&cloud);

        assert_eq!(polar.len(), cloud.len());
        assert_eq!(polar.angles.len(), polar.radii.len());
        assert_eq!(polar.radii.len(), polar.heights.len());
        assert_eq!(polar.heights.len(), polar.colors.len());
        assert_eq!(polar.colors.len(), polar.meta.len());
    }

    #[test]
    fn test_unwrap_cloud_polar_values() {
        let cloud = ScanCloud::from_points(vec![point(3.0, 4.0, 7.5)]);
        let polar = unwrap_cloud(&cloud);

        assert_relative_eq!(polar.angles[0], (4.0f32).atan2(3.0), epsilon = 1e-6);
        // Planar distance from the axis, not the 3D norm.
        assert_relative_eq!(polar.radii[0], 5.0, epsilon = 1e-6);
        assert_relative_eq!(polar.heights[0], 7.5, epsilon = 1e-6);
    }

    #[test]
    fn test_unwrap_cloud_empty() {
        let polar = unwrap_cloud(&ScanCloud::new());
        assert!(polar.is_empty());
        assert!(polar.colors.is_empty());
        assert!(polar.meta.is_empty());
    }

    #[test]
    fn test_unwrap_to_image_rejects_bad_config() {
        let cloud = ScanCloud::new();
        assert!(unwrap_to_image(&cloud, 0, 10, 1.0).is_err());
        assert!(unwrap_to_image(&cloud, 10, 0, 1.0).is_err());
        assert!(unwrap_to_image(&cloud, 10, 10, 0.0).is_err());
        assert!(unwrap_to_image(&cloud, 10, 10, -1.0).is_err());
        assert!(unwrap_to_image(&cloud, 10, 10, f32::NAN).is_err());
    }

    #[test]
    fn test_out_of_window_point_dropped() {
        let cloud = ScanCloud::from_points(vec![point(1.0, 0.0, 100.0)]);
        let raster = unwrap_to_image(&cloud, 10, 10, 1.0).unwrap();
        assert!(raster.is_empty());
    }

    #[test]
    fn test_negative_height_dropped_not_clamped() {
        let cloud = ScanCloud::from_points(vec![point(1.0, 0.0, -1.0)]);
        let raster = unwrap_to_image(&cloud, 10, 10, 1.0).unwrap();
        assert!(raster.is_empty());
    }

    #[test]
    fn test_seam_angles_land_in_adjacent_buckets() {
        let width = 360;
        let cloud = ScanCloud::from_points(vec![
            // Just under +pi and just under -pi: adjacent on the circle.
            point(-1.0, 1e-4, 0.0),
            point(-1.0, -1e-4, 0.0),
        ]);
        let raster = unwrap_to_image(&cloud, width, 4, 1.0).unwrap();

        let occupied: Vec<usize> = raster
            .iter_cells()
            .filter(|(_, _, cell)| !cell.is_empty())
            .map(|(a, _, _)| a)
            .collect();
        assert!(!occupied.is_empty());
        for bucket in occupied {
            // Both must wrap to within one bucket of the seam at 0.
            let distance = bucket.min(width - bucket);
            assert!(distance <= 1, "seam point landed in bucket {}", bucket);
        }
    }
}
