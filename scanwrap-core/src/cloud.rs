//! Scan cloud data structures and functionality

use crate::error::Error;
use crate::point::{Point3f, ScanPoint};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// An ordered collection of scan points.
///
/// Loading collaborators may supply geometry as three separate index-aligned
/// sequences; [`ScanCloud::from_parallel`] checks that alignment once at the
/// boundary so the rest of the crate can rely on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanCloud {
    pub points: Vec<ScanPoint>,
}

impl ScanCloud {
    /// Create a new empty scan cloud
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a new scan cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a scan cloud from a vector of points
    pub fn from_points(points: Vec<ScanPoint>) -> Self {
        Self { points }
    }

    /// Assemble a cloud from index-aligned position, color and metadata
    /// sequences.
    ///
    /// Fails with [`Error::InvalidData`] when the sequences differ in length;
    /// three empty sequences yield a valid empty cloud.
    pub fn from_parallel(
        positions: Vec<Point3f>,
        colors: Vec<[u8; 3]>,
        meta: Vec<u32>,
    ) -> Result<Self> {
        if positions.len() != colors.len() || positions.len() != meta.len() {
            return Err(Error::InvalidData(format!(
                "misaligned scan arrays: {} positions, {} colors, {} meta",
                positions.len(),
                colors.len(),
                meta.len()
            )));
        }

        let points = positions
            .into_iter()
            .zip(colors)
            .zip(meta)
            .map(|((position, color), meta)| ScanPoint { position, color, meta })
            .collect();
        Ok(Self { points })
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: ScanPoint) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<ScanPoint> {
        self.points.iter()
    }

    /// Get a mutable iterator over the points
    pub fn iter_mut(&mut self) -> std::slice::IterMut<ScanPoint> {
        self.points.iter_mut()
    }

    /// Clear all points from the cloud
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Reserve capacity for additional points
    pub fn reserve(&mut self, additional: usize) {
        self.points.reserve(additional);
    }
}

impl Index<usize> for ScanCloud {
    type Output = ScanPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IndexMut<usize> for ScanCloud {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}

impl IntoIterator for ScanCloud {
    type Item = ScanPoint;
    type IntoIter = std::vec::IntoIter<ScanPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScanCloud {
    type Item = &'a ScanPoint;
    type IntoIter = std::slice::Iter<'a, ScanPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a mut ScanCloud {
    type Item = &'a mut ScanPoint;
    type IntoIter = std::slice::IterMut<'a, ScanPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter_mut()
    }
}

impl Extend<ScanPoint> for ScanCloud {
    fn extend<I: IntoIterator<Item = ScanPoint>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl FromIterator<ScanPoint> for ScanCloud {
    fn from_iter<I: IntoIterator<Item = ScanPoint>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}
