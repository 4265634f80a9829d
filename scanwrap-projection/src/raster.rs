//! Unwrap raster: a 2D angle/height grid of per-cell point lists

use scanwrap_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// One point's contribution to a raster cell: its distance from the rotation
/// axis plus the pass-through color and metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellPoint {
    pub radius: f32,
    pub color: [u8; 3],
    pub meta: u32,
}

/// A `width x height` grid where `width` counts angle buckets and `height`
/// counts z-height buckets.
///
/// Every cell is a valid, possibly empty list; points quantizing to the same
/// cell accumulate rather than overwrite. Cells start empty and only grow as
/// points land in them, so sparse clouds stay cheap even at high raster
/// resolutions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnwrapRaster {
    width: usize,
    height: usize,
    cells: Vec<Vec<CellPoint>>,
}

impl UnwrapRaster {
    /// Create an empty raster of the given dimensions.
    ///
    /// Fails with [`Error::InvalidConfiguration`] when either dimension is
    /// zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "raster dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cells: vec![Vec::new(); width * height],
        })
    }

    /// Number of angle buckets
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of height buckets
    pub fn height(&self) -> usize {
        self.height
    }

    /// Points recorded in the cell at `(angle_bucket, h_bucket)`.
    ///
    /// # Panics
    /// Panics when either bucket is out of range.
    pub fn cell(&self, angle_bucket: usize, h_bucket: usize) -> &[CellPoint] {
        &self.cells[self.index(angle_bucket, h_bucket)]
    }

    /// Append a point to the cell at `(angle_bucket, h_bucket)`.
    pub(crate) fn push(&mut self, angle_bucket: usize, h_bucket: usize, point: CellPoint) {
        let index = self.index(angle_bucket, h_bucket);
        self.cells[index].push(point);
    }

    /// Total number of points recorded across all cells
    pub fn point_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Check whether no cell holds any point
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    /// Iterate all cells as `(angle_bucket, h_bucket, points)`
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &[CellPoint])> + '_ {
        let height = self.height;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / height, i % height, cell.as_slice()))
    }

    fn index(&self, angle_bucket: usize, h_bucket: usize) -> usize {
        assert!(
            angle_bucket < self.width && h_bucket < self.height,
            "raster cell ({}, {}) out of bounds for {}x{}",
            angle_bucket,
            h_bucket,
            self.width,
            self.height
        );
        angle_bucket * self.height + h_bucket
    }
}
