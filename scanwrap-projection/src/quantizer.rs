//! Tangent-tree angle quantization
//!
//! Mapping a slope `y/x` to a discretized angle normally costs one `atan`
//! per point. For a fixed angular resolution the same answer can be read off
//! a precomputed binary tree over the tangent function in `depth`
//! comparisons, amortizing tree construction across every point of every
//! cloud processed at that resolution.

use scanwrap_core::{Error, Result};

/// Largest accepted tree depth; the node arena holds `2^(depth+1) - 1`
/// entries, and practical angular resolutions sit at depth <= 12.
pub const MAX_DEPTH: usize = 24;

#[derive(Debug, Clone, Copy)]
struct TanNode {
    /// Representative angle of this node's sector, in degrees.
    angle: f32,
    /// Decision threshold: tan(angle). Children split the sector here.
    tan: f32,
    /// Path bits from the root, first decision most significant.
    code: u32,
}

/// A fixed-depth binary search tree over the tangent function.
///
/// Built once per angular resolution and immutable afterwards; lookups are
/// read-only, so a single tree may be shared across threads and reused for
/// every point of every cloud processed at that resolution.
///
/// The tree is stored as a complete-binary-tree arena: node `i` has its
/// children at `2i + 1` and `2i + 2`, so no per-node allocation or pointer
/// chasing is involved.
#[derive(Debug, Clone)]
pub struct TanQuantizer {
    nodes: Vec<TanNode>,
    depth: usize,
}

impl TanQuantizer {
    /// Build a quantizer over `[center_deg - span_deg/2, center_deg + span_deg/2]`.
    ///
    /// The root represents the span midpoint; each internal node splits its
    /// sector in half, lower half to the `less` child (path bit 0), upper
    /// half to `more` (path bit 1). A leaf's angle is the midpoint of its
    /// sector, and its path bits read root-to-leaf form the bucket index in
    /// `[0, 2^depth)`.
    ///
    /// `depth == 0` is a legal degenerate tree: a single leaf, every lookup
    /// resolving to bucket 0.
    pub fn build(center_deg: f32, span_deg: f32, depth: usize) -> Result<Self> {
        if !center_deg.is_finite() {
            return Err(Error::InvalidConfiguration(
                "quantizer center angle must be finite".to_string(),
            ));
        }
        if !(span_deg.is_finite() && span_deg > 0.0) {
            return Err(Error::InvalidConfiguration(
                "quantizer span must be positive".to_string(),
            ));
        }
        if depth > MAX_DEPTH {
            return Err(Error::InvalidConfiguration(format!(
                "quantizer depth {} exceeds maximum {}",
                depth, MAX_DEPTH
            )));
        }

        let node_count = (1usize << (depth + 1)) - 1;
        let mut nodes = vec![
            TanNode {
                angle: 0.0,
                tan: 0.0,
                code: 0,
            };
            node_count
        ];
        Self::fill(&mut nodes, 0, center_deg, span_deg, 0, 0, depth);

        Ok(Self { nodes, depth })
    }

    fn fill(
        nodes: &mut [TanNode],
        index: usize,
        angle: f32,
        span: f32,
        code: u32,
        level: usize,
        depth: usize,
    ) {
        nodes[index] = TanNode {
            angle,
            tan: angle.to_radians().tan(),
            code,
        };
        if level < depth {
            let quarter = span / 4.0;
            Self::fill(nodes, 2 * index + 1, angle - quarter, span / 2.0, code << 1, level + 1, depth);
            Self::fill(nodes, 2 * index + 2, angle + quarter, span / 2.0, (code << 1) | 1, level + 1, depth);
        }
    }

    /// Resolve a slope to its quantized `(angle_deg, bucket)`.
    ///
    /// Descends `depth` levels, branching less on `slope < tan` and more on
    /// `slope >= tan`; a slope exactly at a threshold deterministically
    /// routes `more`, so every real slope maps to exactly one leaf. IEEE
    /// ordering makes +/-infinity terminate without special casing; NaN
    /// compares false everywhere and lands in the top bucket.
    pub fn lookup(&self, slope: f32) -> (f32, u32) {
        let mut index = 0;
        for _ in 0..self.depth {
            index = if slope < self.nodes[index].tan {
                2 * index + 1
            } else {
                2 * index + 2
            };
        }
        let leaf = &self.nodes[index];
        (leaf.angle, leaf.code)
    }

    /// Tree depth this quantizer was built with.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of angular buckets, `2^depth`.
    pub fn buckets(&self) -> u32 {
        1u32 << self.depth
    }

    /// Iterate the leaves as `(bucket, angle_deg)`, in bucket order.
    pub fn leaves(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        let first_leaf = (1usize << self.depth) - 1;
        self.nodes[first_leaf..]
            .iter()
            .map(|node| (node.code, node.angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_leaf_codes_cover_all_buckets() {
        let tree = TanQuantizer::build(0.0, 360.0, 6).unwrap();
        let mut codes: Vec<u32> = tree.leaves().map(|(code, _)| code).collect();
        codes.sort_unstable();
        let expected: Vec<u32> = (0..tree.buckets()).collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn test_leaf_angles_are_sector_midpoints() {
        // depth 2 over [-180, 180]: sectors of 90 degrees, midpoints at
        // -135, -45, 45, 135.
        let tree = TanQuantizer::build(0.0, 360.0, 2).unwrap();
        let angles: Vec<f32> = tree.leaves().map(|(_, angle)| angle).collect();
        assert_eq!(angles.len(), 4);
        for (angle, expected) in angles.iter().zip([-135.0, -45.0, 45.0, 135.0]) {
            assert_relative_eq!(*angle, expected, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_lookup_monotone_within_principal_range() {
        // Over (-90, 90) tan is strictly increasing, so larger slopes must
        // never resolve to smaller buckets.
        let tree = TanQuantizer::build(0.0, 180.0, 8).unwrap();
        let mut last_bucket = 0;
        let mut slope = -50.0f32;
        while slope <= 50.0 {
            let (_, bucket) = tree.lookup(slope);
            assert!(bucket >= last_bucket, "bucket regressed at slope {}", slope);
            last_bucket = bucket;
            slope += 0.25;
        }
    }

    #[test]
    fn test_lookup_returns_quantized_angle() {
        let tree = TanQuantizer::build(0.0, 180.0, 10).unwrap();
        // Slope 1 corresponds to 45 degrees; the quantized angle must sit
        // within half a sector of it.
        let (angle, _) = tree.lookup(1.0);
        let half_sector = 180.0 / (1 << 10) as f32 / 2.0;
        assert!((angle - 45.0).abs() <= half_sector + 1e-3);
    }

    #[test]
    fn test_threshold_ties_route_more() {
        let tree = TanQuantizer::build(0.0, 180.0, 1).unwrap();
        // Root threshold is tan(0) = 0: slope 0 must take the upper sector.
        let (angle, bucket) = tree.lookup(0.0);
        assert_eq!(bucket, 1);
        assert!(angle > 0.0);
    }

    #[test]
    fn test_infinite_slopes_terminate() {
        let tree = TanQuantizer::build(0.0, 360.0, 8).unwrap();
        let (_, top) = tree.lookup(f32::INFINITY);
        let (_, bottom) = tree.lookup(f32::NEG_INFINITY);
        assert_eq!(top, tree.buckets() - 1);
        assert_eq!(bottom, 0);
    }

    #[test]
    fn test_depth_zero_single_leaf() {
        let tree = TanQuantizer::build(0.0, 360.0, 0).unwrap();
        assert_eq!(tree.buckets(), 1);
        assert_eq!(tree.lookup(-3.0).1, 0);
        assert_eq!(tree.lookup(42.0).1, 0);
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert!(TanQuantizer::build(0.0, 0.0, 4).is_err());
        assert!(TanQuantizer::build(0.0, -90.0, 4).is_err());
        assert!(TanQuantizer::build(f32::NAN, 360.0, 4).is_err());
        assert!(TanQuantizer::build(0.0, 360.0, MAX_DEPTH + 1).is_err());
    }
}
