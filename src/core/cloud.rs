//! Point cloud data structure (the exchange type between synthesis and export).
//!
//! A point cloud is two index-aligned sequences:
//! - `positions`: world-space (x, y, z)
//! - `colors`: normalized (r, g, b) in `[0, 1]`
//!
//! plus the footprint of the layout that produced it.

use crate::error::{Error, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A colored point cloud.
///
/// Struct-of-Arrays layout: `positions[i]` and `colors[i]` describe the same
/// particle. The core never mutates a cloud after returning it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    /// World-space positions
    pub positions: Vec<Vector3<f32>>,

    /// RGB colors, each channel in [0, 1]
    pub colors: Vec<Vector3<f32>>,

    /// Width of the synthesized layout (sum of image widths plus gaps)
    pub width: f32,

    /// Height of the synthesized layout (tallest image)
    pub height: f32,
}

impl PointCloud {
    /// Create an empty cloud with the given footprint.
    pub fn empty(width: f32, height: f32) -> Self {
        Self {
            positions: Vec::new(),
            colors: Vec::new(),
            width,
            height,
        }
    }

    /// Create a cloud from parts, checking that positions and colors line up.
    pub fn from_parts(
        positions: Vec<Vector3<f32>>,
        colors: Vec<Vector3<f32>>,
        width: f32,
        height: f32,
    ) -> Result<Self> {
        let cloud = Self {
            positions,
            colors,
            width,
            height,
        };
        cloud.validate()?;
        Ok(cloud)
    }

    /// Number of points in the cloud.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the cloud is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Fails with `MalformedCloud` if positions and colors are misaligned.
    pub fn validate(&self) -> Result<()> {
        if self.positions.len() != self.colors.len() {
            return Err(Error::MalformedCloud {
                positions: self.positions.len(),
                colors: self.colors.len(),
            });
        }
        Ok(())
    }

    /// Iterate over `(position, color)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Vector3<f32>, &Vector3<f32>)> {
        self.positions.iter().zip(self.colors.iter())
    }

    /// Positions flattened to `[x0, y0, z0, x1, ...]` (GPU-buffer layout).
    pub fn flat_positions(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    /// Colors flattened to `[r0, g0, b0, r1, ...]`.
    pub fn flat_colors(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| [c.x, c.y, c.z]).collect()
    }

    /// Axis-aligned bounds `(min, max)` of all positions, or `None` if empty.
    pub fn bounds(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        let first = self.positions.first()?;
        let init = (*first, *first);
        Some(self.positions.iter().fold(init, |(min, max), p| {
            (min.inf(p), max.sup(p))
        }))
    }
}
