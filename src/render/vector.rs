//! Vector projection: particles to screen-space circles.
//!
//! Each particle is drawn as a circle whose radius shrinks with depth.
//! No rasterization happens here - the output is a display list sorted
//! farthest-first, so any renderer without a depth buffer (SVG, canvas)
//! can draw it in order and get correct occlusion (painter's algorithm).

use crate::core::color::to_rgb8;
use crate::core::{PointCloud, ProjectionContext};
use crate::error::Result;

/// A projected particle.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenCircle {
    /// Position in pixels (origin top-left, y down)
    pub x: f32,
    pub y: f32,

    /// NDC depth (-1 near plane, 1 far plane), used for sorting
    pub depth: f32,

    /// RGB color (0-255)
    pub color: [u8; 3],

    /// Radius in pixels
    pub radius: f32,
}

/// Projects point clouds into depth-sorted screen circles.
pub struct VectorProjector {
    /// Radius of a particle at NDC depth 0 (in pixels)
    pub base_radius: f32,

    /// Smallest radius emitted
    pub min_radius: f32,
}

impl VectorProjector {
    /// Create a new projector with the viewer's reference radii.
    pub fn new() -> Self {
        Self {
            base_radius: 3.0,
            min_radius: 0.5,
        }
    }

    /// Project every visible particle of `cloud`.
    ///
    /// A particle is dropped when its NDC depth is `>= 1` (beyond the far
    /// plane or behind the eye) or when x/y fall outside `[-1, 1]`. The result
    /// is sorted by descending depth; particles at equal depth keep their
    /// cloud order.
    pub fn project<P: ProjectionContext + ?Sized>(
        &self,
        cloud: &PointCloud,
        camera: &P,
    ) -> Result<Vec<ScreenCircle>> {
        cloud.validate()?;

        let (width, height) = camera.viewport();
        let half_width = width as f32 / 2.0;
        let half_height = height as f32 / 2.0;

        let mut invalid = 0usize;
        let mut circles: Vec<ScreenCircle> = cloud
            .iter()
            .filter_map(|(position, color)| {
                let ndc = camera.project_ndc(position);

                if ndc.x.is_nan() || ndc.y.is_nan() || ndc.z.is_nan() {
                    invalid += 1;
                    return None;
                }

                // Frustum culling
                if ndc.z >= 1.0 || ndc.x < -1.0 || ndc.x > 1.0 || ndc.y < -1.0 || ndc.y > 1.0 {
                    return None;
                }

                Some(ScreenCircle {
                    x: ndc.x * half_width + half_width,
                    y: -ndc.y * half_height + half_height,
                    depth: ndc.z,
                    color: to_rgb8(color),
                    radius: (self.base_radius * (1.0 - ndc.z)).max(self.min_radius),
                })
            })
            .collect();

        if invalid > 0 {
            log::warn!("Dropped {} particles with invalid projections", invalid);
        }

        // Painter's algorithm: farthest first. Stable, so ties keep cloud order.
        circles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        log::debug!(
            "Projected {}/{} particles into {}x{} viewport",
            circles.len(),
            cloud.len(),
            width,
            height
        );

        Ok(circles)
    }
}

impl Default for VectorProjector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Camera;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn camera() -> Camera {
        Camera::new(
            Vector3::new(0.0, 0.0, 10.0),
            Vector3::zeros(),
            Vector3::y(),
            90.0,
            1.0,
            100.0,
            100,
            100,
        )
    }

    fn cloud(points: &[[f32; 3]]) -> PointCloud {
        PointCloud::from_parts(
            points.iter().map(|p| Vector3::new(p[0], p[1], p[2])).collect(),
            points.iter().map(|_| Vector3::new(1.0, 0.5, 0.0)).collect(),
            0.0,
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn test_center_maps_to_viewport_center() {
        let circles = VectorProjector::new()
            .project(&cloud(&[[0.0, 0.0, 0.0]]), &camera())
            .unwrap();

        assert_eq!(circles.len(), 1);
        assert_relative_eq!(circles[0].x, 50.0, epsilon = 1e-4);
        assert_relative_eq!(circles[0].y, 50.0, epsilon = 1e-4);
        assert_eq!(circles[0].color, [255, 127, 0]);
    }

    #[test]
    fn test_screen_y_grows_down() {
        let circles = VectorProjector::new()
            .project(&cloud(&[[0.0, 5.0, 0.0]]), &camera())
            .unwrap();

        // 90° fov at distance 10: y = 5 is halfway to the top edge.
        assert_relative_eq!(circles[0].y, 25.0, epsilon = 1e-3);
    }

    #[test]
    fn test_radius_has_floor() {
        let circles = VectorProjector::new()
            .project(&cloud(&[[0.0, 0.0, -80.0]]), &camera())
            .unwrap();

        // Deep in the frustum NDC z approaches 1, so 3 * (1 - z) < 0.5.
        assert_eq!(circles[0].radius, 0.5);
    }

    #[test]
    fn test_nearer_points_are_bigger() {
        let circles = VectorProjector::new()
            .project(&cloud(&[[0.0, 0.0, 8.0], [0.0, 0.0, 0.0]]), &camera())
            .unwrap();

        // Sorted farthest first.
        assert!(circles[0].depth > circles[1].depth);
        assert!(circles[1].radius > circles[0].radius);
    }

    #[test]
    fn test_culls_out_of_frustum() {
        let circles = VectorProjector::new()
            .project(
                &cloud(&[
                    [0.0, 0.0, 20.0],   // behind the eye
                    [0.0, 0.0, -200.0], // beyond far plane
                    [50.0, 0.0, 0.0],   // off to the side
                    [0.0, 0.0, 0.0],    // visible
                ]),
                &camera(),
            )
            .unwrap();

        assert_eq!(circles.len(), 1);
    }
}
