//! Camera model (perspective look-at camera) and the projection seam.
//!
//! Cameras are used to:
//! - Map world-space particles to normalized device coordinates (NDC)
//! - Report the viewport size used to turn NDC into pixels
//!
//! NDC follows the OpenGL convention: visible content lies in `[-1, 1]` on
//! every axis, `z = -1` on the near plane and `z = 1` on the far plane.

use crate::error::Result;
use nalgebra::{Matrix4, Perspective3, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Anything that can map a world point into NDC for a fixed-size viewport.
pub trait ProjectionContext {
    /// Project a world-space point to NDC.
    ///
    /// Points that cannot be projected (behind the eye, degenerate `w`)
    /// must come back with a non-finite or `>= 1` depth so callers cull them.
    fn project_ndc(&self, point_world: &Vector3<f32>) -> Vector3<f32>;

    /// Output size in pixels `(width, height)`.
    fn viewport(&self) -> (u32, u32);
}

/// Homogeneous divide, rejecting points with `w <= 0` (behind the eye).
fn clip_to_ndc(clip: Vector4<f32>) -> Vector3<f32> {
    if clip.w <= f32::EPSILON || !clip.w.is_finite() {
        return Vector3::new(0.0, 0.0, f32::INFINITY);
    }
    Vector3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w)
}

/// A perspective camera looking from `position` toward `target`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position in world coordinates
    pub position: Vector3<f32>,

    /// Point the camera looks at
    pub target: Vector3<f32>,

    /// Up direction (need not be orthogonal to the view direction)
    pub up: Vector3<f32>,

    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,

    /// Near clip distance
    pub near: f32,

    /// Far clip distance
    pub far: f32,

    /// Viewport width (pixels)
    pub width: u32,

    /// Viewport height (pixels)
    pub height: u32,
}

impl Camera {
    /// Distance of the viewer's default camera from the origin.
    pub const DEFAULT_DISTANCE: f32 = 600.0;
    pub const DEFAULT_FOV_Y_DEGREES: f32 = 50.0;
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 2000.0;

    /// Create a new camera with given parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Vector3<f32>,
        target: Vector3<f32>,
        up: Vector3<f32>,
        fov_y_degrees: f32,
        near: f32,
        far: f32,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov_y_degrees,
            near,
            far,
            width,
            height,
        }
    }

    /// The viewer's initial camera: on +Z at 600 units, looking at the
    /// origin, 50° vertical fov, near 0.1, far 2000.
    pub fn viewer_default(width: u32, height: u32) -> Self {
        Self::new(
            Vector3::new(0.0, 0.0, Self::DEFAULT_DISTANCE),
            Vector3::zeros(),
            Vector3::y(),
            Self::DEFAULT_FOV_Y_DEGREES,
            Self::DEFAULT_NEAR,
            Self::DEFAULT_FAR,
            width,
            height,
        )
    }

    /// Load a camera from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Viewport aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Get the view matrix (world to camera transform as 4×4 matrix).
    ///
    /// Right-handed: the camera looks down its local -Z axis.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.target),
            &self.up,
        )
    }

    /// Get the projection matrix (camera to clip space as 4×4 matrix).
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(
            self.aspect(),
            self.fov_y_degrees.to_radians(),
            self.near,
            self.far,
        )
        .to_homogeneous()
    }

    /// Combined world to clip transform.
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Transform a point from world coordinates to camera coordinates.
    pub fn world_to_camera(&self, point_world: &Vector3<f32>) -> Vector3<f32> {
        self.view_matrix().transform_point(&Point3::from(*point_world)).coords
    }

    /// Get the camera center in world coordinates.
    pub fn camera_center(&self) -> Vector3<f32> {
        self.position
    }
}

impl ProjectionContext for Camera {
    fn project_ndc(&self, point_world: &Vector3<f32>) -> Vector3<f32> {
        clip_to_ndc(self.view_projection() * point_world.push(1.0))
    }

    fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// A projection given directly as a view-projection matrix.
///
/// Useful when the caller already owns a renderer camera and only hands over
/// its combined matrix and canvas size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatrixProjection {
    pub view_projection: Matrix4<f32>,
    pub width: u32,
    pub height: u32,
}

impl MatrixProjection {
    pub fn new(view_projection: Matrix4<f32>, width: u32, height: u32) -> Self {
        Self {
            view_projection,
            width,
            height,
        }
    }
}

impl From<&Camera> for MatrixProjection {
    fn from(camera: &Camera) -> Self {
        Self::new(camera.view_projection(), camera.width, camera.height)
    }
}

impl ProjectionContext for MatrixProjection {
    fn project_ndc(&self, point_world: &Vector3<f32>) -> Vector3<f32> {
        clip_to_ndc(self.view_projection * point_world.push(1.0))
    }

    fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
