//! Core data structures and mathematical operations.
//!
//! This module contains the fundamental types used throughout the system:
//! - `PointCloud`: index-aligned positions and colors
//! - `Camera` / `ProjectionContext`: world to NDC projection
//! - Color utilities: luminance, saturation, quantization
//!
//! All types here are "pure data" - no I/O, no sampling logic.

mod camera;
mod cloud;
pub mod color;

// Re-export public types
pub use camera::{Camera, MatrixProjection, ProjectionContext};
pub use cloud::PointCloud;
pub use color::{luminance, saturate};
