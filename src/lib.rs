//! # nanopixel-rs: Images to 3D particle fields
//!
//! This crate turns one or more raster images into a colored 3D point cloud
//! (a "particle field") and projects that cloud back into 2D vector output.
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - `core`: Fundamental data structures (point cloud, camera, color math)
//! - `synth`: Particle synthesis (layout, per-pixel sampling, depth synthesis)
//! - `io`: Image sources and loading, PLY export, SVG export
//! - `render`: Projection into depth-sorted screen-space circles
//!
//! ## Pipeline
//!
//! ```text
//! images --synth--> PointCloud --io::write_ply--> .ply
//!                       |
//!                       +--render::VectorProjector--> circles --io::write_svg--> .svg
//! ```
//!
//! Each call is a pure function of its inputs and the caller's random source;
//! no state is shared between calls.

// Core data structures and math
pub mod core;

// Error type shared by every stage
pub mod error;

// Image loading, PLY and SVG export
pub mod io;

// Projection back into 2D
pub mod render;

// Image to particle synthesis
pub mod synth;

// Re-export commonly used types at crate root for convenience
pub use crate::core::{Camera, PointCloud, ProjectionContext};
pub use error::{Error, Result};
pub use io::ImageSource;
pub use synth::{
    synthesize, synthesize_decoded, ParticleOptions, SamplingConfig, SettingsFile,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
