//! I/O operations for loading images and saving results.
//!
//! This module handles every boundary of the pipeline:
//! - Image sources (URL, data URI, file, bytes) and concurrent loading
//! - PLY format (portable point export)
//! - SVG format (projected vector export)

mod fixed;
mod loader;
mod ply;
mod source;
mod svg;

// Re-export public types and functions
pub use loader::{load_all, load_image};
pub use ply::{export_points, save_ply, write_ply, DEFAULT_PLY_FILE_NAME};
pub use source::ImageSource;
pub use svg::{export_svg, save_svg, write_svg, DEFAULT_SVG_FILE_NAME};
