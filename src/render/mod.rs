//! Projection of point clouds back into 2D.
//!
//! Currently only vector output: depth-sorted screen-space circles.

mod vector;

pub use vector::{ScreenCircle, VectorProjector};
