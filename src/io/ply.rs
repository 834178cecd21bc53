//! PLY format export for point clouds.
//!
//! PLY (Polygon File Format) is the portable export: every particle becomes
//! one ASCII vertex line that downstream 3D tools (MeshLab, Blender, ...)
//! can open directly.
//!
//! ```text
//! ply
//! format ascii 1.0
//! element vertex <N>
//! property float x
//! property float y
//! property float z
//! property uchar red
//! property uchar green
//! property uchar blue
//! end_header
//! <x> <y> <z> <r> <g> <b>
//! ```
//!
//! Coordinates use 3 decimals with ties rounded away from zero, colors are
//! `floor(c * 255)`.

use super::fixed::to_fixed;
use crate::core::color::to_rgb8;
use crate::core::PointCloud;
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// File name the viewer uses when downloading a PLY export.
pub const DEFAULT_PLY_FILE_NAME: &str = "nanopixel_model.ply";

/// Write a point cloud as ASCII PLY.
///
/// Every point is written, in index order. A misaligned cloud is rejected
/// before anything reaches the writer.
pub fn write_ply<W: Write>(cloud: &PointCloud, mut writer: W) -> Result<()> {
    cloud.validate()?;

    // Write PLY header
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "element vertex {}", cloud.len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")?;
    writeln!(writer, "end_header")?;

    // Write vertex data
    for (position, color) in cloud.iter() {
        let [r, g, b] = to_rgb8(color);
        writeln!(
            writer,
            "{} {} {} {} {} {}",
            to_fixed(position.x, 3),
            to_fixed(position.y, 3),
            to_fixed(position.z, 3),
            r,
            g,
            b
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Export a point cloud to PLY bytes.
pub fn export_points(cloud: &PointCloud) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(200 + cloud.len() * 32);
    write_ply(cloud, &mut bytes)?;
    Ok(bytes)
}

/// Save a point cloud to a PLY file.
pub fn save_ply(cloud: &PointCloud, path: &Path) -> Result<()> {
    // Validate first so a malformed cloud never leaves an empty file behind.
    cloud.validate()?;
    let file = File::create(path)?;
    write_ply(cloud, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_single_point_body_line() {
        let cloud = PointCloud::from_parts(
            vec![Vector3::new(1.0, 2.0, 3.0)],
            vec![Vector3::new(1.0, 0.0, 0.0)],
            1.0,
            1.0,
        )
        .unwrap();

        let text = String::from_utf8(export_points(&cloud).unwrap()).unwrap();
        let body: Vec<&str> = text.split("end_header\n").nth(1).unwrap().lines().collect();
        assert_eq!(body, vec!["1.000 2.000 3.000 255 0 0"]);
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        let cloud = PointCloud::from_parts(
            vec![Vector3::new(-0.0, -0.0001, 0.0)],
            vec![Vector3::new(0.0, 0.0, 0.0)],
            1.0,
            1.0,
        )
        .unwrap();

        let text = String::from_utf8(export_points(&cloud).unwrap()).unwrap();
        assert!(text.ends_with("0.000 -0.000 0.000 0 0 0\n"));
    }

    #[test]
    fn test_decimal_ties_round_up() {
        let cloud = PointCloud::from_parts(
            vec![Vector3::new(12.0625, 0.0625, -0.1875)],
            vec![Vector3::new(1.0, 0.0, 0.0)],
            1.0,
            1.0,
        )
        .unwrap();

        let text = String::from_utf8(export_points(&cloud).unwrap()).unwrap();
        assert!(text.ends_with("end_header\n12.063 0.063 -0.188 255 0 0\n"));
    }

    #[test]
    fn test_malformed_cloud_writes_nothing() {
        let cloud = PointCloud {
            positions: vec![Vector3::zeros()],
            colors: vec![],
            width: 0.0,
            height: 0.0,
        };

        let mut out = Vec::new();
        assert!(write_ply(&cloud, &mut out).is_err());
        assert!(out.is_empty());
    }
}
