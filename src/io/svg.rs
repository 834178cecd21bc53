//! SVG export of projected particles.

use super::fixed::to_fixed;
use crate::core::{PointCloud, ProjectionContext};
use crate::error::Result;
use crate::render::{ScreenCircle, VectorProjector};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// File name the viewer uses when downloading an SVG export.
pub const DEFAULT_SVG_FILE_NAME: &str = "nanopixel_view.svg";

/// Write circles (already sorted farthest-first) as an SVG document.
pub fn write_svg<W: Write>(
    circles: &[ScreenCircle],
    width: u32,
    height: u32,
    mut writer: W,
) -> Result<()> {
    write!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" style="background-color:black;">"#,
        width, height
    )?;

    for c in circles {
        write!(
            writer,
            r#"<circle cx="{}" cy="{}" r="{}" fill="rgb({},{},{})" />"#,
            to_fixed(c.x, 1),
            to_fixed(c.y, 1),
            to_fixed(c.radius, 1),
            c.color[0],
            c.color[1],
            c.color[2]
        )?;
    }

    write!(writer, "</svg>")?;
    writer.flush()?;
    Ok(())
}

/// Project a cloud and render the result as SVG bytes.
pub fn export_svg<P: ProjectionContext + ?Sized>(
    cloud: &PointCloud,
    camera: &P,
    projector: &VectorProjector,
) -> Result<Vec<u8>> {
    let circles = projector.project(cloud, camera)?;
    let (width, height) = camera.viewport();

    let mut bytes = Vec::with_capacity(128 + circles.len() * 64);
    write_svg(&circles, width, height, &mut bytes)?;
    Ok(bytes)
}

/// Project a cloud and save the SVG to `path`.
pub fn save_svg<P: ProjectionContext + ?Sized>(
    cloud: &PointCloud,
    camera: &P,
    projector: &VectorProjector,
    path: &Path,
) -> Result<()> {
    let circles = projector.project(cloud, camera)?;
    let (width, height) = camera.viewport();

    let file = File::create(path)?;
    write_svg(&circles, width, height, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_structure() {
        let circles = vec![ScreenCircle {
            x: 10.04,
            y: 20.06,
            depth: 0.5,
            color: [255, 128, 0],
            radius: 1.5,
        }];

        let mut out = Vec::new();
        write_svg(&circles, 640, 480, &mut out).unwrap();
        let svg = String::from_utf8(out).unwrap();

        assert_eq!(
            svg,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 640 480" style="background-color:black;">"#,
                r#"<circle cx="10.0" cy="20.1" r="1.5" fill="rgb(255,128,0)" />"#,
                "</svg>"
            )
        );
    }

    #[test]
    fn test_coordinate_ties_round_up() {
        let circles = vec![ScreenCircle {
            x: 2.25,
            y: 0.75,
            depth: 0.0,
            color: [1, 2, 3],
            radius: 0.25,
        }];

        let mut out = Vec::new();
        write_svg(&circles, 4, 4, &mut out).unwrap();
        let svg = String::from_utf8(out).unwrap();

        assert!(svg.contains(r#"<circle cx="2.3" cy="0.8" r="0.3" fill="rgb(1,2,3)" />"#));
    }

    #[test]
    fn test_empty_document() {
        let mut out = Vec::new();
        write_svg(&[], 2, 3, &mut out).unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert!(svg.contains(r#"viewBox="0 0 2 3""#));
        assert!(!svg.contains("<circle"));
    }
}
