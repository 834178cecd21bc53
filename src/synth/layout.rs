//! Horizontal layout of several images in a shared world space.
//!
//! Images are placed left to right with a fixed gap, and the whole row is
//! centered on x = 0:
//!
//! ```text
//!  -total/2                                        +total/2
//!     |  img 0  | gap |    img 1    | gap | img 2  |
//!          ^                 ^                 ^
//!      offset 0          offset 1          offset 2
//! ```

/// Resolved placement of one image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageLayout {
    /// Display width after downscaling (pixels / world units)
    pub width: u32,

    /// Display height after downscaling
    pub height: u32,

    /// World x of the image center
    pub x_offset: f32,
}

impl ImageLayout {
    /// Center of the image in its own pixel grid.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Placement of every image in a row, plus the row footprint.
#[derive(Clone, Debug, PartialEq)]
pub struct RowLayout {
    pub images: Vec<ImageLayout>,
    pub total_width: f32,
    pub max_height: f32,
}

impl RowLayout {
    /// Lay out images of the given display sizes with `gap` between neighbors.
    pub fn compute(sizes: &[(u32, u32)], gap: f32) -> Self {
        let mut total_width: f32 = sizes.iter().map(|&(w, _)| w as f32).sum();
        if sizes.len() > 1 {
            total_width += (sizes.len() - 1) as f32 * gap;
        }
        let max_height = sizes.iter().map(|&(_, h)| h).max().unwrap_or(0) as f32;

        let mut cursor = -total_width / 2.0;
        let images = sizes
            .iter()
            .map(|&(width, height)| {
                let x_offset = cursor + width as f32 / 2.0;
                cursor += width as f32 + gap;
                ImageLayout {
                    width,
                    height,
                    x_offset,
                }
            })
            .collect();

        Self {
            images,
            total_width,
            max_height,
        }
    }
}

/// Size an image is sampled at.
///
/// If either side exceeds `max_dimension`, the image is scaled uniformly so
/// its longer side is exactly `max_dimension`; the shorter side is floored.
/// Both sides are clamped to at least 1.
pub fn display_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let (mut w, mut h) = (width, height);
    if w > max_dimension || h > max_dimension {
        // Integer math keeps the floor exact; float ratios can land one short.
        let max = max_dimension as u64;
        if w >= h {
            h = (h as u64 * max / w as u64) as u32;
            w = max_dimension;
        } else {
            w = (w as u64 * max / h as u64) as u32;
            h = max_dimension;
        }
    }
    (w.max(1), h.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_small_images_untouched() {
        assert_eq!(display_size(320, 200, 600), (320, 200));
        assert_eq!(display_size(600, 600, 600), (600, 600));
    }

    #[test]
    fn test_downscale_long_side() {
        assert_eq!(display_size(1200, 800, 600), (600, 400));
        assert_eq!(display_size(800, 1200, 600), (400, 600));
        assert_eq!(display_size(1234, 617, 600), (600, 300));
    }

    #[test]
    fn test_minimum_one_pixel() {
        assert_eq!(display_size(10_000, 1, 600), (600, 1));
        assert_eq!(display_size(0, 0, 600), (1, 1));
    }

    #[test]
    fn test_single_image_centered() {
        let row = RowLayout::compute(&[(100, 50)], 60.0);
        assert_relative_eq!(row.total_width, 100.0);
        assert_relative_eq!(row.max_height, 50.0);
        assert_relative_eq!(row.images[0].x_offset, 0.0);
    }

    #[test]
    fn test_row_with_gaps() {
        let row = RowLayout::compute(&[(100, 50), (200, 80)], 60.0);
        assert_relative_eq!(row.total_width, 360.0);
        assert_relative_eq!(row.max_height, 80.0);

        // left edge at -180, first center at -130
        assert_relative_eq!(row.images[0].x_offset, -130.0);
        // second starts at -180 + 100 + 60 = -20, center at 80
        assert_relative_eq!(row.images[1].x_offset, 80.0);
    }

    #[test]
    fn test_empty_row() {
        let row = RowLayout::compute(&[], 60.0);
        assert!(row.images.is_empty());
        assert_eq!(row.total_width, 0.0);
        assert_eq!(row.max_height, 0.0);
    }
}
