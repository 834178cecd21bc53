//! Per-pixel sampling: turns one resampled image into particles.
//!
//! For every visited pixel `(px, py)` (stride `step` in both axes):
//!
//! ```text
//! L = 0.299 R + 0.587 G + 0.114 B
//! x = (px - w/2) + x_offset
//! y = h/2 - py                      (image Y grows down, world Y grows up)
//! z = (L - 0.5) * depth_multiplier + U[-jitter, jitter)
//! c = clamp(L + (c - L) * saturation, 0, 1)
//! ```
//!
//! Scanlines are independent, so they are sampled in parallel. Each scanline
//! gets its own RNG derived from the image seed and the row index, which keeps
//! the output reproducible regardless of how rayon schedules the work.

use super::config::SamplingConfig;
use super::layout::ImageLayout;
use crate::core::color::{luminance, saturate, u8_to_unit};
use image::imageops::{self, FilterType};
use image::{Rgba, Rgba32FImage, RgbaImage};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::borrow::Cow;

/// Particles produced from one image (index-aligned).
#[derive(Debug, Default)]
pub(crate) struct ImageSamples {
    pub positions: Vec<Vector3<f32>>,
    pub colors: Vec<Vector3<f32>>,
}

/// Resample `image` to its display size. Borrowed when no resize is needed.
///
/// Images with any transparency are filtered in premultiplied alpha, so
/// fully transparent pixels contribute no color to their neighbors.
pub(crate) fn resample<'a>(image: &'a RgbaImage, layout: &ImageLayout) -> Cow<'a, RgbaImage> {
    if image.dimensions() == (layout.width, layout.height) {
        return Cow::Borrowed(image);
    }

    if image.pixels().all(|p| p[3] == u8::MAX) {
        Cow::Owned(imageops::resize(
            image,
            layout.width,
            layout.height,
            FilterType::Triangle,
        ))
    } else {
        Cow::Owned(resize_premultiplied(image, layout.width, layout.height))
    }
}

fn resize_premultiplied(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premultiplied = Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0.map(u8_to_unit);
        Rgba([r * a, g * a, b * a, a])
    });

    let resized = imageops::resize(&premultiplied, width, height, FilterType::Triangle);

    RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0;
        if a <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let straight = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([
            straight(r),
            straight(g),
            straight(b),
            (a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ])
    })
}

/// Uniform noise in `[-amplitude, amplitude)`.
fn depth_noise<R: Rng + ?Sized>(rng: &mut R, amplitude: f32) -> f32 {
    if amplitude == 0.0 {
        return 0.0;
    }
    (rng.gen::<f32>() * 2.0 - 1.0) * amplitude
}

fn row_seed(image_seed: u64, row: u32) -> u64 {
    image_seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Sample one image that has already been resampled to `layout`'s size.
pub(crate) fn sample_image(
    image: &RgbaImage,
    layout: &ImageLayout,
    config: &SamplingConfig,
    seed: u64,
) -> ImageSamples {
    let step = config.step.max(1);
    let (cx, cy) = layout.center();
    let width = image.width().min(layout.width);
    let height = image.height().min(layout.height);

    let rows: Vec<ImageSamples> = (0..height)
        .step_by(step as usize)
        .collect::<Vec<u32>>()
        .into_par_iter()
        .map(|py| {
            let mut rng = StdRng::seed_from_u64(row_seed(seed, py));
            let mut row = ImageSamples::default();

            for px in (0..width).step_by(step as usize) {
                let [r, g, b, a] = image.get_pixel(px, py).0;

                // Transparent background removal
                if a < config.alpha_threshold {
                    continue;
                }

                let rgb = Vector3::new(u8_to_unit(r), u8_to_unit(g), u8_to_unit(b));
                let brightness = luminance(&rgb);

                let x = (px as f32 - cx) + layout.x_offset;
                let y = cy - py as f32;
                let z = (brightness - 0.5) * config.depth_multiplier
                    + depth_noise(&mut rng, config.depth_jitter);

                row.positions.push(Vector3::new(x, y, z));
                row.colors.push(saturate(&rgb, brightness, config.saturation));
            }

            row
        })
        .collect();

    let count = rows.iter().map(|r| r.positions.len()).sum();
    let mut samples = ImageSamples {
        positions: Vec::with_capacity(count),
        colors: Vec::with_capacity(count),
    };
    for row in rows {
        samples.positions.extend(row.positions);
        samples.colors.extend(row.colors);
    }
    samples
}
