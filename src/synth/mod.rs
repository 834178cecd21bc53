//! Particle synthesis: images to a unified point cloud.
//!
//! Pipeline:
//! 1. Load every source concurrently (fail-fast)
//! 2. Cap each image at `max_dimension` on its longer side
//! 3. Lay the images out in a row centered on x = 0
//! 4. Resample each image once to its display size
//! 5. Sample pixels at stride `step` into positions + colors
//! 6. Concatenate in source order
//!
//! Randomness (the depth jitter) comes from the caller's generator, so a
//! seeded `StdRng` makes the whole pipeline reproducible.

mod config;
mod layout;
mod sampler;

pub use config::{ParticleOptions, SamplingConfig, SettingsFile};
pub use layout::{display_size, ImageLayout, RowLayout};

use crate::core::PointCloud;
use crate::error::{Error, Result};
use crate::io::{load_all, ImageSource};
use image::RgbaImage;
use rand::Rng;
use rayon::prelude::*;

/// Load `sources` and synthesize a point cloud from them.
///
/// Fails with `EmptyInput` when no sources are given, `InvalidConfig` before
/// any loading if `config` is out of range, and `ImageLoad` for the first
/// source that cannot be fetched or decoded.
pub async fn synthesize<R: Rng + ?Sized>(
    sources: Vec<ImageSource>,
    config: &SamplingConfig,
    rng: &mut R,
) -> Result<PointCloud> {
    if sources.is_empty() {
        return Err(Error::EmptyInput);
    }
    config.validate()?;

    let images = load_all(sources).await?;
    synthesize_decoded(&images, config, rng)
}

/// Synthesize a point cloud from already-decoded images (steps 2-6).
pub fn synthesize_decoded<R: Rng + ?Sized>(
    images: &[RgbaImage],
    config: &SamplingConfig,
    rng: &mut R,
) -> Result<PointCloud> {
    if images.is_empty() {
        return Err(Error::EmptyInput);
    }
    config.validate()?;

    let sizes: Vec<(u32, u32)> = images
        .iter()
        .map(|img| display_size(img.width(), img.height(), config.max_dimension))
        .collect();
    let row = RowLayout::compute(&sizes, config.gap);

    // One seed per image, drawn in source order, before any parallel work.
    let seeds: Vec<u64> = images.iter().map(|_| rng.gen()).collect();

    let per_image: Vec<sampler::ImageSamples> = images
        .par_iter()
        .zip(row.images.par_iter())
        .zip(seeds.par_iter())
        .map(|((image, layout), &seed)| {
            let resampled = sampler::resample(image, layout);
            sampler::sample_image(&resampled, layout, config, seed)
        })
        .collect();

    let count: usize = per_image.iter().map(|s| s.positions.len()).sum();
    let mut cloud = PointCloud::empty(row.total_width, row.max_height);
    cloud.positions.reserve(count);
    cloud.colors.reserve(count);

    for (index, (samples, layout)) in per_image.into_iter().zip(&row.images).enumerate() {
        log::debug!(
            "Image {}: {}x{} -> {}x{} at x={:.1}, {} particles",
            index,
            images[index].width(),
            images[index].height(),
            layout.width,
            layout.height,
            layout.x_offset,
            samples.positions.len()
        );
        cloud.positions.extend(samples.positions);
        cloud.colors.extend(samples.colors);
    }

    log::info!(
        "Synthesized {} particles from {} image(s), footprint {:.0}x{:.0}",
        cloud.len(),
        images.len(),
        cloud.width,
        cloud.height
    );

    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_input() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = synthesize_decoded(&[], &SamplingConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = SamplingConfig {
            step: 0,
            ..Default::default()
        };
        let err = synthesize_decoded(&[RgbaImage::new(2, 2)], &config, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_images_concatenated_in_source_order() {
        let red = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let blue = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        let config = SamplingConfig {
            step: 1,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);

        let cloud = synthesize_decoded(&[red, blue], &config, &mut rng).unwrap();

        assert_eq!(cloud.len(), 32);
        assert!(cloud.colors[..16].iter().all(|c| c.x == 1.0 && c.z == 0.0));
        assert!(cloud.colors[16..].iter().all(|c| c.x == 0.0 && c.z == 1.0));
        // Left image sits left of the right one.
        assert!(cloud.positions[15].x < cloud.positions[16].x);
        assert_eq!(cloud.width, 4.0 + 4.0 + SamplingConfig::DEFAULT_GAP);
        assert_eq!(cloud.height, 4.0);
    }
}
