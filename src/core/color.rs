//! Color utilities for particle synthesis and export.
//!
//! All particle colors are stored as normalized RGB in `[0, 1]`. They are
//! only quantized back to 8-bit at the export boundary (PLY / SVG).
//!
//! ## Luminance
//!
//! Brightness uses the ITU-R BT.601 luma weights:
//!
//! `L = 0.299 R + 0.587 G + 0.114 B`
//!
//! The same value drives both the depth displacement and the saturation
//! boost, so the weights must not change.

use nalgebra::Vector3;

/// BT.601 luma weights (R, G, B).
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Convert an 8-bit channel (0-255) to a normalized f32 (0.0-1.0).
pub fn u8_to_unit(u: u8) -> f32 {
    u as f32 / 255.0
}

/// Quantize a normalized channel to 8-bit by flooring `c * 255`.
///
/// Input is clamped to `[0, 1]` first, so out-of-range values saturate.
///
/// # Example
/// ```
/// use nanopixel_rs::core::color::unit_to_u8;
///
/// assert_eq!(unit_to_u8(1.0), 255);
/// assert_eq!(unit_to_u8(0.5), 127);
/// ```
pub fn unit_to_u8(c: f32) -> u8 {
    if !c.is_finite() {
        return 0;
    }
    (c.clamp(0.0, 1.0) * 255.0).floor() as u8
}

/// Perceptual brightness of a normalized RGB color.
pub fn luminance(rgb: &Vector3<f32>) -> f32 {
    LUMA_WEIGHTS[0] * rgb.x + LUMA_WEIGHTS[1] * rgb.y + LUMA_WEIGHTS[2] * rgb.z
}

/// Push each channel away from (or toward) the luminance of the color.
///
/// `c' = L + (c - L) * saturation`, evaluated as `c * s + L * (1 - s)` so that
/// `s = 1` returns the input bit-for-bit and `s = 0` returns exactly `L`.
/// Each channel is clamped to `[0, 1]` independently.
pub fn saturate(rgb: &Vector3<f32>, luminance: f32, saturation: f32) -> Vector3<f32> {
    rgb.map(|c| (c * saturation + luminance * (1.0 - saturation)).clamp(0.0, 1.0))
}

/// Quantize a normalized color to `[r, g, b]` bytes.
pub fn to_rgb8(rgb: &Vector3<f32>) -> [u8; 3] {
    [unit_to_u8(rgb.x), unit_to_u8(rgb.y), unit_to_u8(rgb.z)]
}
