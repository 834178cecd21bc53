//! Sampling configuration and the viewer-facing options record.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Numeric parameters for one synthesis call.
///
/// Defaults reproduce the viewer's reference behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    /// Pixel stride in both axes (≥ 1)
    pub step: u32,

    /// Scales luminance into Z displacement
    pub depth_multiplier: f32,

    /// Saturation boost around luminance (≥ 0, 1 = unchanged)
    pub saturation: f32,

    /// Pixels with alpha strictly below this are dropped
    pub alpha_threshold: u8,

    /// Longest allowed side after downscaling
    pub max_dimension: u32,

    /// Horizontal gap between adjacent images (world units)
    pub gap: f32,

    /// Half-width of the uniform Z jitter, noise is drawn from `[-j, j)`
    pub depth_jitter: f32,
}

impl SamplingConfig {
    pub const DEFAULT_MAX_DIMENSION: u32 = 600;
    pub const DEFAULT_GAP: f32 = 60.0;
    pub const DEFAULT_DEPTH_JITTER: f32 = 2.5;
    pub const DEFAULT_ALPHA_THRESHOLD: u8 = 10;

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(Error::InvalidConfig("step must be at least 1".to_string()));
        }
        if !self.depth_multiplier.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "depth multiplier must be finite, got {}",
                self.depth_multiplier
            )));
        }
        if !self.saturation.is_finite() || self.saturation < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "saturation must be a finite value >= 0, got {}",
                self.saturation
            )));
        }
        if self.max_dimension == 0 {
            return Err(Error::InvalidConfig(
                "max dimension must be at least 1".to_string(),
            ));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "gap must be a finite value >= 0, got {}",
                self.gap
            )));
        }
        if !self.depth_jitter.is_finite() || self.depth_jitter < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "depth jitter must be a finite value >= 0, got {}",
                self.depth_jitter
            )));
        }
        Ok(())
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            step: 4,
            depth_multiplier: 50.0,
            saturation: 1.0,
            alpha_threshold: Self::DEFAULT_ALPHA_THRESHOLD,
            max_dimension: Self::DEFAULT_MAX_DIMENSION,
            gap: Self::DEFAULT_GAP,
            depth_jitter: Self::DEFAULT_DEPTH_JITTER,
        }
    }
}

/// The option record the viewer hands to the core.
///
/// `size` only matters to whoever draws the particles; it is carried through
/// untouched and never read by synthesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleOptions {
    /// Particle size for the consumer's renderer
    pub size: f32,

    /// Sampling stride (smaller is denser)
    pub density: u32,

    /// Z-axis displacement strength
    pub depth: f32,

    /// Color intensity booster
    pub saturation: f32,

    /// Alpha cut-off (0-255)
    pub threshold: u8,
}

impl ParticleOptions {
    /// Map onto a sampling configuration, keeping the remaining fields of `base`.
    pub fn apply_to(&self, base: SamplingConfig) -> SamplingConfig {
        SamplingConfig {
            step: self.density,
            depth_multiplier: self.depth,
            saturation: self.saturation,
            alpha_threshold: self.threshold,
            ..base
        }
    }
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            size: 1.5,
            density: 3,
            depth: 150.0,
            saturation: 1.2,
            threshold: SamplingConfig::DEFAULT_ALPHA_THRESHOLD,
        }
    }
}

impl From<&ParticleOptions> for SamplingConfig {
    fn from(options: &ParticleOptions) -> Self {
        options.apply_to(SamplingConfig::default())
    }
}

/// A settings file: either the viewer's option record or a full sampling
/// configuration, told apart by their field names.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingsFile {
    Options(ParticleOptions),
    Sampling(SamplingConfig),
}

impl SettingsFile {
    /// Parse settings JSON. Keys from both shapes, or unknown keys, are rejected.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        SettingsFile::deserialize(value).map_err(|_| {
            Error::InvalidConfig(
                "settings must use either the particle option fields \
                 (size, density, depth, saturation, threshold) or the sampling fields \
                 (step, depth_multiplier, saturation, alpha_threshold, max_dimension, \
                 gap, depth_jitter)"
                    .to_string(),
            )
        })
    }

    /// Load settings from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Resolve to a sampling configuration. Option records fill the fields
    /// they do not carry from `SamplingConfig::default()`.
    pub fn into_config(self) -> SamplingConfig {
        match self {
            SettingsFile::Options(options) => SamplingConfig::from(&options),
            SettingsFile::Sampling(config) => config,
        }
    }
}
