//! # Sandbox Configuration
//!
//! Tunable constants for placement, collision and drag correction. Every
//! field has a default, so an empty TOML document is a valid configuration:
//!
//! ```toml
//! floor_height = 0.0
//!
//! [placement]
//! padding = 0.05
//! spiral_step = 1.0
//! max_rings = 12
//! duplicate_offset = [2.0, 0.0, 2.0]
//!
//! [drag]
//! min_scale = 0.1
//! max_scale = 10.0
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::math::Vec3;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Height of the ground plane every item rests on
    pub floor_height: f64,
    pub placement: PlacementConfig,
    pub drag: DragConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            floor_height: 0.0,
            placement: PlacementConfig::default(),
            drag: DragConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Margin added to every side of a bounding box before overlap tests
    pub padding: f64,
    /// Distance between neighbouring spiral cells
    pub spiral_step: f64,
    /// Rings searched before accepting an overlapping candidate
    pub max_rings: u32,
    /// Offset applied to a duplicate before collision resolution
    pub duplicate_offset: [f64; 3],
    /// Extra clearance when pushing a raycast seed off a hit surface
    pub surface_offset: f64,
    /// Seed used when no look ray is available or it hits nothing
    pub default_seed: [f64; 3],
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            padding: 0.05,
            spiral_step: 1.0,
            max_rings: 12,
            duplicate_offset: [2.0, 0.0, 2.0],
            surface_offset: 0.01,
            default_seed: [0.0, 0.0, 0.0],
        }
    }
}

impl PlacementConfig {
    pub fn duplicate_offset(&self) -> Vec3 {
        Vec3::from(self.duplicate_offset)
    }

    pub fn default_seed(&self) -> Vec3 {
        Vec3::from(self.default_seed)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}

impl SandboxConfig {
    /// Reads and validates a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SandboxConfig = toml::from_str(content)?;
        config.validate()?;
        log::debug!("Loaded sandbox config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.placement;
        let d = &self.drag;

        if !(p.padding >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "placement.padding must be non-negative, got {}",
                p.padding
            )));
        }
        if !(p.spiral_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "placement.spiral_step must be positive, got {}",
                p.spiral_step
            )));
        }
        if p.max_rings == 0 {
            return Err(ConfigError::Invalid(
                "placement.max_rings must be at least 1".to_string(),
            ));
        }
        if !(d.min_scale > 0.0) || d.min_scale > d.max_scale {
            return Err(ConfigError::Invalid(format!(
                "drag scale range [{}, {}] is empty or non-positive",
                d.min_scale, d.max_scale
            )));
        }
        Ok(())
    }
}
