//! # Pipeline Configuration
//!
//! All tuning values live in TOML files, loaded once at startup by the
//! host and validated at the boundary. The hot path never re-checks them.
//!
//! ## Example
//!
//! ```toml
//! [projector]
//! sample_interval = 100.0
//! search_range = 1000.0
//!
//! [builder]
//! vertical_offset = 50.0
//! half_width = 50.0
//! extrusion_height = 200.0
//! area_class = "obstacle"
//! collision_profile = "BlockAll"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::nav::AreaClass;

/// Ground-projection options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Arc-length spacing between ground samples. Must be positive.
    pub sample_interval: f32,
    /// Vertical half-range of the ground probe, above and below the
    /// sampled point. Must be positive.
    pub search_range: f32,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            sample_interval: 100.0,
            search_range: 1000.0,
        }
    }
}

/// Mesh-segment and navigation-area options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Added to the vertical coordinate of every segment endpoint.
    pub vertical_offset: f32,
    /// Half-width of the navigation footprint on each side of the curve.
    /// Must be positive.
    pub half_width: f32,
    /// Height of the extruded ceiling quad above the ground quad.
    /// Must be positive.
    pub extrusion_height: f32,
    /// Classification tag stamped on every exported navigation area.
    pub area_class: AreaClass,
    /// Named collision profile handed to the mesh sink for every instance.
    pub collision_profile: String,
    /// Optional physical-material override handed to the mesh sink.
    pub physical_material: Option<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            vertical_offset: 50.0,
            half_width: 50.0,
            extrusion_height: 200.0,
            area_class: AreaClass::Obstacle,
            collision_profile: "BlockAll".to_string(),
            physical_material: None,
        }
    }
}

/// Top-level configuration: one section per pipeline stage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CausewayConfig {
    /// Ground-projection options.
    pub projector: ProjectorConfig,
    /// Mesh-segment and navigation-area options.
    pub builder: BuilderConfig,
}

impl CausewayConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::NonPositive`] for out-of-range options.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, plus
    /// everything [`CausewayConfig::from_toml_str`] can return.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Rejects option values the pipeline is not defined for.
    ///
    /// Zero or negative lengths are a caller error, caught here once so
    /// rebuild code can assume them positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("projector.sample_interval", self.projector.sample_interval),
            ("projector.search_range", self.projector.search_range),
            ("builder.half_width", self.builder.half_width),
            ("builder.extrusion_height", self.builder.extrusion_height),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}
