use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::ProjectError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// largest raw lon/lat step (degrees) allowed between two drawn vertices
    pub interpolation_threshold_deg: f64,
    pub max_interpolation_passes: usize,

    pub default_line_width: f64,
    pub default_fog: bool,
    pub default_transparent: bool,

    // hue = base + u * spread - (shift if coin flip)
    pub hue_base: f64,
    pub hue_spread: f64,
    pub hue_shift: f64,
    pub hue_shift_probability: f64,

    pub max_dash_rate: f64,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            interpolation_threshold_deg: 5.0,
            max_interpolation_passes: 20,
            default_line_width: 2.0,
            default_fog: true,
            default_transparent: false,
            hue_base: 0.3,
            hue_spread: 0.2,
            hue_shift: 0.3,
            hue_shift_probability: 0.5,
            max_dash_rate: 0.0002,
        }
    }
}

impl ProjectorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ProjectError> {
        let config: ProjectorConfig = serde_json::from_str(json)
            .map_err(|e| ProjectError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading projector config {}", path.display()))?;
        let config = Self::from_json_str(&json)
            .with_context(|| format!("parsing projector config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProjectError> {
        if !self.interpolation_threshold_deg.is_finite() || self.interpolation_threshold_deg <= 0.0
        {
            return Err(ProjectError::InvalidConfig(format!(
                "interpolation_threshold_deg must be finite and positive, got {}",
                self.interpolation_threshold_deg
            )));
        }
        if self.max_interpolation_passes == 0 {
            return Err(ProjectError::InvalidConfig(
                "max_interpolation_passes must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.hue_shift_probability) {
            return Err(ProjectError::InvalidConfig(format!(
                "hue_shift_probability must be within [0, 1], got {}",
                self.hue_shift_probability
            )));
        }
        if !self.max_dash_rate.is_finite() || self.max_dash_rate < 0.0 {
            return Err(ProjectError::InvalidConfig(format!(
                "max_dash_rate must be finite and non-negative, got {}",
                self.max_dash_rate
            )));
        }
        Ok(())
    }
}
