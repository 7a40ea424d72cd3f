use serde::Deserialize;

use crate::error::MapError;

fn default_layer_distance() -> f64 {
    16.0
}
fn default_true() -> bool {
    true
}
fn one() -> u32 {
    1
}
fn default_ellipse_segments() -> usize {
    16
}

/// Knobs for turning a map into draw commands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    /// Depth band each layer's tiles and objects are spread over.
    #[serde(default = "default_layer_distance")]
    pub layer_distance: f64,
    /// Extra depth left empty between consecutive layer bands.
    #[serde(default)]
    pub layer_gap: f64,
    /// When false, layers ignore their parallax factor and scroll with the camera.
    #[serde(default = "default_true")]
    pub parallax_enabled: bool,
    /// Tiles of padding around the visible rectangle when culling.
    #[serde(default = "one")]
    pub cull_margin: u32,
    /// Points used to approximate ellipse objects.
    #[serde(default = "default_ellipse_segments")]
    pub ellipse_segments: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            layer_distance: default_layer_distance(),
            layer_gap: 0.0,
            parallax_enabled: true,
            cull_margin: one(),
            ellipse_segments: default_ellipse_segments(),
        }
    }
}

impl RenderConfig {
    /// Reads a config from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if !self.layer_distance.is_finite() || self.layer_distance <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "layer_distance must be positive, got {}",
                self.layer_distance
            )));
        }
        if !self.layer_gap.is_finite() || self.layer_gap < 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "layer_gap must not be negative, got {}",
                self.layer_gap
            )));
        }
        if self.ellipse_segments < 3 {
            return Err(MapError::InvalidConfig(format!(
                "ellipse_segments must be at least 3, got {}",
                self.ellipse_segments
            )));
        }
        Ok(())
    }

    /// Depth at which layer slot `slot` starts.
    #[inline]
    pub fn slot_depth(&self, slot: usize) -> f64 {
        slot as f64 * (self.layer_distance + self.layer_gap)
    }
}
