//! View configuration: per-part records, transition speed and diagnostics.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registry::ImageRef;
use crate::value::Vec3;

pub const DEFAULT_TRANSITION_SPEED: f32 = 2.0;

fn default_transition_speed() -> f32 {
    DEFAULT_TRANSITION_SPEED
}

/// Rejected-operation reporting. Off in release builds unless switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsCfg {
    pub enabled: bool,
}

impl Default for DiagnosticsCfg {
    fn default() -> Self {
        DiagnosticsCfg {
            enabled: cfg!(debug_assertions),
        }
    }
}

/// One part record as authored on the host side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartConfig {
    /// Host name of the transform this part drives.
    pub transform: String,
    /// World position of the transform at setup time.
    #[serde(default)]
    pub position: Vec3,
    /// Exploded position, relative to the view origin.
    pub final_position: Vec3,
    /// Extra offset applied when the part is selected.
    #[serde(default)]
    pub offset: Vec3,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// Configuration for one exploded view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    /// Transitions last `1 / transition_speed` seconds.
    #[serde(default = "default_transition_speed")]
    pub transition_speed: f32,
    #[serde(default)]
    pub origin: Vec3,
    pub parts: Vec<PartConfig>,
    /// Indicator slots on the display surface; defaults to the part count.
    #[serde(default)]
    pub indicator_count: Option<usize>,
    #[serde(default)]
    pub diagnostics: DiagnosticsCfg,
}

impl ViewConfig {
    pub fn new(parts: Vec<PartConfig>) -> Self {
        Self {
            transition_speed: DEFAULT_TRANSITION_SPEED,
            origin: Vec3::ZERO,
            parts,
            indicator_count: None,
            diagnostics: DiagnosticsCfg::default(),
        }
    }

    /// Parse and validate a JSON view config.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: ViewConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_speed(self.transition_speed)?;
        if !self.origin.is_finite() {
            return Err(ConfigError::NonFiniteOrigin);
        }
        if self.parts.is_empty() {
            return Err(ConfigError::NoParts);
        }
        for (i, part) in self.parts.iter().enumerate() {
            for (field, v) in [
                ("position", part.position),
                ("finalPosition", part.final_position),
                ("offset", part.offset),
            ] {
                if !v.is_finite() {
                    return Err(ConfigError::NonFinite {
                        part: part.transform.clone(),
                        field,
                    });
                }
            }
            if self.parts[..i].iter().any(|p| p.transform == part.transform) {
                return Err(ConfigError::DuplicatePart(part.transform.clone()));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn transition_duration(&self) -> f32 {
        self.transition_speed.recip()
    }

    #[inline]
    pub fn indicator_count(&self) -> usize {
        self.indicator_count.unwrap_or(self.parts.len())
    }
}

/// A speed is usable only if its duration, `1 / speed`, is finite too.
pub(crate) fn validate_speed(speed: f32) -> Result<(), ConfigError> {
    if speed.is_finite() && speed > 0.0 && speed.recip().is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeed(speed))
    }
}
