//! Simulation settings
//!
//! Arena size, RNG seed and particle quality. Loaded from JSON by the driver.

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, ASTEROID_SAFE_ZONE};
use crate::error::{Result, SimError};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena width in world units
    pub width: f32,
    /// Arena height in world units
    pub height: f32,
    /// RNG seed (driver picks one from the clock when absent)
    pub seed: Option<u64>,
    /// Particle quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, debris)
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            seed: None,
            quality: QualityPreset::Medium,
            particles: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Settings with a fixed seed (tests and replays)
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Reject arenas the simulation cannot run in.
    ///
    /// Wave spawns keep a square around the centre clear, so each side must
    /// be wider than that square.
    pub fn validate(&self) -> Result<()> {
        let min_side = 2.0 * ASTEROID_SAFE_ZONE;
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= min_side {
                log::warn!("Rejecting settings: {} = {}", field, value);
                return Err(SimError::InvalidSettings {
                    field,
                    reason: format!("must be a finite value above {min_side}, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: {}x{}, quality {}",
            settings.width,
            settings.height,
            settings.quality.as_str()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
