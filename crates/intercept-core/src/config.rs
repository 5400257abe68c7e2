//! Guidance tuning configuration and its TOML loader.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::types::GeoPoint;

/// Tuning parameters for one guidance engine. Immutable once the engine is built.
///
/// Every field has a reference default, so a TOML file only needs to list
/// the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Constant interceptor speed (m/s).
    pub speed_mps: f64,
    /// PN navigation constant N.
    pub navigation_constant: f64,
    /// Turn rate clamp (deg/s).
    pub max_turn_rate_deg_s: f64,
    /// Altitude lag gain (1/s).
    pub altitude_gain: f64,
    /// Integration sub-step (s).
    pub sub_step_secs: f64,
    /// Gap above which an update re-acquires instead of integrating (s).
    pub stale_gap_secs: f64,
    /// Distance that ends sub-stepping early (m).
    pub hit_threshold_m: f64,
    /// Hard cap on sub-steps per update.
    pub max_substeps: u32,
    /// Launch site the interceptor resets to on every launch.
    pub origin: GeoPoint,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            speed_mps: INTERCEPTOR_SPEED,
            navigation_constant: PN_NAVIGATION_CONSTANT,
            max_turn_rate_deg_s: PN_MAX_TURN_RATE_DEG,
            altitude_gain: ALTITUDE_GAIN,
            sub_step_secs: SUB_STEP_SECS,
            stale_gap_secs: STALE_GAP_SECS,
            hit_threshold_m: HIT_THRESHOLD_M,
            max_substeps: MAX_SUBSTEPS,
            origin: GeoPoint::new(LAUNCH_ORIGIN_LAT, LAUNCH_ORIGIN_LON, LAUNCH_ORIGIN_ALT),
        }
    }
}

/// Errors that can occur while loading or validating a guidance configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl GuidanceConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GuidanceConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("speed_mps", self.speed_mps),
            ("max_turn_rate_deg_s", self.max_turn_rate_deg_s),
            ("sub_step_secs", self.sub_step_secs),
            ("stale_gap_secs", self.stale_gap_secs),
            ("hit_threshold_m", self.hit_threshold_m),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("navigation_constant", self.navigation_constant),
            ("altitude_gain", self.altitude_gain),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative finite number, got {value}"
                )));
            }
        }

        if self.max_substeps == 0 {
            return Err(ConfigError::Invalid("max_substeps must be at least 1".into()));
        }

        let o = &self.origin;
        if !(o.lat.is_finite() && o.lon.is_finite() && o.alt.is_finite()) {
            return Err(ConfigError::Invalid("origin must be finite".into()));
        }

        Ok(())
    }
}

/// Load a guidance configuration from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GuidanceConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let config = GuidanceConfig::from_toml_str(&text)?;
    tracing::debug!(path = %path.display(), ?config, "loaded guidance config");
    Ok(config)
}
