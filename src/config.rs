//! Screening configuration.
//!
//! All tunables of a pass live in one [`ScreeningConfig`] value that is handed
//! to the screener at call time. It can be built in code (usually starting from
//! `Default`) or loaded from a TOML file:
//!
//! ```toml
//! collision_threshold_km = 5.0
//! critical_threshold_km = 2.0
//! warning_threshold_km = 3.5
//! notifications_enabled = true
//! alert_recipient = "ops@example.com"
//! parallel = false
//! ```
//!
//! Missing keys take their default values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::risk::{RiskThresholds, DEFAULT_COLLISION_KM, DEFAULT_CRITICAL_KM, DEFAULT_WARNING_KM};

/// Recipient used when none is configured.
pub const DEFAULT_ALERT_RECIPIENT: &str = "operator@example.com";

/// Parameters controlling one screening pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreeningConfig {
    /// Pairs at or beyond this separation are not reported. Default 5.0 km.
    pub collision_threshold_km: f64,
    /// Below this separation a conjunction is CRITICAL. Default 2.0 km.
    pub critical_threshold_km: f64,
    /// Below this separation (and at or above critical) it is WARNING. Default 3.5 km.
    pub warning_threshold_km: f64,
    /// Send external notifications for CRITICAL conjunctions. Default false.
    pub notifications_enabled: bool,
    /// Recipient designator written on alerts and used for notifications.
    pub alert_recipient: String,
    /// Evaluate pairs on the rayon thread pool. Results are identical to the
    /// sequential scan. Default false.
    pub parallel: bool,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            collision_threshold_km: DEFAULT_COLLISION_KM,
            critical_threshold_km: DEFAULT_CRITICAL_KM,
            warning_threshold_km: DEFAULT_WARNING_KM,
            notifications_enabled: false,
            alert_recipient: DEFAULT_ALERT_RECIPIENT.to_string(),
            parallel: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ScreeningConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or the
    /// thresholds are inconsistent.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are finite and ordered
    /// `0 < critical <= warning <= collision`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("collision_threshold_km", self.collision_threshold_km),
            ("critical_threshold_km", self.critical_threshold_km),
            ("warning_threshold_km", self.warning_threshold_km),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{} must be finite", name)));
            }
        }
        if self.critical_threshold_km <= 0.0 {
            return Err(ConfigError::Invalid(
                "critical_threshold_km must be positive".to_string(),
            ));
        }
        if self.critical_threshold_km > self.warning_threshold_km
            || self.warning_threshold_km > self.collision_threshold_km
        {
            return Err(ConfigError::Invalid(format!(
                "thresholds must satisfy critical <= warning <= collision (got {} / {} / {})",
                self.critical_threshold_km, self.warning_threshold_km, self.collision_threshold_km
            )));
        }
        if self.notifications_enabled && self.alert_recipient.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "alert_recipient is required when notifications are enabled".to_string(),
            ));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            critical_km: self.critical_threshold_km,
            warning_km: self.warning_threshold_km,
            collision_km: self.collision_threshold_km,
        }
    }
}
