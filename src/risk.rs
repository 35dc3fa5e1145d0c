//! Distance-based risk classification.
//!
//! The distance axis is partitioned by three thresholds:
//!
//! | distance (km)                   | tier     | score |
//! |---------------------------------|----------|-------|
//! | `d < critical_km`               | CRITICAL | 90    |
//! | `critical_km <= d < warning_km` | WARNING  | 60    |
//! | `warning_km <= d < collision_km`| INFO     | 30    |
//! | `d >= collision_km`             | (none)   |       |
//!
//! Defaults follow common operational screening volumes (2.0 / 3.5 / 5.0 km).
//! Classification is pure; deciding what to do about a tier lives in
//! [`crate::alert`].

use serde::{Deserialize, Serialize};

pub const DEFAULT_CRITICAL_KM: f64 = 2.0;
pub const DEFAULT_WARNING_KM: f64 = 3.5;
pub const DEFAULT_COLLISION_KM: f64 = 5.0;

pub const PROBABILITY_CRITICAL: u8 = 90;
pub const PROBABILITY_WARNING: u8 = 60;
pub const PROBABILITY_INFO: u8 = 30;

/// Ordinal severity of a conjunction. Orders as `Info < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Info,
    Warning,
    Critical,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Critical => "CRITICAL",
            RiskTier::Warning => "WARNING",
            RiskTier::Info => "INFO",
        }
    }

    pub fn probability_score(&self) -> u8 {
        match self {
            RiskTier::Critical => PROBABILITY_CRITICAL,
            RiskTier::Warning => PROBABILITY_WARNING,
            RiskTier::Info => PROBABILITY_INFO,
        }
    }

    /// Parse the upper-case name produced by [`RiskTier::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CRITICAL" => Some(RiskTier::Critical),
            "WARNING" => Some(RiskTier::Warning),
            "INFO" => Some(RiskTier::Info),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bounds (exclusive) of each tier, in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub critical_km: f64,
    pub warning_km: f64,
    pub collision_km: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical_km: DEFAULT_CRITICAL_KM,
            warning_km: DEFAULT_WARNING_KM,
            collision_km: DEFAULT_COLLISION_KM,
        }
    }
}

/// Tier and score assigned to a reportable distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: RiskTier,
    pub probability_score: u8,
}

impl From<RiskTier> for Classification {
    fn from(tier: RiskTier) -> Self {
        Self {
            tier,
            probability_score: tier.probability_score(),
        }
    }
}

/// Classify a separation distance.
///
/// Returns `None` when the pair is not close enough to report
/// (`distance_km >= collision_km`). NaN never classifies.
pub fn classify(distance_km: f64, thresholds: &RiskThresholds) -> Option<Classification> {
    if distance_km.is_nan() || distance_km >= thresholds.collision_km {
        return None;
    }
    let tier = if distance_km < thresholds.critical_km {
        RiskTier::Critical
    } else if distance_km < thresholds.warning_km {
        RiskTier::Warning
    } else {
        RiskTier::Info
    };
    Some(tier.into())
}
