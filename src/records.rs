//! Records produced by a screening pass.
//!
//! Both record types are created once and never mutated by this crate.
//! `ConjunctionStatus` transitions past `Active` belong to whoever owns the
//! ledger afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::risk::{Classification, RiskTier};
use crate::BodyRef;

/// Lifecycle of a stored conjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConjunctionStatus {
    Active,
    Resolved,
    Expired,
}

impl ConjunctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConjunctionStatus::Active => "ACTIVE",
            ConjunctionStatus::Resolved => "RESOLVED",
            ConjunctionStatus::Expired => "EXPIRED",
        }
    }
}

/// A close approach between two distinct bodies.
///
/// `primary` is the body that appears first in the screened catalog. The pair
/// is unordered; a pass never emits the same two bodies twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConjunctionRecord {
    pub id: Uuid,
    pub primary: BodyRef,
    pub secondary: BodyRef,
    pub min_distance_km: f64,
    pub tier: RiskTier,
    /// 0-100, fixed per tier.
    pub probability_score: u8,
    pub status: ConjunctionStatus,
    pub detected_at: DateTime<Utc>,
}

impl ConjunctionRecord {
    pub fn new(
        primary: BodyRef,
        secondary: BodyRef,
        min_distance_km: f64,
        classification: Classification,
        detected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            primary,
            secondary,
            min_distance_km,
            tier: classification.tier,
            probability_score: classification.probability_score,
            status: ConjunctionStatus::Active,
            detected_at,
        }
    }

    /// `true` if this record is about the given two catalog ids, in either order.
    pub fn involves_pair(&self, a: &str, b: &str) -> bool {
        (self.primary.catalog_id == a && self.secondary.catalog_id == b)
            || (self.primary.catalog_id == b && self.secondary.catalog_id == a)
    }
}

/// Alert raised for one conjunction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: Uuid,
    pub conjunction_id: Uuid,
    pub level: RiskTier,
    pub message: String,
    pub recipient: String,
    pub sent_at: DateTime<Utc>,
    pub acknowledged: bool,
}

impl AlertRecord {
    pub fn for_conjunction(
        record: &ConjunctionRecord,
        recipient: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            conjunction_id: record.id,
            level: record.tier,
            message: alert_message(record),
            recipient: recipient.into(),
            sent_at,
            acknowledged: false,
        }
    }
}

/// One-line summary stored on the alert.
pub fn alert_message(record: &ConjunctionRecord) -> String {
    format!(
        "COLLISION ALERT: {} and {} are {:.2} km apart (Risk: {})",
        record.primary.name, record.secondary.name, record.min_distance_km, record.tier
    )
}
