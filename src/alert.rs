//! Alert dispatch policy.
//!
//! For every conjunction a pass reports:
//!
//! 1. build one [`AlertRecord`] whose level mirrors the conjunction's tier;
//! 2. persist it (a storage failure propagates and ends the pass);
//! 3. if the tier is CRITICAL and notifications are enabled, hand a message to
//!    the [`Notifier`]. A delivery failure is logged and otherwise ignored. It
//!    is never retried here.
//!
//! The alert is always stored before any delivery is attempted, so a failed
//! notification cannot lose the alert.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::notify::Notifier;
use crate::records::{AlertRecord, ConjunctionRecord};
use crate::store::{ConjunctionStore, StoreError};
use crate::{RiskTier, ScreeningConfig};

/// What happened to the external notification for one alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// Not attempted: the tier is below CRITICAL or notifications are off.
    Skipped,
    Delivered,
    /// Delivery was attempted and the notifier reported this error.
    Failed(String),
}

/// Result of dispatching one conjunction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub alert: AlertRecord,
    pub notification: NotificationOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPolicy {
    pub notifications_enabled: bool,
    pub recipient: String,
}

impl AlertPolicy {
    pub fn from_config(config: &ScreeningConfig) -> Self {
        Self {
            notifications_enabled: config.notifications_enabled,
            recipient: config.alert_recipient.clone(),
        }
    }

    /// Whether a conjunction of this tier should be pushed to the notifier.
    pub fn should_notify(&self, tier: RiskTier) -> bool {
        self.notifications_enabled && tier == RiskTier::Critical
    }

    /// Create and store the alert for `record`, then notify if required.
    pub fn dispatch<S, N>(
        &self,
        record: &ConjunctionRecord,
        store: &mut S,
        notifier: &N,
        sent_at: DateTime<Utc>,
    ) -> Result<Dispatch, StoreError>
    where
        S: ConjunctionStore + ?Sized,
        N: Notifier + ?Sized,
    {
        let alert = AlertRecord::for_conjunction(record, self.recipient.as_str(), sent_at);
        store.store_alert(&alert)?;

        if !self.should_notify(record.tier) {
            return Ok(Dispatch {
                alert,
                notification: NotificationOutcome::Skipped,
            });
        }

        let subject = notification_subject(record);
        let body = notification_body(record);
        let notification = match notifier.notify(&self.recipient, &subject, &body) {
            Ok(()) => {
                debug!(
                    "Notification sent for {} - {}",
                    record.primary.name, record.secondary.name
                );
                NotificationOutcome::Delivered
            }
            Err(e) => {
                warn!("Notification failed, alert {} was still stored: {}", alert.id, e);
                NotificationOutcome::Failed(e.to_string())
            }
        };
        Ok(Dispatch {
            alert,
            notification,
        })
    }
}

pub fn notification_subject(record: &ConjunctionRecord) -> String {
    format!("COLLISION ALERT: {}", record.tier)
}

/// Plain-text notification body.
pub fn notification_body(record: &ConjunctionRecord) -> String {
    let mut body = String::new();
    body.push_str("SATELLITE COLLISION ALERT\n");
    body.push_str(&format!("Risk Level: {}\n", record.tier));
    body.push_str(&format!("Probability: {}%\n\n", record.probability_score));
    body.push_str("Bodies Involved:\n");
    for b in [&record.primary, &record.secondary] {
        body.push_str(&format!("- {} (Catalog ID: {})\n", b.name, b.catalog_id));
    }
    body.push('\n');
    body.push_str(&format!(
        "Minimum Distance: {:.2} km\n",
        record.min_distance_km
    ));
    body.push_str(&format!(
        "Detection Time: {}\n\n",
        record.detected_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    body.push_str(
        "Action Required: Please review conjunction details in the operations dashboard\n",
    );
    body
}
