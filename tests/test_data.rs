//! Shared fixtures and collaborator doubles for the integration tests.
//!
//! Fixture files live in `data/` at the repo root.

#![allow(dead_code)]

use std::sync::Mutex;

use conjunct::{
    AlertRecord, Body, ConjunctionRecord, ConjunctionStore, Notifier, NotifyError, StoreError,
};

/// Absolute path of a fixture file under `data/`.
pub fn fixture_path(name: &str) -> String {
    format!("{}/data/{}", env!("CARGO_MANIFEST_DIR"), name)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}

/// Body on the equator at the prime meridian, `altitude_km` up.
pub fn overhead(name: &str, altitude_km: f64) -> Body {
    Body::new(name, name.trim_start_matches("SAT"), 0.0, 0.0, altitude_km)
}

/// Notifier that remembers every message it was given.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Notifier whose transport is always down.
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, recipient: &str, _subject: &str, _body: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery {
            recipient: recipient.to_string(),
            reason: "SMTP relay unreachable".to_string(),
        })
    }
}

/// Store that accepts conjunctions but refuses alerts, or refuses everything.
pub struct FailingStore {
    pub fail_conjunctions: bool,
    pub conjunctions: Vec<ConjunctionRecord>,
}

impl ConjunctionStore for FailingStore {
    fn store_conjunctions(&mut self, records: &[ConjunctionRecord]) -> Result<(), StoreError> {
        if self.fail_conjunctions {
            return Err(StoreError::Unavailable("database is read-only".to_string()));
        }
        self.conjunctions.extend_from_slice(records);
        Ok(())
    }

    fn store_alert(&mut self, _alert: &AlertRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("alert table locked".to_string()))
    }
}
