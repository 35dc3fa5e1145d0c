//! Persistence collaborator for conjunction and alert records.
//!
//! The screener writes through the [`ConjunctionStore`] trait and treats every
//! error as fatal to the pass: losing a detected conjunction is worse than
//! failing loudly. Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: a plain in-process ledger.
//! - [`ArchiveStore`]: the same ledger, written to an rkyv archive file after
//!   every successful write.
//!
//! Both expose the read side used by operators: all, active and critical
//! conjunctions, plus counts.

pub mod archive;

pub use archive::ArchiveStore;

use uuid::Uuid;

use crate::records::{AlertRecord, ConjunctionRecord, ConjunctionStatus};
use crate::RiskTier;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger archive error: {0}")]
    Archive(String),
    #[error("ledger is corrupt: {0}")]
    Corrupt(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Sink for records produced by a screening pass.
pub trait ConjunctionStore {
    /// Persist all conjunctions found in one pass.
    fn store_conjunctions(&mut self, records: &[ConjunctionRecord]) -> Result<(), StoreError>;

    /// Persist a single alert.
    fn store_alert(&mut self, alert: &AlertRecord) -> Result<(), StoreError>;
}

impl<S: ConjunctionStore + ?Sized> ConjunctionStore for &mut S {
    fn store_conjunctions(&mut self, records: &[ConjunctionRecord]) -> Result<(), StoreError> {
        (**self).store_conjunctions(records)
    }

    fn store_alert(&mut self, alert: &AlertRecord) -> Result<(), StoreError> {
        (**self).store_alert(alert)
    }
}

/// In-memory ledger.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    conjunctions: Vec<ConjunctionRecord>,
    alerts: Vec<AlertRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        conjunctions: Vec<ConjunctionRecord>,
        alerts: Vec<AlertRecord>,
    ) -> Self {
        Self {
            conjunctions,
            alerts,
        }
    }

    pub fn conjunctions(&self) -> &[ConjunctionRecord] {
        &self.conjunctions
    }

    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    pub fn conjunction(&self, id: Uuid) -> Option<&ConjunctionRecord> {
        self.conjunctions.iter().find(|c| c.id == id)
    }

    pub fn alerts_for(&self, conjunction_id: Uuid) -> impl Iterator<Item = &AlertRecord> {
        self.alerts
            .iter()
            .filter(move |a| a.conjunction_id == conjunction_id)
    }

    pub fn active_conjunctions(&self) -> impl Iterator<Item = &ConjunctionRecord> {
        self.conjunctions
            .iter()
            .filter(|c| c.status == ConjunctionStatus::Active)
    }

    pub fn critical_conjunctions(&self) -> impl Iterator<Item = &ConjunctionRecord> {
        self.conjunctions
            .iter()
            .filter(|c| c.tier == RiskTier::Critical)
    }

    pub fn active_count(&self) -> usize {
        self.active_conjunctions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.conjunctions.is_empty() && self.alerts.is_empty()
    }

    /// Drop records appended after the given lengths.
    pub(crate) fn truncate(&mut self, conjunctions: usize, alerts: usize) {
        self.conjunctions.truncate(conjunctions);
        self.alerts.truncate(alerts);
    }
}

impl ConjunctionStore for MemoryStore {
    fn store_conjunctions(&mut self, records: &[ConjunctionRecord]) -> Result<(), StoreError> {
        self.conjunctions.extend_from_slice(records);
        Ok(())
    }

    fn store_alert(&mut self, alert: &AlertRecord) -> Result<(), StoreError> {
        self.alerts.push(alert.clone());
        Ok(())
    }
}
