//! File-backed ledger serialized with rkyv.
//!
//! The whole ledger is rewritten after every successful store call. The new
//! ledger goes to a sibling staging file (`<name>.tmp`) which is synced and
//! then renamed over the ledger, so a write that dies partway leaves the
//! previous ledger intact. A write that fails leaves the in-memory ledger as
//! it was before the call, so the file and memory never disagree about what
//! was persisted.
//!
//! Ids are stored as raw 16-byte UUIDs and timestamps as Unix milliseconds.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::{ConjunctionStore, MemoryStore, StoreError};
use crate::records::{AlertRecord, ConjunctionRecord, ConjunctionStatus};
use crate::{BodyRef, RiskTier};

const LEDGER_VERSION: u32 = 1;

#[derive(Debug, Archive, Serialize, Deserialize)]
struct StoredLedger {
    version: u32,
    conjunctions: Vec<StoredConjunction>,
    alerts: Vec<StoredAlert>,
}

#[derive(Debug, Archive, Serialize, Deserialize)]
struct StoredConjunction {
    id: [u8; 16],
    primary_name: String,
    primary_id: String,
    secondary_name: String,
    secondary_id: String,
    min_distance_km: f64,
    tier: u8,
    probability_score: u8,
    status: u8,
    detected_at_ms: i64,
}

#[derive(Debug, Archive, Serialize, Deserialize)]
struct StoredAlert {
    id: [u8; 16],
    conjunction_id: [u8; 16],
    level: u8,
    message: String,
    recipient: String,
    sent_at_ms: i64,
    acknowledged: bool,
}

/// A [`MemoryStore`] mirrored to an rkyv archive on disk.
#[derive(Debug)]
pub struct ArchiveStore {
    path: PathBuf,
    ledger: MemoryStore,
}

impl ArchiveStore {
    /// Open the ledger at `path`, starting empty if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let ledger = if path.exists() {
            load_ledger(&path)?
        } else {
            debug!("No ledger at {}, starting empty", path.display());
            MemoryStore::new()
        };
        Ok(Self { path, ledger })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read access to the records currently persisted.
    pub fn ledger(&self) -> &MemoryStore {
        &self.ledger
    }

    fn flush(&self) -> Result<(), StoreError> {
        let stored = StoredLedger {
            version: LEDGER_VERSION,
            conjunctions: self.ledger.conjunctions().iter().map(to_stored_conjunction).collect(),
            alerts: self.ledger.alerts().iter().map(to_stored_alert).collect(),
        };
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(&stored)
            .map_err(|e| StoreError::Archive(e.to_string()))?;
        write_staged(&self.path, &bytes)?;
        debug!("Saved ledger to {} ({} bytes)", self.path.display(), bytes.len());
        Ok(())
    }

    /// Run `write` against the in-memory ledger and flush, undoing the write if
    /// the flush fails.
    fn write_through<F>(&mut self, write: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut MemoryStore) -> Result<(), StoreError>,
    {
        let n_conjunctions = self.ledger.conjunctions().len();
        let n_alerts = self.ledger.alerts().len();
        write(&mut self.ledger)?;
        if let Err(e) = self.flush() {
            self.ledger.truncate(n_conjunctions, n_alerts);
            return Err(e);
        }
        Ok(())
    }
}

impl ConjunctionStore for ArchiveStore {
    fn store_conjunctions(&mut self, records: &[ConjunctionRecord]) -> Result<(), StoreError> {
        self.write_through(|ledger| ledger.store_conjunctions(records))
    }

    fn store_alert(&mut self, alert: &AlertRecord) -> Result<(), StoreError> {
        self.write_through(|ledger| ledger.store_alert(alert))
    }
}

/// Staging file written before the rename: the ledger's file name plus `.tmp`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("ledger"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` with `bytes` atomically: the file holds either the old or
/// the new contents, never a prefix of the new ones.
fn write_staged(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let staging = staging_path(path);
    let result = std::fs::File::create(&staging)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&staging, path));
    if let Err(e) = result {
        // The staging file may or may not exist at this point.
        let _ = std::fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(())
}

fn load_ledger(path: &Path) -> Result<MemoryStore, StoreError> {
    let raw = std::fs::read(path)?;
    let mut bytes = AlignedVec::<16>::with_capacity(raw.len());
    bytes.extend_from_slice(&raw);
    let stored = rkyv::from_bytes::<StoredLedger, rkyv::rancor::Error>(&bytes)
        .map_err(|e| StoreError::Archive(format!("deserialization failed: {}", e)))?;
    if stored.version != LEDGER_VERSION {
        return Err(StoreError::Corrupt(format!(
            "unsupported ledger version {}",
            stored.version
        )));
    }

    let conjunctions = stored
        .conjunctions
        .into_iter()
        .map(from_stored_conjunction)
        .collect::<Result<Vec<_>, _>>()?;
    let alerts = stored
        .alerts
        .into_iter()
        .map(from_stored_alert)
        .collect::<Result<Vec<_>, _>>()?;
    info!(
        "Loaded ledger from {}: {} conjunctions, {} alerts",
        path.display(),
        conjunctions.len(),
        alerts.len()
    );
    Ok(MemoryStore::from_parts(conjunctions, alerts))
}

fn tier_code(tier: RiskTier) -> u8 {
    match tier {
        RiskTier::Info => 0,
        RiskTier::Warning => 1,
        RiskTier::Critical => 2,
    }
}

fn tier_from_code(code: u8) -> Result<RiskTier, StoreError> {
    match code {
        0 => Ok(RiskTier::Info),
        1 => Ok(RiskTier::Warning),
        2 => Ok(RiskTier::Critical),
        other => Err(StoreError::Corrupt(format!("unknown tier code {}", other))),
    }
}

fn status_code(status: ConjunctionStatus) -> u8 {
    match status {
        ConjunctionStatus::Active => 0,
        ConjunctionStatus::Resolved => 1,
        ConjunctionStatus::Expired => 2,
    }
}

fn status_from_code(code: u8) -> Result<ConjunctionStatus, StoreError> {
    match code {
        0 => Ok(ConjunctionStatus::Active),
        1 => Ok(ConjunctionStatus::Resolved),
        2 => Ok(ConjunctionStatus::Expired),
        other => Err(StoreError::Corrupt(format!("unknown status code {}", other))),
    }
}

fn timestamp_from_ms(ms: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| StoreError::Corrupt(format!("timestamp {} out of range", ms)))
}

fn to_stored_conjunction(r: &ConjunctionRecord) -> StoredConjunction {
    StoredConjunction {
        id: r.id.into_bytes(),
        primary_name: r.primary.name.clone(),
        primary_id: r.primary.catalog_id.clone(),
        secondary_name: r.secondary.name.clone(),
        secondary_id: r.secondary.catalog_id.clone(),
        min_distance_km: r.min_distance_km,
        tier: tier_code(r.tier),
        probability_score: r.probability_score,
        status: status_code(r.status),
        detected_at_ms: r.detected_at.timestamp_millis(),
    }
}

fn from_stored_conjunction(s: StoredConjunction) -> Result<ConjunctionRecord, StoreError> {
    Ok(ConjunctionRecord {
        id: Uuid::from_bytes(s.id),
        primary: BodyRef {
            name: s.primary_name,
            catalog_id: s.primary_id,
        },
        secondary: BodyRef {
            name: s.secondary_name,
            catalog_id: s.secondary_id,
        },
        min_distance_km: s.min_distance_km,
        tier: tier_from_code(s.tier)?,
        probability_score: s.probability_score,
        status: status_from_code(s.status)?,
        detected_at: timestamp_from_ms(s.detected_at_ms)?,
    })
}

fn to_stored_alert(a: &AlertRecord) -> StoredAlert {
    StoredAlert {
        id: a.id.into_bytes(),
        conjunction_id: a.conjunction_id.into_bytes(),
        level: tier_code(a.level),
        message: a.message.clone(),
        recipient: a.recipient.clone(),
        sent_at_ms: a.sent_at.timestamp_millis(),
        acknowledged: a.acknowledged,
    }
}

fn from_stored_alert(s: StoredAlert) -> Result<AlertRecord, StoreError> {
    Ok(AlertRecord {
        id: Uuid::from_bytes(s.id),
        conjunction_id: Uuid::from_bytes(s.conjunction_id),
        level: tier_from_code(s.level)?,
        message: s.message,
        recipient: s.recipient,
        sent_at: timestamp_from_ms(s.sent_at_ms)?,
        acknowledged: s.acknowledged,
    })
}
