//! Conjunction screening: one static-epoch proximity screen over a catalog.
//!
//! A pass runs in two stages:
//!
//! 1. **Pair scan** ([`ConjunctionScreener::evaluate`]): validate bodies,
//!    convert positions to Cartesian, compute the separation of every
//!    unordered pair and classify it. Pure, and optionally parallel.
//! 2. **Record and dispatch** ([`ConjunctionScreener::screen`]): turn each
//!    candidate into a [`ConjunctionRecord`], persist them all, then run the
//!    [alert policy](crate::alert) on each record in catalog order.
//!
//! The scan is a brute-force O(N²) pass with no spatial pruning. That is fine
//! for catalogs of tens to a few hundred bodies. Larger catalogs want a
//! spatial index (grid, octree) in front of the pair scan; the per-pair
//! contract here would not change.

pub mod pairs;

pub use pairs::{PairCandidate, PairScan, RejectedBody};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::alert::{AlertPolicy, Dispatch, NotificationOutcome};
use crate::config::ConfigError;
use crate::notify::Notifier;
use crate::records::ConjunctionRecord;
use crate::store::{ConjunctionStore, StoreError};
use crate::{Body, ScreeningConfig};

#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to persist screening results: {0}")]
    Persistence(#[from] StoreError),
}

/// Everything a pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningReport {
    /// Reported conjunctions, in catalog pair order.
    pub conjunctions: Vec<ConjunctionRecord>,
    /// One entry per conjunction, in the same order.
    pub dispatches: Vec<Dispatch>,
    pub pairs_examined: usize,
    pub rejected: Vec<RejectedBody>,
    pub detected_at: DateTime<Utc>,
}

impl ScreeningReport {
    pub fn notifications_delivered(&self) -> usize {
        self.dispatches
            .iter()
            .filter(|d| d.notification == NotificationOutcome::Delivered)
            .count()
    }

    pub fn notifications_failed(&self) -> usize {
        self.dispatches
            .iter()
            .filter(|d| matches!(d.notification, NotificationOutcome::Failed(_)))
            .count()
    }
}

/// Screens catalogs under a fixed configuration.
///
/// Holds no state between passes, so one screener can serve concurrent
/// callers.
#[derive(Debug, Clone)]
pub struct ConjunctionScreener {
    config: ScreeningConfig,
}

impl ConjunctionScreener {
    /// Create a screener, rejecting inconsistent thresholds.
    pub fn new(config: ScreeningConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Run the pair scan without creating records or touching collaborators.
    pub fn evaluate(&self, catalog: &[Body]) -> PairScan {
        pairs::scan_pairs(catalog, &self.config.thresholds(), self.config.parallel)
    }

    /// Screen `catalog`, persist the results and dispatch alerts.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Persistence`] if the store rejects any write.
    /// Notification failures are not errors.
    pub fn screen<S, N>(
        &self,
        catalog: &[Body],
        store: &mut S,
        notifier: &N,
    ) -> Result<ScreeningReport, ScreenError>
    where
        S: ConjunctionStore + ?Sized,
        N: Notifier + ?Sized,
    {
        self.screen_at(catalog, store, notifier, Utc::now())
    }

    /// Same as [`screen`](Self::screen) with an explicit detection time, which
    /// is stamped on every record and alert of the pass.
    pub fn screen_at<S, N>(
        &self,
        catalog: &[Body],
        store: &mut S,
        notifier: &N,
        detected_at: DateTime<Utc>,
    ) -> Result<ScreeningReport, ScreenError>
    where
        S: ConjunctionStore + ?Sized,
        N: Notifier + ?Sized,
    {
        info!("Screening {} bodies for conjunctions", catalog.len());
        let scan = self.evaluate(catalog);

        let conjunctions: Vec<ConjunctionRecord> = scan
            .candidates
            .iter()
            .map(|c| {
                let primary = &catalog[c.primary];
                let secondary = &catalog[c.secondary];
                info!(
                    "Conjunction risk: {} and {} are {:.2} km apart ({})",
                    primary.name, secondary.name, c.distance_km, c.classification.tier
                );
                ConjunctionRecord::new(
                    primary.identity(),
                    secondary.identity(),
                    c.distance_km,
                    c.classification,
                    detected_at,
                )
            })
            .collect();

        info!(
            "Checked {} pairs, found {} conjunctions",
            scan.pairs_examined,
            conjunctions.len()
        );

        if !conjunctions.is_empty() {
            store.store_conjunctions(&conjunctions)?;
            debug!("Stored {} conjunctions", conjunctions.len());
        }

        let policy = AlertPolicy::from_config(&self.config);
        let mut dispatches = Vec::with_capacity(conjunctions.len());
        for record in &conjunctions {
            dispatches.push(policy.dispatch(record, &mut *store, notifier, detected_at)?);
        }

        Ok(ScreeningReport {
            conjunctions,
            dispatches,
            pairs_examined: scan.pairs_examined,
            rejected: scan.rejected,
            detected_at,
        })
    }
}

/// Screen `catalog` once under `config` and return the reported conjunctions.
///
/// Convenience wrapper over [`ConjunctionScreener`] for callers that do not
/// need the full [`ScreeningReport`].
pub fn screen<S, N>(
    catalog: &[Body],
    config: &ScreeningConfig,
    store: &mut S,
    notifier: &N,
) -> Result<Vec<ConjunctionRecord>, ScreenError>
where
    S: ConjunctionStore + ?Sized,
    N: Notifier + ?Sized,
{
    let screener = ConjunctionScreener::new(config.clone())?;
    Ok(screener.screen(catalog, store, notifier)?.conjunctions)
}
