//! # conjunct
//!
//! Single-epoch **conjunction screening** for a catalog of orbiting bodies.
//!
//! Given every body's geodetic position at one instant, `conjunct` checks
//! every pair for close approach, classifies each close pair into a risk tier,
//! stores a conjunction record and an alert for each one, and pushes CRITICAL
//! alerts to a notifier.
//!
//! ## Example
//!
//! ```no_run
//! use conjunct::{Body, ConjunctionScreener, MemoryStore, ScreeningConfig, TracingNotifier};
//!
//! let catalog = vec![
//!     Body::new("SAT1", "1", 0.0, 0.0, 400.0),
//!     Body::new("SAT2", "2", 0.0, 0.0, 400.5),
//!     Body::new("SAT3", "3", 0.0, 0.0, 410.0),
//! ];
//!
//! let config = ScreeningConfig {
//!     notifications_enabled: true,
//!     ..Default::default()
//! };
//! let screener = ConjunctionScreener::new(config).unwrap();
//!
//! let mut store = MemoryStore::new();
//! let report = screener.screen(&catalog, &mut store, &TracingNotifier).unwrap();
//! for c in &report.conjunctions {
//!     println!("{} / {}: {:.2} km ({})", c.primary.name, c.secondary.name,
//!         c.min_distance_km, c.tier);
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. **Convert**: latitude/longitude/altitude to Earth-centered Cartesian
//!    coordinates on a spherical Earth ([`geodetic`]).
//! 2. **Measure**: Euclidean separation for each unordered pair ([`separation`]).
//! 3. **Classify**: distance to CRITICAL / WARNING / INFO, or not reported
//!    ([`risk`]).
//! 4. **Record**: one [`ConjunctionRecord`] per reported pair, persisted through
//!    a [`ConjunctionStore`] ([`screen`], [`store`]).
//! 5. **Alert**: one [`AlertRecord`] per conjunction; CRITICAL ones also go to
//!    the [`Notifier`] when enabled ([`alert`], [`notify`]).
//!
//! ## Limitations
//!
//! - Static positions at a single epoch. No propagation, no velocities.
//! - Spherical Earth model.
//! - Brute-force O(N²) pair scan, intended for catalogs of up to a few
//!   hundred bodies.

pub mod alert;
mod body;
pub mod catalogs;
pub mod config;
pub mod geodetic;
pub mod notify;
pub mod records;
pub mod risk;
pub mod screen;
pub mod separation;
pub mod store;

pub use alert::{AlertPolicy, Dispatch, NotificationOutcome};
pub use body::*;
pub use config::{ConfigError, ScreeningConfig};
pub use geodetic::{GeodeticPosition, EARTH_RADIUS_KM};
pub use notify::{NoopNotifier, Notifier, NotifyError, TracingNotifier};
pub use records::{AlertRecord, ConjunctionRecord, ConjunctionStatus};
pub use risk::{classify, Classification, RiskThresholds, RiskTier};
pub use screen::{screen, ConjunctionScreener, PairScan, ScreenError, ScreeningReport};
pub use store::{ArchiveStore, ConjunctionStore, MemoryStore, StoreError};

/// Earth-centered Cartesian position in kilometers.
pub type Position = nalgebra::Vector3<f64>;
