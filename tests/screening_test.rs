//! Scenario tests for full screening passes: record contents, alerting, and
//! collaborator failures.

mod test_data;

use chrono::{TimeZone, Utc};
use conjunct::{
    screen, Body, ConjunctionScreener, ConjunctionStatus, InputDataError, MemoryStore,
    NoopNotifier, NotificationOutcome, RiskTier, ScreenError, ScreeningConfig, StoreError,
};
use test_data::{overhead, FailingNotifier, FailingStore, RecordingNotifier};

fn notifying() -> ScreeningConfig {
    ScreeningConfig {
        notifications_enabled: true,
        alert_recipient: "ops@example.com".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_close_pair_is_critical() {
    test_data::init_tracing();

    let catalog = vec![overhead("SAT1", 400.0), overhead("SAT2", 400.5)];
    let screener = ConjunctionScreener::new(ScreeningConfig::default()).unwrap();
    let mut store = MemoryStore::new();
    let report = screener.screen(&catalog, &mut store, &NoopNotifier).unwrap();

    assert_eq!(report.pairs_examined, 1);
    assert_eq!(report.conjunctions.len(), 1);
    let c = &report.conjunctions[0];
    println!("{} / {}: {:.6} km", c.primary.name, c.secondary.name, c.min_distance_km);
    assert!((c.min_distance_km - 0.5).abs() < 1e-9);
    assert_eq!(c.tier, RiskTier::Critical);
    assert_eq!(c.probability_score, 90);
    assert_eq!(c.status, ConjunctionStatus::Active);
    assert_eq!(c.primary.catalog_id, "1");
    assert_eq!(c.secondary.catalog_id, "2");

    // One persisted conjunction, one persisted alert pointing at it.
    assert_eq!(store.conjunctions().len(), 1);
    assert_eq!(store.alerts().len(), 1);
    let alert = &store.alerts()[0];
    assert_eq!(alert.conjunction_id, c.id);
    assert_eq!(alert.level, RiskTier::Critical);
    assert_eq!(alert.recipient, "operator@example.com");
    assert!(!alert.acknowledged);
    assert_eq!(
        alert.message,
        "COLLISION ALERT: SAT1 and SAT2 are 0.50 km apart (Risk: CRITICAL)"
    );
}

#[test]
fn test_offset_ground_track_close_pair() {
    // Slightly different lat/lon as well as altitude; still well inside 2 km.
    let catalog = vec![
        Body::new("SAT1", "1", 0.0, 0.0, 400.0),
        Body::new("SAT2", "2", 0.01, 0.01, 400.5),
    ];
    let mut store = MemoryStore::new();
    let records = screen(&catalog, &ScreeningConfig::default(), &mut store, &NoopNotifier).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].tier, RiskTier::Critical);
}

#[test]
fn test_distant_pair_is_not_reported() {
    let catalog = vec![overhead("SAT1", 400.0), overhead("SAT2", 410.0)];
    let mut store = MemoryStore::new();
    let records = screen(&catalog, &ScreeningConfig::default(), &mut store, &NoopNotifier).unwrap();
    assert!(records.is_empty());
    assert!(store.is_empty());
}

#[test]
fn test_three_body_mixed_tiers() {
    // 1-2: 4 km (INFO), 1-3: 3 km (WARNING), 2-3: 7 km (not reported).
    let catalog = vec![
        overhead("SAT1", 400.0),
        overhead("SAT2", 404.0),
        overhead("SAT3", 397.0),
    ];
    let screener = ConjunctionScreener::new(ScreeningConfig::default()).unwrap();
    let mut store = MemoryStore::new();
    let report = screener.screen(&catalog, &mut store, &NoopNotifier).unwrap();

    assert_eq!(report.pairs_examined, 3);
    assert_eq!(report.conjunctions.len(), 2);

    let first = &report.conjunctions[0];
    assert!(first.involves_pair("1", "2"));
    assert_eq!(first.tier, RiskTier::Info);
    assert_eq!(first.probability_score, 30);

    let second = &report.conjunctions[1];
    assert!(second.involves_pair("1", "3"));
    assert_eq!(second.tier, RiskTier::Warning);
    assert_eq!(second.probability_score, 60);

    assert!(!report.conjunctions.iter().any(|c| c.involves_pair("2", "3")));
    assert_eq!(store.alerts().len(), 2);
}

#[test]
fn test_empty_and_singleton_catalogs() {
    let screener = ConjunctionScreener::new(ScreeningConfig::default()).unwrap();
    for catalog in [vec![], vec![overhead("SAT1", 400.0)]] {
        let mut store = MemoryStore::new();
        let report = screener.screen(&catalog, &mut store, &NoopNotifier).unwrap();
        assert_eq!(report.pairs_examined, 0);
        assert!(report.conjunctions.is_empty());
        assert!(store.is_empty());
    }
}

#[test]
fn test_only_critical_pairs_notify() {
    let catalog = vec![
        overhead("SAT1", 400.0),
        overhead("SAT2", 400.5), // 0.5 km from SAT1
        overhead("SAT3", 403.5), // 3.5 km from SAT1, 3.0 km from SAT2
    ];
    let notifier = RecordingNotifier::default();
    let mut store = MemoryStore::new();
    let report = ConjunctionScreener::new(notifying())
        .unwrap()
        .screen(&catalog, &mut store, &notifier)
        .unwrap();

    assert_eq!(report.conjunctions.len(), 3);
    assert_eq!(store.alerts().len(), 3);
    assert_eq!(report.notifications_delivered(), 1);
    assert_eq!(notifier.count(), 1);

    let sent = notifier.sent.lock().unwrap();
    let (recipient, subject, body) = &sent[0];
    assert_eq!(recipient, "ops@example.com");
    assert_eq!(subject, "COLLISION ALERT: CRITICAL");
    assert!(body.contains("- SAT1 (Catalog ID: 1)"));
    assert!(body.contains("- SAT2 (Catalog ID: 2)"));
    assert!(body.contains("Minimum Distance: 0.50 km"));
}

#[test]
fn test_notifications_disabled_by_default() {
    let catalog = vec![overhead("SAT1", 400.0), overhead("SAT2", 400.1)];
    let notifier = RecordingNotifier::default();
    let mut store = MemoryStore::new();
    let report = ConjunctionScreener::new(ScreeningConfig::default())
        .unwrap()
        .screen(&catalog, &mut store, &notifier)
        .unwrap();
    assert_eq!(report.conjunctions[0].tier, RiskTier::Critical);
    assert_eq!(report.dispatches[0].notification, NotificationOutcome::Skipped);
    assert_eq!(notifier.count(), 0);
    assert_eq!(store.alerts().len(), 1);
}

#[test]
fn test_notification_failure_keeps_records() {
    test_data::init_tracing();

    let catalog = vec![
        overhead("SAT1", 400.0),
        overhead("SAT2", 400.5),
        overhead("SAT3", 401.0),
    ];
    let mut store = MemoryStore::new();
    let report = ConjunctionScreener::new(notifying())
        .unwrap()
        .screen(&catalog, &mut store, &FailingNotifier)
        .expect("notification failures must not fail the pass");

    // Every pair is CRITICAL and every delivery failed, yet all records and
    // alerts were kept.
    assert_eq!(report.conjunctions.len(), 3);
    assert_eq!(report.notifications_failed(), 3);
    assert_eq!(store.conjunctions().len(), 3);
    assert_eq!(store.alerts().len(), 3);
    for (record, alert) in store.conjunctions().iter().zip(store.alerts()) {
        assert_eq!(alert.conjunction_id, record.id);
    }
}

#[test]
fn test_conjunction_persistence_failure_propagates() {
    let catalog = vec![overhead("SAT1", 400.0), overhead("SAT2", 400.5)];
    let mut store = FailingStore {
        fail_conjunctions: true,
        conjunctions: Vec::new(),
    };
    let err = screen(&catalog, &ScreeningConfig::default(), &mut store, &NoopNotifier).unwrap_err();
    assert!(
        matches!(err, ScreenError::Persistence(StoreError::Unavailable(_))),
        "got {:?}",
        err
    );
}

#[test]
fn test_alert_persistence_failure_propagates() {
    let catalog = vec![overhead("SAT1", 400.0), overhead("SAT2", 400.5)];
    let mut store = FailingStore {
        fail_conjunctions: false,
        conjunctions: Vec::new(),
    };
    let notifier = RecordingNotifier::default();
    let err = ConjunctionScreener::new(notifying())
        .unwrap()
        .screen(&catalog, &mut store, &notifier)
        .unwrap_err();
    assert!(matches!(err, ScreenError::Persistence(_)), "got {:?}", err);
    // Conjunctions were written before the alert failed; nothing was sent for
    // an alert that could not be stored.
    assert_eq!(store.conjunctions.len(), 1);
    assert_eq!(notifier.count(), 0);
}

#[test]
fn test_non_finite_body_is_skipped() {
    test_data::init_tracing();

    let catalog = vec![
        overhead("SAT1", 400.0),
        Body::new("BROKEN", "666", f64::NAN, 0.0, 400.2),
        overhead("SAT3", 400.5),
        Body::new("RUNAWAY", "667", 0.0, 0.0, f64::INFINITY),
    ];
    let mut store = MemoryStore::new();
    let report = ConjunctionScreener::new(ScreeningConfig::default())
        .unwrap()
        .screen(&catalog, &mut store, &NoopNotifier)
        .unwrap();

    let rejected: Vec<usize> = report.rejected.iter().map(|r| r.index).collect();
    assert_eq!(rejected, vec![1, 3]);
    assert_eq!(report.pairs_examined, 1);
    assert_eq!(report.conjunctions.len(), 1);
    assert!(report.conjunctions[0].involves_pair("1", "3"));
}

#[test]
fn test_custom_thresholds() {
    let catalog = vec![overhead("SAT1", 400.0), overhead("SAT2", 409.0)];
    let config = ScreeningConfig {
        collision_threshold_km: 10.0,
        warning_threshold_km: 9.5,
        critical_threshold_km: 1.0,
        ..Default::default()
    };
    let mut store = MemoryStore::new();
    let records = screen(&catalog, &config, &mut store, &NoopNotifier).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].tier, RiskTier::Warning);
}

#[test]
fn test_fixed_detection_time_is_stamped() {
    let when = Utc.with_ymd_and_hms(2025, 10, 14, 9, 30, 0).unwrap();
    let catalog = vec![overhead("SAT1", 400.0), overhead("SAT2", 401.0)];
    let notifier = RecordingNotifier::default();
    let mut store = MemoryStore::new();
    let report = ConjunctionScreener::new(notifying())
        .unwrap()
        .screen_at(&catalog, &mut store, &notifier, when)
        .unwrap();
    assert_eq!(report.conjunctions[0].detected_at, when);
    assert_eq!(store.alerts()[0].sent_at, when);
    let sent = notifier.sent.lock().unwrap();
    assert!(sent[0].2.contains("Detection Time: 2025-10-14T09:30:00Z"));
}

#[test]
fn test_repeated_catalog_entry_is_not_paired_with_itself() {
    test_data::init_tracing();

    // Space-Track exports can list the same NORAD id twice.
    let iss = Body::new("ISS (ZARYA)", "25544", 51.6, 247.4, 420.0);
    let catalog = vec![
        iss.clone(),
        iss,
        Body::new("VISITOR", "90001", 51.6, 247.4, 420.5),
    ];
    let notifier = RecordingNotifier::default();
    let mut store = MemoryStore::new();
    let report = ConjunctionScreener::new(notifying())
        .unwrap()
        .screen(&catalog, &mut store, &notifier)
        .unwrap();

    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].index, 1);
    assert_eq!(
        report.rejected[0].error,
        InputDataError::DuplicateIdentity {
            catalog_id: "25544".to_string()
        }
    );
    assert_eq!(report.pairs_examined, 1);
    for c in &report.conjunctions {
        println!("{} <-> {} {:.3} km", c.primary, c.secondary, c.min_distance_km);
        assert_ne!(c.primary.catalog_id, c.secondary.catalog_id);
    }
    assert_eq!(report.conjunctions.len(), 1);
    assert!(report.conjunctions[0].involves_pair("25544", "90001"));
    assert_eq!(notifier.count(), 1);
    assert_eq!(store.alerts().len(), 1);
}
