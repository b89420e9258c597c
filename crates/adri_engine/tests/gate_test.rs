//! Protection gate behavior: failure policies, cache reuse and expiry, and
//! concurrent callers sharing one cache.

use adri_core::{AdriError, FieldSpecBuilder, StandardBuilder, StandardSource};
use adri_engine::{AssessmentCache, DataGuard, DataRow, DataSet, DataValue, GuardConfig, OnFailure};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn clean_dataset() -> DataSet {
    (0..4)
        .map(|i| {
            let mut row = DataRow::new();
            row.insert("id".to_string(), DataValue::Int(i));
            row.insert("name".to_string(), DataValue::String(format!("n{i}")));
            row
        })
        .collect()
}

/// A dataset/standard pair scoring exactly 78.0: validity 20, completeness 4
/// (1 of 5 required values present), and the three 18.0 defaults.
fn failing_pair() -> (DataSet, StandardSource) {
    let dataset: DataSet = (0..5)
        .map(|i| {
            let mut row = DataRow::new();
            let value = if i == 0 {
                DataValue::String("present".into())
            } else {
                DataValue::Null
            };
            row.insert("a".to_string(), value);
            row
        })
        .collect();

    let source: StandardSource = StandardBuilder::new("strict", "team")
        .overall_minimum(80.0)
        .field("a", FieldSpecBuilder::new("string").nullable(false).build())
        .build()
        .into();
    (dataset, source)
}

fn guard() -> DataGuard {
    DataGuard::new(Arc::new(AssessmentCache::new(Duration::from_secs(60))))
}

#[test]
fn raise_policy_blocks_a_78_score_against_an_80_minimum() {
    let (dataset, source) = failing_pair();
    let guard = guard();
    guard.register_standard("load", source);

    let mut config = GuardConfig::new("load", "records");
    config.auto_generate_standard = false;

    let outcome = guard.protect(&config, &dataset, |_| "ran");
    match outcome {
        Err(AdriError::ProtectionFailed { score, minimum, .. }) => {
            assert!((score - 78.0).abs() < 1e-9);
            assert_eq!(minimum, 80.0);
        }
        other => panic!("expected ProtectionFailed, got {other:?}"),
    }
}

#[test]
fn continue_policy_still_invokes_the_wrapped_function() {
    let (dataset, source) = failing_pair();
    let guard = guard();
    guard.register_standard("load", source);

    let mut config = GuardConfig::new("load", "records").on_failure(OnFailure::Continue);
    config.auto_generate_standard = false;

    let outcome = guard.protect(&config, &dataset, |_| "ran").unwrap();
    assert_eq!(outcome, "ran");
}

#[test]
fn warn_policy_invokes_and_returns_the_function_value() {
    let (dataset, source) = failing_pair();
    let guard = guard();
    guard.register_standard("load", source);

    let mut config = GuardConfig::new("load", "records").on_failure(OnFailure::Warn);
    config.auto_generate_standard = false;

    let rows = guard.protect(&config, &dataset, |data| data.len()).unwrap();
    assert_eq!(rows, 5);
}

#[test]
fn second_call_with_the_same_shape_hits_the_cache() {
    let cache = Arc::new(AssessmentCache::new(Duration::from_secs(60)));
    let guard = DataGuard::new(Arc::clone(&cache));
    let config = GuardConfig::new("load", "records");

    guard.protect(&config, &clean_dataset(), |_| ()).unwrap();
    assert_eq!(cache.len(), 1);

    // Same shape, different values: still one entry, no re-assessment stored.
    let mut other = clean_dataset();
    other = other.sample(4);
    guard.protect(&config, &other, |_| ()).unwrap();
    assert_eq!(cache.len(), 1);
}

#[test]
fn expired_cache_entries_trigger_reassessment() {
    let cache = Arc::new(AssessmentCache::new(Duration::from_millis(0)));
    let guard = DataGuard::new(Arc::clone(&cache));
    let config = GuardConfig::new("load", "records");

    guard.protect(&config, &clean_dataset(), |_| ()).unwrap();
    // Entry expired instantly; the next call assesses again and restores it.
    guard.protect(&config, &clean_dataset(), |_| ()).unwrap();
    assert_eq!(cache.len(), 1);
    assert!(cache.get("load:anything").is_none());
}

#[test]
fn concurrent_callers_share_one_cache_safely() {
    let cache = Arc::new(AssessmentCache::new(Duration::from_secs(60)));
    let guard = Arc::new(DataGuard::new(Arc::clone(&cache)));
    let invocations = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let guard = Arc::clone(&guard);
            let invocations = Arc::clone(&invocations);
            std::thread::spawn(move || {
                let config = GuardConfig::new("load", "records");
                guard
                    .protect(&config, &clean_dataset(), |_| {
                        invocations.fetch_add(1, Ordering::SeqCst);
                    })
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Every caller got through; the shared cache holds the single shape key.
    assert_eq!(invocations.load(Ordering::SeqCst), 8);
    assert_eq!(cache.len(), 1);
}

#[test]
fn auto_generated_standard_accepts_its_own_data() {
    let guard = guard();
    let config = GuardConfig::new("load", "records");

    let rows = guard
        .protect(&config, &clean_dataset(), |data| data.len())
        .unwrap();
    assert_eq!(rows, 4);
}
