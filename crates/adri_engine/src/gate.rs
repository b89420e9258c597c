//! Protection gate.
//!
//! Guards a data-consuming function behind an assessment: the gate assesses
//! the incoming dataset (or reuses a cached assessment), applies the failure
//! policy, and either invokes the protected function or blocks it. The cache
//! is injected so tests and embedders construct isolated instances; there are
//! no globals.

use crate::dataset::DataSet;
use crate::engine::AssessmentEngine;
use crate::infer::infer_standard;
use adri_core::{AdriError, AssessmentResult, Result, StandardSource};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Schema/shape fingerprint of a dataset.
///
/// Built from the sorted column names and the row count only, so lookup is
/// O(columns) and two datasets with the same shape share a cache entry even
/// when cell values differ. Precision is traded for speed; content-sensitive
/// callers should shorten the cache duration instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprints a dataset.
    pub fn of(dataset: &DataSet) -> Self {
        let (rows, _) = dataset.shape();
        Self(format!("{}#{rows}", dataset.field_names().join(",")))
    }

    /// The fingerprint as a cache key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

struct CacheEntry {
    result: AssessmentResult,
    created_at: Instant,
}

/// Shared store of recent assessment results keyed by fingerprint.
///
/// One coarse mutex; every operation holds it for an O(1) map access. Entries
/// expire lazily on read and are overwritten on store; the map is unbounded,
/// which is acceptable for the per-process lifetimes it serves.
pub struct AssessmentCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    cache_duration: Duration,
}

impl AssessmentCache {
    /// Creates a cache whose entries are valid for `cache_duration`.
    pub fn new(cache_duration: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            cache_duration,
        }
    }

    /// Returns the cached result for `key` if one exists and is still fresh.
    pub fn get(&self, key: &str) -> Option<AssessmentResult> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;
        if entry.created_at.elapsed() < self.cache_duration {
            Some(entry.result.clone())
        } else {
            None
        }
    }

    /// Stores a result under `key`, replacing any previous entry.
    pub fn store(&self, key: &str, result: AssessmentResult) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key.to_string(),
            CacheEntry {
                result,
                created_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, fresh or expired.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What to do when the assessment does not meet the minimum score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnFailure {
    /// Return `ProtectionFailed` without invoking the function
    #[default]
    Raise,
    /// Log a warning and invoke anyway
    Warn,
    /// Log and invoke; assessment errors on the data are swallowed too
    Continue,
}

/// Per-call configuration for [`DataGuard::protect`].
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Name of the protected function, used in logs and errors
    pub function_name: String,
    /// Name of the guarded data parameter, used in logs
    pub data_param_name: String,
    /// Minimum overall score; defaults to the standard's own minimum
    pub min_score: Option<f64>,
    /// Failure policy
    pub on_failure: OnFailure,
    /// Whether to infer a standard when none is registered
    pub auto_generate_standard: bool,
    /// Regenerate the standard even when one is already registered
    pub force_regenerate: bool,
}

impl GuardConfig {
    /// Creates a config with the defaults: raise on failure, auto-generate,
    /// no forced regeneration, minimum from the standard.
    pub fn new(function_name: impl Into<String>, data_param_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            data_param_name: data_param_name.into(),
            min_score: None,
            on_failure: OnFailure::Raise,
            auto_generate_standard: true,
            force_regenerate: false,
        }
    }

    /// Sets an explicit minimum score.
    pub fn min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Sets the failure policy.
    pub fn on_failure(mut self, on_failure: OnFailure) -> Self {
        self.on_failure = on_failure;
        self
    }

    /// Sets whether to regenerate an already-registered standard.
    pub fn force_regenerate(mut self, force: bool) -> Self {
        self.force_regenerate = force;
        self
    }
}

/// The protection gate. Safe to share across threads; concurrent callers may
/// assess the same shape twice, but cache stores are idempotent.
pub struct DataGuard {
    engine: AssessmentEngine,
    cache: Arc<AssessmentCache>,
    standards: Mutex<HashMap<String, StandardSource>>,
}

impl DataGuard {
    /// Creates a guard over an injected cache.
    pub fn new(cache: Arc<AssessmentCache>) -> Self {
        Self {
            engine: AssessmentEngine::new(),
            cache,
            standards: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a standard for `function_name` ahead of time.
    pub fn register_standard(&self, function_name: &str, source: StandardSource) {
        let mut standards = self
            .standards
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        standards.insert(function_name.to_string(), source);
    }

    /// Returns the standard for `function_name`, inferring one from the data
    /// when none is registered. Idempotent: an existing standard is never
    /// replaced unless `force` is set.
    pub fn ensure_standard(
        &self,
        function_name: &str,
        dataset: &DataSet,
        force: bool,
    ) -> StandardSource {
        let mut standards = self
            .standards
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !force {
            if let Some(existing) = standards.get(function_name) {
                return existing.clone();
            }
        }
        let inferred = infer_standard(function_name, dataset);
        debug!(function = function_name, "generated standard from data");
        standards.insert(function_name.to_string(), inferred.clone());
        inferred
    }

    /// Assesses `dataset` and, if the policy allows, invokes `f` on it.
    ///
    /// Flow: cache lookup, then (on miss) standard resolution, assessment,
    /// and cache store, then policy application.
    ///
    /// # Errors
    ///
    /// [`AdriError::ProtectionFailed`] when the score is below the minimum
    /// under the `Raise` policy; assessment errors propagate except under
    /// `Continue`, which logs and invokes `f` anyway.
    pub fn protect<T, F>(&self, config: &GuardConfig, dataset: &DataSet, f: F) -> Result<T>
    where
        F: FnOnce(&DataSet) -> T,
    {
        let key = format!(
            "{}:{}",
            config.function_name,
            Fingerprint::of(dataset).as_str()
        );

        let result = match self.cache.get(&key) {
            Some(cached) => {
                debug!(function = %config.function_name, "assessment cache hit");
                cached
            }
            None => {
                let source = self.resolve_standard(config, dataset);
                match self.engine.assess(&source, dataset) {
                    Ok(result) => {
                        self.cache.store(&key, result.clone());
                        result
                    }
                    Err(error) if config.on_failure == OnFailure::Continue => {
                        warn!(
                            function = %config.function_name,
                            param = %config.data_param_name,
                            %error,
                            "assessment failed, continuing per policy"
                        );
                        return Ok(f(dataset));
                    }
                    Err(error) => return Err(error),
                }
            }
        };

        let minimum = config.min_score.unwrap_or_else(|| {
            self.resolve_standard(config, dataset).overall_minimum()
        });

        if result.overall_score >= minimum {
            debug!(
                function = %config.function_name,
                score = result.overall_score,
                "data quality gate passed"
            );
            return Ok(f(dataset));
        }

        match config.on_failure {
            OnFailure::Raise => Err(AdriError::ProtectionFailed {
                function: config.function_name.clone(),
                score: result.overall_score,
                minimum,
            }),
            OnFailure::Warn => {
                warn!(
                    function = %config.function_name,
                    score = result.overall_score,
                    minimum,
                    "data quality below minimum, proceeding per policy"
                );
                Ok(f(dataset))
            }
            OnFailure::Continue => {
                info!(
                    function = %config.function_name,
                    score = result.overall_score,
                    minimum,
                    "data quality below minimum, continuing per policy"
                );
                Ok(f(dataset))
            }
        }
    }

    fn resolve_standard(&self, config: &GuardConfig, dataset: &DataSet) -> StandardSource {
        if config.auto_generate_standard {
            self.ensure_standard(&config.function_name, dataset, config.force_regenerate)
        } else {
            let standards = self
                .standards
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            standards
                .get(&config.function_name)
                .cloned()
                .unwrap_or_else(|| infer_standard(&config.function_name, dataset))
        }
    }
}
