//! Assessment result types.
//!
//! Everything the engine produces per assessment run: per-dimension scores
//! with their explain payloads, the per-rule execution log, per-field
//! analysis, and the aggregated `AssessmentResult`. All types serialize so a
//! rendered report can be re-parsed into the numbers that produced it.

use crate::MAX_DIMENSION_SCORE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Upper bound on retained sample failures per rule.
pub const MAX_SAMPLE_FAILURES: usize = 5;

/// Pass/fail/total counters for a rule or a dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCounts {
    /// Values the rule applied to
    pub total: u64,
    /// Values that passed
    pub passed: u64,
    /// Values that failed
    pub failed: u64,
}

impl RuleCounts {
    /// Pass rate in [0, 1]; an empty denominator counts as a full pass.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }

    /// Invariant check: `passed + failed == total`.
    pub fn is_consistent(&self) -> bool {
        self.passed + self.failed == self.total
    }

    /// Merges another counter into this one.
    pub fn merge(&mut self, other: &RuleCounts) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
    }
}

/// Explain payload for one dimension, consumed by the `explain` surface.
///
/// Stable and testable independent of any formatting: counts, pass rate, the
/// 0-20 score, per-field breakdown, and the rule weights that were applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DimensionDetails {
    /// Aggregate counters across all rules in the dimension
    pub rule_counts: RuleCounts,

    /// Aggregate pass rate in [0, 1]
    pub pass_rate: f64,

    /// The dimension score on the 0-20 scale
    pub score_0_20: f64,

    /// Per-field counters
    pub per_field: BTreeMap<String, RuleCounts>,

    /// Weights applied per rule id
    pub rule_weights: BTreeMap<String, f64>,
}

/// Score for a single quality dimension.
///
/// Created once per assessment run and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Score in [0, 20]
    pub score: f64,

    /// Maximum attainable score (always 20.0)
    pub max_score: f64,

    /// Human-readable issues found while scoring
    pub issues: Vec<String>,

    /// Structured explain payload
    pub details: DimensionDetails,
}

impl DimensionScore {
    /// Builds a score, clamping into [0, max].
    pub fn new(score: f64, issues: Vec<String>, details: DimensionDetails) -> Self {
        Self {
            score: score.clamp(0.0, MAX_DIMENSION_SCORE),
            max_score: MAX_DIMENSION_SCORE,
            issues,
            details,
        }
    }
}

/// Audit record for one executed (dimension, field, rule) tuple.
///
/// `passed` and `failed` are value counts, never booleans, so
/// `passed + failed == total_records` holds for every record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleExecutionResult {
    /// Rule identifier (e.g., "type", "pattern", "recency")
    pub rule_id: String,

    /// Dimension the rule belongs to
    pub dimension: String,

    /// Field the rule was applied to ("*" for table-level rules)
    pub field: String,

    /// Human-readable rule definition
    pub rule_definition: String,

    /// Values the rule applied to
    pub total_records: u64,

    /// Values that passed
    pub passed: u64,

    /// Values that failed
    pub failed: u64,

    /// Rule score on the 0-20 scale (pass rate x 20)
    pub rule_score: f64,

    /// Weight applied inside the dimension, in [0, 1]
    pub rule_weight: f64,

    /// Wall-clock execution time
    pub execution_time_ms: u64,

    /// Up to [`MAX_SAMPLE_FAILURES`] example failures
    pub sample_failures: Vec<String>,

    /// Histogram of failure patterns
    pub failure_patterns: HashMap<String, u64>,
}

impl RuleExecutionResult {
    /// Invariant check: `passed + failed == total_records`.
    pub fn is_consistent(&self) -> bool {
        self.passed + self.failed == self.total_records
    }
}

/// Coarse classification of a field's cleanliness for downstream consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MlReadiness {
    /// Field score >= 90% of max
    Ready,
    /// Field score >= 70% of max
    NeedsCleanup,
    /// Field score below 70% of max
    NotReady,
    /// No rules were applied to the field
    Unknown,
}

impl MlReadiness {
    /// Classifies from a score expressed as a percentage of max.
    pub fn from_score_pct(pct: f64) -> Self {
        if pct >= 90.0 {
            MlReadiness::Ready
        } else if pct >= 70.0 {
            MlReadiness::NeedsCleanup
        } else {
            MlReadiness::NotReady
        }
    }
}

/// Aggregated diagnostics for a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldAnalysis {
    /// Field name
    pub field_name: String,

    /// Rule ids that were applied to this field
    pub rules_applied: Vec<String>,

    /// Weighted field score on the 0-20 scale
    pub overall_field_score: f64,

    /// Total failing values across all rules
    pub total_failures: u64,

    /// Coarse cleanliness classification
    pub ml_readiness: MlReadiness,

    /// Suggested next steps derived from the failure patterns
    pub recommended_actions: Vec<String>,
}

/// Basic shape information about the assessed dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Number of rows
    pub rows: u64,

    /// Number of columns
    pub columns: u64,

    /// Column names, sorted
    pub fields: Vec<String>,
}

/// Execution statistics for an assessment run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionStats {
    /// Total assessment duration
    pub duration_ms: u64,

    /// Number of rules executed
    pub rules_executed: u64,

    /// Total value-level checks performed
    pub total_validations: u64,
}

/// The full outcome of one `assess()` call.
///
/// Created fresh per call, owned exclusively by the caller until handed to
/// the report generator or the protection-gate cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Sum of the five dimension scores, in [0, 100]
    pub overall_score: f64,

    /// Whether the dataset met the overall and per-dimension minimums
    pub passed: bool,

    /// Exactly the five canonical dimensions, in deterministic order
    pub dimension_scores: BTreeMap<String, DimensionScore>,

    /// Identifier of the standard that was applied
    pub standard_id: String,

    /// When the assessment ran
    pub assessment_date: DateTime<Utc>,

    /// Per-rule audit trail
    pub rule_execution_log: Vec<RuleExecutionResult>,

    /// Per-field diagnostics
    pub field_analysis: BTreeMap<String, FieldAnalysis>,

    /// Dataset shape
    pub dataset_info: DatasetInfo,

    /// Execution statistics
    pub execution_stats: ExecutionStats,

    /// Free-form metadata
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl AssessmentResult {
    /// Sum of dimension scores, independent of `overall_score`.
    pub fn dimension_total(&self) -> f64 {
        self.dimension_scores.values().map(|d| d.score).sum()
    }
}
