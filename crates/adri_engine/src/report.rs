//! Report generation.
//!
//! Turns an `AssessmentResult` into the canonical report document: a
//! `adri_assessment_report` envelope with metadata, summary, the rule
//! execution log, and field analysis. Generation is a pipeline of pure
//! stages over the result; `validate_report` collects structural issues
//! instead of failing on the first one.

use adri_core::{
    AssessmentResult, DIMENSIONS, DatasetInfo, ExecutionStats, FieldAnalysis,
    MAX_DIMENSION_SCORE, RuleExecutionResult,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version string stamped into report metadata.
pub const ADRI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The canonical report document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdriReport {
    /// Envelope key required by report consumers
    pub adri_assessment_report: ReportBody,
}

/// Everything inside the report envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBody {
    /// Run identification and context
    pub metadata: ReportMetadata,
    /// Scores and pass/fail status
    pub summary: ReportSummary,
    /// Per-rule audit trail
    pub rule_execution_log: Vec<RuleExecutionResult>,
    /// Per-field diagnostics
    pub field_analysis: BTreeMap<String, FieldAnalysis>,
}

/// Report metadata block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Unique id: `adri_<YYYYMMDD>_<HHMMSS>_<6 random alphanumerics>`
    pub assessment_id: String,
    /// ISO-8601 timestamp (`YYYY-MM-DDTHH:MM:SSZ`)
    pub timestamp: String,
    /// Version of the assessor that produced the report
    pub adri_version: String,
    /// Id of the standard that was applied
    pub standard_applied: String,
    /// Shape of the assessed dataset
    pub dataset: DatasetInfo,
    /// Execution statistics
    pub execution: ExecutionStats,
}

/// Report summary block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Overall score in [0, 100]
    pub overall_score: f64,
    /// The five dimension scores, keyed by canonical name
    pub dimension_scores: BTreeMap<String, f64>,
    /// "PASSED" or "FAILED"
    pub pass_fail_status: String,
}

/// A structural problem found while validating a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportIssue {
    /// Stable issue code
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl ReportIssue {
    fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
        }
    }
}

/// Builds canonical reports from assessment results.
#[derive(Debug, Default)]
pub struct ReportGenerator;

impl ReportGenerator {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self
    }

    /// Generates the canonical report for `result`.
    pub fn generate(&self, result: &AssessmentResult) -> AdriReport {
        AdriReport {
            adri_assessment_report: ReportBody {
                metadata: build_metadata(result),
                summary: build_summary(result),
                rule_execution_log: result.rule_execution_log.clone(),
                field_analysis: result.field_analysis.clone(),
            },
        }
    }
}

fn build_metadata(result: &AssessmentResult) -> ReportMetadata {
    ReportMetadata {
        assessment_id: new_assessment_id(result.assessment_date),
        timestamp: result.assessment_date.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        adri_version: ADRI_VERSION.to_string(),
        standard_applied: result.standard_id.clone(),
        dataset: result.dataset_info.clone(),
        execution: result.execution_stats.clone(),
    }
}

fn build_summary(result: &AssessmentResult) -> ReportSummary {
    ReportSummary {
        overall_score: result.overall_score,
        dimension_scores: result
            .dimension_scores
            .iter()
            .map(|(name, score)| (name.clone(), score.score))
            .collect(),
        pass_fail_status: if result.passed { "PASSED" } else { "FAILED" }.to_string(),
    }
}

/// Builds a run id: `adri_<YYYYMMDD>_<HHMMSS>_<6 random alphanumerics>`.
pub fn new_assessment_id(at: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("adri_{}_{}", at.format("%Y%m%d_%H%M%S"), suffix)
}

/// Validates a report's structure and numeric invariants.
///
/// Issues are collected, never thrown; an empty vec means the report is
/// well-formed.
pub fn validate_report(report: &AdriReport) -> Vec<ReportIssue> {
    let mut issues = Vec::new();
    let body = &report.adri_assessment_report;

    for dimension in DIMENSIONS {
        match body.summary.dimension_scores.get(dimension) {
            None => issues.push(ReportIssue::new(
                "missing_dimension",
                format!("summary is missing the {dimension} dimension"),
            )),
            Some(score) if !(0.0..=MAX_DIMENSION_SCORE).contains(score) => {
                issues.push(ReportIssue::new(
                    "dimension_out_of_range",
                    format!("{dimension} score {score} outside [0, 20]"),
                ));
            }
            Some(_) => {}
        }
    }
    for name in body.summary.dimension_scores.keys() {
        if !DIMENSIONS.contains(&name.as_str()) {
            issues.push(ReportIssue::new(
                "unknown_dimension",
                format!("summary contains unknown dimension {name}"),
            ));
        }
    }

    let overall = body.summary.overall_score;
    if !(0.0..=100.0).contains(&overall) {
        issues.push(ReportIssue::new(
            "overall_out_of_range",
            format!("overall score {overall} outside [0, 100]"),
        ));
    }

    let dimension_sum: f64 = body.summary.dimension_scores.values().sum();
    if (overall - dimension_sum).abs() > 0.1 {
        issues.push(ReportIssue::new(
            "score_sum_mismatch",
            format!("overall {overall} does not match dimension sum {dimension_sum}"),
        ));
    }

    for record in &body.rule_execution_log {
        if !record.is_consistent() {
            issues.push(ReportIssue::new(
                "rule_counts_inconsistent",
                format!(
                    "rule {} on {}: passed {} + failed {} != total {}",
                    record.rule_id, record.field, record.passed, record.failed,
                    record.total_records
                ),
            ));
        }
    }

    if !matches!(body.summary.pass_fail_status.as_str(), "PASSED" | "FAILED") {
        issues.push(ReportIssue::new(
            "bad_status",
            format!("pass_fail_status is {}", body.summary.pass_fail_status),
        ));
    }

    issues
}
