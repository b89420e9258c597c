//! Completeness dimension scoring.
//!
//! Completeness measures how much of the required data is actually present.
//! Fields declared `nullable: false` form the denominator; with no required
//! fields the score falls back to the raw non-null ratio over the whole table.

use crate::dataset::DataSet;
use crate::recorder::RuleRecorder;
use crate::rules::{RuleOutcome, check_required};
use adri_core::{DimensionDetails, DimensionScore, MAX_DIMENSION_SCORE, StandardSource};
use std::time::Instant;

const DIMENSION: &str = "completeness";

/// Scores the completeness dimension.
pub fn score(source: &StandardSource, dataset: &DataSet, recorder: &mut RuleRecorder) -> DimensionScore {
    let mut details = DimensionDetails::default();
    let mut issues = Vec::new();

    let mut required: Vec<&String> = source
        .field_requirements()
        .iter()
        .filter(|(_, spec)| !spec.nullable)
        .map(|(name, _)| name)
        .collect();
    required.sort();

    if required.is_empty() {
        return score_non_null_ratio(source, dataset, recorder, details, issues);
    }

    for field in required {
        let started = Instant::now();
        let outcome = check_required(dataset, field);
        let weight = source.rule_weight(DIMENSION, "required");
        let record = recorder.record(
            DIMENSION,
            field,
            "required",
            format!("{field} must not be null"),
            weight,
            &outcome,
            started,
        );
        if record.failed > 0 {
            issues.push(format!(
                "{field}: {}/{} required values missing",
                record.failed, record.total_records
            ));
        }
        details
            .rule_weights
            .entry(format!("{field}.required"))
            .or_insert(weight);
        details.per_field.insert(field.clone(), outcome.counts);
        details.rule_counts.merge(&outcome.counts);
    }

    // pass_rate() handles the all-null column: total > 0, passed 0, rate 0.
    let pass_rate = details.rule_counts.pass_rate();
    details.pass_rate = pass_rate;
    details.score_0_20 = pass_rate * MAX_DIMENSION_SCORE;
    DimensionScore::new(details.score_0_20, issues, details)
}

/// Fallback when the standard marks nothing required: the non-null ratio
/// across every (row, field) cell in the table.
fn score_non_null_ratio(
    source: &StandardSource,
    dataset: &DataSet,
    recorder: &mut RuleRecorder,
    mut details: DimensionDetails,
    mut issues: Vec<String>,
) -> DimensionScore {
    let started = Instant::now();
    let fields = dataset.field_names();
    let mut outcome = RuleOutcome::default();
    for field in &fields {
        outcome.counts.merge(&check_required(dataset, field).counts);
    }

    let weight = source.rule_weight(DIMENSION, "non_null_ratio");
    recorder.record(
        DIMENSION,
        "*",
        "non_null_ratio",
        "non-null ratio across all fields".to_string(),
        weight,
        &outcome,
        started,
    );
    issues.push("no required fields declared, scoring raw non-null ratio".to_string());

    details.rule_weights.insert("*.non_null_ratio".to_string(), weight);
    details.rule_counts = outcome.counts;
    details.pass_rate = outcome.counts.pass_rate();
    details.score_0_20 = details.pass_rate * MAX_DIMENSION_SCORE;
    DimensionScore::new(details.score_0_20, issues, details)
}
