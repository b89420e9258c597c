//! Validity dimension scoring.
//!
//! Validity applies the per-field rules a standard declares: type, pattern,
//! numeric range, and allowed values. The score is the aggregate pass rate
//! across every executed check, scaled to the 0-20 dimension range.

use crate::dataset::DataSet;
use crate::recorder::RuleRecorder;
use crate::rules::{
    self, RuleOutcome, check_allowed_values, check_pattern, check_range, check_type,
};
use adri_core::{DimensionDetails, DimensionScore, MAX_DIMENSION_SCORE, StandardSource};
use std::time::Instant;

const DIMENSION: &str = "validity";

/// Score applied when a standard declares no validity rules at all.
pub const UNCONFIGURED_SCORE: f64 = 18.0;

/// Scores the validity dimension against the standard's field requirements.
pub fn score(source: &StandardSource, dataset: &DataSet, recorder: &mut RuleRecorder) -> DimensionScore {
    let mut details = DimensionDetails::default();
    let mut issues = Vec::new();

    // Deterministic field order regardless of the map's iteration order.
    let mut fields: Vec<&String> = source.field_requirements().keys().collect();
    fields.sort();

    for field in fields {
        let spec = &source.field_requirements()[field];
        let mut field_counts = adri_core::RuleCounts::default();

        let mut run = |rule_id: &str,
                       definition: String,
                       outcome: RuleOutcome,
                       recorder: &mut RuleRecorder,
                       issues: &mut Vec<String>,
                       started: Instant| {
            let weight = source.rule_weight(DIMENSION, rule_id);
            let record =
                recorder.record(DIMENSION, field, rule_id, definition, weight, &outcome, started);
            if record.failed > 0 {
                issues.push(format!(
                    "{field}: {}/{} values failed the {rule_id} rule",
                    record.failed, record.total_records
                ));
            }
            details
                .rule_weights
                .entry(format!("{field}.{rule_id}"))
                .or_insert(weight);
            field_counts.merge(&outcome.counts);
            details.rule_counts.merge(&outcome.counts);
        };

        let started = Instant::now();
        let outcome = check_type(dataset, field, &spec.field_type);
        run(
            "type",
            format!("type is {}", spec.field_type),
            outcome,
            recorder,
            &mut issues,
            started,
        );

        if let Some(pattern) = &spec.pattern {
            let started = Instant::now();
            let regex = rules::compile_pattern(pattern);
            if regex.is_none() {
                issues.push(format!("{field}: pattern does not compile, all values fail"));
            }
            let outcome = check_pattern(dataset, field, regex.as_ref());
            run(
                "pattern",
                format!("matches {pattern}"),
                outcome,
                recorder,
                &mut issues,
                started,
            );
        }

        if spec.min_value.is_some() || spec.max_value.is_some() {
            let started = Instant::now();
            let outcome = check_range(dataset, field, spec.min_value, spec.max_value);
            run(
                "range",
                range_definition(spec.min_value, spec.max_value),
                outcome,
                recorder,
                &mut issues,
                started,
            );
        }

        if let Some(allowed) = &spec.allowed_values {
            let started = Instant::now();
            let outcome = check_allowed_values(dataset, field, allowed);
            run(
                "allowed_values",
                format!("one of {allowed:?}"),
                outcome,
                recorder,
                &mut issues,
                started,
            );
        }

        details.per_field.insert(field.clone(), field_counts);
    }

    if details.rule_counts.total == 0 {
        issues.push("no applicable validity checks, default score applied".to_string());
        details.pass_rate = 1.0;
        details.score_0_20 = UNCONFIGURED_SCORE;
        return DimensionScore::new(UNCONFIGURED_SCORE, issues, details);
    }

    let pass_rate = details.rule_counts.pass_rate();
    details.pass_rate = pass_rate;
    details.score_0_20 = pass_rate * MAX_DIMENSION_SCORE;
    DimensionScore::new(details.score_0_20, issues, details)
}

fn range_definition(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("in [{lo}, {hi}]"),
        (Some(lo), None) => format!(">= {lo}"),
        (None, Some(hi)) => format!("<= {hi}"),
        (None, None) => "unbounded".to_string(),
    }
}
