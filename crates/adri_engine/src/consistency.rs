//! Consistency dimension scoring.
//!
//! Consistency covers primary-key uniqueness and per-field formatting rules.
//! Each rule carries a weight; the dimension score is the weighted mean pass
//! rate scaled to 0-20. A standard with no consistency section gets the
//! documented default of 18.0.

use crate::dataset::DataSet;
use crate::recorder::RuleRecorder;
use crate::rules::{check_format, check_unique};
use adri_core::{DimensionDetails, DimensionScore, MAX_DIMENSION_SCORE, StandardSource};
use std::time::Instant;

const DIMENSION: &str = "consistency";

/// Score applied when a standard declares no consistency rules.
pub const UNCONFIGURED_SCORE: f64 = 18.0;

/// Scores the consistency dimension.
pub fn score(source: &StandardSource, dataset: &DataSet, recorder: &mut RuleRecorder) -> DimensionScore {
    let Some(config) = source.consistency() else {
        return unconfigured();
    };
    if config.primary_key_fields.is_empty() && config.format_rules.is_empty() {
        return unconfigured();
    }

    let mut details = DimensionDetails::default();
    let mut issues = Vec::new();
    let mut weighted_rate = 0.0;
    let mut weight_sum = 0.0;

    if !config.primary_key_fields.is_empty() {
        let started = Instant::now();
        let outcome = check_unique(dataset, &config.primary_key_fields);
        let weight = source.rule_weight(DIMENSION, "unique");
        let record = recorder.record(
            DIMENSION,
            "*",
            "unique",
            format!("primary key ({}) is unique", config.primary_key_fields.join(", ")),
            weight,
            &outcome,
            started,
        );
        if record.failed > 0 {
            issues.push(format!(
                "{} rows share a duplicated primary key",
                record.failed
            ));
        }
        details.rule_weights.insert("*.unique".to_string(), weight);
        details.rule_counts.merge(&outcome.counts);
        weighted_rate += weight * outcome.pass_rate();
        weight_sum += weight;
    }

    for rule in &config.format_rules {
        let started = Instant::now();
        let outcome = check_format(dataset, &rule.field, rule.format);
        let record = recorder.record(
            DIMENSION,
            &rule.field,
            "format",
            format!("{} is {:?}", rule.field, rule.format).to_lowercase(),
            rule.weight,
            &outcome,
            started,
        );
        if record.failed > 0 {
            issues.push(format!(
                "{}: {}/{} values break the expected format",
                rule.field, record.failed, record.total_records
            ));
        }
        details
            .rule_weights
            .insert(format!("{}.format", rule.field), rule.weight);
        details
            .per_field
            .entry(rule.field.clone())
            .or_default()
            .merge(&outcome.counts);
        details.rule_counts.merge(&outcome.counts);
        weighted_rate += rule.weight * outcome.pass_rate();
        weight_sum += rule.weight;
    }

    let pass_rate = if weight_sum == 0.0 {
        1.0
    } else {
        weighted_rate / weight_sum
    };
    details.pass_rate = pass_rate;
    details.score_0_20 = pass_rate * MAX_DIMENSION_SCORE;
    DimensionScore::new(details.score_0_20, issues, details)
}

fn unconfigured() -> DimensionScore {
    let mut details = DimensionDetails::default();
    details.pass_rate = 1.0;
    details.score_0_20 = UNCONFIGURED_SCORE;
    DimensionScore::new(
        UNCONFIGURED_SCORE,
        vec!["no consistency rules configured, default score applied".to_string()],
        details,
    )
}
