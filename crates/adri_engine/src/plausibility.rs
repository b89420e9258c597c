//! Plausibility dimension scoring.
//!
//! Plausibility runs the standard's outlier rules (z-score, IQR, or business
//! range) over numeric columns. Fixed, explainable formulas only; the score
//! is the weighted mean pass rate scaled to 0-20. Unconfigured standards get
//! the 18.0 default.

use crate::dataset::DataSet;
use crate::recorder::RuleRecorder;
use crate::rules::check_outliers;
use adri_core::{
    DimensionDetails, DimensionScore, MAX_DIMENSION_SCORE, OutlierMethod, StandardSource,
};
use std::time::Instant;

const DIMENSION: &str = "plausibility";

/// Score applied when a standard declares no plausibility rules.
pub const UNCONFIGURED_SCORE: f64 = 18.0;

/// Scores the plausibility dimension.
pub fn score(source: &StandardSource, dataset: &DataSet, recorder: &mut RuleRecorder) -> DimensionScore {
    let rules = source
        .plausibility()
        .map(|config| config.rules.as_slice())
        .unwrap_or_default();

    if rules.is_empty() {
        let mut details = DimensionDetails::default();
        details.pass_rate = 1.0;
        details.score_0_20 = UNCONFIGURED_SCORE;
        return DimensionScore::new(
            UNCONFIGURED_SCORE,
            vec!["no plausibility rules configured, default score applied".to_string()],
            details,
        );
    }

    let mut details = DimensionDetails::default();
    let mut issues = Vec::new();
    let mut weighted_rate = 0.0;
    let mut weight_sum = 0.0;

    for rule in rules {
        let rule_id = method_name(rule.method);
        let started = Instant::now();
        let outcome = check_outliers(
            dataset,
            &rule.field,
            rule.method,
            rule.threshold,
            rule.min,
            rule.max,
        );
        let record = recorder.record(
            DIMENSION,
            &rule.field,
            rule_id,
            rule_definition(rule),
            rule.weight,
            &outcome,
            started,
        );
        if record.failed > 0 {
            issues.push(format!(
                "{}: {}/{} values flagged as {rule_id} outliers",
                rule.field, record.failed, record.total_records
            ));
        }
        details
            .rule_weights
            .insert(format!("{}.{rule_id}", rule.field), rule.weight);
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

fn method_name(method: OutlierMethod) -> &'static str {
    match method {
        OutlierMethod::Zscore => "zscore",
        OutlierMethod::Iqr => "iqr",
        OutlierMethod::Range => "range",
    }
}

fn rule_definition(rule: &adri_core::OutlierRule) -> String {
    match rule.method {
        OutlierMethod::Zscore => format!(
            "|z| <= {} on {}",
            rule.threshold.unwrap_or(3.0),
            rule.field
        ),
        OutlierMethod::Iqr => format!("{} within 1.5 x IQR fences", rule.field),
        OutlierMethod::Range => {
            let lo = rule.min.map_or("-inf".to_string(), |v| v.to_string());
            let hi = rule.max.map_or("inf".to_string(), |v| v.to_string());
            format!("{} within business bounds [{lo}, {hi}]", rule.field)
        }
    }
}
