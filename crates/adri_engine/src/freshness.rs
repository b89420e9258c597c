//! Freshness dimension scoring.
//!
//! Freshness checks one configured date field against a reference date and a
//! recency window. Unparsable and null dates are excluded from the
//! denominator rather than penalized; the type and completeness rules are the
//! place to report those. Unconfigured standards get the 18.0 default.

use crate::dataset::DataSet;
use crate::recorder::RuleRecorder;
use crate::rules::{check_recency, parse_date};
use adri_core::{DimensionDetails, DimensionScore, MAX_DIMENSION_SCORE, StandardSource};
use chrono::Utc;
use std::time::Instant;

const DIMENSION: &str = "freshness";

/// Score applied when a standard declares no freshness rule.
pub const UNCONFIGURED_SCORE: f64 = 18.0;

/// Scores the freshness dimension.
pub fn score(source: &StandardSource, dataset: &DataSet, recorder: &mut RuleRecorder) -> DimensionScore {
    let Some(config) = source.freshness() else {
        let mut details = DimensionDetails::default();
        details.pass_rate = 1.0;
        details.score_0_20 = UNCONFIGURED_SCORE;
        return DimensionScore::new(
            UNCONFIGURED_SCORE,
            vec!["no freshness rule configured, default score applied".to_string()],
            details,
        );
    };

    let mut issues = Vec::new();
    let as_of = match config.as_of.as_deref().map(parse_date) {
        Some(Some(parsed)) => parsed,
        Some(None) => {
            issues.push("configured as_of date does not parse, using now".to_string());
            Utc::now()
        }
        None => Utc::now(),
    };

    let started = Instant::now();
    let outcome = check_recency(dataset, &config.date_field, as_of, config.window_days);
    let weight = source.rule_weight(DIMENSION, "recency");
    let record = recorder.record(
        DIMENSION,
        &config.date_field,
        "recency",
        format!(
            "{} within {} days of {}",
            config.date_field,
            config.window_days,
            as_of.format("%Y-%m-%d")
        ),
        weight,
        &outcome,
        started,
    );
    if record.failed > 0 {
        issues.push(format!(
            "{}: {}/{} dates older than {} days",
            config.date_field, record.failed, record.total_records, config.window_days
        ));
    }

    let excluded = dataset.len() as u64 - outcome.counts.total;
    if excluded > 0 {
        issues.push(format!(
            "{}: {excluded} rows excluded (null or unparsable dates)",
            config.date_field
        ));
    }

    let mut details = DimensionDetails::default();
    details
        .rule_weights
        .insert(format!("{}.recency", config.date_field), weight);
    details
        .per_field
        .insert(config.date_field.clone(), outcome.counts);
    details.rule_counts = outcome.counts;
    details.pass_rate = outcome.counts.pass_rate();
    details.score_0_20 = details.pass_rate * MAX_DIMENSION_SCORE;
    DimensionScore::new(details.score_0_20, issues, details)
}
