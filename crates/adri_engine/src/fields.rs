//! Field analysis.
//!
//! Derives per-field diagnostics from the rule execution log: which rules
//! touched the field, a weighted field score, total failures, a coarse
//! cleanliness tier, and recommended next steps keyed off the observed
//! failure patterns.

use adri_core::{FieldAnalysis, MAX_DIMENSION_SCORE, MlReadiness, RuleExecutionResult};
use std::collections::BTreeMap;

/// Builds the per-field analysis from a completed rule log.
///
/// Table-level rules (field "*") are skipped; they have no single field to
/// attribute their failures to.
pub fn analyze_fields(log: &[RuleExecutionResult]) -> BTreeMap<String, FieldAnalysis> {
    let mut grouped: BTreeMap<&str, Vec<&RuleExecutionResult>> = BTreeMap::new();
    for record in log {
        if record.field == "*" {
            continue;
        }
        grouped.entry(&record.field).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(field, records)| (field.to_string(), analyze_one(field, &records)))
        .collect()
}

fn analyze_one(field: &str, records: &[&RuleExecutionResult]) -> FieldAnalysis {
    let mut rules_applied: Vec<String> = records.iter().map(|r| r.rule_id.clone()).collect();
    rules_applied.sort();
    rules_applied.dedup();

    let total_failures: u64 = records.iter().map(|r| r.failed).sum();

    let weight_sum: f64 = records.iter().map(|r| r.rule_weight).sum();
    let overall_field_score = if weight_sum == 0.0 {
        MAX_DIMENSION_SCORE
    } else {
        records
            .iter()
            .map(|r| r.rule_weight * r.rule_score)
            .sum::<f64>()
            / weight_sum
    };

    let ml_readiness = if records.is_empty() {
        MlReadiness::Unknown
    } else {
        MlReadiness::from_score_pct(overall_field_score / MAX_DIMENSION_SCORE * 100.0)
    };

    FieldAnalysis {
        field_name: field.to_string(),
        rules_applied,
        overall_field_score,
        total_failures,
        ml_readiness,
        recommended_actions: recommend(records),
    }
}

/// Maps failure patterns to concrete remediation hints.
fn recommend(records: &[&RuleExecutionResult]) -> Vec<String> {
    let mut actions = Vec::new();
    let mut patterns: Vec<&str> = records
        .iter()
        .flat_map(|r| r.failure_patterns.keys().map(|k| k.as_str()))
        .collect();
    patterns.sort();
    patterns.dedup();

    for pattern in patterns {
        let action = match pattern {
            "type_mismatch" => "coerce or reject values with the wrong type",
            "pattern_mismatch" => "normalize values to match the expected pattern",
            "invalid_pattern" => "fix the pattern in the standard definition",
            "not_a_string" => "cast values to string before pattern checks",
            "below_minimum" | "above_maximum" => "investigate out-of-range values at the source",
            "not_in_allowed_values" => "map unexpected values into the allowed set",
            "missing_value" => "backfill or source the missing values",
            "duplicate_key" => "deduplicate rows sharing a primary key",
            "format_mismatch" => "normalize the field's formatting upstream",
            "stale_date" => "refresh stale records or widen the freshness window",
            "zscore_outlier" | "iqr_outlier" => "review flagged outliers with the data owner",
            _ => continue,
        };
        actions.push(action.to_string());
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(field: &str, rule_id: &str, failed: u64, score: f64, pattern: &str) -> RuleExecutionResult {
        let total = 10;
        RuleExecutionResult {
            rule_id: rule_id.to_string(),
            dimension: "validity".to_string(),
            field: field.to_string(),
            rule_definition: String::new(),
            total_records: total,
            passed: total - failed,
            failed,
            rule_score: score,
            rule_weight: 1.0,
            execution_time_ms: 0,
            sample_failures: vec![],
            failure_patterns: if failed > 0 {
                HashMap::from([(pattern.to_string(), failed)])
            } else {
                HashMap::new()
            },
        }
    }

    #[test]
    fn test_fields_grouped_and_scored() {
        let log = vec![
            record("email", "type", 0, 20.0, ""),
            record("email", "pattern", 5, 10.0, "pattern_mismatch"),
            record("age", "range", 0, 20.0, ""),
        ];
        let analysis = analyze_fields(&log);

        assert_eq!(analysis.len(), 2);
        let email = &analysis["email"];
        assert_eq!(email.rules_applied, vec!["pattern", "type"]);
        assert_eq!(email.total_failures, 5);
        assert!((email.overall_field_score - 15.0).abs() < 1e-9);
        assert_eq!(email.ml_readiness, MlReadiness::NeedsCleanup);
        assert!(email.recommended_actions[0].contains("normalize"));

        assert_eq!(analysis["age"].ml_readiness, MlReadiness::Ready);
        assert!(analysis["age"].recommended_actions.is_empty());
    }

    #[test]
    fn test_table_level_rules_skipped() {
        let log = vec![record("*", "unique", 2, 16.0, "duplicate_key")];
        assert!(analyze_fields(&log).is_empty());
    }

    #[test]
    fn test_weighted_field_score() {
        let mut heavy = record("x", "type", 0, 20.0, "");
        heavy.rule_weight = 3.0;
        let light = record("x", "pattern", 10, 0.0, "pattern_mismatch");

        let analysis = analyze_fields(&[heavy, light]);
        // (3 * 20 + 1 * 0) / 4 = 15.
        assert!((analysis["x"].overall_field_score - 15.0).abs() < 1e-9);
    }
}
