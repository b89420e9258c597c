//! Rule evaluators.
//!
//! Stateless checks, each a pure function of (dataset, field, rule
//! parameters) returning a [`RuleOutcome`] with per-value pass/fail counts,
//! a bounded list of sample failures, and a failure-pattern histogram.
//!
//! Null handling is rule-specific: type/pattern/range/allowed-values rules
//! skip nulls (excluded from the rule's denominator), while the required-field
//! rule counts nulls directly. Numeric range rules treat non-numeric values as
//! not applicable and pass them; pattern rules with an uncompilable regex fail
//! closed rather than raise.

use crate::dataset::{DataSet, DataValue};
use adri_core::{FormatKind, MAX_DIMENSION_SCORE, MAX_SAMPLE_FAILURES, OutlierMethod, RuleCounts};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::HashMap;

/// Outcome of evaluating one rule over one column (or key set).
#[derive(Debug, Clone, Default)]
pub struct RuleOutcome {
    /// Pass/fail/total counters; `passed + failed == total` by construction
    pub counts: RuleCounts,
    /// Up to [`MAX_SAMPLE_FAILURES`] example failing values
    pub sample_failures: Vec<String>,
    /// Failure-pattern histogram (pattern name -> count)
    pub failure_patterns: HashMap<String, u64>,
}

impl RuleOutcome {
    fn pass(&mut self) {
        self.counts.total += 1;
        self.counts.passed += 1;
    }

    fn fail(&mut self, sample: String, pattern: &str) {
        self.counts.total += 1;
        self.counts.failed += 1;
        if self.sample_failures.len() < MAX_SAMPLE_FAILURES {
            self.sample_failures.push(sample);
        }
        *self.failure_patterns.entry(pattern.to_string()).or_insert(0) += 1;
    }

    /// Pass rate in [0, 1]; empty denominator counts as a full pass.
    pub fn pass_rate(&self) -> f64 {
        self.counts.pass_rate()
    }

    /// Rule score on the 0-20 scale.
    pub fn score(&self) -> f64 {
        self.pass_rate() * MAX_DIMENSION_SCORE
    }
}

/// Checks each non-null value of `field` against a declared type name.
///
/// Unknown type names are lenient and accept any value (a definition-time
/// validator rejects them before assessment; this keeps evaluation total).
pub fn check_type(dataset: &DataSet, field: &str, declared: &str) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    let expected = declared.to_lowercase();

    for row in dataset.rows() {
        let value = dataset.value(row, field);
        if value.is_null() {
            continue;
        }

        let matches = match expected.as_str() {
            "string" => matches!(value, DataValue::String(_) | DataValue::Timestamp(_)),
            "int" | "int64" | "integer" => matches!(value, DataValue::Int(_)),
            "float" | "float64" | "number" => {
                matches!(value, DataValue::Float(_) | DataValue::Int(_))
            }
            "bool" | "boolean" => matches!(value, DataValue::Bool(_)),
            "date" | "timestamp" => value
                .as_date_str()
                .map(|s| parse_date(s).is_some())
                .unwrap_or(false),
            _ => true,
        };

        if matches {
            outcome.pass();
        } else {
            outcome.fail(
                format!("{} ({})", value.display(), value.type_name()),
                "type_mismatch",
            );
        }
    }

    outcome
}

/// Checks each non-null string value of `field` against a compiled pattern.
///
/// `regex` is `None` when the configured pattern did not compile; in that
/// case every applicable value fails (fail closed) under the
/// `invalid_pattern` failure pattern.
pub fn check_pattern(dataset: &DataSet, field: &str, regex: Option<&Regex>) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for row in dataset.rows() {
        let value = dataset.value(row, field);
        if value.is_null() {
            continue;
        }

        match regex {
            None => outcome.fail(value.display(), "invalid_pattern"),
            Some(re) => match value.as_string() {
                Some(s) if re.is_match(s) => outcome.pass(),
                Some(s) => outcome.fail(s.to_string(), "pattern_mismatch"),
                None => outcome.fail(
                    format!("{} ({})", value.display(), value.type_name()),
                    "not_a_string",
                ),
            },
        }
    }

    outcome
}

/// Checks each non-null numeric value of `field` against inclusive bounds.
///
/// Non-numeric values are treated as not applicable and pass. This is a
/// deliberate policy, not a parsing bug: the type rule reports them.
pub fn check_range(
    dataset: &DataSet,
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for row in dataset.rows() {
        let value = dataset.value(row, field);
        if value.is_null() {
            continue;
        }

        let Some(num) = value.as_float() else {
            outcome.pass();
            continue;
        };

        if min.is_some_and(|m| num < m) {
            outcome.fail(num.to_string(), "below_minimum");
        } else if max.is_some_and(|m| num > m) {
            outcome.fail(num.to_string(), "above_maximum");
        } else {
            outcome.pass();
        }
    }

    outcome
}

/// Checks each non-null value of `field` against an allowed set.
///
/// Values are compared by canonical string form, so `Int(1)` matches "1".
pub fn check_allowed_values(dataset: &DataSet, field: &str, allowed: &[String]) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for row in dataset.rows() {
        let value = dataset.value(row, field);
        if value.is_null() {
            continue;
        }

        let canonical = value.display();
        if allowed.iter().any(|a| *a == canonical) {
            outcome.pass();
        } else {
            outcome.fail(canonical, "not_in_allowed_values");
        }
    }

    outcome
}

/// Counts nulls (and missing keys) in `field` directly; total is the row
/// count. The completeness denominator for required fields.
pub fn check_required(dataset: &DataSet, field: &str) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for row in dataset.rows() {
        if dataset.value(row, field).is_null() {
            outcome.fail(format!("{field} is null"), "missing_value");
        } else {
            outcome.pass();
        }
    }

    outcome
}

/// Checks uniqueness of the composite key formed by `key_fields`.
///
/// Every row whose key occurs more than once fails, so a duplicate pair
/// contributes two failures. A row missing part of its key is skipped.
pub fn check_unique(dataset: &DataSet, key_fields: &[String]) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    let mut occurrences: HashMap<String, u64> = HashMap::new();
    let mut keys = Vec::with_capacity(dataset.len());

    for row in dataset.rows() {
        let key = composite_key(dataset, row, key_fields);
        if let Some(key) = &key {
            *occurrences.entry(key.clone()).or_insert(0) += 1;
        }
        keys.push(key);
    }

    for key in keys.into_iter().flatten() {
        if occurrences[&key] > 1 {
            outcome.fail(key, "duplicate_key");
        } else {
            outcome.pass();
        }
    }

    outcome
}

fn composite_key(dataset: &DataSet, row: &crate::dataset::DataRow, fields: &[String]) -> Option<String> {
    let mut parts = Vec::with_capacity(fields.len());
    for field in fields {
        let value = dataset.value(row, field);
        if value.is_null() {
            return None;
        }
        parts.push(value.display());
    }
    Some(parts.join("|"))
}

/// Checks each value of `field` for a configured format.
pub fn check_format(dataset: &DataSet, field: &str, format: FormatKind) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for row in dataset.rows() {
        let value = dataset.value(row, field);
        if value.is_null() {
            continue;
        }

        let Some(s) = value.as_string() else {
            outcome.pass(); // not applicable to non-strings
            continue;
        };

        let ok = match format {
            FormatKind::Lowercase => !s.chars().any(|c| c.is_uppercase()),
            FormatKind::Uppercase => !s.chars().any(|c| c.is_lowercase()),
            FormatKind::Phone => {
                !s.is_empty()
                    && s.chars()
                        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
                    && s.chars().filter(|c| c.is_ascii_digit()).count() >= 7
            }
        };

        if ok {
            outcome.pass();
        } else {
            outcome.fail(s.to_string(), "format_mismatch");
        }
    }

    outcome
}

/// Checks each date in `field` against a reference date and a window.
///
/// Null and unparsable dates are excluded from the denominator entirely,
/// never penalized. Dates after `as_of` pass (age is negative).
pub fn check_recency(
    dataset: &DataSet,
    field: &str,
    as_of: DateTime<Utc>,
    window_days: i64,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for row in dataset.rows() {
        let value = dataset.value(row, field);
        if value.is_null() {
            continue;
        }
        let Some(parsed) = value.as_date_str().and_then(parse_date) else {
            continue; // unparsable: excluded, not failed
        };

        let age_days = as_of.signed_duration_since(parsed).num_days();
        if age_days <= window_days {
            outcome.pass();
        } else {
            outcome.fail(
                format!("{} ({} days old)", value.display(), age_days),
                "stale_date",
            );
        }
    }

    outcome
}

/// Flags outliers in the numeric values of `field` with a fixed formula.
///
/// For `zscore` and `iqr`, non-numeric and null values are excluded from the
/// denominator; for `range`, the numeric-range policy applies (non-numeric
/// passes).
pub fn check_outliers(
    dataset: &DataSet,
    field: &str,
    method: OutlierMethod,
    threshold: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
) -> RuleOutcome {
    match method {
        OutlierMethod::Range => check_range(dataset, field, min, max),
        OutlierMethod::Zscore => {
            let values = numeric_column(dataset, field);
            let threshold = threshold.unwrap_or(3.0);
            let mut outcome = RuleOutcome::default();

            let n = values.len() as f64;
            if values.is_empty() {
                return outcome;
            }
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let std_dev = variance.sqrt();

            for v in values {
                // Zero variance: every value is the mean, nothing is an outlier.
                let z = if std_dev == 0.0 { 0.0 } else { (v - mean) / std_dev };
                if z.abs() > threshold {
                    outcome.fail(format!("{v} (z={z:.2})"), "zscore_outlier");
                } else {
                    outcome.pass();
                }
            }
            outcome
        }
        OutlierMethod::Iqr => {
            let mut values = numeric_column(dataset, field);
            let mut outcome = RuleOutcome::default();
            if values.is_empty() {
                return outcome;
            }
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            let q1 = quantile(&values, 0.25);
            let q3 = quantile(&values, 0.75);
            let iqr = q3 - q1;
            let lower = q1 - 1.5 * iqr;
            let upper = q3 + 1.5 * iqr;

            for row in dataset.rows() {
                let Some(v) = dataset.value(row, field).as_float() else {
                    continue;
                };
                if v < lower || v > upper {
                    outcome.fail(format!("{v} (fences [{lower:.2}, {upper:.2}])"), "iqr_outlier");
                } else {
                    outcome.pass();
                }
            }
            outcome
        }
    }
}

fn numeric_column(dataset: &DataSet, field: &str) -> Vec<f64> {
    dataset
        .rows()
        .filter_map(|row| dataset.value(row, field).as_float())
        .collect()
}

/// Linear-interpolation quantile over sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Parses a date string in the formats data tends to arrive in.
///
/// Supports ISO 8601 / RFC 3339, Unix epoch seconds and milliseconds,
/// `YYYY-MM-DD`, and `YYYY-MM-DD HH:MM:SS`. Returns `None` for anything else.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(epoch) = raw.parse::<i64>() {
        return if epoch > 10_000_000_000 {
            DateTime::from_timestamp_millis(epoch)
        } else {
            DateTime::from_timestamp(epoch, 0)
        };
    }

    if raw.contains(' ') && raw.len() >= 19 {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    if raw.len() == 10 {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            let datetime = date.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(datetime, Utc));
        }
    }

    None
}

/// Compiles a pattern, returning `None` when it does not compile.
///
/// Evaluation-time counterpart of the definition-time pattern check: the
/// caller passes the `None` through to [`check_pattern`], which fails closed.
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    Regex::new(pattern).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataRow;

    fn column(values: Vec<DataValue>) -> DataSet {
        DataSet::from_rows(
            values
                .into_iter()
                .map(|v| {
                    let mut row = DataRow::new();
                    row.insert("x".to_string(), v);
                    row
                })
                .collect(),
        )
    }

    #[test]
    fn test_check_type_skips_nulls() {
        let dataset = column(vec![
            DataValue::String("a".into()),
            DataValue::Null,
            DataValue::Int(1),
        ]);
        let outcome = check_type(&dataset, "x", "string");

        assert_eq!(outcome.counts.total, 2); // null excluded
        assert_eq!(outcome.counts.passed, 1);
        assert_eq!(outcome.counts.failed, 1);
        assert_eq!(outcome.failure_patterns["type_mismatch"], 1);
    }

    #[test]
    fn test_check_type_unknown_type_is_lenient() {
        let dataset = column(vec![DataValue::Int(1), DataValue::Bool(true)]);
        let outcome = check_type(&dataset, "x", "whatever");
        assert_eq!(outcome.counts.failed, 0);
    }

    #[test]
    fn test_check_pattern() {
        let re = Regex::new(r"^[a-z]+$").unwrap();
        let dataset = column(vec![
            DataValue::String("abc".into()),
            DataValue::String("ABC".into()),
            DataValue::Null,
        ]);
        let outcome = check_pattern(&dataset, "x", Some(&re));

        assert_eq!(outcome.counts.total, 2);
        assert_eq!(outcome.counts.passed, 1);
        assert_eq!(outcome.sample_failures, vec!["ABC"]);
    }

    #[test]
    fn test_check_pattern_fails_closed_on_invalid_regex() {
        let dataset = column(vec![
            DataValue::String("anything".into()),
            DataValue::String("goes".into()),
        ]);
        let outcome = check_pattern(&dataset, "x", None);

        assert_eq!(outcome.counts.total, 2);
        assert_eq!(outcome.counts.failed, 2);
        assert_eq!(outcome.failure_patterns["invalid_pattern"], 2);
    }

    #[test]
    fn test_check_range_non_numeric_passes() {
        let dataset = column(vec![
            DataValue::Int(50),
            DataValue::Int(200),
            DataValue::String("n/a".into()),
            DataValue::Null,
        ]);
        let outcome = check_range(&dataset, "x", Some(0.0), Some(120.0));

        assert_eq!(outcome.counts.total, 3); // null excluded, "n/a" included and passing
        assert_eq!(outcome.counts.passed, 2);
        assert_eq!(outcome.counts.failed, 1);
        assert_eq!(outcome.failure_patterns["above_maximum"], 1);
    }

    #[test]
    fn test_check_allowed_values_canonical_form() {
        let dataset = column(vec![
            DataValue::String("active".into()),
            DataValue::Int(1),
            DataValue::String("pending".into()),
        ]);
        let allowed = vec!["active".to_string(), "1".to_string()];
        let outcome = check_allowed_values(&dataset, "x", &allowed);

        assert_eq!(outcome.counts.passed, 2);
        assert_eq!(outcome.counts.failed, 1);
    }

    #[test]
    fn test_check_required_counts_nulls_and_missing() {
        let mut r1 = DataRow::new();
        r1.insert("x".to_string(), DataValue::String("v".into()));
        let mut r2 = DataRow::new();
        r2.insert("x".to_string(), DataValue::Null);
        let r3 = DataRow::new(); // key absent entirely

        let dataset = DataSet::from_rows(vec![r1, r2, r3]);
        let outcome = check_required(&dataset, "x");

        assert_eq!(outcome.counts.total, 3);
        assert_eq!(outcome.counts.failed, 2);
    }

    #[test]
    fn test_check_unique_all_group_members_fail() {
        let dataset = column(vec![
            DataValue::String("dup".into()),
            DataValue::String("dup".into()),
            DataValue::String("ok".into()),
        ]);
        let outcome = check_unique(&dataset, &["x".to_string()]);

        assert_eq!(outcome.counts.total, 3);
        assert_eq!(outcome.counts.failed, 2);
        assert_eq!(outcome.counts.passed, 1);
    }

    #[test]
    fn test_check_unique_composite_key() {
        let make = |a: &str, b: &str| {
            let mut row = DataRow::new();
            row.insert("a".to_string(), DataValue::String(a.into()));
            row.insert("b".to_string(), DataValue::String(b.into()));
            row
        };
        let dataset = DataSet::from_rows(vec![make("u1", "e1"), make("u1", "e2")]);
        let outcome = check_unique(&dataset, &["a".to_string(), "b".to_string()]);

        assert_eq!(outcome.counts.failed, 0);
    }

    #[test]
    fn test_check_format_lowercase() {
        let dataset = column(vec![
            DataValue::String("abc@x.com".into()),
            DataValue::String("ABC@x.com".into()),
        ]);
        let outcome = check_format(&dataset, "x", FormatKind::Lowercase);
        assert_eq!(outcome.counts.passed, 1);
        assert_eq!(outcome.counts.failed, 1);
    }

    #[test]
    fn test_check_format_phone() {
        let dataset = column(vec![
            DataValue::String("+1 (555) 123-4567".into()),
            DataValue::String("call me".into()),
        ]);
        let outcome = check_format(&dataset, "x", FormatKind::Phone);
        assert_eq!(outcome.counts.passed, 1);
        assert_eq!(outcome.counts.failed, 1);
    }

    #[test]
    fn test_check_recency_excludes_unparsable() {
        let as_of = parse_date("2026-01-01T00:00:00Z").unwrap();
        let dataset = column(vec![
            DataValue::String("2025-12-02".into()),  // 30 days old: pass
            DataValue::String("2024-11-27".into()),  // 400 days old: fail
            DataValue::Null,                          // excluded
            DataValue::String("not a date".into()), // excluded
        ]);
        let outcome = check_recency(&dataset, "x", as_of, 365);

        assert_eq!(outcome.counts.total, 2);
        assert_eq!(outcome.counts.passed, 1);
        assert_eq!(outcome.counts.failed, 1);
    }

    #[test]
    fn test_check_outliers_zscore() {
        let mut values: Vec<DataValue> = (0..20).map(|_| DataValue::Float(10.0)).collect();
        values.push(DataValue::Float(1000.0));
        let dataset = column(values);

        let outcome = check_outliers(&dataset, "x", OutlierMethod::Zscore, Some(3.0), None, None);
        assert_eq!(outcome.counts.total, 21);
        assert_eq!(outcome.counts.failed, 1);
        assert_eq!(outcome.failure_patterns["zscore_outlier"], 1);
    }

    #[test]
    fn test_check_outliers_zscore_zero_variance() {
        let dataset = column(vec![DataValue::Int(5); 10]);
        let outcome = check_outliers(&dataset, "x", OutlierMethod::Zscore, Some(3.0), None, None);
        assert_eq!(outcome.counts.failed, 0);
        assert_eq!(outcome.counts.total, 10);
    }

    #[test]
    fn test_check_outliers_iqr() {
        let mut values: Vec<DataValue> = (1..=9).map(|i| DataValue::Int(i)).collect();
        values.push(DataValue::Int(100));
        let dataset = column(values);

        let outcome = check_outliers(&dataset, "x", OutlierMethod::Iqr, None, None, None);
        assert_eq!(outcome.counts.total, 10);
        assert_eq!(outcome.counts.failed, 1);
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-01-15T10:30:00Z").is_some());
        assert!(parse_date("2024-01-15T10:30:00+02:00").is_some());
        assert!(parse_date("1705318200").is_some());
        assert!(parse_date("1705318200000").is_some());
        assert!(parse_date("2024-01-15").is_some());
        assert!(parse_date("2024-01-15 10:30:00").is_some());
        assert!(parse_date("  2024-01-15  ").is_some());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("2024-13-45").is_none());
    }

    #[test]
    fn test_sample_failures_bounded() {
        let dataset = column((0..20).map(|i| DataValue::Int(i + 500)).collect());
        let outcome = check_range(&dataset, "x", Some(0.0), Some(100.0));

        assert_eq!(outcome.counts.failed, 20);
        assert_eq!(outcome.sample_failures.len(), MAX_SAMPLE_FAILURES);
        assert_eq!(outcome.failure_patterns["above_maximum"], 20);
    }
}
