//! Standard inference.
//!
//! Builds a bundled standard from the data itself: majority observed type per
//! field, nullability from observed nulls, an e-mail pattern for columns that
//! look like e-mail addresses, and generous numeric bounds from the observed
//! values. Used by the basic-assessment fallback and by the protection gate's
//! auto-generated standards.

use crate::dataset::{DataSet, DataValue};
use adri_core::{
    BundledStandard, DEFAULT_OVERALL_MINIMUM, FieldSpec, Requirements, StandardSource,
};
use std::collections::HashMap;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Infers a bundled standard from the observed shape of `dataset`.
///
/// Inference is conservative about failing future data: numeric bounds are
/// widened beyond the observed span, and only an `age`-named column gets the
/// fixed 0-150 business range.
pub fn infer_standard(name: &str, dataset: &DataSet) -> StandardSource {
    let mut field_requirements = HashMap::new();

    for field in dataset.field_names() {
        field_requirements.insert(field.clone(), infer_field(dataset, &field));
    }

    StandardSource::Bundled(BundledStandard {
        name: format!("{name}_inferred"),
        requirements: Requirements {
            overall_minimum: DEFAULT_OVERALL_MINIMUM,
            dimension_requirements: HashMap::new(),
            field_requirements,
            consistency: None,
            freshness: None,
            plausibility: None,
        },
    })
}

fn infer_field(dataset: &DataSet, field: &str) -> FieldSpec {
    let mut type_counts: HashMap<&'static str, usize> = HashMap::new();
    let mut saw_null = false;
    let mut min_seen = f64::INFINITY;
    let mut max_seen = f64::NEG_INFINITY;
    let mut strings = 0usize;
    let mut email_like = 0usize;

    let email_re = regex::Regex::new(EMAIL_PATTERN).unwrap_or_else(|_| unreachable!());

    for row in dataset.rows() {
        let value = dataset.value(row, field);
        match value {
            DataValue::Null => saw_null = true,
            other => {
                *type_counts.entry(other.type_name()).or_insert(0) += 1;
                if let Some(num) = other.as_float() {
                    min_seen = min_seen.min(num);
                    max_seen = max_seen.max(num);
                }
                if let Some(s) = other.as_string() {
                    strings += 1;
                    if email_re.is_match(s) {
                        email_like += 1;
                    }
                }
            }
        }
    }

    let field_type = majority_type(&type_counts);
    let numeric = matches!(field_type, "integer" | "float");

    let looks_like_email = field.to_lowercase().contains("email")
        || (strings > 0 && email_like * 10 >= strings * 7);

    let (min_value, max_value) = if field.to_lowercase() == "age" {
        (Some(0.0), Some(150.0))
    } else if numeric && min_seen.is_finite() {
        widened_bounds(min_seen, max_seen)
    } else {
        (None, None)
    };

    FieldSpec {
        field_type: field_type.to_string(),
        nullable: saw_null,
        pattern: (looks_like_email && strings > 0).then(|| EMAIL_PATTERN.to_string()),
        min_value,
        max_value,
        allowed_values: None,
    }
}

fn majority_type(counts: &HashMap<&'static str, usize>) -> &'static str {
    // Mixed int/float columns are float; no observed values default to string.
    if counts.is_empty() {
        return "string";
    }
    if counts.len() == 2 && counts.contains_key("integer") && counts.contains_key("float") {
        return "float";
    }
    let majority = counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(name, _)| *name)
        .unwrap_or("string");
    match majority {
        "timestamp" => "date",
        other => other,
    }
}

/// Observed bounds widened by half the span on each side. A constant column
/// still gets a non-degenerate window.
fn widened_bounds(min_seen: f64, max_seen: f64) -> (Option<f64>, Option<f64>) {
    let span = (max_seen - min_seen).max(1.0);
    (Some(min_seen - span / 2.0), Some(max_seen + span / 2.0))
}
