//! Assessment aggregation.
//!
//! `AssessmentEngine` runs the five dimension scorers over a dataset against
//! a standard and assembles the `AssessmentResult`. Scoring is single-threaded
//! and stateless per call: identical (dataset, standard) inputs produce
//! identical scores and counts; only the timing fields vary between runs.

use crate::dataset::DataSet;
use crate::fields::analyze_fields;
use crate::infer::infer_standard;
use crate::recorder::RuleRecorder;
use crate::{completeness, consistency, freshness, plausibility, validity};
use adri_core::{
    AdriError, AssessmentResult, DIMENSIONS, DatasetInfo, DimensionScore, ExecutionStats, Result,
    Standard, StandardSource,
};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, warn};

/// Runs assessments. Construct once and reuse; `assess` borrows immutably and
/// carries no state between calls.
#[derive(Debug, Default)]
pub struct AssessmentEngine;

impl AssessmentEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Assesses `dataset` against `source`, producing the full result.
    ///
    /// # Errors
    ///
    /// Returns [`AdriError::EmptyDataset`] when the dataset has no rows.
    pub fn assess(&self, source: &StandardSource, dataset: &DataSet) -> Result<AssessmentResult> {
        if dataset.is_empty() {
            return Err(AdriError::EmptyDataset);
        }

        let started = Instant::now();
        let mut recorder = RuleRecorder::new();

        let mut dimension_scores: BTreeMap<String, DimensionScore> = BTreeMap::new();
        for (name, score) in [
            ("validity", validity::score(source, dataset, &mut recorder)),
            ("completeness", completeness::score(source, dataset, &mut recorder)),
            ("consistency", consistency::score(source, dataset, &mut recorder)),
            ("freshness", freshness::score(source, dataset, &mut recorder)),
            ("plausibility", plausibility::score(source, dataset, &mut recorder)),
        ] {
            debug!(dimension = name, score = score.score, "dimension scored");
            dimension_scores.insert(name.to_string(), score);
        }

        let overall_score: f64 = dimension_scores.values().map(|d| d.score).sum();
        let passed = self.evaluate_pass(source, overall_score, &dimension_scores);

        let (rows, columns) = dataset.shape();
        let execution_stats = ExecutionStats {
            duration_ms: started.elapsed().as_millis() as u64,
            rules_executed: recorder.rules_executed(),
            total_validations: recorder.total_validations(),
        };
        let log = recorder.into_log();
        let field_analysis = analyze_fields(&log);

        debug!(
            standard = source.standard_id(),
            overall_score, passed, "assessment complete"
        );

        Ok(AssessmentResult {
            overall_score,
            passed,
            dimension_scores,
            standard_id: source.standard_id().to_string(),
            assessment_date: Utc::now(),
            rule_execution_log: log,
            field_analysis,
            dataset_info: DatasetInfo {
                rows: rows as u64,
                columns: columns as u64,
                fields: dataset.field_names(),
            },
            execution_stats,
            metadata: HashMap::new(),
        })
    }

    /// Assesses with a degrade-gracefully fallback: a failed standard load is
    /// not propagated. The engine infers a standard from the data instead and
    /// assesses against that, logging the fallback.
    pub fn assess_or_basic<E: Display>(
        &self,
        standard: std::result::Result<Standard, E>,
        dataset: &DataSet,
        dataset_name: &str,
    ) -> Result<AssessmentResult> {
        let source = match standard {
            Ok(standard) => StandardSource::Loaded(standard),
            Err(error) => {
                warn!(%error, "standard unavailable, falling back to inferred standard");
                infer_standard(dataset_name, dataset)
            }
        };
        self.assess(&source, dataset)
    }

    /// Overall minimum plus every configured per-dimension minimum.
    fn evaluate_pass(
        &self,
        source: &StandardSource,
        overall_score: f64,
        dimension_scores: &BTreeMap<String, DimensionScore>,
    ) -> bool {
        if overall_score < source.overall_minimum() {
            return false;
        }
        DIMENSIONS.iter().all(|dimension| {
            match (source.dimension_minimum(dimension), dimension_scores.get(*dimension)) {
                (Some(minimum), Some(score)) => score.score >= minimum,
                _ => true,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataRow, DataValue};
    use adri_core::{DimensionRequirement, FieldSpecBuilder, StandardBuilder};

    fn dataset() -> DataSet {
        let make = |id: &str, email: DataValue| {
            let mut row = DataRow::new();
            row.insert("id".to_string(), DataValue::String(id.to_string()));
            row.insert("email".to_string(), email);
            row
        };
        DataSet::from_rows(vec![
            make("a", DataValue::String("a@x.com".into())),
            make("b", DataValue::String("b@x.com".into())),
            make("c", DataValue::Null),
        ])
    }

    fn standard() -> StandardSource {
        StandardBuilder::new("customers", "team")
            .overall_minimum(50.0)
            .field(
                "email",
                FieldSpecBuilder::new("string").nullable(false).build(),
            )
            .build()
            .into()
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        let engine = AssessmentEngine::new();
        let result = engine.assess(&standard(), &DataSet::empty());
        assert!(matches!(result, Err(AdriError::EmptyDataset)));
    }

    #[test]
    fn test_overall_is_sum_of_dimensions() {
        let engine = AssessmentEngine::new();
        let result = engine.assess(&standard(), &dataset()).unwrap();

        assert_eq!(result.dimension_scores.len(), 5);
        assert!((result.overall_score - result.dimension_total()).abs() <= 0.1);
        assert!(result.overall_score <= 100.0);
    }

    #[test]
    fn test_assessment_is_deterministic() {
        let engine = AssessmentEngine::new();
        let dataset = dataset();
        let source = standard();

        let first = engine.assess(&source, &dataset).unwrap();
        let second = engine.assess(&source, &dataset).unwrap();

        assert_eq!(first.overall_score, second.overall_score);
        assert_eq!(first.passed, second.passed);
        for (a, b) in first
            .rule_execution_log
            .iter()
            .zip(second.rule_execution_log.iter())
        {
            assert_eq!(a.rule_id, b.rule_id);
            assert_eq!(a.passed, b.passed);
            assert_eq!(a.failed, b.failed);
        }
    }

    #[test]
    fn test_dimension_minimum_fails_assessment() {
        let mut req = DimensionRequirement::default();
        req.minimum_score = Some(19.5); // completeness is 2/3 here, well below
        let source: StandardSource = StandardBuilder::new("strict", "team")
            .overall_minimum(10.0)
            .field(
                "email",
                FieldSpecBuilder::new("string").nullable(false).build(),
            )
            .dimension("completeness", req)
            .build()
            .into();

        let engine = AssessmentEngine::new();
        let result = engine.assess(&source, &dataset()).unwrap();
        assert!(!result.passed);
    }

    #[test]
    fn test_assess_or_basic_falls_back_on_error() {
        let engine = AssessmentEngine::new();
        let failed: std::result::Result<Standard, String> = Err("file not found".to_string());
        let result = engine.assess_or_basic(failed, &dataset(), "customers").unwrap();

        assert_eq!(result.standard_id, "customers_inferred");
        assert_eq!(result.dimension_scores.len(), 5);
    }

    #[test]
    fn test_assess_or_basic_uses_loaded_standard() {
        let engine = AssessmentEngine::new();
        let loaded: std::result::Result<Standard, String> =
            Ok(StandardBuilder::new("customers", "team").build());
        let result = engine.assess_or_basic(loaded, &dataset(), "ignored").unwrap();

        assert_eq!(result.standard_id, "customers");
    }
}
