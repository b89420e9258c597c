//! Assessment and scoring engine for the Agent Data Readiness Index.
//!
//! This crate scores tabular datasets against declarative quality standards
//! across five dimensions (validity, completeness, consistency, freshness,
//! plausibility), each contributing 0-20 points to a 0-100 overall score.
//! Beyond scoring it provides the canonical report document and a protection
//! gate that blocks, warns, or continues based on assessed quality.
//!
//! # Example
//!
//! ```rust
//! use adri_core::{FieldSpecBuilder, StandardBuilder, StandardSource};
//! use adri_engine::{AssessmentEngine, DataRow, DataSet, DataValue};
//!
//! let mut row = DataRow::new();
//! row.insert("email".to_string(), DataValue::String("a@x.com".into()));
//! let dataset = DataSet::from_rows(vec![row]);
//!
//! let source: StandardSource = StandardBuilder::new("customers", "data-team")
//!     .field("email", FieldSpecBuilder::new("string").nullable(false).build())
//!     .build()
//!     .into();
//!
//! let result = AssessmentEngine::new().assess(&source, &dataset).unwrap();
//! assert_eq!(result.dimension_scores.len(), 5);
//! assert!(result.overall_score <= 100.0);
//! ```

pub mod completeness;
pub mod consistency;
pub mod dataset;
pub mod engine;
pub mod fields;
pub mod freshness;
pub mod gate;
pub mod infer;
pub mod plausibility;
pub mod recorder;
pub mod report;
pub mod rules;
pub mod validity;

pub use dataset::{DataRow, DataSet, DataValue};
pub use engine::AssessmentEngine;
pub use gate::{AssessmentCache, DataGuard, Fingerprint, GuardConfig, OnFailure};
pub use infer::infer_standard;
pub use recorder::RuleRecorder;
pub use report::{
    AdriReport, ReportGenerator, ReportIssue, new_assessment_id, validate_report,
};
pub use rules::RuleOutcome;
