//! # ADRI Core
//!
//! Core data structures and types for the Agent Data Readiness Index.
//!
//! This crate provides the fundamental building blocks for declaring data
//! quality standards and representing assessment outcomes. A standard is a
//! declarative, versioned specification of per-field and per-dimension
//! requirements; an assessment scores a tabular dataset against it on five
//! orthogonal dimensions (validity, completeness, consistency, freshness,
//! plausibility), each worth 0-20 points, summing to an overall 0-100 score.
//!
//! ## Key Concepts
//!
//! - **Standard**: the declarative quality specification, loaded from YAML or
//!   bundled in-process (`StandardSource` abstracts over both)
//! - **DimensionScore**: one 0-20 score plus a structured explain payload
//! - **RuleExecutionResult**: the per-(dimension, field, rule) audit record
//! - **AssessmentResult**: the aggregated outcome of one `assess()` call
//!
//! ## Example
//!
//! ```rust
//! use adri_core::{StandardBuilder, FieldSpecBuilder, StandardSource};
//!
//! let standard = StandardBuilder::new("user_events", "analytics-team")
//!     .overall_minimum(80.0)
//!     .field("user_id", FieldSpecBuilder::new("string").nullable(false).build())
//!     .build();
//!
//! let source = StandardSource::from(standard);
//! assert_eq!(source.overall_minimum(), 80.0);
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod standard;

pub use builder::*;
pub use error::*;
pub use report::*;
pub use standard::*;
