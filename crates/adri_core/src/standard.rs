//! Quality standard types and structures.
//!
//! This module contains the core types for declaring data quality standards,
//! including per-field requirements, per-dimension requirements, and the
//! optional consistency/freshness/plausibility rule sections.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The five canonical quality dimensions, in reporting order.
pub const DIMENSIONS: [&str; 5] = [
    "validity",
    "completeness",
    "consistency",
    "freshness",
    "plausibility",
];

/// Maximum score a single dimension can contribute.
pub const MAX_DIMENSION_SCORE: f64 = 20.0;

/// Overall minimum applied when a standard does not declare one.
pub const DEFAULT_OVERALL_MINIMUM: f64 = 75.0;

/// A declarative quality standard for a tabular dataset.
///
/// A `Standard` is the main entry point for declaring what "good data" means.
/// It mirrors the on-disk YAML document: a `standards` identity section and a
/// `requirements` section with thresholds and per-field rules. A standard is
/// immutable once loaded and identified by `id` + `version`.
///
/// # Example
///
/// ```rust
/// use adri_core::{Standard, StandardInfo, Requirements};
///
/// let standard = Standard {
///     standards: StandardInfo {
///         id: "customer-standard".to_string(),
///         name: "Customer Data Standard".to_string(),
///         version: "1.0.0".to_string(),
///         authority: "data-platform-team".to_string(),
///         effective_date: None,
///     },
///     requirements: Requirements {
///         overall_minimum: 80.0,
///         dimension_requirements: Default::default(),
///         field_requirements: Default::default(),
///         consistency: None,
///         freshness: None,
///         plausibility: None,
///     },
/// };
/// assert_eq!(standard.standards.id, "customer-standard");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standard {
    /// Identity section: who published this standard and which version it is
    pub standards: StandardInfo,

    /// Requirement section: thresholds and rules the data must satisfy
    pub requirements: Requirements,
}

/// Identity metadata for a standard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardInfo {
    /// Unique identifier for this standard
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Semantic version of the standard (e.g., "1.0.0")
    pub version: String,

    /// Team or individual responsible for this standard
    pub authority: String,

    /// Optional date from which this standard applies (ISO date string)
    pub effective_date: Option<String>,
}

/// Requirements a dataset must meet to pass assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirements {
    /// Minimum overall score (0-100) for the dataset to pass
    pub overall_minimum: f64,

    /// Optional per-dimension minimums and rule weights
    #[serde(default)]
    pub dimension_requirements: HashMap<String, DimensionRequirement>,

    /// Per-field validity and completeness requirements
    #[serde(default)]
    pub field_requirements: HashMap<String, FieldSpec>,

    /// Optional consistency rules (primary key uniqueness, formatting)
    pub consistency: Option<ConsistencyConfig>,

    /// Optional freshness rule (date field and recency window)
    pub freshness: Option<FreshnessConfig>,

    /// Optional plausibility rules (outlier detection)
    pub plausibility: Option<PlausibilityConfig>,
}

/// Per-dimension requirement: minimum score, weight, and rule weights.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DimensionRequirement {
    /// Minimum score (0-20) this dimension must reach for the dataset to pass
    pub minimum_score: Option<f64>,

    /// Relative weight of this dimension (reserved; scores are summed today)
    pub weight: Option<f64>,

    /// Per-rule weights (0.0 to 1.0) applied inside the dimension
    #[serde(default)]
    pub rule_weights: HashMap<String, f64>,
}

/// Requirements for a single field.
///
/// Drives the validity rules (type, pattern, range, allowed values) and the
/// completeness rule (`nullable == false` marks a field as required).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Declared field type (e.g., "string", "integer", "float", "date")
    #[serde(rename = "type")]
    pub field_type: String,

    /// Whether the field may contain null values
    #[serde(default = "default_nullable")]
    pub nullable: bool,

    /// Optional regex pattern string values must match
    pub pattern: Option<String>,

    /// Optional inclusive lower bound for numeric values
    pub min_value: Option<f64>,

    /// Optional inclusive upper bound for numeric values.
    /// Invariant: when both bounds are present, `min_value < max_value`.
    pub max_value: Option<f64>,

    /// Optional set of allowed values
    pub allowed_values: Option<Vec<String>>,
}

fn default_nullable() -> bool {
    true
}

/// Consistency rules: primary-key uniqueness plus formatting checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyConfig {
    /// Fields that together form the primary key; duplicate key groups count
    /// as failures for every row in the group beyond the first
    #[serde(default)]
    pub primary_key_fields: Vec<String>,

    /// Optional formatting-consistency rules, each with its own weight
    #[serde(default)]
    pub format_rules: Vec<FormatRule>,
}

/// A formatting-consistency rule for a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatRule {
    /// Field to check
    pub field: String,

    /// Expected format
    pub format: FormatKind,

    /// Weight of this rule inside the consistency dimension (default 1.0)
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Supported formatting checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// Value must be entirely lowercase
    Lowercase,
    /// Value must be entirely uppercase
    Uppercase,
    /// Value must look like a phone number (digits, spaces, +, -, parentheses)
    Phone,
}

/// Freshness rule: a date field checked against a reference date and window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreshnessConfig {
    /// Field holding the record date
    pub date_field: String,

    /// Maximum allowed age in days relative to `as_of`
    pub window_days: i64,

    /// Reference date (RFC 3339); defaults to the assessment time when absent
    pub as_of: Option<String>,
}

/// Plausibility rules: outlier detection per numeric field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlausibilityConfig {
    /// Outlier rules, each with its own weight
    #[serde(default)]
    pub rules: Vec<OutlierRule>,
}

/// A single outlier-detection rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierRule {
    /// Field to check
    pub field: String,

    /// Detection method
    pub method: OutlierMethod,

    /// Z-score threshold (zscore method only; default 3.0)
    pub threshold: Option<f64>,

    /// Inclusive lower business bound (range method)
    pub min: Option<f64>,

    /// Inclusive upper business bound (range method)
    pub max: Option<f64>,

    /// Weight of this rule inside the plausibility dimension (default 1.0)
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Outlier-detection methods. Fixed, explainable formulas only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// |z| > threshold against the column mean and standard deviation
    Zscore,
    /// Outside the 1.5 * IQR fences
    Iqr,
    /// Outside configured business bounds
    Range,
}

fn default_weight() -> f64 {
    1.0
}

/// A bundled, dict-style standard with no identity section.
///
/// Produced by standard inference (the basic-assessment fallback and the
/// protection gate's auto-generated standards). Carries the same requirement
/// surface as a loaded standard but only a name for identification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundledStandard {
    /// Name used as the standard id in reports
    pub name: String,

    /// Requirement section, same shape as a loaded standard's
    pub requirements: Requirements,
}

/// A standard from either source, behind one accessor surface.
///
/// The engine never cares whether a standard came from a YAML file or was
/// bundled/inferred at runtime; both variants answer the same questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StandardSource {
    /// Parsed from a standard file
    Loaded(Standard),
    /// Built in-process (inferred or bundled)
    Bundled(BundledStandard),
}

impl StandardSource {
    /// Identifier recorded in assessment results.
    pub fn standard_id(&self) -> &str {
        match self {
            StandardSource::Loaded(s) => &s.standards.id,
            StandardSource::Bundled(b) => &b.name,
        }
    }

    /// The requirement section of either variant.
    pub fn requirements(&self) -> &Requirements {
        match self {
            StandardSource::Loaded(s) => &s.requirements,
            StandardSource::Bundled(b) => &b.requirements,
        }
    }

    /// Minimum overall score for the dataset to pass.
    pub fn overall_minimum(&self) -> f64 {
        self.requirements().overall_minimum
    }

    /// Per-field requirements.
    pub fn field_requirements(&self) -> &HashMap<String, FieldSpec> {
        &self.requirements().field_requirements
    }

    /// Per-dimension requirements.
    pub fn dimension_requirements(&self) -> &HashMap<String, DimensionRequirement> {
        &self.requirements().dimension_requirements
    }

    /// Weight for a rule inside a dimension, defaulting to 1.0.
    pub fn rule_weight(&self, dimension: &str, rule: &str) -> f64 {
        self.dimension_requirements()
            .get(dimension)
            .and_then(|req| req.rule_weights.get(rule))
            .copied()
            .unwrap_or(1.0)
    }

    /// Configured minimum score for a dimension, if any.
    pub fn dimension_minimum(&self, dimension: &str) -> Option<f64> {
        self.dimension_requirements()
            .get(dimension)
            .and_then(|req| req.minimum_score)
    }

    /// Consistency rules, if configured.
    pub fn consistency(&self) -> Option<&ConsistencyConfig> {
        self.requirements().consistency.as_ref()
    }

    /// Freshness rule, if configured.
    pub fn freshness(&self) -> Option<&FreshnessConfig> {
        self.requirements().freshness.as_ref()
    }

    /// Plausibility rules, if configured.
    pub fn plausibility(&self) -> Option<&PlausibilityConfig> {
        self.requirements().plausibility.as_ref()
    }
}

impl From<Standard> for StandardSource {
    fn from(standard: Standard) -> Self {
        StandardSource::Loaded(standard)
    }
}

impl From<BundledStandard> for StandardSource {
    fn from(bundled: BundledStandard) -> Self {
        StandardSource::Bundled(bundled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StandardBuilder;

    #[test]
    fn test_source_accessors_loaded() {
        let standard = StandardBuilder::new("orders", "ops-team")
            .overall_minimum(82.5)
            .build();
        let source = StandardSource::from(standard);

        assert_eq!(source.standard_id(), "orders");
        assert_eq!(source.overall_minimum(), 82.5);
        assert!(source.field_requirements().is_empty());
        assert!(source.consistency().is_none());
    }

    #[test]
    fn test_source_accessors_bundled() {
        let bundled = BundledStandard {
            name: "inferred_orders".to_string(),
            requirements: Requirements {
                overall_minimum: DEFAULT_OVERALL_MINIMUM,
                dimension_requirements: HashMap::new(),
                field_requirements: HashMap::new(),
                consistency: None,
                freshness: None,
                plausibility: None,
            },
        };
        let source = StandardSource::from(bundled);

        assert_eq!(source.standard_id(), "inferred_orders");
        assert_eq!(source.overall_minimum(), DEFAULT_OVERALL_MINIMUM);
    }

    #[test]
    fn test_rule_weight_default_and_configured() {
        let mut req = DimensionRequirement::default();
        req.rule_weights.insert("pattern".to_string(), 0.5);

        let mut standard = StandardBuilder::new("t", "team").build();
        standard
            .requirements
            .dimension_requirements
            .insert("validity".to_string(), req);
        let source = StandardSource::from(standard);

        assert_eq!(source.rule_weight("validity", "pattern"), 0.5);
        assert_eq!(source.rule_weight("validity", "type"), 1.0);
        assert_eq!(source.rule_weight("freshness", "recency"), 1.0);
    }

    #[test]
    fn test_dimension_constants() {
        assert_eq!(DIMENSIONS.len(), 5);
        assert_eq!(DIMENSIONS[0], "validity");
        assert_eq!(MAX_DIMENSION_SCORE, 20.0);
    }
}
