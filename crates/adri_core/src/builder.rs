//! Builder pattern for creating quality standards.
//!
//! This module provides ergonomic builders for constructing standards and
//! field specs with a fluent API. Used heavily by tests and by standard
//! inference.

use crate::{
    ConsistencyConfig, DEFAULT_OVERALL_MINIMUM, DimensionRequirement, FieldSpec, FreshnessConfig,
    PlausibilityConfig, Requirements, Standard, StandardInfo,
};
use std::collections::HashMap;

/// Builder for creating a `Standard`.
///
/// # Example
///
/// ```rust
/// use adri_core::{StandardBuilder, FieldSpecBuilder};
///
/// let standard = StandardBuilder::new("user_events", "analytics-team")
///     .version("1.0.0")
///     .overall_minimum(80.0)
///     .field("user_id", FieldSpecBuilder::new("string").nullable(false).build())
///     .build();
/// assert_eq!(standard.standards.id, "user_events");
/// ```
#[derive(Debug, Default)]
pub struct StandardBuilder {
    id: Option<String>,
    name: Option<String>,
    authority: Option<String>,
    version: Option<String>,
    effective_date: Option<String>,
    overall_minimum: f64,
    dimension_requirements: HashMap<String, DimensionRequirement>,
    field_requirements: HashMap<String, FieldSpec>,
    consistency: Option<ConsistencyConfig>,
    freshness: Option<FreshnessConfig>,
    plausibility: Option<PlausibilityConfig>,
}

impl StandardBuilder {
    /// Creates a new standard builder with required fields.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique standard id (also used as the name unless overridden)
    /// * `authority` - Owning team or individual
    pub fn new(id: impl Into<String>, authority: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: Some(id.clone()),
            id: Some(id),
            authority: Some(authority.into()),
            version: Some("1.0.0".to_string()),
            overall_minimum: DEFAULT_OVERALL_MINIMUM,
            ..Default::default()
        }
    }

    /// Sets the human-readable name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the standard version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the effective date.
    pub fn effective_date(mut self, date: impl Into<String>) -> Self {
        self.effective_date = Some(date.into());
        self
    }

    /// Sets the minimum overall score (0-100).
    pub fn overall_minimum(mut self, minimum: f64) -> Self {
        self.overall_minimum = minimum;
        self
    }

    /// Adds a field requirement.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.field_requirements.insert(name.into(), spec);
        self
    }

    /// Adds a dimension requirement.
    pub fn dimension(mut self, name: impl Into<String>, req: DimensionRequirement) -> Self {
        self.dimension_requirements.insert(name.into(), req);
        self
    }

    /// Sets the consistency rules.
    pub fn consistency(mut self, config: ConsistencyConfig) -> Self {
        self.consistency = Some(config);
        self
    }

    /// Sets the freshness rule.
    pub fn freshness(mut self, config: FreshnessConfig) -> Self {
        self.freshness = Some(config);
        self
    }

    /// Sets the plausibility rules.
    pub fn plausibility(mut self, config: PlausibilityConfig) -> Self {
        self.plausibility = Some(config);
        self
    }

    /// Builds the standard.
    ///
    /// # Panics
    ///
    /// Panics if required fields (id, authority, version) are not set.
    pub fn build(self) -> Standard {
        let id = self.id.expect("id is required");
        Standard {
            standards: StandardInfo {
                name: self.name.unwrap_or_else(|| id.clone()),
                id,
                version: self.version.expect("version is required"),
                authority: self.authority.expect("authority is required"),
                effective_date: self.effective_date,
            },
            requirements: Requirements {
                overall_minimum: self.overall_minimum,
                dimension_requirements: self.dimension_requirements,
                field_requirements: self.field_requirements,
                consistency: self.consistency,
                freshness: self.freshness,
                plausibility: self.plausibility,
            },
        }
    }
}

/// Builder for creating a `FieldSpec`.
///
/// # Example
///
/// ```rust
/// use adri_core::FieldSpecBuilder;
///
/// let spec = FieldSpecBuilder::new("integer")
///     .nullable(false)
///     .range(0.0, 120.0)
///     .build();
/// assert_eq!(spec.min_value, Some(0.0));
/// ```
#[derive(Debug, Default)]
pub struct FieldSpecBuilder {
    field_type: Option<String>,
    nullable: bool,
    pattern: Option<String>,
    min_value: Option<f64>,
    max_value: Option<f64>,
    allowed_values: Option<Vec<String>>,
}

impl FieldSpecBuilder {
    /// Creates a new field spec builder.
    ///
    /// # Arguments
    ///
    /// * `field_type` - Declared type (e.g., "string", "integer")
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
            nullable: true,
            ..Default::default()
        }
    }

    /// Sets whether the field may contain nulls.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets the regex pattern.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets both numeric bounds.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    /// Sets only the lower bound.
    pub fn min_value(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    /// Sets only the upper bound.
    pub fn max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Sets the allowed value set.
    pub fn allowed_values(mut self, values: Vec<String>) -> Self {
        self.allowed_values = Some(values);
        self
    }

    /// Builds the field spec.
    ///
    /// # Panics
    ///
    /// Panics if the field type is not set.
    pub fn build(self) -> FieldSpec {
        FieldSpec {
            field_type: self.field_type.expect("field_type is required"),
            nullable: self.nullable,
            pattern: self.pattern,
            min_value: self.min_value,
            max_value: self.max_value,
            allowed_values: self.allowed_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_builder_minimal() {
        let standard = StandardBuilder::new("test", "team").build();

        assert_eq!(standard.standards.id, "test");
        assert_eq!(standard.standards.name, "test");
        assert_eq!(standard.standards.authority, "team");
        assert_eq!(standard.standards.version, "1.0.0"); // Default version
        assert_eq!(standard.requirements.overall_minimum, 75.0);
        assert!(standard.requirements.field_requirements.is_empty());
        assert!(standard.requirements.freshness.is_none());
    }

    #[test]
    fn test_standard_builder_full() {
        let standard = StandardBuilder::new("customers", "data-platform")
            .name("Customer Data Standard")
            .version("2.0.0")
            .effective_date("2026-01-01")
            .overall_minimum(85.0)
            .field(
                "email",
                FieldSpecBuilder::new("string")
                    .nullable(false)
                    .pattern(r"^\S+@\S+\.\S+$")
                    .build(),
            )
            .consistency(ConsistencyConfig {
                primary_key_fields: vec!["id".to_string()],
                format_rules: vec![],
            })
            .freshness(FreshnessConfig {
                date_field: "updated_at".to_string(),
                window_days: 365,
                as_of: None,
            })
            .build();

        assert_eq!(standard.standards.name, "Customer Data Standard");
        assert_eq!(standard.standards.version, "2.0.0");
        assert_eq!(standard.requirements.overall_minimum, 85.0);
        assert_eq!(standard.requirements.field_requirements.len(), 1);
        assert!(standard.requirements.consistency.is_some());
        assert!(standard.requirements.freshness.is_some());
    }

    #[test]
    #[should_panic(expected = "version is required")]
    fn test_standard_builder_panic_missing_version() {
        let builder = StandardBuilder {
            id: Some("test".to_string()),
            name: Some("test".to_string()),
            authority: Some("team".to_string()),
            version: None, // Missing version
            ..Default::default()
        };
        builder.build();
    }

    #[test]
    fn test_field_spec_builder_minimal() {
        let spec = FieldSpecBuilder::new("string").build();

        assert_eq!(spec.field_type, "string");
        assert!(spec.nullable); // Default is true
        assert!(spec.pattern.is_none());
        assert!(spec.min_value.is_none());
        assert!(spec.allowed_values.is_none());
    }

    #[test]
    fn test_field_spec_builder_full() {
        let spec = FieldSpecBuilder::new("string")
            .nullable(false)
            .allowed_values(vec!["active".to_string(), "inactive".to_string()])
            .build();

        assert!(!spec.nullable);
        assert_eq!(spec.allowed_values.as_ref().unwrap().len(), 2);
    }

    #[test]
    #[should_panic(expected = "field_type is required")]
    fn test_field_spec_builder_panic_missing_type() {
        FieldSpecBuilder::default().build();
    }
}
