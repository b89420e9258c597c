//! Parser for ADRI standard files (YAML/TOML formats).
//!
//! This module parses standard files into the strongly-typed `Standard`
//! structure and performs definition-time validation: thresholds in range,
//! canonical dimension names, patterns that compile, coherent numeric bounds.
//! An invalid pattern is a configuration error here; only at evaluation time
//! does the engine fail closed instead.
//!
//! # Example
//!
//! ```rust
//! use adri_parser::parse_yaml;
//!
//! let yaml = r#"
//! standards:
//!   id: user_events
//!   name: User Events Standard
//!   version: "1.0.0"
//!   authority: analytics-team
//! requirements:
//!   overall_minimum: 80.0
//!   field_requirements:
//!     user_id:
//!       type: string
//!       nullable: false
//! "#;
//!
//! let standard = parse_yaml(yaml).expect("Failed to parse standard");
//! assert_eq!(standard.standards.id, "user_events");
//! ```

use adri_core::{AdriError, DIMENSIONS, MAX_DIMENSION_SCORE, OutlierMethod, Standard};
use regex::Regex;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during standard parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// The parsed standard failed definition-time validation
    #[error("Invalid standard definition: {0}")]
    InvalidStandard(#[from] AdriError),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported standard file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Type names a field may declare.
const KNOWN_TYPES: [&str; 11] = [
    "string",
    "int",
    "int64",
    "integer",
    "float",
    "float64",
    "number",
    "bool",
    "boolean",
    "date",
    "timestamp",
];

/// Parse a standard from a YAML string.
///
/// A document missing the `standards` or `requirements` section fails
/// deserialization, which is the hard validation error the format requires.
pub fn parse_yaml(content: &str) -> Result<Standard> {
    let standard: Standard = serde_yaml_ng::from_str(content)?;
    Ok(standard)
}

/// Parse a standard from a TOML string.
pub fn parse_toml(content: &str) -> Result<Standard> {
    let standard: Standard =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(standard)
}

/// Detect the standard format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `StandardFormat::Yaml`
/// * `.toml` → `StandardFormat::Toml`
pub fn detect_format(path: &Path) -> Result<StandardFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(StandardFormat::Yaml),
        "toml" => Ok(StandardFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a standard from a file with automatic format detection.
pub fn parse_file(path: &Path) -> Result<Standard> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;

    match format {
        StandardFormat::Yaml => parse_yaml(&content),
        StandardFormat::Toml => parse_toml(&content),
    }
}

/// Parse a standard file and validate its definition in one step.
pub fn load_standard(path: &Path) -> Result<Standard> {
    let standard = parse_file(path)?;
    validate_standard(&standard)?;
    Ok(standard)
}

/// Validates a standard definition.
///
/// Configuration errors are always surfaced, never silently ignored: they
/// indicate a contract defect in the standard itself, not in the data.
pub fn validate_standard(standard: &Standard) -> std::result::Result<(), AdriError> {
    let req = &standard.requirements;

    check_threshold("overall_minimum", req.overall_minimum, 0.0, 100.0)?;

    for (dimension, dim_req) in &req.dimension_requirements {
        if !DIMENSIONS.contains(&dimension.as_str()) {
            return Err(AdriError::UnknownDimension(dimension.clone()));
        }
        if let Some(minimum) = dim_req.minimum_score {
            check_threshold(
                &format!("{dimension}.minimum_score"),
                minimum,
                0.0,
                MAX_DIMENSION_SCORE,
            )?;
        }
        if let Some(weight) = dim_req.weight {
            check_threshold(&format!("{dimension}.weight"), weight, 0.0, 1.0)?;
        }
        for (rule, weight) in &dim_req.rule_weights {
            check_threshold(
                &format!("{dimension}.rule_weights.{rule}"),
                *weight,
                0.0,
                1.0,
            )?;
        }
    }

    for (field, spec) in &req.field_requirements {
        let type_name = spec.field_type.to_lowercase();
        if !KNOWN_TYPES.contains(&type_name.as_str()) {
            return Err(AdriError::UnknownFieldType {
                field: field.clone(),
                type_name: spec.field_type.clone(),
            });
        }

        if let Some(pattern) = &spec.pattern {
            if let Err(e) = Regex::new(pattern) {
                return Err(AdriError::InvalidPattern {
                    field: field.clone(),
                    error: e.to_string(),
                });
            }
        }

        if let (Some(min), Some(max)) = (spec.min_value, spec.max_value) {
            if min >= max {
                return Err(AdriError::InvalidRange {
                    field: field.clone(),
                });
            }
        }
    }

    if let Some(freshness) = &req.freshness {
        if freshness.window_days < 1 {
            return Err(AdriError::InvalidThreshold {
                name: "freshness.window_days".to_string(),
                value: freshness.window_days as f64,
                min: 1.0,
                max: f64::MAX,
            });
        }
    }

    if let Some(plausibility) = &req.plausibility {
        for rule in &plausibility.rules {
            check_threshold(
                &format!("plausibility.{}.weight", rule.field),
                rule.weight,
                0.0,
                1.0,
            )?;
            match rule.method {
                OutlierMethod::Zscore => {
                    if let Some(threshold) = rule.threshold {
                        if threshold <= 0.0 {
                            return Err(AdriError::InvalidThreshold {
                                name: format!("plausibility.{}.threshold", rule.field),
                                value: threshold,
                                min: 0.0,
                                max: f64::MAX,
                            });
                        }
                    }
                }
                OutlierMethod::Range => {
                    if rule.min.is_none() && rule.max.is_none() {
                        return Err(AdriError::InvalidRange {
                            field: rule.field.clone(),
                        });
                    }
                    if let (Some(min), Some(max)) = (rule.min, rule.max) {
                        if min >= max {
                            return Err(AdriError::InvalidRange {
                                field: rule.field.clone(),
                            });
                        }
                    }
                }
                OutlierMethod::Iqr => {}
            }
        }
    }

    Ok(())
}

fn check_threshold(name: &str, value: f64, min: f64, max: f64) -> std::result::Result<(), AdriError> {
    if value < min || value > max {
        return Err(AdriError::InvalidThreshold {
            name: name.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}
