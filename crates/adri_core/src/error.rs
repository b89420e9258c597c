//! Error types for assessment operations.
//!
//! Three families, per the error design: configuration errors (a defective
//! standard, always surfaced), data-shape errors (surfaced from `assess`, but
//! translatable into a policy outcome by the protection gate), and protection
//! errors (raised only by the gate's `raise` policy). A score below threshold
//! is `passed = false` on the result, never an error by itself.

use thiserror::Error;

/// Result type for assessment operations.
pub type Result<T> = std::result::Result<T, AdriError>;

/// Main error type for assessment operations.
#[derive(Error, Debug)]
pub enum AdriError {
    /// A required top-level section is missing from a standard file
    #[error("Configuration error: missing required section '{0}'")]
    MissingSection(String),

    /// A threshold is outside its valid range
    #[error("Configuration error: {name} is {value}, must be within [{min}, {max}]")]
    InvalidThreshold {
        /// Threshold name (e.g., "overall_minimum")
        name: String,
        /// Configured value
        value: f64,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// A field pattern does not compile
    #[error("Configuration error: invalid pattern for field '{field}': {error}")]
    InvalidPattern {
        /// Field name
        field: String,
        /// Regex compile error
        error: String,
    },

    /// min_value/max_value bounds are inverted or degenerate
    #[error("Configuration error: field '{field}' requires min_value < max_value")]
    InvalidRange {
        /// Field name
        field: String,
    },

    /// A field declares an unknown type name
    #[error("Configuration error: unknown type '{type_name}' for field '{field}'")]
    UnknownFieldType {
        /// Field name
        field: String,
        /// Declared type
        type_name: String,
    },

    /// A dimension requirement names a non-canonical dimension
    #[error("Configuration error: unknown dimension '{0}'")]
    UnknownDimension(String),

    /// The dataset has no rows to assess
    #[error("Data shape error: dataset is empty")]
    EmptyDataset,

    /// The dataset cannot be interpreted as a table
    #[error("Data shape error: {0}")]
    DataShape(String),

    /// The protection gate blocked a call under the `raise` policy
    #[error(
        "Protection error: '{function}' blocked, score {score:.1} below required {minimum:.1}"
    )]
    ProtectionFailed {
        /// Guarded function name
        function: String,
        /// Assessed overall score
        score: f64,
        /// Required minimum
        minimum: f64,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl AdriError {
    /// True for the configuration-error family (a defective standard).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AdriError::MissingSection(_)
                | AdriError::InvalidThreshold { .. }
                | AdriError::InvalidPattern { .. }
                | AdriError::InvalidRange { .. }
                | AdriError::UnknownFieldType { .. }
                | AdriError::UnknownDimension(_)
        )
    }

    /// True for the data-shape family.
    pub fn is_data_shape(&self) -> bool {
        matches!(self, AdriError::EmptyDataset | AdriError::DataShape(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families() {
        assert!(AdriError::MissingSection("standards".into()).is_configuration());
        assert!(
            AdriError::InvalidRange {
                field: "age".into()
            }
            .is_configuration()
        );
        assert!(AdriError::EmptyDataset.is_data_shape());
        assert!(!AdriError::EmptyDataset.is_configuration());

        let protection = AdriError::ProtectionFailed {
            function: "train_model".into(),
            score: 72.0,
            minimum: 80.0,
        };
        assert!(!protection.is_configuration());
        assert!(!protection.is_data_shape());
    }

    #[test]
    fn test_error_display() {
        let err = AdriError::ProtectionFailed {
            function: "load".into(),
            score: 78.0,
            minimum: 80.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("'load'"));
        assert!(msg.contains("78.0"));
        assert!(msg.contains("80.0"));
    }
}
