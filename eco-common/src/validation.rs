//! Validation for configuration and input records.
//!
//! Provides the [`Validate`] trait plus helpers for the range checks shared by
//! configuration sections and the valuation input record.

use thiserror::Error;

use crate::config::{Config, ObservabilityConfig, ReportConfig};

/// Validation error.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Field names of every invalid value, flattening `Multiple`.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::MissingField { field } | Self::InvalidValue { field, .. } => vec![field.as_str()],
            Self::Conflict { .. } => Vec::new(),
            Self::Multiple(errors) => errors.iter().flat_map(|e| e.fields()).collect(),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable records.
pub trait Validate {
    /// Validate this record.
    fn validate(&self) -> ValidationResult<()>;
}

/// Collapse collected errors into a single result.
pub fn collect_errors(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    if errors.is_empty() {
        Ok(())
    } else if errors.len() == 1 {
        Err(errors.remove(0))
    } else {
        Err(ValidationError::Multiple(errors))
    }
}

/// Require a finite number.
pub fn check_finite(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.into(),
            reason: format!("must be a finite number, got {value}"),
        })
    }
}

/// Require a finite number strictly greater than zero.
pub fn check_positive(field: &str, value: f64) -> ValidationResult<()> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.into(),
            reason: format!("must be greater than 0, got {value}"),
        })
    }
}

/// Require a finite number within `[min, max]`.
pub fn check_range(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    check_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.into(),
            reason: format!("must be between {min} and {max}, got {value}"),
        })
    }
}

/// Require a finite number strictly greater than `min`.
pub fn check_above(field: &str, value: f64, min: f64) -> ValidationResult<()> {
    check_finite(field, value)?;
    if value > min {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.into(),
            reason: format!("must be greater than {min}, got {value}"),
        })
    }
}

impl Validate for Config {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.observability.validate() {
            errors.push(e);
        }

        if let Err(e) = self.report.validate() {
            errors.push(e);
        }

        collect_errors(errors)
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        Ok(())
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> ValidationResult<()> {
        match self.scenario_path.as_deref() {
            Some(path) if path.trim().is_empty() => Err(ValidationError::MissingField {
                field: "report.scenario_path".into(),
            }),
            _ => Ok(()),
        }
    }
}
