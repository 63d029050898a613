//! Error types for the calculation core
//!
//! All validation failures are detected before any computation begins and
//! carry the offending field name so the caller can highlight the input.
//! The core never logs or suppresses an error; messaging is the caller's
//! responsibility.

use thiserror::Error;

/// Errors raised by the calculation engines and loaders
#[derive(Debug, Error)]
pub enum CalcError {
    /// Malformed or out-of-range input, reported per field
    #[error("invalid input for `{field}`: {message}")]
    InvalidInput { field: String, message: String },

    /// A tier code that is not part of the selected tier configuration
    #[error("tier code `{code}` is not part of the {config} configuration")]
    UnknownTier { code: String, config: String },

    /// Claimant file could not be read
    #[error("claimant file error: {0}")]
    Io(#[from] std::io::Error),

    /// Claimant file could not be parsed
    #[error("claimant file error: {0}")]
    Csv(#[from] csv::Error),
}

impl CalcError {
    /// Build a field-level validation error
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

/// Reject NaN and negative values for a dollar/count field
pub(crate) fn check_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if value.is_nan() {
        return Err(CalcError::invalid(field, "value is not a number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid(field, "value cannot be negative"));
    }
    Ok(())
}

/// Reject values outside [0, 1] for a coinsurance/rate fraction
pub(crate) fn check_fraction(field: &str, value: f64) -> CalcResult<()> {
    if value.is_nan() {
        return Err(CalcError::invalid(field, "value is not a number"));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(CalcError::invalid(field, "value must be between 0 and 1"));
    }
    Ok(())
}

/// Reject zero, negative, or NaN values for a required positive field
pub(crate) fn check_positive(field: &str, value: f64) -> CalcResult<()> {
    if value.is_nan() {
        return Err(CalcError::invalid(field, "value is not a number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid(field, "value must be positive"));
    }
    Ok(())
}
