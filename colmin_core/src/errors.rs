//! # Error Types
//!
//! Structured error types for colmin_core. Errors carry enough context to
//! understand and fix issues programmatically; numerical trouble during a
//! design iteration (non-convergence, divergence) is *not* an error — it is
//! reported through the result's validity flag instead.
//!
//! ## Example
//!
//! ```rust
//! use colmin_core::errors::{CalcError, CalcResult};
//!
//! fn validate_strength(fck_mpa: f64) -> CalcResult<()> {
//!     if fck_mpa <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "fck_mpa".to_string(),
//!             value: fck_mpa.to_string(),
//!             reason: "Characteristic strength must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for colmin_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong, enabling
/// programmatic error handling by consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, wrong sign)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Calculation failed (malformed material law, impossible geometry)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("fck_mpa", "-20", "Strength must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_input("rho", "0", "zero").error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(
            CalcError::calculation_failed("mnkappa", "bad diagram").error_code(),
            "CALCULATION_FAILED"
        );
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::invalid_input("l0_mm", "-1", "Buckling length cannot be negative");
        let text = format!("{}", error);
        assert!(text.contains("l0_mm"));
        assert!(text.contains("negative"));
    }
}
