//! # Error Types
//!
//! Structured error types for vessel_core. These errors are designed to be
//! informative for both humans and machines, providing enough context to
//! understand and fix issues programmatically.
//!
//! Public calculation entry points never return `Err`: validation failures
//! are folded into a failed `CalculationResult` (success = false, validation
//! status = Error). `CalcError` is the internal seam used by validators, the
//! material database, and the audit boundary.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::errors::{CalcError, CalcResult};
//!
//! fn validate_pressure(pressure_psi: f64) -> CalcResult<()> {
//!     if pressure_psi <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "design_pressure_psi".to_string(),
//!             value: pressure_psi.to_string(),
//!             reason: "Design pressure must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for vessel_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by downstream consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-positive, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A field required by this calculation is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material specification could not be resolved against the stress table
    #[error("Material not found: {material_spec}")]
    MaterialNotFound { material_spec: String },

    /// Requested temperature is outside the tabulated range for the material.
    /// The database never extrapolates.
    #[error("Temperature {temperature_f} F is outside the tabulated range {min_f}-{max_f} F for {material_spec}")]
    TemperatureOutOfRange {
        material_spec: String,
        temperature_f: f64,
        min_f: f64,
        max_f: f64,
    },

    /// The geometry is physically infeasible at the given stress/pressure
    /// (e.g. a non-positive formula denominator). No thickness or MAWP can
    /// be produced for it.
    #[error("Infeasible geometry: {calculation_type} - {reason}")]
    InfeasibleGeometry {
        calculation_type: String,
        reason: String,
    },

    /// Calculation failed for a reason other than geometry infeasibility
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_spec: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_spec: material_spec.into(),
        }
    }

    /// Create an InfeasibleGeometry error
    pub fn infeasible_geometry(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InfeasibleGeometry {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::TemperatureOutOfRange { .. } => "TEMPERATURE_OUT_OF_RANGE",
            CalcError::InfeasibleGeometry { .. } => "INFEASIBLE_GEOMETRY",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input(
            "design_pressure_psi",
            "-150",
            "Design pressure must be positive",
        );
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::missing_field("current_thickness_in").error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            CalcError::material_not_found("SA-999").error_code(),
            "MATERIAL_NOT_FOUND"
        );
        assert_eq!(
            CalcError::infeasible_geometry("required_thickness", "2SE - 0.2P <= 0").error_code(),
            "INFEASIBLE_GEOMETRY"
        );
    }

    #[test]
    fn test_temperature_out_of_range_display() {
        let error = CalcError::TemperatureOutOfRange {
            material_spec: "SA-516-70".to_string(),
            temperature_f: 950.0,
            min_f: -20.0,
            max_f: 800.0,
        };
        let msg = error.to_string();
        assert!(msg.contains("SA-516-70"));
        assert!(msg.contains("950"));
    }
}
