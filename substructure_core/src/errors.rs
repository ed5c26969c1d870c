//! # Error Types
//!
//! Structured error types for substructure_core. The geometry derivations
//! themselves are total over valid input, so the only error they can trace
//! back to is an [`GeometryError::InvalidParameter`] caught at the boundary.
//! The remaining variants belong to the export sinks.
//!
//! ## Example
//!
//! ```rust
//! use substructure_core::errors::{GeometryError, GeometryResult};
//!
//! fn check_radius(radius_in: f64) -> GeometryResult<()> {
//!     if radius_in <= 0.0 {
//!         return Err(GeometryError::invalid_parameter(
//!             "curve_radius_in",
//!             radius_in.to_string(),
//!             "Curve radius must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_radius(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for substructure_core operations
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Structured error type for parameter validation and export.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GeometryError {
    /// A parameter is outside the domain the geometry core accepts
    #[error("Invalid parameter '{field}': {value} - {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Report compilation or PDF rendering failed
    #[error("Report error: {reason}")]
    Report { reason: String },

    /// File I/O error in an output sink
    #[error("File error: {operation} on '{path}' - {reason}")]
    Io {
        operation: String,
        path: String,
        reason: String,
    },
}

impl GeometryError {
    /// Create an InvalidParameter error
    pub fn invalid_parameter(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        GeometryError::InvalidParameter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Report error
    pub fn report(reason: impl Into<String>) -> Self {
        GeometryError::Report {
            reason: reason.into(),
        }
    }

    /// Create an Io error
    pub fn io(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        GeometryError::Io {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GeometryError::InvalidParameter { .. } => "INVALID_PARAMETER",
            GeometryError::Serialization { .. } => "SERIALIZATION_ERROR",
            GeometryError::Report { .. } => "REPORT_ERROR",
            GeometryError::Io { .. } => "IO_ERROR",
        }
    }
}

impl From<serde_json::Error> for GeometryError {
    fn from(err: serde_json::Error) -> Self {
        GeometryError::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = GeometryError::invalid_parameter("pile_spacing_in", "-12", "Spacing must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidParameter\""));
        let roundtrip: GeometryError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            GeometryError::invalid_parameter("span_count", "0", "x").error_code(),
            "INVALID_PARAMETER"
        );
        assert_eq!(GeometryError::report("boom").error_code(), "REPORT_ERROR");
        assert_eq!(GeometryError::io("write", "a.pdf", "denied").error_code(), "IO_ERROR");
    }

    #[test]
    fn test_display_mentions_field() {
        let error = GeometryError::invalid_parameter("curve_radius_in", "0", "Curve radius must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'curve_radius_in': 0 - Curve radius must be positive"
        );
    }
}
