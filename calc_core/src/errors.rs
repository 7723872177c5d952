//! # Error Types
//!
//! Structured error types for calc_core. Every failure the engine can report
//! is a variant here, carrying enough context (field, requested value, limit)
//! for a UI or an LLM to explain the problem without re-running anything.
//!
//! All errors are recoverable at the caller boundary: the engine never
//! guesses a fallback value and never leaves a collection half-mutated.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_power(power_kw: f64) -> CalcResult<()> {
//!     if power_kw <= 0.0 {
//!         return Err(CalcError::invalid_field(
//!             "power_kw",
//!             power_kw.to_string(),
//!             "Power must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_power(-1.0).unwrap_err().error_code(), "INVALID_FIELD");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for sizing and selection operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A load attribute or calculation input is malformed or out of range
    #[error("Invalid value for '{field}': {value} - {reason}")]
    InvalidField {
        field: String,
        value: String,
        reason: String,
    },

    /// A load with the same name (case-insensitive) already exists
    #[error("Duplicate load name: '{name}' already exists")]
    DuplicateName { name: String },

    /// No load matches the requested index or name
    #[error("Load not found: {key}")]
    LoadNotFound { key: String },

    /// Sizing was requested on an empty load set
    #[error("Empty load set: at least one load is required for sizing")]
    EmptyLoadSet,

    /// Design power exceeds the largest standard transformer rating
    #[error("No standard transformer covers this design load: {design_power_kw:.1} kW exceeds {largest_kva:.0} kVA")]
    NoStandardSizeFits {
        design_power_kw: f64,
        largest_kva: f64,
    },

    /// No catalog entry satisfies both the current and fault requirements
    #[error("No suitable breaker: need In >= {min_rated_current_a:.1} A (required {required_current_a:.1} A) and Icu >= {fault_current_ka:.2} kA")]
    NoSuitableComponent {
        required_current_a: f64,
        min_rated_current_a: f64,
        fault_current_ka: f64,
    },

    /// Enclosure volume is zero, negative or not a number
    #[error("Invalid enclosure volume: {volume_m3} m³ - volume must be positive")]
    InvalidVolume { volume_m3: f64 },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidField error
    pub fn invalid_field(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidField {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DuplicateName error
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        CalcError::DuplicateName { name: name.into() }
    }

    /// Create a LoadNotFound error
    pub fn load_not_found(key: impl Into<String>) -> Self {
        CalcError::LoadNotFound { key: key.into() }
    }

    /// Create a NoSuitableComponent error.
    ///
    /// `derating` is the multiplier applied to the required current before
    /// matching a rated current, reported so the caller sees the real threshold.
    pub fn no_suitable_component(required_current_a: f64, derating: f64, fault_current_ka: f64) -> Self {
        CalcError::NoSuitableComponent {
            required_current_a,
            min_rated_current_a: required_current_a * derating,
            fault_current_ka,
        }
    }

    /// Check if this error is caused by the caller's input rather than by the catalog
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidField { .. }
                | CalcError::DuplicateName { .. }
                | CalcError::LoadNotFound { .. }
                | CalcError::EmptyLoadSet
                | CalcError::InvalidVolume { .. }
                | CalcError::SerializationError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidField { .. } => "INVALID_FIELD",
            CalcError::DuplicateName { .. } => "DUPLICATE_NAME",
            CalcError::LoadNotFound { .. } => "LOAD_NOT_FOUND",
            CalcError::EmptyLoadSet => "EMPTY_LOAD_SET",
            CalcError::NoStandardSizeFits { .. } => "NO_STANDARD_SIZE_FITS",
            CalcError::NoSuitableComponent { .. } => "NO_SUITABLE_COMPONENT",
            CalcError::InvalidVolume { .. } => "INVALID_VOLUME",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_field("power_kw", "-5", "Power must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidField\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_unit_variant_serialization() {
        let json = serde_json::to_string(&CalcError::EmptyLoadSet).unwrap();
        assert_eq!(json, "{\"type\":\"EmptyLoadSet\"}");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::duplicate_name("Pump").error_code(), "DUPLICATE_NAME");
        assert_eq!(CalcError::EmptyLoadSet.error_code(), "EMPTY_LOAD_SET");
        assert_eq!(
            CalcError::InvalidVolume { volume_m3: 0.0 }.error_code(),
            "INVALID_VOLUME"
        );
    }

    #[test]
    fn test_no_suitable_component_reports_derated_threshold() {
        let error = CalcError::no_suitable_component(100.0, 1.25, 30.0);
        match &error {
            CalcError::NoSuitableComponent { min_rated_current_a, .. } => {
                assert!((*min_rated_current_a - 125.0).abs() < 1e-9);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
        assert!(!error.is_input_error());
    }

    #[test]
    fn test_display_messages() {
        let error = CalcError::NoStandardSizeFits {
            design_power_kw: 3000.0,
            largest_kva: 2500.0,
        };
        assert_eq!(
            error.to_string(),
            "No standard transformer covers this design load: 3000.0 kW exceeds 2500 kVA"
        );
        assert!(CalcError::duplicate_name("Pump").to_string().contains("'Pump'"));
    }
}
