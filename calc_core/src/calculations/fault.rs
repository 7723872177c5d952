//! # Transformer Selection and Fault Current
//!
//! Picks the smallest standard transformer covering the design power and
//! estimates the prospective short-circuit current at its secondary with a
//! fixed 6 % short-circuit impedance.
//!
//! Design power (kW) is compared directly against kVA ratings, as in common
//! preliminary sizing practice.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::fault::{estimate_short_circuit_current, select_transformer};
//! use calc_core::catalog::STANDARD_TRANSFORMER_SIZES_KVA;
//! use calc_core::equations::LINE_VOLTAGE_V;
//!
//! let kva = select_transformer(291.1, STANDARD_TRANSFORMER_SIZES_KVA).unwrap();
//! assert_eq!(kva, 315.0);
//!
//! let icc = estimate_short_circuit_current(kva, LINE_VOLTAGE_V).unwrap();
//! assert!((icc - 7.578).abs() < 0.001);
//! ```

use crate::equations::short_circuit_current;
use crate::errors::{CalcError, CalcResult};

/// Smallest rating in `standard_sizes` that is ≥ `design_power_kw`.
///
/// `standard_sizes` may be in any order. Fails with
/// [`CalcError::NoStandardSizeFits`] when the design power exceeds every
/// rating.
pub fn select_transformer(design_power_kw: f64, standard_sizes: &[f64]) -> CalcResult<f64> {
    if !design_power_kw.is_finite() || design_power_kw < 0.0 {
        return Err(CalcError::invalid_field(
            "design_power_kw",
            design_power_kw.to_string(),
            "Design power must be a non-negative number",
        ));
    }

    let smallest = standard_sizes
        .iter()
        .copied()
        .filter(|&kva| kva >= design_power_kw)
        .reduce(f64::min);

    match smallest {
        Some(kva) => {
            tracing::debug!(design_kw = design_power_kw, kva, "transformer selected");
            Ok(kva)
        }
        None => Err(CalcError::NoStandardSizeFits {
            design_power_kw,
            largest_kva: standard_sizes.iter().copied().fold(0.0, f64::max),
        }),
    }
}

/// Prospective short-circuit current (kA) at the transformer secondary.
///
/// Linear in `transformer_kva`. Non-positive inputs are rejected.
pub fn estimate_short_circuit_current(transformer_kva: f64, line_voltage_v: f64) -> CalcResult<f64> {
    if !transformer_kva.is_finite() || transformer_kva <= 0.0 {
        return Err(CalcError::invalid_field(
            "transformer_kva",
            transformer_kva.to_string(),
            "Transformer rating must be positive",
        ));
    }
    if !line_voltage_v.is_finite() || line_voltage_v <= 0.0 {
        return Err(CalcError::invalid_field(
            "line_voltage_v",
            line_voltage_v.to_string(),
            "Line voltage must be positive",
        ));
    }
    Ok(short_circuit_current(transformer_kva, line_voltage_v))
}
