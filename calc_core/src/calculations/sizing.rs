//! # Power Balance (Sizing Engine)
//!
//! Aggregates a load list into installed power, simultaneity factor and
//! design power, the figure used to size the transformer and main incomer.
//!
//! ## Method
//!
//! - Installed power is the plain sum of rated powers.
//! - Continuous loads count in full; intermittent loads count as their
//!   daily-average equivalent `P × h / 24`, weighted by 0.7 for overlap.
//! - Ks = min(0.9, demand / installed); design power adds a 15 % reserve.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::sizing::compute_sizing;
//! use calc_core::loads::Load;
//!
//! let result = compute_sizing(&[Load::new("Chiller", 100.0)]).unwrap();
//! assert!((result.simultaneity_factor - 0.9).abs() < 1e-12);
//! assert!((result.design_power_kw - 103.5).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{design_power, intermittent_equivalent_power, simultaneity_factor};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{Load, Regime};

/// Power balance of a load set.
///
/// ## JSON Example
///
/// ```json
/// {
///   "installed_power_kw": 132.0,
///   "continuous_power_kw": 117.0,
///   "intermittent_equivalent_kw": 5.0,
///   "simultaneity_factor": 0.9,
///   "design_power_kw": 136.62
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    /// Sum of rated powers (kW)
    pub installed_power_kw: f64,

    /// Sum of rated powers of continuous loads (kW)
    pub continuous_power_kw: f64,

    /// Daily-average equivalent of intermittent loads, before overlap weighting (kW)
    pub intermittent_equivalent_kw: f64,

    /// Ks in (0, 0.9]
    pub simultaneity_factor: f64,

    /// Installed × Ks × 1.15 (kW)
    pub design_power_kw: f64,
}

/// Compute the power balance of a load list.
///
/// Fails with [`CalcError::EmptyLoadSet`] when `loads` is empty and with
/// [`CalcError::InvalidField`] when any load is malformed.
pub fn compute_sizing(loads: &[Load]) -> CalcResult<SizingResult> {
    if loads.is_empty() {
        return Err(CalcError::EmptyLoadSet);
    }
    for load in loads {
        load.validate()?;
    }

    let installed_power_kw: f64 = loads.iter().map(|l| l.power_kw).sum();

    let (continuous_power_kw, intermittent_equivalent_kw) =
        loads.iter().fold((0.0, 0.0), |(cont, int), load| match load.regime {
            Regime::Continuous => (cont + load.power_kw, int),
            Regime::Intermittent => (
                cont,
                int + intermittent_equivalent_power(load.power_kw, load.hours_per_day),
            ),
        });

    // Unreachable with validated loads, kept as a guard on the division
    if installed_power_kw <= 0.0 {
        return Err(CalcError::invalid_field(
            "power_kw",
            installed_power_kw.to_string(),
            "Installed power must be positive",
        ));
    }

    let ks = simultaneity_factor(continuous_power_kw, intermittent_equivalent_kw, installed_power_kw);
    let design_power_kw = design_power(installed_power_kw, ks);

    tracing::debug!(
        loads = loads.len(),
        installed_kw = installed_power_kw,
        ks,
        design_kw = design_power_kw,
        "power balance computed"
    );

    Ok(SizingResult {
        installed_power_kw,
        continuous_power_kw,
        intermittent_equivalent_kw,
        simultaneity_factor: ks,
        design_power_kw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadTemplate;

    #[test]
    fn test_single_continuous_load() {
        let result = compute_sizing(&[Load::new("Motor", 100.0)]).unwrap();
        assert_eq!(result.installed_power_kw, 100.0);
        assert_eq!(result.simultaneity_factor, 0.9);
        assert!((result.design_power_kw - 103.5).abs() < 1e-9);
    }

    #[test]
    fn test_all_continuous_is_capped() {
        let loads = vec![Load::new("A", 10.0), Load::new("B", 20.0), Load::new("C", 5.5)];
        let result = compute_sizing(&loads).unwrap();
        assert_eq!(result.simultaneity_factor, 0.9);
        assert_eq!(result.intermittent_equivalent_kw, 0.0);
    }

    #[test]
    fn test_intermittent_lowers_ks() {
        // 100 kW for 6 h: equivalent 25 kW, weighted 17.5 kW
        let loads = vec![Load::new("Press", 100.0)
            .with_regime(Regime::Intermittent)
            .with_hours(6.0)];
        let result = compute_sizing(&loads).unwrap();
        assert!((result.intermittent_equivalent_kw - 25.0).abs() < 1e-12);
        assert!((result.simultaneity_factor - 0.175).abs() < 1e-12);
        assert!((result.design_power_kw - 100.0 * 0.175 * 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_design_power_identity_and_bounds() {
        for template in LoadTemplate::ALL {
            let r = compute_sizing(&template.loads()).unwrap();
            assert!(r.simultaneity_factor > 0.0 && r.simultaneity_factor <= 0.9);
            let expected = r.installed_power_kw * r.simultaneity_factor * 1.15;
            assert!((r.design_power_kw - expected).abs() < 1e-9);
            assert!(r.design_power_kw <= r.installed_power_kw * 1.035 + 1e-9);
        }
    }

    #[test]
    fn test_ks_stays_in_range_for_mixed_sets() {
        let hours = [0.01, 0.5, 1.0, 6.0, 12.0, 24.0];
        for &h in &hours {
            for continuous in 0..=3 {
                let mut loads: Vec<Load> = (0..continuous)
                    .map(|i| Load::new(format!("C{}", i), 5.0 + i as f64))
                    .collect();
                loads.extend((0..3).map(|i| {
                    Load::new(format!("I{}", i), 40.0 * (i + 1) as f64)
                        .with_regime(Regime::Intermittent)
                        .with_hours(h)
                }));

                let r = compute_sizing(&loads).unwrap();
                assert!(
                    r.simultaneity_factor > 0.0 && r.simultaneity_factor <= 0.9,
                    "Ks = {} for {} continuous loads at {} h",
                    r.simultaneity_factor,
                    continuous,
                    h
                );
                assert!(r.design_power_kw > 0.0);
            }
        }

        // All intermittent at a few minutes a day: 0.7 × 0.01 / 24
        let loads = vec![Load::new("Gate", 10.0).with_regime(Regime::Intermittent).with_hours(0.01)];
        let r = compute_sizing(&loads).unwrap();
        assert!((r.simultaneity_factor - 0.7 * 0.01 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_dairy_balance() {
        let r = compute_sizing(&LoadTemplate::Dairy.loads()).unwrap();
        assert_eq!(r.installed_power_kw, 315.0);
        assert_eq!(r.continuous_power_kw, 240.0);
        assert!((r.intermittent_equivalent_kw - 18.75).abs() < 1e-12);
        assert!((r.simultaneity_factor - 253.125 / 315.0).abs() < 1e-12);
        assert!((r.design_power_kw - 291.09375).abs() < 1e-9);
    }

    #[test]
    fn test_empty_set() {
        assert_eq!(compute_sizing(&[]), Err(CalcError::EmptyLoadSet));
    }

    #[test]
    fn test_invalid_load_rejected() {
        let loads = vec![Load::new("Ok", 10.0), Load::new("Bad", 0.0)];
        match compute_sizing(&loads) {
            Err(CalcError::InvalidField { field, .. }) => assert_eq!(field, "power_kw"),
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }
}
