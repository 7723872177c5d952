//! # Breaker Selection
//!
//! Searches a [`BreakerCatalog`] for the cheapest breaker that satisfies a
//! required current (with the 1.25 derating margin) and the prospective
//! fault current, and assembles the main + branch breaker schedule.
//!
//! ## Selection Rule
//!
//! - Candidates: `In ≥ I_req × 1.25` and `Icu ≥ Icc`
//! - Winner: minimum price; equal prices resolve to the lower rated
//!   current, then to catalog order
//! - No candidate: [`CalcError::NoSuitableComponent`], never a partial match
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::selection::select_breaker;
//! use calc_core::catalog::BreakerCatalog;
//!
//! let breaker = select_breaker(232.0, 3.85, BreakerCatalog::standard()).unwrap();
//! assert_eq!(breaker.label(), "T5H400 320A");
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::{BreakerCatalog, BreakerModel};
use crate::equations::BREAKER_DERATING;
use crate::errors::{CalcError, CalcResult};
use crate::loads::Load;
pub use crate::loads::MAIN_INCOMER_CIRCUIT;

/// Select the cheapest conforming breaker.
pub fn select_breaker(
    required_current_a: f64,
    fault_current_ka: f64,
    catalog: &BreakerCatalog,
) -> CalcResult<BreakerModel> {
    if !required_current_a.is_finite() || required_current_a < 0.0 {
        return Err(CalcError::invalid_field(
            "required_current_a",
            required_current_a.to_string(),
            "Required current must be a non-negative number",
        ));
    }
    if !fault_current_ka.is_finite() || fault_current_ka < 0.0 {
        return Err(CalcError::invalid_field(
            "fault_current_ka",
            fault_current_ka.to_string(),
            "Fault current must be a non-negative number",
        ));
    }

    let min_rated_current_a = required_current_a * BREAKER_DERATING;

    // min_by keeps the first of equal elements, so catalog order is the last resort
    catalog
        .iter()
        .filter(|b| b.rated_current_a >= min_rated_current_a && b.breaking_capacity_ka >= fault_current_ka)
        .min_by(|a, b| {
            a.price_eur
                .partial_cmp(&b.price_eur)
                .unwrap_or(Ordering::Equal)
                .then(a.rated_current_a.partial_cmp(&b.rated_current_a).unwrap_or(Ordering::Equal))
        })
        .cloned()
        .ok_or_else(|| CalcError::no_suitable_component(required_current_a, BREAKER_DERATING, fault_current_ka))
}

/// A circuit with its selected breaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerAssignment {
    /// Circuit name ("Main incomer" or the load name)
    pub circuit: String,

    /// Operating current of the circuit (A)
    pub required_current_a: f64,

    /// Selected catalog entry
    pub breaker: BreakerModel,
}

/// A circuit for which no breaker could be selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedCircuit {
    /// Load name, or [`MAIN_INCOMER_CIRCUIT`]
    pub circuit: String,

    /// Current the breaker had to carry before derating (A)
    pub required_current_a: f64,

    /// Why selection failed, normally `NoSuitableComponent`
    pub error: CalcError,
}

/// Main and branch breakers of a switchboard.
///
/// Unresolved circuits are listed explicitly and contribute nothing to
/// `total_cost_eur`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerSchedule {
    /// Main incomer, `None` when it could not be resolved
    pub main: Option<BreakerAssignment>,

    /// One entry per resolved load, in load order
    pub branches: Vec<BreakerAssignment>,

    /// Circuits without a conforming breaker (main included)
    pub unresolved: Vec<UnresolvedCircuit>,

    /// Price of the main breaker plus every resolved branch breaker (€)
    pub total_cost_eur: f64,
}

impl BreakerSchedule {
    /// Whether every circuit received a breaker
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Number of breakers in the schedule
    pub fn breaker_count(&self) -> usize {
        self.branches.len() + usize::from(self.main.is_some())
    }
}

/// Build the breaker schedule for a main incomer current and a list of loads.
///
/// Every load is sized off its own line current. Selection failures never
/// abort the schedule; they end up in [`BreakerSchedule::unresolved`].
pub fn build_breaker_schedule(
    main_current_a: f64,
    loads: &[Load],
    fault_current_ka: f64,
    catalog: &BreakerCatalog,
) -> BreakerSchedule {
    let mut unresolved = Vec::new();

    let mut assign = |circuit: &str, required_current_a: f64| -> Option<BreakerAssignment> {
        match select_breaker(required_current_a, fault_current_ka, catalog) {
            Ok(breaker) => Some(BreakerAssignment {
                circuit: circuit.to_string(),
                required_current_a,
                breaker,
            }),
            Err(error) => {
                tracing::warn!(circuit, required_current_a, fault_current_ka, %error, "no breaker for circuit");
                unresolved.push(UnresolvedCircuit {
                    circuit: circuit.to_string(),
                    required_current_a,
                    error,
                });
                None
            }
        }
    };

    let main = assign(MAIN_INCOMER_CIRCUIT, main_current_a);
    let branches: Vec<BreakerAssignment> = loads
        .iter()
        .filter_map(|load| assign(&load.name, load.current_a()))
        .collect();

    let total_cost_eur = main.iter().chain(branches.iter()).map(|a| a.breaker.price_eur).sum();

    BreakerSchedule {
        main,
        branches,
        unresolved,
        total_cost_eur,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadTemplate;

    fn catalog() -> &'static BreakerCatalog {
        BreakerCatalog::standard()
    }

    #[test]
    fn test_selection_respects_derating_and_fault() {
        let mut required = 1.0;
        while required < 1300.0 {
            for fault in [3.0, 20.0, 40.0, 60.0] {
                match select_breaker(required, fault, catalog()) {
                    Ok(b) => {
                        assert!(b.rated_current_a >= required * 1.25);
                        assert!(b.breaking_capacity_ka >= fault);
                    }
                    Err(CalcError::NoSuitableComponent { .. }) => {}
                    Err(other) => panic!("Unexpected error {:?}", other),
                }
            }
            required += 13.7;
        }
    }

    #[test]
    fn test_selected_price_is_minimum() {
        let required = 60.0;
        let fault = 10.0;
        let chosen = select_breaker(required, fault, catalog()).unwrap();
        let min_price = catalog()
            .iter()
            .filter(|b| b.rated_current_a >= required * 1.25 && b.breaking_capacity_ka >= fault)
            .map(|b| b.price_eur)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(chosen.price_eur, min_price);
        assert_eq!(chosen.rated_current_a, 80.0);
    }

    #[test]
    fn test_fault_current_excludes_cheap_frames() {
        // 40 A needs 50 A, but T1 (15 kA) cannot break 20 kA
        let chosen = select_breaker(40.0, 20.0, catalog()).unwrap();
        assert_eq!(chosen.model_name, "T2S160");
        assert_eq!(chosen.rated_current_a, 100.0);
    }

    #[test]
    fn test_main_incomer_needs_air_breaker() {
        // 494.3 A × 1.25 = 617.9 A
        let chosen = select_breaker(494.31, 7.578, catalog()).unwrap();
        assert_eq!(chosen.label(), "E1N800 630A");
        assert_eq!(chosen.price_eur, 4500.0);
    }

    #[test]
    fn test_tie_break_prefers_lower_rating_then_catalog_order() {
        let catalog = BreakerCatalog::new(vec![
            BreakerModel::new("A", "A-big", 200.0, 50.0, 900.0),
            BreakerModel::new("B", "B-small", 125.0, 50.0, 900.0),
            BreakerModel::new("C", "C-small", 125.0, 50.0, 900.0),
        ])
        .unwrap();
        let chosen = select_breaker(90.0, 10.0, &catalog).unwrap();
        assert_eq!(chosen.model_name, "B-small");

        // Idempotent
        assert_eq!(select_breaker(90.0, 10.0, &catalog).unwrap(), chosen);
    }

    #[test]
    fn test_no_suitable_component() {
        match select_breaker(2000.0, 10.0, catalog()) {
            Err(CalcError::NoSuitableComponent {
                required_current_a,
                min_rated_current_a,
                fault_current_ka,
            }) => {
                assert_eq!(required_current_a, 2000.0);
                assert_eq!(min_rated_current_a, 2500.0);
                assert_eq!(fault_current_ka, 10.0);
            }
            other => panic!("Expected NoSuitableComponent, got {:?}", other),
        }
        // Breaking capacity alone can also rule everything out
        assert!(select_breaker(10.0, 100.0, catalog()).is_err());

        let empty = BreakerCatalog::new(vec![]).unwrap();
        assert!(select_breaker(10.0, 1.0, &empty).is_err());
    }

    #[test]
    fn test_schedule_for_workshop() {
        let loads = LoadTemplate::MechanicalWorkshop.loads();
        let schedule = build_breaker_schedule(232.0, &loads, 3.849, catalog());

        assert!(schedule.is_complete());
        assert_eq!(schedule.breaker_count(), 6);
        let main = schedule.main.as_ref().unwrap();
        assert_eq!(main.circuit, MAIN_INCOMER_CIRCUIT);
        assert_eq!(main.breaker.price_eur, 2200.0);

        let prices: Vec<f64> = schedule.branches.iter().map(|a| a.breaker.price_eur).collect();
        assert_eq!(prices, vec![680.0, 520.0, 450.0, 450.0, 450.0]);
        assert_eq!(schedule.total_cost_eur, 4750.0);
    }

    #[test]
    fn test_schedule_surfaces_unresolved_branches() {
        let loads = vec![Load::new("Small", 10.0), Load::new("Huge", 1200.0)];
        let schedule = build_breaker_schedule(100.0, &loads, 10.0, catalog());

        assert!(!schedule.is_complete());
        assert_eq!(schedule.branches.len(), 1);
        assert_eq!(schedule.unresolved.len(), 1);
        assert_eq!(schedule.unresolved[0].circuit, "Huge");
        assert_eq!(schedule.unresolved[0].error.error_code(), "NO_SUITABLE_COMPONENT");

        // Unresolved branch contributes nothing
        let main_price = schedule.main.as_ref().unwrap().breaker.price_eur;
        assert_eq!(schedule.total_cost_eur, main_price + schedule.branches[0].breaker.price_eur);
    }
}
