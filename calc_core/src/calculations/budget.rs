//! # Budget Analysis
//!
//! Compares the cost of the breaker schedule with the project budget.
//! The recommended share for breakers is 40 % of the budget, the ceiling 60 %.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::project::DesignSettings;

/// Breaker cost against the project budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAnalysis {
    /// Available budget (€)
    pub budget_eur: f64,

    /// Cost of the selected breakers (€)
    pub breaker_cost_eur: f64,

    /// Breaker cost as a percentage of the budget
    pub breaker_share_pct: f64,

    /// Budget left after the breakers (€), negative when exceeded
    pub residual_eur: f64,

    /// Breakers stay within the recommended share
    pub within_breaker_share: bool,

    /// Breakers stay within the overall ceiling
    pub within_overall_ceiling: bool,
}

/// Analyze breaker cost against the budget in `settings`.
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::budget::analyze_budget;
/// use calc_core::project::DesignSettings;
///
/// let analysis = analyze_budget(4750.0, &DesignSettings::default()).unwrap();
/// assert!((analysis.breaker_share_pct - 4.75).abs() < 1e-9);
/// assert!(analysis.within_breaker_share);
/// ```
pub fn analyze_budget(breaker_cost_eur: f64, settings: &DesignSettings) -> CalcResult<BudgetAnalysis> {
    let budget_eur = settings.budget_keur * 1000.0;
    if !budget_eur.is_finite() || budget_eur <= 0.0 {
        return Err(CalcError::invalid_field(
            "budget_keur",
            settings.budget_keur.to_string(),
            "Budget must be positive",
        ));
    }

    Ok(BudgetAnalysis {
        budget_eur,
        breaker_cost_eur,
        breaker_share_pct: breaker_cost_eur / budget_eur * 100.0,
        residual_eur: budget_eur - breaker_cost_eur,
        within_breaker_share: breaker_cost_eur <= budget_eur * settings.breaker_budget_share,
        within_overall_ceiling: breaker_cost_eur <= budget_eur * settings.overall_budget_share,
    })
}
