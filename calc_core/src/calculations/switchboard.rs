//! # Switchboard Design
//!
//! Runs the full preliminary design of a low-voltage switchboard from a
//! [`Project`]: power balance, transformer, fault level, breakers, busbar,
//! enclosure, thermal check and budget. Every formula used is recorded in an
//! [`EquationTracker`] so a report can list its calculation basis.
//!
//! The design works on a snapshot of the project's loads; the project is
//! never mutated.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::switchboard::design_switchboard;
//! use calc_core::catalog::BreakerCatalog;
//! use calc_core::loads::LoadTemplate;
//! use calc_core::project::{Environment, Project, Sector};
//!
//! let mut project = Project::new("Workshop", Sector::Industrial, Environment::IndoorNormal);
//! project.load_template(LoadTemplate::MechanicalWorkshop).unwrap();
//!
//! let design = design_switchboard(&project, BreakerCatalog::standard()).unwrap();
//! assert_eq!(design.transformer.rating_kva, 160.0);
//! assert_eq!(design.breakers.total_cost_eur, 4750.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{BreakerCatalog, TransformerSpec, STANDARD_TRANSFORMER_SIZES_KVA};
use crate::equations::{busbar_rating, estimated_dissipation, three_phase_current, Equation, EquationTracker, LINE_VOLTAGE_V};
use crate::errors::CalcResult;
use crate::project::Project;

use super::budget::{analyze_budget, BudgetAnalysis};
use super::enclosure::{feeder_count, select_enclosure, EnclosureSelection};
use super::fault::{estimate_short_circuit_current, select_transformer};
use super::selection::{build_breaker_schedule, BreakerSchedule, MAIN_INCOMER_CIRCUIT};
use super::sizing::{compute_sizing, SizingResult};
use super::thermal::{verify_thermal, ThermalResult};

/// Main incomer current from the design power and aggregate power factor (A).
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::switchboard::main_incomer_current;
///
/// let i = main_incomer_current(136.62, 0.85);
/// assert!((i - 232.0).abs() < 0.05);
/// ```
pub fn main_incomer_current(design_power_kw: f64, power_factor: f64) -> f64 {
    three_phase_current(design_power_kw, power_factor, LINE_VOLTAGE_V)
}

/// Complete preliminary design of a switchboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchboardDesign {
    /// Power balance
    pub sizing: SizingResult,

    /// Supply transformer
    pub transformer: TransformerSpec,

    /// Prospective short-circuit current at the busbar (kA)
    pub fault_current_ka: f64,

    /// Main incomer current (A)
    pub main_current_a: f64,

    /// Main and branch breakers
    pub breakers: BreakerSchedule,

    /// Busbar rating (A)
    pub busbar_rating_a: f64,

    pub enclosure: EnclosureSelection,

    pub thermal: ThermalResult,

    pub budget: BudgetAnalysis,

    /// Formulas used by this design
    pub equations: EquationTracker,
}

impl SwitchboardDesign {
    /// Whether every circuit has a breaker and the enclosure passes the thermal check
    pub fn is_acceptable(&self) -> bool {
        self.breakers.is_complete() && self.thermal.verdict.passes()
    }
}

/// Run the full design pipeline on `project`.
///
/// Fails on invalid settings, an empty load set, or a design power beyond
/// the largest standard transformer. Breaker selection failures do not fail
/// the design; they are listed in [`BreakerSchedule::unresolved`].
pub fn design_switchboard(project: &Project, catalog: &BreakerCatalog) -> CalcResult<SwitchboardDesign> {
    let settings = &project.settings;
    settings.validate()?;
    let loads = project.loads().snapshot();

    let mut equations = EquationTracker::new();

    // Power balance
    let sizing = compute_sizing(&loads)?;
    equations.record(Equation::InstalledPower, "Installed power");
    if sizing.intermittent_equivalent_kw > 0.0 {
        equations.record(Equation::IntermittentEquivalentPower, "Intermittent loads");
    }
    equations.record(Equation::SimultaneityFactor, "Simultaneity factor");
    equations.record(Equation::DesignPower, "Design power");

    // Transformer and fault level
    let rating_kva = select_transformer(sizing.design_power_kw, STANDARD_TRANSFORMER_SIZES_KVA)?;
    let transformer = TransformerSpec::standard(rating_kva);
    equations.record(Equation::TransformerSelection, "Supply transformer");

    let fault_current_ka = estimate_short_circuit_current(rating_kva, LINE_VOLTAGE_V)?;
    equations.record(Equation::ShortCircuitCurrent, "Busbar fault level");

    // Breakers
    let main_current_a = main_incomer_current(sizing.design_power_kw, settings.main_power_factor);
    equations.record(Equation::MainIncomerCurrent, "Main incomer");

    let breakers = build_breaker_schedule(main_current_a, &loads, fault_current_ka, catalog);
    equations.record_for_circuit(Equation::BreakerSelection, "Main breaker", MAIN_INCOMER_CIRCUIT);
    for load in &loads {
        equations.record_for_circuit(Equation::LineCurrent, "Branch current", load.name.as_str());
        equations.record_for_circuit(Equation::BreakerSelection, "Branch breaker", load.name.as_str());
    }

    // Busbar and enclosure
    let busbar_rating_a = busbar_rating(sizing.design_power_kw);
    equations.record(Equation::BusbarRating, "Main busbar");

    let enclosure = select_enclosure(feeder_count(loads.len()), main_current_a);

    // Thermal
    let dissipated_w = estimated_dissipation(loads.len(), settings.dissipation_per_load_w, settings.dissipation_base_w);
    equations.record(Equation::SwitchboardDissipation, "Enclosure losses");

    let thermal = verify_thermal(dissipated_w, settings.enclosure_volume_m3, project.meta.protection_grade)?;
    equations.record(Equation::MaxDissipablePower, "Enclosure capacity");
    equations.record(Equation::ThermalMargin, "Thermal verdict");

    let budget = analyze_budget(breakers.total_cost_eur, settings)?;

    tracing::info!(
        project = %project.meta.name,
        loads = loads.len(),
        design_kw = sizing.design_power_kw,
        transformer_kva = rating_kva,
        fault_ka = fault_current_ka,
        breaker_cost_eur = breakers.total_cost_eur,
        unresolved = breakers.unresolved.len(),
        thermal = %thermal.verdict,
        "switchboard design complete"
    );

    Ok(SwitchboardDesign {
        sizing,
        transformer,
        fault_current_ka,
        main_current_a,
        breakers,
        busbar_rating_a,
        enclosure,
        thermal,
        budget,
        equations,
    })
}
