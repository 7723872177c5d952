//! # Switchboard Sizing Equations
//!
//! All electrical formulas used by the calculations live here, so they can
//! be verified in one place and listed in the generated EQUATIONS.md.
//!
//! ## Modules
//!
//! - [`electrical`] - Currents, power balance, fault level, thermal formulas
//! - [`registry`] - Equation metadata and usage tracking
//!
//! ## Conventions
//!
//! - Power in kW (apparent power of transformers in kVA, compared 1:1)
//! - Currents in A, fault currents in kA
//! - Dissipation in W, volumes in m³

pub mod electrical;
pub mod registry;

pub use electrical::{
    busbar_rating,
    design_power,
    estimated_dissipation,
    intermittent_equivalent_power,
    max_dissipable_power,
    short_circuit_current,
    simultaneity_factor,
    thermal_margin_pct,
    three_phase_current,
    BREAKER_DERATING,
    DESIGN_RESERVE,
    LINE_VOLTAGE_V,
    MAX_SIMULTANEITY_FACTOR,
    SQRT_3,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
