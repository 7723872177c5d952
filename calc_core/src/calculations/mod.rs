//! # Switchboard Calculations
//!
//! Each step of the design is a pure function over plain data:
//!
//! - `*Result` / `*Selection` - Results (JSON-serializable)
//! - Free functions returning `CalcResult<_>` - No I/O, no shared state
//!
//! The steps can be called on their own, or chained by
//! [`design_switchboard`](switchboard::design_switchboard).
//!
//! ## Available Calculations
//!
//! - [`sizing`] - Installed power, simultaneity factor and design power
//! - [`fault`] - Transformer selection and short-circuit current
//! - [`selection`] - Cheapest conforming breaker and breaker schedule
//! - [`thermal`] - Enclosure temperature-rise verification
//! - [`enclosure`] - Enclosure frame from feeders and main current
//! - [`budget`] - Breaker cost against the project budget
//! - [`switchboard`] - Full design pipeline

pub mod budget;
pub mod enclosure;
pub mod fault;
pub mod selection;
pub mod sizing;
pub mod switchboard;
pub mod thermal;

// Re-export commonly used types
pub use budget::{analyze_budget, BudgetAnalysis};
pub use enclosure::{feeder_count, select_enclosure, EnclosureSelection};
pub use fault::{estimate_short_circuit_current, select_transformer};
pub use selection::{
    build_breaker_schedule, select_breaker, BreakerAssignment, BreakerSchedule, UnresolvedCircuit,
    MAIN_INCOMER_CIRCUIT,
};
pub use sizing::{compute_sizing, SizingResult};
pub use switchboard::{design_switchboard, main_incomer_current, SwitchboardDesign};
pub use thermal::{dissipation_coefficient, verify_thermal, ThermalResult, ThermalVerdict};
