//! # calc_core - Low-Voltage Switchboard Sizing Engine
//!
//! `calc_core` is the computational heart of Quadra: it turns a list of
//! electrical loads into a preliminary switchboard design (power balance,
//! transformer, fault level, breakers, enclosure, thermal check, budget).
//! All inputs and outputs are JSON-serializable, making it easy to drive
//! from a UI, a script or an AI assistant.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Calculations are pure functions over plain data
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit State**: The load list lives in a [`Project`], not in a UI
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::design_switchboard;
//! use calc_core::catalog::BreakerCatalog;
//! use calc_core::loads::Load;
//! use calc_core::project::{Environment, Project, Sector};
//!
//! let mut project = Project::new("Bottling line", Sector::Food, Environment::IndoorNormal);
//! project.add_load(Load::new("Filler", 30.0)).unwrap();
//! project.add_load(Load::new("Conveyor", 7.5)).unwrap();
//!
//! let design = design_switchboard(&project, BreakerCatalog::standard()).unwrap();
//! assert_eq!(design.transformer.rating_kva, 160.0);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&design).unwrap();
//! assert!(json.contains("total_cost_eur"));
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Project container, metadata, and design settings
//! - [`loads`] - Load model, load collection, and templates
//! - [`catalog`] - Breaker, transformer, and enclosure reference data
//! - [`calculations`] - Sizing, fault, selection, thermal, and full design
//! - [`equations`] - Formulas and the equation registry
//! - [`report`] - Structured report data
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod equations;
pub mod errors;
pub mod loads;
pub mod project;
pub mod report;

// Re-export commonly used types at crate root for convenience
pub use calculations::{design_switchboard, SwitchboardDesign};
pub use errors::{CalcError, CalcResult};
pub use loads::{Load, LoadSet, LoadTemplate};
pub use project::{DesignSettings, Project, ProjectMetadata};
pub use report::DesignReport;
