//! Electrical loads and the ordered load collection of a project
//!
//! # Overview
//!
//! - [`Load`] - A named three-phase consumer (power, cosφ, duty, priority)
//! - [`Regime`] - Continuous vs intermittent duty
//! - [`Priority`] - Critical / normal / deferrable
//! - [`LoadSet`] - Ordered, name-unique collection with add/remove/list
//! - [`templates`] - Ready-made load lists for typical plants
//!
//! # Example
//!
//! ```
//! use calc_core::loads::{Load, LoadSet, Regime};
//!
//! let mut loads = LoadSet::new();
//! loads.add(Load::new("Compressor", 22.0)).unwrap();
//! loads.add(Load::new("Lathe", 15.0).with_regime(Regime::Intermittent).with_hours(8.0)).unwrap();
//!
//! // Names are unique regardless of case
//! assert!(loads.add(Load::new("COMPRESSOR", 5.0)).is_err());
//! assert_eq!(loads.len(), 2);
//! ```

pub mod load_set;
pub mod templates;

pub use load_set::LoadSet;
pub use templates::LoadTemplate;

use serde::{Deserialize, Serialize};

use crate::equations::{three_phase_current, LINE_VOLTAGE_V};
use crate::errors::{CalcError, CalcResult};

/// Circuit name of the main incomer in breaker schedules and reports.
///
/// Reserved: no load may take this name.
pub const MAIN_INCOMER_CIRCUIT: &str = "Main incomer";

/// Default power factor for a new load
pub const DEFAULT_POWER_FACTOR: f64 = 0.85;

/// Duty regime of a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Runs for its whole working period at rated power
    #[default]
    Continuous,
    /// Cycles on and off; contributes by its daily duty
    Intermittent,
}

impl Regime {
    /// All regimes for UI selection
    pub const ALL: [Regime; 2] = [Regime::Continuous, Regime::Intermittent];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Regime::Continuous => "Continuous",
            Regime::Intermittent => "Intermittent",
        }
    }

    /// Typical daily hours offered by a form for this regime
    pub fn default_hours(&self) -> f64 {
        match self {
            Regime::Continuous => 24.0,
            Regime::Intermittent => 8.0,
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Supply priority of a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Must stay supplied (process or safety critical)
    Critical,
    /// Ordinary load
    #[default]
    Normal,
    /// Can be shed or postponed
    Deferrable,
}

impl Priority {
    /// All priorities in descending importance
    pub const ALL: [Priority; 3] = [Priority::Critical, Priority::Normal, Priority::Deferrable];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::Normal => "Normal",
            Priority::Deferrable => "Deferrable",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A named electrical consumer.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "CNC Center 1",
///   "power_kw": 45.0,
///   "power_factor": 0.85,
///   "regime": "continuous",
///   "priority": "normal",
///   "hours_per_day": 16.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Identifier, unique (case-insensitive) within a project
    pub name: String,

    /// Rated active power (kW)
    pub power_kw: f64,

    /// cosφ in (0, 1]
    #[serde(default = "default_power_factor")]
    pub power_factor: f64,

    /// Duty regime
    #[serde(default)]
    pub regime: Regime,

    /// Supply priority
    #[serde(default)]
    pub priority: Priority,

    /// Daily operating hours in (0, 24]
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
}

fn default_power_factor() -> f64 {
    DEFAULT_POWER_FACTOR
}

fn default_hours_per_day() -> f64 {
    24.0
}

impl Load {
    /// Create a continuous, normal-priority load running 24 h at cosφ 0.85.
    pub fn new(name: impl Into<String>, power_kw: f64) -> Self {
        Load {
            name: name.into(),
            power_kw,
            power_factor: DEFAULT_POWER_FACTOR,
            regime: Regime::Continuous,
            priority: Priority::Normal,
            hours_per_day: 24.0,
        }
    }

    /// Set the power factor
    pub fn with_power_factor(mut self, power_factor: f64) -> Self {
        self.power_factor = power_factor;
        self
    }

    /// Set the duty regime
    pub fn with_regime(mut self, regime: Regime) -> Self {
        self.regime = regime;
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the daily operating hours
    pub fn with_hours(mut self, hours_per_day: f64) -> Self {
        self.hours_per_day = hours_per_day;
        self
    }

    /// Validate every field.
    pub fn validate(&self) -> CalcResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalcError::invalid_field(
                "name",
                format!("{:?}", self.name),
                "Name must not be empty",
            ));
        }
        if self.has_name(MAIN_INCOMER_CIRCUIT) {
            return Err(CalcError::invalid_field(
                "name",
                self.name.clone(),
                "Name is reserved for the main incomer",
            ));
        }
        if !self.power_kw.is_finite() || self.power_kw <= 0.0 {
            return Err(CalcError::invalid_field(
                "power_kw",
                self.power_kw.to_string(),
                "Power must be positive",
            ));
        }
        if !(self.power_factor > 0.0 && self.power_factor <= 1.0) {
            return Err(CalcError::invalid_field(
                "power_factor",
                self.power_factor.to_string(),
                "Power factor must be in (0, 1]",
            ));
        }
        if !(self.hours_per_day > 0.0 && self.hours_per_day <= 24.0) {
            return Err(CalcError::invalid_field(
                "hours_per_day",
                self.hours_per_day.to_string(),
                "Hours per day must be in (0, 24]",
            ));
        }
        Ok(())
    }

    /// Line current drawn at 400 V (A)
    pub fn current_a(&self) -> f64 {
        three_phase_current(self.power_kw, self.power_factor, LINE_VOLTAGE_V)
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}
