//! Ready-made load lists for typical plants.
//!
//! A template is a quick starting point: its loads are appended to a
//! project's [`LoadSet`](super::LoadSet) like any other load, so the usual
//! name-uniqueness rule applies.

use serde::{Deserialize, Serialize};

use super::{Load, Priority, Regime};

/// Built-in load templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadTemplate {
    /// Machine shop with CNC centres, a lathe and compressed air
    MechanicalWorkshop,
    /// Dairy with pasteurisation, refrigeration and packaging
    Dairy,
}

impl LoadTemplate {
    /// All templates for UI selection
    pub const ALL: [LoadTemplate; 2] = [LoadTemplate::MechanicalWorkshop, LoadTemplate::Dairy];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadTemplate::MechanicalWorkshop => "Mechanical workshop",
            LoadTemplate::Dairy => "Dairy",
        }
    }

    /// The loads making up this template, in table order
    pub fn loads(&self) -> Vec<Load> {
        match self {
            LoadTemplate::MechanicalWorkshop => vec![
                Load::new("CNC Center 1", 45.0).with_hours(16.0),
                Load::new("CNC Center 2", 35.0).with_hours(16.0),
                Load::new("Lathe", 15.0)
                    .with_power_factor(0.8)
                    .with_regime(Regime::Intermittent)
                    .with_hours(8.0),
                Load::new("Compressor", 22.0).with_priority(Priority::Critical),
                Load::new("Lighting", 15.0).with_power_factor(0.9).with_hours(12.0),
            ],
            LoadTemplate::Dairy => vec![
                Load::new("Pasteurizer", 120.0)
                    .with_power_factor(0.9)
                    .with_priority(Priority::Critical),
                Load::new("Refrigeration Unit", 85.0).with_priority(Priority::Critical),
                Load::new("Centrifuge", 75.0)
                    .with_power_factor(0.8)
                    .with_regime(Regime::Intermittent)
                    .with_hours(6.0),
                Load::new("Packaging", 35.0).with_hours(16.0),
            ],
        }
    }
}

impl std::fmt::Display for LoadTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
