//! # Project Data Structures
//!
//! The `Project` struct is the root container for one switchboard design
//! session: who/what/where metadata, design settings, and the ordered load
//! collection. It is an explicit, independently testable object; a UI holds
//! one and calls its methods instead of mutating shared state.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (name, sector, environment, IP grade, timestamps)
//! ├── settings: DesignSettings (budget, enclosure volume, defaults)
//! └── loads: LoadSet (ordered, name-unique)
//! ```
//!
//! ## Concurrency
//!
//! Calculations never touch the project directly: `design_switchboard` works
//! on a snapshot of the loads. A host sharing a project between threads must
//! serialize mutation (e.g. `RwLock<Project>`) and clone before computing.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::project::{Environment, Project, ProtectionGrade, Sector};
//! use calc_core::loads::LoadTemplate;
//!
//! let mut project = Project::new("Dairy plant", Sector::Food, Environment::IndoorHumid);
//! assert_eq!(project.meta.protection_grade, ProtectionGrade::IP43);
//!
//! project.load_template(LoadTemplate::Dairy).unwrap();
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Pasteurizer"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::loads::{Load, LoadSet, LoadTemplate};

/// Current schema version for project JSON
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata
    pub meta: ProjectMetadata,

    /// Design settings
    #[serde(default)]
    pub settings: DesignSettings,

    /// Loads in table order
    #[serde(default)]
    loads: LoadSet,
}

impl Project {
    /// Create a new empty project.
    ///
    /// The protection grade starts at the environment's default.
    pub fn new(name: impl Into<String>, sector: Sector, environment: Environment) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                id: Uuid::new_v4(),
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                sector,
                environment,
                protection_grade: environment.default_protection_grade(),
                created: now,
                modified: now,
            },
            settings: DesignSettings::default(),
            loads: LoadSet::new(),
        }
    }

    /// Parse a project from JSON, re-validating settings and every load.
    ///
    /// Loads go through [`LoadSet::add`], so a file with duplicate names or
    /// out-of-range fields is rejected with the matching [`CalcError`]
    /// rather than a generic serialization error.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        let loads: Vec<Load> = match value.as_object_mut().and_then(|o| o.remove("loads")) {
            Some(raw) => serde_json::from_value(raw)?,
            None => Vec::new(),
        };

        let mut project: Project = serde_json::from_value(value)?;
        project.settings.validate()?;
        project.loads = LoadSet::try_from(loads)?;
        Ok(project)
    }

    /// Serialize the project to pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The ordered load collection (read-only)
    pub fn loads(&self) -> &LoadSet {
        &self.loads
    }

    /// Add a load. On error the project is unchanged.
    pub fn add_load(&mut self, load: Load) -> CalcResult<usize> {
        let index = self.loads.add(load)?;
        self.touch();
        Ok(index)
    }

    /// Remove the load at `index`.
    pub fn remove_load_at(&mut self, index: usize) -> CalcResult<Load> {
        let load = self.loads.remove_at(index)?;
        self.touch();
        Ok(load)
    }

    /// Remove a load by name (case-insensitive).
    pub fn remove_load(&mut self, name: &str) -> CalcResult<Load> {
        let load = self.loads.remove_by_name(name)?;
        self.touch();
        Ok(load)
    }

    /// Append every load of a template; all-or-nothing.
    pub fn load_template(&mut self, template: LoadTemplate) -> CalcResult<usize> {
        let added = self.loads.extend(template.loads())?;
        self.touch();
        Ok(added)
    }

    /// Remove all loads
    pub fn clear_loads(&mut self) {
        if !self.loads.is_empty() {
            self.loads.clear();
            self.touch();
        }
    }

    /// Change the environment; the protection grade follows its default.
    pub fn set_environment(&mut self, environment: Environment) {
        self.meta.environment = environment;
        self.meta.protection_grade = environment.default_protection_grade();
        self.touch();
    }

    /// Override the protection grade independently of the environment.
    pub fn set_protection_grade(&mut self, grade: ProtectionGrade) {
        self.meta.protection_grade = grade;
        self.touch();
    }

    /// Whether the protection grade differs from the environment's default
    pub fn grade_overridden(&self) -> bool {
        self.meta.protection_grade != self.meta.environment.default_protection_grade()
    }

    /// Clear loads and restore default settings, keeping the identity.
    pub fn reset(&mut self) {
        self.loads.clear();
        self.settings = DesignSettings::default();
        self.meta.protection_grade = self.meta.environment.default_protection_grade();
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", Sector::default(), Environment::default())
    }
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Stable project identifier
    pub id: Uuid,

    /// Schema version
    pub version: String,

    /// Project name
    pub name: String,

    /// Application sector
    pub sector: Sector,

    /// Installation environment
    pub environment: Environment,

    /// Enclosure protection grade
    pub protection_grade: ProtectionGrade,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Application sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sector {
    #[default]
    Industrial,
    Food,
    Pharmaceutical,
    DataCenter,
    Tertiary,
}

impl Sector {
    pub const ALL: [Sector; 5] = [
        Sector::Industrial,
        Sector::Food,
        Sector::Pharmaceutical,
        Sector::DataCenter,
        Sector::Tertiary,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Sector::Industrial => "Industrial",
            Sector::Food => "Food",
            Sector::Pharmaceutical => "Pharmaceutical",
            Sector::DataCenter => "Data Center",
            Sector::Tertiary => "Tertiary",
        }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Installation environment of the switchboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Environment {
    #[default]
    IndoorNormal,
    IndoorHumid,
    Outdoor,
    ChemicallyAggressive,
}

impl Environment {
    pub const ALL: [Environment; 4] = [
        Environment::IndoorNormal,
        Environment::IndoorHumid,
        Environment::Outdoor,
        Environment::ChemicallyAggressive,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Environment::IndoorNormal => "Indoor, normal",
            Environment::IndoorHumid => "Indoor, humid",
            Environment::Outdoor => "Outdoor",
            Environment::ChemicallyAggressive => "Chemically aggressive",
        }
    }

    /// Protection grade normally required by this environment
    pub fn default_protection_grade(&self) -> ProtectionGrade {
        match self {
            Environment::IndoorNormal => ProtectionGrade::IP31,
            Environment::IndoorHumid => ProtectionGrade::IP43,
            Environment::Outdoor => ProtectionGrade::IP65,
            Environment::ChemicallyAggressive => ProtectionGrade::IP66,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Enclosure ingress-protection grade (IEC 60529)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProtectionGrade {
    #[default]
    IP31,
    IP43,
    IP65,
    IP66,
}

impl ProtectionGrade {
    pub const ALL: [ProtectionGrade; 4] = [
        ProtectionGrade::IP31,
        ProtectionGrade::IP43,
        ProtectionGrade::IP65,
        ProtectionGrade::IP66,
    ];

    /// Code string, e.g. "IP43"
    pub fn code(&self) -> &'static str {
        match self {
            ProtectionGrade::IP31 => "IP31",
            ProtectionGrade::IP43 => "IP43",
            ProtectionGrade::IP65 => "IP65",
            ProtectionGrade::IP66 => "IP66",
        }
    }

    /// Parse "IP43", "ip 43", "43"...
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "");
        let digits = normalized.strip_prefix("IP").unwrap_or(&normalized);
        match digits {
            "31" => Ok(ProtectionGrade::IP31),
            "43" => Ok(ProtectionGrade::IP43),
            "65" => Ok(ProtectionGrade::IP65),
            "66" => Ok(ProtectionGrade::IP66),
            _ => Err(CalcError::invalid_field(
                "protection_grade",
                s,
                "Supported grades are IP31, IP43, IP65 and IP66",
            )),
        }
    }
}

impl std::fmt::Display for ProtectionGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Project-wide design settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Aggregate power factor used for the main incomer current
    pub main_power_factor: f64,

    /// Internal volume of the enclosure (m³)
    pub enclosure_volume_m3: f64,

    /// Fixed internal losses (W)
    pub dissipation_base_w: f64,

    /// Losses per outgoing feeder (W)
    pub dissipation_per_load_w: f64,

    /// Overall budget (k€)
    pub budget_keur: f64,

    /// Recommended share of the budget for breakers
    pub breaker_budget_share: f64,

    /// Ceiling share of the budget for breakers
    pub overall_budget_share: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            main_power_factor: 0.85,
            // 2.0 m × 1.0 m × 0.4 m
            enclosure_volume_m3: 0.8,
            dissipation_base_w: 80.0,
            dissipation_per_load_w: 15.0,
            budget_keur: 100.0,
            breaker_budget_share: 0.4,
            overall_budget_share: 0.6,
        }
    }
}

impl DesignSettings {
    /// Validate settings.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.main_power_factor > 0.0 && self.main_power_factor <= 1.0) {
            return Err(CalcError::invalid_field(
                "main_power_factor",
                self.main_power_factor.to_string(),
                "Power factor must be in (0, 1]",
            ));
        }
        if !self.enclosure_volume_m3.is_finite() || self.enclosure_volume_m3 <= 0.0 {
            return Err(CalcError::InvalidVolume {
                volume_m3: self.enclosure_volume_m3,
            });
        }
        if !(self.dissipation_base_w >= 0.0 && self.dissipation_per_load_w >= 0.0) {
            return Err(CalcError::invalid_field(
                "dissipation_w",
                format!("{} / {}", self.dissipation_base_w, self.dissipation_per_load_w),
                "Dissipation figures cannot be negative",
            ));
        }
        if !self.budget_keur.is_finite() || self.budget_keur <= 0.0 {
            return Err(CalcError::invalid_field(
                "budget_keur",
                self.budget_keur.to_string(),
                "Budget must be positive",
            ));
        }
        for (field, share) in [
            ("breaker_budget_share", self.breaker_budget_share),
            ("overall_budget_share", self.overall_budget_share),
        ] {
            if !(share > 0.0 && share <= 1.0) {
                return Err(CalcError::invalid_field(field, share.to_string(), "Share must be in (0, 1]"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::Load;

    #[test]
    fn test_project_creation() {
        let project = Project::new("Workshop", Sector::Industrial, Environment::Outdoor);
        assert_eq!(project.meta.name, "Workshop");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.meta.protection_grade, ProtectionGrade::IP65);
        assert!(project.loads().is_empty());
        assert!(!project.grade_overridden());
    }

    #[test]
    fn test_environment_drives_grade_but_override_sticks() {
        let mut project = Project::new("P", Sector::Food, Environment::IndoorNormal);
        project.set_protection_grade(ProtectionGrade::IP65);
        assert!(project.grade_overridden());
        assert_eq!(project.meta.protection_grade, ProtectionGrade::IP65);

        project.set_environment(Environment::ChemicallyAggressive);
        assert_eq!(project.meta.protection_grade, ProtectionGrade::IP66);
        assert!(!project.grade_overridden());
    }

    #[test]
    fn test_add_remove_load_touches_project() {
        let mut project = Project::default();
        let created = project.meta.modified;

        let index = project.add_load(Load::new("Pump", 11.0)).unwrap();
        assert_eq!(index, 0);
        assert!(project.meta.modified >= created);

        assert!(project.add_load(Load::new("PUMP", 2.0)).is_err());
        assert_eq!(project.loads().len(), 1);

        let removed = project.remove_load("pump").unwrap();
        assert_eq!(removed.name, "Pump");
        assert!(project.loads().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut project = Project::new("P", Sector::Tertiary, Environment::IndoorHumid);
        project.load_template(LoadTemplate::MechanicalWorkshop).unwrap();
        project.settings.budget_keur = 250.0;
        project.set_protection_grade(ProtectionGrade::IP66);
        let id = project.meta.id;

        project.reset();
        assert!(project.loads().is_empty());
        assert_eq!(project.settings, DesignSettings::default());
        assert_eq!(project.meta.protection_grade, ProtectionGrade::IP43);
        assert_eq!(project.meta.id, id);
    }

    #[test]
    fn test_json_roundtrip_revalidates_loads() {
        let mut project = Project::new("Plant", Sector::Pharmaceutical, Environment::IndoorNormal);
        project.load_template(LoadTemplate::Dairy).unwrap();

        let json = project.to_json().unwrap();
        let loaded = Project::from_json(&json).unwrap();
        assert_eq!(loaded.loads(), project.loads());
        assert_eq!(loaded.meta.id, project.meta.id);

        // Tamper with the JSON so two loads share a name
        let tampered = json.replace("\"Centrifuge\"", "\"pasteurizer\"");
        assert!(matches!(
            Project::from_json(&tampered),
            Err(CalcError::DuplicateName { .. })
        ));

        // Plain serde goes through the same load checks
        assert!(serde_json::from_str::<Project>(&tampered).is_err());
    }

    #[test]
    fn test_protection_grade_parsing() {
        assert_eq!(ProtectionGrade::from_str_flexible("IP43").unwrap(), ProtectionGrade::IP43);
        assert_eq!(ProtectionGrade::from_str_flexible(" ip 65 ").unwrap(), ProtectionGrade::IP65);
        assert_eq!(ProtectionGrade::from_str_flexible("66").unwrap(), ProtectionGrade::IP66);
        assert!(ProtectionGrade::from_str_flexible("IP54").is_err());
    }

    #[test]
    fn test_settings_validation() {
        assert!(DesignSettings::default().validate().is_ok());

        let mut settings = DesignSettings::default();
        settings.enclosure_volume_m3 = 0.0;
        assert!(matches!(settings.validate(), Err(CalcError::InvalidVolume { .. })));

        let mut settings = DesignSettings::default();
        settings.budget_keur = -1.0;
        assert!(matches!(settings.validate(), Err(CalcError::InvalidField { .. })));

        let mut settings = DesignSettings::default();
        settings.breaker_budget_share = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_partial_json_uses_defaults() {
        let settings: DesignSettings = serde_json::from_str(r#"{"budget_keur": 40}"#).unwrap();
        assert_eq!(settings.budget_keur, 40.0);
        assert_eq!(settings.enclosure_volume_m3, 0.8);
    }
}
