//! # Design Report Data
//!
//! Assembles everything a technical report on the switchboard needs into one
//! serializable structure. Layout and rendering (PDF, HTML, terminal) are up
//! to the consumer; this module only decides *what* is reported.
//!
//! ## Sections
//!
//! 1. General information (project, sector, environment, IP grade, date)
//! 2. Power balance and supply transformer
//! 3. Verifications (thermal, short circuit) and calculation basis
//! 4. Switchboard features (enclosure, busbar, main breaker)
//! 5. Numbered load table with totals
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::design_switchboard;
//! use calc_core::catalog::BreakerCatalog;
//! use calc_core::loads::LoadTemplate;
//! use calc_core::project::{Environment, Project, Sector};
//! use calc_core::report::DesignReport;
//!
//! let mut project = Project::new("Dairy", Sector::Food, Environment::IndoorHumid);
//! project.load_template(LoadTemplate::Dairy).unwrap();
//! let design = design_switchboard(&project, BreakerCatalog::standard()).unwrap();
//!
//! let report = DesignReport::build(&project, &design);
//! assert_eq!(report.loads.rows.len(), 4);
//! assert_eq!(report.loads.rows[0].position, "01");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{SwitchboardDesign, ThermalVerdict};
use crate::catalog::TransformerSpec;
use crate::equations::EquationCategory;
use crate::errors::CalcResult;
use crate::loads::{Priority, Regime};
use crate::project::{Environment, Project, ProtectionGrade, Sector};

/// Standards listed as the verification basis
pub const REFERENCE_STANDARDS: &[&str] = &[
    "CEI EN 61439-1: Low-voltage switchgear and controlgear assemblies, general rules",
    "CEI EN 61439-2: Power switchgear and controlgear assemblies",
    "CEI 17-43: Temperature-rise verification of assemblies",
];

/// Full report payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    /// Unique id of this report
    pub report_id: Uuid,

    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    pub general: GeneralInfo,
    pub power_balance: PowerBalance,
    pub transformer: TransformerSpec,
    pub verifications: Vec<VerificationRow>,
    pub standards: Vec<String>,

    /// Formulas used, grouped by category
    pub calculation_basis: Vec<BasisSection>,

    pub features: SwitchboardFeatures,
    pub loads: LoadTable,
}

/// Section 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralInfo {
    pub project_name: String,
    pub sector: Sector,
    pub environment: Environment,
    pub protection_grade: ProtectionGrade,
    /// Date in dd/mm/yyyy form
    pub date: String,
}

/// Section 2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerBalance {
    pub installed_power_kw: f64,
    pub simultaneity_factor: f64,
    pub design_power_kw: f64,
    pub main_current_a: f64,
    pub fault_current_ka: f64,
}

/// Outcome of one verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationOutcome {
    Compliant,
    Critical,
    NonCompliant,
}

impl From<ThermalVerdict> for VerificationOutcome {
    fn from(verdict: ThermalVerdict) -> Self {
        match verdict {
            ThermalVerdict::Ok => VerificationOutcome::Compliant,
            ThermalVerdict::Critical => VerificationOutcome::Critical,
            ThermalVerdict::NotOk => VerificationOutcome::NonCompliant,
        }
    }
}

/// One row of the verification table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRow {
    pub check: String,
    pub outcome: VerificationOutcome,
    pub note: String,
}

/// Formulas of one category used by the design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisSection {
    pub category: EquationCategory,
    /// (name, plain-text formula, citation)
    pub equations: Vec<(String, String, String)>,
}

/// Section 4
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchboardFeatures {
    pub enclosure: String,
    pub enclosure_price_eur: f64,
    pub feeders: usize,
    pub protection_grade: ProtectionGrade,
    pub busbar_rating_a: f64,
    /// Label of the main breaker, `None` when unresolved
    pub main_breaker: Option<String>,
    pub breaker_cost_eur: f64,
    /// Circuits left without a breaker
    pub unresolved_circuits: Vec<String>,
}

/// One load in the report table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRow {
    /// Zero-padded position, "01", "02"...
    pub position: String,
    pub name: String,
    pub power_kw: f64,
    /// Current rounded to 0.1 A
    pub current_a: f64,
    pub power_factor: f64,
    pub regime: Regime,
    pub priority: Priority,
    /// Selected branch breaker, `None` when unresolved
    pub breaker: Option<String>,
}

/// Section 5
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTable {
    pub rows: Vec<LoadRow>,
    pub total_power_kw: f64,
    /// Sum of unrounded currents
    pub total_current_a: f64,
}

impl DesignReport {
    /// Assemble the report for a project and its computed design.
    pub fn build(project: &Project, design: &SwitchboardDesign) -> Self {
        let meta = &project.meta;
        let generated_at = Utc::now();

        let general = GeneralInfo {
            project_name: meta.name.clone(),
            sector: meta.sector,
            environment: meta.environment,
            protection_grade: meta.protection_grade,
            date: generated_at.format("%d/%m/%Y").to_string(),
        };

        let power_balance = PowerBalance {
            installed_power_kw: design.sizing.installed_power_kw,
            simultaneity_factor: design.sizing.simultaneity_factor,
            design_power_kw: design.sizing.design_power_kw,
            main_current_a: design.main_current_a,
            fault_current_ka: design.fault_current_ka,
        };

        let short_circuit_outcome = if design.breakers.is_complete() {
            VerificationOutcome::Compliant
        } else {
            VerificationOutcome::NonCompliant
        };
        let verifications = vec![
            VerificationRow {
                check: "Thermal verification".to_string(),
                outcome: design.thermal.verdict.into(),
                note: format!("Margin {:.0}%", design.thermal.margin_pct),
            },
            VerificationRow {
                check: "Short-circuit verification".to_string(),
                outcome: short_circuit_outcome,
                note: format!("Icc = {:.1} kA", design.fault_current_ka),
            },
        ];

        let calculation_basis = design
            .equations
            .by_category()
            .into_iter()
            .map(|(category, equations)| BasisSection {
                category,
                equations: equations
                    .into_iter()
                    .map(|eq| {
                        let info = eq.metadata();
                        (info.name.to_string(), info.formula_plain.to_string(), info.reference.citation())
                    })
                    .collect(),
            })
            .collect();

        let features = SwitchboardFeatures {
            enclosure: design.enclosure.enclosure.display_name().to_string(),
            enclosure_price_eur: design.enclosure.price_eur,
            feeders: design.enclosure.feeders,
            protection_grade: meta.protection_grade,
            busbar_rating_a: design.busbar_rating_a,
            main_breaker: design.breakers.main.as_ref().map(|a| a.breaker.label()),
            breaker_cost_eur: design.breakers.total_cost_eur,
            unresolved_circuits: design.breakers.unresolved.iter().map(|u| u.circuit.clone()).collect(),
        };

        let rows = project
            .loads()
            .iter()
            .enumerate()
            .map(|(i, load)| LoadRow {
                position: format!("{:02}", i + 1),
                name: load.name.clone(),
                power_kw: load.power_kw,
                current_a: (load.current_a() * 10.0).round() / 10.0,
                power_factor: load.power_factor,
                regime: load.regime,
                priority: load.priority,
                breaker: design
                    .breakers
                    .branches
                    .iter()
                    .find(|a| a.circuit == load.name)
                    .map(|a| a.breaker.label()),
            })
            .collect();

        let loads = LoadTable {
            rows,
            total_power_kw: project.loads().total_power_kw(),
            total_current_a: project.loads().total_current_a(),
        };

        DesignReport {
            report_id: Uuid::new_v4(),
            generated_at,
            general,
            power_balance,
            transformer: design.transformer.clone(),
            verifications,
            standards: REFERENCE_STANDARDS.iter().map(|s| s.to_string()).collect(),
            calculation_basis,
            features,
            loads,
        }
    }

    /// Serialize the report to pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
