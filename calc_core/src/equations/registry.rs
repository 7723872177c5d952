//! # Equation Registry
//!
//! Central registry of every formula the switchboard design uses.
//! Each equation has metadata including its reference, plain-text formula,
//! variable definitions and assumptions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for report appendices and audit trails
//! - An `EquationTracker` that records which formulas a design applied
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record_for_circuit(Equation::LineCurrent, "Branch current", "CNC Center 1");
//!
//! let meta = Equation::ShortCircuitCurrent.metadata();
//! assert!(meta.formula_plain.contains("Zcc"));
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to the standard or practice an equation comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// CEI EN 61439 - Low-voltage switchgear and controlgear assemblies
    Iec61439 { part: u8, clause: &'static str },
    /// CEI 17-43 - Temperature-rise verification by calculation
    Cei17_43,
    /// IEC 60909 - Short-circuit currents in three-phase systems
    Iec60909 { simplified: bool },
    /// Established design practice (no formal clause)
    DesignPractice,
    /// Fundamental circuit theory
    CircuitTheory,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Iec61439 { part, clause } => {
                format!("CEI EN 61439-{} Clause {}", part, clause)
            }
            CodeReference::Cei17_43 => "CEI 17-43".to_string(),
            CodeReference::Iec60909 { simplified: true } => "IEC 60909 (simplified)".to_string(),
            CodeReference::Iec60909 { simplified: false } => "IEC 60909".to_string(),
            CodeReference::DesignPractice => "Design practice".to_string(),
            CodeReference::CircuitTheory => "Circuit theory".to_string(),
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Load currents
    Currents,
    /// Installed power, simultaneity and design power
    PowerBalance,
    /// Transformer choice and fault level
    ShortCircuit,
    /// Breaker and busbar selection
    ProtectionSelection,
    /// Enclosure temperature-rise verification
    ThermalVerification,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Currents => "Currents",
            EquationCategory::PowerBalance => "Power Balance",
            EquationCategory::ShortCircuit => "Short Circuit",
            EquationCategory::ProtectionSelection => "Protection Selection",
            EquationCategory::ThermalVerification => "Thermal Verification",
        }
    }

    /// Sort order in generated documents (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Currents => 1,
            EquationCategory::PowerBalance => 2,
            EquationCategory::ShortCircuit => 3,
            EquationCategory::ProtectionSelection => 4,
            EquationCategory::ThermalVerification => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "P", "cosφ")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "kW", "A")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a sizing equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Standard/practice reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used in a switchboard design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// I = P × 1000 / (V × √3 × cosφ)
    LineCurrent,
    /// I_main = P_d × 1000 / (V × √3 × 0.85)
    MainIncomerCurrent,
    /// P_inst = Σ P
    InstalledPower,
    /// P_eq = P × h / 24
    IntermittentEquivalentPower,
    /// Ks = min(0.9, (P_cont + 0.7 P_eq) / P_inst)
    SimultaneityFactor,
    /// P_d = P_inst × Ks × 1.15
    DesignPower,
    /// Smallest standard kVA >= P_d
    TransformerSelection,
    /// Icc = S / (√3 × V × Zcc)
    ShortCircuitCurrent,
    /// In >= 1.25 I and Icu >= Icc, minimum price
    BreakerSelection,
    /// I_bus = floor(P_d × 1.8)
    BusbarRating,
    /// P_diss = n × 15 + 80
    SwitchboardDissipation,
    /// P_max = Vol × 400 × k_IP
    MaxDissipablePower,
    /// margin = (P_max - P_diss) / P_max × 100
    ThermalMargin,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::LineCurrent => EquationMetadata {
                name: "Three-Phase Line Current",
                description: "Current drawn by a balanced three-phase load",
                formula_plain: "I = P * 1000 / (V * sqrt3 * cosφ)",
                reference: CodeReference::CircuitTheory,
                variables: vec![
                    Variable::new("P", "Active power", "kW"),
                    Variable::new("V", "Line-to-line voltage (400)", "V"),
                    Variable::new("cosφ", "Power factor", "-"),
                    Variable::new("I", "Line current", "A"),
                ],
                assumptions: vec!["Balanced load", "sqrt3 taken as 1.732"],
                category: EquationCategory::Currents,
                source_module: "equations/electrical.rs",
                source_function: "three_phase_current",
            },

            Equation::MainIncomerCurrent => EquationMetadata {
                name: "Main Incomer Current",
                description: "Design current of the main incoming breaker",
                formula_plain: "I_main = P_d * 1000 / (V * sqrt3 * 0.85)",
                reference: CodeReference::DesignPractice,
                variables: vec![
                    Variable::new("P_d", "Design power", "kW"),
                    Variable::new("I_main", "Main incomer current", "A"),
                ],
                assumptions: vec!["Aggregate power factor configurable, default 0.85"],
                category: EquationCategory::Currents,
                source_module: "calculations/switchboard.rs",
                source_function: "main_incomer_current",
            },

            Equation::InstalledPower => EquationMetadata {
                name: "Installed Power",
                description: "Sum of the rated power of every load",
                formula_plain: "P_inst = sum(P_i)",
                reference: CodeReference::Iec61439 { part: 1, clause: "5.3" },
                variables: vec![
                    Variable::new("P_i", "Rated power of load i", "kW"),
                    Variable::new("P_inst", "Installed power", "kW"),
                ],
                assumptions: vec![],
                category: EquationCategory::PowerBalance,
                source_module: "calculations/sizing.rs",
                source_function: "compute_sizing",
            },

            Equation::IntermittentEquivalentPower => EquationMetadata {
                name: "Intermittent Equivalent Power",
                description: "Continuous-duty equivalent of an intermittent load",
                formula_plain: "P_eq = P * h / 24",
                reference: CodeReference::DesignPractice,
                variables: vec![
                    Variable::new("P", "Rated power", "kW"),
                    Variable::new("h", "Operating hours per day", "h"),
                ],
                assumptions: vec!["Duty spread uniformly over the day"],
                category: EquationCategory::PowerBalance,
                source_module: "equations/electrical.rs",
                source_function: "intermittent_equivalent_power",
            },

            Equation::SimultaneityFactor => EquationMetadata {
                name: "Simultaneity Factor",
                description: "Fraction of installed power drawn concurrently",
                formula_plain: "Ks = min(0.9, (P_cont + 0.7 * P_eq) / P_inst)",
                reference: CodeReference::Iec61439 { part: 2, clause: "Annex BB" },
                variables: vec![
                    Variable::new("P_cont", "Continuous-duty power", "kW"),
                    Variable::new("P_eq", "Intermittent equivalent power", "kW"),
                    Variable::new("Ks", "Simultaneity factor", "-"),
                ],
                assumptions: vec![
                    "Intermittent loads overlap at 70 %",
                    "Demand never exceeds 90 % of installed power",
                ],
                category: EquationCategory::PowerBalance,
                source_module: "equations/electrical.rs",
                source_function: "simultaneity_factor",
            },

            Equation::DesignPower => EquationMetadata {
                name: "Design Power",
                description: "Power used to size upstream equipment, with reserve",
                formula_plain: "P_d = P_inst * Ks * 1.15",
                reference: CodeReference::DesignPractice,
                variables: vec![
                    Variable::new("P_inst", "Installed power", "kW"),
                    Variable::new("Ks", "Simultaneity factor", "-"),
                    Variable::new("P_d", "Design power", "kW"),
                ],
                assumptions: vec!["15 % safety reserve"],
                category: EquationCategory::PowerBalance,
                source_module: "equations/electrical.rs",
                source_function: "design_power",
            },

            Equation::TransformerSelection => EquationMetadata {
                name: "Transformer Selection",
                description: "Smallest standard rating covering the design power",
                formula_plain: "S = min { S_std : S_std >= P_d }",
                reference: CodeReference::DesignPractice,
                variables: vec![
                    Variable::new("S_std", "Standard transformer rating", "kVA"),
                    Variable::new("P_d", "Design power", "kW"),
                ],
                assumptions: vec!["kW compared directly with kVA"],
                category: EquationCategory::ShortCircuit,
                source_module: "calculations/fault.rs",
                source_function: "select_transformer",
            },

            Equation::ShortCircuitCurrent => EquationMetadata {
                name: "Prospective Short-Circuit Current",
                description: "Three-phase fault current at the transformer secondary",
                formula_plain: "Icc = (S/1000 * 1000) / (sqrt3 * V * Zcc)",
                reference: CodeReference::Iec60909 { simplified: true },
                variables: vec![
                    Variable::new("S", "Transformer rating", "kVA"),
                    Variable::new("V", "Secondary voltage", "V"),
                    Variable::new("Zcc", "Short-circuit impedance (0.06)", "p.u."),
                    Variable::new("Icc", "Short-circuit current", "kA"),
                ],
                assumptions: vec!["Infinite upstream network", "Cable impedance neglected"],
                category: EquationCategory::ShortCircuit,
                source_module: "equations/electrical.rs",
                source_function: "short_circuit_current",
            },

            Equation::BreakerSelection => EquationMetadata {
                name: "Breaker Selection",
                description: "Cheapest catalog breaker meeting current and breaking capacity",
                formula_plain: "In >= 1.25 * I and Icu >= Icc, minimise price",
                reference: CodeReference::Iec61439 { part: 1, clause: "10.11" },
                variables: vec![
                    Variable::new("In", "Breaker rated current", "A"),
                    Variable::new("Icu", "Breaking capacity", "kA"),
                    Variable::new("I", "Required current", "A"),
                ],
                assumptions: vec!["Equal prices resolved by lower rated current, then catalog order"],
                category: EquationCategory::ProtectionSelection,
                source_module: "calculations/selection.rs",
                source_function: "select_breaker",
            },

            Equation::BusbarRating => EquationMetadata {
                name: "Busbar Rating",
                description: "Rating of the main perforated flat busbar system",
                formula_plain: "I_bus = floor(P_d * 1.8)",
                reference: CodeReference::DesignPractice,
                variables: vec![
                    Variable::new("P_d", "Design power", "kW"),
                    Variable::new("I_bus", "Busbar rating", "A"),
                ],
                assumptions: vec![],
                category: EquationCategory::ProtectionSelection,
                source_module: "equations/electrical.rs",
                source_function: "busbar_rating",
            },

            Equation::SwitchboardDissipation => EquationMetadata {
                name: "Switchboard Dissipation",
                description: "Estimated internal losses from the number of feeders",
                formula_plain: "P_diss = n * 15 + 80",
                reference: CodeReference::Cei17_43,
                variables: vec![
                    Variable::new("n", "Number of loads", "-"),
                    Variable::new("P_diss", "Dissipated power", "W"),
                ],
                assumptions: vec!["15 W per feeder, 80 W fixed losses"],
                category: EquationCategory::ThermalVerification,
                source_module: "equations/electrical.rs",
                source_function: "estimated_dissipation",
            },

            Equation::MaxDissipablePower => EquationMetadata {
                name: "Maximum Dissipable Power",
                description: "Heat the enclosure can shed at its protection grade",
                formula_plain: "P_max = Vol * 400 * k_IP",
                reference: CodeReference::Cei17_43,
                variables: vec![
                    Variable::new("Vol", "Enclosure volume", "m³"),
                    Variable::new("k_IP", "Protection-grade coefficient", "-"),
                    Variable::new("P_max", "Maximum dissipable power", "W"),
                ],
                assumptions: vec!["400 W/m³ baseline density", "k_IP: IP31 1.0, IP43 0.9, IP65 0.75, other 0.8"],
                category: EquationCategory::ThermalVerification,
                source_module: "equations/electrical.rs",
                source_function: "max_dissipable_power",
            },

            Equation::ThermalMargin => EquationMetadata {
                name: "Thermal Margin",
                description: "Remaining dissipation headroom as a percentage",
                formula_plain: "margin = (P_max - P_diss) / P_max * 100",
                reference: CodeReference::Cei17_43,
                variables: vec![
                    Variable::new("P_max", "Maximum dissipable power", "W"),
                    Variable::new("P_diss", "Dissipated power", "W"),
                ],
                assumptions: vec!["OK above 20 %, CRITICAL above 0 %, otherwise NOT OK"],
                category: EquationCategory::ThermalVerification,
                source_module: "equations/electrical.rs",
                source_function: "thermal_margin_pct",
            },
        }
    }

    /// All categories that contain at least one equation, sorted
    pub fn all_categories() -> Vec<EquationCategory> {
        let mut cats = vec![
            EquationCategory::Currents,
            EquationCategory::PowerBalance,
            EquationCategory::ShortCircuit,
            EquationCategory::ProtectionSelection,
            EquationCategory::ThermalVerification,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }

    /// Equations belonging to one category, in registry order
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .copied()
            .filter(|eq| eq.metadata().category == category)
            .collect()
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::LineCurrent,
    Equation::MainIncomerCurrent,
    Equation::InstalledPower,
    Equation::IntermittentEquivalentPower,
    Equation::SimultaneityFactor,
    Equation::DesignPower,
    Equation::TransformerSelection,
    Equation::ShortCircuitCurrent,
    Equation::BreakerSelection,
    Equation::BusbarRating,
    Equation::SwitchboardDissipation,
    Equation::MaxDissipablePower,
    Equation::ThermalMargin,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being applied during a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Context describing where/why it was used
    pub context: String,
    /// Optional: the circuit (load name or "Main incomer") it was applied to
    pub circuit: Option<String>,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            circuit: None,
        }
    }

    /// Create usage record for a specific circuit
    pub fn for_circuit(equation: Equation, context: impl Into<String>, circuit: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            circuit: Some(circuit.into()),
        }
    }
}

/// Collector for equation usage during a design run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Record equation usage for a specific circuit
    pub fn record_for_circuit(&mut self, equation: Equation, context: impl Into<String>, circuit: impl Into<String>) {
        self.usages.push(EquationUsage::for_circuit(equation, context, circuit));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Circuits each equation was applied to (deduplicated, sorted)
    pub fn circuits_for(&self, equation: Equation) -> Vec<&str> {
        let mut circuits: Vec<&str> = self
            .usages
            .iter()
            .filter(|u| u.equation == equation)
            .filter_map(|u| u.circuit.as_deref())
            .collect();
        circuits.sort();
        circuits.dedup();
        circuits
    }

    /// Group unique equations by category
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md file for documentation.
///
/// # Example
///
/// ```rust
/// use calc_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Quadra Equations Reference"));
/// assert!(markdown.contains("Power Balance"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(12_000);

    output.push_str(r#"# Quadra Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used to size a Quadra low-voltage switchboard.
The formulas are simplified engineering heuristics, not a certified calculation suite.

## Constants

| Quantity | Value |
|----------|-------|
| Line voltage | 400 V |
| sqrt3 | 1.732 |
| Transformer Zcc | 6 % |
| Breaker derating | 1.25 |
| Design reserve | 1.15 |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================
