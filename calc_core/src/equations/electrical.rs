//! # Low-Voltage Distribution Formulas
//!
//! Fundamental equations for sizing a three-phase low-voltage switchboard.
//! These are simplified engineering heuristics, not a certified short-circuit
//! or thermal calculation suite.
//!
//! ## Notation
//!
//! - `P` = Active power (kW)
//! - `S` = Apparent power (kVA)
//! - `V` = Line-to-line voltage (V)
//! - `cosφ` = Power factor
//! - `I` = Line current (A)
//! - `Icc` = Prospective short-circuit current (kA)
//! - `Zcc` = Transformer short-circuit impedance (per unit)
//! - `Ks` = Simultaneity factor
//!
//! ## References
//!
//! - CEI EN 61439-1/-2: Low-voltage switchgear and controlgear assemblies
//! - CEI 17-43: Temperature-rise verification of assemblies
//! - IEC 60909 (simplified, infinite upstream network)

// =============================================================================
// CONSTANTS
// =============================================================================

/// Line-to-line voltage of the distribution system (V)
pub const LINE_VOLTAGE_V: f64 = 400.0;

/// √3 as used throughout the heuristics
pub const SQRT_3: f64 = 1.732;

/// Transformer short-circuit impedance Zcc (6 %)
pub const TRANSFORMER_ZCC: f64 = 0.06;

/// Weight applied to intermittent equivalent power (partial overlap)
pub const INTERMITTENT_OVERLAP_WEIGHT: f64 = 0.7;

/// Upper bound of the simultaneity factor
pub const MAX_SIMULTANEITY_FACTOR: f64 = 0.9;

/// Safety reserve applied on top of the simultaneous demand (+15 %)
pub const DESIGN_RESERVE: f64 = 1.15;

/// Margin applied to a required current before matching a breaker rating
pub const BREAKER_DERATING: f64 = 1.25;

/// Baseline dissipation density of an enclosure (W/m³)
pub const DISSIPATION_DENSITY_W_PER_M3: f64 = 400.0;

/// Busbar rating multiplier (A per kW of design power)
pub const BUSBAR_AMPS_PER_KW: f64 = 1.8;

/// Hours in a day, used to scale intermittent duty
pub const HOURS_PER_DAY: f64 = 24.0;

// =============================================================================
// CURRENT
// =============================================================================

/// Line current drawn by a balanced three-phase load.
///
/// # Formula
/// - I = P × 1000 / (V × √3 × cosφ)
///
/// # Arguments
/// * `power_kw` - Active power (kW)
/// * `power_factor` - cosφ in (0, 1]
/// * `voltage_v` - Line-to-line voltage (V)
///
/// # Example
/// ```
/// use calc_core::equations::three_phase_current;
///
/// // 45 kW at cosφ 0.85 on 400 V draws about 76 A
/// let i = three_phase_current(45.0, 0.85, 400.0);
/// assert!((i - 76.42).abs() < 0.01);
/// ```
#[inline]
pub fn three_phase_current(power_kw: f64, power_factor: f64, voltage_v: f64) -> f64 {
    power_kw * 1000.0 / (voltage_v * SQRT_3 * power_factor)
}

// =============================================================================
// POWER BALANCE
// =============================================================================

/// Equivalent continuous power of an intermittent load.
///
/// # Formula
/// - P_eq = P × h / 24
#[inline]
pub fn intermittent_equivalent_power(power_kw: f64, hours_per_day: f64) -> f64 {
    power_kw * (hours_per_day / HOURS_PER_DAY)
}

/// Simultaneity factor from the continuous/intermittent split.
///
/// # Formula
/// - Ks = min(0.9, (P_cont + 0.7 × P_int,eq) / P_inst)
///
/// The caller guarantees `installed_kw > 0`.
#[inline]
pub fn simultaneity_factor(continuous_kw: f64, intermittent_equivalent_kw: f64, installed_kw: f64) -> f64 {
    let demand = continuous_kw + INTERMITTENT_OVERLAP_WEIGHT * intermittent_equivalent_kw;
    (demand / installed_kw).min(MAX_SIMULTANEITY_FACTOR)
}

/// Design power including the safety reserve.
///
/// # Formula
/// - P_d = P_inst × Ks × 1.15
#[inline]
pub fn design_power(installed_kw: f64, simultaneity: f64) -> f64 {
    installed_kw * simultaneity * DESIGN_RESERVE
}

// =============================================================================
// SHORT CIRCUIT
// =============================================================================

/// Prospective short-circuit current at the transformer secondary.
///
/// # Formula
/// - S_MVA = S_kVA / 1000
/// - Icc = (S_MVA × 1000) / (√3 × V × Zcc)   \[kA\]
///
/// Linear in `transformer_kva`.
///
/// # Example
/// ```
/// use calc_core::equations::short_circuit_current;
///
/// let icc = short_circuit_current(1000.0, 400.0);
/// assert!((icc - 24.057).abs() < 0.001);
/// ```
#[inline]
pub fn short_circuit_current(transformer_kva: f64, voltage_v: f64) -> f64 {
    let apparent_mva = transformer_kva / 1000.0;
    (apparent_mva * 1000.0) / (SQRT_3 * voltage_v * TRANSFORMER_ZCC)
}

// =============================================================================
// THERMAL
// =============================================================================

/// Maximum power an enclosure can dissipate.
///
/// # Formula
/// - P_max = Vol × 400 × k_IP
#[inline]
pub fn max_dissipable_power(volume_m3: f64, coefficient: f64) -> f64 {
    volume_m3 * DISSIPATION_DENSITY_W_PER_M3 * coefficient
}

/// Thermal margin as a percentage of the dissipable power.
///
/// # Formula
/// - margin = (P_max - P_diss) / P_max × 100
///
/// The caller guarantees `max_dissipable_w > 0`.
#[inline]
pub fn thermal_margin_pct(max_dissipable_w: f64, dissipated_w: f64) -> f64 {
    (max_dissipable_w - dissipated_w) / max_dissipable_w * 100.0
}

/// Rough internal dissipation of a switchboard from its feeder count.
///
/// # Formula
/// - P_diss = n × p_feeder + p_base
#[inline]
pub fn estimated_dissipation(load_count: usize, per_load_w: f64, base_w: f64) -> f64 {
    load_count as f64 * per_load_w + base_w
}

/// Busbar rating from the design power.
///
/// # Formula
/// - I_bus = floor(P_d × 1.8)
#[inline]
pub fn busbar_rating(design_power_kw: f64) -> f64 {
    (design_power_kw * BUSBAR_AMPS_PER_KW).floor()
}
