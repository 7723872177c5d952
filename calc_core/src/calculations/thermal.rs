//! # Thermal Verification
//!
//! Simplified temperature-rise check of the enclosure (CEI 17-43 style):
//! the power the switchboard dissipates is compared with what the enclosure
//! can shed, which depends on its volume and ingress-protection grade.
//!
//! ## Verdict
//!
//! | Margin          | Verdict    |
//! |-----------------|------------|
//! | > 20 %          | `OK`       |
//! | 0 % < m ≤ 20 %  | `CRITICAL` |
//! | ≤ 0 %           | `NOT_OK`   |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::thermal::{verify_thermal, ThermalVerdict};
//! use calc_core::project::ProtectionGrade;
//!
//! let result = verify_thermal(155.0, 0.8, ProtectionGrade::IP31).unwrap();
//! assert_eq!(result.max_dissipable_w, 320.0);
//! assert_eq!(result.verdict, ThermalVerdict::Ok);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{max_dissipable_power, thermal_margin_pct};
use crate::errors::{CalcError, CalcResult};
use crate::project::ProtectionGrade;

/// Coefficient applied to grades without a tabulated value
pub const DEFAULT_DISSIPATION_COEFFICIENT: f64 = 0.8;

/// Heat-shedding coefficient of an enclosure with the given grade.
///
/// IP31 1.0, IP43 0.9, IP65 0.75; anything else 0.8.
pub fn dissipation_coefficient(grade: ProtectionGrade) -> f64 {
    match grade {
        ProtectionGrade::IP31 => 1.0,
        ProtectionGrade::IP43 => 0.9,
        ProtectionGrade::IP65 => 0.75,
        _ => DEFAULT_DISSIPATION_COEFFICIENT,
    }
}

/// Outcome of the thermal check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThermalVerdict {
    /// Margin above 20 %
    Ok,
    /// Margin in (0, 20] %
    Critical,
    /// No margin left
    NotOk,
}

impl ThermalVerdict {
    /// Classify a margin percentage; both boundaries are exclusive from above.
    pub fn from_margin(margin_pct: f64) -> Self {
        if margin_pct > 20.0 {
            ThermalVerdict::Ok
        } else if margin_pct > 0.0 {
            ThermalVerdict::Critical
        } else {
            ThermalVerdict::NotOk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThermalVerdict::Ok => "OK",
            ThermalVerdict::Critical => "CRITICAL",
            ThermalVerdict::NotOk => "NOT_OK",
        }
    }

    /// Whether the enclosure passes
    pub fn passes(&self) -> bool {
        !matches!(self, ThermalVerdict::NotOk)
    }
}

impl std::fmt::Display for ThermalVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of [`verify_thermal`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "dissipated_w": 155.0,
///   "max_dissipable_w": 320.0,
///   "margin_pct": 51.5625,
///   "verdict": "OK"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalResult {
    /// Power dissipated inside the enclosure (W)
    pub dissipated_w: f64,

    /// Power the enclosure can shed (W)
    pub max_dissipable_w: f64,

    /// (max - dissipated) / max × 100
    pub margin_pct: f64,

    pub verdict: ThermalVerdict,
}

/// Check dissipated power against enclosure capacity.
///
/// Fails with [`CalcError::InvalidVolume`] for a zero, negative or non-finite
/// volume, and with [`CalcError::InvalidField`] for a negative dissipation.
pub fn verify_thermal(
    dissipated_power_w: f64,
    enclosure_volume_m3: f64,
    protection_grade: ProtectionGrade,
) -> CalcResult<ThermalResult> {
    if !enclosure_volume_m3.is_finite() || enclosure_volume_m3 <= 0.0 {
        return Err(CalcError::InvalidVolume {
            volume_m3: enclosure_volume_m3,
        });
    }
    if !dissipated_power_w.is_finite() || dissipated_power_w < 0.0 {
        return Err(CalcError::invalid_field(
            "dissipated_power_w",
            dissipated_power_w.to_string(),
            "Dissipated power must be a non-negative number",
        ));
    }

    let max_dissipable_w = max_dissipable_power(enclosure_volume_m3, dissipation_coefficient(protection_grade));
    let margin_pct = thermal_margin_pct(max_dissipable_w, dissipated_power_w);
    let verdict = ThermalVerdict::from_margin(margin_pct);

    tracing::debug!(
        dissipated_w = dissipated_power_w,
        max_w = max_dissipable_w,
        margin_pct,
        %verdict,
        "thermal check"
    );

    Ok(ThermalResult {
        dissipated_w: dissipated_power_w,
        max_dissipable_w,
        margin_pct,
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients() {
        assert_eq!(dissipation_coefficient(ProtectionGrade::IP31), 1.0);
        assert_eq!(dissipation_coefficient(ProtectionGrade::IP43), 0.9);
        assert_eq!(dissipation_coefficient(ProtectionGrade::IP65), 0.75);
        assert_eq!(dissipation_coefficient(ProtectionGrade::IP66), 0.8);
    }

    #[test]
    fn test_verdict_boundaries() {
        assert_eq!(ThermalVerdict::from_margin(20.0001), ThermalVerdict::Ok);
        assert_eq!(ThermalVerdict::from_margin(20.0), ThermalVerdict::Critical);
        assert_eq!(ThermalVerdict::from_margin(0.0001), ThermalVerdict::Critical);
        assert_eq!(ThermalVerdict::from_margin(0.0), ThermalVerdict::NotOk);
        assert_eq!(ThermalVerdict::from_margin(-35.0), ThermalVerdict::NotOk);
    }

    #[test]
    fn test_exact_boundaries_through_verify() {
        // 1 m³ IP31 sheds 400 W: 320 W leaves exactly 20 %
        let r = verify_thermal(320.0, 1.0, ProtectionGrade::IP31).unwrap();
        assert!((r.margin_pct - 20.0).abs() < 1e-12);
        assert_eq!(r.verdict, ThermalVerdict::Critical);

        let r = verify_thermal(400.0, 1.0, ProtectionGrade::IP31).unwrap();
        assert_eq!(r.margin_pct, 0.0);
        assert_eq!(r.verdict, ThermalVerdict::NotOk);
        assert!(!r.verdict.passes());
    }

    #[test]
    fn test_workshop_figures() {
        let r = verify_thermal(155.0, 0.8, ProtectionGrade::IP31).unwrap();
        assert!((r.margin_pct - 51.5625).abs() < 1e-9);
        assert_eq!(r.verdict, ThermalVerdict::Ok);

        let r = verify_thermal(140.0, 0.8, ProtectionGrade::IP43).unwrap();
        assert!((r.max_dissipable_w - 288.0).abs() < 1e-9);
        assert_eq!(r.verdict, ThermalVerdict::Ok);
    }

    #[test]
    fn test_invalid_volume() {
        for volume in [0.0, -0.5, f64::NAN] {
            assert!(matches!(
                verify_thermal(100.0, volume, ProtectionGrade::IP31),
                Err(CalcError::InvalidVolume { .. })
            ));
        }
    }

    #[test]
    fn test_verdict_serializes_as_label() {
        for verdict in [ThermalVerdict::Ok, ThermalVerdict::Critical, ThermalVerdict::NotOk] {
            let json = serde_json::to_string(&verdict).unwrap();
            assert_eq!(json, format!("\"{}\"", verdict.label()));
        }
    }
}
