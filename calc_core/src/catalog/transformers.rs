//! Standard MV/LV distribution transformers

use serde::{Deserialize, Serialize};

use crate::equations::{LINE_VOLTAGE_V, SQRT_3};
use crate::equations::electrical::TRANSFORMER_ZCC;

/// Standard transformer ratings (kVA), ascending
pub static STANDARD_TRANSFORMER_SIZES_KVA: &[f64] = &[
    160.0, 250.0, 315.0, 400.0, 500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0,
];

/// Nameplate data of the supply transformer, as listed in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerSpec {
    /// Rated apparent power (kVA)
    pub rating_kva: f64,
    /// Primary (MV) voltage (V)
    pub primary_voltage_v: f64,
    /// Secondary (LV) voltage (V)
    pub secondary_voltage_v: f64,
    /// Network frequency (Hz)
    pub frequency_hz: f64,
    /// Vector group
    pub vector_group: String,
    /// Short-circuit impedance (%)
    pub short_circuit_impedance_pct: f64,
}

impl TransformerSpec {
    /// Standard 20 kV / 400 V Dyn11 unit of the given rating
    pub fn standard(rating_kva: f64) -> Self {
        TransformerSpec {
            rating_kva,
            primary_voltage_v: 20_000.0,
            secondary_voltage_v: LINE_VOLTAGE_V,
            frequency_hz: 50.0,
            vector_group: "Dyn11".to_string(),
            short_circuit_impedance_pct: TRANSFORMER_ZCC * 100.0,
        }
    }

    /// Rated secondary current (A)
    pub fn secondary_current_a(&self) -> f64 {
        self.rating_kva * 1000.0 / (SQRT_3 * self.secondary_voltage_v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_ascending() {
        assert!(STANDARD_TRANSFORMER_SIZES_KVA.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(STANDARD_TRANSFORMER_SIZES_KVA.len(), 12);
    }

    #[test]
    fn test_standard_spec() {
        let spec = TransformerSpec::standard(630.0);
        assert_eq!(spec.vector_group, "Dyn11");
        assert!((spec.short_circuit_impedance_pct - 6.0).abs() < 1e-12);
        // 630000 / (1.732 × 400) = 909.35 A
        assert!((spec.secondary_current_a() - 909.35).abs() < 0.01);
    }
}
