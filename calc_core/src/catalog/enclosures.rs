//! Floor-standing enclosure (carpentry) range

use serde::{Deserialize, Serialize};

/// Enclosure frames offered for the switchboard, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnclosureType {
    /// ArTu M, single column
    #[serde(rename = "ArTu M - 1 column")]
    ArtuMSingleColumn,
    /// ArTu K, single column
    #[serde(rename = "ArTu K - 1 column")]
    ArtuKSingleColumn,
    /// ArTu K, two columns
    #[serde(rename = "ArTu K - 2 columns")]
    ArtuKDoubleColumn,
}

impl EnclosureType {
    pub const ALL: [EnclosureType; 3] = [
        EnclosureType::ArtuMSingleColumn,
        EnclosureType::ArtuKSingleColumn,
        EnclosureType::ArtuKDoubleColumn,
    ];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            EnclosureType::ArtuMSingleColumn => "ArTu M - 1 column",
            EnclosureType::ArtuKSingleColumn => "ArTu K - 1 column",
            EnclosureType::ArtuKDoubleColumn => "ArTu K - 2 columns",
        }
    }

    /// List price of the empty enclosure (€)
    pub fn price_eur(&self) -> f64 {
        match self {
            EnclosureType::ArtuMSingleColumn => 8_000.0,
            EnclosureType::ArtuKSingleColumn => 12_000.0,
            EnclosureType::ArtuKDoubleColumn => 18_000.0,
        }
    }

    /// Feeder count and main current the frame accepts, `None` when unbounded
    pub fn limits(&self) -> Option<(usize, f64)> {
        match self {
            EnclosureType::ArtuMSingleColumn => Some((6, 400.0)),
            EnclosureType::ArtuKSingleColumn => Some((12, 800.0)),
            EnclosureType::ArtuKDoubleColumn => None,
        }
    }
}

impl std::fmt::Display for EnclosureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prices_increase_with_size() {
        let prices: Vec<f64> = EnclosureType::ALL.iter().map(|e| e.price_eur()).collect();
        assert!(prices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_serialized_name_matches_display() {
        for enclosure in EnclosureType::ALL {
            let json = serde_json::to_string(&enclosure).unwrap();
            assert_eq!(json, format!("\"{}\"", enclosure.display_name()));
        }
    }
}
