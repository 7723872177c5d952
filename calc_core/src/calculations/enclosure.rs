//! # Enclosure Selection
//!
//! Chooses the enclosure frame from the number of feeders (outgoing
//! branches plus the incomer) and the main incomer current. The frames are
//! tried smallest first; both limits are inclusive.

use serde::{Deserialize, Serialize};

use crate::catalog::EnclosureType;

/// Selected enclosure with the figures that drove the choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnclosureSelection {
    pub enclosure: EnclosureType,
    pub feeders: usize,
    pub main_current_a: f64,
    pub price_eur: f64,
}

/// Feeder count of a switchboard with `load_count` outgoing branches
pub fn feeder_count(load_count: usize) -> usize {
    load_count + 1
}

/// Pick the smallest frame whose limits cover `feeders` and `main_current_a`.
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::enclosure::select_enclosure;
/// use calc_core::catalog::EnclosureType;
///
/// assert_eq!(select_enclosure(6, 400.0).enclosure, EnclosureType::ArtuMSingleColumn);
/// assert_eq!(select_enclosure(6, 400.1).enclosure, EnclosureType::ArtuKSingleColumn);
/// assert_eq!(select_enclosure(13, 100.0).enclosure, EnclosureType::ArtuKDoubleColumn);
/// ```
pub fn select_enclosure(feeders: usize, main_current_a: f64) -> EnclosureSelection {
    let enclosure = EnclosureType::ALL
        .into_iter()
        .find(|frame| match frame.limits() {
            Some((max_feeders, max_current_a)) => feeders <= max_feeders && main_current_a <= max_current_a,
            None => true,
        })
        .unwrap_or(EnclosureType::ArtuKDoubleColumn);

    EnclosureSelection {
        enclosure,
        feeders,
        main_current_a,
        price_eur: enclosure.price_eur(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_chain_boundaries() {
        assert_eq!(select_enclosure(1, 10.0).enclosure, EnclosureType::ArtuMSingleColumn);
        assert_eq!(select_enclosure(7, 10.0).enclosure, EnclosureType::ArtuKSingleColumn);
        assert_eq!(select_enclosure(12, 800.0).enclosure, EnclosureType::ArtuKSingleColumn);
        assert_eq!(select_enclosure(12, 800.5).enclosure, EnclosureType::ArtuKDoubleColumn);
        assert_eq!(select_enclosure(40, 3000.0).enclosure, EnclosureType::ArtuKDoubleColumn);
    }

    #[test]
    fn test_price_follows_frame() {
        let selection = select_enclosure(feeder_count(4), 494.3);
        assert_eq!(selection.feeders, 5);
        assert_eq!(selection.enclosure, EnclosureType::ArtuKSingleColumn);
        assert_eq!(selection.price_eur, 12_000.0);
    }
}
