//! Ordered load collection
//!
//! The collection owned by a project. Insertion order is preserved (it is the
//! order of the load table in reports) and names are unique ignoring case.
//! Every mutating operation either succeeds completely or leaves the
//! collection untouched. Deserialization goes through the same checks.

use serde::{Deserialize, Serialize};

use super::{Load, Priority};
use crate::errors::{CalcError, CalcResult};

/// Ordered, name-unique collection of loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Load>", into = "Vec<Load>")]
pub struct LoadSet {
    loads: Vec<Load>,
}

impl LoadSet {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a load at the end of the collection.
    ///
    /// The name is trimmed before storing. Returns the position of the new load.
    ///
    /// # Errors
    ///
    /// * `InvalidField` - a field is out of range
    /// * `DuplicateName` - a load with the same name (any case) exists
    pub fn add(&mut self, mut load: Load) -> CalcResult<usize> {
        load.name = load.name.trim().to_string();
        load.validate()?;
        if self.contains_name(&load.name) {
            return Err(CalcError::duplicate_name(load.name));
        }
        self.loads.push(load);
        Ok(self.loads.len() - 1)
    }

    /// Add several loads at once (e.g. a template).
    ///
    /// All loads are validated against the collection and against each other
    /// first; on any error nothing is added.
    pub fn extend(&mut self, loads: impl IntoIterator<Item = Load>) -> CalcResult<usize> {
        let mut staged = self.clone();
        let mut added = 0;
        for load in loads {
            staged.add(load)?;
            added += 1;
        }
        *self = staged;
        Ok(added)
    }

    /// Remove the load at `index`.
    pub fn remove_at(&mut self, index: usize) -> CalcResult<Load> {
        if index >= self.loads.len() {
            return Err(CalcError::load_not_found(format!(
                "index {} (collection has {} loads)",
                index,
                self.loads.len()
            )));
        }
        Ok(self.loads.remove(index))
    }

    /// Remove the load with the given name (case-insensitive).
    pub fn remove_by_name(&mut self, name: &str) -> CalcResult<Load> {
        match self.position(name) {
            Some(index) => Ok(self.loads.remove(index)),
            None => Err(CalcError::load_not_found(format!("name '{}'", name.trim()))),
        }
    }

    /// Remove every load
    pub fn clear(&mut self) {
        self.loads.clear();
    }

    /// Ordered view of the loads
    pub fn list(&self) -> &[Load] {
        &self.loads
    }

    /// Owned copy of the loads, for computing outside a lock or session
    pub fn snapshot(&self) -> Vec<Load> {
        self.loads.clone()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Load> {
        self.loads.iter()
    }

    /// Get a load by position
    pub fn get(&self, index: usize) -> Option<&Load> {
        self.loads.get(index)
    }

    /// Position of the load with the given name (case-insensitive)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.loads.iter().position(|l| l.has_name(name))
    }

    /// Whether a load with the given name exists (case-insensitive)
    pub fn contains_name(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Sum of rated power (kW)
    pub fn total_power_kw(&self) -> f64 {
        self.loads.iter().map(|l| l.power_kw).sum()
    }

    /// Arithmetic sum of the line currents (A)
    pub fn total_current_a(&self) -> f64 {
        self.loads.iter().map(|l| l.current_a()).sum()
    }

    /// Installed power per priority, in `Priority::ALL` order.
    ///
    /// Priorities with no loads are reported with 0 kW.
    pub fn power_by_priority(&self) -> Vec<(Priority, f64)> {
        Priority::ALL
            .iter()
            .map(|&p| {
                let kw = self
                    .loads
                    .iter()
                    .filter(|l| l.priority == p)
                    .map(|l| l.power_kw)
                    .sum();
                (p, kw)
            })
            .collect()
    }
}

impl TryFrom<Vec<Load>> for LoadSet {
    type Error = CalcError;

    fn try_from(loads: Vec<Load>) -> CalcResult<Self> {
        let mut set = LoadSet::new();
        set.extend(loads)?;
        Ok(set)
    }
}

impl From<LoadSet> for Vec<Load> {
    fn from(set: LoadSet) -> Self {
        set.loads
    }
}

impl<'a> IntoIterator for &'a LoadSet {
    type Item = &'a Load;
    type IntoIter = std::slice::Iter<'a, Load>;

    fn into_iter(self) -> Self::IntoIter {
        self.loads.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::Regime;

    fn sample() -> LoadSet {
        let mut set = LoadSet::new();
        set.add(Load::new("Pump", 11.0)).unwrap();
        set.add(Load::new("Fan", 4.0).with_priority(Priority::Deferrable)).unwrap();
        set
    }

    #[test]
    fn test_add_preserves_order_and_trims() {
        let mut set = sample();
        let index = set.add(Load::new("  Mixer ", 7.5)).unwrap();
        assert_eq!(index, 2);
        let names: Vec<_> = set.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Pump", "Fan", "Mixer"]);
    }

    #[test]
    fn test_duplicate_name_rejected_without_mutation() {
        let mut set = sample();
        let before = set.clone();
        let err = set.add(Load::new("pUMP", 3.0)).unwrap_err();
        assert_eq!(err, CalcError::duplicate_name("pUMP"));
        assert_eq!(set, before);
    }

    #[test]
    fn test_invalid_load_rejected_without_mutation() {
        let mut set = sample();
        let before = set.clone();
        assert!(matches!(
            set.add(Load::new("Heater", -2.0)),
            Err(CalcError::InvalidField { .. })
        ));
        assert_eq!(set, before);
    }

    #[test]
    fn test_add_then_remove_restores_collection() {
        let mut set = sample();
        let before = set.clone();

        let index = set.add(Load::new("Chiller", 30.0)).unwrap();
        set.remove_at(index).unwrap();
        assert_eq!(set, before);

        set.add(Load::new("Chiller", 30.0)).unwrap();
        let removed = set.remove_by_name("CHILLER").unwrap();
        assert_eq!(removed.name, "Chiller");
        assert_eq!(set, before);
    }

    #[test]
    fn test_main_incomer_name_is_reserved() {
        let mut set = sample();
        assert!(matches!(
            set.add(Load::new("Main Incomer", 5.0)),
            Err(CalcError::InvalidField { .. })
        ));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_missing() {
        let mut set = sample();
        assert!(matches!(set.remove_at(5), Err(CalcError::LoadNotFound { .. })));
        assert!(matches!(set.remove_by_name("Boiler"), Err(CalcError::LoadNotFound { .. })));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut set = sample();
        let before = set.clone();

        // Second entry collides with an existing load
        let result = set.extend(vec![Load::new("Press", 18.5), Load::new("fan", 2.0)]);
        assert!(matches!(result, Err(CalcError::DuplicateName { .. })));
        assert_eq!(set, before);

        // Collisions inside the batch are caught too
        let result = set.extend(vec![Load::new("Saw", 3.0), Load::new("SAW", 3.0)]);
        assert!(result.is_err());
        assert_eq!(set, before);

        assert_eq!(set.extend(vec![Load::new("Press", 18.5)]).unwrap(), 1);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_totals_and_priority_breakdown() {
        let mut set = sample();
        set.add(
            Load::new("Lathe", 15.0)
                .with_regime(Regime::Intermittent)
                .with_priority(Priority::Critical),
        )
        .unwrap();

        assert!((set.total_power_kw() - 30.0).abs() < 1e-12);
        let expected_current: f64 = set.iter().map(|l| l.current_a()).sum();
        assert!((set.total_current_a() - expected_current).abs() < 1e-12);

        let breakdown = set.power_by_priority();
        assert_eq!(
            breakdown,
            vec![
                (Priority::Critical, 15.0),
                (Priority::Normal, 11.0),
                (Priority::Deferrable, 4.0),
            ]
        );
    }

    #[test]
    fn test_clear_and_json() {
        let mut set = sample();
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with('['));
        let roundtrip: LoadSet = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, set);

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_deserialize_applies_load_checks() {
        let duplicate = r#"[{"name": "Pump", "power_kw": 10}, {"name": "PUMP", "power_kw": 5}]"#;
        let err = serde_json::from_str::<LoadSet>(duplicate).unwrap_err();
        assert!(err.to_string().contains("PUMP"), "{}", err);

        let negative = r#"[{"name": "Pump", "power_kw": 10}, {"name": "Heater", "power_kw": -5}]"#;
        assert!(serde_json::from_str::<LoadSet>(negative).is_err());

        let set: LoadSet = serde_json::from_str(r#"[{"name": " Fan ", "power_kw": 4}]"#).unwrap();
        assert_eq!(set.list()[0].name, "Fan");
    }
}
