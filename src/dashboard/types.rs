//! Core data types for the comparison dashboard
//!
//! A [`StatesMapping`] holds one [`StateRecord`] per U.S. state or territory.
//! The observation payload is shared (`Arc`) and never mutated; the only field
//! the dashboard edits is [`StateRecord::selected`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Stable state identifier (postal code or name, whatever the feed uses)
pub type StateId = String;

/// One day of a state's outbreak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    /// Day of outbreak, 1-based, counted from the state's first recorded case
    pub day: u32,
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Cumulative case count
    pub cases: u64,
    /// Cases reported on this day
    pub new_cases: i64,
    /// Cumulative cases per 1000 residents
    pub cases_per_1000: f64,
}

/// A single state with its outbreak time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub id: StateId,
    pub name: String,
    #[serde(default)]
    pub population: Option<u64>,
    /// Ordered by `day`, read-only
    pub observations: Arc<[DailyObservation]>,
    #[serde(default)]
    pub selected: bool,
}

impl StateRecord {
    /// Create an unselected record
    pub fn new(
        id: impl Into<StateId>,
        name: impl Into<String>,
        observations: Vec<DailyObservation>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            population: None,
            observations: observations.into(),
            selected: false,
        }
    }

    /// Set the population
    pub fn population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    /// Set the initial selection flag
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Copy of this record with a different selection flag.
    /// The observation payload is shared, not copied.
    pub fn with_selected(&self, selected: bool) -> Self {
        Self {
            selected,
            ..self.clone()
        }
    }

    /// Most recent observation
    pub fn latest(&self) -> Option<&DailyObservation> {
        self.observations.last()
    }

    /// Number of days since the first recorded case
    pub fn days_of_outbreak(&self) -> u32 {
        self.latest().map(|o| o.day).unwrap_or(0)
    }
}

/// Mapping from state id to record. Iteration is ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatesMapping {
    states: BTreeMap<StateId, StateRecord>,
}

impl StatesMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record keyed by its own id, replacing any previous entry
    pub fn insert(&mut self, record: StateRecord) -> Option<StateRecord> {
        self.states.insert(record.id.clone(), record)
    }

    pub fn get(&self, id: &str) -> Option<&StateRecord> {
        self.states.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.states.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &StateId> {
        self.states.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateRecord> {
        self.states.values()
    }

    /// Records with `selected == true`
    pub fn selected(&self) -> impl Iterator<Item = &StateRecord> {
        self.states.values().filter(|r| r.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }
}

impl FromIterator<StateRecord> for StatesMapping {
    fn from_iter<I: IntoIterator<Item = StateRecord>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for record in iter {
            mapping.insert(record);
        }
        mapping
    }
}

impl<'a> IntoIterator for &'a StatesMapping {
    type Item = &'a StateRecord;
    type IntoIter = std::collections::btree_map::Values<'a, StateId, StateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.values()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a record with `days` synthetic observations starting 2020-03-01
    pub fn record(id: &str, days: u32) -> StateRecord {
        let start = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let mut cases = 0u64;
        let observations = (1..=days)
            .map(|day| {
                let new_cases = (day * day) as i64;
                cases += new_cases as u64;
                DailyObservation {
                    day,
                    date: start + chrono::Duration::days(day as i64 - 1),
                    cases,
                    new_cases,
                    cases_per_1000: cases as f64 / 1000.0,
                }
            })
            .collect();
        StateRecord::new(id, id, observations)
    }

    pub fn ny_ca() -> StatesMapping {
        [record("NY", 5), record("CA", 3)].into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_mapping_orders_by_id() {
        let mapping = ny_ca();
        let ids: Vec<_> = mapping.ids().cloned().collect();
        assert_eq!(ids, vec!["CA".to_string(), "NY".to_string()]);
    }

    #[test]
    fn test_with_selected_shares_payload() {
        let record = record("NY", 10);
        let copy = record.with_selected(true);
        assert!(copy.selected);
        assert!(!record.selected);
        assert!(Arc::ptr_eq(&record.observations, &copy.observations));
    }

    #[test]
    fn test_latest_and_days() {
        let record = record("WA", 4);
        assert_eq!(record.days_of_outbreak(), 4);
        assert_eq!(record.latest().unwrap().cases, 1 + 4 + 9 + 16);

        let empty = StateRecord::new("GU", "Guam", Vec::new());
        assert_eq!(empty.days_of_outbreak(), 0);
        assert!(empty.latest().is_none());
    }

    #[test]
    fn test_mapping_serializes_as_object() {
        let mapping: StatesMapping = [record("NY", 1).selected(true)].into_iter().collect();
        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(json["NY"]["selected"], true);
        assert_eq!(json["NY"]["observations"][0]["day"], 1);

        let back: StatesMapping = serde_json::from_value(json).unwrap();
        assert_eq!(back, mapping);
    }
}
