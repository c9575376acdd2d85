//! Selection reducers
//!
//! Pure functions over a [`StatesMapping`]. Each returns a new mapping and
//! leaves its input untouched, so UI layers can detect changes by equality.

use super::error::{DashboardError, DashboardResult};
use super::types::StatesMapping;

/// Set one state's `selected` flag to `checked`.
///
/// Fails with [`DashboardError::KeyNotFound`] if `state_id` is not in the
/// mapping.
pub fn toggle_one(
    mapping: &StatesMapping,
    state_id: &str,
    checked: bool,
) -> DashboardResult<StatesMapping> {
    if !mapping.contains(state_id) {
        return Err(DashboardError::KeyNotFound(state_id.to_string()));
    }

    Ok(mapping
        .iter()
        .map(|record| {
            if record.id == state_id {
                record.with_selected(checked)
            } else {
                record.clone()
            }
        })
        .collect())
}

/// Mark every state as selected
pub fn select_all(mapping: &StatesMapping) -> StatesMapping {
    set_all(mapping, true)
}

/// Mark every state as unselected
pub fn deselect_all(mapping: &StatesMapping) -> StatesMapping {
    set_all(mapping, false)
}

/// Only the selected states
pub fn selected_subset(mapping: &StatesMapping) -> StatesMapping {
    mapping.selected().cloned().collect()
}

fn set_all(mapping: &StatesMapping, selected: bool) -> StatesMapping {
    mapping.iter().map(|r| r.with_selected(selected)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::types::fixtures::{ny_ca, record};

    fn flags(mapping: &StatesMapping) -> Vec<(String, bool)> {
        mapping.iter().map(|r| (r.id.clone(), r.selected)).collect()
    }

    #[test]
    fn test_toggle_one_sets_only_target() {
        let mapping: StatesMapping = [record("NY", 2), record("CA", 2), record("WA", 2)]
            .into_iter()
            .collect();

        let toggled = toggle_one(&mapping, "NY", true).unwrap();
        assert!(toggled.get("NY").unwrap().selected);
        assert!(!toggled.get("CA").unwrap().selected);
        assert!(!toggled.get("WA").unwrap().selected);

        // Input is unchanged
        assert!(!mapping.get("NY").unwrap().selected);

        // Everything but the flag is preserved
        assert_eq!(
            toggled.get("NY").unwrap().observations,
            mapping.get("NY").unwrap().observations
        );
    }

    #[test]
    fn test_toggle_one_unknown_key() {
        let mapping = ny_ca();
        let err = toggle_one(&mapping, "TX", true).unwrap_err();
        assert_eq!(err, DashboardError::KeyNotFound("TX".to_string()));
    }

    #[test]
    fn test_select_then_deselect_clears_everything() {
        let mapping: StatesMapping = [record("NY", 2).selected(true), record("CA", 2)]
            .into_iter()
            .collect();

        let cleared = deselect_all(&select_all(&mapping));
        assert_eq!(cleared, deselect_all(&mapping));
        assert_eq!(cleared.selected_count(), 0);
        assert_eq!(cleared.len(), mapping.len());
    }

    #[test]
    fn test_select_and_deselect_are_idempotent() {
        let mapping = ny_ca();

        let once = select_all(&mapping);
        assert_eq!(select_all(&once), once);

        let once = deselect_all(&mapping);
        assert_eq!(deselect_all(&once), once);
    }

    #[test]
    fn test_select_all_then_toggle_one_off() {
        let mapping = ny_ca();

        let all = select_all(&mapping);
        assert_eq!(
            flags(&all),
            vec![("CA".to_string(), true), ("NY".to_string(), true)]
        );

        let result = toggle_one(&all, "NY", false).unwrap();
        assert_eq!(
            flags(&result),
            vec![("CA".to_string(), true), ("NY".to_string(), false)]
        );
    }

    #[test]
    fn test_selected_subset() {
        let mapping = toggle_one(&ny_ca(), "CA", true).unwrap();
        let subset = selected_subset(&mapping);
        assert_eq!(subset.len(), 1);
        assert!(subset.contains("CA"));

        assert!(selected_subset(&deselect_all(&mapping)).is_empty());
    }

    #[test]
    fn test_empty_mapping() {
        let empty = StatesMapping::new();
        assert!(select_all(&empty).is_empty());
        assert!(deselect_all(&empty).is_empty());
        assert!(toggle_one(&empty, "NY", true).is_err());
    }
}
