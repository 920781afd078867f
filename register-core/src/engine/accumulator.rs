//! Running cost of the selected activities.
//!
//! The total is updated incrementally on every toggle and must always equal
//! the sum of `cost` over counted items (selected and not disabled). Selecting
//! an item that has a time slot disables every other item in the same slot,
//! so no two items sharing a slot are ever counted together.
//!
//! # Example
//!
//! ```
//! use register_core::ActivityDefinition;
//! use register_core::engine::{Activities, ToggleOutcome};
//!
//! let definitions = vec![
//!     ActivityDefinition {
//!         id: "frameworks".into(),
//!         label: "JavaScript Frameworks Workshop".into(),
//!         cost: 100,
//!         time_slot: Some("Tue 9am".into()),
//!     },
//!     ActivityDefinition {
//!         id: "express".into(),
//!         label: "Express Workshop".into(),
//!         cost: 100,
//!         time_slot: Some("Tue 9am".into()),
//!     },
//! ];
//! let mut activities = Activities::new(&definitions);
//!
//! activities.toggle("frameworks", true).unwrap();
//! assert_eq!(activities.toggle("express", true).unwrap(), ToggleOutcome::Rejected);
//! assert_eq!(activities.total(), 100);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ActivityDefinition, ActivityItem};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActivityError {
    #[error("unknown activity '{0}'")]
    UnknownActivity(String),

    #[error("selecting '{0}' would push the total past ${max}", max = u32::MAX)]
    TotalOverflow(String),
}

/// Side effects of a toggle on the other items sharing its time slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotChanges {
    pub disabled: Vec<String>,
    pub enabled: Vec<String>,
    /// Items whose stale selection was cleared when they were disabled.
    pub unchecked: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The item already had the requested state.
    Unchanged,
    /// The item is disabled by a conflicting selection and stays unselected.
    Rejected,
    Applied(SlotChanges),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activities {
    items: Vec<ActivityItem>,
    total: u32,
}

impl Activities {
    pub fn new(definitions: &[ActivityDefinition]) -> Self {
        Self {
            items: definitions.iter().map(ActivityItem::from).collect(),
            total: 0,
        }
    }

    /// Items in definition order.
    pub fn items(&self) -> &[ActivityItem] {
        &self.items
    }

    pub fn item(
        &self,
        id: &str,
    ) -> Option<&ActivityItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// The total computed from scratch, `None` if it does not fit a `u32`.
    pub fn recomputed_total(&self) -> Option<u32> {
        self.items
            .iter()
            .filter(|item| item.is_counted())
            .try_fold(0u32, |sum, item| sum.checked_add(item.cost))
    }

    /// Ids of the counted items, in definition order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.is_counted())
            .map(|item| item.id.clone())
            .collect()
    }

    /// Sets the checked state of `id` and updates the total and the slot
    /// locks of the items it conflicts with.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::UnknownActivity`] if no item has that id, and
    /// [`ActivityError::TotalOverflow`] if selecting it would overflow the
    /// total. Nothing changes in either case.
    pub fn toggle(
        &mut self,
        id: &str,
        checked: bool,
    ) -> Result<ToggleOutcome, ActivityError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| ActivityError::UnknownActivity(id.to_string()))?;

        let item = &self.items[index];
        if checked && item.disabled {
            return Ok(ToggleOutcome::Rejected);
        }
        if item.selected == checked {
            return Ok(ToggleOutcome::Unchanged);
        }

        let changes = if checked {
            let total = self
                .total_after_select(index)
                .ok_or_else(|| ActivityError::TotalOverflow(id.to_string()))?;
            self.select(index, total)
        } else {
            self.deselect(index)
        };

        debug_assert_eq!(Some(self.total), self.recomputed_total());
        Ok(ToggleOutcome::Applied(changes))
    }

    /// Total once `index` is selected and its slot rivals are dropped.
    fn total_after_select(
        &self,
        index: usize,
    ) -> Option<u32> {
        let selected = &self.items[index];
        // Counted rivals are part of the current total, so this cannot overflow.
        let freed: u32 = self
            .items
            .iter()
            .filter(|other| selected.conflicts_with(other) && other.is_counted())
            .map(|other| other.cost)
            .sum();
        (self.total - freed).checked_add(selected.cost)
    }

    fn select(
        &mut self,
        index: usize,
        total: u32,
    ) -> SlotChanges {
        let mut changes = SlotChanges::default();

        self.items[index].selected = true;
        self.total = total;

        let selected = self.items[index].clone();
        for other in self.items.iter_mut() {
            if !selected.conflicts_with(other) {
                continue;
            }
            if other.selected {
                other.selected = false;
                changes.unchecked.push(other.id.clone());
            }
            if !other.disabled {
                other.disabled = true;
                changes.disabled.push(other.id.clone());
            }
        }

        changes
    }

    fn deselect(
        &mut self,
        index: usize,
    ) -> SlotChanges {
        let mut changes = SlotChanges::default();

        let was_counted = self.items[index].is_counted();
        self.items[index].selected = false;
        if !was_counted {
            return changes;
        }
        self.total -= self.items[index].cost;

        let deselected = self.items[index].clone();
        for other in self.items.iter_mut() {
            if deselected.conflicts_with(other) && other.disabled {
                other.disabled = false;
                changes.enabled.push(other.id.clone());
            }
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn definition(
        id: &str,
        cost: u32,
        time_slot: Option<&str>,
    ) -> ActivityDefinition {
        ActivityDefinition {
            id: id.to_string(),
            label: id.to_string(),
            cost,
            time_slot: time_slot.map(str::to_string),
        }
    }

    fn sample() -> Activities {
        Activities::new(&[
            definition("main", 100, None),
            definition("npm", 20, None),
            definition("a", 100, Some("Tue 2pm")),
            definition("b", 100, Some("Tue 2pm")),
            definition("c", 50, Some("Wed 9am")),
        ])
    }

    // =========================================================================
    // totals
    // =========================================================================

    #[test]
    fn total_starts_at_zero() {
        assert_eq!(sample().total(), 0);
    }

    #[test]
    fn selecting_two_items_sums_their_costs() {
        let mut activities = sample();

        activities.toggle("main", true).unwrap();
        activities.toggle("npm", true).unwrap();

        assert_eq!(activities.total(), 120);
    }

    #[test]
    fn deselecting_subtracts_cost() {
        let mut activities = sample();
        activities.toggle("main", true).unwrap();
        activities.toggle("npm", true).unwrap();

        activities.toggle("main", false).unwrap();

        assert_eq!(activities.total(), 20);
    }

    #[test]
    fn total_is_independent_of_selection_order() {
        let mut forward = sample();
        forward.toggle("main", true).unwrap();
        forward.toggle("npm", true).unwrap();

        let mut backward = sample();
        backward.toggle("npm", true).unwrap();
        backward.toggle("main", true).unwrap();

        assert_eq!(forward.total(), backward.total());
        assert_eq!(forward.total(), 120);
    }

    #[test]
    fn repeated_toggle_is_not_double_counted() {
        let mut activities = sample();
        activities.toggle("main", true).unwrap();

        let outcome = activities.toggle("main", true).unwrap();

        assert_eq!(outcome, ToggleOutcome::Unchanged);
        assert_eq!(activities.total(), 100);
    }

    #[test]
    fn incremental_total_matches_recomputed_after_mixed_toggles() {
        let mut activities = sample();
        let steps = [
            ("a", true),
            ("c", true),
            ("b", true),
            ("main", true),
            ("a", false),
            ("b", true),
            ("c", false),
            ("npm", true),
        ];

        for (id, checked) in steps {
            activities.toggle(id, checked).unwrap();
            assert_eq!(Some(activities.total()), activities.recomputed_total());
        }
        assert_eq!(activities.total(), 220);
    }

    // =========================================================================
    // time slot exclusion
    // =========================================================================

    #[test]
    fn selecting_disables_items_in_same_slot() {
        let mut activities = sample();

        let outcome = activities.toggle("a", true).unwrap();

        assert_eq!(
            outcome,
            ToggleOutcome::Applied(SlotChanges {
                disabled: vec!["b".to_string()],
                ..SlotChanges::default()
            })
        );
        assert!(activities.item("b").unwrap().disabled);
        assert!(!activities.item("c").unwrap().disabled);
    }

    #[test]
    fn conflicting_selection_is_rejected() {
        let mut activities = sample();
        activities.toggle("a", true).unwrap();

        let outcome = activities.toggle("b", true).unwrap();

        assert_eq!(outcome, ToggleOutcome::Rejected);
        let b = activities.item("b").unwrap();
        assert!(b.disabled);
        assert!(!b.selected);
        assert_eq!(activities.total(), 100);
    }

    #[test]
    fn deselecting_re_enables_the_slot() {
        let mut activities = sample();
        activities.toggle("a", true).unwrap();

        let outcome = activities.toggle("a", false).unwrap();

        assert_eq!(
            outcome,
            ToggleOutcome::Applied(SlotChanges {
                enabled: vec!["b".to_string()],
                ..SlotChanges::default()
            })
        );
        assert!(!activities.item("b").unwrap().disabled);
        assert_eq!(activities.total(), 0);
    }

    #[test]
    fn freed_slot_can_be_taken_by_the_other_item() {
        let mut activities = sample();
        activities.toggle("a", true).unwrap();
        activities.toggle("a", false).unwrap();

        let outcome = activities.toggle("b", true).unwrap();

        assert_eq!(
            outcome,
            ToggleOutcome::Applied(SlotChanges {
                disabled: vec!["a".to_string()],
                ..SlotChanges::default()
            })
        );
        assert_eq!(activities.total(), 100);
    }

    #[test]
    fn items_without_slot_never_conflict() {
        let mut activities = sample();

        activities.toggle("main", true).unwrap();
        let outcome = activities.toggle("npm", true).unwrap();

        assert_eq!(outcome, ToggleOutcome::Applied(SlotChanges::default()));
    }

    #[test]
    fn stale_selection_in_slot_is_cleared_and_not_counted() {
        let mut activities = sample();
        activities.items[3].selected = true;
        activities.total = 100;

        let outcome = activities.toggle("a", true).unwrap();

        assert_eq!(
            outcome,
            ToggleOutcome::Applied(SlotChanges {
                disabled: vec!["b".to_string()],
                unchecked: vec!["b".to_string()],
                ..SlotChanges::default()
            })
        );
        assert_eq!(activities.total(), 100);
        assert_eq!(activities.selected_ids(), vec!["a".to_string()]);
    }

    #[test]
    fn unknown_activity_is_an_error() {
        let mut activities = sample();

        let result = activities.toggle("nope", true);

        assert_eq!(
            result,
            Err(ActivityError::UnknownActivity("nope".to_string()))
        );
    }

    #[test]
    fn overflowing_selection_is_refused_and_leaves_state_alone() {
        let mut activities = Activities::new(&[
            definition("gala", u32::MAX, None),
            definition("npm", 1, None),
        ]);
        activities.toggle("gala", true).unwrap();
        let before = activities.clone();

        let result = activities.toggle("npm", true);

        assert_eq!(result, Err(ActivityError::TotalOverflow("npm".to_string())));
        assert_eq!(activities, before);
        assert_eq!(activities.total(), u32::MAX);
    }

    #[test]
    fn dropping_a_stale_rival_makes_room_for_a_large_cost() {
        let mut activities = Activities::new(&[
            definition("a", u32::MAX, Some("Tue 9am")),
            definition("b", u32::MAX, Some("Tue 9am")),
        ]);
        activities.items[1].selected = true;
        activities.total = u32::MAX;

        let outcome = activities.toggle("a", true);

        assert!(matches!(outcome, Ok(ToggleOutcome::Applied(_))));
        assert_eq!(activities.total(), u32::MAX);
        assert_eq!(activities.selected_ids(), vec!["a".to_string()]);
    }
}
