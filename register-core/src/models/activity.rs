use serde::{Deserialize, Serialize};

/// A priced activity as declared by the form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    pub id: String,
    pub label: String,
    pub cost: u32,
    /// Activities sharing a slot cannot be attended together.
    pub time_slot: Option<String>,
}

/// Live checkbox state for one activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    pub label: String,
    pub cost: u32,
    pub selected: bool,
    pub disabled: bool,
    pub time_slot: Option<String>,
}

impl ActivityItem {
    /// True when the item contributes to the running total.
    pub fn is_counted(&self) -> bool {
        self.selected && !self.disabled
    }

    /// True when both items have the same non-null time slot.
    pub fn conflicts_with(
        &self,
        other: &ActivityItem,
    ) -> bool {
        self.id != other.id
            && matches!(
                (&self.time_slot, &other.time_slot),
                (Some(a), Some(b)) if a == b
            )
    }
}

impl From<&ActivityDefinition> for ActivityItem {
    fn from(definition: &ActivityDefinition) -> Self {
        Self {
            id: definition.id.clone(),
            label: definition.label.clone(),
            cost: definition.cost,
            selected: false,
            disabled: false,
            time_slot: definition.time_slot.clone(),
        }
    }
}
