use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ActivityDefinition, TshirtDesign};

/// Errors raised when a form definition breaks its own invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("duplicate activity id '{0}'")]
    DuplicateActivity(String),

    #[error("duplicate shirt color '{0}'")]
    DuplicateColor(String),

    #[error("activity id cannot be empty")]
    EmptyActivityId,

    #[error("activity costs add up to more than ${max}", max = u32::MAX)]
    TotalOverflow,
}

/// A t-shirt color option, tagged with the design it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShirtColor {
    pub value: String,
    pub label: String,
    pub design: TshirtDesign,
}

/// Static catalog the form is built from: the activities on offer and the
/// shirt colors per design. Order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormDefinition {
    activities: Vec<ActivityDefinition>,
    shirt_colors: Vec<ShirtColor>,
}

impl FormDefinition {
    /// Builds a definition, rejecting duplicate activity ids or color values
    /// and catalogs whose combined cost would not fit the running total.
    pub fn new(
        activities: Vec<ActivityDefinition>,
        shirt_colors: Vec<ShirtColor>,
    ) -> Result<Self, DefinitionError> {
        let mut seen = HashSet::new();
        for activity in &activities {
            if activity.id.is_empty() {
                return Err(DefinitionError::EmptyActivityId);
            }
            if !seen.insert(activity.id.as_str()) {
                return Err(DefinitionError::DuplicateActivity(activity.id.clone()));
            }
        }

        activities
            .iter()
            .try_fold(0u32, |sum, activity| sum.checked_add(activity.cost))
            .ok_or(DefinitionError::TotalOverflow)?;

        let mut seen = HashSet::new();
        for color in &shirt_colors {
            if !seen.insert(color.value.as_str()) {
                return Err(DefinitionError::DuplicateColor(color.value.clone()));
            }
        }

        Ok(Self {
            activities,
            shirt_colors,
        })
    }

    pub fn activities(&self) -> &[ActivityDefinition] {
        &self.activities
    }

    pub fn shirt_colors(&self) -> &[ShirtColor] {
        &self.shirt_colors
    }

    /// Colors tagged with `design`, in definition order.
    pub fn colors_for(
        &self,
        design: TshirtDesign,
    ) -> impl Iterator<Item = &ShirtColor> {
        self.shirt_colors
            .iter()
            .filter(move |color| color.design == design)
    }

    pub fn color(
        &self,
        value: &str,
    ) -> Option<&ShirtColor> {
        self.shirt_colors.iter().find(|color| color.value == value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn activity(id: &str) -> ActivityDefinition {
        ActivityDefinition {
            id: id.to_string(),
            label: id.to_string(),
            cost: 100,
            time_slot: None,
        }
    }

    fn color(
        value: &str,
        design: TshirtDesign,
    ) -> ShirtColor {
        ShirtColor {
            value: value.to_string(),
            label: value.to_string(),
            design,
        }
    }

    #[test]
    fn new_rejects_duplicate_activity_ids() {
        let result = FormDefinition::new(vec![activity("node"), activity("node")], vec![]);

        assert_eq!(
            result,
            Err(DefinitionError::DuplicateActivity("node".to_string()))
        );
    }

    #[test]
    fn new_rejects_empty_activity_id() {
        let result = FormDefinition::new(vec![activity("")], vec![]);

        assert_eq!(result, Err(DefinitionError::EmptyActivityId));
    }

    #[test]
    fn new_rejects_costs_that_overflow_the_total() {
        let gala = ActivityDefinition {
            cost: u32::MAX,
            ..activity("gala")
        };
        let npm = ActivityDefinition {
            cost: 1,
            ..activity("npm")
        };

        let result = FormDefinition::new(vec![gala, npm], vec![]);

        assert_eq!(result, Err(DefinitionError::TotalOverflow));
    }

    #[test]
    fn new_accepts_costs_up_to_the_limit() {
        let gala = ActivityDefinition {
            cost: u32::MAX - 1,
            ..activity("gala")
        };
        let npm = ActivityDefinition {
            cost: 1,
            ..activity("npm")
        };

        assert!(FormDefinition::new(vec![gala, npm], vec![]).is_ok());
    }

    #[test]
    fn new_rejects_duplicate_colors() {
        let result = FormDefinition::new(
            vec![],
            vec![
                color("tomato", TshirtDesign::HeartJs),
                color("tomato", TshirtDesign::JsPuns),
            ],
        );

        assert_eq!(
            result,
            Err(DefinitionError::DuplicateColor("tomato".to_string()))
        );
    }

    #[test]
    fn colors_for_keeps_only_the_design_in_order() {
        let definition = FormDefinition::new(
            vec![],
            vec![
                color("cornflowerblue", TshirtDesign::JsPuns),
                color("tomato", TshirtDesign::HeartJs),
                color("gold", TshirtDesign::JsPuns),
            ],
        )
        .unwrap();

        let values: Vec<_> = definition
            .colors_for(TshirtDesign::JsPuns)
            .map(|c| c.value.as_str())
            .collect();

        assert_eq!(values, vec!["cornflowerblue", "gold"]);
    }
}
