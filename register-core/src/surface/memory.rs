use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::{Directive, FormSurface, Section};
use crate::models::{FieldId, PaymentMethod, TextField};
use crate::validation::FeedbackDirective;

/// Validity class carried by a field's container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidityClass {
    #[default]
    Unmarked,
    Valid,
    NotValid,
}

/// What the page shows for one validated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub class: ValidityClass,
    pub hint_visible: bool,
    pub hint_text: String,
}

impl FieldView {
    fn new(field: FieldId) -> Self {
        Self {
            class: ValidityClass::Unmarked,
            hint_visible: false,
            hint_text: default_hint(field).to_string(),
        }
    }
}

/// What the page shows for one activity checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityView {
    pub id: String,
    pub enabled: bool,
    pub checked: bool,
    pub focused: bool,
}

/// Hint text present in the markup before any validator has run.
pub fn default_hint(field: FieldId) -> &'static str {
    match field {
        FieldId::Name => "Name field cannot be blank",
        FieldId::Email => "Email address must be formatted correctly",
        FieldId::Activities => "Choose at least one activity",
        FieldId::CardNumber => "Credit card number must be between 13 - 16 digits",
        FieldId::Zip => "Zip Code must be 5 digits",
        FieldId::Cvv => "CVV must be 3 digits",
        FieldId::ExpMonth => "Select an expiration month",
        FieldId::ExpYear => "Select an expiration year",
    }
}

/// In-memory page model. Records exactly what the directives wrote, so it
/// doubles as the observable state in tests and as the CLI's display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    pub fields: BTreeMap<FieldId, FieldView>,
    pub sections: HashMap<Section, bool>,
    pub color_select_enabled: bool,
    /// Color options in the order they were first written.
    pub color_options: Vec<(String, bool)>,
    /// `None` while the prompt option is showing.
    pub color_selected: Option<String>,
    pub payment_selected: PaymentMethod,
    pub activities: Vec<ActivityView>,
    pub total_text: String,
    pub focused: Option<TextField>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            fields: FieldId::ALL
                .iter()
                .map(|field| (*field, FieldView::new(*field)))
                .collect(),
            sections: HashMap::new(),
            color_select_enabled: true,
            color_options: Vec::new(),
            color_selected: None,
            payment_selected: PaymentMethod::default(),
            activities: Vec::new(),
            total_text: String::new(),
            focused: None,
        }
    }

    pub fn field(
        &self,
        field: FieldId,
    ) -> &FieldView {
        // Every FieldId is inserted by `new`.
        &self.fields[&field]
    }

    /// Sections default to visible until a directive hides them.
    pub fn is_visible(
        &self,
        section: Section,
    ) -> bool {
        self.sections.get(&section).copied().unwrap_or(true)
    }

    pub fn visible_payment_sections(&self) -> Vec<PaymentMethod> {
        PaymentMethod::all()
            .iter()
            .copied()
            .filter(|method| self.is_visible(Section::Payment(*method)))
            .collect()
    }

    pub fn visible_colors(&self) -> Vec<&str> {
        self.color_options
            .iter()
            .filter(|(_, visible)| *visible)
            .map(|(value, _)| value.as_str())
            .collect()
    }

    pub fn activity(
        &self,
        id: &str,
    ) -> Option<&ActivityView> {
        self.activities.iter().find(|view| view.id == id)
    }

    fn activity_mut(
        &mut self,
        id: &str,
    ) -> &mut ActivityView {
        let index = match self.activities.iter().position(|view| view.id == id) {
            Some(index) => index,
            None => {
                self.activities.push(ActivityView {
                    id: id.to_string(),
                    enabled: true,
                    checked: false,
                    focused: false,
                });
                self.activities.len() - 1
            }
        };
        &mut self.activities[index]
    }

    fn apply_feedback(
        &mut self,
        feedback: &FeedbackDirective,
    ) {
        let view = self
            .fields
            .entry(feedback.field())
            .or_insert_with(|| FieldView::new(feedback.field()));
        match feedback {
            FeedbackDirective::MarkValid(_) => {
                view.class = ValidityClass::Valid;
                view.hint_visible = false;
            }
            FeedbackDirective::MarkInvalid(_, message) => {
                view.class = ValidityClass::NotValid;
                view.hint_visible = true;
                if let Some(message) = message {
                    view.hint_text = message.clone();
                }
            }
        }
    }
}

impl FormSurface for MemorySurface {
    fn apply(
        &mut self,
        directive: &Directive,
    ) {
        match directive {
            Directive::ResetForm => {
                let activities = std::mem::take(&mut self.activities);
                *self = Self::new();
                self.activities = activities
                    .into_iter()
                    .map(|view| ActivityView {
                        enabled: true,
                        checked: false,
                        focused: false,
                        ..view
                    })
                    .collect();
            }
            Directive::Feedback(feedback) => self.apply_feedback(feedback),
            Directive::SetSectionVisible { section, visible } => {
                self.sections.insert(*section, *visible);
            }
            Directive::SetColorSelectEnabled(enabled) => self.color_select_enabled = *enabled,
            Directive::SetColorOptionVisible { value, visible } => {
                match self.color_options.iter_mut().find(|(v, _)| v == value) {
                    Some(option) => option.1 = *visible,
                    None => self.color_options.push((value.clone(), *visible)),
                }
            }
            Directive::ResetColorSelection => self.color_selected = None,
            Directive::SelectColor(value) => self.color_selected = Some(value.clone()),
            Directive::SelectPaymentMethod(method) => self.payment_selected = *method,
            Directive::SetActivityEnabled { id, enabled } => {
                self.activity_mut(id).enabled = *enabled;
            }
            Directive::SetActivityChecked { id, checked } => {
                self.activity_mut(id).checked = *checked;
            }
            Directive::SetActivityFocus { id, focused } => {
                self.activity_mut(id).focused = *focused;
            }
            Directive::SetTotal(total) => self.total_text = format!("Total: ${total}"),
            Directive::Focus(field) => self.focused = Some(*field),
        }
    }
}

impl fmt::Display for MemorySurface {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (field, view) in &self.fields {
            let class = match view.class {
                ValidityClass::Unmarked => "-",
                ValidityClass::Valid => "valid",
                ValidityClass::NotValid => "not-valid",
            };
            if view.hint_visible {
                writeln!(f, "{:<15}{class:<10}{}", field.as_str(), view.hint_text)?;
            } else {
                writeln!(f, "{:<15}{class}", field.as_str())?;
            }
        }

        let other_role = if self.is_visible(Section::OtherJobRole) {
            "shown"
        } else {
            "hidden"
        };
        writeln!(f, "{:<15}{other_role}", "other-job-role")?;

        if self.color_select_enabled {
            let selected = self.color_selected.as_deref().unwrap_or("(prompt)");
            writeln!(
                f,
                "{:<15}{selected} of {}",
                "color",
                self.visible_colors().join(", ")
            )?;
        } else {
            writeln!(f, "{:<15}disabled", "color")?;
        }

        for view in &self.activities {
            let mark = if view.checked { "[x]" } else { "[ ]" };
            let state = if view.enabled { "" } else { " (disabled)" };
            writeln!(f, "  {mark} {}{state}", view.id)?;
        }
        writeln!(f, "{}", self.total_text)?;

        let payments: Vec<_> = self
            .visible_payment_sections()
            .iter()
            .map(|method| method.as_str())
            .collect();
        writeln!(
            f,
            "{:<15}{} (showing {})",
            "payment",
            self.payment_selected.as_str(),
            payments.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn mark_invalid_shows_hint_and_replaces_text() {
        let mut surface = MemorySurface::new();

        surface.apply(&Directive::Feedback(FeedbackDirective::MarkInvalid(
            FieldId::Zip,
            Some("must be exactly 5 digits".to_string()),
        )));

        let view = surface.field(FieldId::Zip);
        assert_eq!(view.class, ValidityClass::NotValid);
        assert!(view.hint_visible);
        assert_eq!(view.hint_text, "must be exactly 5 digits");
    }

    #[test]
    fn mark_invalid_without_message_keeps_prior_hint() {
        let mut surface = MemorySurface::new();

        surface.apply(&Directive::Feedback(FeedbackDirective::MarkInvalid(
            FieldId::Cvv,
            None,
        )));

        assert_eq!(surface.field(FieldId::Cvv).hint_text, "CVV must be 3 digits");
        assert!(surface.field(FieldId::Cvv).hint_visible);
    }

    #[test]
    fn mark_valid_clears_invalid_and_hides_hint() {
        let mut surface = MemorySurface::new();
        surface.apply(&Directive::Feedback(FeedbackDirective::MarkInvalid(
            FieldId::Name,
            Some("field cannot be empty".to_string()),
        )));

        surface.apply(&Directive::Feedback(FeedbackDirective::MarkValid(FieldId::Name)));

        let view = surface.field(FieldId::Name);
        assert_eq!(view.class, ValidityClass::Valid);
        assert!(!view.hint_visible);
    }

    #[test]
    fn feedback_is_idempotent() {
        let directive = Directive::Feedback(FeedbackDirective::MarkInvalid(
            FieldId::Email,
            Some("bad".to_string()),
        ));
        let mut once = MemorySurface::new();
        once.apply(&directive);
        let mut twice = once.clone();

        twice.apply(&directive);

        assert_eq!(once, twice);
    }

    #[test]
    fn color_reset_is_idempotent_and_clears_the_choice() {
        let mut once = MemorySurface::new();
        once.apply(&Directive::SelectColor("gold".to_string()));
        assert_eq!(once.color_selected.as_deref(), Some("gold"));

        once.apply(&Directive::ResetColorSelection);
        let mut twice = once.clone();
        twice.apply(&Directive::ResetColorSelection);

        assert_eq!(once.color_selected, None);
        assert_eq!(once, twice);
    }

    #[test]
    fn reset_keeps_activity_order_but_clears_state() {
        let mut surface = MemorySurface::new();
        surface.apply(&Directive::SetActivityChecked {
            id: "node".to_string(),
            checked: true,
        });
        surface.apply(&Directive::SetActivityEnabled {
            id: "express".to_string(),
            enabled: false,
        });

        surface.apply(&Directive::ResetForm);

        assert_eq!(surface.activities.len(), 2);
        assert_eq!(surface.activity("node").map(|a| a.checked), Some(false));
        assert_eq!(surface.activity("express").map(|a| a.enabled), Some(true));
    }
}
