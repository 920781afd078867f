//! Form state and the event dispatch that drives it.
//!
//! [`FormState::handle_event`] is pure: it returns the next state together
//! with the directives that bring the page in line with it. Applying those
//! directives to a surface is a separate step (see
//! [`FormController`](super::FormController)).

use std::sync::Arc;

use tracing::{debug, warn};

use super::accumulator::{Activities, ToggleOutcome};
use super::event::FormEvent;
use super::submit::{self, SubmitOutcome};
use super::visibility::{Visibility, VisibilityController};
use crate::models::{
    CreditCardFields, FieldId, FieldState, FormDefinition, JobRole, Registration, SelectionState,
    TextField,
};
use crate::surface::Directive;
use crate::validation::{
    FeedbackDirective, Validation, validate_activities, validate_card_number, validate_cvv,
    validate_email, validate_name, validate_selected, validate_zip,
};

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: FormState,
    pub directives: Vec<Directive>,
    /// Set only for [`FormEvent::Submit`].
    pub outcome: Option<SubmitOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    definition: Arc<FormDefinition>,
    /// Indexed by `FieldId as usize`, in [`FieldId::ALL`] order.
    fields: [FieldState; 8],
    other_job_role: String,
    selection: SelectionState,
    activities: Activities,
    card: CreditCardFields,
    focused_activity: Option<String>,
}

impl FormState {
    /// State right after page load: every field empty and unchecked, default
    /// selections, nothing selected, total zero.
    pub fn new(definition: Arc<FormDefinition>) -> Self {
        let activities = Activities::new(definition.activities());
        Self {
            definition,
            fields: FieldId::ALL.map(FieldState::new),
            other_job_role: String::new(),
            selection: SelectionState::default(),
            activities,
            card: CreditCardFields::default(),
            focused_activity: None,
        }
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn field(
        &self,
        field: FieldId,
    ) -> &FieldState {
        &self.fields[field as usize]
    }

    pub fn other_job_role(&self) -> &str {
        &self.other_job_role
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn activities(&self) -> &Activities {
        &self.activities
    }

    pub fn credit_card(&self) -> &CreditCardFields {
        &self.card
    }

    pub fn focused_activity(&self) -> Option<&str> {
        self.focused_activity.as_deref()
    }

    pub fn visibility(&self) -> Visibility {
        VisibilityController::new(&self.definition).derive(&self.selection)
    }

    /// Runs the validator of `field` against the current values without
    /// touching any state.
    pub fn validate(
        &self,
        field: FieldId,
    ) -> Validation {
        match field {
            FieldId::Name => validate_name(&self.field(FieldId::Name).raw_value),
            FieldId::Email => validate_email(&self.field(FieldId::Email).raw_value),
            FieldId::Activities => validate_activities(self.activities.items()),
            FieldId::CardNumber => validate_card_number(&self.card.number),
            FieldId::Zip => validate_zip(&self.card.zip),
            FieldId::Cvv => validate_cvv(&self.card.cvv),
            FieldId::ExpMonth => validate_selected(self.card.exp_month.as_ref()),
            FieldId::ExpYear => validate_selected(self.card.exp_year.as_ref()),
        }
    }

    /// Dispatches `event` and returns the next state. `self` is not modified.
    pub fn handle_event(
        &self,
        event: &FormEvent,
    ) -> Transition {
        let mut state = self.clone();
        let (directives, outcome) = state.apply(event);
        debug!(?event, directives = directives.len(), "dispatched form event");
        Transition {
            state,
            directives,
            outcome,
        }
    }

    /// Directives that render a freshly loaded form.
    pub fn load_directives(&self) -> Vec<Directive> {
        let mut directives = vec![Directive::ResetForm, Directive::Focus(TextField::Name)];
        directives.extend(VisibilityController::new(&self.definition).initial());
        for item in self.activities.items() {
            directives.push(Directive::SetActivityChecked {
                id: item.id.clone(),
                checked: false,
            });
            directives.push(Directive::SetActivityEnabled {
                id: item.id.clone(),
                enabled: true,
            });
        }
        directives.push(Directive::SetTotal(self.activities.total()));
        directives
    }

    /// Collects the values a successful submission hands on.
    pub fn registration(&self) -> Registration {
        let other_job_role = (self.selection.job_role == JobRole::Other)
            .then(|| self.other_job_role.trim().to_string())
            .filter(|role| !role.is_empty());

        Registration {
            name: self.field(FieldId::Name).raw_value.trim().to_string(),
            email: self.field(FieldId::Email).raw_value.clone(),
            job_role: self.selection.job_role,
            other_job_role,
            tshirt_design: self.selection.tshirt_design,
            tshirt_color: self.selection.tshirt_color.clone(),
            activities: self.activities.selected_ids(),
            total: self.activities.total(),
            payment_method: self.selection.payment_method,
        }
    }

    /// Back to page-load state, keeping the definition.
    pub(crate) fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.definition));
    }

    /// Runs the validator of `field`, records the result and returns the
    /// matching feedback.
    pub(crate) fn run_validator(
        &mut self,
        field: FieldId,
    ) -> FeedbackDirective {
        let validation = self.validate(field);
        let state = &mut self.fields[field as usize];
        state.is_valid = validation.is_ok();
        state.error_message = validation.as_ref().err().map(ToString::to_string);
        state.checked = true;
        FeedbackDirective::from_validation(field, &validation)
    }

    fn apply(
        &mut self,
        event: &FormEvent,
    ) -> (Vec<Directive>, Option<SubmitOutcome>) {
        let directives = match event {
            FormEvent::PageLoad => {
                self.reset();
                self.load_directives()
            }
            FormEvent::Input { field, value } => {
                self.set_text(*field, value);
                field
                    .validated_field()
                    .map(|id| vec![Directive::Feedback(self.run_validator(id))])
                    .unwrap_or_default()
            }
            FormEvent::Blur { field } => vec![Directive::Feedback(self.run_validator(*field))],
            FormEvent::JobRoleChanged(role) => {
                VisibilityController::new(&self.definition)
                    .job_role_changed(&mut self.selection, *role)
            }
            FormEvent::DesignChanged(design) => {
                VisibilityController::new(&self.definition)
                    .design_changed(&mut self.selection, *design)
            }
            FormEvent::ColorChanged(color) => {
                match VisibilityController::new(&self.definition)
                    .color_changed(&mut self.selection, color.as_deref())
                {
                    Ok(()) => vec![match color {
                        Some(value) => Directive::SelectColor(value.clone()),
                        None => Directive::ResetColorSelection,
                    }],
                    Err(error) => {
                        warn!(%error, "color choice rejected");
                        vec![Directive::ResetColorSelection]
                    }
                }
            }
            FormEvent::PaymentChanged(method) => {
                VisibilityController::new(&self.definition)
                    .payment_changed(&mut self.selection, *method)
            }
            FormEvent::ExpMonthChanged(month) => {
                self.card.exp_month = *month;
                self.fields[FieldId::ExpMonth as usize].raw_value = option_text(*month);
                vec![Directive::Feedback(self.run_validator(FieldId::ExpMonth))]
            }
            FormEvent::ExpYearChanged(year) => {
                self.card.exp_year = *year;
                self.fields[FieldId::ExpYear as usize].raw_value = option_text(*year);
                vec![Directive::Feedback(self.run_validator(FieldId::ExpYear))]
            }
            FormEvent::ActivityToggled { id, checked } => self.toggle_activity(id, *checked),
            FormEvent::ActivityFocus { id, focused } => self.focus_activity(id, *focused),
            FormEvent::Submit => {
                let (directives, outcome) = submit::run(self);
                return (directives, Some(outcome));
            }
        };

        (directives, None)
    }

    fn set_text(
        &mut self,
        field: TextField,
        value: &str,
    ) {
        match field {
            TextField::OtherJobRole => self.other_job_role = value.to_string(),
            TextField::CardNumber => self.card.number = value.to_string(),
            TextField::Zip => self.card.zip = value.to_string(),
            TextField::Cvv => self.card.cvv = value.to_string(),
            TextField::Name | TextField::Email => {}
        }
        if let Some(id) = field.validated_field() {
            self.fields[id as usize].raw_value = value.to_string();
        }
    }

    fn toggle_activity(
        &mut self,
        id: &str,
        checked: bool,
    ) -> Vec<Directive> {
        let changes = match self.activities.toggle(id, checked) {
            Ok(ToggleOutcome::Applied(changes)) => changes,
            Ok(ToggleOutcome::Unchanged) => return Vec::new(),
            Ok(ToggleOutcome::Rejected) => {
                warn!(activity = id, "activity is locked by a conflicting time slot");
                return vec![Directive::SetActivityChecked {
                    id: id.to_string(),
                    checked: false,
                }];
            }
            Err(error) => {
                warn!(%error, "ignoring activity toggle");
                return Vec::new();
            }
        };

        // Echo the toggled box so surfaces that did not originate the click agree.
        let mut directives = vec![Directive::SetActivityChecked {
            id: id.to_string(),
            checked,
        }];
        for id in changes.unchecked {
            directives.push(Directive::SetActivityChecked { id, checked: false });
        }
        for id in changes.disabled {
            directives.push(Directive::SetActivityEnabled { id, enabled: false });
        }
        for id in changes.enabled {
            directives.push(Directive::SetActivityEnabled { id, enabled: true });
        }
        directives.push(Directive::SetTotal(self.activities.total()));

        self.fields[FieldId::Activities as usize].raw_value =
            self.activities.selected_ids().join(",");
        directives.push(Directive::Feedback(self.run_validator(FieldId::Activities)));
        directives
    }

    fn focus_activity(
        &mut self,
        id: &str,
        focused: bool,
    ) -> Vec<Directive> {
        if self.activities.item(id).is_none() {
            warn!(activity = id, "ignoring focus change for unknown activity");
            return Vec::new();
        }

        if focused {
            self.focused_activity = Some(id.to_string());
        } else if self.focused_activity.as_deref() == Some(id) {
            self.focused_activity = None;
        }
        vec![Directive::SetActivityFocus {
            id: id.to_string(),
            focused,
        }]
    }
}

fn option_text(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
