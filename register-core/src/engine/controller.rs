use std::sync::Arc;

use super::event::FormEvent;
use super::state::FormState;
use super::submit::SubmitOutcome;
use crate::models::FormDefinition;
use crate::surface::FormSurface;

/// Owns the form state for one page and applies every transition to a surface.
///
/// Typical lifetime:
/// 1. Create with `FormController::new(definition, surface)`.
/// 2. Call `load` once the page is ready.
/// 3. Call `dispatch` for every event the page reports.
pub struct FormController<S> {
    state: FormState,
    surface: S,
    last_outcome: Option<SubmitOutcome>,
}

impl<S: FormSurface> FormController<S> {
    /// Creates a controller in page-load state. Nothing is written to the
    /// surface until [`load`](Self::load) is called.
    pub fn new(
        definition: impl Into<Arc<FormDefinition>>,
        surface: S,
    ) -> Self {
        Self {
            state: FormState::new(definition.into()),
            surface,
            last_outcome: None,
        }
    }

    /// Applies the page-load defaults to the state and the surface.
    pub fn load(&mut self) {
        self.dispatch(&FormEvent::PageLoad);
    }

    /// Discards everything the user entered. Same as a fresh page load.
    pub fn reset(&mut self) {
        self.last_outcome = None;
        self.load();
    }

    /// Runs `event` through the state machine and renders the result.
    ///
    /// Returns the submission outcome for [`FormEvent::Submit`], `None` for
    /// every other event.
    pub fn dispatch(
        &mut self,
        event: &FormEvent,
    ) -> Option<SubmitOutcome> {
        let transition = self.state.handle_event(event);
        self.surface.apply_all(&transition.directives);
        self.state = transition.state;

        if let Some(outcome) = &transition.outcome {
            self.last_outcome = Some(outcome.clone());
        }
        transition.outcome
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Outcome of the most recent submission attempt, if any.
    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }
}
