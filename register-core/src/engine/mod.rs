//! The form engine: cost accumulation, visibility, event dispatch and the
//! submission gate.

pub mod accumulator;
pub mod controller;
pub mod event;
pub mod state;
pub mod submit;
pub mod visibility;

pub use accumulator::{Activities, ActivityError, SlotChanges, ToggleOutcome};
pub use controller::FormController;
pub use event::FormEvent;
pub use state::{FormState, Transition};
pub use submit::{SubmitOutcome, gated_fields};
pub use visibility::{Visibility, VisibilityController, VisibilityError};
