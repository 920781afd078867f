pub mod engine;
pub mod models;
pub mod surface;
pub mod validation;

pub use engine::{FormController, FormEvent, FormState, SubmitOutcome};
pub use models::*;
pub use surface::{Directive, FormSurface, MemorySurface, Section, ValidityClass};
pub use validation::{FeedbackDirective, ValidationError};
