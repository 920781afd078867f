//! Field validation and the feedback it drives.

pub mod feedback;
pub mod validators;

pub use feedback::FeedbackDirective;
pub use validators::{
    Validation, ValidationError, validate_activities, validate_card_number, validate_cvv,
    validate_email, validate_name, validate_selected, validate_zip,
};
