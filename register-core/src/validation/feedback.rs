use serde::{Deserialize, Serialize};

use super::Validation;
use crate::models::FieldId;

/// Inline feedback for one validated field.
///
/// `MarkInvalid` with `None` keeps whatever hint text the page already shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackDirective {
    MarkValid(FieldId),
    MarkInvalid(FieldId, Option<String>),
}

impl FeedbackDirective {
    /// Maps a validator result onto exactly one directive.
    pub fn from_validation(
        field: FieldId,
        validation: &Validation,
    ) -> Self {
        match validation {
            Ok(()) => Self::MarkValid(field),
            Err(error) => Self::MarkInvalid(field, Some(error.to_string())),
        }
    }

    pub fn field(&self) -> FieldId {
        match self {
            Self::MarkValid(field) | Self::MarkInvalid(field, _) => *field,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::MarkValid(_))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn valid_result_marks_field_valid() {
        let directive = FeedbackDirective::from_validation(FieldId::Zip, &Ok(()));

        assert_eq!(directive, FeedbackDirective::MarkValid(FieldId::Zip));
        assert!(directive.is_valid());
    }

    #[test]
    fn error_message_becomes_hint_text() {
        let directive =
            FeedbackDirective::from_validation(FieldId::Name, &Err(ValidationError::Whitespace));

        assert_eq!(
            directive,
            FeedbackDirective::MarkInvalid(
                FieldId::Name,
                Some("field cannot be all whitespace".to_string())
            )
        );
        assert_eq!(directive.field(), FieldId::Name);
    }
}
