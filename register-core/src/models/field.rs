use serde::{Deserialize, Serialize};

/// Fields that carry a validator, identified by the id of their element on
/// the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldId {
    Name,
    Email,
    Activities,
    CardNumber,
    Zip,
    Cvv,
    ExpMonth,
    ExpYear,
}

impl FieldId {
    /// Every validated field, in page order.
    pub const ALL: [FieldId; 8] = [
        Self::Name,
        Self::Email,
        Self::Activities,
        Self::CardNumber,
        Self::Zip,
        Self::Cvv,
        Self::ExpMonth,
        Self::ExpYear,
    ];

    /// The credit card fields, validated only when paying by card.
    pub const CREDIT_CARD: [FieldId; 5] = [
        Self::CardNumber,
        Self::Zip,
        Self::Cvv,
        Self::ExpMonth,
        Self::ExpYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Activities => "activities-box",
            Self::CardNumber => "cc-num",
            Self::Zip => "zip",
            Self::Cvv => "cvv",
            Self::ExpMonth => "exp-month",
            Self::ExpYear => "exp-year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "activities-box" | "activities" => Some(Self::Activities),
            "cc-num" => Some(Self::CardNumber),
            "zip" => Some(Self::Zip),
            "cvv" => Some(Self::Cvv),
            "exp-month" => Some(Self::ExpMonth),
            "exp-year" => Some(Self::ExpYear),
            _ => None,
        }
    }

    pub fn is_credit_card(&self) -> bool {
        Self::CREDIT_CARD.contains(self)
    }
}

/// Free-text inputs the user types into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextField {
    Name,
    Email,
    OtherJobRole,
    CardNumber,
    Zip,
    Cvv,
}

impl TextField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::OtherJobRole => "other-job-role",
            Self::CardNumber => "cc-num",
            Self::Zip => "zip",
            Self::Cvv => "cvv",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "other-job-role" => Some(Self::OtherJobRole),
            "cc-num" => Some(Self::CardNumber),
            "zip" => Some(Self::Zip),
            "cvv" => Some(Self::Cvv),
            _ => None,
        }
    }

    /// The validated field backing this input, if it has a validator.
    pub fn validated_field(&self) -> Option<FieldId> {
        match self {
            Self::Name => Some(FieldId::Name),
            Self::Email => Some(FieldId::Email),
            Self::OtherJobRole => None,
            Self::CardNumber => Some(FieldId::CardNumber),
            Self::Zip => Some(FieldId::Zip),
            Self::Cvv => Some(FieldId::Cvv),
        }
    }
}

/// Validity bookkeeping for one field.
///
/// `checked` stays false until a validator has run since the last reset, so an
/// untouched field carries neither the valid nor the invalid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub field: FieldId,
    pub raw_value: String,
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub checked: bool,
}

impl FieldState {
    pub fn new(field: FieldId) -> Self {
        Self {
            field,
            raw_value: String::new(),
            is_valid: false,
            error_message: None,
            checked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn field_ids_round_trip_through_their_element_ids() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::parse(field.as_str()), Some(field));
        }
    }

    #[test]
    fn other_job_role_has_no_validator() {
        assert_eq!(TextField::OtherJobRole.validated_field(), None);
        assert_eq!(TextField::Zip.validated_field(), Some(FieldId::Zip));
    }

    #[test]
    fn credit_card_fields_are_flagged() {
        assert!(FieldId::Cvv.is_credit_card());
        assert!(FieldId::ExpYear.is_credit_card());
        assert!(!FieldId::Email.is_credit_card());
        assert!(!FieldId::Activities.is_credit_card());
    }
}
