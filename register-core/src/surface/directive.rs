use serde::{Deserialize, Serialize};

use crate::models::{PaymentMethod, TextField};
use crate::validation::FeedbackDirective;

/// Sections of the page that can be shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    OtherJobRole,
    Payment(PaymentMethod),
}

impl Section {
    pub fn id(&self) -> &'static str {
        match self {
            Self::OtherJobRole => "other-job-role",
            Self::Payment(method) => method.as_str(),
        }
    }
}

/// A single write to the page. The engine only describes changes; a
/// [`FormSurface`](super::FormSurface) carries them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// Return every control to its markup default.
    ResetForm,
    Feedback(FeedbackDirective),
    SetSectionVisible {
        section: Section,
        visible: bool,
    },
    SetColorSelectEnabled(bool),
    SetColorOptionVisible {
        value: String,
        visible: bool,
    },
    /// Put the color select back on its prompt option.
    ResetColorSelection,
    /// Put the color select on `value`.
    SelectColor(String),
    SelectPaymentMethod(PaymentMethod),
    SetActivityEnabled {
        id: String,
        enabled: bool,
    },
    SetActivityChecked {
        id: String,
        checked: bool,
    },
    SetActivityFocus {
        id: String,
        focused: bool,
    },
    SetTotal(u32),
    Focus(TextField),
}

impl From<FeedbackDirective> for Directive {
    fn from(feedback: FeedbackDirective) -> Self {
        Self::Feedback(feedback)
    }
}
