use serde::{Deserialize, Serialize};

use crate::models::{FieldId, JobRole, PaymentMethod, TextField, TshirtDesign};

/// Everything the page can report to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormEvent {
    PageLoad,
    Input {
        field: TextField,
        value: String,
    },
    /// Focus left a validated field.
    Blur {
        field: FieldId,
    },
    JobRoleChanged(JobRole),
    DesignChanged(TshirtDesign),
    /// `None` is the color select's prompt option.
    ColorChanged(Option<String>),
    PaymentChanged(PaymentMethod),
    ExpMonthChanged(Option<u32>),
    ExpYearChanged(Option<u32>),
    ActivityToggled {
        id: String,
        checked: bool,
    },
    ActivityFocus {
        id: String,
        focused: bool,
    },
    Submit,
}
