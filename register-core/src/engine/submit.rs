//! Submission gate.
//!
//! Name, email and activities are always checked; the credit card fields
//! only when paying by card. Every checked field gets its feedback before the
//! verdict, so the user sees all failing fields at once.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::state::FormState;
use crate::models::{FieldId, PaymentMethod, Registration};
use crate::surface::Directive;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    Accepted(Registration),
    /// The submission is dropped; `invalid` lists the failing fields in the
    /// order they were checked.
    Cancelled { invalid: Vec<FieldId> },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Fields the gate validates for the given payment method, in check order.
pub fn gated_fields(method: PaymentMethod) -> Vec<FieldId> {
    let mut fields = vec![FieldId::Name, FieldId::Email, FieldId::Activities];
    if method == PaymentMethod::CreditCard {
        fields.extend(FieldId::CREDIT_CARD);
    }
    fields
}

/// Validates every gated field. On success the registration is collected and
/// the form goes back to its page-load state.
pub(super) fn run(state: &mut FormState) -> (Vec<Directive>, SubmitOutcome) {
    let mut directives = Vec::new();
    let mut invalid = Vec::new();

    for field in gated_fields(state.selection().payment_method) {
        let feedback = state.run_validator(field);
        if !feedback.is_valid() {
            invalid.push(field);
        }
        directives.push(Directive::Feedback(feedback));
    }

    if !invalid.is_empty() {
        info!(?invalid, "submission cancelled");
        return (directives, SubmitOutcome::Cancelled { invalid });
    }

    let registration = state.registration();
    info!(
        total = registration.total,
        activities = registration.activities.len(),
        payment = registration.payment_method.as_str(),
        "registration accepted"
    );

    state.reset();
    directives.extend(state.load_directives());
    (directives, SubmitOutcome::Accepted(registration))
}
