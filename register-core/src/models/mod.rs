mod activity;
mod credit_card;
mod definition;
mod field;
mod registration;
mod selection;

pub use activity::{ActivityDefinition, ActivityItem};
pub use credit_card::CreditCardFields;
pub use definition::{DefinitionError, FormDefinition, ShirtColor};
pub use field::{FieldId, FieldState, TextField};
pub use registration::Registration;
pub use selection::{JobRole, PaymentMethod, SelectionState, TshirtDesign};
