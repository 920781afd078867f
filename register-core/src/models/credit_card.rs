use serde::{Deserialize, Serialize};

/// Credit card inputs. Expiration selects hold `None` while the prompt
/// option is selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreditCardFields {
    pub number: String,
    pub zip: String,
    pub cvv: String,
    pub exp_month: Option<u32>,
    pub exp_year: Option<u32>,
}
