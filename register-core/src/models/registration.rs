use std::fmt;

use serde::{Deserialize, Serialize};

use super::{JobRole, PaymentMethod, TshirtDesign};

/// Values collected from an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub job_role: JobRole,
    /// Free-text role, only kept when `job_role` is [`JobRole::Other`].
    pub other_job_role: Option<String>,
    pub tshirt_design: Option<TshirtDesign>,
    pub tshirt_color: Option<String>,
    /// Ids of the counted activities, in definition order.
    pub activities: Vec<String>,
    pub total: u32,
    pub payment_method: PaymentMethod,
}

impl fmt::Display for Registration {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Name:       {}", self.name)?;
        writeln!(f, "Email:      {}", self.email)?;
        match &self.other_job_role {
            Some(role) => writeln!(f, "Job role:   {} ({role})", self.job_role.label())?,
            None => writeln!(f, "Job role:   {}", self.job_role.label())?,
        }
        match (&self.tshirt_design, &self.tshirt_color) {
            (Some(design), Some(color)) => writeln!(f, "T-shirt:    {} / {color}", design.label())?,
            (Some(design), None) => writeln!(f, "T-shirt:    {}", design.label())?,
            _ => writeln!(f, "T-shirt:    none")?,
        }
        writeln!(f, "Activities: {}", self.activities.join(", "))?;
        writeln!(f, "Total:      ${}", self.total)?;
        writeln!(f, "Payment:    {}", self.payment_method.as_str())
    }
}
