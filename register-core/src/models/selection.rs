use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JobRole {
    #[default]
    FullStackJsDeveloper,
    FrontEndDeveloper,
    BackEndDeveloper,
    Designer,
    Student,
    Other,
}

impl JobRole {
    pub fn all() -> &'static [JobRole] {
        &[
            JobRole::FullStackJsDeveloper,
            JobRole::FrontEndDeveloper,
            JobRole::BackEndDeveloper,
            JobRole::Designer,
            JobRole::Student,
            JobRole::Other,
        ]
    }

    /// Option value used by the job role select.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullStackJsDeveloper => "full-stack js developer",
            Self::FrontEndDeveloper => "front-end developer",
            Self::BackEndDeveloper => "back-end developer",
            Self::Designer => "designer",
            Self::Student => "student",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|role| role.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullStackJsDeveloper => "Full Stack JavaScript Developer",
            Self::FrontEndDeveloper => "Front End Developer",
            Self::BackEndDeveloper => "Back End Developer",
            Self::Designer => "Designer",
            Self::Student => "Student",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TshirtDesign {
    JsPuns,
    HeartJs,
}

impl TshirtDesign {
    pub fn all() -> &'static [TshirtDesign] {
        &[TshirtDesign::JsPuns, TshirtDesign::HeartJs]
    }

    /// Option value of the design select, also used as the color options' theme tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JsPuns => "js puns",
            Self::HeartJs => "heart js",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "js puns" => Some(Self::JsPuns),
            "heart js" => Some(Self::HeartJs),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::JsPuns => "Theme - JS Puns",
            Self::HeartJs => "Theme - I \u{2665} JS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    Bitcoin,
}

impl PaymentMethod {
    pub fn all() -> &'static [PaymentMethod] {
        &[
            PaymentMethod::CreditCard,
            PaymentMethod::Paypal,
            PaymentMethod::Bitcoin,
        ]
    }

    /// Option value of the payment select; also the id of the matching section.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::Paypal => "paypal",
            Self::Bitcoin => "bitcoin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "credit-card" => Some(Self::CreditCard),
            "paypal" => Some(Self::Paypal),
            "bitcoin" => Some(Self::Bitcoin),
            _ => None,
        }
    }
}

/// Discrete selections that drive section visibility.
///
/// `tshirt_color` is always a color tagged with `tshirt_design`, or unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub job_role: JobRole,
    pub tshirt_design: Option<TshirtDesign>,
    pub tshirt_color: Option<String>,
    pub payment_method: PaymentMethod,
}
