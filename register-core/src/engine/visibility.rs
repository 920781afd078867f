//! Which optional parts of the form are shown.
//!
//! Visibility is a function of the current [`SelectionState`] alone. Each
//! change method updates the selection and returns the directives that bring
//! the page in line with it.

use thiserror::Error;

use crate::models::{FormDefinition, JobRole, PaymentMethod, SelectionState, TshirtDesign};
use crate::surface::{Directive, Section};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VisibilityError {
    #[error("color '{color}' is not offered for the selected design")]
    ColorNotInDesign { color: String },
}

/// Snapshot of everything the controller decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    pub other_job_role: bool,
    pub color_select_enabled: bool,
    pub visible_colors: Vec<String>,
    pub payment_section: PaymentMethod,
}

impl Visibility {
    pub fn is_visible(
        &self,
        section: Section,
    ) -> bool {
        match section {
            Section::OtherJobRole => self.other_job_role,
            Section::Payment(method) => method == self.payment_section,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VisibilityController<'a> {
    definition: &'a FormDefinition,
}

impl<'a> VisibilityController<'a> {
    pub fn new(definition: &'a FormDefinition) -> Self {
        Self { definition }
    }

    /// Derives visibility from the selection.
    pub fn derive(
        &self,
        selection: &SelectionState,
    ) -> Visibility {
        let visible_colors = match selection.tshirt_design {
            Some(design) => self
                .definition
                .colors_for(design)
                .map(|color| color.value.clone())
                .collect(),
            None => Vec::new(),
        };

        Visibility {
            other_job_role: selection.job_role == JobRole::Other,
            color_select_enabled: selection.tshirt_design.is_some(),
            visible_colors,
            payment_section: selection.payment_method,
        }
    }

    /// Page-load directives: other role hidden, color select disabled,
    /// credit card selected and shown alone.
    pub fn initial(&self) -> Vec<Directive> {
        let mut directives = vec![
            Directive::SetSectionVisible {
                section: Section::OtherJobRole,
                visible: false,
            },
            Directive::SetColorSelectEnabled(false),
            Directive::SelectPaymentMethod(PaymentMethod::CreditCard),
        ];
        directives.extend(Self::payment_sections(PaymentMethod::CreditCard));
        directives
    }

    pub fn job_role_changed(
        &self,
        selection: &mut SelectionState,
        role: JobRole,
    ) -> Vec<Directive> {
        selection.job_role = role;
        vec![Directive::SetSectionVisible {
            section: Section::OtherJobRole,
            visible: role == JobRole::Other,
        }]
    }

    /// Enables the color select, filters it to `design` and puts it back on
    /// the prompt option, even when the design did not actually change.
    pub fn design_changed(
        &self,
        selection: &mut SelectionState,
        design: TshirtDesign,
    ) -> Vec<Directive> {
        selection.tshirt_design = Some(design);
        selection.tshirt_color = None;

        let mut directives = vec![Directive::SetColorSelectEnabled(true)];
        directives.extend(self.definition.shirt_colors().iter().map(|color| {
            Directive::SetColorOptionVisible {
                value: color.value.clone(),
                visible: color.design == design,
            }
        }));
        directives.push(Directive::ResetColorSelection);
        directives
    }

    /// Records a color choice. `None` is the prompt option.
    ///
    /// # Errors
    ///
    /// Returns [`VisibilityError::ColorNotInDesign`] when the color is unknown
    /// or tagged with another design; the selection is left unset.
    pub fn color_changed(
        &self,
        selection: &mut SelectionState,
        color: Option<&str>,
    ) -> Result<(), VisibilityError> {
        let Some(value) = color else {
            selection.tshirt_color = None;
            return Ok(());
        };

        let offered = self
            .definition
            .color(value)
            .is_some_and(|c| Some(c.design) == selection.tshirt_design);
        if offered {
            selection.tshirt_color = Some(value.to_string());
            Ok(())
        } else {
            selection.tshirt_color = None;
            Err(VisibilityError::ColorNotInDesign {
                color: value.to_string(),
            })
        }
    }

    /// Shows only the section of `method`. Depends on nothing but `method`.
    pub fn payment_changed(
        &self,
        selection: &mut SelectionState,
        method: PaymentMethod,
    ) -> Vec<Directive> {
        selection.payment_method = method;
        Self::payment_sections(method).collect()
    }

    fn payment_sections(method: PaymentMethod) -> impl Iterator<Item = Directive> {
        PaymentMethod::all()
            .iter()
            .map(move |candidate| Directive::SetSectionVisible {
                section: Section::Payment(*candidate),
                visible: *candidate == method,
            })
    }
}
