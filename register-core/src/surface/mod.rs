//! The page boundary: directives the engine emits and the trait that applies them.

pub mod directive;
pub mod memory;

pub use directive::{Directive, Section};
pub use memory::{ActivityView, FieldView, MemorySurface, ValidityClass, default_hint};

/// Anything that can carry out [`Directive`]s: a DOM binding, a terminal
/// renderer, or the in-memory model used by tests.
///
/// Applying the same directive twice must leave the surface unchanged.
pub trait FormSurface {
    fn apply(
        &mut self,
        directive: &Directive,
    );

    fn apply_all(
        &mut self,
        directives: &[Directive],
    ) {
        for directive in directives {
            self.apply(directive);
        }
    }
}

impl<S: FormSurface + ?Sized> FormSurface for &mut S {
    fn apply(
        &mut self,
        directive: &Directive,
    ) {
        (**self).apply(directive);
    }
}
