use register_core::{Directive, FormSurface};
use tracing::trace;

/// Forwards every directive to the wrapped surface and logs it at `trace`.
#[derive(Debug, Default)]
pub struct TraceSurface<S> {
    inner: S,
    applied: usize,
}

impl<S> TraceSurface<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, applied: 0 }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Number of directives applied so far.
    pub fn applied(&self) -> usize {
        self.applied
    }
}

impl<S: FormSurface> FormSurface for TraceSurface<S> {
    fn apply(
        &mut self,
        directive: &Directive,
    ) {
        self.applied += 1;
        trace!(seq = self.applied, ?directive, "apply");
        self.inner.apply(directive);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use register_core::MemorySurface;

    use super::*;

    #[test]
    fn forwards_and_counts() {
        let mut surface = TraceSurface::new(MemorySurface::new());

        surface.apply_all(&[Directive::SetTotal(120), Directive::SetColorSelectEnabled(false)]);

        assert_eq!(surface.applied(), 2);
        assert_eq!(surface.inner().total_text, "Total: $120");
        assert!(!surface.inner().color_select_enabled);
    }
}
