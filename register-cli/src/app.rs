use std::io::Write;

use anyhow::{Context, Result};
use register_core::{FormController, FormDefinition, FormEvent, MemorySurface, SubmitOutcome};
use register_data::{CatalogLoader, default_definition};
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::surface::TraceSurface;

/// Loads the configured catalog, or the bundled one when none is configured.
pub fn build_definition(catalog: &CatalogConfig) -> Result<FormDefinition> {
    match catalog.paths()? {
        Some((activities, colors)) => {
            debug!(activities = %activities.display(), colors = %colors.display(), "loading catalog");
            CatalogLoader::load_files(activities, colors).with_context(|| {
                format!(
                    "Failed to load catalog: {} / {}",
                    activities.display(),
                    colors.display()
                )
            })
        }
        None => default_definition().context("Bundled catalog is invalid"),
    }
}

/// What a replayed session left behind.
#[derive(Debug)]
pub struct Replay {
    /// Every submission outcome, in order.
    pub outcomes: Vec<SubmitOutcome>,
    pub surface: MemorySurface,
    pub directives: usize,
}

impl Replay {
    /// True when the last submit in the session was cancelled.
    pub fn last_submission_cancelled(&self) -> bool {
        matches!(self.outcomes.last(), Some(SubmitOutcome::Cancelled { .. }))
    }
}

/// Loads the page, then feeds `events` through a controller, writing
/// submission outcomes (and page snapshots when `snapshot_each` is set) to
/// `out`. The final page is always written.
pub fn replay<W: Write>(
    definition: FormDefinition,
    events: &[FormEvent],
    snapshot_each: bool,
    out: &mut W,
) -> Result<Replay> {
    let mut form = FormController::new(definition, TraceSurface::new(MemorySurface::new()));
    form.load();

    let mut outcomes = Vec::new();
    for (idx, event) in events.iter().enumerate() {
        if let Some(outcome) = form.dispatch(event) {
            write_outcome(out, idx + 1, &outcome)?;
            outcomes.push(outcome);
        }
        if snapshot_each {
            writeln!(out, "== after #{} {event:?} ==", idx + 1)?;
            write!(out, "{}", form.surface().inner())?;
        }
    }

    let surface = form.into_surface();
    info!(
        events = events.len(),
        directives = surface.applied(),
        submissions = outcomes.len(),
        "replay finished"
    );

    let directives = surface.applied();
    let surface = surface.into_inner();
    writeln!(out, "== final page ==")?;
    write!(out, "{surface}")?;

    Ok(Replay {
        outcomes,
        surface,
        directives,
    })
}

fn write_outcome<W: Write>(
    out: &mut W,
    seq: usize,
    outcome: &SubmitOutcome,
) -> Result<()> {
    match outcome {
        SubmitOutcome::Accepted(registration) => {
            writeln!(out, "== #{seq} submission accepted ==")?;
            write!(out, "{registration}")?;
        }
        SubmitOutcome::Cancelled { invalid } => {
            let fields: Vec<_> = invalid.iter().map(|field| field.as_str()).collect();
            writeln!(
                out,
                "== #{seq} submission cancelled: {} ==",
                fields.join(", ")
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use register_core::{FieldId, PaymentMethod, TextField};

    use super::*;

    fn bundled() -> FormDefinition {
        build_definition(&CatalogConfig::default()).unwrap()
    }

    #[test]
    fn empty_session_prints_the_loaded_page() {
        let mut out = Vec::new();

        let replay = replay(bundled(), &[], false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("== final page =="));
        assert!(text.contains("Total: $0"));
        assert!(replay.outcomes.is_empty());
        assert!(!replay.last_submission_cancelled());
        assert!(replay.directives > 0);
    }

    #[test]
    fn cancelled_submit_lists_failing_fields() {
        let events = [
            FormEvent::PaymentChanged(PaymentMethod::Paypal),
            FormEvent::Input {
                field: TextField::Email,
                value: "ada@example.com".to_string(),
            },
            FormEvent::Submit,
        ];
        let mut out = Vec::new();

        let replay = replay(bundled(), &events, false, &mut out).unwrap();

        assert_eq!(
            replay.outcomes,
            vec![SubmitOutcome::Cancelled {
                invalid: vec![FieldId::Name, FieldId::Activities],
            }]
        );
        assert!(replay.last_submission_cancelled());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("== #3 submission cancelled: name, activities-box =="));
    }

    #[test]
    fn snapshot_each_writes_one_block_per_event() {
        let events = [FormEvent::ActivityToggled {
            id: "all".to_string(),
            checked: true,
        }];
        let mut out = Vec::new();

        replay(bundled(), &events, true, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("== after #").count(), 1);
        assert_eq!(text.matches("Total: $200").count(), 2);
    }
}
