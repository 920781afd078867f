//! Event scripts: a CSV transcript of what a user did on the page.
//!
//! | Column   | Notes |
//! |----------|-------|
//! | `event`  | `load`, `input`, `blur`, `role`, `design`, `color`, `payment`, `exp-month`, `exp-year`, `toggle`, `focus`, `submit` |
//! | `target` | field id for `input`/`blur`, activity id for `toggle`/`focus`, empty otherwise |
//! | `value`  | typed text, option value, or `true`/`false` |
//!
//! Values are kept verbatim, so whitespace-only input can be scripted.
//! An empty `value` for `color`, `exp-month` or `exp-year` selects the
//! prompt option.
//!
//! ```csv
//! event,target,value
//! input,name,Ada Lovelace
//! toggle,all,true
//! payment,,paypal
//! submit,,
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use register_core::{FieldId, FormEvent, JobRole, PaymentMethod, TextField, TshirtDesign};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct ScriptRow {
    event: String,
    target: String,
    value: String,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read script '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognised event '{event}' on row {row}")]
    UnknownEvent { event: String, row: usize },

    #[error("unrecognised {kind} '{target}' on row {row}")]
    UnknownTarget {
        kind: &'static str,
        target: String,
        row: usize,
    },

    #[error("invalid value '{value}' for '{event}' on row {row}")]
    InvalidValue {
        event: String,
        value: String,
        row: usize,
    },
}

/// Converts one row into an event. `row_number` is 1-based.
fn convert_row(
    row: ScriptRow,
    row_number: usize,
) -> Result<FormEvent, ScriptError> {
    let event = row.event.trim();
    let target = row.target.trim();

    let invalid_value = || ScriptError::InvalidValue {
        event: event.to_string(),
        value: row.value.clone(),
        row: row_number,
    };
    let activity_id = || {
        if target.is_empty() {
            Err(ScriptError::UnknownTarget {
                kind: "activity",
                target: String::new(),
                row: row_number,
            })
        } else {
            Ok(target.to_string())
        }
    };
    let flag = || row.value.trim().parse::<bool>().map_err(|_| invalid_value());
    let option_value = || {
        let value = row.value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };
    let number = || match option_value() {
        Some(value) => value.parse::<u32>().map(Some).map_err(|_| invalid_value()),
        None => Ok(None),
    };

    let parsed = match event {
        "load" => FormEvent::PageLoad,
        "input" => FormEvent::Input {
            field: TextField::parse(target).ok_or_else(|| ScriptError::UnknownTarget {
                kind: "text field",
                target: target.to_string(),
                row: row_number,
            })?,
            value: row.value.clone(),
        },
        "blur" => FormEvent::Blur {
            field: FieldId::parse(target).ok_or_else(|| ScriptError::UnknownTarget {
                kind: "field",
                target: target.to_string(),
                row: row_number,
            })?,
        },
        "role" => FormEvent::JobRoleChanged(
            JobRole::parse(row.value.trim()).ok_or_else(invalid_value)?,
        ),
        "design" => FormEvent::DesignChanged(
            TshirtDesign::parse(row.value.trim()).ok_or_else(invalid_value)?,
        ),
        "color" => FormEvent::ColorChanged(option_value()),
        "payment" => FormEvent::PaymentChanged(
            PaymentMethod::parse(row.value.trim()).ok_or_else(invalid_value)?,
        ),
        "exp-month" => {
            let month = number()?;
            if month.is_some_and(|m| !(1..=12).contains(&m)) {
                return Err(invalid_value());
            }
            FormEvent::ExpMonthChanged(month)
        }
        "exp-year" => FormEvent::ExpYearChanged(number()?),
        "toggle" => FormEvent::ActivityToggled {
            id: activity_id()?,
            checked: flag()?,
        },
        "focus" => FormEvent::ActivityFocus {
            id: activity_id()?,
            focused: flag()?,
        },
        "submit" => FormEvent::Submit,
        other => {
            return Err(ScriptError::UnknownEvent {
                event: other.to_string(),
                row: row_number,
            });
        }
    };
    Ok(parsed)
}

/// Parses a whole script, in file order.
pub fn parse<R: Read>(input: R) -> Result<Vec<FormEvent>, ScriptError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(false)
        .from_reader(input);

    reader
        .deserialize::<ScriptRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Convenience wrapper: open `path` and delegate to [`parse`].
pub fn load(path: &Path) -> Result<Vec<FormEvent>, ScriptError> {
    let file = std::fs::File::open(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(file)
}
