use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use register_core::{ActivityDefinition, DefinitionError, FormDefinition, ShirtColor, TshirtDesign};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const DEFAULT_ACTIVITIES: &str = include_str!("../data/activities.csv");
const DEFAULT_SHIRT_COLORS: &str = include_str!("../data/shirt_colors.csv");

/// Errors that can occur when loading a form catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognised design '{design}' on row {row}")]
    UnknownDesign { design: String, row: usize },

    #[error("blank {column} on row {row}")]
    BlankValue { column: &'static str, row: usize },

    #[error("invalid form definition: {0}")]
    Definition(#[from] DefinitionError),
}

impl From<csv::Error> for CatalogLoadError {
    fn from(err: csv::Error) -> Self {
        CatalogLoadError::CsvParse(err.to_string())
    }
}

/// A single row of the activities CSV.
///
/// - `id`: checkbox name, unique within the catalog
/// - `label`: text shown next to the checkbox
/// - `cost`: whole dollars
/// - `time_slot`: empty when the activity does not clash with anything
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ActivityRecord {
    pub id: String,
    pub label: String,
    pub cost: u32,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub time_slot: Option<String>,
}

/// A single row of the shirt colors CSV. `design` is the design select's
/// option value (`js puns`, `heart js`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ShirtColorRecord {
    pub value: String,
    pub label: String,
    pub design: String,
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input)
}

fn open(path: &Path) -> Result<File, CatalogLoadError> {
    File::open(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loader for the activity and shirt color catalogs a form is built from.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse activity records from a CSV reader, in file order.
    ///
    /// Row numbers in errors are 1-based (the header is row 0).
    pub fn parse_activities<R: Read>(input: R) -> Result<Vec<ActivityRecord>, CatalogLoadError> {
        let mut records = Vec::new();

        for (idx, result) in reader(input).deserialize().enumerate() {
            let record: ActivityRecord = result?;
            if record.id.is_empty() {
                return Err(CatalogLoadError::BlankValue {
                    column: "id",
                    row: idx + 1,
                });
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Parse shirt color records from a CSV reader, in file order.
    pub fn parse_shirt_colors<R: Read>(
        input: R
    ) -> Result<Vec<ShirtColorRecord>, CatalogLoadError> {
        let mut records = Vec::new();

        for (idx, result) in reader(input).deserialize().enumerate() {
            let record: ShirtColorRecord = result?;
            if record.value.is_empty() {
                return Err(CatalogLoadError::BlankValue {
                    column: "value",
                    row: idx + 1,
                });
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Parse both catalogs and assemble a validated [`FormDefinition`].
    pub fn load<A: Read, C: Read>(
        activities: A,
        shirt_colors: C,
    ) -> Result<FormDefinition, CatalogLoadError> {
        let activities: Vec<ActivityDefinition> = Self::parse_activities(activities)?
            .into_iter()
            .map(|record| ActivityDefinition {
                id: record.id,
                label: record.label,
                cost: record.cost,
                time_slot: record.time_slot,
            })
            .collect();

        let shirt_colors = Self::parse_shirt_colors(shirt_colors)?
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                let design = TshirtDesign::parse(&record.design).ok_or_else(|| {
                    CatalogLoadError::UnknownDesign {
                        design: record.design.clone(),
                        row: idx + 1,
                    }
                })?;
                Ok(ShirtColor {
                    value: record.value,
                    label: record.label,
                    design,
                })
            })
            .collect::<Result<Vec<_>, CatalogLoadError>>()?;

        debug!(
            activities = activities.len(),
            shirt_colors = shirt_colors.len(),
            "catalog parsed"
        );
        Ok(FormDefinition::new(activities, shirt_colors)?)
    }

    /// Convenience wrapper: open both files and delegate to [`CatalogLoader::load`].
    pub fn load_files(
        activities: &Path,
        shirt_colors: &Path,
    ) -> Result<FormDefinition, CatalogLoadError> {
        Self::load(open(activities)?, open(shirt_colors)?)
    }
}

/// The conference catalog bundled with the crate.
pub fn default_definition() -> Result<FormDefinition, CatalogLoadError> {
    CatalogLoader::load(DEFAULT_ACTIVITIES.as_bytes(), DEFAULT_SHIRT_COLORS.as_bytes())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ACTIVITIES_CSV: &str = "\
id,label,cost,time_slot
all,Main Conference,200,
express,Express Workshop,100,Tuesday 9am-12pm
";

    const COLORS_CSV: &str = "\
value,label,design
gold,Gold,js puns
tomato,Tomato,heart js
";

    // =========================================================================
    // activities
    // =========================================================================

    #[test]
    fn parse_activities_reads_rows_in_order() {
        let records = CatalogLoader::parse_activities(ACTIVITIES_CSV.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                ActivityRecord {
                    id: "all".to_string(),
                    label: "Main Conference".to_string(),
                    cost: 200,
                    time_slot: None,
                },
                ActivityRecord {
                    id: "express".to_string(),
                    label: "Express Workshop".to_string(),
                    cost: 100,
                    time_slot: Some("Tuesday 9am-12pm".to_string()),
                },
            ]
        );
    }

    #[test]
    fn parse_activities_treats_blank_slot_as_none() {
        let csv = "id,label,cost,time_slot\nnpm,npm Workshop,100,   ";

        let records = CatalogLoader::parse_activities(csv.as_bytes()).unwrap();

        assert_eq!(records[0].time_slot, None);
    }

    #[test]
    fn parse_activities_rejects_negative_cost() {
        let csv = "id,label,cost,time_slot\nnpm,npm Workshop,-100,";

        let result = CatalogLoader::parse_activities(csv.as_bytes());

        assert!(matches!(result, Err(CatalogLoadError::CsvParse(_))));
    }

    #[test]
    fn parse_activities_rejects_blank_id() {
        let csv = "id,label,cost,time_slot\n,Mystery,100,";

        let result = CatalogLoader::parse_activities(csv.as_bytes());

        assert!(matches!(
            result,
            Err(CatalogLoadError::BlankValue {
                column: "id",
                row: 1
            })
        ));
    }

    // =========================================================================
    // shirt colors
    // =========================================================================

    #[test]
    fn load_maps_design_values() {
        let definition =
            CatalogLoader::load(ACTIVITIES_CSV.as_bytes(), COLORS_CSV.as_bytes()).unwrap();

        assert_eq!(definition.color("tomato").map(|c| c.design), Some(TshirtDesign::HeartJs));
        assert_eq!(definition.activities().len(), 2);
    }

    #[test]
    fn load_rejects_unknown_design() {
        let colors = "value,label,design\ngold,Gold,js puns\nlime,Lime,rust crab";

        let result = CatalogLoader::load(ACTIVITIES_CSV.as_bytes(), colors.as_bytes());

        match result {
            Err(CatalogLoadError::UnknownDesign { design, row }) => {
                assert_eq!(design, "rust crab");
                assert_eq!(row, 2);
            }
            other => panic!("expected UnknownDesign, got {other:?}"),
        }
    }

    #[test]
    fn load_rejects_duplicate_activity() {
        let activities = "id,label,cost,time_slot\nnpm,npm,100,\nnpm,npm again,100,";

        let result = CatalogLoader::load(activities.as_bytes(), COLORS_CSV.as_bytes());

        assert!(matches!(
            result,
            Err(CatalogLoadError::Definition(DefinitionError::DuplicateActivity(_)))
        ));
    }

    #[test]
    fn load_rejects_costs_that_overflow_the_total() {
        let activities = "id,label,cost,time_slot\ngala,Gala,4294967295,\nnpm,npm,1,";

        let result = CatalogLoader::load(activities.as_bytes(), COLORS_CSV.as_bytes());

        assert!(matches!(
            result,
            Err(CatalogLoadError::Definition(DefinitionError::TotalOverflow))
        ));
    }

    #[test]
    fn load_files_reports_missing_path() {
        let result = CatalogLoader::load_files(
            Path::new("does/not/exist.csv"),
            Path::new("does/not/exist.csv"),
        );

        assert!(matches!(result, Err(CatalogLoadError::Io { .. })));
    }

    // =========================================================================
    // bundled catalog
    // =========================================================================

    #[test]
    fn default_definition_is_valid() {
        let definition = default_definition().unwrap();

        assert_eq!(definition.activities().len(), 7);
        assert_eq!(definition.shirt_colors().len(), 6);
        assert_eq!(definition.colors_for(TshirtDesign::JsPuns).count(), 3);
    }
}
