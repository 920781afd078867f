use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use register_core::{FormDefinition, TshirtDesign};
use register_data::{CatalogLoader, default_definition};

/// Validate a form catalog and print what the form will offer.
///
/// The activities CSV has the columns:
/// - id: checkbox name, unique within the catalog
/// - label: text shown next to the checkbox
/// - cost: whole dollars
/// - time_slot: optional; activities sharing a slot are mutually exclusive
///
/// The shirt colors CSV has the columns:
/// - value: color option value
/// - label: text shown in the color select
/// - design: design option value (js puns, heart js)
#[derive(Parser, Debug)]
#[command(name = "register-catalog")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the activities CSV (bundled catalog when omitted)
    #[arg(short, long, requires = "colors")]
    activities: Option<PathBuf>,

    /// Path to the shirt colors CSV (bundled catalog when omitted)
    #[arg(short, long, requires = "activities")]
    colors: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let definition = match (&args.activities, &args.colors) {
        (Some(activities), Some(colors)) => {
            println!(
                "Loading catalog from: {} and {}",
                activities.display(),
                colors.display()
            );
            CatalogLoader::load_files(activities, colors).with_context(|| {
                format!(
                    "Failed to load catalog: {} / {}",
                    activities.display(),
                    colors.display()
                )
            })?
        }
        _ => default_definition().context("Bundled catalog is invalid")?,
    };

    print_catalog(&definition);
    Ok(())
}

fn print_catalog(definition: &FormDefinition) {
    println!("Activities ({}):", definition.activities().len());
    for activity in definition.activities() {
        let slot = activity.time_slot.as_deref().unwrap_or("any time");
        println!(
            "  {:<16} ${:>4}  {:<20} {}",
            activity.id, activity.cost, slot, activity.label
        );
    }

    for design in TshirtDesign::all() {
        println!("Colors for {}:", design.label());
        for color in definition.colors_for(*design) {
            println!("  {:<16} {}", color.value, color.label);
        }
    }
}
