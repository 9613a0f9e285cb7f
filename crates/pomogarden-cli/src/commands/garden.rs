use clap::Subcommand;
use pomogarden_core::{Config, Garden, LoadOutcome};
use serde::Serialize;

use super::open_garden;
use crate::render;

#[derive(Subcommand)]
pub enum GardenAction {
    /// Show the persisted garden
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the garden with a fresh one
    Reset,
}

#[derive(Serialize)]
struct GardenReport<'a> {
    key: &'a str,
    restored: bool,
    progress: u64,
    full: bool,
    garden: &'a Garden,
}

pub fn run(action: GardenAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_garden(config)?;

    match action {
        GardenAction::Show { json } => {
            if json {
                let report = GardenReport {
                    key: store.key(),
                    restored: *store.load_outcome() == LoadOutcome::Restored,
                    progress: store.garden().progress(),
                    full: store.is_full(),
                    garden: store.garden(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in render::garden_lines(store.garden(), store.policy()) {
                    println!("{line}");
                }
            }
        }
        GardenAction::Reset => {
            store.clear()?;
            println!("garden reset");
        }
    }
    Ok(())
}
