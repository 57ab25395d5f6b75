use anyhow::Result;
use cadence_core::EnergyEntry;
use chrono::Utc;
use clap::Subcommand;
use std::path::Path;

use crate::render;
use crate::state::{load_store, save_store};

#[derive(Subcommand, Debug)]
pub enum EnergyCommand {
    /// Record how you feel right now (1-5)
    Log {
        value: u8,

        /// Hours slept last night
        #[arg(long)]
        sleep: Option<f64>,
    },

    /// Show the most recent check-in
    Latest,

    /// List recent check-ins, newest first
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

pub fn run(cmd: EnergyCommand, dir: &Path) -> Result<()> {
    let mut store = load_store(dir)?;
    match cmd {
        EnergyCommand::Log { value, sleep } => {
            let entry = EnergyEntry::new(value, sleep, Utc::now())?;
            println!("Logged {}", render::energy_line(&entry));
            store.record_energy(entry);
            save_store(dir, &store)?;
        }
        EnergyCommand::Latest => match store.latest_energy() {
            Some(entry) => println!("{}", render::energy_line(entry)),
            None => println!("No energy check-ins yet. Run: cadence energy log <1-5>"),
        },
        EnergyCommand::History { limit } => {
            let entries = store.energy_entries();
            if entries.is_empty() {
                println!("No energy check-ins yet.");
            }
            for entry in entries.iter().rev().take(limit) {
                println!("{}", render::energy_line(entry));
            }
        }
    }
    Ok(())
}
