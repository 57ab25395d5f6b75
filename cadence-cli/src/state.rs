use anyhow::{Context, Result};
use cadence_core::{EnergyEntry, Task, TaskStore};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const TASKS_FILE: &str = "tasks.json";
pub const ENERGY_FILE: &str = "energy.json";

/// `$CADENCE_HOME`, or `~/.cadence`.
pub fn cadence_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("CADENCE_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".cadence"))
}

pub fn ensure_cadence_home() -> Result<PathBuf> {
    let dir = cadence_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Load tasks and energy check-ins. Missing files are empty collections.
pub fn load_store(dir: &Path) -> Result<TaskStore> {
    let tasks: Vec<Task> = read_json(&dir.join(TASKS_FILE))?;
    let energy: Vec<EnergyEntry> = read_json(&dir.join(ENERGY_FILE))?;
    Ok(TaskStore::from_parts(tasks, energy))
}

pub fn save_store(dir: &Path, store: &TaskStore) -> Result<()> {
    write_json(&dir.join(TASKS_FILE), store.tasks())?;
    write_json(&dir.join(ENERGY_FILE), store.energy_entries())?;
    info!(
        dir = %dir.display(),
        tasks = store.len(),
        energy = store.energy_entries().len(),
        "state saved"
    );
    Ok(())
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if s.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
