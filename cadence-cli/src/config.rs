use anyhow::{Context, Result, bail};
use cadence_core::{DEFAULT_ENERGY, PlanOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub plan: PlanSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSection {
    /// Energy used when no check-in has been logged (1-5).
    pub default_energy: u8,
    pub start_hour: u32,
    pub exclude_blocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for PlanSection {
    fn default() -> Self {
        Self {
            default_energy: DEFAULT_ENERGY,
            start_hour: 9,
            exclude_blocked: false,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.plan.default_energy) {
            bail!(
                "[plan] default_energy must be between 1 and 5 (got {})",
                self.plan.default_energy
            );
        }
        let probe = PlanOptions {
            start_hour: Some(self.plan.start_hour),
            ..Default::default()
        };
        probe.validate().context("[plan] start_hour")?;
        Ok(())
    }
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

pub fn load_config(dir: &Path) -> Result<Config> {
    let p = config_path(dir);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid {}", p.display()))?;
    Ok(cfg)
}

pub fn save_config(dir: &Path, cfg: &Config) -> Result<()> {
    let p = config_path(dir);
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(dir: &Path) -> Result<()> {
    let p = config_path(dir);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(dir, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config(dir: &Path) -> Result<()> {
    let cfg = load_config(dir)?;
    let p = config_path(dir);
    let origin = if p.exists() { "file" } else { "defaults" };
    println!("# {} ({origin})", p.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
