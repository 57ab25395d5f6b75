use anyhow::{Context, Result};
use cadence_core::{DayPlan, PlanOptions, TaskStatus};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::Path;
use tracing::debug;

use crate::config::Config;
use crate::render;
use crate::state::load_store;

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Only tasks carrying one of these tags (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    #[arg(long)]
    project: Option<String>,

    /// Only tasks in these statuses (repeatable)
    #[arg(long)]
    status: Vec<TaskStatus>,

    /// Leave blocked tasks out of the plan
    #[arg(long, default_value_t = false)]
    exclude_blocked: bool,

    /// Hour the day starts at (default from config)
    #[arg(long)]
    start_hour: Option<u32>,

    /// Hours slept; overrides the latest check-in
    #[arg(long)]
    sleep: Option<f64>,

    /// Plan for this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Print the plan as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl PlanArgs {
    /// Merge flags over config defaults.
    fn options(&self, cfg: &Config) -> PlanOptions {
        PlanOptions {
            filter_tags: self.tags.clone(),
            filter_project: self.project.clone(),
            filter_status: self.status.clone(),
            exclude_blocked: self.exclude_blocked || cfg.plan.exclude_blocked,
            sleep_hours: self.sleep,
            start_hour: Some(self.start_hour.unwrap_or(cfg.plan.start_hour)),
        }
    }
}

pub fn build_plan(args: &PlanArgs, cfg: &Config, dir: &Path) -> Result<DayPlan> {
    let options = args.options(cfg);
    options.validate().context("invalid plan options")?;

    let store = load_store(dir)?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    debug!(%date, tasks = store.len(), "planning");
    Ok(store.plan_today(&options, date, cfg.plan.default_energy))
}

pub fn run(args: PlanArgs, cfg: &Config, dir: &Path) -> Result<()> {
    let plan = build_plan(&args, cfg, dir)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        let start = args.options(cfg).start_hour();
        print!("{}", render::plan_text(&plan, start));
    }
    Ok(())
}
