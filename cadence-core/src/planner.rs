//! Day planner: energy + tasks + options -> ordered agenda with breaks.
//!
//! Pipeline (single pass, no back edges):
//! normalize energy -> filter -> score/sort -> interleave breaks -> explain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::breaks::{self, BreakItem, DEFAULT_START_HOUR};
use crate::energy::{self, EnergySignal};
use crate::error::{Error, Result};
use crate::explain::{self, NOTHING_TO_PLAN};
use crate::filter;
use crate::scoring::{self, ScoreContext};
use crate::task::{Task, TaskStatus};

/// Optional knobs for one planning call. Empty lists and `None` mean
/// "no filter" / "use the default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanOptions {
    pub filter_tags: Vec<String>,
    pub filter_project: Option<String>,
    pub filter_status: Vec<TaskStatus>,
    pub exclude_blocked: bool,
    /// Overrides the sleep hours carried by the energy signal.
    pub sleep_hours: Option<f64>,
    /// Hour of day the simulated clock starts at (default 9).
    pub start_hour: Option<u32>,
}

impl PlanOptions {
    /// Boundary check for callers building options from user input.
    pub fn validate(&self) -> Result<()> {
        if let Some(h) = self.start_hour {
            if h > 23 {
                return Err(Error::InvalidStartHour(h));
            }
        }
        if let Some(s) = self.sleep_hours {
            if !(s.is_finite() && (0.0..=24.0).contains(&s)) {
                return Err(Error::InvalidSleepHours(s));
            }
        }
        Ok(())
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour.unwrap_or(DEFAULT_START_HOUR)
    }
}

/// One entry of the agenda, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlanItem {
    Task(Task),
    Break(BreakItem),
}

impl PlanItem {
    pub fn id(&self) -> &str {
        match self {
            PlanItem::Task(t) => &t.id,
            PlanItem::Break(b) => &b.id,
        }
    }

    pub fn as_task(&self) -> Option<&Task> {
        match self {
            PlanItem::Task(t) => Some(t),
            PlanItem::Break(_) => None,
        }
    }

    pub fn as_break(&self) -> Option<&BreakItem> {
        match self {
            PlanItem::Break(b) => Some(b),
            PlanItem::Task(_) => None,
        }
    }

    pub fn into_task(self) -> Option<Task> {
        match self {
            PlanItem::Task(t) => Some(t),
            PlanItem::Break(_) => None,
        }
    }
}

/// The planner's output. Regenerated wholesale on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub date: NaiveDate,
    pub ordered_tasks: Vec<PlanItem>,
    pub explanation: String,
}

impl DayPlan {
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.ordered_tasks.iter().filter_map(PlanItem::as_task)
    }

    pub fn breaks(&self) -> impl Iterator<Item = &BreakItem> {
        self.ordered_tasks.iter().filter_map(PlanItem::as_break)
    }
}

/// Plan `date` for the given tasks and energy.
///
/// `date` doubles as "today" for deadline urgency. The caller's tasks are
/// never mutated; the plan holds clones.
pub fn plan_day(
    tasks: &[Task],
    energy: EnergySignal,
    date: NaiveDate,
    options: &PlanOptions,
) -> DayPlan {
    let sleep_hours = options.sleep_hours.or(energy.sleep_hours);
    let reading = energy::normalize(EnergySignal {
        value: energy.value,
        sleep_hours,
    });

    let filtered = filter::apply(tasks, options);
    debug!(
        input = tasks.len(),
        active = filtered.active.len(),
        completed = filtered.completed.len(),
        tier = reading.tier.as_str(),
        adjusted = reading.adjusted,
        "filtered tasks for planning"
    );

    if filtered.is_empty() {
        return DayPlan {
            date,
            ordered_tasks: Vec::new(),
            explanation: NOTHING_TO_PLAN.to_string(),
        };
    }

    let ctx = ScoreContext {
        tier: reading.tier,
        today: date,
        deadlines_in_play: filtered.active.iter().any(|t| t.deadline.is_some()),
    };

    let ordered: Vec<Task> = scoring::rank(filtered.active, &ctx)
        .into_iter()
        .map(|s| s.task)
        .chain(filtered.completed)
        .collect();

    let items = breaks::schedule(ordered, options.start_hour());
    let explanation = explain::explain(&items, reading.tier, sleep_hours);

    debug!(
        items = items.len(),
        breaks = items.iter().filter(|i| i.as_break().is_some()).count(),
        "plan generated"
    );

    DayPlan {
        date,
        ordered_tasks: items,
        explanation,
    }
}
