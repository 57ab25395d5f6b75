//! Plain-text output for tasks, check-ins and day plans.

use cadence_core::breaks::DEFAULT_TASK_MINUTES;
use cadence_core::{Clock, DayPlan, EnergyEntry, PlanItem, Task};
use std::fmt::Write as _;

/// One-line summary used by `task list`.
pub fn task_line(task: &Task) -> String {
    let mut line = format!(
        "{}  [{}] {}  ({}, {} energy, {})",
        task.id,
        task.status,
        task.title,
        task.task_type,
        task.energy_cost,
        task.priority
    );
    for tag in &task.tags {
        let _ = write!(line, " #{tag}");
    }
    if let Some(project) = &task.project {
        let _ = write!(line, " @{project}");
    }
    if let Some(deadline) = &task.deadline {
        let _ = write!(line, " due {deadline}");
    }
    line
}

pub fn task_detail(task: &Task) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", task.title);
    let _ = writeln!(out, "  id:        {}", task.id);
    let _ = writeln!(out, "  status:    {}", task.status);
    let _ = writeln!(out, "  type:      {}", task.task_type);
    let _ = writeln!(out, "  energy:    {}", task.energy_cost);
    let _ = writeln!(out, "  priority:  {}", task.priority);
    if !task.tags.is_empty() {
        let _ = writeln!(out, "  tags:      {}", task.tags.join(", "));
    }
    if let Some(project) = &task.project {
        let _ = writeln!(out, "  project:   {project}");
    }
    if let Some(deadline) = &task.deadline {
        let _ = writeln!(out, "  deadline:  {deadline}");
    }
    if let Some(minutes) = task.estimated_minutes {
        let _ = writeln!(out, "  estimate:  {minutes} min");
    }
    if let Some(description) = &task.description {
        let _ = writeln!(out, "  {description}");
    }
    for sub in &task.subtasks {
        let _ = writeln!(out, "  - {sub}");
    }
    let _ = writeln!(
        out,
        "  created {} / updated {}",
        task.created_at.format("%Y-%m-%d %H:%M"),
        task.updated_at.format("%Y-%m-%d %H:%M")
    );
    out
}

pub fn energy_line(entry: &EnergyEntry) -> String {
    let when = entry.timestamp.format("%Y-%m-%d %H:%M");
    match entry.sleep_hours {
        Some(s) => format!("{when}  energy {}/5, slept {s}h", entry.value),
        None => format!("{when}  energy {}/5", entry.value),
    }
}

/// Agenda with clock times. Open tasks take their estimate (30 min if
/// unset), breaks their duration; finished tasks are listed at the end
/// without a time slot.
pub fn plan_text(plan: &DayPlan, start_hour: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Plan for {}", plan.date);
    let _ = writeln!(out);

    let mut clock = Clock::at(start_hour);
    let mut done = Vec::new();
    for item in &plan.ordered_tasks {
        match item {
            PlanItem::Task(t) if t.is_terminal() => done.push(t),
            PlanItem::Task(t) => {
                let minutes = t.estimated_minutes.unwrap_or(DEFAULT_TASK_MINUTES);
                let _ = writeln!(
                    out,
                    "{clock}  {}  ({}, {} energy, {minutes} min)",
                    t.title, t.task_type, t.energy_cost
                );
                clock = clock.advance(minutes);
            }
            PlanItem::Break(b) => {
                let _ = writeln!(out, "{clock}  -- {} ({} min)", b.title, b.duration);
                clock = clock.advance(b.duration);
            }
        }
    }

    if !done.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Already done:");
        for t in done {
            let _ = writeln!(out, "  [x] {}", t.title);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", plan.explanation);
    out
}
