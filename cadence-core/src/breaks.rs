//! Break scheduler: interleaves rest breaks into a ranked task sequence.
//!
//! The day walks through a fixed list of five breaks (morning coffee, lunch,
//! afternoon coffee, two short breaks). A simulated clock advances by each
//! task's estimate; after every task at most one break rule may fire, checked
//! in this order:
//!
//! 1. stage 0, morning coffee: 2+ tasks or 120+ minutes since reset, before 11:00
//! 2. stage 1, lunch: clock in the 12:00 hour
//! 3. stage 2, afternoon coffee: 2+ tasks, 14:00 or later
//! 4. any stage, short break: 3+ tasks or 90+ minutes, when the next entry in
//!    the list is a short break
//!
//! Each step is a pure `SchedulerState` transition; `schedule` is a fold.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::planner::PlanItem;
use crate::task::Task;

pub const DEFAULT_START_HOUR: u32 = 9;
pub const DEFAULT_TASK_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakKind {
    Coffee,
    Lunch,
    ShortBreak,
    LongBreak,
}

/// A synthesized rest break. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BreakKind,
    pub title: String,
    /// Minutes.
    pub duration: u32,
}

#[derive(Debug, Clone, Copy)]
struct BreakSpec {
    id: &'static str,
    kind: BreakKind,
    title: &'static str,
    duration: u32,
}

impl BreakSpec {
    fn item(&self) -> BreakItem {
        BreakItem {
            id: self.id.to_string(),
            kind: self.kind,
            title: self.title.to_string(),
            duration: self.duration,
        }
    }
}

const DAY_BREAKS: [BreakSpec; 5] = [
    BreakSpec {
        id: "break-coffee-morning",
        kind: BreakKind::Coffee,
        title: "Coffee Break",
        duration: 15,
    },
    BreakSpec {
        id: "break-lunch",
        kind: BreakKind::Lunch,
        title: "Lunch Break",
        duration: 45,
    },
    BreakSpec {
        id: "break-coffee-afternoon",
        kind: BreakKind::Coffee,
        title: "Afternoon Coffee",
        duration: 15,
    },
    BreakSpec {
        id: "break-short-1",
        kind: BreakKind::ShortBreak,
        title: "Short Break",
        duration: 10,
    },
    BreakSpec {
        id: "break-short-2",
        kind: BreakKind::ShortBreak,
        title: "Short Break",
        duration: 10,
    },
];

/// Simulated wall clock. Hours are not wrapped at midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Clock {
    pub hour: u32,
    pub minute: u32,
}

impl Clock {
    pub fn at(hour: u32) -> Self {
        Self { hour, minute: 0 }
    }

    /// Saturates instead of overflowing on absurd estimates.
    pub fn advance(self, minutes: u32) -> Self {
        let total = self.minute.saturating_add(minutes);
        Self {
            hour: self.hour.saturating_add(total / 60),
            minute: total % 60,
        }
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reset {
    TaskCount,
    Both,
}

/// Scheduler state threaded through the fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerState {
    pub clock: Clock,
    pub tasks_since_break: u32,
    pub minutes_since_reset: u32,
    /// Index into the day's break list; 5 means exhausted.
    pub stage: usize,
}

impl SchedulerState {
    pub fn starting_at(hour: u32) -> Self {
        Self {
            clock: Clock::at(hour),
            tasks_since_break: 0,
            minutes_since_reset: 0,
            stage: 0,
        }
    }

    /// Account for one task and return the break to emit after it, if any.
    /// Terminal tasks leave the state untouched.
    pub fn step(self, task: &Task) -> (Self, Option<BreakItem>) {
        if task.is_terminal() {
            return (self, None);
        }

        let minutes = task.estimated_minutes.unwrap_or(DEFAULT_TASK_MINUTES);
        let worked = Self {
            clock: self.clock.advance(minutes),
            tasks_since_break: self.tasks_since_break.saturating_add(1),
            minutes_since_reset: self.minutes_since_reset.saturating_add(minutes),
            ..self
        };

        match worked.due_break() {
            Some((index, reset)) => worked.take_break(index, reset),
            None => (worked, None),
        }
    }

    /// First matching rule only.
    fn due_break(&self) -> Option<(usize, Reset)> {
        let hour = self.clock.hour;
        let tasks = self.tasks_since_break;
        let minutes = self.minutes_since_reset;

        if self.stage == 0 && (tasks >= 2 || minutes >= 120) && hour < 11 {
            return Some((0, Reset::TaskCount));
        }
        if self.stage == 1 && (12..13).contains(&hour) {
            return Some((1, Reset::Both));
        }
        if self.stage == 2 && tasks >= 2 && hour >= 14 {
            return Some((2, Reset::TaskCount));
        }
        if tasks >= 3 || minutes >= 90 {
            let next = self.stage + 1;
            if DAY_BREAKS
                .get(next)
                .is_some_and(|b| b.kind == BreakKind::ShortBreak)
            {
                return Some((next, Reset::Both));
            }
        }
        None
    }

    fn take_break(self, index: usize, reset: Reset) -> (Self, Option<BreakItem>) {
        let spec = &DAY_BREAKS[index];
        let next = Self {
            clock: self.clock.advance(spec.duration),
            tasks_since_break: 0,
            minutes_since_reset: match reset {
                Reset::TaskCount => self.minutes_since_reset,
                Reset::Both => 0,
            },
            stage: self.stage + 1,
        };
        (next, Some(spec.item()))
    }
}

/// Interleave breaks into `tasks`, which must already be in final order.
pub fn schedule(tasks: Vec<Task>, start_hour: u32) -> Vec<PlanItem> {
    let capacity = tasks.len() + DAY_BREAKS.len();
    let (_, items) = tasks.into_iter().fold(
        (SchedulerState::starting_at(start_hour), Vec::with_capacity(capacity)),
        |(state, mut items), task| {
            let (next, brk) = state.step(&task);
            items.push(PlanItem::Task(task));
            if let Some(b) = brk {
                items.push(PlanItem::Break(b));
            }
            (next, items)
        },
    );
    items
}
