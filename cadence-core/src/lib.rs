//! cadence-core: energy-aware day planning.
//!
//! The planner takes tasks, an energy check-in and filter options and
//! returns an ordered agenda with rest breaks plus a short rationale.

pub mod breaks;
pub mod energy;
pub mod error;
pub mod explain;
pub mod filter;
pub mod planner;
pub mod scoring;
pub mod store;
pub mod task;
pub mod time;

pub use breaks::{BreakItem, BreakKind, Clock, SchedulerState};
pub use energy::{EnergyEntry, EnergyReading, EnergySignal};
pub use error::{Error, Result};
pub use planner::{DayPlan, PlanItem, PlanOptions, plan_day};
pub use scoring::{ScoreContext, ScoredTask};
pub use store::{DEFAULT_ENERGY, NewTask, SortKey, SortOrder, TaskPatch, TaskQuery, TaskStore};
pub use task::{EnergyLevel, Priority, Task, TaskStatus, TaskType};
