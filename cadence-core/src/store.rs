//! In-memory task and energy collection feeding the planner.
//!
//! Holds tasks in insertion order (the planner's tie-break order) and energy
//! check-ins in recording order. No durability: callers load and save it.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::energy::{EnergyEntry, EnergySignal};
use crate::error::{Error, Result};
use crate::planner::{DayPlan, PlanOptions, plan_day};
use crate::task::{EnergyLevel, Priority, Task, TaskStatus, TaskType, named};

/// Energy value assumed when no check-in has been recorded.
pub const DEFAULT_ENERGY: u8 = 3;

/// Fields accepted when creating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub energy_cost: EnergyLevel,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, energy_cost: EnergyLevel, task_type: TaskType) -> Self {
        Self {
            title: title.into(),
            description: None,
            energy_cost,
            task_type,
            priority: None,
            status: None,
            tags: Vec::new(),
            assignee: None,
            deadline: None,
            estimated_minutes: None,
            project: None,
            subtasks: Vec::new(),
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        Ok(())
    }

    fn into_task(self, id: String, now: DateTime<Utc>) -> Task {
        let status = self.status.unwrap_or_default();
        Task {
            id,
            title: self.title,
            description: non_empty(self.description),
            energy_cost: self.energy_cost,
            task_type: self.task_type,
            priority: self.priority.unwrap_or_default(),
            status,
            tags: self.tags,
            project: non_empty(self.project),
            assignee: non_empty(self.assignee),
            deadline: non_empty(self.deadline),
            estimated_minutes: self.estimated_minutes.filter(|m| *m > 0),
            subtasks: self.subtasks,
            notes: non_empty(self.notes),
            created_at: now,
            updated_at: now,
            completed: status == TaskStatus::Done,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Partial update. `None` leaves a field as is; a blank string or zero
/// minutes clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub energy_cost: Option<EnergyLevel>,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub tags: Option<Vec<String>>,
    pub assignee: Option<String>,
    pub deadline: Option<String>,
    pub estimated_minutes: Option<u32>,
    pub project: Option<String>,
    pub subtasks: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl TaskPatch {
    fn apply(self, task: &mut Task) -> Result<()> {
        if let Some(title) = self.title {
            if title.trim().is_empty() {
                return Err(Error::EmptyTitle);
            }
            task.title = title;
        }
        if let Some(v) = self.description {
            task.description = non_empty(Some(v));
        }
        if let Some(v) = self.energy_cost {
            task.energy_cost = v;
        }
        if let Some(v) = self.task_type {
            task.task_type = v;
        }
        if let Some(v) = self.priority {
            task.priority = v;
        }
        if let Some(status) = self.status {
            task.set_status(status);
        }
        if let Some(v) = self.tags {
            task.tags = v;
        }
        if let Some(v) = self.assignee {
            task.assignee = non_empty(Some(v));
        }
        if let Some(v) = self.deadline {
            task.deadline = non_empty(Some(v));
        }
        if let Some(v) = self.estimated_minutes {
            task.estimated_minutes = Some(v).filter(|m| *m > 0);
        }
        if let Some(v) = self.project {
            task.project = non_empty(Some(v));
        }
        if let Some(v) = self.subtasks {
            task.subtasks = v;
        }
        if let Some(v) = self.notes {
            task.notes = non_empty(Some(v));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortKey {
    #[default]
    UpdatedAt,
    CreatedAt,
    Title,
    Priority,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::UpdatedAt => "updated-at",
            SortKey::CreatedAt => "created-at",
            SortKey::Title => "title",
            SortKey::Priority => "priority",
        }
    }
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

named!(SortKey, "sort key", [UpdatedAt, CreatedAt, Title, Priority]);
named!(SortOrder, "sort order", [Asc, Desc]);

/// Listing filters. Unlike `PlanOptions` this also narrows by priority,
/// type and free-text search, and sorts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskQuery {
    pub tags: Vec<String>,
    pub project: Option<String>,
    pub status: Vec<TaskStatus>,
    pub priority: Option<Priority>,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    pub search: Option<String>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl TaskQuery {
    fn matches(&self, task: &Task) -> bool {
        if !self.tags.is_empty() && !self.tags.iter().any(|t| task.has_tag(t)) {
            return false;
        }
        if self.project.is_some() && task.project != self.project {
            return false;
        }
        if !self.status.is_empty() && !self.status.contains(&task.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        if self.task_type.is_some_and(|ty| ty != task.task_type) {
            return false;
        }
        if let Some(term) = self.search.as_deref() {
            let term = term.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&term);
            let in_desc = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term));
            if !in_title && !in_desc {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    energy: Vec<EnergyEntry>,
    seq: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(tasks: Vec<Task>, energy: Vec<EnergyEntry>) -> Self {
        Self {
            tasks,
            energy,
            seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        loop {
            self.seq += 1;
            let id = format!("task-{}-{}", now.timestamp_millis(), self.seq);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    pub fn add_task(&mut self, new: NewTask, now: DateTime<Utc>) -> Result<&Task> {
        new.validate()?;
        let id = self.next_id(now);
        debug!(task_id = %id, "task added");
        self.tasks.push(new.into_task(id, now));
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch, now: DateTime<Utc>) -> Result<&Task> {
        let task = self.get_mut(id)?;
        patch.apply(task)?;
        task.updated_at = now;
        debug!(task_id = %id, status = task.status.as_str(), "task updated");
        Ok(task)
    }

    pub fn complete_task(&mut self, id: &str, now: DateTime<Utc>) -> Result<&Task> {
        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        self.update_task(id, patch, now)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        debug!(task_id = %id, "task deleted");
        Ok(self.tasks.remove(idx))
    }

    pub fn query(&self, q: &TaskQuery) -> Vec<&Task> {
        let mut out: Vec<&Task> = self.tasks.iter().filter(|t| q.matches(t)).collect();
        out.sort_by(|a, b| {
            let ord = match q.sort_by {
                SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                SortKey::Priority => a.priority.cmp(&b.priority),
            };
            match q.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        out
    }

    /// Distinct project labels in first-seen order.
    pub fn projects(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tasks
            .iter()
            .filter_map(|t| t.project.as_deref())
            .filter(|p| seen.insert(*p))
            .collect()
    }

    /// Distinct tags in first-seen order.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tasks
            .iter()
            .flat_map(|t| t.tags.iter().map(String::as_str))
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    pub fn record_energy(&mut self, entry: EnergyEntry) {
        debug!(value = entry.value, sleep_hours = ?entry.sleep_hours, "energy recorded");
        self.energy.push(entry);
    }

    pub fn energy_entries(&self) -> &[EnergyEntry] {
        &self.energy
    }

    pub fn latest_energy(&self) -> Option<&EnergyEntry> {
        self.energy.last()
    }

    /// Plan from the stored tasks and the most recent check-in, falling back
    /// to `default_energy` when there is none.
    pub fn plan_today(
        &self,
        options: &PlanOptions,
        date: NaiveDate,
        default_energy: u8,
    ) -> DayPlan {
        let signal = self
            .latest_energy()
            .map(EnergyEntry::signal)
            .unwrap_or(EnergySignal::new(default_energy));
        plan_day(&self.tasks, signal, date, options)
    }
}
