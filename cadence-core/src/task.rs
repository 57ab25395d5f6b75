//! Task model shared by the planner, the store and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse energy level. Used both for a task's energy cost and for the
/// tier derived from a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    /// Numeric level for affordability comparisons: low=1, medium=3, high=5.
    pub fn level(self) -> i32 {
        match self {
            EnergyLevel::Low => 1,
            EnergyLevel::Medium => 3,
            EnergyLevel::High => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TaskType {
    Focus,
    Admin,
    Creative,
    Physical,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Focus => "focus",
            TaskType::Admin => "admin",
            TaskType::Creative => "creative",
            TaskType::Physical => "physical",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// critical=4, high=3, medium=2, low=1
    pub fn weight(self) -> i32 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Critical => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Done => "done",
        }
    }
}

/// `Display` and case-insensitive `FromStr` over the `as_str` names. `_` is
/// accepted in place of `-`.
macro_rules! named {
    ($ty:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase().replace('_', "-");
                [$($ty::$variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| $crate::error::Error::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

pub(crate) use named;

named!(EnergyLevel, "energy level", [Low, Medium, High]);
named!(TaskType, "task type", [Focus, Admin, Creative, Physical]);
named!(Priority, "priority", [Low, Medium, High, Critical]);
named!(TaskStatus, "status", [Todo, InProgress, Blocked, Done]);

/// Core task record.
///
/// `completed` is the legacy flag; it is kept equal to `status == Done` by
/// every mutation in this crate, but tasks coming from outside may disagree,
/// so terminal checks look at both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub energy_cost: EnergyLevel,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Calendar date (`YYYY-MM-DD`) or RFC 3339 timestamp. Kept as text so a
    /// malformed value degrades to "no deadline" instead of failing a load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,

    #[serde(default)]
    pub subtasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            energy_cost: EnergyLevel::Medium,
            task_type: TaskType::Focus,
            priority: Priority::Medium,
            status: TaskStatus::Todo,
            tags: Vec::new(),
            project: None,
            assignee: None,
            deadline: None,
            estimated_minutes: None,
            subtasks: Vec::new(),
            notes: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
            completed: false,
        }
    }

    pub fn with_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    pub fn with_cost(mut self, energy_cost: EnergyLevel) -> Self {
        self.energy_cost = energy_cost;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.set_status(status);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    /// Done, either by status or by the legacy flag.
    pub fn is_terminal(&self) -> bool {
        self.completed || self.status == TaskStatus::Done
    }

    /// Set the status and keep `completed` in sync with it.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.completed = status == TaskStatus::Done;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn set_status_keeps_completed_in_sync() {
        let mut t = Task::new("t1", "write report");
        t.set_status(TaskStatus::Done);
        assert!(t.completed);
        assert!(t.is_terminal());

        t.set_status(TaskStatus::InProgress);
        assert!(!t.completed);
        assert!(!t.is_terminal());
    }

    #[test]
    fn legacy_completed_flag_is_terminal() {
        let mut t = Task::new("t1", "legacy");
        t.completed = true;
        assert_eq!(t.status, TaskStatus::Todo);
        assert!(t.is_terminal());
    }

    #[test]
    fn serializes_with_wire_names() {
        let t = Task::new("t1", "stretch")
            .with_type(TaskType::Physical)
            .with_cost(EnergyLevel::Low)
            .with_status(TaskStatus::InProgress)
            .with_minutes(20);
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["type"], "physical");
        assert_eq!(v["energyCost"], "low");
        assert_eq!(v["status"], "in-progress");
        assert_eq!(v["estimatedMinutes"], 20);
        assert!(v.get("deadline").is_none());
    }

    #[test]
    fn deserializes_minimal_record() {
        let t: Task = serde_json::from_str(
            r#"{"id":"x","title":"Inbox zero","energyCost":"low","type":"admin"}"#,
        )
        .unwrap();
        assert_eq!(t.priority, Priority::Medium);
        assert_eq!(t.status, TaskStatus::Todo);
        assert!(t.tags.is_empty());
        assert!(!t.completed);
    }

    #[test]
    fn names_parse_loosely() {
        assert_eq!("HIGH".parse::<EnergyLevel>(), Ok(EnergyLevel::High));
        assert_eq!("in_progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!(" creative ".parse::<TaskType>(), Ok(TaskType::Creative));
        assert_eq!(Priority::Critical.to_string(), "critical");
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(Error::UnknownValue {
                kind: "priority",
                value: "urgent".into()
            })
        );
    }
}
