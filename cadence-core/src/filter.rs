//! Caller-supplied task filters and the terminal-task split.

use crate::planner::PlanOptions;
use crate::task::{Task, TaskStatus};

/// Result of filtering: tasks to score, and done tasks to append at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filtered {
    pub active: Vec<Task>,
    pub completed: Vec<Task>,
}

impl Filtered {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty()
    }
}

/// Every predicate the options carry must hold. Empty tag/status lists mean
/// "no filter".
pub fn matches(task: &Task, options: &PlanOptions) -> bool {
    if !options.filter_tags.is_empty() && !options.filter_tags.iter().any(|tag| task.has_tag(tag)) {
        return false;
    }
    if let Some(project) = options.filter_project.as_deref() {
        if task.project.as_deref() != Some(project) {
            return false;
        }
    }
    if !options.filter_status.is_empty() && !options.filter_status.contains(&task.status) {
        return false;
    }
    if options.exclude_blocked && task.status == TaskStatus::Blocked {
        return false;
    }
    true
}

/// Apply the filters and split off terminal tasks, preserving input order in
/// both buckets.
pub fn apply(tasks: &[Task], options: &PlanOptions) -> Filtered {
    let (completed, active): (Vec<Task>, Vec<Task>) = tasks
        .iter()
        .filter(|t| matches(t, options))
        .cloned()
        .partition(Task::is_terminal);

    Filtered { active, completed }
}
