use anyhow::{Context, Result, bail};
use cadence_core::time::parse_deadline;
use cadence_core::{
    EnergyLevel, NewTask, Priority, SortKey, SortOrder, Task, TaskPatch, TaskQuery, TaskStatus,
    TaskStore, TaskType,
};
use chrono::Utc;
use clap::Subcommand;
use std::path::Path;

use crate::render;
use crate::state::{load_store, save_store};

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task
    Add {
        title: String,

        /// Energy the task takes
        #[arg(long)]
        energy_cost: EnergyLevel,

        #[arg(long = "type")]
        task_type: TaskType,

        /// Defaults to medium
        #[arg(long)]
        priority: Option<Priority>,

        /// Defaults to todo
        #[arg(long)]
        status: Option<TaskStatus>,

        /// Repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        project: Option<String>,

        /// YYYY-MM-DD or an RFC 3339 timestamp
        #[arg(long)]
        deadline: Option<String>,

        /// Estimated minutes
        #[arg(long)]
        minutes: Option<u32>,

        #[arg(long)]
        description: Option<String>,

        /// Repeatable
        #[arg(long = "subtask")]
        subtasks: Vec<String>,
    },

    /// List tasks, newest update first
    List {
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        project: Option<String>,

        /// Repeatable
        #[arg(long)]
        status: Vec<TaskStatus>,

        #[arg(long)]
        priority: Option<Priority>,

        #[arg(long = "type")]
        task_type: Option<TaskType>,

        /// Case-insensitive match on title and description
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value_t = SortKey::UpdatedAt)]
        sort_by: SortKey,

        /// Sort ascending instead of descending
        #[arg(long, default_value_t = false)]
        asc: bool,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show one task
    Show {
        id: String,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Mark a task done
    Done { id: String },

    /// Change a task's status
    Status { id: String, status: TaskStatus },

    /// Delete a task
    Rm { id: String },

    /// Distinct project names
    Projects,

    /// Distinct tags
    Tags,
}

pub fn run(cmd: TaskCommand, dir: &Path) -> Result<()> {
    let mut store = load_store(dir)?;
    match cmd {
        TaskCommand::Add {
            title,
            energy_cost,
            task_type,
            priority,
            status,
            tags,
            project,
            deadline,
            minutes,
            description,
            subtasks,
        } => {
            if let Some(raw) = deadline.as_deref() {
                if parse_deadline(raw).is_none() {
                    bail!("unrecognized deadline: {raw} (use YYYY-MM-DD or RFC 3339)");
                }
            }
            let new = NewTask {
                priority,
                status,
                tags,
                project,
                deadline,
                estimated_minutes: minutes,
                description,
                subtasks,
                ..NewTask::new(title, energy_cost, task_type)
            };
            let task = store.add_task(new, Utc::now())?;
            println!("Added {}", render::task_line(task));
            save_store(dir, &store)?;
        }

        TaskCommand::List {
            tags,
            project,
            status,
            priority,
            task_type,
            search,
            sort_by,
            asc,
            json,
        } => {
            let query = TaskQuery {
                tags,
                project,
                status,
                priority,
                task_type,
                search,
                sort_by,
                sort_order: if asc { SortOrder::Asc } else { SortOrder::Desc },
            };
            let tasks = store.query(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                for t in tasks {
                    println!("{}", render::task_line(t));
                }
            }
        }

        TaskCommand::Show { id, json } => {
            let task = find(&store, &id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(task)?);
            } else {
                print!("{}", render::task_detail(task));
            }
        }

        TaskCommand::Done { id } => {
            let task = store.complete_task(&id, Utc::now())?;
            println!("Done: {}", task.title);
            save_store(dir, &store)?;
        }

        TaskCommand::Status { id, status } => {
            let patch = TaskPatch {
                status: Some(status),
                ..Default::default()
            };
            let task = store.update_task(&id, patch, Utc::now())?;
            println!("{} -> {}", task.title, task.status);
            save_store(dir, &store)?;
        }

        TaskCommand::Rm { id } => {
            let task = store.delete_task(&id)?;
            println!("Deleted {} ({})", task.id, task.title);
            save_store(dir, &store)?;
        }

        TaskCommand::Projects => {
            for p in store.projects() {
                println!("{p}");
            }
        }

        TaskCommand::Tags => {
            for t in store.tags() {
                println!("{t}");
            }
        }
    }
    Ok(())
}

fn find<'a>(store: &'a TaskStore, id: &str) -> Result<&'a Task> {
    store
        .get(id)
        .with_context(|| format!("task not found: {id}"))
}
