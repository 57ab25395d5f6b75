//! Boundary validation errors.
//!
//! The planning engine itself never fails; these come from constructing
//! check-ins, creating tasks, store lookups and parsing enum names.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("energy value must be between 1 and 5 (got {0})")]
    InvalidEnergy(u8),

    #[error("sleep hours must be between 0 and 24 (got {0})")]
    InvalidSleepHours(f64),

    #[error("start hour must be between 0 and 23 (got {0})")]
    InvalidStartHour(u32),

    #[error("task title is required")]
    EmptyTitle,

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
