use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the planner core. Every operation that returns one of
/// these leaves the store exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("memo content must not be empty")]
    EmptyMemo,
    #[error("invalid clock time `{0}`, expected HH:MM")]
    InvalidTime(String),
    #[error("no task with id {0}")]
    TaskNotFound(Uuid),
    #[error("{year}-{month:02} has no day {day}")]
    InvalidDay { year: i32, month: u32, day: u32 },
}
