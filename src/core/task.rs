use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock::{ClockTime, same_calendar_day};
use crate::error::PlannerError;

/// A short note thrown into a task's basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: Uuid,
    pub content: String,
    pub created_at: NaiveDateTime,
}

impl Memo {
    pub(crate) fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            created_at: chrono::Local::now().naive_local(),
        }
    }
}

/// A titled, time-boxed bucket on the day timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    /// Always strictly after `start_time` when present.
    pub end_time: Option<NaiveDateTime>,
    pub is_completed: bool,
    /// Insertion order, never re-sorted.
    pub memos: Vec<Memo>,
}

impl Task {
    pub fn starts_on(&self, date: NaiveDate) -> bool {
        same_calendar_day(&self.start_time, &date)
    }

    pub fn memo(&self, memo_id: Uuid) -> Option<&Memo> {
        self.memos.iter().find(|m| m.id == memo_id)
    }
}

/// Input for creating a task: a title plus a clock range on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start: String,
    pub end: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, date: NaiveDate, start: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            date,
            start: start.into(),
            end: None,
        }
    }

    pub fn until(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate and build the task. Nothing is stored here.
    pub(crate) fn build(self) -> Result<Task, PlannerError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PlannerError::EmptyTitle);
        }
        let start_time = ClockTime::parse(&self.start)?.on(self.date);
        let end_time = match self.end.as_deref() {
            Some(end) => Some(end_after(start_time, ClockTime::parse(end)?)),
            None => None,
        };

        Ok(Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            start_time,
            end_time,
            is_completed: false,
            memos: Vec::new(),
        })
    }
}

/// Put `end` on the start's day, rolling to the next day once when it would
/// not come after the start (overnight buckets such as 23:00 to 01:00).
fn end_after(start: NaiveDateTime, end: ClockTime) -> NaiveDateTime {
    let same_day = end.on(start.date());
    if same_day > start {
        same_day
    } else {
        same_day + chrono::Duration::days(1)
    }
}
