use chrono::{NaiveDate, NaiveDateTime};

use super::clock::ClockTime;
use super::store::TaskStore;
use super::task::{NewTask, Task};
use crate::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

/// Form state behind the quick-add bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    start: ClockTime,
    end: Option<ClockTime>,
}

impl TaskDraft {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            title: String::new(),
            start: ClockTime::of(now),
            end: None,
        }
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> Option<ClockTime> {
        self.end
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Set the start. An unset end is filled in one hour later.
    pub fn set_start(&mut self, start: ClockTime) {
        self.start = start;
        if self.end.is_none() {
            self.end = Some(start.plus_hours(1));
        }
    }

    pub fn set_end(&mut self, end: ClockTime) {
        self.end = Some(end);
    }

    pub fn clear_end(&mut self) {
        self.end = None;
    }

    /// Value the time picker opens with for `field`.
    pub fn picker_initial(&self, field: TimeField) -> ClockTime {
        match field {
            TimeField::Start => self.start,
            TimeField::End => self.end.unwrap_or(self.start),
        }
    }

    /// Apply a confirmed picker value.
    pub fn apply(&mut self, field: TimeField, value: ClockTime) {
        match field {
            TimeField::Start => self.set_start(value),
            TimeField::End => self.set_end(value),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Create the task on `date` and reset the form for the next entry.
    pub fn submit(
        &mut self,
        store: &mut TaskStore,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<Task, PlannerError> {
        let mut new = NewTask::new(self.title.clone(), date, self.start.to_string());
        if let Some(end) = self.end {
            new = new.until(end.to_string());
        }
        let task = store.create_task(new)?;
        *self = Self::new(now);
        Ok(task)
    }
}
