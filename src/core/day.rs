use chrono::NaiveDate;

use super::clock::same_calendar_day;
use super::store::TaskStore;
use super::task::Task;

/// The calendar day currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySelection {
    selected: NaiveDate,
}

impl Default for DaySelection {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl DaySelection {
    pub fn new(date: NaiveDate) -> Self {
        Self { selected: date }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn select(&mut self, date: NaiveDate) {
        if date != self.selected {
            log::debug!("Selected day {}", date);
        }
        self.selected = date;
    }

    /// Tasks starting on the selected day, in store order.
    pub fn tasks<'a>(&self, store: &'a TaskStore) -> Vec<&'a Task> {
        tasks_for(store, self.selected)
    }
}

/// Tasks whose start falls on `date`, in store order.
pub fn tasks_for(store: &TaskStore, date: NaiveDate) -> Vec<&Task> {
    store.list_all().iter().filter(|t| t.starts_on(date)).collect()
}

pub fn is_today(date: NaiveDate) -> bool {
    same_calendar_day(&date, &chrono::Local::now().date_naive())
}
