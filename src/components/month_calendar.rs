use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::day::DaySelection;
use crate::error::PlannerError;

/// Fixed grid size: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

/// Weekday header, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// A calendar month with a zero-based month index (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month0: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn prev(self) -> Self {
        if self.month0 == 0 {
            Self {
                year: self.year - 1,
                month0: 11,
            }
        } else {
            Self {
                month0: self.month0 - 1,
                ..self
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month0 == 11 {
            Self {
                year: self.year + 1,
                month0: 0,
            }
        } else {
            Self {
                month0: self.month0 + 1,
                ..self
            }
        }
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, day)
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        next.day(1)
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(31)
    }

    /// Weekday of the 1st, 0 = Sunday.
    pub fn first_weekday_offset(&self) -> u32 {
        self.day(1)
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Padding before the 1st or after the last day. Not clickable.
    Empty,
    Day {
        day: u32,
        is_selected: bool,
        is_today: bool,
    },
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            Self::Day { day, .. } => Some(*day),
            Self::Empty => None,
        }
    }
}

/// Month navigation and day picking for the date popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendarState {
    visible_month: YearMonth,
    open: bool,
}

impl MonthCalendarState {
    pub fn new(selection: &DaySelection) -> Self {
        Self {
            visible_month: YearMonth::of(selection.selected()),
            open: false,
        }
    }

    pub fn visible_month(&self) -> YearMonth {
        self.visible_month
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the popup on the month of the current selection.
    pub fn open(&mut self, selection: &DaySelection) {
        self.visible_month = YearMonth::of(selection.selected());
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn prev_month(&mut self) {
        self.visible_month = self.visible_month.prev();
    }

    pub fn next_month(&mut self) {
        self.visible_month = self.visible_month.next();
    }

    /// Select `day` of the visible month and close. Days outside the month
    /// change nothing.
    pub fn pick_day(
        &mut self,
        day: u32,
        selection: &mut DaySelection,
    ) -> Result<NaiveDate, PlannerError> {
        let date = self.visible_month.day(day).ok_or(PlannerError::InvalidDay {
            year: self.visible_month.year,
            month: self.visible_month.month0 + 1,
            day,
        })?;
        selection.select(date);
        self.open = false;
        Ok(date)
    }

    pub fn jump_to_today(&mut self, selection: &mut DaySelection) -> NaiveDate {
        self.jump_to(chrono::Local::now().date_naive(), selection)
    }

    /// Select `today`, show its month and close.
    pub fn jump_to(&mut self, today: NaiveDate, selection: &mut DaySelection) -> NaiveDate {
        selection.select(today);
        self.visible_month = YearMonth::of(today);
        self.open = false;
        today
    }

    /// The 42 cells of the visible month. Cell `i` shows day
    /// `i - first_weekday_offset + 1` when that falls inside the month.
    pub fn grid(&self, selected: NaiveDate, today: NaiveDate) -> Vec<GridCell> {
        let month = self.visible_month;
        let days = month.days_in_month() as i64;
        let offset = month.first_weekday_offset() as i64;

        (0..GRID_CELLS as i64)
            .map(|i| {
                let day = i - offset + 1;
                if day < 1 || day > days {
                    return GridCell::Empty;
                }
                let day = day as u32;
                let date = month.day(day);
                GridCell::Day {
                    day,
                    is_selected: date == Some(selected),
                    is_today: date == Some(today),
                }
            })
            .collect()
    }
}
