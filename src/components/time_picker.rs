use crate::core::clock::ClockTime;

/// Height of one row in either column.
pub const ITEM_HEIGHT: f64 = 40.0;
pub const VISIBLE_ITEMS: u32 = 5;
pub const VIEWPORT_HEIGHT: f64 = ITEM_HEIGHT * VISIBLE_ITEMS as f64;
/// Blank space above the first and below the last row so either end can
/// sit in the middle of the viewport.
pub const EDGE_PADDING: f64 = (VIEWPORT_HEIGHT - ITEM_HEIGHT) / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Hour,
    Minute,
}

impl Column {
    pub fn max_index(&self) -> u32 {
        match self {
            Self::Hour => 23,
            Self::Minute => 59,
        }
    }

    /// Snap a raw scroll offset to the nearest whole row, clamped to the column.
    pub fn index_at(&self, raw_offset: f64) -> u32 {
        let index = (raw_offset / ITEM_HEIGHT).round();
        // NaN casts to 0
        (index.max(0.0) as u32).min(self.max_index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Instruction for the view to move a column so `offset` is centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub column: Column,
    pub offset: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollCommand {
    fn center_on(column: Column, index: u32, behavior: ScrollBehavior) -> Self {
        Self {
            column,
            offset: index as f64 * ITEM_HEIGHT,
            behavior,
        }
    }
}

/// Two scrollable wheels picking an hour and a minute.
///
/// Every update overwrites the column's value, so drag events and animated
/// programmatic scrolls can interleave freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimePicker {
    #[default]
    Closed,
    Open { hour: u32, minute: u32 },
}

impl TimePicker {
    /// Open on `initial` (09:00 when absent or unparseable). Returns the
    /// direct jumps that put the initial value in view.
    pub fn open(&mut self, initial: Option<&str>) -> [ScrollCommand; 2] {
        self.open_or(initial, ClockTime::DEFAULT_START)
    }

    /// Like [`open`](Self::open), with `fallback` in place of 09:00. Callers
    /// pass the configured default start here.
    pub fn open_or(&mut self, initial: Option<&str>, fallback: ClockTime) -> [ScrollCommand; 2] {
        let value = initial
            .and_then(|s| ClockTime::parse(s).ok())
            .unwrap_or(fallback);
        *self = Self::Open {
            hour: value.hour(),
            minute: value.minute(),
        };
        [
            ScrollCommand::center_on(Column::Hour, value.hour(), ScrollBehavior::Instant),
            ScrollCommand::center_on(Column::Minute, value.minute(), ScrollBehavior::Instant),
        ]
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn value(&self) -> Option<ClockTime> {
        match *self {
            Self::Open { hour, minute } => ClockTime::new(hour, minute),
            Self::Closed => None,
        }
    }

    /// Scroll position report from the view. Ignored while closed.
    pub fn scroll(&mut self, column: Column, raw_offset: f64) {
        let index = column.index_at(raw_offset);
        self.set(column, index);
    }

    /// Tap on a row: the value applies at once and the column animates there.
    pub fn select_item(&mut self, column: Column, index: u32) -> Option<ScrollCommand> {
        if !self.is_open() {
            return None;
        }
        let index = index.min(column.max_index());
        self.set(column, index);
        Some(ScrollCommand::center_on(column, index, ScrollBehavior::Smooth))
    }

    /// Close and hand back the chosen value as `HH:MM`.
    pub fn confirm(&mut self) -> Option<String> {
        let value = self.value()?;
        *self = Self::Closed;
        log::debug!("Time picker confirmed {}", value);
        Some(value.to_string())
    }

    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }

    fn set(&mut self, column: Column, index: u32) {
        if let Self::Open { hour, minute } = self {
            match column {
                Column::Hour => *hour = index,
                Column::Minute => *minute = index,
            }
        }
    }
}
