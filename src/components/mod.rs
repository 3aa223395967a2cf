pub mod month_calendar;
pub mod time_picker;
