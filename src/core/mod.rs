pub mod clock;
pub mod day;
pub mod draft;
pub mod store;
pub mod task;
