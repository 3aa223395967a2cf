pub mod components;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod reflection;

pub use error::PlannerError;
pub use logging::{debug_logging, set_debug_logging};
