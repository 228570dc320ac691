//! Translation between domain models and Notion page payloads.
//!
//! Each service builds one request body and makes a single client call.
//! Looping, counting and failure policy belong to the automation.

mod day_service;
mod habit_service;
pub mod schema;

pub use day_service::DayService;
pub use habit_service::HabitService;
