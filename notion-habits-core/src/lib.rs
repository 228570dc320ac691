//! Notion Habits Core Library
//!
//! Domain models, the Notion REST client and the daily habit automation
//! shared by the `notion-habits` binary.

pub mod automation;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use automation::{DailyHabitAutomation, HabitOutcome, RunOutcome, RunSummary};
pub use client::{NotionApi, NotionClient, RemoteCallFailure};
pub use config::{ConfigError, NotionConfig, RetryPolicy, NOTION_API_URL, NOTION_VERSION};
pub use error::{Error, Result};
pub use models::{Day, Habit, HabitGroup, HabitList};
pub use services::{DayService, HabitService};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
