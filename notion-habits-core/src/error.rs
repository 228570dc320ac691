//! Crate-level error types.

use std::path::PathBuf;

use crate::client::RemoteCallFailure;
use crate::config::ConfigError;

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required settings are missing
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A call to the Notion API failed
    #[error(transparent)]
    Remote(#[from] RemoteCallFailure),

    /// Habit list file could not be read
    #[error("Failed to read habit list '{0}': {1}")]
    HabitListRead(PathBuf, #[source] std::io::Error),

    /// Habit list could not be parsed or is invalid
    #[error("Invalid habit list: {0}")]
    HabitList(String),

    /// A habit was linked to a day that has no Notion page yet
    #[error("Day '{0}' has not been created in Notion")]
    DayNotCreated(String),

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
