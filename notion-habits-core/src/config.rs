//! Notion API settings shared by the client and the services.

use std::time::Duration;

/// Base URL of the Notion REST API.
pub const NOTION_API_URL: &str = "https://api.notion.com/v1";
/// Value sent in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2025-09-03";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default delay unit between retry attempts.
const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// Environment variable names for the required settings.
pub const NOTION_TOKEN_VAR: &str = "NOTION_TOKEN";
pub const DAYS_DATABASE_ID_VAR: &str = "DAYS_DATABASE_ID";
pub const DAILY_LOG_DATABASE_ID_VAR: &str = "DAILY_LOG_DATABASE_ID";

/// Required settings are missing or empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{} is not configured", .0.join(", "))]
    Missing(Vec<&'static str>),
}

impl ConfigError {
    /// Names of the settings that failed validation.
    pub fn missing(&self) -> &[&'static str] {
        match self {
            ConfigError::Missing(names) => names,
        }
    }
}

/// How often a transient failure is retried.
///
/// `max_attempts` counts the first call, so `1` means no retry. The delay
/// before attempt `n + 1` is `backoff * n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Delay to wait after the given (1-based) failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff * attempt
    }
}

/// Credentials and database identifiers for one run.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct NotionConfig {
    api_url: String,
    api_version: String,
    token: String,
    days_database_id: String,
    daily_log_database_id: String,
    timeout: Option<Duration>,
    retry: RetryPolicy,
}

impl NotionConfig {
    pub fn new(
        token: impl Into<String>,
        days_database_id: impl Into<String>,
        daily_log_database_id: impl Into<String>,
    ) -> Self {
        Self {
            api_url: NOTION_API_URL.to_string(),
            api_version: NOTION_VERSION.to_string(),
            token: token.into(),
            days_database_id: days_database_id.into(),
            daily_log_database_id: daily_log_database_id.into(),
            timeout: Some(DEFAULT_TIMEOUT),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// `None` leaves the transport default in place.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Checks that the token and both database ids are present.
    ///
    /// Every missing setting is reported, not just the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing: Vec<&'static str> = [
            (NOTION_TOKEN_VAR, &self.token),
            (DAYS_DATABASE_ID_VAR, &self.days_database_id),
            (DAILY_LOG_DATABASE_ID_VAR, &self.daily_log_database_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(missing))
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn days_database_id(&self) -> &str {
        &self.days_database_id
    }

    pub fn daily_log_database_id(&self) -> &str {
        &self.daily_log_database_id
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }
}
