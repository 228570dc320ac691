use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

use notion_habits_core::{NotionConfig, RetryPolicy, NOTION_API_URL};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_ATTEMPTS: u32 = 1;
const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Notion integration token
    #[serde(serialize_with = "serialize_masked")]
    pub notion_token: ConfigValue<String>,
    /// Id of the Days database
    pub days_database_id: ConfigValue<String>,
    /// Id of the Daily Log database
    pub daily_log_database_id: ConfigValue<String>,
    /// Notion API base URL
    pub api_url: ConfigValue<String>,
    /// Per-request timeout in seconds (0 = no timeout)
    pub request_timeout_secs: ConfigValue<u64>,
    /// Attempts per request, including the first
    pub max_attempts: ConfigValue<u32>,
    /// Delay unit between attempts in milliseconds
    pub retry_backoff_ms: ConfigValue<u64>,
    /// Habit list file (built-in list when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habits_file: Option<ConfigValue<PathBuf>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    notion_token: Option<String>,
    days_database_id: Option<String>,
    daily_log_database_id: Option<String>,
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    max_attempts: Option<u32>,
    retry_backoff_ms: Option<u64>,
    habits_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with defaults
        let mut notion_token = ConfigValue::new(String::new(), ConfigSource::Default);
        let mut days_database_id = ConfigValue::new(String::new(), ConfigSource::Default);
        let mut daily_log_database_id = ConfigValue::new(String::new(), ConfigSource::Default);
        let mut api_url = ConfigValue::new(NOTION_API_URL.to_string(), ConfigSource::Default);
        let mut request_timeout_secs =
            ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default);
        let mut max_attempts = ConfigValue::new(DEFAULT_MAX_ATTEMPTS, ConfigSource::Default);
        let mut retry_backoff_ms =
            ConfigValue::new(DEFAULT_RETRY_BACKOFF_MS, ConfigSource::Default);
        let mut habits_file = None;
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(token) = file_config.notion_token {
                notion_token = ConfigValue::new(token, ConfigSource::File);
            }
            if let Some(id) = file_config.days_database_id {
                days_database_id = ConfigValue::new(id, ConfigSource::File);
            }
            if let Some(id) = file_config.daily_log_database_id {
                daily_log_database_id = ConfigValue::new(id, ConfigSource::File);
            }
            if let Some(url) = file_config.api_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(secs) = file_config.request_timeout_secs {
                request_timeout_secs = ConfigValue::new(secs, ConfigSource::File);
            }
            if let Some(attempts) = file_config.max_attempts {
                max_attempts = ConfigValue::new(attempts, ConfigSource::File);
            }
            if let Some(ms) = file_config.retry_backoff_ms {
                retry_backoff_ms = ConfigValue::new(ms, ConfigSource::File);
            }
            if let Some(habits_path) = file_config.habits_file {
                // Resolve relative paths against config file's directory
                let resolved_path = if habits_path.is_relative() {
                    path.parent()
                        .map(|p| p.join(&habits_path))
                        .unwrap_or(habits_path)
                } else {
                    habits_path
                };
                habits_file = Some(ConfigValue::new(resolved_path, ConfigSource::File));
            }
        }

        // Apply environment variable overrides; empty values count as unset
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        if let Some(token) = env("NOTION_TOKEN") {
            notion_token = ConfigValue::new(token, ConfigSource::Environment);
        }
        if let Some(id) = env("DAYS_DATABASE_ID") {
            days_database_id = ConfigValue::new(id, ConfigSource::Environment);
        }
        if let Some(id) = env("DAILY_LOG_DATABASE_ID") {
            daily_log_database_id = ConfigValue::new(id, ConfigSource::Environment);
        }
        if let Some(url) = env("NOTION_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Some(habits_path) = env("NOTION_HABITS_FILE") {
            habits_file = Some(ConfigValue::new(
                PathBuf::from(habits_path),
                ConfigSource::Environment,
            ));
        }

        Ok(Self {
            notion_token,
            days_database_id,
            daily_log_database_id,
            api_url,
            request_timeout_secs,
            max_attempts,
            retry_backoff_ms,
            habits_file,
            config_file,
        })
    }

    /// Settings handed to the core library. Not validated here.
    pub fn notion_config(&self) -> NotionConfig {
        let timeout = match self.request_timeout_secs.value {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        NotionConfig::new(
            self.notion_token.value.clone(),
            self.days_database_id.value.clone(),
            self.daily_log_database_id.value.clone(),
        )
        .with_api_url(self.api_url.value.clone())
        .with_timeout(timeout)
        .with_retry(RetryPolicy::new(
            self.max_attempts.value,
            Duration::from_millis(self.retry_backoff_ms.value),
        ))
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/notion-habits/
    /// - macOS: ~/Library/Application Support/notion-habits/
    /// - Windows: %APPDATA%/notion-habits/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notion-habits")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Shows only the start of a secret.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{}...", prefix)
}

fn serialize_masked<S: Serializer>(
    value: &ConfigValue<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    ConfigValue::new(mask_secret(&value.value), value.source.clone()).serialize(serializer)
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
