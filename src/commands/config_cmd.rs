use clap::{Args, Subcommand, ValueEnum};
use std::fs;
use std::io::Write;

use crate::config::{mask_secret, Config, ConfigValue};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

const DEFAULT_CONFIG: &str = r#"# notion-habits configuration
#
# Environment variables (NOTION_TOKEN, DAYS_DATABASE_ID,
# DAILY_LOG_DATABASE_ID) override values set here.

# Notion integration token
notion_token: ""

# Database ids (from the database URLs)
days_database_id: ""
daily_log_database_id: ""

# Request timeout in seconds (0 = no timeout)
# request_timeout_secs: 30

# Attempts per request on transient failures (1 = no retry)
# max_attempts: 1
# retry_backoff_ms: 500

# Custom habit list (default: built-in list)
# habits_file: habits.yaml
"#;

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        let token = ConfigValue::new(
                            mask_secret(&config.notion_token.value),
                            config.notion_token.source.clone(),
                        );
                        print_value("notion_token", &token);
                        print_value("days_database_id", &config.days_database_id);
                        print_value("daily_log_database_id", &config.daily_log_database_id);
                        print_value("api_url", &config.api_url);
                        print_value("request_timeout_secs", &config.request_timeout_secs);
                        print_value("max_attempts", &config.max_attempts);
                        print_value("retry_backoff_ms", &config.retry_backoff_ms);

                        match &config.habits_file {
                            Some(path) => {
                                println!("habits_file: {}", path.value.display());
                                println!("  source: {}", path.source);
                            }
                            None => println!("habits_file: (built-in list)"),
                        }
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                // Check if config already exists
                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'notion-habits config show' to view current configuration.");
                    return Ok(());
                }

                // Create parent directory
                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(DEFAULT_CONFIG.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to add your Notion token and database ids.");
                Ok(())
            }
        }
    }
}

fn print_value<T: std::fmt::Display>(name: &str, value: &ConfigValue<T>) {
    let shown = value.value.to_string();
    if shown.is_empty() {
        println!("{}: (not set)", name);
    } else {
        println!("{}: {}", name, shown);
    }
    println!("  source: {}", value.source);
    println!();
}
