use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use commands::{CheckCommand, ConfigCommand, HabitsCommand, ListCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "notion-habits")]
#[command(version)]
#[command(about = "Creates today's day and habit entries in Notion", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daily habit automation (default)
    Habits(HabitsCommand),

    /// Show the configured habits without contacting Notion
    List(ListCommand),

    /// Check whether a day entry already exists
    Check(CheckCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        let config_error = std::iter::successors(Some(e.as_ref()), |e| e.source())
            .find_map(|e| e.downcast_ref::<notion_habits_core::ConfigError>());
        match config_error {
            Some(config_error) => print_config_guidance(config_error),
            None => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Habits(cmd)) => cmd.run(&config).await?,
        Some(Commands::List(cmd)) => cmd.run(&config)?,
        Some(Commands::Check(cmd)) => cmd.run(&config).await?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => HabitsCommand::default().run(&config).await?,
    }

    Ok(())
}

fn print_config_guidance(error: &notion_habits_core::ConfigError) {
    eprintln!("Configuration error: {}", error);
    eprintln!();
    eprintln!("Make sure the following are set, either as environment variables");
    eprintln!("or in {}:", Config::default_config_path().display());
    for name in error.missing() {
        eprintln!("  - {}", name);
    }
    eprintln!();
    eprintln!("Config file keys use the lowercase names, e.g. notion_token.");
}
