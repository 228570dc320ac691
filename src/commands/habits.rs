//! Daily habit automation command.

use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use notion_habits_core::{DailyHabitAutomation, HabitOutcome, NotionClient, RunOutcome, RunSummary};

use super::load_habits;
use crate::config::Config;

/// Create today's day entry and all habit entries linked to it
#[derive(Args, Default)]
pub struct HabitsCommand {
    /// Date to create entries for (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Habit list file (YAML)
    #[arg(long)]
    habits_file: Option<PathBuf>,

    /// Exit with an error if any habit fails
    #[arg(long)]
    strict: bool,
}

impl HabitsCommand {
    pub async fn run(&self, config: &Config) -> Result<(), HabitsError> {
        let notion = config.notion_config();
        notion.validate()?;
        let habits = load_habits(self.habits_file.as_ref(), config)?;

        let client = NotionClient::from_config(&notion)?;
        let automation = DailyHabitAutomation::new(Arc::new(client), &notion, habits);

        println!("Starting daily habit automation...");
        println!();

        let outcome = match self.date {
            Some(date) => automation.run_for_date(date).await,
            None => automation.run().await,
        };

        match outcome {
            RunOutcome::Aborted { day, reason } => {
                Err(HabitsError::Aborted(day.name().to_string(), reason))
            }
            RunOutcome::Completed(summary) => {
                print!("{}", render_summary(&summary));
                if self.strict && !summary.is_complete() {
                    return Err(HabitsError::PartialFailure(summary.failed_count()));
                }
                Ok(())
            }
        }
    }
}

fn render_summary(summary: &RunSummary) -> String {
    let rule = "=".repeat(40);
    let mut out = String::new();

    let day = summary.day();
    out.push_str(&format!(
        "Day: {} (page {})\n\n",
        day.name(),
        day.id().unwrap_or_default()
    ));

    out.push_str("Habits:\n");
    for outcome in summary.outcomes() {
        match outcome {
            HabitOutcome::Created { habit, .. } => {
                out.push_str(&format!("  ✓ {}\n", habit.name));
            }
            HabitOutcome::Failed { habit, .. } => {
                out.push_str(&format!("  ✗ {} (failed)\n", habit.name));
            }
        }
    }

    out.push_str(&format!("\n{}\n", rule));
    out.push_str("Summary:\n");
    out.push_str(&format!("  Created: {} habits\n", summary.created_count()));
    if !summary.is_complete() {
        out.push_str(&format!("  Failed: {} habits\n", summary.failed_count()));
    }
    out.push_str(&format!("{}\n\n", rule));

    if summary.is_complete() {
        out.push_str("All done! Have a productive day!\n");
    } else {
        out.push_str("Warning: some habits failed. Check the errors above.\n");
    }
    out
}

/// Errors from the habits command
#[derive(Debug)]
pub enum HabitsError {
    /// Required settings are missing
    Config(notion_habits_core::ConfigError),
    /// Habit list or HTTP client setup failed
    Setup(notion_habits_core::Error),
    /// Day creation failed, no habits were attempted
    Aborted(String, String),
    /// Some habits failed and `--strict` was given
    PartialFailure(usize),
}

impl std::fmt::Display for HabitsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HabitsError::Config(e) => write!(f, "{}", e),
            HabitsError::Setup(e) => write!(f, "{}", e),
            HabitsError::Aborted(day, reason) => {
                write!(f, "Failed to create day '{}': {}. Aborting.", day, reason)
            }
            HabitsError::PartialFailure(count) => write!(f, "{} habits failed", count),
        }
    }
}

impl std::error::Error for HabitsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HabitsError::Config(e) => Some(e),
            HabitsError::Setup(e) => Some(e),
            _ => None,
        }
    }
}

impl From<notion_habits_core::ConfigError> for HabitsError {
    fn from(e: notion_habits_core::ConfigError) -> Self {
        HabitsError::Config(e)
    }
}

impl From<notion_habits_core::Error> for HabitsError {
    fn from(e: notion_habits_core::Error) -> Self {
        HabitsError::Setup(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notion_habits_core::{Day, HabitList};

    fn summary(failed: &[&str]) -> RunSummary {
        let day = Day::for_date(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()).with_id("D1");
        let outcomes = HabitList::default()
            .iter()
            .map(|habit| {
                if failed.contains(&habit.name.as_str()) {
                    HabitOutcome::Failed {
                        habit: habit.clone(),
                        reason: "API error [400]".to_string(),
                    }
                } else {
                    HabitOutcome::Created {
                        habit: habit.clone(),
                        page_id: format!("H-{}", habit.name),
                    }
                }
            })
            .collect();
        RunSummary::new(day, outcomes)
    }

    #[test]
    fn test_render_summary_partial_failure() {
        let output = render_summary(&summary(&["Work"]));
        assert!(output.contains("Day: Mon 5 May (page D1)"));
        assert!(output.contains("  ✗ Work (failed)\n"));
        assert!(output.contains("Created: 6 habits"));
        assert!(output.contains("Failed: 1 habits"));
        assert!(output.contains("Warning: some habits failed"));
    }

    #[test]
    fn test_render_summary_all_created() {
        let output = render_summary(&summary(&[]));
        assert!(output.contains("Created: 7 habits"));
        assert!(!output.contains("Failed:"));
        assert!(output.contains("All done!"));
    }

    #[test]
    fn test_aborted_message() {
        let err = HabitsError::Aborted("Mon 5 May".into(), "Request timed out".into());
        assert_eq!(
            err.to_string(),
            "Failed to create day 'Mon 5 May': Request timed out. Aborting."
        );
    }

    #[test]
    fn test_config_error_keeps_missing_names() {
        let err: HabitsError =
            notion_habits_core::ConfigError::Missing(vec!["NOTION_TOKEN"]).into();
        assert!(matches!(&err, HabitsError::Config(e) if e.missing() == ["NOTION_TOKEN"]));
    }
}
