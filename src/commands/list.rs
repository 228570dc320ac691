use clap::Args;
use std::path::PathBuf;

use notion_habits_core::{HabitGroup, HabitList};

use super::load_habits;
use crate::config::Config;

/// Show the configured habits grouped by time of day
#[derive(Args)]
pub struct ListCommand {
    /// Habit list file (YAML)
    #[arg(long)]
    habits_file: Option<PathBuf>,
}

impl ListCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let habits = load_habits(self.habits_file.as_ref(), config)?;
        print!("{}", render_habit_list(&habits));
        Ok(())
    }
}

fn render_habit_list(habits: &HabitList) -> String {
    let mut out = String::new();
    for group in HabitGroup::ALL {
        let in_group = habits.by_group(group);
        if in_group.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", group));
        for habit in in_group {
            out.push_str(&format!("  - {}\n", habit.name));
        }
    }
    out.push_str(&format!("\n{} habits\n", habits.len()));
    out
}
