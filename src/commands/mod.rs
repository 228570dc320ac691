mod check;
mod config_cmd;
mod habits;
mod list;

pub use check::CheckCommand;
pub use config_cmd::ConfigCommand;
pub use habits::HabitsCommand;
pub use list::ListCommand;

use std::path::PathBuf;

use notion_habits_core::HabitList;

use crate::config::Config;

/// Habit list to use: `--habits-file`, then configured file, then built-in.
fn load_habits(
    cli_path: Option<&PathBuf>,
    config: &Config,
) -> notion_habits_core::Result<HabitList> {
    let path = cli_path.or(config.habits_file.as_ref().map(|v| &v.value));
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading habit list");
            HabitList::load(path)
        }
        None => Ok(HabitList::default()),
    }
}
