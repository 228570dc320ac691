use std::path::Path;

use serde::{Deserialize, Serialize};

use super::habit::{Habit, HabitGroup};
use crate::error::{Error, Result};

/// Ordered, read-only set of habits created each day.
///
/// Order is significant: habits are created in exactly this order.
///
/// # File Format
///
/// ```yaml
/// - name: Meditate
///   group: morning
/// - name: Exercise
///   group: evening
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Habit>", into = "Vec<Habit>")]
pub struct HabitList {
    habits: Vec<Habit>,
}

impl Default for HabitList {
    fn default() -> Self {
        Self {
            habits: vec![
                Habit::new("Meditate", HabitGroup::Morning),
                Habit::new("Stretching", HabitGroup::Morning),
                Habit::new("Work", HabitGroup::Morning),
                Habit::new("Morning routine", HabitGroup::Morning),
                Habit::new("Exercise", HabitGroup::Evening),
                Habit::new("Learn", HabitGroup::Evening),
                Habit::new("Night routine", HabitGroup::Evening),
            ],
        }
    }
}

impl TryFrom<Vec<Habit>> for HabitList {
    type Error = String;

    fn try_from(habits: Vec<Habit>) -> std::result::Result<Self, Self::Error> {
        let list = Self { habits };
        list.check()?;
        Ok(list)
    }
}

impl From<HabitList> for Vec<Habit> {
    fn from(list: HabitList) -> Self {
        list.habits
    }
}

impl HabitList {
    /// Builds a list from habits in their declared order.
    pub fn new(habits: Vec<Habit>) -> Result<Self> {
        Self::try_from(habits).map_err(Error::HabitList)
    }

    /// Parses a YAML habit list.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(|e| Error::HabitList(e.to_string()))
    }

    /// Loads a YAML habit list from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::HabitListRead(path.to_path_buf(), e))?;
        Self::from_yaml_str(&contents)
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.habits.is_empty() {
            return Err("no habits defined".to_string());
        }
        if let Some(pos) = self.habits.iter().position(|h| h.name.trim().is_empty()) {
            return Err(format!("habit #{} has an empty name", pos + 1));
        }
        Ok(())
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Habit> {
        self.habits.iter()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Habits of one group, in declared order.
    pub fn by_group(&self, group: HabitGroup) -> Vec<&Habit> {
        self.habits.iter().filter(|h| h.group == group).collect()
    }
}

impl<'a> IntoIterator for &'a HabitList {
    type Item = &'a Habit;
    type IntoIter = std::slice::Iter<'a, Habit>;

    fn into_iter(self) -> Self::IntoIter {
        self.habits.iter()
    }
}
