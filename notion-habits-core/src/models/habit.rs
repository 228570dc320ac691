use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum HabitGroup {
    Morning,
    Evening,
}

impl HabitGroup {
    pub const ALL: [HabitGroup; 2] = [HabitGroup::Morning, HabitGroup::Evening];
}

impl fmt::Display for HabitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HabitGroup::Morning => write!(f, "MORNING"),
            HabitGroup::Evening => write!(f, "EVENING"),
        }
    }
}

impl FromStr for HabitGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(HabitGroup::Morning),
            "evening" => Ok(HabitGroup::Evening),
            _ => Err(format!(
                "Invalid habit group '{}'. Valid options: morning, evening",
                s
            )),
        }
    }
}

impl TryFrom<String> for HabitGroup {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A habit to track once per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    pub group: HabitGroup,
}

impl Habit {
    pub fn new(name: impl Into<String>, group: HabitGroup) -> Self {
        Self {
            name: name.into(),
            group,
        }
    }
}

impl fmt::Display for Habit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.group)
    }
}
