use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display pattern for day names, e.g. "Mon 5 May".
///
/// chrono renders `%a` and `%b` in English regardless of the process locale.
const NAME_FORMAT: &str = "%a %-d %b";

/// A calendar day in the Days database.
///
/// The name is derived from the date. The id is absent until the page has
/// been created in Notion and is never changed afterwards; [`Day::with_id`]
/// produces a new value instead.
///
/// Deserializing reads only `id` and `date`; the name is always rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DayRecord")]
pub struct Day {
    id: Option<String>,
    name: String,
    date: NaiveDate,
}

/// Serialized form of a [`Day`]; any stored name is ignored.
#[derive(Deserialize)]
struct DayRecord {
    #[serde(default)]
    id: Option<String>,
    date: NaiveDate,
}

impl From<DayRecord> for Day {
    fn from(record: DayRecord) -> Self {
        let day = Day::for_date(record.date);
        match record.id {
            Some(id) => day.with_id(id),
            None => day,
        }
    }
}

impl Day {
    /// Creates an unidentified day for the given date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            id: None,
            name: date.format(NAME_FORMAT).to_string(),
            date,
        }
    }

    /// Creates an unidentified day for the local current date.
    pub fn for_today() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// Returns a copy of this day carrying the given Notion page id.
    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: self.name.clone(),
            date: self.date,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.date)
    }
}
