use std::sync::Arc;

use super::schema::{self, HABIT_DAY_PROPERTY, HABIT_NAME_PROPERTY};
use crate::client::NotionApi;
use crate::config::NotionConfig;
use crate::error::{Error, Result};
use crate::models::{Day, Habit};

/// Creates habit pages in the Daily Log database.
pub struct HabitService {
    client: Arc<dyn NotionApi>,
    database_id: String,
}

impl HabitService {
    pub fn new(client: Arc<dyn NotionApi>, config: &NotionConfig) -> Self {
        Self {
            client,
            database_id: config.daily_log_database_id().to_string(),
        }
    }

    /// Creates a Daily Log page for `habit` linked to `day`.
    ///
    /// `day` must already exist in Notion. Returns the new page id.
    pub async fn create_for_day(&self, habit: &Habit, day: &Day) -> Result<String> {
        let day_id = day
            .id()
            .ok_or_else(|| Error::DayNotCreated(day.name().to_string()))?;

        let body = schema::page(
            &self.database_id,
            [
                (HABIT_NAME_PROPERTY, schema::title(&habit.name)),
                (HABIT_DAY_PROPERTY, schema::relation(day_id)),
            ],
        );

        Ok(self.client.create_page(&body).await?)
    }
}
