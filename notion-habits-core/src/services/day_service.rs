use std::sync::Arc;

use chrono::NaiveDate;

use super::schema::{self, QueryResponse, DAY_DATE_PROPERTY, DAY_NAME_PROPERTY};
use crate::client::{NotionApi, RemoteCallFailure};
use crate::config::NotionConfig;
use crate::error::Result;
use crate::models::Day;

/// Creates and looks up pages in the Days database.
pub struct DayService {
    client: Arc<dyn NotionApi>,
    database_id: String,
}

impl DayService {
    pub fn new(client: Arc<dyn NotionApi>, config: &NotionConfig) -> Self {
        Self {
            client,
            database_id: config.days_database_id().to_string(),
        }
    }

    /// Creates a Days page for `day`.
    ///
    /// Returns a copy of `day` carrying the new page id.
    pub async fn create(&self, day: &Day) -> Result<Day> {
        let body = schema::page(
            &self.database_id,
            [
                (DAY_NAME_PROPERTY, schema::title(day.name())),
                (DAY_DATE_PROPERTY, schema::date(day.date())),
            ],
        );

        let page_id = self.client.create_page(&body).await?;
        Ok(day.with_id(page_id))
    }

    /// Returns the id of the first Days page dated `date`, if any.
    pub async fn find_by_date(&self, date: NaiveDate) -> Result<Option<String>> {
        let filter = schema::date_equals_filter(DAY_DATE_PROPERTY, date);
        let body = self
            .client
            .query_database(&self.database_id, &filter)
            .await?;

        let response: QueryResponse = serde_json::from_str(&body).map_err(|e| {
            let failure = RemoteCallFailure::Parse(e.to_string());
            tracing::error!(operation = "find_by_date", error = %failure, "Notion request failed");
            failure
        })?;

        Ok(response.results.into_iter().next().map(|page| page.id))
    }
}
