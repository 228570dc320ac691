//! reqwest-backed Notion client.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::error::RemoteCallFailure;
use super::NotionApi;
use crate::config::{NotionConfig, RetryPolicy};
use crate::error::Result;

/// Header carrying the API version.
const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// The only part of a created page we read.
#[derive(Debug, Deserialize)]
struct CreatedPage {
    id: String,
}

/// Authenticated client for the Notion REST API.
///
/// Every request carries the bearer token, the API version header and a
/// JSON content type. Only HTTP 200 counts as success.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    api_url: String,
    api_version: String,
    token: String,
    retry: RetryPolicy,
}

impl NotionClient {
    /// Creates a client from validated settings.
    pub fn from_config(config: &NotionConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_url: config.api_url().to_string(),
            api_version: config.api_version().to_string(),
            token: config.token().to_string(),
            retry: config.retry(),
        })
    }

    /// Returns the API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn pages_url(&self) -> String {
        format!("{}/pages", self.api_url)
    }

    fn query_url(&self, database_id: &str) -> String {
        format!("{}/databases/{}/query", self.api_url, database_id)
    }

    /// POSTs `body`, retrying transient failures per the retry policy.
    async fn post(
        &self,
        url: &str,
        body: &Value,
    ) -> std::result::Result<String, RemoteCallFailure> {
        let mut attempt = 1;
        loop {
            match self.post_once(url, body).await {
                Ok(text) => return Ok(text),
                Err(failure) if failure.is_transient() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_after(attempt);
                    tracing::warn!(
                        url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure,
                        "Retrying Notion request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(failure) => return Err(failure),
            }
        }
    }

    async fn post_once(
        &self,
        url: &str,
        body: &Value,
    ) -> std::result::Result<String, RemoteCallFailure> {
        tracing::debug!(url, "POST");

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(NOTION_VERSION_HEADER, &self.api_version)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            return Err(RemoteCallFailure::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

/// Writes the diagnostic for a failed call.
fn log_failure(operation: &str, failure: &RemoteCallFailure) {
    match failure {
        RemoteCallFailure::Status { status, body } => {
            tracing::error!(operation, status, body = %body, "Notion API error");
        }
        other => {
            tracing::error!(operation, error = %other, "Notion request failed");
        }
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn create_page(&self, body: &Value) -> std::result::Result<String, RemoteCallFailure> {
        let result = self.post(&self.pages_url(), body).await.and_then(|text| {
            serde_json::from_str::<CreatedPage>(&text)
                .map(|page| page.id)
                .map_err(|e| RemoteCallFailure::Parse(e.to_string()))
        });

        if let Err(failure) = &result {
            log_failure("create_page", failure);
        }
        result
    }

    async fn query_database(
        &self,
        database_id: &str,
        filter: &Value,
    ) -> std::result::Result<String, RemoteCallFailure> {
        let result = self.post(&self.query_url(database_id), filter).await;

        if let Err(failure) = &result {
            log_failure("query_database", failure);
        }
        result
    }
}
