//! REST client for the Notion API.
//!
//! [`NotionApi`] is the seam the services talk to; [`NotionClient`] is the
//! reqwest-backed implementation. Every failure is logged and returned as a
//! [`RemoteCallFailure`], never raised past this module.

mod error;
mod notion;

use async_trait::async_trait;
use serde_json::Value;

pub use error::RemoteCallFailure;
pub use notion::NotionClient;

/// The two Notion operations the automation needs.
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// Creates a page from a `POST /pages` body and returns its id.
    async fn create_page(&self, body: &Value) -> Result<String, RemoteCallFailure>;

    /// Queries a database and returns the raw response body.
    async fn query_database(
        &self,
        database_id: &str,
        filter: &Value,
    ) -> Result<String, RemoteCallFailure>;
}
