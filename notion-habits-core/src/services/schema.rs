//! Notion property payload shapes.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Title property of a Days page.
pub const DAY_NAME_PROPERTY: &str = "Name";
/// Date property of a Days page.
pub const DAY_DATE_PROPERTY: &str = "Date";
/// Title property of a Daily Log page.
pub const HABIT_NAME_PROPERTY: &str = "Name";
/// Relation from a Daily Log page to its Days page.
pub const HABIT_DAY_PROPERTY: &str = "Day";

/// `{"title": [{"text": {"content": ...}}]}`
pub fn title(content: &str) -> Value {
    json!({ "title": [{ "text": { "content": content } }] })
}

/// `{"date": {"start": "YYYY-MM-DD"}}`
pub fn date(start: NaiveDate) -> Value {
    json!({ "date": { "start": start.format("%Y-%m-%d").to_string() } })
}

/// `{"relation": [{"id": ...}]}`
pub fn relation(page_id: &str) -> Value {
    json!({ "relation": [{ "id": page_id }] })
}

/// Body for `POST /pages` creating a page in `database_id`.
pub fn page<I>(database_id: &str, properties: I) -> Value
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

    json!({
        "parent": { "database_id": database_id },
        "properties": properties,
    })
}

/// Query filter matching pages whose date property equals `date`.
pub fn date_equals_filter(property: &str, date: NaiveDate) -> Value {
    json!({
        "filter": {
            "property": property,
            "date": { "equals": date.format("%Y-%m-%d").to_string() }
        }
    })
}

/// The part of a database query response we read.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<PageRef>,
}

#[derive(Debug, Deserialize)]
pub struct PageRef {
    pub id: String,
}
