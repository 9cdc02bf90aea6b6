use core_types::SearchRow;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// One project or plan in the public search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: i32,
    pub name: String,
    pub state_code: Option<i32>,
    pub number_sites: Option<i32>,
    pub size_ha: Option<Decimal>,
    pub is_project: Option<bool>,
    pub geometry: Vec<JsonValue>,
}

impl SearchResult {
    pub fn from_row(row: SearchRow) -> Self {
        let geometry = match row.geometry {
            Some(JsonValue::Array(features)) => features,
            Some(JsonValue::Null) | None => Vec::new(),
            Some(feature) => vec![feature],
        };

        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            state_code: row.state_code,
            number_sites: row.number_sites,
            size_ha: row.size_ha,
            is_project: row.is_project,
            geometry,
        }
    }
}

impl From<SearchRow> for SearchResult {
    fn from(row: SearchRow) -> Self {
        Self::from_row(row)
    }
}
