use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// A row read from the `project` compatibility view.
///
/// The public query selects only the first four columns; the administrative
/// columns default to `None` when absent from the result set.
#[derive(FromRow, Debug, Clone, Default, PartialEq)]
pub struct ProjectRow {
    pub name: Option<String>,
    pub is_project: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[sqlx(default)]
    pub objectives: Option<String>,
    #[sqlx(default)]
    pub publish_date: Option<NaiveDate>,
    #[sqlx(default)]
    pub revision_count: Option<i32>,
}

/// One treatment unit joined with one of its treatments.
///
/// A unit with three treatments arrives as three rows sharing the same `id`.
#[derive(FromRow, Debug, Clone, Default, PartialEq)]
pub struct TreatmentRow {
    pub id: String,
    #[sqlx(rename = "type")]
    pub feature_type: Option<String>,
    pub width: Option<Decimal>,
    pub length: Option<Decimal>,
    pub area: Option<Decimal>,
    pub comments: Option<String>,
    /// GeoJSON features describing the unit; only the first is used downstream.
    #[sqlx(json)]
    pub geojson: Vec<JsonValue>,
    pub treatment_name: Option<String>,
    pub treatment_year: Option<i32>,
}

/// A published project (or plan) matched by the public search.
#[derive(FromRow, Debug, Clone, Default, PartialEq)]
pub struct SearchRow {
    pub id: i32,
    pub name: Option<String>,
    pub state_code: Option<i32>,
    pub number_sites: Option<i32>,
    pub size_ha: Option<Decimal>,
    pub is_project: Option<bool>,
    /// `json_agg` of the project's location features; `NULL` when it has none.
    pub geometry: Option<JsonValue>,
}

/// A generic `id -> name` reference row.
#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct CodeRow {
    pub id: i32,
    pub name: String,
}

/// Investment action categories also carry their parent funding source.
#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct InvestmentActionCategoryRow {
    pub id: i32,
    pub fs_id: i32,
    pub name: String,
}

/// The single column returned by a system-constant lookup.
#[derive(FromRow, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantRow {
    pub constant: Option<String>,
}

/// Every code set, as fetched from the reference tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeSetRows {
    pub first_nations: Vec<CodeRow>,
    pub funding_source: Vec<CodeRow>,
    pub investment_action_category: Vec<InvestmentActionCategoryRow>,
    pub regions: Vec<CodeRow>,
    pub species: Vec<CodeRow>,
    pub system_roles: Vec<CodeRow>,
    pub project_roles: Vec<CodeRow>,
    pub administrative_activity_status_type: Vec<CodeRow>,
}
