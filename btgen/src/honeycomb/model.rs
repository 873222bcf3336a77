//! Records returned by the Honeycomb API.
//!
//! Missing fields decode to their defaults and `null` lists decode to empty
//! lists, since the API omits or nulls out fields that were never set.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A saved dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub style: String,
    #[serde(deserialize_with = "null_as_default")]
    pub column_layout: String,
    #[serde(deserialize_with = "null_as_default")]
    pub queries: Vec<BoardQuery>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: BoardLinks,
}

/// A reference from a board to one of its queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardQuery {
    #[serde(deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(deserialize_with = "null_as_default")]
    pub graph_settings: GraphSettings,
    #[serde(deserialize_with = "null_as_default")]
    pub query_style: String,
    pub dataset: String,
    pub query_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub query_annotation_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardLinks {
    pub board_url: String,
}

/// Per-query display flags on a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    pub omit_missing_values: bool,
    pub stacked_graphs: bool,
    pub log_scale: bool,
    pub utc_xaxis: bool,
    pub overlaid_charts: bool,
    pub hide_markers: bool,
}

/// A stored query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub calculations: Vec<Calculation>,
    #[serde(deserialize_with = "null_as_default")]
    pub filters: Vec<Filter>,
    #[serde(deserialize_with = "null_as_default")]
    pub filter_combination: String,
    #[serde(deserialize_with = "null_as_default")]
    pub breakdowns: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub orders: Vec<Order>,
    pub limit: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub havings: Vec<Having>,
    pub granularity: Option<i64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub time_range: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calculation {
    pub op: String,
    #[serde(deserialize_with = "null_as_default")]
    pub column: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub op: String,
    #[serde(deserialize_with = "null_as_default")]
    pub column: String,
    pub value: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_column: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(deserialize_with = "null_as_default")]
    pub column: String,
    #[serde(deserialize_with = "null_as_default")]
    pub op: String,
    #[serde(deserialize_with = "null_as_default")]
    pub order: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Having {
    pub calculate_op: String,
    #[serde(deserialize_with = "null_as_default")]
    pub column: String,
    pub op: String,
    pub value: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_column: Option<String>,
}

/// Human-facing name and description attached to a stored query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryAnnotation {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub query_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}
