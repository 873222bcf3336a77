//! Board templates: boards reshaped for reuse by the template registration
//! system, with column names optionally replaced by variable references.

use serde_json::Value as JsonValue;

use crate::honeycomb::GraphSettings;
use crate::ops::{AggregateOp, FilterCombination, FilterOp, QueryStyle, SortDirection};
use crate::VariableSpec;

/// A column either named literally or through a declared variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    Literal(String),
    Variable(String),
}

impl Column {
    /// The column or variable name.
    pub fn name(&self) -> &str {
        match self {
            Self::Literal(name) | Self::Variable(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub op: AggregateOp,
    pub column: Column,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub op: FilterOp,
    pub column: Column,
    pub value: JsonValue,
    pub join_column: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    /// `None` when the query did not specify how its filters combine.
    pub combination: Option<FilterCombination>,
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Orders on a calculation may omit the column.
    pub column: Option<Column>,
    /// Orders on a breakdown have no operator.
    pub op: Option<AggregateOp>,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Having {
    pub calculate_op: AggregateOp,
    pub column: Column,
    pub op: FilterOp,
    pub value: JsonValue,
    pub join_column: Option<String>,
}

/// The executable part of a query template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    pub id: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub time_range: Option<i64>,
    pub desired_granularity_seconds: Option<i64>,
    pub aggregates: Vec<Aggregate>,
    pub filter_set: FilterSet,
    pub groups: Vec<Column>,
    pub orders: Vec<Order>,
    pub limit: Option<u64>,
    pub havings: Vec<Having>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryTemplate {
    pub name: String,
    pub description: String,
    /// Taken from the caption of the query on its board.
    pub short_description: String,
    pub style: QueryStyle,
    pub graph_settings: GraphSettings,
    pub query_spec: QuerySpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardTemplate {
    /// Primary key, taken from the configured sequence number.
    pub pk: u64,
    pub name: String,
    pub description: String,
    pub graphic: u32,
    pub column_style: String,
    /// In the order the queries appear on the board.
    pub query_templates: Vec<QueryTemplate>,
    pub variables: Vec<VariableSpec>,
}
