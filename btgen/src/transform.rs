//! Conversion of Honeycomb boards into board templates.

use eyre::{Result, WrapErr};
use log::{debug, info, warn};

use crate::honeycomb::{self, BoardQuery, BoardReader, Query, QueryAnnotation};
use crate::ops::{AggregateOp, FilterCombination, FilterOp, QueryStyle, SortDirection};
use crate::template::{
    Aggregate, BoardTemplate, Filter, FilterSet, Having, Order, QuerySpec, QueryTemplate,
};
use crate::{Config, Variables};

/// Fetches the configured board along with every query and query annotation
/// it references, and assembles them into a board template.
///
/// Fetches happen sequentially in board order. The first failed fetch aborts
/// the conversion.
pub fn convert_board<R>(reader: &R, config: &Config, variables: &Variables) -> Result<BoardTemplate>
where
    R: BoardReader + ?Sized,
{
    info!("Loading Honeycomb Board: {}", config.board_id());
    let board = reader
        .board(config.board_id())
        .wrap_err_with(|| format!("failed to load board {}", config.board_id()))?;

    let mut query_templates = Vec::with_capacity(board.queries.len());
    for (index, reference) in board.queries.iter().enumerate() {
        debug!(
            "Board query {}: dataset {}, query {}, annotation {}",
            index + 1,
            reference.dataset,
            reference.query_id,
            reference.query_annotation_id
        );
        let query = reader
            .query(&reference.dataset, &reference.query_id)
            .wrap_err_with(|| {
                format!(
                    "failed to load query {} from dataset {} (board query {})",
                    reference.query_id,
                    reference.dataset,
                    index + 1
                )
            })?;
        let annotation = reader
            .query_annotation(&reference.dataset, &reference.query_annotation_id)
            .wrap_err_with(|| {
                format!(
                    "failed to load query annotation {} from dataset {} (board query {})",
                    reference.query_annotation_id,
                    reference.dataset,
                    index + 1
                )
            })?;
        query_templates.push(query_template(reference, &query, &annotation, variables));
    }

    Ok(BoardTemplate {
        pk: config.sequence_number(),
        name: board.name,
        description: board.description,
        graphic: config.graphic(),
        column_style: board.column_layout,
        query_templates,
        variables: variables.specs().to_vec(),
    })
}

/// Builds the template for one query on a board.
///
/// Display properties come from the board's reference to the query, names
/// from the annotation and everything else from the query itself.
pub fn query_template(
    reference: &BoardQuery,
    query: &Query,
    annotation: &QueryAnnotation,
    variables: &Variables,
) -> QueryTemplate {
    QueryTemplate {
        name: annotation.name.clone(),
        description: annotation.description.clone(),
        short_description: reference.caption.clone(),
        style: query_style(&reference.query_style),
        graph_settings: reference.graph_settings,
        query_spec: query_spec(query, variables),
    }
}

/// Copies a query into a query spec, substituting variable references for
/// the columns it aggregates, filters, groups, orders and has-filters on.
/// Values and join columns are copied as they are.
pub fn query_spec(query: &Query, variables: &Variables) -> QuerySpec {
    QuerySpec {
        id: non_empty(&query.id),
        start_time: query.start_time,
        end_time: query.end_time,
        time_range: query.time_range,
        desired_granularity_seconds: query.granularity,
        aggregates: query
            .calculations
            .iter()
            .map(|c| Aggregate {
                op: aggregate_op(&c.op),
                column: variables.column(&c.column),
            })
            .collect(),
        filter_set: FilterSet {
            combination: non_empty(&query.filter_combination)
                .map(|token| filter_combination(&token)),
            filters: query
                .filters
                .iter()
                .map(|f| filter(f, variables))
                .collect(),
        },
        groups: query
            .breakdowns
            .iter()
            .map(|g| variables.column(g))
            .collect(),
        orders: query.orders.iter().map(|o| order(o, variables)).collect(),
        limit: query.limit,
        havings: query
            .havings
            .iter()
            .map(|h| having(h, variables))
            .collect(),
    }
}

fn filter(f: &honeycomb::Filter, variables: &Variables) -> Filter {
    Filter {
        op: filter_op(&f.op),
        column: variables.column(&f.column),
        value: f.value.clone(),
        join_column: f.join_column.as_deref().and_then(non_empty),
    }
}

fn order(o: &honeycomb::Order, variables: &Variables) -> Order {
    Order {
        column: non_empty(&o.column).map(|c| variables.column(c)),
        op: non_empty(&o.op).map(|token| aggregate_op(&token)),
        direction: SortDirection::from_token(&o.order),
    }
}

fn having(h: &honeycomb::Having, variables: &Variables) -> Having {
    Having {
        calculate_op: aggregate_op(&h.calculate_op),
        column: variables.column(&h.column),
        op: filter_op(&h.op),
        value: h.value.clone(),
        join_column: h.join_column.as_deref().and_then(non_empty),
    }
}

fn aggregate_op(token: &str) -> AggregateOp {
    let op = AggregateOp::from_token(token);
    if op == AggregateOp::Unknown {
        warn!("Unrecognized calculation operator \"{}\"", token);
    }
    op
}

fn filter_op(token: &str) -> FilterOp {
    let op = FilterOp::from_token(token);
    if op == FilterOp::Unknown {
        warn!("Unrecognized filter operator \"{}\"", token);
    }
    op
}

fn filter_combination(token: &str) -> FilterCombination {
    let combination = FilterCombination::from_token(token);
    if combination == FilterCombination::Unknown {
        warn!("Unrecognized filter combination \"{}\"", token);
    }
    combination
}

fn query_style(token: &str) -> QueryStyle {
    let style = QueryStyle::from_token(token);
    if style == QueryStyle::Unknown {
        warn!("Unrecognized query style \"{}\"", token);
    }
    style
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
