//! Generation of Go source code from board templates.
//!
//! The board template is first lowered into a small code IR ([`ast`]), which
//! the [`Printer`] turns into the text of a single constructor function. The
//! function is then placed into a source file skeleton ([`SourceFile`]).

pub mod ast;
mod printer;
mod source;

use log::info;
use serde_json::Value as JsonValue;

pub use printer::{quote, Printer};
pub use source::SourceFile;

use self::ast::{Expr, Field, Function, Ident, Stmt};
use crate::honeycomb::GraphSettings;
use crate::template::{
    Aggregate, BoardTemplate, Column, Filter, FilterSet, Having, Order, QuerySpec, QueryTemplate,
};
use crate::{Error, ValueProvider, VariableSpec};

/// Package the generated file belongs to.
pub const PACKAGE: &str = "templates";

/// Imports of every generated file.
pub const IMPORTS: &[&str] = &[
    "github.com/honeycombio/hound/api",
    "github.com/honeycombio/hound/types",
];

/// Column style of every generated board template.
const COLUMN_STYLE: &str = "types.BoardManyColumns";

/// Generates the Go source file for the given board template.
///
/// Output depends on nothing but the template, so identical templates
/// always produce identical code.
pub fn generate(template: &BoardTemplate) -> Result<String, Error> {
    info!("Generating Template Go Code");
    let function = board_function(template)?;
    let function = Printer::default().function(&function);
    SourceFile::new()?.render(PACKAGE, IMPORTS, &function)
}

/// Name of the generated constructor: the board name without whitespace and
/// with a lowercase first letter, followed by `BoardTemplate`. A name without
/// any letters or digits becomes `untitled`, since a bare `BoardTemplate`
/// would clash with the type.
pub fn function_name(board_name: &str) -> Ident {
    let compact = board_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    let mut chars = compact.chars();
    let lowered = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    let prefix = if lowered.chars().any(|c| c != '_' && ast::is_ident_char(c)) {
        lowered
    } else {
        "untitled".to_string()
    };
    Ident::sanitize(&format!("{}BoardTemplate", prefix))
}

/// Lowers a board template into the constructor function that returns it.
pub fn board_function(template: &BoardTemplate) -> Result<Function, Error> {
    let mut body = Vec::new();
    let mut query_templates = Vec::with_capacity(template.query_templates.len());
    for (i, query_template) in template.query_templates.iter().enumerate() {
        let qs = Ident::new(format!("qs{}", i + 1))?;
        let qt = Ident::new(format!("qt{}", i + 1))?;
        body.push(Stmt::Define(qs.clone(), query_spec(&query_template.query_spec)));
        body.push(Stmt::Define(
            qt.clone(),
            query_template_literal(query_template, qs),
        ));
        body.push(Stmt::Blank);
        query_templates.push(Expr::Local(qt));
    }
    let query_templates_local = Ident::new("queryTemplates")?;
    body.push(Stmt::Define(
        query_templates_local.clone(),
        Expr::List("QueryTemplate", query_templates),
    ));
    body.push(Stmt::Blank);
    body.push(Stmt::Return(Expr::Struct(
        Some("BoardTemplate"),
        vec![
            Field::new(
                "PK",
                Expr::Call("ToBoardTemplatePK", vec![Expr::Int(template.pk)]),
            ),
            Field::new("Name", Expr::str(&template.name)),
            Field::new("Description", Expr::str(&template.description)),
            Field::new("Graphic", Expr::Int(template.graphic.into())),
            Field::new("QueryTemplates", Expr::Local(query_templates_local)),
            Field::new("ColumnStyle", Expr::symbol(COLUMN_STYLE)),
            Field::new(
                "Variables",
                Expr::List(
                    "VariableSpec",
                    template.variables.iter().map(variable_spec).collect(),
                ),
            ),
        ],
    )));

    Ok(Function {
        name: function_name(&template.name),
        result: "BoardTemplate",
        body,
    })
}

fn query_template_literal(template: &QueryTemplate, query_spec: Ident) -> Expr {
    Expr::Struct(
        Some("QueryTemplate"),
        vec![
            Field::new("Name", Expr::str(&template.name)),
            Field::new("ShortDescription", Expr::str(&template.short_description)),
            Field::new("Description", Expr::str(&template.description)),
            Field::new("QuerySpec", Expr::Local(query_spec)),
            Field::new("Style", Expr::symbol(template.style.symbol())),
            Field::new("GraphSettings", graph_settings(&template.graph_settings)),
            Field::new("AutoFilter", Expr::Bool(true)),
        ],
    )
}

fn graph_settings(settings: &GraphSettings) -> Expr {
    Expr::Struct(
        Some("types.GraphSettings"),
        vec![
            Field::new("OmitMissingValues", Expr::Bool(settings.omit_missing_values)),
            Field::new("UseStackedGraphs", Expr::Bool(settings.stacked_graphs)),
            Field::new("UseLogScale", Expr::Bool(settings.log_scale)),
            Field::new("UseUTCXAxis", Expr::Bool(settings.utc_xaxis)),
            Field::new("HideMarkers", Expr::Bool(settings.hide_markers)),
            Field::new("PreferOverlaidCharts", Expr::Bool(settings.overlaid_charts)),
        ],
    )
}

fn query_spec(spec: &QuerySpec) -> Expr {
    let mut fields = Vec::new();
    if !spec.aggregates.is_empty() {
        fields.push(Field::new(
            "Aggregates",
            Expr::List(
                "*api.QuerySpec_Aggregate",
                spec.aggregates.iter().map(aggregate).collect(),
            ),
        ));
    }
    if !spec.filter_set.filters.is_empty() {
        fields.push(Field::new("FilterSet", filter_set(&spec.filter_set)));
    }
    if !spec.groups.is_empty() {
        fields.push(Field::new(
            "Groups",
            Expr::List("string", spec.groups.iter().map(column).collect()),
        ));
    }
    if !spec.orders.is_empty() {
        fields.push(Field::new(
            "Orders",
            Expr::List(
                "*api.QuerySpec_Order",
                spec.orders.iter().map(order).collect(),
            ),
        ));
    }
    if let Some(limit) = spec.limit.filter(|&limit| limit > 0) {
        fields.push(Field::new("Limit", Expr::Int(limit)));
    }
    if !spec.havings.is_empty() {
        fields.push(Field::new(
            "Havings",
            Expr::List(
                "*api.QuerySpec_Having",
                spec.havings.iter().map(having).collect(),
            ),
        ));
    }
    Expr::Struct(Some("api.QuerySpec"), fields)
}

fn aggregate(aggregate: &Aggregate) -> Expr {
    Expr::Struct(
        None,
        vec![
            Field::new("Op", Expr::symbol(aggregate.op.symbol())),
            Field::new("Column", column(&aggregate.column)),
        ],
    )
}

fn filter_set(filter_set: &FilterSet) -> Expr {
    let mut fields = vec![Field::new(
        "Filters",
        Expr::List(
            "*api.QuerySpec_Filter",
            filter_set.filters.iter().map(filter).collect(),
        ),
    )];
    if let Some(combination) = filter_set.combination {
        fields.push(Field::new("Combination", Expr::symbol(combination.symbol())));
    }
    Expr::addr_of(Expr::Struct(Some("api.QuerySpec_FilterSet"), fields))
}

fn filter(filter: &Filter) -> Expr {
    let mut fields = vec![
        Field::new("Op", Expr::symbol(filter.op.symbol())),
        Field::new("Column", column(&filter.column)),
    ];
    if let Some(value) = value(&filter.value) {
        fields.push(Field::new("Value", value));
    }
    if let Some(join_column) = &filter.join_column {
        fields.push(Field::new("JoinColumn", Expr::str(join_column)));
    }
    Expr::Struct(None, fields)
}

fn order(order: &Order) -> Expr {
    let mut fields = Vec::new();
    if let Some(c) = &order.column {
        fields.push(Field::new("Column", column(c)));
    }
    if let Some(op) = order.op {
        fields.push(Field::new("Op", Expr::symbol(op.symbol())));
    }
    fields.push(Field::new(
        "Descending",
        Expr::Bool(order.direction.is_descending()),
    ));
    Expr::Struct(None, fields)
}

fn having(having: &Having) -> Expr {
    let mut fields = vec![
        Field::new("AggregateOp", Expr::symbol(having.calculate_op.symbol())),
        Field::new("Column", column(&having.column)),
        Field::new("Op", Expr::symbol(having.op.symbol())),
    ];
    if let Some(value) = value(&having.value) {
        fields.push(Field::new("Value", value));
    }
    if let Some(join_column) = &having.join_column {
        fields.push(Field::new("JoinColumn", Expr::str(join_column)));
    }
    Expr::Struct(None, fields)
}

fn column(column: &Column) -> Expr {
    match column {
        Column::Literal(name) => Expr::str(name),
        Column::Variable(name) => Expr::Call("VariableName", vec![Expr::str(name)]),
    }
}

// Values are always emitted as strings. Strings are taken verbatim, anything
// else as its compact JSON text: `["a","b"]` stays a JSON array rather than
// Go's `fmt.Sprint` form `[a b]`, so a template reader can parse it back.
// Absent values are left out entirely.
fn value(value: &JsonValue) -> Option<Expr> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(Expr::str(s)),
        other => Some(Expr::str(other.to_string())),
    }
}

fn variable_spec(variable: &VariableSpec) -> Expr {
    Expr::Struct(
        None,
        vec![
            Field::new(
                "Name",
                Expr::Call("VariableName", vec![Expr::str(&variable.name)]),
            ),
            Field::new(
                "ValueProviders",
                Expr::List(
                    "ValueProvider",
                    variable.value_providers.iter().map(value_provider).collect(),
                ),
            ),
        ],
    )
}

fn value_provider(provider: &ValueProvider) -> Expr {
    let kind = Ident::sanitize(&format!("Column_{}", provider.kind));
    Expr::Struct(
        None,
        vec![
            Field::new("Kind", Expr::symbol(kind.as_str())),
            Field::new("Value", Expr::str(&provider.value)),
        ],
    )
}
