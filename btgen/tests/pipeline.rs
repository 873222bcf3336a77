use std::cell::RefCell;
use std::collections::HashMap;

use hny_btgen::honeycomb::{Board, BoardQuery, Calculation, Query, QueryAnnotation};
use hny_btgen::{
    convert_board, generate, BoardReader, Column, Config, Error, SupportedFormat, Variables,
};
use serde_json::json;

/// Serves boards, queries and annotations from memory and records every
/// request it receives.
#[derive(Default)]
struct InMemoryReader {
    boards: HashMap<String, Board>,
    queries: HashMap<(String, String), Query>,
    annotations: HashMap<(String, String), QueryAnnotation>,
    requests: RefCell<Vec<String>>,
}

impl BoardReader for InMemoryReader {
    fn board(&self, board_id: &str) -> Result<Board, Error> {
        self.requests.borrow_mut().push(format!("board {}", board_id));
        self.boards
            .get(board_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("board", board_id.to_string()))
    }

    fn query(&self, dataset: &str, query_id: &str) -> Result<Query, Error> {
        self.requests
            .borrow_mut()
            .push(format!("query {}/{}", dataset, query_id));
        self.queries
            .get(&(dataset.to_string(), query_id.to_string()))
            .cloned()
            .ok_or_else(|| Error::NotFound("query", query_id.to_string()))
    }

    fn query_annotation(
        &self,
        dataset: &str,
        annotation_id: &str,
    ) -> Result<QueryAnnotation, Error> {
        self.requests
            .borrow_mut()
            .push(format!("annotation {}/{}", dataset, annotation_id));
        self.annotations
            .get(&(dataset.to_string(), annotation_id.to_string()))
            .cloned()
            .ok_or_else(|| Error::NotFound("query annotation", annotation_id.to_string()))
    }
}

impl InMemoryReader {
    fn with_query(mut self, n: usize, caption: &str, query: Query) -> Self {
        let dataset = "production".to_string();
        let query_id = format!("q{}", n);
        let annotation_id = format!("a{}", n);
        let board = self.boards.entry("board1".to_string()).or_insert_with(|| Board {
            id: "board1".to_string(),
            name: "Service Health".to_string(),
            description: "Golden signals".to_string(),
            column_layout: "multi".to_string(),
            ..Default::default()
        });
        board.queries.push(BoardQuery {
            caption: caption.to_string(),
            query_style: "graph".to_string(),
            dataset: dataset.clone(),
            query_id: query_id.clone(),
            query_annotation_id: annotation_id.clone(),
            ..Default::default()
        });
        self.queries.insert(
            (dataset.clone(), query_id.clone()),
            Query {
                id: query_id.clone(),
                ..query
            },
        );
        self.annotations.insert(
            (dataset, annotation_id.clone()),
            QueryAnnotation {
                id: annotation_id,
                name: format!("Query {}", n),
                description: format!("Description of query {}", n),
                query_id,
                ..Default::default()
            },
        );
        self
    }
}

fn errors_query() -> Query {
    Query {
        calculations: vec![Calculation {
            op: "COUNT".to_string(),
            column: "duration_ms".to_string(),
        }],
        breakdowns: vec!["service_name".to_string()],
        ..Default::default()
    }
}

fn service_name_variable() -> Variables {
    Variables::load_as(
        SupportedFormat::Yaml,
        r#"
variables:
  - name: service_name
    valueProviders:
      - kind: ServiceName
        value: service.name
"#,
    )
    .unwrap()
}

fn config() -> Config {
    Config::new("board1", "test-key").unwrap()
}

#[test]
fn substitutes_declared_variables() {
    let reader = InMemoryReader::default().with_query(1, "Errors over time", errors_query());
    let template = convert_board(&reader, &config(), &service_name_variable()).unwrap();

    let spec = &template.query_templates[0].query_spec;
    assert_eq!(spec.groups, vec![Column::Variable("service_name".to_string())]);
    assert_eq!(
        spec.aggregates[0].column,
        Column::Literal("duration_ms".to_string())
    );
    assert_eq!(template.query_templates[0].short_description, "Errors over time");

    let code = generate(&template).unwrap();
    assert!(code.contains("\t\tGroups: []string{\n\t\t\tVariableName(\"service_name\"),\n\t\t},\n"));
    assert!(code.contains("\t\t\t\tColumn: \"duration_ms\",\n"));
    assert!(!code.contains("\"service_name\",\n\t\t},"));
}

#[test]
fn keeps_board_query_order() {
    let mut reader = InMemoryReader::default();
    for n in 1..=5 {
        reader = reader.with_query(n, &format!("Caption {}", n), errors_query());
    }
    let template = convert_board(&reader, &config(), &Variables::default()).unwrap();
    let captions = template
        .query_templates
        .iter()
        .map(|qt| qt.short_description.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        captions,
        vec!["Caption 1", "Caption 2", "Caption 3", "Caption 4", "Caption 5"]
    );
    let names = template
        .query_templates
        .iter()
        .map(|qt| qt.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Query 1", "Query 2", "Query 3", "Query 4", "Query 5"]);

    let requests = reader.requests.borrow();
    assert_eq!(requests[0], "board board1");
    assert_eq!(requests[1], "query production/q1");
    assert_eq!(requests[2], "annotation production/a1");
    assert_eq!(requests[9], "query production/q5");
    assert_eq!(requests.len(), 11);
}

#[test]
fn sequence_number_becomes_primary_key() {
    let reader = InMemoryReader::default().with_query(1, "Errors", errors_query());
    let config = config().with_sequence_number(42).with_graphic(3);
    let template = convert_board(&reader, &config, &Variables::default()).unwrap();
    assert_eq!(template.pk, 42);
    assert_eq!(template.graphic, 3);
    let code = generate(&template).unwrap();
    assert!(code.contains("PK: ToBoardTemplatePK(42),"));
    assert!(code.contains("Graphic: 3,"));
}

#[test]
fn without_variables_columns_stay_literal() {
    let reader = InMemoryReader::default().with_query(1, "Errors", errors_query());
    let template = convert_board(&reader, &config(), &Variables::default()).unwrap();
    assert!(template.variables.is_empty());
    let code = generate(&template).unwrap();
    assert!(!code.contains("VariableName("));
    assert!(code.contains("\t\t\t\"service_name\",\n"));
    assert!(code.contains("Variables: []VariableSpec{},"));
}

#[test]
fn missing_query_aborts_conversion() {
    let mut reader = InMemoryReader::default()
        .with_query(1, "Errors", errors_query())
        .with_query(2, "Latency", errors_query());
    reader
        .queries
        .remove(&("production".to_string(), "q2".to_string()));
    let err = convert_board(&reader, &config(), &Variables::default()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("failed to load query q2 from dataset production"));
    assert!(message.contains("query not found: q2"));
}

#[test]
fn missing_annotation_aborts_conversion() {
    let mut reader = InMemoryReader::default().with_query(1, "Errors", errors_query());
    reader.annotations.clear();
    let err = convert_board(&reader, &config(), &Variables::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::NotFound("query annotation", _))
    ));
}

#[test]
fn missing_board_aborts_conversion() {
    let reader = InMemoryReader::default();
    let err = convert_board(&reader, &config(), &Variables::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to load board board1"));
    assert_eq!(reader.requests.borrow().len(), 1);
}

#[test]
fn identical_inputs_generate_identical_code() {
    let build = || {
        let reader = InMemoryReader::default()
            .with_query(1, "Errors", errors_query())
            .with_query(
                2,
                "Slow requests",
                serde_json::from_value(json!({
                    "calculations": [{ "op": "HEATMAP", "column": "duration_ms" }],
                    "filters": [{ "op": ">", "column": "duration_ms", "value": 1000 }],
                    "filter_combination": "AND",
                    "orders": [{ "op": "COUNT", "order": "descending" }],
                    "limit": 20
                }))
                .unwrap(),
            );
        let template = convert_board(&reader, &config(), &service_name_variable()).unwrap();
        generate(&template).unwrap()
    };
    assert_eq!(build(), build());
}
