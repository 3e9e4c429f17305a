//! Integration tests for JSON expression documents.

use colexpr::document::{parse_document, DocumentError, ExprDoc};
use colexpr::prelude::*;

const ORDER_TOTAL: &str = r#"{
    "kind": "alias",
    "alias": "TOTAL",
    "expr": {
        "kind": "phrase",
        "phrase": "func_sum",
        "expr": {
            "kind": "calc",
            "op": "*",
            "expr": { "kind": "column", "name": "PRICE", "data_type": "decimal" },
            "value": { "kind": "column", "name": "QTY", "data_type": "integer" }
        }
    }
}"#;

#[test]
fn test_order_total_document() {
    let e = parse_document(ORDER_TOTAL).unwrap();
    assert_eq!(e.to_sql_with(&Dialect::Generic, Context::ALL), "sum(PRICE*QTY) AS \"TOTAL\"");
    assert_eq!(e.to_sql(&Dialect::Generic), "sum(PRICE*QTY)");
    assert!(e.is_aggregate());
    assert_eq!(e.name().as_deref(), Some("TOTAL"));
    assert_eq!(e.referenced_columns().len(), 2);
}

#[test]
fn test_describe_document() {
    let info = parse_document(ORDER_TOTAL).unwrap().describe();
    assert_eq!(info.kind, "alias");
    assert!(info.aggregate);
    let columns: Vec<_> = info
        .walk()
        .into_iter()
        .filter(|n| n.kind == "column")
        .filter_map(|n| n.name.clone())
        .collect();
    assert_eq!(columns, vec!["PRICE".to_string(), "QTY".to_string()]);

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["kind"], "alias");
    assert_eq!(json["aggregate"], true);
}

#[test]
fn test_decode_document() {
    let doc = r#"{
        "kind": "decode",
        "expr": { "kind": "column", "name": "STATUS", "data_type": "integer" },
        "cases": [
            { "when": 1, "then": "open" },
            { "when": 2, "then": "closed" }
        ],
        "else": "other",
        "data_type": "varchar"
    }"#;
    let e = parse_document(doc).unwrap();
    assert_eq!(
        e.to_sql(&Dialect::Oracle),
        "decode(STATUS, 1, 'open', 2, 'closed', 'other')"
    );
    assert_eq!(
        e.to_sql(&Dialect::Postgres),
        "case STATUS when 1 then 'open' when 2 then 'closed' else 'other' end"
    );
    assert_eq!(e.data_type(), DataType::Varchar);
}

#[test]
fn test_phrase_parameters_render_by_their_own_type() {
    let doc = r#"{
        "kind": "phrase",
        "phrase": "func_substring_ex",
        "params": [2, 3],
        "expr": { "kind": "column", "name": "NAME", "data_type": "varchar" }
    }"#;
    let e = parse_document(doc).unwrap();
    assert_eq!(e.to_sql(&Dialect::Oracle), "substr(NAME, 2, 3)");
}

#[test]
fn test_constant_documents() {
    let e = parse_document(r#"{"kind": "sysdate"}"#).unwrap();
    assert_eq!(e.to_sql(&Dialect::Oracle), "sysdate");
    assert_eq!(e.data_type(), DataType::DateTime);

    let e = parse_document(r#"{"kind": "value", "value": "12.50", "data_type": "decimal"}"#)
        .unwrap();
    assert_eq!(e.to_sql(&Dialect::Generic), "12.50");

    let e = parse_document(r#"{"kind": "value", "value": "2024-03-09", "data_type": "date"}"#)
        .unwrap();
    assert_eq!(e.to_sql(&Dialect::Generic), "DATE '2024-03-09'");
}

#[test]
fn test_convert_and_func_ex_documents() {
    let doc = r#"{
        "kind": "convert",
        "expr": { "kind": "column", "name": "CREATED", "data_type": "date" },
        "data_type": "varchar",
        "format": "YYYY"
    }"#;
    let e = parse_document(doc).unwrap();
    assert_eq!(e.to_sql(&Dialect::Postgres), "to_char(CREATED, 'YYYY')");

    let doc = r#"{
        "kind": "func_ex",
        "prefix": "nullif(",
        "expr": { "kind": "column", "name": "A", "data_type": "integer" },
        "middle": ", ",
        "other": { "kind": "value", "value": 0, "data_type": "integer" },
        "postfix": ")"
    }"#;
    let e = parse_document(doc).unwrap();
    assert_eq!(e.to_sql(&Dialect::Generic), "nullif(A, 0)");
    assert!(!e.is_aggregate());
}

#[test]
fn test_qualified_column_and_parenthesis() {
    let doc = r#"{
        "kind": "calc",
        "op": "*",
        "expr": {
            "kind": "parenthesis",
            "expr": {
                "kind": "calc",
                "op": "+",
                "expr": { "kind": "column", "name": "A", "table": "t", "data_type": "integer" },
                "value": 1
            }
        },
        "value": 2
    }"#;
    let e = parse_document(doc).unwrap();
    assert_eq!(e.to_sql(&Dialect::Generic), "(t.A+1)*2");
    assert_eq!(e.to_sql_with(&Dialect::Generic, Context::NAME), "(A+1)*2");
}

#[test]
fn test_document_serializes_back() {
    let doc = ExprDoc::from_json(ORDER_TOTAL).unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    assert_eq!(ExprDoc::from_json(&json).unwrap(), doc);
}

#[test]
fn test_invalid_constant_for_column_type() {
    let doc = r#"{
        "kind": "calc",
        "op": "+",
        "expr": { "kind": "column", "name": "QTY", "data_type": "integer" },
        "value": "ten"
    }"#;
    assert!(matches!(
        parse_document(doc),
        Err(DocumentError::Expr(ExprError::InvalidArgument { .. }))
    ));
}
