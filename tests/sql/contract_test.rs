//! Integration tests for the metadata contract of expression nodes:
//! aggregate tracking, referenced columns, names and immutability.

use std::collections::HashSet;

use colexpr::prelude::*;
use colexpr::sql::{FuncExExpr, ValueExpr};

fn amount() -> ColumnExpr {
    table_col("o", "AMOUNT", DataType::Decimal)
}

// =============================================================================
// Aggregates
// =============================================================================

#[test]
fn test_aggregate_status_propagates_upward() {
    let total = amount().sum();
    assert!(total.is_aggregate());
    assert!(total.plus(1).unwrap().is_aggregate());
    assert!(total.round(2).is_aggregate());
    assert!(total.append(" EUR").is_aggregate());
    assert!(total.parenthesis().is_aggregate());
    assert!(total.alias("TOTAL").is_aggregate());
}

#[test]
fn test_aggregate_operand_on_the_right() {
    let count = col("ID", DataType::Integer).count();
    let ratio = amount().divide_by(&count).unwrap();
    assert!(ratio.is_aggregate());
    let label = col("CODE", DataType::Varchar).append(&count);
    assert!(label.is_aggregate());
}

#[test]
fn test_decode_is_aggregate_when_any_branch_is() {
    let status = col("STATUS", DataType::Integer);
    let total = amount().sum();
    let e = status
        .decode_else([(1, &total)], 0, DataType::Decimal)
        .unwrap();
    assert!(e.is_aggregate());
    let plain = status.decode([(1, "a")], DataType::Varchar).unwrap();
    assert!(!plain.is_aggregate());
}

#[test]
fn test_func_ex_is_never_aggregate() {
    let total = amount().sum();
    let e = total.binary_function("nullif(", ", ", &col("B", DataType::Decimal), ")");
    assert!(!e.is_aggregate());
    let e: ColumnExpr = FuncExExpr::unary("sum(", amount(), ")", None).into();
    assert!(!e.is_aggregate());
}

#[test]
fn test_non_aggregate_functions() {
    let name = col("NAME", DataType::Varchar);
    assert!(!name.upper().is_aggregate());
    assert!(!name.function("soundex(?)", None, false).unwrap().is_aggregate());
}

#[test]
fn test_counts_are_aggregate() {
    assert!(count_all().is_aggregate());
    assert!(amount().count_distinct().is_aggregate());
    let share = amount().divide_by(count_all()).unwrap();
    assert!(share.is_aggregate());
}

#[test]
fn test_multi_concat_is_aggregate_when_any_operand_is() {
    let name = col("NAME", DataType::Varchar);
    assert!(!name.concat(&[col("CITY", DataType::Varchar)]).is_aggregate());
    assert!(name.concat(&[col("CITY", DataType::Varchar).max()]).is_aggregate());
}

// =============================================================================
// Referenced columns
// =============================================================================

#[test]
fn test_referenced_columns_union() {
    let a = Column::new("A", DataType::Integer);
    let b = Column::new("B", DataType::Integer);
    let c = Column::new("C", DataType::Varchar);
    let e = ColumnExpr::from(a.clone())
        .plus(ColumnExpr::from(b.clone()))
        .unwrap()
        .coalesce(ColumnExpr::from(a.clone()))
        .unwrap()
        .binary_function("greatest(", ", ", &ColumnExpr::from(c.clone()).length(), ")");
    let expected: HashSet<Column> = [a, b, c].into_iter().collect();
    assert_eq!(e.referenced_columns(), expected);
}

#[test]
fn test_multi_concat_references_every_operand() {
    let a = Column::new("A", DataType::Varchar);
    let b = Column::new("B", DataType::Varchar);
    let c = Column::new("C", DataType::Varchar);
    let e = ColumnExpr::from(a.clone()).concat_separated(
        "/",
        &[ColumnExpr::from(b.clone()), ColumnExpr::from(c.clone())],
    );
    let expected: HashSet<Column> = [a, b, c].into_iter().collect();
    assert_eq!(e.referenced_columns(), expected);
    assert!(count_all().referenced_columns().is_empty());
}

#[test]
fn test_constants_reference_nothing() {
    let e = val(Value::Int(1), DataType::Integer).unwrap();
    assert!(e.referenced_columns().is_empty());
    let e: ColumnExpr = ValueExpr::new(Value::SysDate, DataType::Date).unwrap().into();
    assert!(e.referenced_columns().is_empty());
}

#[test]
fn test_decode_references_keys_and_results() {
    let kind = Column::new("KIND", DataType::Varchar);
    let net = Column::new("NET", DataType::Decimal);
    let gross = Column::new("GROSS", DataType::Decimal);
    let e = ColumnExpr::from(kind.clone())
        .decode_else(
            [("N", ColumnExpr::from(net.clone()))],
            ColumnExpr::from(gross.clone()),
            DataType::Decimal,
        )
        .unwrap();
    let expected: HashSet<Column> = [kind, net, gross].into_iter().collect();
    assert_eq!(e.referenced_columns(), expected);
}

#[test]
fn test_qualified_columns_are_distinct() {
    let e = table_col("a", "ID", DataType::Integer)
        .plus(table_col("b", "ID", DataType::Integer))
        .unwrap();
    assert_eq!(e.referenced_columns().len(), 2);
}

// =============================================================================
// Names and update columns
// =============================================================================

#[test]
fn test_derived_names() {
    let first = col("FIRST", DataType::Varchar);
    let last = col("LAST", DataType::Varchar);
    assert_eq!(first.append(&last).name().as_deref(), Some("FIRST_LAST"));
    assert_eq!(first.upper().name().as_deref(), Some("FIRST"));
    assert_eq!(first.upper().alias("F").name().as_deref(), Some("F"));
    assert_eq!(val(Value::Int(1), DataType::Integer).unwrap().name(), None);
}

#[test]
fn test_update_column_survives_scalar_functions_only() {
    let name = Column::new("NAME", DataType::Varchar);
    let e = ColumnExpr::from(name.clone());
    assert_eq!(e.trim().upper().update_column(), Some(name.clone()));
    assert_eq!(e.parenthesis().update_column(), Some(name.clone()));
    assert_eq!(e.length().update_column(), None);
    assert_eq!(e.max().update_column(), None);
}

// =============================================================================
// Immutability
// =============================================================================

#[test]
fn test_rendering_leaves_tree_unchanged() {
    let e = amount().sum().alias("TOTAL");
    let before = e.describe();
    let _ = e.to_sql_with(&Dialect::Oracle, Context::ALL);
    let _ = e.to_sql_with(&Dialect::SqlServer, Context::NAME);
    assert_eq!(e.describe(), before);
    assert_eq!(e.to_sql(&Dialect::Generic), "sum(o.AMOUNT)");
}

#[test]
fn test_builders_do_not_modify_receiver() {
    let base = amount();
    let _ = base.plus(1).unwrap();
    let _ = base.alias("X");
    assert_eq!(base.to_sql(&Dialect::Generic), "o.AMOUNT");
    assert_eq!(base.name().as_deref(), Some("AMOUNT"));
}

#[test]
fn test_shared_subtree() {
    let shared = amount().round(2);
    let left = shared.plus(1).unwrap();
    let right = shared.minus(1).unwrap();
    assert_eq!(left.to_sql(&Dialect::Generic), "round(o.AMOUNT, 2)+1");
    assert_eq!(right.to_sql(&Dialect::Generic), "round(o.AMOUNT, 2)-1");
}

// =============================================================================
// Construction errors
// =============================================================================

#[test]
fn test_value_type_mismatch_rejected() {
    let qty = col("QTY", DataType::Integer);
    assert!(matches!(qty.plus("ten"), Err(ExprError::InvalidArgument { .. })));
    assert!(qty.plus("10").is_ok());
}

#[test]
fn test_template_without_placeholder_rejected() {
    let name = col("NAME", DataType::Varchar);
    assert!(matches!(
        name.function("now()", None, false),
        Err(ExprError::MissingPlaceholder { .. })
    ));
}
