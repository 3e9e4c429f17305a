//! Integration tests for rendering expressions across dialects.
//!
//! Rendered fragments are also parsed with sqlparser where it knows the
//! dialect, wrapped as `SELECT <fragment> FROM t`.

use chrono::{NaiveDate, NaiveDateTime};
use colexpr::prelude::*;
use insta::assert_snapshot;
use sqlparser::dialect::{GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect};
use sqlparser::parser::Parser;

fn validate_fragment(fragment: &str, dialect: Dialect) {
    let sql = format!("SELECT {} FROM t", fragment);
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::SqlServer => Box::new(MsSqlDialect {}),
        _ => Box::new(GenericDialect {}),
    };
    if let Err(e) = Parser::parse_sql(&*parser_dialect, &sql) {
        panic!("Invalid SQL for {:?}: {}\nSQL: {}", dialect, e, sql);
    }
}

fn order_total() -> ColumnExpr {
    let price = col("PRICE", DataType::Decimal);
    let qty = col("QTY", DataType::Integer);
    price
        .multiply_with(&qty)
        .unwrap()
        .parenthesis()
        .sum()
        .alias("TOTAL")
}

// =============================================================================
// Select-list items
// =============================================================================

#[test]
fn test_aliased_aggregate_generic() {
    assert_snapshot!(order_total().to_sql_with(&Dialect::Generic, Context::ALL), @r#"sum((PRICE*QTY)) AS "TOTAL""#);
}

#[test]
fn test_aliased_aggregate_sqlserver() {
    assert_snapshot!(order_total().to_sql_with(&Dialect::SqlServer, Context::ALL), @"sum((PRICE*QTY)) AS [TOTAL]");
}

#[test]
fn test_aliased_aggregate_mysql() {
    assert_snapshot!(order_total().to_sql_with(&Dialect::MySql, Context::ALL), @"sum((PRICE*QTY)) AS `TOTAL`");
}

#[test]
fn test_alias_omitted_without_flag() {
    assert_eq!(order_total().to_sql(&Dialect::Generic), "sum((PRICE*QTY))");
}

#[test]
fn test_aggregates_parse() {
    for dialect in [Dialect::Generic, Dialect::Postgres, Dialect::MySql, Dialect::SqlServer] {
        validate_fragment(&order_total().to_sql_with(&dialect, Context::ALL), dialect);
    }
}

// =============================================================================
// Columns
// =============================================================================

#[test]
fn test_qualified_column() {
    let amount = table_col("o", "AMOUNT", DataType::Decimal);
    assert_eq!(amount.to_sql(&Dialect::Generic), "o.AMOUNT");
    assert_eq!(amount.to_sql_with(&Dialect::Generic, Context::NAME), "AMOUNT");
}

#[test]
fn test_reserved_column_names_are_quoted() {
    let user = col("user", DataType::Varchar);
    assert_eq!(user.to_sql(&Dialect::Generic), "\"user\"");
    assert_eq!(user.to_sql(&Dialect::SqlServer), "[user]");
    assert_eq!(user.to_sql(&Dialect::MySql), "`user`");
    assert_eq!(col("first name", DataType::Varchar).to_sql(&Dialect::Generic), "\"first name\"");
    assert_eq!(col("NAME", DataType::Varchar).to_sql(&Dialect::Generic), "NAME");
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_date_literals() {
    let d = val(
        Value::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()),
        DataType::Date,
    )
    .unwrap();
    assert_eq!(d.to_sql(&Dialect::Generic), "DATE '2024-03-09'");
    assert_eq!(d.to_sql(&Dialect::Oracle), "TO_DATE('2024-03-09', 'YYYY-MM-DD')");
    assert_eq!(d.to_sql(&Dialect::SqlServer), "convert(date, '2024/03/09', 111)");
    assert_eq!(d.to_sql(&Dialect::Sqlite), "date('2024-03-09')");
}

#[test]
fn test_datetime_literal() {
    let dt = NaiveDateTime::parse_from_str("2024-03-09 13:45:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let e = val(Value::DateTime(dt), DataType::DateTime).unwrap();
    assert_eq!(e.to_sql(&Dialect::Generic), "TIMESTAMP '2024-03-09 13:45:00'");
    assert_eq!(
        e.to_sql(&Dialect::Oracle),
        "TO_DATE('2024-03-09 13:45:00', 'YYYY-MM-DD HH24:MI:SS')"
    );
}

#[test]
fn test_date_only_value_keeps_date_template() {
    let d = val(
        Value::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()),
        DataType::DateTime,
    )
    .unwrap();
    assert_eq!(d.to_sql(&Dialect::Generic), "DATE '2024-03-09'");
}

#[test]
fn test_sysdate() {
    let now = val(Value::SysDate, DataType::DateTime).unwrap();
    assert_eq!(now.to_sql(&Dialect::Generic), "CURRENT_TIMESTAMP");
    assert_eq!(now.to_sql(&Dialect::Oracle), "sysdate");
    assert_eq!(now.to_sql(&Dialect::SqlServer), "getdate()");
    let today = val(Value::SysDate, DataType::Date).unwrap();
    assert_eq!(today.to_sql(&Dialect::Oracle), "trunc(sysdate)");
}

#[test]
fn test_text_literals() {
    let e = val(Value::Text("O'Brien".into()), DataType::Varchar).unwrap();
    assert_eq!(e.to_sql(&Dialect::Generic), "'O''Brien'");
    let e = val(Value::Text("Zoë".into()), DataType::Varchar).unwrap();
    assert_eq!(e.to_sql(&Dialect::SqlServer), "N'Zoë'");
    assert_eq!(e.to_sql(&Dialect::Postgres), "'Zoë'");
}

#[test]
fn test_null_and_empty_text() {
    assert_eq!(val(Value::Null, DataType::Integer).unwrap().to_sql(&Dialect::Generic), "null");
    assert_eq!(
        val(Value::Text(String::new()), DataType::Varchar).unwrap().to_sql(&Dialect::Generic),
        "null"
    );
}

#[test]
fn test_boolean_literals() {
    let t = val(Value::Bool(true), DataType::Bool).unwrap();
    assert_eq!(t.to_sql(&Dialect::Generic), "1");
    assert_eq!(t.to_sql(&Dialect::Postgres), "TRUE");
    let f = val(Value::Bool(false), DataType::Bool).unwrap();
    assert_eq!(f.to_sql(&Dialect::HSql), "false");
}

// =============================================================================
// Concatenation
// =============================================================================

#[test]
fn test_full_name_concat() {
    let first = col("FIRST", DataType::Varchar);
    let last = col("LAST", DataType::Varchar);
    let full = first.append(" ").append(&last);
    assert_eq!(full.to_sql(&Dialect::Generic), "FIRST || ' ' || LAST");
    assert_eq!(full.to_sql(&Dialect::SqlServer), "FIRST + ' ' + LAST");
    assert_eq!(full.to_sql(&Dialect::MySql), "concat(concat(FIRST, ' '), LAST)");
    assert_eq!(full.to_sql(&Dialect::Postgres), "FIRST || ' ' || LAST");
    assert_eq!(full.name().as_deref(), Some("FIRST_LAST"));
    validate_fragment(&full.to_sql(&Dialect::Postgres), Dialect::Postgres);
    validate_fragment(&full.to_sql(&Dialect::MySql), Dialect::MySql);
}

// =============================================================================
// Functions
// =============================================================================

#[test]
fn test_function_catalogue_per_dialect() {
    let name = col("NAME", DataType::Varchar);
    assert_eq!(name.upper().to_sql(&Dialect::MySql), "ucase(NAME)");
    assert_eq!(name.length().to_sql(&Dialect::SqlServer), "len(NAME)");
    assert_eq!(name.substring(2).to_sql(&Dialect::SqlServer), "substring(NAME, 2, 4000)");
    assert_eq!(name.substring(2).to_sql(&Dialect::Oracle), "substr(NAME, 2)");
    assert_eq!(name.index_of("x").unwrap().to_sql(&Dialect::Generic), "position('x' in NAME)");
    assert_eq!(name.index_of("x").unwrap().to_sql(&Dialect::Oracle), "instr(NAME, 'x')");
    assert_eq!(
        name.replace("a", "b").unwrap().to_sql(&Dialect::Generic),
        "replace(NAME, 'a', 'b')"
    );
}

#[test]
fn test_numeric_functions() {
    let amount = col("AMOUNT", DataType::Decimal);
    assert_eq!(amount.round(2).to_sql(&Dialect::Generic), "round(AMOUNT, 2)");
    assert_eq!(amount.trunc(2).to_sql(&Dialect::SqlServer), "round(AMOUNT, 2, 1)");
    assert_eq!(amount.ceiling().to_sql(&Dialect::Oracle), "ceil(AMOUNT)");
    let qty = col("QTY", DataType::Integer);
    assert_eq!(qty.modulo(3).unwrap().to_sql(&Dialect::Generic), "mod(QTY, 3)");
    assert_eq!(qty.modulo(3).unwrap().to_sql(&Dialect::SqlServer), "((QTY) % 3)");
}

#[test]
fn test_dialect_gaps_fall_back_to_default() {
    let name = col("NAME", DataType::Varchar);
    assert_eq!(name.reverse().to_sql(&Dialect::Sqlite), "reverse(NAME)");
    assert_eq!(
        name.index_of_from("x", 3).unwrap().to_sql(&Dialect::Postgres),
        "charindex('x', NAME, 3)"
    );
}

#[test]
fn test_phrase_override() {
    let table = PhraseTable::new(Dialect::Postgres)
        .with_phrase(Phrase::FuncStrIndexFrom, "strpos(substr(?, {1:INTEGER}), {0})")
        .unwrap();
    let name = col("NAME", DataType::Varchar);
    assert_eq!(
        name.index_of_from("x", 3).unwrap().to_sql(&table),
        "strpos(substr(NAME, 3), 'x')"
    );
    assert_eq!(name.upper().to_sql(&table), "upper(NAME)");
}

#[test]
fn test_conversions() {
    let created = col("CREATED", DataType::Date);
    let code = col("CODE", DataType::Varchar);
    assert_eq!(
        created.convert_to(DataType::Varchar, Some("YYYY")).to_sql(&Dialect::Postgres),
        "to_char(CREATED, 'YYYY')"
    );
    assert_eq!(
        code.convert_to(DataType::Integer, None).to_sql(&Dialect::MySql),
        "CAST(CODE AS SIGNED)"
    );
    assert_eq!(
        code.convert_to(DataType::Integer, None).to_sql(&Dialect::Generic),
        "CAST(CODE AS INTEGER)"
    );
}

// =============================================================================
// Decode
// =============================================================================

#[test]
fn test_decode_case_and_oracle_forms() {
    let status = col("STATUS", DataType::Integer);
    let label = status
        .decode_else([(1, "open"), (2, "closed")], "other", DataType::Varchar)
        .unwrap();
    assert_snapshot!(label.to_sql(&Dialect::SqlServer), @"case STATUS when 1 then 'open' when 2 then 'closed' else 'other' end");
    assert_snapshot!(label.to_sql(&Dialect::Oracle), @"decode(STATUS, 1, 'open', 2, 'closed', 'other')");
    validate_fragment(&label.to_sql(&Dialect::SqlServer), Dialect::SqlServer);
    validate_fragment(&label.to_sql(&Dialect::Postgres), Dialect::Postgres);
}

#[test]
fn test_decode_with_expression_results() {
    let kind = col("KIND", DataType::Varchar);
    let net = col("NET", DataType::Decimal);
    let gross = col("GROSS", DataType::Decimal);
    let amount = kind
        .decode_else([("N", &net)], &gross, DataType::Decimal)
        .unwrap();
    assert_eq!(
        amount.to_sql(&Dialect::Generic),
        "case KIND when 'N' then NET else GROSS end"
    );
}

// =============================================================================
// Counting and multi-operand concatenation
// =============================================================================

#[test]
fn test_counts() {
    let customer = col("CUSTOMER_ID", DataType::Integer);
    for dialect in [Dialect::Generic, Dialect::Postgres, Dialect::MySql, Dialect::SqlServer] {
        assert_eq!(count_all().to_sql(&dialect), "count(*)");
        let distinct = customer.count_distinct().alias("CUSTOMERS");
        let fragment = distinct.to_sql_with(&dialect, Context::ALL);
        validate_fragment(&count_all().to_sql(&dialect), dialect);
        validate_fragment(&fragment, dialect);
    }
    assert_snapshot!(customer.count_distinct().to_sql(&Dialect::Oracle), @"count(distinct CUSTOMER_ID)");
}

#[test]
fn test_separated_multi_concat() {
    let first = col("FIRST_NAME", DataType::Varchar);
    let last = col("LAST_NAME", DataType::Varchar);
    let full = first.concat_separated(" ", &[last]);
    assert_snapshot!(full.to_sql(&Dialect::MySql), @"concat(FIRST_NAME, ' ', LAST_NAME)");
    assert_snapshot!(full.to_sql(&Dialect::SqlServer), @"concat(FIRST_NAME, ' ', LAST_NAME)");
    assert_snapshot!(full.to_sql(&Dialect::Oracle), @"FIRST_NAME || ' ' || LAST_NAME");
    assert_snapshot!(full.to_sql(&Dialect::Sqlite), @"FIRST_NAME || ' ' || LAST_NAME");
    for dialect in [Dialect::Generic, Dialect::Postgres, Dialect::MySql, Dialect::SqlServer] {
        validate_fragment(&full.to_sql(&dialect), dialect);
    }
}

#[test]
fn test_prepend_title() {
    let name = col("NAME", DataType::Varchar);
    let titled = name.prepend("Dr. ").unwrap();
    assert_snapshot!(titled.to_sql(&Dialect::Postgres), @"'Dr. ' || NAME");
    assert_snapshot!(titled.to_sql(&Dialect::SqlServer), @"'Dr. ' + NAME");
    assert_snapshot!(titled.to_sql(&Dialect::MySql), @"concat('Dr. ', NAME)");
    for dialect in [Dialect::Postgres, Dialect::MySql, Dialect::SqlServer] {
        validate_fragment(&titled.to_sql(&dialect), dialect);
    }
    let qty = col("QTY", DataType::Integer);
    assert_eq!(qty.prepend(10).unwrap().to_sql(&Dialect::Generic), "10+QTY");
}

// =============================================================================
// Custom dialects
// =============================================================================

#[derive(Debug)]
struct BareUpper;

impl SqlDialect for BareUpper {
    fn name(&self) -> &'static str {
        "bare_upper"
    }

    fn sql_phrase(&self, phrase: Phrase) -> &str {
        match phrase {
            Phrase::FuncUpper => "upper()",
            other => other.default_template(),
        }
    }
}

#[test]
fn test_function_phrase_without_placeholder_uses_default() {
    let name = col("NAME", DataType::Varchar);
    assert_eq!(name.upper().to_sql(&BareUpper), "upper(NAME)");
    assert_eq!(name.upper().alias("U").to_sql_with(&BareUpper, Context::ALL), "upper(NAME) AS \"U\"");
}
