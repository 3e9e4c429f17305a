//! Test utilities for SQL emission validation.
//!
//! Rendered fragments are wrapped in a SELECT and parsed with sqlparser-rs.

use sqlparser::dialect::{
    GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use sqlparser::parser::Parser;

use super::dialect::Dialect;

/// Validates that a SQL string is syntactically valid for the given dialect.
///
/// Oracle and HSQL have no sqlparser dialect and are checked with the
/// generic one.
pub fn validate_sql(sql: &str, dialect: Dialect) -> Result<(), String> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::SqlServer => Box::new(MsSqlDialect {}),
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
        Dialect::Generic | Dialect::Oracle | Dialect::HSql => Box::new(GenericDialect {}),
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL for {:?}: {}\nSQL: {}", dialect, e, sql))
}

/// Validates a select-list fragment as `SELECT <fragment> FROM t`.
pub fn validate_fragment(fragment: &str, dialect: Dialect) -> Result<(), String> {
    validate_sql(&format!("SELECT {} FROM t", fragment), dialect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::expr::col;
    use crate::sql::types::DataType;

    #[test]
    fn test_validate_valid_sql() {
        validate_sql("SELECT * FROM users", Dialect::Postgres).unwrap();
        validate_sql("SELECT * FROM users", Dialect::MySql).unwrap();
        validate_sql("SELECT * FROM users", Dialect::Sqlite).unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        let result = validate_sql("SELEC * FORM users", Dialect::Postgres);
        assert!(result.is_err());
    }

    #[test]
    fn test_rendered_functions_parse() {
        let name = col("NAME", DataType::Varchar);
        let amount = col("AMOUNT", DataType::Decimal);
        let fragments = [
            name.upper().trim(),
            name.substring_with_length(1, 3),
            amount.sum(),
            amount.abs().round(2),
        ];
        for dialect in [Dialect::Generic, Dialect::Postgres, Dialect::MySql] {
            for e in &fragments {
                validate_fragment(&e.to_sql(&dialect), dialect).unwrap();
            }
        }
    }

    #[test]
    fn test_rendered_case_parses() {
        let status = col("STATUS", DataType::Integer);
        let e = status
            .decode_else([(1, "open"), (2, "closed")], "other", DataType::Varchar)
            .unwrap();
        validate_fragment(&e.to_sql(&Dialect::Postgres), Dialect::Postgres).unwrap();
        validate_fragment(&e.to_sql(&Dialect::SqlServer), Dialect::SqlServer).unwrap();
    }
}
