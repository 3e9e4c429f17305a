//! Decode / CASE node.

use std::collections::HashSet;

use super::func::{substitute, FuncExpr};
use super::{Column, ColumnExpr, ExprNode};
use crate::sql::builder::SqlBuilder;
use crate::sql::context::Context;
use crate::sql::describe::ExprInfo;
use crate::sql::error::ExprError;
use crate::sql::operand::Operand;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;
use crate::sql::value::Value;

/// Maps values of `expr` to results: `case expr when k then v .. else e end`.
///
/// Branches render in insertion order. Keys render with the type of `expr`,
/// results and the else value with the node's result type.
#[derive(Debug)]
pub struct DecodeExpr {
    expr: ColumnExpr,
    pairs: Vec<(Operand, Operand)>,
    else_value: Option<Operand>,
    data_type: DataType,
}

impl DecodeExpr {
    /// Build from key/result pairs.
    ///
    /// A repeated key keeps its first position and takes the last result.
    pub fn new<I, K, V>(
        expr: ColumnExpr,
        pairs: I,
        else_value: Option<Operand>,
        data_type: DataType,
    ) -> Result<Self, ExprError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Operand>,
        V: Into<Operand>,
    {
        let key_type = expr.data_type();
        let mut entries: Vec<(Operand, Operand)> = Vec::new();
        for (key, result) in pairs {
            let key = key.into();
            let result = result.into();
            key.check_for(key_type)?;
            result.check_for(data_type)?;
            match entries.iter_mut().find(|(k, _)| k.same_as(&key)) {
                Some(entry) => entry.1 = result,
                None => entries.push((key, result)),
            }
        }
        if let Some(e) = &else_value {
            e.check_for(data_type)?;
        }
        Ok(Self {
            expr,
            pairs: entries,
            else_value,
            data_type,
        })
    }

    pub fn expr(&self) -> &ColumnExpr {
        &self.expr
    }

    pub fn pairs(&self) -> &[(Operand, Operand)] {
        &self.pairs
    }

    pub fn else_value(&self) -> Option<&Operand> {
        self.else_value.as_ref()
    }

    /// Branch list: `sep part` per pair, then `sep else` if present.
    fn render_branches(&self, sql: &SqlBuilder<'_>, ctx: Context) -> String {
        let sep = sql.phrase(Phrase::FuncDecodeSep);
        let part = sql.phrase(Phrase::FuncDecodePart);
        let key_type = self.expr.data_type();

        let mut out = String::new();
        for (key, result) in &self.pairs {
            let key = key.render_to_string(sql, key_type, ctx, ", ");
            let result = result.render_to_string(sql, self.data_type, ctx, ", ");
            out.push_str(sep);
            out.push_str(&substitute(part, |index, _| match index {
                0 => key.clone(),
                1 => result.clone(),
                _ => String::new(),
            }));
        }
        if let Some(else_value) = &self.else_value {
            let value = else_value.render_to_string(sql, self.data_type, ctx, ", ");
            out.push_str(sep);
            out.push_str(&substitute(sql.phrase(Phrase::FuncDecodeElse), |_, _| {
                value.clone()
            }));
        }
        out
    }
}

impl ExprNode for DecodeExpr {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn name(&self) -> Option<String> {
        self.expr.name()
    }

    fn update_column(&self) -> Option<Column> {
        self.expr.update_column()
    }

    fn is_aggregate(&self) -> bool {
        self.expr.is_aggregate()
            || self
                .pairs
                .iter()
                .any(|(k, v)| k.is_aggregate() || v.is_aggregate())
            || self.else_value.as_ref().is_some_and(Operand::is_aggregate)
    }

    fn add_referenced_columns(&self, columns: &mut HashSet<Column>) {
        self.expr.add_referenced_columns(columns);
        for (key, result) in &self.pairs {
            key.add_referenced_columns(columns);
            result.add_referenced_columns(columns);
        }
        if let Some(else_value) = &self.else_value {
            else_value.add_referenced_columns(columns);
        }
    }

    fn render(&self, sql: &mut SqlBuilder<'_>, ctx: Context) {
        let branches = self.render_branches(sql, ctx.without(Context::ALIAS));
        // the branch list is one opaque parameter of the decode phrase
        FuncExpr::from_phrase(
            self.expr.clone(),
            Phrase::FuncDecode,
            vec![Operand::Value(Value::Raw(branches))],
            DataType::Unknown,
            None,
            Some(self.data_type),
        )
        .render(sql, ctx);
    }

    fn describe(&self) -> ExprInfo {
        let mut info = ExprInfo::new("decode", self.data_type)
            .name(self.name())
            .function(Some("decode".to_string()))
            .aggregate(self.is_aggregate())
            .child(self.expr.describe());
        for (key, result) in &self.pairs {
            info = info.child(key.describe()).child(result.describe());
        }
        info.children(self.else_value.iter().map(Operand::describe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::dialect::Dialect;
    use crate::sql::expr::col;

    fn status_decode(else_value: Option<Operand>) -> ColumnExpr {
        DecodeExpr::new(
            col("STATUS", DataType::Integer),
            [(1, "A"), (2, "B")],
            else_value,
            DataType::Varchar,
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_case_form() {
        let d = status_decode(Some("C".into()));
        assert_eq!(
            d.to_sql(&Dialect::Generic),
            "case STATUS when 1 then 'A' when 2 then 'B' else 'C' end"
        );
    }

    #[test]
    fn test_oracle_decode_form() {
        let d = status_decode(Some("C".into()));
        assert_eq!(d.to_sql(&Dialect::Oracle), "decode(STATUS, 1, 'A', 2, 'B', 'C')");
    }

    #[test]
    fn test_order_is_stable_across_renders() {
        let d = status_decode(None);
        let first = d.to_sql(&Dialect::Generic);
        assert_eq!(first, "case STATUS when 1 then 'A' when 2 then 'B' end");
        assert_eq!(d.to_sql(&Dialect::Generic), first);
    }

    #[test]
    fn test_empty_mapping() {
        let d: ColumnExpr = DecodeExpr::new(
            col("STATUS", DataType::Integer),
            Vec::<(Operand, Operand)>::new(),
            None,
            DataType::Varchar,
        )
        .unwrap()
        .into();
        assert_eq!(d.to_sql(&Dialect::Generic), "case STATUS end");
        assert_eq!(d.to_sql(&Dialect::Oracle), "decode(STATUS)");
    }

    #[test]
    fn test_duplicate_key_keeps_position_takes_last_value() {
        let d: ColumnExpr = DecodeExpr::new(
            col("STATUS", DataType::Integer),
            [(1, "A"), (2, "B"), (1, "Z")],
            None,
            DataType::Varchar,
        )
        .unwrap()
        .into();
        assert_eq!(
            d.to_sql(&Dialect::Generic),
            "case STATUS when 1 then 'Z' when 2 then 'B' end"
        );
    }

    #[test]
    fn test_keys_checked_against_expression_type() {
        let err = DecodeExpr::new(
            col("STATUS", DataType::Integer),
            [("one", "A")],
            None,
            DataType::Varchar,
        )
        .unwrap_err();
        assert!(matches!(err, ExprError::InvalidArgument { .. }));
    }

    #[test]
    fn test_metadata() {
        let status = Column::new("STATUS", DataType::Integer);
        let other = col("OTHER", DataType::Varchar);
        let d = DecodeExpr::new(
            status.clone().into(),
            [(Operand::from(1), Operand::from(&other))],
            Some(Operand::from(other.max())),
            DataType::Varchar,
        )
        .unwrap();
        assert_eq!(d.update_column(), Some(status));
        assert_eq!(d.name().as_deref(), Some("STATUS"));
        assert!(d.is_aggregate());
        let mut columns = HashSet::new();
        d.add_referenced_columns(&mut columns);
        assert_eq!(columns.len(), 2);
    }
}
