//! Fluent constructors on [`ColumnExpr`].

use super::func::FuncExpr;
use super::{
    AliasExpr, CalcExpr, CalcOp, Column, ColumnExpr, ConcatExpr, ConcatFuncExpr, DecodeExpr,
    FuncExExpr, ValueExpr,
};
use crate::sql::error::ExprError;
use crate::sql::operand::Operand;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;
use crate::sql::value::Value;

impl ColumnExpr {
    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// `self+value`. A negative integer constant flips to `self-|value|`.
    pub fn plus(&self, value: impl Into<Operand>) -> Result<ColumnExpr, ExprError> {
        let (op, value) = fold_sign(CalcOp::Plus, value.into());
        Ok(CalcExpr::new(self.clone(), op, value)?.into())
    }

    /// `self-value`. A negative integer constant flips to `self+|value|`.
    pub fn minus(&self, value: impl Into<Operand>) -> Result<ColumnExpr, ExprError> {
        let (op, value) = fold_sign(CalcOp::Minus, value.into());
        Ok(CalcExpr::new(self.clone(), op, value)?.into())
    }

    pub fn multiply_with(&self, value: impl Into<Operand>) -> Result<ColumnExpr, ExprError> {
        Ok(CalcExpr::new(self.clone(), CalcOp::Multiply, value)?.into())
    }

    pub fn divide_by(&self, value: impl Into<Operand>) -> Result<ColumnExpr, ExprError> {
        Ok(CalcExpr::new(self.clone(), CalcOp::Divide, value)?.into())
    }

    /// Concatenate `value` as text.
    pub fn append(&self, value: impl Into<Operand>) -> ColumnExpr {
        ConcatExpr::new(self.clone(), value).into()
    }

    /// `value` in front of `self`: concatenation for text, `+` otherwise.
    ///
    /// A constant takes the type of `self`, so `5` before a varchar column
    /// renders as the text `'5'`.
    pub fn prepend(&self, value: impl Into<Operand>) -> Result<ColumnExpr, ExprError> {
        let data_type = self.data_type();
        let is_text = data_type.is_text() || data_type == DataType::Unknown;
        let left: ColumnExpr = match value.into() {
            Operand::Expr(expr) => expr,
            Operand::Value(value) => {
                let dt = if is_text { DataType::Varchar } else { data_type };
                ValueExpr::new(value, dt)?.into()
            }
            Operand::List(_) => {
                return Err(ExprError::invalid_argument(
                    "value",
                    "list",
                    "cannot prepend a list",
                ))
            }
        };
        if is_text {
            Ok(ConcatExpr::new(left, self.clone()).into())
        } else {
            Ok(CalcExpr::new(left, CalcOp::Plus, self.clone())?.into())
        }
    }

    /// `concat(self, a, b, ..)` through the dialect's `func_concat` phrase.
    pub fn concat(&self, others: &[ColumnExpr]) -> ColumnExpr {
        ConcatFuncExpr::new(self.clone(), None, others.to_vec()).into()
    }

    /// [`ColumnExpr::concat`] with `separator` between every two operands.
    pub fn concat_separated(&self, separator: &str, others: &[ColumnExpr]) -> ColumnExpr {
        ConcatFuncExpr::new(self.clone(), Some(separator.to_string()), others.to_vec()).into()
    }

    /// `(self)`.
    pub fn parenthesis(&self) -> ColumnExpr {
        FuncExpr::wrap(self.clone(), "(", ")", self.update_column()).into()
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Function from a caller-supplied template containing one `?`.
    pub fn function(
        &self,
        template: &str,
        data_type: Option<DataType>,
        aggregate: bool,
    ) -> Result<ColumnExpr, ExprError> {
        Ok(FuncExpr::new(self.clone(), template, None, aggregate, data_type)?.into())
    }

    /// `prefix self middle other postfix`, e.g. `nullif(A, B)`.
    ///
    /// The result is never reported as aggregate.
    pub fn binary_function(
        &self,
        prefix: &str,
        middle: &str,
        other: &ColumnExpr,
        postfix: &str,
    ) -> ColumnExpr {
        FuncExExpr::binary(prefix, self.clone(), middle, other.clone(), postfix).into()
    }

    /// `self` if not null, else `value`.
    pub fn coalesce(&self, value: impl Into<Operand>) -> Result<ColumnExpr, ExprError> {
        self.checked_phrase(Phrase::FuncCoalesce, vec![value.into()], self.data_type(), None)
    }

    /// Substring from 1-based `pos` to the end.
    pub fn substring(&self, pos: i64) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncSubstring, vec![pos.into()], DataType::Integer)
    }

    pub fn substring_with_length(&self, pos: i64, count: i64) -> ColumnExpr {
        self.derived_phrase(
            Phrase::FuncSubstringEx,
            vec![pos.into(), count.into()],
            DataType::Integer,
        )
    }

    pub fn replace(
        &self,
        find: impl Into<Operand>,
        replacement: impl Into<Operand>,
    ) -> Result<ColumnExpr, ExprError> {
        self.checked_phrase(
            Phrase::FuncReplace,
            vec![find.into(), replacement.into()],
            DataType::Varchar,
            None,
        )
    }

    pub fn reverse(&self) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncReverse, vec![], DataType::Varchar)
    }

    /// 1-based position of `find` in `self`, 0 if absent.
    pub fn index_of(&self, find: impl Into<Operand>) -> Result<ColumnExpr, ExprError> {
        self.checked_phrase(
            Phrase::FuncStrIndex,
            vec![find.into()],
            DataType::Varchar,
            Some(DataType::Integer),
        )
    }

    /// Like [`ColumnExpr::index_of`], searching from `from`.
    pub fn index_of_from(
        &self,
        find: impl Into<Operand>,
        from: impl Into<Operand>,
    ) -> Result<ColumnExpr, ExprError> {
        let from = from.into();
        from.check_for(DataType::Integer)?;
        self.checked_phrase(
            Phrase::FuncStrIndexFrom,
            vec![find.into(), from],
            DataType::Varchar,
            Some(DataType::Integer),
        )
    }

    pub fn length(&self) -> ColumnExpr {
        self.func_phrase(Phrase::FuncLength, vec![], DataType::Unknown, None, Some(DataType::Integer))
    }

    pub fn upper(&self) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncUpper, vec![], DataType::Varchar)
    }

    pub fn lower(&self) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncLower, vec![], DataType::Varchar)
    }

    pub fn trim(&self) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncTrim, vec![], DataType::Varchar)
    }

    pub fn trim_left(&self) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncLtrim, vec![], DataType::Varchar)
    }

    pub fn trim_right(&self) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncRtrim, vec![], DataType::Varchar)
    }

    /// `self escape 'c'`, for LIKE patterns.
    pub fn escape(&self, escape: char) -> ColumnExpr {
        self.func_phrase(
            Phrase::FuncEscape,
            vec![escape.to_string().into()],
            DataType::Varchar,
            None,
            Some(DataType::Varchar),
        )
    }

    pub fn abs(&self) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncAbs, vec![], DataType::Unknown)
    }

    pub fn round(&self, decimals: i32) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncRound, vec![decimals.into()], DataType::Integer)
    }

    pub fn trunc(&self, decimals: i32) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncTrunc, vec![decimals.into()], DataType::Integer)
    }

    pub fn floor(&self) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncFloor, vec![], DataType::Unknown)
    }

    pub fn ceiling(&self) -> ColumnExpr {
        self.derived_phrase(Phrase::FuncCeiling, vec![], DataType::Unknown)
    }

    pub fn modulo(&self, divisor: impl Into<Operand>) -> Result<ColumnExpr, ExprError> {
        self.checked_phrase(Phrase::FuncModulo, vec![divisor.into()], DataType::Integer, None)
    }

    /// Format with a dialect-specific pattern. Always text.
    pub fn format(&self, pattern: &str) -> ColumnExpr {
        self.func_phrase(
            Phrase::FuncFormat,
            vec![pattern.into()],
            DataType::Varchar,
            None,
            Some(DataType::Varchar),
        )
    }

    // =========================================================================
    // Date parts
    // =========================================================================

    pub fn day(&self) -> ColumnExpr {
        self.func_phrase(Phrase::FuncDay, vec![], DataType::Unknown, None, Some(DataType::Integer))
    }

    pub fn month(&self) -> ColumnExpr {
        self.func_phrase(Phrase::FuncMonth, vec![], DataType::Unknown, None, Some(DataType::Integer))
    }

    pub fn year(&self) -> ColumnExpr {
        self.func_phrase(Phrase::FuncYear, vec![], DataType::Unknown, None, Some(DataType::Integer))
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    pub fn sum(&self) -> ColumnExpr {
        self.func_phrase(Phrase::FuncSum, vec![], DataType::Unknown, None, None)
    }

    pub fn min(&self) -> ColumnExpr {
        self.func_phrase(Phrase::FuncMin, vec![], DataType::Unknown, None, None)
    }

    pub fn max(&self) -> ColumnExpr {
        self.func_phrase(Phrase::FuncMax, vec![], DataType::Unknown, None, None)
    }

    pub fn avg(&self) -> ColumnExpr {
        self.func_phrase(Phrase::FuncAvg, vec![], DataType::Unknown, None, None)
    }

    pub fn count(&self) -> ColumnExpr {
        self.func_phrase(Phrase::FuncCount, vec![], DataType::Unknown, None, Some(DataType::Integer))
    }

    /// `count(distinct self)`.
    pub fn count_distinct(&self) -> ColumnExpr {
        self.func_phrase(
            Phrase::FuncCountDistinct,
            vec![],
            DataType::Unknown,
            None,
            Some(DataType::Integer),
        )
    }

    // =========================================================================
    // Conversion, decode, alias
    // =========================================================================

    /// Convert to `data_type` using the dialect's conversion template.
    pub fn convert_to(&self, data_type: DataType, format: Option<&str>) -> ColumnExpr {
        FuncExpr::convert(self.clone(), data_type, format.map(str::to_string)).into()
    }

    /// Map values of `self` to results of `data_type`, in the given order.
    pub fn decode<I, K, V>(&self, pairs: I, data_type: DataType) -> Result<ColumnExpr, ExprError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Operand>,
        V: Into<Operand>,
    {
        Ok(DecodeExpr::new(self.clone(), pairs, None, data_type)?.into())
    }

    /// [`ColumnExpr::decode`] with a fallback for unmatched values.
    pub fn decode_else<I, K, V>(
        &self,
        pairs: I,
        otherwise: impl Into<Operand>,
        data_type: DataType,
    ) -> Result<ColumnExpr, ExprError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Operand>,
        V: Into<Operand>,
    {
        Ok(DecodeExpr::new(self.clone(), pairs, Some(otherwise.into()), data_type)?.into())
    }

    pub fn alias(&self, name: &str) -> ColumnExpr {
        AliasExpr::new(self.clone(), name).into()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Phrase function keeping the operand's update column.
    fn derived_phrase(&self, phrase: Phrase, params: Vec<Operand>, param_type: DataType) -> ColumnExpr {
        self.func_phrase(phrase, params, param_type, self.update_column(), None)
    }

    fn func_phrase(
        &self,
        phrase: Phrase,
        params: Vec<Operand>,
        param_type: DataType,
        update_column: Option<Column>,
        data_type: Option<DataType>,
    ) -> ColumnExpr {
        FuncExpr::from_phrase(self.clone(), phrase, params, param_type, update_column, data_type)
            .into()
    }

    fn checked_phrase(
        &self,
        phrase: Phrase,
        params: Vec<Operand>,
        param_type: DataType,
        data_type: Option<DataType>,
    ) -> Result<ColumnExpr, ExprError> {
        Ok(FuncExpr::phrase(
            self.clone(),
            phrase,
            params,
            param_type,
            self.update_column(),
            data_type,
        )?
        .into())
    }
}

fn fold_sign(op: CalcOp, value: Operand) -> (CalcOp, Operand) {
    let flipped = match op {
        CalcOp::Plus => CalcOp::Minus,
        CalcOp::Minus => CalcOp::Plus,
        other => return (other, value),
    };
    match value {
        Operand::Value(Value::Int(n)) if n < 0 => match n.checked_neg() {
            Some(abs) => (flipped, Operand::Value(Value::Int(abs))),
            None => (op, Operand::Value(Value::Int(n))),
        },
        value => (op, value),
    }
}
