//! Items lists: the operands of IN and tuple constructs

use super::expression::Expression;
use super::select::Select;
use serde::{Deserialize, Serialize};

/// Either an explicit list of expressions or a nested subquery.
///
/// An items list is not an expression; it is dispatched through the
/// items-list operations of the visitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemsList {
    /// `(?, ?, ?)`, `(a, b)`
    ExpressionList(ExpressionList),
    /// `(SELECT ...)`
    SubSelect(SubSelect),
}

impl ItemsList {
    /// Explicit value list.
    pub fn expressions(expressions: Vec<Expression>) -> Self {
        ItemsList::ExpressionList(ExpressionList::new(expressions))
    }

    /// Subquery operand.
    pub fn sub_select(select: Select) -> Self {
        ItemsList::SubSelect(SubSelect::new(select))
    }
}

/// Ordered, possibly empty, list of expressions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressionList {
    /// Elements in source order
    pub expressions: Vec<Expression>,
}

impl ExpressionList {
    /// Wraps `expressions` as a list.
    pub fn new(expressions: Vec<Expression>) -> Self {
        Self { expressions }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// True for `()`.
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

/// A SELECT nested inside an expression or items list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSelect {
    /// Nested statement
    pub select: Select,
    /// `(SELECT ...) AS alias`
    pub alias: Option<String>,
}

impl SubSelect {
    /// Unaliased subquery.
    pub fn new(select: Select) -> Self {
        Self {
            select,
            alias: None,
        }
    }
}
