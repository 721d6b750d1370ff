//! SELECT statement types
//!
//! Only the parts needed to follow a traversal into a nested query: hint,
//! projection, FROM table and WHERE condition. Joins, grouping and ordering
//! belong to the statement layer proper.

use super::expression::{Expression, Table};
use super::hint::OracleHint;
use serde::{Deserialize, Serialize};

/// A complete SELECT statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    /// Plain select or set operation
    pub body: SelectBody,
}

impl Select {
    /// Statement consisting of one plain select.
    pub fn plain(select: PlainSelect) -> Self {
        Self {
            body: SelectBody::Plain(Box::new(select)),
        }
    }

    /// The body as a plain select, if it is one.
    pub fn as_plain(&self) -> Option<&PlainSelect> {
        match &self.body {
            SelectBody::Plain(plain) => Some(plain),
            SelectBody::SetOperation(_) => None,
        }
    }
}

/// Body of a SELECT statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectBody {
    /// Single query block
    Plain(Box<PlainSelect>),
    /// UNION / INTERSECT / EXCEPT chain
    SetOperation(SetOperationList),
}

/// `SELECT [hint] [DISTINCT] items [FROM table] [WHERE condition]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlainSelect {
    /// Hint comment following the SELECT keyword
    pub oracle_hint: Option<OracleHint>,
    /// `SELECT DISTINCT`
    pub distinct: bool,
    /// Projection list
    pub items: Vec<SelectItem>,
    /// FROM table
    pub from: Option<Table>,
    /// WHERE condition
    pub where_clause: Option<Expression>,
}

impl PlainSelect {
    /// `SELECT * FROM table`
    pub fn all_from(table: Table) -> Self {
        Self {
            items: vec![SelectItem::AllColumns],
            from: Some(table),
            ..Default::default()
        }
    }

    /// Replaces the projection list.
    pub fn with_items(mut self, items: Vec<SelectItem>) -> Self {
        self.items = items;
        self
    }

    /// Sets the WHERE condition.
    pub fn with_where(mut self, condition: Expression) -> Self {
        self.where_clause = Some(condition);
        self
    }

    /// Attaches an optimizer hint.
    pub fn with_hint(mut self, hint: OracleHint) -> Self {
        self.oracle_hint = Some(hint);
        self
    }
}

/// An entry of the projection list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectItem {
    /// `*`
    AllColumns,
    /// `t.*`
    AllTableColumns(Table),
    /// `expr [AS alias]`
    Expression {
        /// Projected expression
        expression: Expression,
        /// Output column name
        alias: Option<String>,
    },
}

impl SelectItem {
    /// Unaliased projected expression.
    pub fn expression(expression: Expression) -> Self {
        SelectItem::Expression {
            expression,
            alias: None,
        }
    }
}

/// Operator joining the branches of a set operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOperator {
    /// `UNION`
    Union,
    /// `UNION ALL`
    UnionAll,
    /// `INTERSECT`
    Intersect,
    /// `EXCEPT`
    Except,
}

/// `first op second op third ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperationList {
    /// Leftmost branch
    pub first: Box<SelectBody>,
    /// Remaining branches with the operator preceding each
    pub rest: Vec<(SetOperator, SelectBody)>,
}

impl SetOperationList {
    /// Branches in source order.
    pub fn bodies(&self) -> impl Iterator<Item = &SelectBody> {
        std::iter::once(self.first.as_ref()).chain(self.rest.iter().map(|(_, body)| body))
    }
}
