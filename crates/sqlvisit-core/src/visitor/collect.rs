//! Column reference collection.

use super::expression::ExpressionVisitor;
use super::select::{reborrow_select_visitor, SelectVisitor};
use crate::ast::{Column, Expression};
use std::convert::Infallible;

/// Records every column reference in traversal order.
///
/// Subqueries are only followed when a select visitor is attached.
#[derive(Default)]
pub struct ColumnCollector<'s, 'ast> {
    columns: Vec<&'ast Column>,
    select_visitor: Option<&'s mut dyn SelectVisitor<'ast, Error = Infallible>>,
}

impl<'s, 'ast> ColumnCollector<'s, 'ast> {
    /// Collector that does not enter subqueries.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            select_visitor: None,
        }
    }

    /// Collector that hands nested SELECTs to `select_visitor`.
    pub fn with_select_visitor(
        select_visitor: &'s mut dyn SelectVisitor<'ast, Error = Infallible>,
    ) -> Self {
        Self {
            columns: Vec::new(),
            select_visitor: Some(select_visitor),
        }
    }

    /// Columns seen so far.
    pub fn columns(&self) -> &[&'ast Column] {
        &self.columns
    }

    /// Unqualified names of the columns seen so far.
    pub fn names(&self) -> Vec<&'ast str> {
        self.columns.iter().map(|c| c.column_name.as_str()).collect()
    }

    /// Consumes the collector.
    pub fn into_columns(self) -> Vec<&'ast Column> {
        self.columns
    }
}

impl<'s, 'ast> ExpressionVisitor<'ast> for ColumnCollector<'s, 'ast> {
    type Error = Infallible;

    fn select_visitor(&mut self) -> Option<&mut dyn SelectVisitor<'ast, Error = Infallible>> {
        reborrow_select_visitor(&mut self.select_visitor)
    }

    fn visit_column(&mut self, column: &'ast Column) -> Result<(), Infallible> {
        self.columns.push(column);
        Ok(())
    }
}

/// Columns referenced by `expr`, outside of subqueries, in source order.
pub fn referenced_columns(expr: &Expression) -> Vec<&Column> {
    let mut collector = ColumnCollector::new();
    if let Err(never) = expr.accept(&mut collector) {
        match never {}
    }
    collector.into_columns()
}
