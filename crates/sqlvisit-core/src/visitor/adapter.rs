//! Ready-made default traversal.

use super::expression::ExpressionVisitor;
use super::select::{reborrow_select_visitor, SelectVisitor};
use std::fmt;

/// Walks every reachable node and does nothing else.
///
/// Use it as-is to drive a full traversal, optionally with a select visitor
/// to continue into subqueries, or embed it in your own visitor and forward
/// [`ExpressionVisitor::select_visitor`] to it.
pub struct ExpressionVisitorAdapter<'s, 'ast, E = crate::Error> {
    select_visitor: Option<&'s mut dyn SelectVisitor<'ast, Error = E>>,
}

impl<'s, 'ast, E> ExpressionVisitorAdapter<'s, 'ast, E> {
    /// Adapter without a select visitor: subqueries are not entered.
    pub fn new() -> Self {
        Self {
            select_visitor: None,
        }
    }

    /// Adapter that hands nested SELECTs to `select_visitor`.
    pub fn with_select_visitor(select_visitor: &'s mut dyn SelectVisitor<'ast, Error = E>) -> Self {
        Self {
            select_visitor: Some(select_visitor),
        }
    }

    /// Replaces the select visitor.
    pub fn set_select_visitor(&mut self, select_visitor: &'s mut dyn SelectVisitor<'ast, Error = E>) {
        self.select_visitor = Some(select_visitor);
    }

    /// True when subqueries will be entered.
    pub fn has_select_visitor(&self) -> bool {
        self.select_visitor.is_some()
    }
}

impl<'s, 'ast, E> Default for ExpressionVisitorAdapter<'s, 'ast, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, 'ast, E> fmt::Debug for ExpressionVisitorAdapter<'s, 'ast, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionVisitorAdapter")
            .field("select_visitor", &self.has_select_visitor())
            .finish()
    }
}

impl<'s, 'ast, E> ExpressionVisitor<'ast> for ExpressionVisitorAdapter<'s, 'ast, E> {
    type Error = E;

    fn select_visitor(&mut self) -> Option<&mut dyn SelectVisitor<'ast, Error = E>> {
        reborrow_select_visitor(&mut self.select_visitor)
    }
}
