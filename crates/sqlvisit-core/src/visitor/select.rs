//! Statement-level visitor used as the bridge into nested SELECTs.

use super::expression::ExpressionVisitor;
use crate::ast::{PlainSelect, Select, SelectBody, SelectItem, SetOperationList};
use std::fmt;
use std::marker::PhantomData;

/// One operation per SELECT body kind.
///
/// Plain selects are not descended into by default; what a nested query
/// means to a traversal is up to the implementor (see
/// [`SelectExpressionWalker`] for the common case). Set operations visit each
/// branch in order.
pub trait SelectVisitor<'ast> {
    /// Error produced by the visitor's own hooks
    type Error;

    /// Whole statement; dispatches on its body.
    fn visit_select(&mut self, select: &'ast Select) -> Result<(), Self::Error> {
        walk_select_body(self, &select.body)
    }

    /// Single query block. Does nothing by default.
    fn visit_plain_select(&mut self, _select: &'ast PlainSelect) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Set operation; visits each branch in order.
    fn visit_set_operation_list(
        &mut self,
        list: &'ast SetOperationList,
    ) -> Result<(), Self::Error> {
        walk_set_operation_list(self, list)
    }
}

/// Dispatches `body` to the hook for its kind.
pub fn walk_select_body<'ast, V>(visitor: &mut V, body: &'ast SelectBody) -> Result<(), V::Error>
where
    V: SelectVisitor<'ast> + ?Sized,
{
    match body {
        SelectBody::Plain(plain) => visitor.visit_plain_select(plain),
        SelectBody::SetOperation(list) => visitor.visit_set_operation_list(list),
    }
}

/// Every branch body in source order.
pub fn walk_set_operation_list<'ast, V>(
    visitor: &mut V,
    list: &'ast SetOperationList,
) -> Result<(), V::Error>
where
    V: SelectVisitor<'ast> + ?Sized,
{
    for body in list.bodies() {
        walk_select_body(visitor, body)?;
    }
    Ok(())
}

/// Narrows a stored select visitor to a borrow of its holder.
pub(crate) fn reborrow_select_visitor<'a, 'ast, E>(
    slot: &'a mut Option<&mut dyn SelectVisitor<'ast, Error = E>>,
) -> Option<&'a mut dyn SelectVisitor<'ast, Error = E>> {
    let select_visitor: &'a mut dyn SelectVisitor<'ast, Error = E> = &mut **slot.as_mut()?;
    Some(select_visitor)
}

impl Select {
    /// Dispatches this statement into `visitor`.
    pub fn accept<'ast, V>(&'ast self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: SelectVisitor<'ast> + ?Sized,
    {
        visitor.visit_select(self)
    }
}

/// Select visitor that accepts every statement and does nothing with it.
pub struct SelectVisitorAdapter<E = crate::Error> {
    _error: PhantomData<fn() -> E>,
}

impl<E> SelectVisitorAdapter<E> {
    /// No-op select visitor.
    pub fn new() -> Self {
        Self {
            _error: PhantomData,
        }
    }
}

impl<E> Default for SelectVisitorAdapter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for SelectVisitorAdapter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectVisitorAdapter").finish()
    }
}

impl<'ast, E> SelectVisitor<'ast> for SelectVisitorAdapter<E> {
    type Error = E;
}

/// Feeds the expressions of each plain select into an expression visitor.
///
/// Visits the hint, then each projected expression, then the WHERE
/// condition. Subqueries found inside are handled by the wrapped visitor's
/// own select visitor, if it has one.
pub struct SelectExpressionWalker<'v, V> {
    visitor: &'v mut V,
}

impl<'v, V> SelectExpressionWalker<'v, V> {
    /// Wraps `visitor`.
    pub fn new(visitor: &'v mut V) -> Self {
        Self { visitor }
    }

    /// The wrapped expression visitor.
    pub fn into_inner(self) -> &'v mut V {
        self.visitor
    }
}

impl<'v, 'ast, V> SelectVisitor<'ast> for SelectExpressionWalker<'v, V>
where
    V: ExpressionVisitor<'ast>,
{
    type Error = V::Error;

    fn visit_plain_select(&mut self, select: &'ast PlainSelect) -> Result<(), Self::Error> {
        if let Some(hint) = &select.oracle_hint {
            self.visitor.visit_oracle_hint(hint)?;
        }
        for item in &select.items {
            if let SelectItem::Expression { expression, .. } = item {
                self.visitor.visit_expression(expression)?;
            }
        }
        if let Some(condition) = &select.where_clause {
            self.visitor.visit_expression(condition)?;
        }
        Ok(())
    }
}
