//! Expression visitor protocol and its default traversal.
//!
//! Each method of [`ExpressionVisitor`] is a hook for one node kind. By
//! default every hook descends into the node's children, in the order they
//! appear in SQL text, by calling the matching `walk_*` function. Override a
//! hook to react to that kind; call the `walk_*` function from the override to
//! keep descending. Calling it first and recording afterwards gives post-order,
//! the other way round gives pre-order.
//!
//! Traversal is plain recursion: stack usage grows with the depth of the tree
//! (nested parentheses, AT TIME ZONE chains, nested subqueries), not with its
//! width.

use super::select::SelectVisitor;
use crate::ast::*;
use tracing::{debug, trace};

/// One operation per expression kind plus one per items-list kind.
///
/// The error type belongs to the visitor. The traversal never creates errors
/// of its own; whatever a hook returns is handed back to the caller of
/// `accept` untouched.
pub trait ExpressionVisitor<'ast> {
    /// Error produced by the visitor's own hooks
    type Error;

    /// Statement-level visitor to hand nested SELECTs to.
    ///
    /// `None` (the default) means subqueries are not entered: sub-select,
    /// EXISTS, ANY/ALL and IN-subquery nodes are dispatched but their nested
    /// statement is skipped without error.
    fn select_visitor(&mut self) -> Option<&mut dyn SelectVisitor<'ast, Error = Self::Error>> {
        None
    }

    /// Entry point for every expression; dispatches on the node kind.
    fn visit_expression(&mut self, expr: &'ast Expression) -> Result<(), Self::Error> {
        walk_expression(self, expr)
    }

    /// Column reference; a leaf.
    fn visit_column(&mut self, _column: &'ast Column) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Literal value; a leaf.
    fn visit_literal(&mut self, _literal: &'ast Literal) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Bind parameter; a leaf.
    fn visit_parameter(&mut self, _parameter: &'ast Parameter) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Temporal keyword; a leaf.
    fn visit_time_key(&mut self, _expr: &'ast TimeKeyExpression) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Optimizer hint; a leaf.
    fn visit_oracle_hint(&mut self, _hint: &'ast OracleHint) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Parenthesized expression.
    fn visit_parenthesis(&mut self, expr: &'ast Parenthesis) -> Result<(), Self::Error> {
        walk_parenthesis(self, expr)
    }

    /// Sign operator.
    fn visit_signed(&mut self, expr: &'ast SignedExpression) -> Result<(), Self::Error> {
        walk_signed(self, expr)
    }

    /// `NOT` operator.
    fn visit_not(&mut self, expr: &'ast NotExpression) -> Result<(), Self::Error> {
        walk_not(self, expr)
    }

    /// All binary operators, `XOR` included; the operator is `expr.op`.
    fn visit_binary(&mut self, expr: &'ast BinaryExpression) -> Result<(), Self::Error> {
        walk_binary(self, expr)
    }

    /// `IS [NOT] NULL` test.
    fn visit_is_null(&mut self, expr: &'ast IsNullExpression) -> Result<(), Self::Error> {
        walk_is_null(self, expr)
    }

    /// `BETWEEN` range test.
    fn visit_between(&mut self, expr: &'ast BetweenExpression) -> Result<(), Self::Error> {
        walk_between(self, expr)
    }

    /// `IN` expression: left operand, then the right items list.
    fn visit_in(&mut self, expr: &'ast InExpression) -> Result<(), Self::Error> {
        walk_in(self, expr)
    }

    /// `EXISTS` test.
    fn visit_exists(&mut self, expr: &'ast ExistsExpression) -> Result<(), Self::Error> {
        walk_exists(self, expr)
    }

    /// `ANY` / `ALL` / `SOME` quantified subquery.
    fn visit_any_comparison(
        &mut self,
        expr: &'ast AnyComparisonExpression,
    ) -> Result<(), Self::Error> {
        walk_any_comparison(self, expr)
    }

    /// Scalar subquery, also reached from EXISTS and ANY/ALL.
    fn visit_sub_select(&mut self, sub_select: &'ast SubSelect) -> Result<(), Self::Error> {
        walk_sub_select(self, sub_select)
    }

    /// CASE expression.
    fn visit_case(&mut self, expr: &'ast CaseExpression) -> Result<(), Self::Error> {
        walk_case(self, expr)
    }

    /// One `WHEN ... THEN ...` branch of a CASE.
    fn visit_when_clause(&mut self, clause: &'ast WhenClause) -> Result<(), Self::Error> {
        walk_when_clause(self, clause)
    }

    /// Function call; its arguments go through `visit_expression_list`.
    fn visit_function(&mut self, function: &'ast Function) -> Result<(), Self::Error> {
        walk_function(self, function)
    }

    /// `CAST` conversion.
    fn visit_cast(&mut self, expr: &'ast CastExpression) -> Result<(), Self::Error> {
        walk_cast(self, expr)
    }

    /// Window function.
    fn visit_analytic(&mut self, expr: &'ast AnalyticExpression) -> Result<(), Self::Error> {
        walk_analytic(self, expr)
    }

    /// `AT TIME ZONE` conversion.
    fn visit_at_time_zone(&mut self, expr: &'ast AtTimeZoneExpression) -> Result<(), Self::Error> {
        walk_at_time_zone(self, expr)
    }

    // Items lists

    /// Explicit expression list of an IN, tuple or function call.
    fn visit_expression_list(&mut self, list: &'ast ExpressionList) -> Result<(), Self::Error> {
        walk_expression_list(self, list)
    }

    /// Subquery operand of IN.
    fn visit_sub_select_items(&mut self, sub_select: &'ast SubSelect) -> Result<(), Self::Error> {
        walk_sub_select(self, sub_select)
    }
}

/// Dispatches `expr` to the hook for its node kind.
pub fn walk_expression<'ast, V>(visitor: &mut V, expr: &'ast Expression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    match expr {
        Expression::Column(column) => visitor.visit_column(column),
        Expression::Literal(literal) => visitor.visit_literal(literal),
        Expression::Parameter(parameter) => visitor.visit_parameter(parameter),
        Expression::TimeKey(e) => visitor.visit_time_key(e),
        Expression::OracleHint(hint) => visitor.visit_oracle_hint(hint),
        Expression::Parenthesis(e) => visitor.visit_parenthesis(e),
        Expression::Signed(e) => visitor.visit_signed(e),
        Expression::Not(e) => visitor.visit_not(e),
        Expression::Binary(e) => visitor.visit_binary(e),
        Expression::IsNull(e) => visitor.visit_is_null(e),
        Expression::Between(e) => visitor.visit_between(e),
        Expression::In(e) => visitor.visit_in(e),
        Expression::Exists(e) => visitor.visit_exists(e),
        Expression::AnyComparison(e) => visitor.visit_any_comparison(e),
        Expression::SubSelect(sub_select) => visitor.visit_sub_select(sub_select),
        Expression::Case(e) => visitor.visit_case(e),
        Expression::Function(function) => visitor.visit_function(function),
        Expression::Cast(e) => visitor.visit_cast(e),
        Expression::Analytic(e) => visitor.visit_analytic(e),
        Expression::AtTimeZone(e) => visitor.visit_at_time_zone(e),
    }
}

/// Visits the enclosed expression.
pub fn walk_parenthesis<'ast, V>(visitor: &mut V, expr: &'ast Parenthesis) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_expression(&expr.expression)
}

/// Visits the operand.
pub fn walk_signed<'ast, V>(visitor: &mut V, expr: &'ast SignedExpression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_expression(&expr.expression)
}

/// Visits the operand.
pub fn walk_not<'ast, V>(visitor: &mut V, expr: &'ast NotExpression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_expression(&expr.expression)
}

/// Left operand, then right.
pub fn walk_binary<'ast, V>(visitor: &mut V, expr: &'ast BinaryExpression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_expression(&expr.left)?;
    visitor.visit_expression(&expr.right)
}

/// Visits the tested operand.
pub fn walk_is_null<'ast, V>(visitor: &mut V, expr: &'ast IsNullExpression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_expression(&expr.expression)
}

/// Operand, lower bound, upper bound.
pub fn walk_between<'ast, V>(visitor: &mut V, expr: &'ast BetweenExpression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_expression(&expr.expression)?;
    visitor.visit_expression(&expr.start)?;
    visitor.visit_expression(&expr.end)
}

/// Left side (scalar or tuple), then the right items list.
pub fn walk_in<'ast, V>(visitor: &mut V, expr: &'ast InExpression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    match &expr.left {
        InLeft::Scalar(left) => visitor.visit_expression(left)?,
        InLeft::Tuple(items) => walk_items_list(visitor, items)?,
    }
    walk_items_list(visitor, &expr.right)
}

/// Hands the subquery to `visit_sub_select`.
pub fn walk_exists<'ast, V>(visitor: &mut V, expr: &'ast ExistsExpression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_sub_select(&expr.sub_select)
}

/// Hands the subquery to `visit_sub_select`.
pub fn walk_any_comparison<'ast, V>(
    visitor: &mut V,
    expr: &'ast AnyComparisonExpression,
) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_sub_select(&expr.sub_select)
}

/// Hands the nested statement to the visitor's select visitor, if it has one.
pub fn walk_sub_select<'ast, V>(visitor: &mut V, sub_select: &'ast SubSelect) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    match visitor.select_visitor() {
        Some(select_visitor) => {
            trace!(alias = ?sub_select.alias, "entering sub-select");
            select_visitor.visit_select(&sub_select.select)
        }
        None => {
            debug!(
                alias = ?sub_select.alias,
                "no select visitor configured, sub-select not entered"
            );
            Ok(())
        }
    }
}

/// Optional switch, every WHEN clause in order, optional ELSE.
pub fn walk_case<'ast, V>(visitor: &mut V, expr: &'ast CaseExpression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    if let Some(switch) = &expr.switch_expression {
        visitor.visit_expression(switch)?;
    }
    for clause in expr.when_clauses() {
        visitor.visit_when_clause(clause)?;
    }
    if let Some(else_expression) = &expr.else_expression {
        visitor.visit_expression(else_expression)?;
    }
    Ok(())
}

/// Condition, then result.
pub fn walk_when_clause<'ast, V>(visitor: &mut V, clause: &'ast WhenClause) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_expression(&clause.when_expression)?;
    visitor.visit_expression(&clause.then_expression)
}

/// Argument list, if the call has one.
pub fn walk_function<'ast, V>(visitor: &mut V, function: &'ast Function) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    match &function.parameters {
        Some(parameters) => visitor.visit_expression_list(parameters),
        None => Ok(()),
    }
}

/// Visits the converted operand.
pub fn walk_cast<'ast, V>(visitor: &mut V, expr: &'ast CastExpression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_expression(&expr.expression)
}

/// PARTITION BY entries, ORDER BY entries, then the argument, offset and
/// default value that are present.
pub fn walk_analytic<'ast, V>(visitor: &mut V, expr: &'ast AnalyticExpression) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    for partition in &expr.partition_by {
        visitor.visit_expression(partition)?;
    }
    for element in &expr.order_by {
        visitor.visit_expression(&element.expression)?;
    }
    for operand in [&expr.argument, &expr.offset, &expr.default_value]
        .into_iter()
        .flatten()
    {
        visitor.visit_expression(operand)?;
    }
    Ok(())
}

/// Visits the converted operand.
pub fn walk_at_time_zone<'ast, V>(
    visitor: &mut V,
    expr: &'ast AtTimeZoneExpression,
) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    visitor.visit_expression(&expr.expression)
}

/// Routes an items list to the items-list hook matching its kind.
pub fn walk_items_list<'ast, V>(visitor: &mut V, items: &'ast ItemsList) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    match items {
        ItemsList::ExpressionList(list) => visitor.visit_expression_list(list),
        ItemsList::SubSelect(sub_select) => visitor.visit_sub_select_items(sub_select),
    }
}

/// Every element in order.
pub fn walk_expression_list<'ast, V>(
    visitor: &mut V,
    list: &'ast ExpressionList,
) -> Result<(), V::Error>
where
    V: ExpressionVisitor<'ast> + ?Sized,
{
    for expr in &list.expressions {
        visitor.visit_expression(expr)?;
    }
    Ok(())
}

impl Expression {
    /// Dispatches this node into `visitor`.
    pub fn accept<'ast, V>(&'ast self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: ExpressionVisitor<'ast> + ?Sized,
    {
        visitor.visit_expression(self)
    }
}

impl ItemsList {
    /// Routes this list into `visitor`'s items-list hooks.
    pub fn accept<'ast, V>(&'ast self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: ExpressionVisitor<'ast> + ?Sized,
    {
        walk_items_list(visitor, self)
    }
}

impl WhenClause {
    /// Dispatches this clause into `visitor`.
    pub fn accept<'ast, V>(&'ast self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: ExpressionVisitor<'ast> + ?Sized,
    {
        visitor.visit_when_clause(self)
    }
}

impl OracleHint {
    /// Dispatches this hint into `visitor`.
    pub fn accept<'ast, V>(&'ast self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: ExpressionVisitor<'ast> + ?Sized,
    {
        visitor.visit_oracle_hint(self)
    }
}
