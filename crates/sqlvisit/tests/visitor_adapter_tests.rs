mod common;

use common::*;
use sqlvisit::visitor::{
    walk_analytic, walk_at_time_zone, walk_binary, walk_cast, walk_expression_list, walk_function,
    walk_in, walk_sub_select,
};
use sqlvisit::*;
use std::convert::Infallible;

/// Records every column name it meets.
#[derive(Default)]
struct ColumnNames {
    names: Vec<String>,
}

impl<'ast> ExpressionVisitor<'ast> for ColumnNames {
    type Error = Infallible;

    fn visit_column(&mut self, column: &'ast Column) -> Result<(), Infallible> {
        self.names.push(column.column_name.clone());
        Ok(())
    }
}

type InOperands<'ast> = (Option<&'ast Expression>, Option<&'ast ItemsList>, &'ast ItemsList);

/// Captures the operands of each IN expression after walking it.
#[derive(Default)]
struct InCapture<'ast> {
    seen: Vec<InOperands<'ast>>,
}

impl<'ast> ExpressionVisitor<'ast> for InCapture<'ast> {
    type Error = Infallible;

    fn visit_in(&mut self, expr: &'ast InExpression) -> Result<(), Infallible> {
        walk_in(self, expr)?;
        self.seen.push((
            expr.left_expression(),
            expr.left_items_list(),
            expr.right_items_list(),
        ));
        Ok(())
    }
}

#[test]
fn test_in_expression_with_scalar_left() {
    let select = x_in_parameters();
    let mut capture = InCapture::default();
    where_of(&select).accept(&mut capture).unwrap();

    assert_eq!(capture.seen.len(), 1);
    let (left, left_items, right) = capture.seen[0];
    assert_eq!(
        left.and_then(Expression::as_column).map(|c| c.column_name.as_str()),
        Some("x")
    );
    assert!(left_items.is_none());
    match right {
        ItemsList::ExpressionList(list) => {
            assert_eq!(list.len(), 3);
            assert!(list
                .expressions
                .iter()
                .all(|e| matches!(e, Expression::Parameter(Parameter::Positional(None)))));
        }
        other => panic!("expected expression list, got {:?}", other),
    }
}

#[test]
fn test_in_expression_with_tuple_left() {
    let select = tuple_in_subquery();
    let mut capture = InCapture::default();
    where_of(&select).accept(&mut capture).unwrap();

    let (left, left_items, right) = capture.seen[0];
    assert!(left.is_none());
    assert!(matches!(left_items, Some(ItemsList::ExpressionList(list)) if list.len() == 2));
    assert!(matches!(right, ItemsList::SubSelect(_)));
}

#[test]
fn test_in_expression_tuple_left_is_traversed_without_subquery() {
    let select = tuple_in_subquery();
    let mut columns = ColumnNames::default();
    where_of(&select).accept(&mut columns).unwrap();

    // a and b of the subquery projection are not reached without a select visitor
    assert_eq!(columns.names, vec!["a", "b"]);
}

#[test]
fn test_xor_expression() {
    #[derive(Default)]
    struct XorOperands<'ast> {
        operands: Vec<&'ast Expression>,
    }

    impl<'ast> ExpressionVisitor<'ast> for XorOperands<'ast> {
        type Error = Infallible;

        fn visit_binary(&mut self, expr: &'ast BinaryExpression) -> Result<(), Infallible> {
            walk_binary(self, expr)?;
            if expr.op == BinaryOperator::Xor {
                self.operands.push(&expr.left);
                self.operands.push(&expr.right);
            }
            Ok(())
        }
    }

    let select = foo_xor_bar();
    let mut xor = XorOperands::default();
    where_of(&select).accept(&mut xor).unwrap();

    assert_eq!(xor.operands.len(), 2);
    assert_eq!(
        xor.operands[0].as_column().map(|c| c.column_name.as_str()),
        Some("foo")
    );
    assert_eq!(
        xor.operands[1].as_column().map(|c| c.column_name.as_str()),
        Some("bar")
    );
}

#[test]
fn test_xor_columns_in_source_order() {
    let select = foo_xor_bar();
    let mut columns = ColumnNames::default();
    where_of(&select).accept(&mut columns).unwrap();
    assert_eq!(columns.names, vec!["foo", "bar"]);
}

#[test]
fn test_oracle_hint_expressions() {
    #[derive(Default)]
    struct HintHolder<'ast> {
        hint: Option<&'ast OracleHint>,
    }

    impl<'ast> ExpressionVisitor<'ast> for HintHolder<'ast> {
        type Error = Infallible;

        fn visit_oracle_hint(&mut self, hint: &'ast OracleHint) -> Result<(), Infallible> {
            self.hint = Some(hint);
            Ok(())
        }
    }

    for (comment, single_line) in [("--+ MYHINT \n", true), ("/*+ MYHINT */", false)] {
        let select = hinted_select(comment);
        let plain = select.as_plain().unwrap();
        let hint = plain.oracle_hint.as_ref().expect("hint attached");

        let mut holder = HintHolder::default();
        hint.accept(&mut holder).unwrap();

        let seen = holder.hint.expect("hint dispatched");
        assert_eq!(seen.single_line, single_line);
        assert_eq!(seen.value, "MYHINT");
    }
}

#[test]
fn test_current_timestamp_expression() {
    let select = bar_before("CURRENT_TIMESTAMP");
    let mut columns = ColumnNames::default();
    where_of(&select).accept(&mut columns).unwrap();
    assert_eq!(columns.names, vec!["bar"]);
}

#[test]
fn test_current_date_expression() {
    let select = bar_before("CURRENT_DATE");
    assert_eq!(
        referenced_columns(where_of(&select))
            .iter()
            .map(|c| c.column_name.as_str())
            .collect::<Vec<_>>(),
        vec!["bar"]
    );
}

#[test]
fn test_time_key_is_dispatched() {
    #[derive(Default)]
    struct Keywords {
        keywords: Vec<String>,
    }

    impl<'ast> ExpressionVisitor<'ast> for Keywords {
        type Error = Infallible;

        fn visit_time_key(&mut self, expr: &'ast TimeKeyExpression) -> Result<(), Infallible> {
            self.keywords.push(expr.keyword.clone());
            Ok(())
        }
    }

    let select = bar_before("CURRENT_TIMESTAMP");
    let mut keywords = Keywords::default();
    where_of(&select).accept(&mut keywords).unwrap();
    assert_eq!(keywords.keywords, vec!["CURRENT_TIMESTAMP"]);
}

#[test]
fn test_sub_select_expression_with_select_visitor() {
    let select = exists_correlated();
    let mut select_visitor: SelectVisitorAdapter = SelectVisitorAdapter::new();
    let mut adapter: ExpressionVisitorAdapter = ExpressionVisitorAdapter::new();
    adapter.set_select_visitor(&mut select_visitor);
    assert_eq!(where_of(&select).accept(&mut adapter), Ok(()));
}

#[test]
fn test_exists_without_select_visitor_is_not_entered() {
    let select = exists_correlated();

    let mut adapter: ExpressionVisitorAdapter = ExpressionVisitorAdapter::new();
    assert_eq!(where_of(&select).accept(&mut adapter), Ok(()));

    let mut columns = ColumnNames::default();
    where_of(&select).accept(&mut columns).unwrap();
    assert!(columns.names.is_empty());
}

#[test]
fn test_exists_with_walker_reaches_correlated_columns() {
    let select = exists_correlated();

    let mut inner = ColumnCollector::new();
    let mut walker = SelectExpressionWalker::new(&mut inner);
    let mut adapter: ExpressionVisitorAdapter<'_, '_, Infallible> =
        ExpressionVisitorAdapter::with_select_visitor(&mut walker);
    where_of(&select).accept(&mut adapter).unwrap();
    drop(adapter);

    let names: Vec<String> = inner.columns().iter().map(|c| c.full_name()).collect();
    assert_eq!(names, vec!["t2.col2", "t1.col1"]);
}

#[test]
fn test_scalar_and_all_subqueries_with_walker() {
    let select = scalar_and_all_subqueries();

    let mut inner = ColumnCollector::new();
    let mut walker = SelectExpressionWalker::new(&mut inner);
    let mut outer = ColumnCollector::with_select_visitor(&mut walker);
    where_of(&select).accept(&mut outer).unwrap();
    let outer_names = outer.names();
    drop(outer);

    assert_eq!(outer_names, vec!["a", "b"]);
    assert_eq!(inner.names(), vec!["z", "z"]);
}

#[test]
fn test_scalar_and_all_subqueries_without_select_visitor() {
    #[derive(Default)]
    struct SubSelects {
        dispatched: usize,
    }

    impl<'ast> ExpressionVisitor<'ast> for SubSelects {
        type Error = Infallible;

        fn visit_sub_select(&mut self, sub_select: &'ast SubSelect) -> Result<(), Infallible> {
            self.dispatched += 1;
            walk_sub_select(self, sub_select)
        }
    }

    let select = scalar_and_all_subqueries();

    let mut sub_selects = SubSelects::default();
    where_of(&select).accept(&mut sub_selects).unwrap();
    assert_eq!(sub_selects.dispatched, 2);

    let names: Vec<&str> = referenced_columns(where_of(&select))
        .iter()
        .map(|c| c.column_name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_cast_and_call_without_arguments() {
    #[derive(Default)]
    struct Calls<'ast> {
        columns: Vec<&'ast str>,
        functions: Vec<&'ast str>,
        casts: Vec<&'ast str>,
        argument_lists: usize,
    }

    impl<'ast> ExpressionVisitor<'ast> for Calls<'ast> {
        type Error = Infallible;

        fn visit_column(&mut self, column: &'ast Column) -> Result<(), Infallible> {
            self.columns.push(&column.column_name);
            Ok(())
        }

        fn visit_cast(&mut self, expr: &'ast CastExpression) -> Result<(), Infallible> {
            self.casts.push(&expr.data_type);
            walk_cast(self, expr)
        }

        fn visit_function(&mut self, function: &'ast Function) -> Result<(), Infallible> {
            self.functions.push(&function.name);
            walk_function(self, function)
        }

        fn visit_expression_list(
            &mut self,
            list: &'ast ExpressionList,
        ) -> Result<(), Infallible> {
            self.argument_lists += 1;
            walk_expression_list(self, list)
        }
    }

    let expr = cast_against_no_args_call();
    let mut calls = Calls::default();
    expr.accept(&mut calls).unwrap();

    assert_eq!(calls.casts, vec!["DECIMAL"]);
    assert_eq!(calls.columns, vec!["price"]);
    assert_eq!(calls.functions, vec!["now"]);
    assert_eq!(calls.argument_lists, 0);

    let mut adapter: ExpressionVisitorAdapter = ExpressionVisitorAdapter::new();
    assert_eq!(expr.accept(&mut adapter), Ok(()));
}

#[test]
fn test_case_without_else() {
    let mut adapter: ExpressionVisitorAdapter = ExpressionVisitorAdapter::new();
    case_when_one(None, false).accept(&mut adapter).unwrap();
}

#[test]
fn test_case_with_else() {
    let mut adapter: ExpressionVisitorAdapter = ExpressionVisitorAdapter::new();
    case_when_one(None, true).accept(&mut adapter).unwrap();
}

#[test]
fn test_case_with_switch_without_else() {
    let mut adapter: ExpressionVisitorAdapter = ExpressionVisitorAdapter::new();
    case_when_one(Some(three_plus_four()), false)
        .accept(&mut adapter)
        .unwrap();
}

#[derive(Default)]
struct CaseParts {
    longs: Vec<i64>,
    when_clauses: usize,
}

impl<'ast> ExpressionVisitor<'ast> for CaseParts {
    type Error = Infallible;

    fn visit_literal(&mut self, literal: &'ast Literal) -> Result<(), Infallible> {
        if let Literal::Long(value) = literal {
            self.longs.push(*value);
        }
        Ok(())
    }

    fn visit_when_clause(&mut self, clause: &'ast WhenClause) -> Result<(), Infallible> {
        self.when_clauses += 1;
        visitor::walk_when_clause(self, clause)
    }
}

#[test]
fn test_case_traversal_order() {
    let mut parts = CaseParts::default();
    case_when_one(Some(three_plus_four()), true)
        .accept(&mut parts)
        .unwrap();
    assert_eq!(parts.longs, vec![3, 4, 1, 0, 1]);
    assert_eq!(parts.when_clauses, 1);

    let mut parts = CaseParts::default();
    case_when_one(None, false).accept(&mut parts).unwrap();
    assert_eq!(parts.longs, vec![1, 0]);
}

#[test]
fn test_analytic_function_without_argument() {
    let expr = row_number_over_c();
    let mut adapter: ExpressionVisitorAdapter = ExpressionVisitorAdapter::new();
    expr.accept(&mut adapter).unwrap();

    let mut columns = ColumnNames::default();
    expr.accept(&mut columns).unwrap();
    assert_eq!(columns.names, vec!["c"]);
}

#[test]
fn test_analytic_traversal_order() {
    // sum(amount) over (partition by region order by day desc)
    let expr = Expression::Analytic(
        AnalyticExpression::new("sum", Some(Expression::column("amount")))
            .partition_by(vec![Expression::column("region")])
            .order_by(vec![OrderByElement::desc(Expression::column("day"))]),
    );

    #[derive(Default)]
    struct Analytics {
        names: Vec<String>,
        columns: Vec<String>,
    }

    impl<'ast> ExpressionVisitor<'ast> for Analytics {
        type Error = Infallible;

        fn visit_analytic(&mut self, expr: &'ast AnalyticExpression) -> Result<(), Infallible> {
            self.names.push(expr.name.clone());
            walk_analytic(self, expr)
        }

        fn visit_column(&mut self, column: &'ast Column) -> Result<(), Infallible> {
            self.columns.push(column.column_name.clone());
            Ok(())
        }
    }

    let mut analytics = Analytics::default();
    expr.accept(&mut analytics).unwrap();
    assert_eq!(analytics.names, vec!["sum"]);
    assert_eq!(analytics.columns, vec!["region", "day", "amount"]);
}

#[test]
fn test_at_time_zone_expression() {
    #[derive(Default)]
    struct Zones {
        zones: Vec<String>,
        innermost: Option<String>,
    }

    impl<'ast> ExpressionVisitor<'ast> for Zones {
        type Error = Infallible;

        fn visit_at_time_zone(
            &mut self,
            expr: &'ast AtTimeZoneExpression,
        ) -> Result<(), Infallible> {
            self.zones.push(expr.zone().to_string());
            walk_at_time_zone(self, expr)
        }

        fn visit_column(&mut self, column: &'ast Column) -> Result<(), Infallible> {
            self.innermost = Some(column.column_name.clone());
            Ok(())
        }
    }

    let expr = date_at_two_zones();
    let mut adapter: ExpressionVisitorAdapter = ExpressionVisitorAdapter::new();
    expr.accept(&mut adapter).unwrap();

    let mut zones = Zones::default();
    expr.accept(&mut zones).unwrap();
    assert_eq!(zones.zones, vec!["australia/sydney", "UTC"]);
    assert_eq!(zones.innermost.as_deref(), Some("date1"));
}

#[test]
fn test_visitor_error_propagates_unchanged() {
    #[derive(Debug, PartialEq)]
    struct Forbidden(String);

    #[derive(Default)]
    struct Guard {
        seen: Vec<String>,
    }

    impl<'ast> ExpressionVisitor<'ast> for Guard {
        type Error = Forbidden;

        fn visit_column(&mut self, column: &'ast Column) -> Result<(), Forbidden> {
            if column.column_name == "secret" {
                return Err(Forbidden(column.column_name.clone()));
            }
            self.seen.push(column.column_name.clone());
            Ok(())
        }
    }

    // a = 1 AND secret = 2 AND b = 3
    let expr = Expression::and(
        Expression::and(
            Expression::eq(Expression::column("a"), Expression::long(1)),
            Expression::eq(Expression::column("secret"), Expression::long(2)),
        ),
        Expression::eq(Expression::column("b"), Expression::long(3)),
    );

    let mut guard = Guard::default();
    assert_eq!(
        expr.accept(&mut guard),
        Err(Forbidden("secret".to_string()))
    );
    assert_eq!(guard.seen, vec!["a"]);
}

#[test]
fn test_items_list_routes_to_items_hooks() {
    #[derive(Default)]
    struct Routes {
        expression_lists: usize,
        sub_select_items: usize,
        expressions: usize,
    }

    impl<'ast> ExpressionVisitor<'ast> for Routes {
        type Error = Infallible;

        fn visit_expression(&mut self, expr: &'ast Expression) -> Result<(), Infallible> {
            self.expressions += 1;
            visitor::walk_expression(self, expr)
        }

        fn visit_expression_list(&mut self, list: &'ast ExpressionList) -> Result<(), Infallible> {
            self.expression_lists += 1;
            visitor::walk_expression_list(self, list)
        }

        fn visit_sub_select_items(&mut self, _sub_select: &'ast SubSelect) -> Result<(), Infallible> {
            self.sub_select_items += 1;
            Ok(())
        }
    }

    let select = tuple_in_subquery();
    let mut routes = Routes::default();
    where_of(&select).accept(&mut routes).unwrap();

    // the IN node itself plus a and b
    assert_eq!(routes.expressions, 3);
    assert_eq!(routes.expression_lists, 1);
    assert_eq!(routes.sub_select_items, 1);

    let items = ItemsList::expressions(vec![Expression::parameter(), Expression::parameter()]);
    let mut routes = Routes::default();
    items.accept(&mut routes).unwrap();
    assert_eq!(routes.expression_lists, 1);
    assert_eq!(routes.expressions, 2);
}

#[test]
fn test_concurrent_traversals_share_a_tree() {
    let select = exists_correlated();
    let tree = where_of(&select);

    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    let mut inner = ColumnCollector::new();
                    let mut walker = SelectExpressionWalker::new(&mut inner);
                    let mut outer = ColumnCollector::with_select_visitor(&mut walker);
                    tree.accept(&mut outer).unwrap();
                    drop(outer);
                    inner.columns().len()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, vec![2, 2, 2, 2]);
}

#[test]
fn test_deep_at_time_zone_chain() {
    let mut expr = Expression::column("d");
    for _ in 0..256 {
        expr = Expression::at_time_zone(expr, "UTC").unwrap();
    }
    assert_eq!(
        referenced_columns(&expr)
            .iter()
            .map(|c| c.column_name.as_str())
            .collect::<Vec<_>>(),
        vec!["d"]
    );
}
