// Trees as the parser produces them for the statements used across tests

use sqlvisit::*;

/// `SELECT * FROM <table> WHERE <condition>`
pub fn select_where(table: &str, condition: Expression) -> Select {
    Select::plain(PlainSelect::all_from(Table::new(table)).with_where(condition))
}

/// The WHERE condition of a plain select.
pub fn where_of(select: &Select) -> &Expression {
    select
        .as_plain()
        .and_then(|plain| plain.where_clause.as_ref())
        .expect("plain select with a WHERE clause")
}

/// `select * from foo where x in (?,?,?)`
pub fn x_in_parameters() -> Select {
    select_where(
        "foo",
        Expression::in_list(
            Expression::column("x"),
            vec![
                Expression::parameter(),
                Expression::parameter(),
                Expression::parameter(),
            ],
        ),
    )
}

/// `select * from foo where (a,b) in (select a,b from foo2)`
pub fn tuple_in_subquery() -> Select {
    let inner = PlainSelect::all_from(Table::new("foo2")).with_items(vec![
        SelectItem::expression(Expression::column("a")),
        SelectItem::expression(Expression::column("b")),
    ]);
    select_where(
        "foo",
        Expression::In(InExpression::new(
            InLeft::Tuple(ItemsList::expressions(vec![
                Expression::column("a"),
                Expression::column("b"),
            ])),
            ItemsList::sub_select(Select::plain(inner)),
        )),
    )
}

/// `SELECT * FROM table WHERE foo XOR bar`
pub fn foo_xor_bar() -> Select {
    select_where(
        "table",
        Expression::xor(Expression::column("foo"), Expression::column("bar")),
    )
}

/// `select * from foo where bar < <keyword>`
pub fn bar_before(keyword: &str) -> Select {
    select_where(
        "foo",
        Expression::binary(
            Expression::column("bar"),
            BinaryOperator::Lt,
            Expression::time_key(keyword),
        ),
    )
}

/// `select <hint comment> * from foo`
pub fn hinted_select(comment: &str) -> Select {
    let hint = OracleHint::from_comment(comment).expect("hint comment");
    Select::plain(PlainSelect::all_from(Table::new("foo")).with_hint(hint))
}

/// `SELECT * FROM t1 WHERE EXISTS (SELECT * FROM t2 WHERE t2.col2 = t1.col1)`
pub fn exists_correlated() -> Select {
    let correlation = Expression::eq(
        Expression::Column(Column::from_qualified_name("t2.col2").expect("column")),
        Expression::Column(Column::from_qualified_name("t1.col1").expect("column")),
    );
    select_where(
        "t1",
        Expression::exists(SubSelect::new(select_where("t2", correlation))),
    )
}

/// `select * from t1 where a = (select * from t2 where z = 1)
///  and b = all (select * from t3 where z = 1)`
pub fn scalar_and_all_subqueries() -> Select {
    let z_is_one = || Expression::eq(Expression::column("z"), Expression::long(1));
    let scalar = Expression::SubSelect(SubSelect::new(select_where("t2", z_is_one())));
    let all = Expression::AnyComparison(AnyComparisonExpression {
        any_type: AnyType::All,
        sub_select: SubSelect::new(select_where("t3", z_is_one())),
    });
    select_where(
        "t1",
        Expression::and(
            Expression::eq(Expression::column("a"), scalar),
            Expression::eq(Expression::column("b"), all),
        ),
    )
}

/// `CAST(price AS DECIMAL) > now`
pub fn cast_against_no_args_call() -> Expression {
    Expression::binary(
        Expression::cast(Expression::column("price"), "DECIMAL"),
        BinaryOperator::Gt,
        Expression::Function(Function::no_args("now")),
    )
}

/// `CASE [switch] WHEN 1 THEN 0 [ELSE -1] END`
pub fn case_when_one(switch: Option<Expression>, with_else: bool) -> Expression {
    let else_expression = with_else.then(|| Expression::signed(Sign::Minus, Expression::long(1)));
    Expression::Case(
        CaseExpression::new(
            switch,
            vec![WhenClause::new(Expression::long(1), Expression::long(0))],
            else_expression,
        )
        .expect("one WHEN clause"),
    )
}

/// `3+4`
pub fn three_plus_four() -> Expression {
    Expression::binary(Expression::long(3), BinaryOperator::Plus, Expression::long(4))
}

/// `row_number() over (order by c)`
pub fn row_number_over_c() -> Expression {
    Expression::Analytic(
        AnalyticExpression::new("row_number", None)
            .order_by(vec![OrderByElement::asc(Expression::column("c"))]),
    )
}

/// `DATE(date1 AT TIME ZONE 'UTC' AT TIME ZONE 'australia/sydney')`
pub fn date_at_two_zones() -> Expression {
    let utc = Expression::at_time_zone(Expression::column("date1"), "UTC").expect("zone");
    let sydney = Expression::at_time_zone(utc, "australia/sydney").expect("zone");
    Expression::function("DATE", vec![sydney])
}
