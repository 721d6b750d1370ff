use sqlvisit::logging::LogConfig;
use sqlvisit::visitor::walk_function;
use sqlvisit::*;
use std::collections::BTreeSet;
use std::convert::Infallible;

/// Columns and functions referenced by an expression, subqueries included.
#[derive(Default)]
struct Lineage<'ast> {
    columns: BTreeSet<String>,
    functions: BTreeSet<&'ast str>,
}

impl<'ast> ExpressionVisitor<'ast> for Lineage<'ast> {
    type Error = Infallible;

    fn visit_column(&mut self, column: &'ast Column) -> Result<(), Infallible> {
        self.columns.insert(column.full_name());
        Ok(())
    }

    fn visit_function(&mut self, function: &'ast Function) -> Result<(), Infallible> {
        self.functions.insert(&function.name);
        walk_function(self, function)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Debug level reports subqueries skipped by the plain adapter
    let _guard = LogConfig::debug().with_traversal_tracing(true).init()?;

    println!("=== SQLVisit Column Lineage Demo ===\n");

    // WHERE o.total > (SELECT avg(total) FROM orders)
    //   AND upper(o.status) IN ('OPEN', 'HELD')
    //   AND o.placed_at AT TIME ZONE 'UTC' > CURRENT_TIMESTAMP
    let average = PlainSelect::all_from(Table::new("orders")).with_items(vec![
        SelectItem::expression(Expression::function("avg", vec![Expression::column("total")])),
    ]);
    let total = Column::from_qualified_name("o.total")?;
    let status = Column::from_qualified_name("o.status")?;
    let placed_at = Column::from_qualified_name("o.placed_at")?;

    let condition = Expression::and(
        Expression::and(
            Expression::binary(
                Expression::Column(total),
                BinaryOperator::Gt,
                Expression::SubSelect(SubSelect::new(Select::plain(average))),
            ),
            Expression::in_list(
                Expression::function("upper", vec![Expression::Column(status)]),
                vec![Expression::string("OPEN"), Expression::string("HELD")],
            ),
        ),
        Expression::binary(
            Expression::at_time_zone(Expression::Column(placed_at), "UTC")?,
            BinaryOperator::Gt,
            Expression::time_key("CURRENT_TIMESTAMP"),
        ),
    );

    println!("1. Outer columns only...");
    for column in referenced_columns(&condition) {
        println!("   {}", column.full_name());
    }

    println!("\n2. Following the subquery...");
    let mut subquery = Lineage::default();
    let mut outer = Lineage::default();
    {
        let mut walker = SelectExpressionWalker::new(&mut subquery);
        let mut adapter: ExpressionVisitorAdapter<'_, '_, Infallible> =
            ExpressionVisitorAdapter::with_select_visitor(&mut walker);
        condition.accept(&mut adapter)?;
    }
    condition.accept(&mut outer)?;
    println!("   outer columns:    {:?}", outer.columns);
    println!("   outer functions:  {:?}", outer.functions);
    println!("   subquery columns: {:?}", subquery.columns);
    println!("   subquery functions: {:?}", subquery.functions);

    println!("\n=== Demo Complete ===");
    Ok(())
}
