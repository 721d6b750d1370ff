//! # SQLVisit
//!
//! Walk, inspect and selectively react to parsed SQL expression trees.
//!
//! A parser turns SQL text into a tree of [`Expression`] nodes. Implement
//! [`ExpressionVisitor`] and override only the hooks for the node kinds you
//! care about; every other hook keeps descending into children in source
//! order.
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlvisit::{BinaryOperator, Column, Expression, ExpressionVisitor};
//! use std::convert::Infallible;
//!
//! /// Collects referenced column names.
//! #[derive(Default)]
//! struct Columns<'ast> {
//!     names: Vec<&'ast str>,
//! }
//!
//! impl<'ast> ExpressionVisitor<'ast> for Columns<'ast> {
//!     type Error = Infallible;
//!
//!     fn visit_column(&mut self, column: &'ast Column) -> Result<(), Infallible> {
//!         self.names.push(&column.column_name);
//!         Ok(())
//!     }
//! }
//!
//! // foo XOR bar
//! let expr = Expression::binary(
//!     Expression::column("foo"),
//!     BinaryOperator::Xor,
//!     Expression::column("bar"),
//! );
//!
//! let mut columns = Columns::default();
//! expr.accept(&mut columns).unwrap();
//! assert_eq!(columns.names, vec!["foo", "bar"]);
//! ```
//!
//! ## Subqueries
//!
//! Nested SELECTs (scalar subqueries, `EXISTS`, `ANY`/`ALL`, `IN (SELECT ...)`)
//! are only entered when the visitor provides a [`SelectVisitor`] through
//! [`ExpressionVisitor::select_visitor`]. Without one they are dispatched but
//! skipped, and traversal completes normally.
//!
//! ```rust
//! use sqlvisit::{
//!     ColumnCollector, Expression, PlainSelect, Select, SelectExpressionWalker, SubSelect,
//!     Table,
//! };
//!
//! // EXISTS (SELECT * FROM t2 WHERE col2 = 1)
//! let inner = PlainSelect::all_from(Table::new("t2"))
//!     .with_where(Expression::eq(Expression::column("col2"), Expression::long(1)));
//! let expr = Expression::exists(SubSelect::new(Select::plain(inner)));
//!
//! let mut inner_columns = ColumnCollector::new();
//! let mut walker = SelectExpressionWalker::new(&mut inner_columns);
//! let mut outer_columns = ColumnCollector::with_select_visitor(&mut walker);
//! expr.accept(&mut outer_columns).unwrap();
//! drop(outer_columns);
//!
//! assert_eq!(inner_columns.names(), vec!["col2"]);
//! ```

pub mod logging;

// Re-export core types: node model, visitors, errors
pub use sqlvisit_core::*;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
