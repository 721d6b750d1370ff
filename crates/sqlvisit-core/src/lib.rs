//! # SQLVisit Core
//!
//! Expression tree model and traversal framework for parsed SQL.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod visitor;

pub use ast::*;
pub use error::{Error, Result};
pub use visitor::{
    referenced_columns, ColumnCollector, ExpressionVisitor, ExpressionVisitorAdapter,
    SelectExpressionWalker, SelectVisitor, SelectVisitorAdapter,
};
