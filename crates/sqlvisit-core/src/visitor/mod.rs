//! Visitor protocol and default traversal
//!
//! Expression hooks, items-list hooks, the statement bridge into nested
//! SELECTs, and a few ready-made visitors built on them.

pub mod adapter;
pub mod collect;
pub mod expression;
pub mod select;

// Re-export main types
pub use adapter::ExpressionVisitorAdapter;
pub use collect::{referenced_columns, ColumnCollector};
pub use expression::*;
pub use select::{
    walk_select_body, walk_set_operation_list, SelectExpressionWalker, SelectVisitor,
    SelectVisitorAdapter,
};
