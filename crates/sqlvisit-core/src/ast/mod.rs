//! Expression tree node model
//!
//! Nodes are plain data, built once by the parser (or the builder helpers)
//! and read-only afterwards. Each node owns its children.

pub mod expression;
pub mod hint;
pub mod items;
pub mod select;

// Re-export main types
pub use expression::*;
pub use hint::OracleHint;
pub use items::{ExpressionList, ItemsList, SubSelect};
pub use select::{PlainSelect, Select, SelectBody, SelectItem, SetOperationList, SetOperator};
