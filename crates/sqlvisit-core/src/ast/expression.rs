//! Expression node types
//!
//! Every SQL expression kind the traversal framework understands, plus the
//! small builder helpers used to assemble trees by hand.

use super::hint::OracleHint;
use super::items::{ExpressionList, ItemsList, SubSelect};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A SQL expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Column reference
    Column(Column),
    /// Literal value
    Literal(Literal),
    /// Bind parameter: `?`, `?1`, `:name`
    Parameter(Parameter),
    /// Parameterless temporal keyword such as `CURRENT_TIMESTAMP`
    TimeKey(TimeKeyExpression),
    /// Optimizer hint
    OracleHint(OracleHint),
    /// `( expr )`
    Parenthesis(Parenthesis),
    /// `-expr`, `+expr`, `~expr`
    Signed(SignedExpression),
    /// `NOT expr`
    Not(NotExpression),
    /// Two-operand operator: logical, comparison, arithmetic, ...
    Binary(BinaryExpression),
    /// `expr IS [NOT] NULL`
    IsNull(IsNullExpression),
    /// `expr [NOT] BETWEEN start AND end`
    Between(BetweenExpression),
    /// `left [NOT] IN (items)`
    In(InExpression),
    /// `[NOT] EXISTS (subquery)`
    Exists(ExistsExpression),
    /// `ANY (subquery)`, `ALL (subquery)`, `SOME (subquery)`
    AnyComparison(AnyComparisonExpression),
    /// Scalar subquery
    SubSelect(SubSelect),
    /// `CASE ... END`
    Case(CaseExpression),
    /// Function call
    Function(Function),
    /// `CAST(expr AS type)`
    Cast(CastExpression),
    /// Window function: `name(arg) OVER (PARTITION BY ... ORDER BY ...)`
    Analytic(AnalyticExpression),
    /// `expr AT TIME ZONE 'zone'`
    AtTimeZone(AtTimeZoneExpression),
}

/// Table reference, used as a column qualifier and as a FROM item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Schema qualifier, if written
    pub schema: Option<String>,
    /// Table name
    pub name: String,
    /// `AS alias`
    pub alias: Option<String>,
}

impl Table {
    /// Unqualified table without an alias.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    /// Builds a table from `name` or `schema.name`.
    pub fn from_qualified_name(qualified: &str) -> Result<Self> {
        let parts = split_identifier(qualified, "table")?;
        match parts.as_slice() {
            [name] => Ok(Self::new(*name)),
            [schema, name] => Ok(Self {
                schema: Some((*schema).to_string()),
                ..Self::new(*name)
            }),
            _ => Err(Error::EmptyIdentifier("table")),
        }
    }

    /// Sets the alias that qualifies this table's columns.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Column reference with an optional table qualifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Qualifying table, absent for bare column names
    pub table: Option<Table>,
    /// Column name as written
    pub column_name: String,
}

impl Column {
    /// Unqualified column.
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            table: None,
            column_name: column_name.into(),
        }
    }

    /// Column qualified by `table`.
    pub fn qualified(table: Table, column_name: impl Into<String>) -> Self {
        Self {
            table: Some(table),
            column_name: column_name.into(),
        }
    }

    /// Builds a column from `col`, `table.col` or `schema.table.col`.
    pub fn from_qualified_name(qualified: &str) -> Result<Self> {
        let parts = split_identifier(qualified, "column")?;
        let (column_name, qualifier) = match parts.split_last() {
            Some((last, rest)) => (*last, rest),
            None => return Err(Error::EmptyIdentifier("column")),
        };
        let table = match qualifier {
            [] => None,
            [table] => Some(Table::new(*table)),
            [schema, table] => Some(Table {
                schema: Some((*schema).to_string()),
                ..Table::new(*table)
            }),
            _ => return Err(Error::EmptyIdentifier("table")),
        };
        Ok(Self {
            table,
            column_name: column_name.to_string(),
        })
    }

    /// `table.column` when qualified, `column` otherwise. Aliases win over
    /// table names.
    pub fn full_name(&self) -> String {
        match &self.table {
            Some(table) => {
                let qualifier = table.alias.as_deref().unwrap_or(&table.name);
                format!("{}.{}", qualifier, self.column_name)
            }
            None => self.column_name.clone(),
        }
    }
}

fn split_identifier<'a>(qualified: &'a str, what: &'static str) -> Result<Vec<&'a str>> {
    let parts: Vec<&str> = qualified.split('.').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(Error::EmptyIdentifier(what));
    }
    Ok(parts)
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Integer literal
    Long(i64),
    /// Floating point literal
    Double(f64),
    /// Quoted string, quotes removed
    String(String),
    /// `TRUE` / `FALSE`
    Boolean(bool),
    /// `NULL`
    Null,
}

/// Bind parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parameter {
    /// `?` or `?N`
    Positional(Option<u32>),
    /// `:name`
    Named(String),
}

/// `CURRENT_TIMESTAMP`, `CURRENT_DATE`, `CURRENT_TIME`, ...
///
/// Parsed from a keyword, so it is never a [`Column`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeKeyExpression {
    /// Keyword as written, e.g. `CURRENT_DATE`
    pub keyword: String,
}

/// `( expression )`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parenthesis {
    /// Enclosed expression
    pub expression: Box<Expression>,
}

/// Unary sign operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `~`
    Tilde,
}

/// Expression preceded by a sign operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedExpression {
    /// Sign operator
    pub sign: Sign,
    /// Operand
    pub expression: Box<Expression>,
}

/// `NOT expression`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotExpression {
    /// Negated operand
    pub expression: Box<Expression>,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `XOR`
    Xor,
    /// `=`
    Eq,
    /// `<>`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `||`
    Concat,
    /// `&`
    BitwiseAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
}

impl BinaryOperator {
    /// AND, OR and XOR.
    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or | BinaryOperator::Xor)
    }

    /// `=`, `<>`, `<`, `<=`, `>` and `>=`.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Eq
                | BinaryOperator::NotEq
                | BinaryOperator::Lt
                | BinaryOperator::LtEq
                | BinaryOperator::Gt
                | BinaryOperator::GtEq
        )
    }
}

/// Binary expression: `left op right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    /// Left operand
    pub left: Box<Expression>,
    /// Operator
    pub op: BinaryOperator,
    /// Right operand
    pub right: Box<Expression>,
}

/// `expression IS [NOT] NULL`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsNullExpression {
    /// Tested operand
    pub expression: Box<Expression>,
    /// `IS NOT NULL`
    pub not: bool,
}

/// `expression [NOT] BETWEEN start AND end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetweenExpression {
    /// Tested operand
    pub expression: Box<Expression>,
    /// `NOT BETWEEN`
    pub not: bool,
    /// Lower bound
    pub start: Box<Expression>,
    /// Upper bound
    pub end: Box<Expression>,
}

/// Left operand of an IN expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InLeft {
    /// `x IN (...)`
    Scalar(Box<Expression>),
    /// `(a, b) IN (...)`
    Tuple(ItemsList),
}

/// `left [NOT] IN right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InExpression {
    /// Scalar or tuple left operand
    pub left: InLeft,
    /// `NOT IN`
    pub not: bool,
    /// Value list or subquery
    pub right: ItemsList,
}

impl InExpression {
    /// Non-negated IN.
    pub fn new(left: InLeft, right: ItemsList) -> Self {
        Self {
            left,
            not: false,
            right,
        }
    }

    /// The scalar left operand, absent for tuple comparisons.
    pub fn left_expression(&self) -> Option<&Expression> {
        match &self.left {
            InLeft::Scalar(expr) => Some(expr),
            InLeft::Tuple(_) => None,
        }
    }

    /// The tuple left operand, absent for scalar comparisons.
    pub fn left_items_list(&self) -> Option<&ItemsList> {
        match &self.left {
            InLeft::Scalar(_) => None,
            InLeft::Tuple(items) => Some(items),
        }
    }

    /// The value list or subquery being searched.
    pub fn right_items_list(&self) -> &ItemsList {
        &self.right
    }
}

/// `[NOT] EXISTS (subquery)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistsExpression {
    /// `NOT EXISTS`
    pub not: bool,
    /// Tested subquery
    pub sub_select: SubSelect,
}

/// Quantifier of an ANY/ALL/SOME comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyType {
    /// `ANY`
    Any,
    /// `ALL`
    All,
    /// `SOME`
    Some,
}

/// Quantified subquery operand, e.g. the right side of `x = ALL (SELECT ...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyComparisonExpression {
    /// Quantifier
    pub any_type: AnyType,
    /// Quantified subquery
    pub sub_select: SubSelect,
}

/// `WHEN when_expression THEN then_expression`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhenClause {
    /// Condition, or the value compared with the switch
    pub when_expression: Expression,
    /// Result when matched
    pub then_expression: Expression,
}

impl WhenClause {
    /// Pairs a condition with its result.
    pub fn new(when_expression: Expression, then_expression: Expression) -> Self {
        Self {
            when_expression,
            then_expression,
        }
    }
}

/// Simple (`CASE x WHEN ...`) or searched (`CASE WHEN ...`) CASE expression
///
/// Always holds at least one WHEN clause; deserialization goes through
/// [`CaseExpression::new`] as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CaseExpressionFields")]
pub struct CaseExpression {
    /// Value compared against each WHEN, absent for a searched CASE
    pub switch_expression: Option<Box<Expression>>,
    when_clauses: Vec<WhenClause>,
    /// `ELSE` result
    pub else_expression: Option<Box<Expression>>,
}

#[derive(Deserialize)]
struct CaseExpressionFields {
    switch_expression: Option<Box<Expression>>,
    when_clauses: Vec<WhenClause>,
    else_expression: Option<Box<Expression>>,
}

impl TryFrom<CaseExpressionFields> for CaseExpression {
    type Error = Error;

    fn try_from(fields: CaseExpressionFields) -> Result<Self> {
        Self::new(
            fields.switch_expression.map(|e| *e),
            fields.when_clauses,
            fields.else_expression.map(|e| *e),
        )
    }
}

impl CaseExpression {
    /// Fails with [`Error::EmptyCase`] when `when_clauses` is empty.
    pub fn new(
        switch_expression: Option<Expression>,
        when_clauses: Vec<WhenClause>,
        else_expression: Option<Expression>,
    ) -> Result<Self> {
        if when_clauses.is_empty() {
            return Err(Error::EmptyCase);
        }
        Ok(Self {
            switch_expression: switch_expression.map(Box::new),
            when_clauses,
            else_expression: else_expression.map(Box::new),
        })
    }

    /// Never empty.
    pub fn when_clauses(&self) -> &[WhenClause] {
        &self.when_clauses
    }
}

/// Function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Function name as written
    pub name: String,
    /// `None` for a call written without parentheses content, e.g. `now()`.
    pub parameters: Option<ExpressionList>,
    /// `f(DISTINCT ...)`
    pub distinct: bool,
    /// `COUNT(*)`
    pub all_columns: bool,
}

impl Function {
    /// Call with an argument list.
    pub fn new(name: impl Into<String>, parameters: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            parameters: Some(ExpressionList::new(parameters)),
            distinct: false,
            all_columns: false,
        }
    }

    /// Call without arguments.
    pub fn no_args(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: None,
            distinct: false,
            all_columns: false,
        }
    }
}

/// `CAST(expression AS data_type)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastExpression {
    /// Converted operand
    pub expression: Box<Expression>,
    /// Target type as written
    pub data_type: String,
}

/// Element of an ORDER BY list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByElement {
    /// Sort key
    pub expression: Expression,
    /// Ascending order
    pub asc: bool,
    /// `Some(true)` for NULLS FIRST, `Some(false)` for NULLS LAST.
    pub nulls_first: Option<bool>,
}

impl OrderByElement {
    /// Ascending sort on `expression`.
    pub fn asc(expression: Expression) -> Self {
        Self {
            expression,
            asc: true,
            nulls_first: None,
        }
    }

    /// Descending sort on `expression`.
    pub fn desc(expression: Expression) -> Self {
        Self {
            asc: false,
            ..Self::asc(expression)
        }
    }
}

/// Window function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticExpression {
    /// Function name
    pub name: String,
    /// Absent for argument-less functions such as `row_number()`.
    pub argument: Option<Box<Expression>>,
    /// LAG/LEAD offset
    pub offset: Option<Box<Expression>>,
    /// LAG/LEAD default value
    pub default_value: Option<Box<Expression>>,
    /// `COUNT(*) OVER (...)`
    pub all_columns: bool,
    /// PARTITION BY expressions
    pub partition_by: Vec<Expression>,
    /// ORDER BY elements of the window
    pub order_by: Vec<OrderByElement>,
}

impl AnalyticExpression {
    /// Window call with an empty window specification.
    pub fn new(name: impl Into<String>, argument: Option<Expression>) -> Self {
        Self {
            name: name.into(),
            argument: argument.map(Box::new),
            offset: None,
            default_value: None,
            all_columns: false,
            partition_by: Vec::new(),
            order_by: Vec::new(),
        }
    }

    /// Sets the PARTITION BY list.
    pub fn partition_by(mut self, partition_by: Vec<Expression>) -> Self {
        self.partition_by = partition_by;
        self
    }

    /// Sets the window ORDER BY list.
    pub fn order_by(mut self, order_by: Vec<OrderByElement>) -> Self {
        self.order_by = order_by;
        self
    }
}

/// `expression AT TIME ZONE 'zone'`
///
/// The zone is never blank; deserialization goes through
/// [`AtTimeZoneExpression::new`] as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AtTimeZoneFields")]
pub struct AtTimeZoneExpression {
    /// Converted operand, possibly another AT TIME ZONE
    pub expression: Box<Expression>,
    zone: String,
}

#[derive(Deserialize)]
struct AtTimeZoneFields {
    expression: Box<Expression>,
    zone: String,
}

impl TryFrom<AtTimeZoneFields> for AtTimeZoneExpression {
    type Error = Error;

    fn try_from(fields: AtTimeZoneFields) -> Result<Self> {
        Self::new(*fields.expression, fields.zone)
    }
}

impl AtTimeZoneExpression {
    /// Fails with [`Error::EmptyTimeZone`] for a blank zone.
    pub fn new(expression: Expression, zone: impl Into<String>) -> Result<Self> {
        let zone = zone.into();
        if zone.trim().is_empty() {
            return Err(Error::EmptyTimeZone);
        }
        Ok(Self {
            expression: Box::new(expression),
            zone,
        })
    }

    /// Zone literal without quotes.
    pub fn zone(&self) -> &str {
        &self.zone
    }
}

// Builders

impl Expression {
    /// Unqualified column reference.
    pub fn column(name: impl Into<String>) -> Self {
        Expression::Column(Column::new(name))
    }

    /// Integer literal.
    pub fn long(value: i64) -> Self {
        Expression::Literal(Literal::Long(value))
    }

    /// String literal.
    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    /// `NULL` literal.
    pub fn null() -> Self {
        Expression::Literal(Literal::Null)
    }

    /// Anonymous `?` parameter
    pub fn parameter() -> Self {
        Expression::Parameter(Parameter::Positional(None))
    }

    /// Temporal keyword such as `CURRENT_DATE`.
    pub fn time_key(keyword: impl Into<String>) -> Self {
        Expression::TimeKey(TimeKeyExpression {
            keyword: keyword.into(),
        })
    }

    /// `( inner )`
    pub fn parenthesis(inner: Expression) -> Self {
        Expression::Parenthesis(Parenthesis {
            expression: Box::new(inner),
        })
    }

    /// Sign operator applied to `inner`.
    pub fn signed(sign: Sign, inner: Expression) -> Self {
        Expression::Signed(SignedExpression {
            sign,
            expression: Box::new(inner),
        })
    }

    /// `NOT inner`
    pub fn not(inner: Expression) -> Self {
        Expression::Not(NotExpression {
            expression: Box::new(inner),
        })
    }

    /// `left op right`
    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Expression::Binary(BinaryExpression {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// `left AND right`
    pub fn and(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::And, right)
    }

    /// `left XOR right`
    pub fn xor(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::Xor, right)
    }

    /// `left = right`
    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::Eq, right)
    }

    /// `inner IS NULL`
    pub fn is_null(inner: Expression) -> Self {
        Expression::IsNull(IsNullExpression {
            expression: Box::new(inner),
            not: false,
        })
    }

    /// `inner BETWEEN start AND end`
    pub fn between(inner: Expression, start: Expression, end: Expression) -> Self {
        Expression::Between(BetweenExpression {
            expression: Box::new(inner),
            not: false,
            start: Box::new(start),
            end: Box::new(end),
        })
    }

    /// `left IN (items...)`
    pub fn in_list(left: Expression, items: Vec<Expression>) -> Self {
        Expression::In(InExpression::new(
            InLeft::Scalar(Box::new(left)),
            ItemsList::ExpressionList(ExpressionList::new(items)),
        ))
    }

    /// `EXISTS (sub_select)`
    pub fn exists(sub_select: SubSelect) -> Self {
        Expression::Exists(ExistsExpression {
            not: false,
            sub_select,
        })
    }

    /// Function call with arguments.
    pub fn function(name: impl Into<String>, parameters: Vec<Expression>) -> Self {
        Expression::Function(Function::new(name, parameters))
    }

    /// `CAST(inner AS data_type)`
    pub fn cast(inner: Expression, data_type: impl Into<String>) -> Self {
        Expression::Cast(CastExpression {
            expression: Box::new(inner),
            data_type: data_type.into(),
        })
    }

    /// `inner AT TIME ZONE 'zone'`; fails for a blank zone.
    pub fn at_time_zone(inner: Expression, zone: impl Into<String>) -> Result<Self> {
        AtTimeZoneExpression::new(inner, zone).map(Expression::AtTimeZone)
    }

    /// The column reference, if this is one.
    pub fn as_column(&self) -> Option<&Column> {
        match self {
            Expression::Column(column) => Some(column),
            _ => None,
        }
    }
}

macro_rules! impl_from_node {
    ($($node:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Expression {
                fn from(node: $node) -> Self {
                    Expression::$variant(node)
                }
            }
        )*
    };
}

impl_from_node! {
    Column => Column,
    Literal => Literal,
    Parameter => Parameter,
    OracleHint => OracleHint,
    BinaryExpression => Binary,
    InExpression => In,
    ExistsExpression => Exists,
    AnyComparisonExpression => AnyComparison,
    SubSelect => SubSelect,
    CaseExpression => Case,
    Function => Function,
    AnalyticExpression => Analytic,
    AtTimeZoneExpression => AtTimeZone,
}
