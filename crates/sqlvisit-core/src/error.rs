//! Error types for SQLVisit.

use std::fmt;

/// The main error type for SQLVisit operations.
///
/// The traversal engine itself never produces one of these; they come from
/// the checked node constructors. `Error` is also the default error type of
/// [`ExpressionVisitorAdapter`](crate::ExpressionVisitorAdapter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Comment text is not a `--+` or `/*+ ... */` hint
    InvalidHint(String),

    /// CASE expression without any WHEN clause
    EmptyCase,

    /// AT TIME ZONE with a blank zone literal
    EmptyTimeZone,

    /// Blank identifier where a name is required
    EmptyIdentifier(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidHint(text) => write!(f, "Invalid hint comment: {:?}", text),
            Error::EmptyCase => write!(f, "CASE expression requires at least one WHEN clause"),
            Error::EmptyTimeZone => write!(f, "AT TIME ZONE requires a zone literal"),
            Error::EmptyIdentifier(what) => write!(f, "Empty {} name", what),
        }
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for SQLVisit operations.
///
/// The error parameter defaults to [`Error`] and can be overridden, so the
/// alias stays usable for visitor hooks with their own error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;
