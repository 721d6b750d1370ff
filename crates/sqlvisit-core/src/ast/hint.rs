//! Optimizer hints carried in specially marked comments

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const LINE_MARKER: &str = "--+";
const BLOCK_START: &str = "/*+";
const BLOCK_END: &str = "*/";

/// Hint text with its comment markers stripped.
///
/// `--+ FULL(t)` is a single-line hint, `/*+ FULL(t) */` a block hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleHint {
    /// Hint body, trimmed
    pub value: String,
    /// Written as `--+` rather than `/*+ */`
    pub single_line: bool,
}

impl OracleHint {
    /// Hint from already stripped text.
    pub fn new(value: impl Into<String>, single_line: bool) -> Self {
        Self {
            value: value.into(),
            single_line,
        }
    }

    /// Parses a raw comment token into a hint.
    pub fn from_comment(comment: &str) -> Result<Self> {
        let trimmed = comment.trim();
        let (body, single_line) = if let Some(rest) = trimmed.strip_prefix(LINE_MARKER) {
            // a line hint ends at the first line break
            (rest.lines().next().unwrap_or(""), true)
        } else if let Some(rest) = trimmed.strip_prefix(BLOCK_START) {
            match rest.strip_suffix(BLOCK_END) {
                Some(body) => (body.trim_end_matches('*'), false),
                None => return Err(Error::InvalidHint(comment.to_string())),
            }
        } else {
            return Err(Error::InvalidHint(comment.to_string()));
        };

        let value = body.trim();
        if value.is_empty() {
            return Err(Error::InvalidHint(comment.to_string()));
        }
        Ok(Self::new(value, single_line))
    }

    /// True when `comment` is a well-formed hint comment.
    pub fn is_hint(comment: &str) -> bool {
        Self::from_comment(comment).is_ok()
    }
}
