//! Diagram format validation
//!
//! A pure predicate over diagram text. [`check`] reports the first rule the
//! text breaks; [`is_valid`] is the boolean form every other component uses.

use thiserror::Error;

use crate::core::models::diagram;
use crate::core::models::{Connector, END_MARKER, START_MARKER};

/// Why a text is not a well-formed diagram
///
/// Line numbers are 1-based, counted after surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatViolation {
    /// Text was empty or whitespace only
    #[error("diagram is empty")]
    Empty,

    /// Fewer than start marker, one connection and end marker
    #[error("expected at least 3 lines, found {0}")]
    TooShort(usize),

    /// First line does not start with the start marker
    #[error("first line must start with @startdiagram")]
    MissingStartMarker,

    /// Last line does not start with the end marker
    #[error("last line must start with @enddiagram")]
    MissingEndMarker,

    /// A body line has fewer than four tokens
    #[error("line {line}: expected at least 4 fields, found {found}")]
    TooFewFields {
        /// Offending line number
        line: usize,
        /// Number of tokens on the line
        found: usize,
    },

    /// A body line's third token is not a connector
    #[error("line {line}: unknown connector '{connector}' (use ->, -->, ..>)")]
    UnknownConnector {
        /// Offending line number
        line: usize,
        /// The token found in connector position
        connector: String,
    },
}

/// Check that `text` follows the diagram micro-format
pub fn check(text: &str) -> Result<(), FormatViolation> {
    if text.trim().is_empty() {
        return Err(FormatViolation::Empty);
    }

    let lines = diagram::lines(text);
    if lines.len() < 3 {
        return Err(FormatViolation::TooShort(lines.len()));
    }
    if !lines[0].starts_with(START_MARKER) {
        return Err(FormatViolation::MissingStartMarker);
    }
    if !lines[lines.len() - 1].starts_with(END_MARKER) {
        return Err(FormatViolation::MissingEndMarker);
    }

    // At least one body line is guaranteed by the length check above.
    for (offset, line) in diagram::body(&lines).into_iter().enumerate() {
        let line_no = offset + 2;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(FormatViolation::TooFewFields {
                line: line_no,
                found: tokens.len(),
            });
        }
        if Connector::from_symbol(tokens[2]).is_none() {
            return Err(FormatViolation::UnknownConnector {
                line: line_no,
                connector: tokens[2].to_string(),
            });
        }
    }

    Ok(())
}

/// Whether `text` is a well-formed diagram. Never panics.
#[must_use]
pub fn is_valid(text: &str) -> bool {
    check(text).is_ok()
}
