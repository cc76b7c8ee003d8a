//! Error codes for the Stratum diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Input errors
//! - `E1xx` - Statement errors, reported in strict mode only

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Input Errors (E0xx)
    // =========================================================================
    /// Empty diagram source.
    ///
    /// The diagram text contains nothing but whitespace.
    E001,

    // =========================================================================
    // Statement Errors (E1xx)
    // =========================================================================
    /// Unrecognized statement.
    ///
    /// The line is not a subgraph opener, `end`, node declaration, edge,
    /// comment, or diagram header.
    E100,

    /// Unclosed subgraph.
    ///
    /// The source ended while a `subgraph` block was still open.
    E101,

    /// Unmatched `end`.
    ///
    /// An `end` line was found with no open `subgraph` block.
    E102,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "empty diagram source",
            ErrorCode::E100 => "unrecognized statement",
            ErrorCode::E101 => "unclosed subgraph",
            ErrorCode::E102 => "unmatched end",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
