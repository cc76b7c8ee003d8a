//! The ParseError type for wrapping parsing diagnostics.
//!
//! [`ParseError`] wraps one or more [`Diagnostic`]s produced while turning
//! diagram text into a graph.

use std::fmt;

use crate::error::{Diagnostic, ErrorCode};

/// Error type for a parse.
///
/// Wraps one or more diagnostics.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if the source was rejected for being blank.
    pub fn is_empty_input(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.code() == Some(ErrorCode::E001))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::E100);
        let err: ParseError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "test error");
        assert!(!err.is_empty_input());
    }

    #[test]
    fn test_parse_error_empty_input() {
        let err: ParseError = Diagnostic::error("empty diagram source")
            .with_code(ErrorCode::E001)
            .into();

        assert!(err.is_empty_input());
    }

    #[test]
    fn test_parse_error_display_single() {
        let diag = Diagnostic::error("unrecognized statement");
        let err: ParseError = diag.into();

        assert_eq!(err.to_string(), "error: unrecognized statement");
    }

    #[test]
    fn test_parse_error_display_multiple() {
        let diags = vec![
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
            Diagnostic::error("third error"),
        ];
        let err: ParseError = diags.into();

        assert_eq!(err.to_string(), "error: first error (+2 more)");
    }
}
