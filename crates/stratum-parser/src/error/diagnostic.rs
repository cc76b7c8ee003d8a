//! The core diagnostic type for the Stratum error system.
//!
//! A [`Diagnostic`] is a single error or warning with an optional code,
//! labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message anchored to the diagram source.
///
/// Rendered by the CLI roughly as:
///
/// ```text
/// error[E101]: subgraph `Core` is never closed
///   --> docs/arch.mmd:2:1
///    |
///  2 | subgraph Core
///    | ^^^^^^^^^^^^^ opened here
///    |
///    = help: add a matching `end` line
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use stratum_parser::error::{Diagnostic, ErrorCode};
    /// # use stratum_parser::Span;
    ///
    /// let diag = Diagnostic::error("unrecognized statement")
    ///     .with_code(ErrorCode::E100)
    ///     .with_label(Span::new(0..7), "not a node, edge, or subgraph")
    ///     .with_help("node declarations look like `id[label]`");
    /// assert!(diag.severity().is_error());
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E100]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
