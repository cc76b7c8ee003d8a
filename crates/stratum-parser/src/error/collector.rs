//! Collector for accumulating diagnostics across a whole parse.
//!
//! Strict-mode parsing reports every offending line at once instead of
//! stopping at the first.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics; errors make [`DiagnosticCollector::finish`] fail.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// Returns `Err(ParseError)` carrying every diagnostic if any error was
    /// emitted. Warnings alone are discarded.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}
