//! Error adapter for converting StratumError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`stratum_parser::error::ParseError`] contains multiple
//! diagnostics, such as every rejected line of a strict parse, each
//! diagnostic is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use stratum::StratumError;
use stratum_parser::error::Diagnostic;

/// Adapter for a single parser diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Diagram text the spans point into
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        if self.diag.severity().is_warning() {
            Some(miette::Severity::Warning)
        } else {
            Some(miette::Severity::Error)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`StratumError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a StratumError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StratumError::Io(_) => "stratum::io",
            StratumError::InputNotFound(_) => "stratum::input_not_found",
            StratumError::NoDiagramBlock(_) => "stratum::no_diagram_block",
            StratumError::EmptyInput => "stratum::empty_input",
            StratumError::EmptyGeometry { .. } => "stratum::empty_geometry",
            StratumError::InvalidMesh { .. } => "stratum::invalid_mesh",
            StratumError::Parse { .. } => return None,
            StratumError::Export(_) => "stratum::export",
            StratumError::Config(_) => "stratum::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            StratumError::NoDiagramBlock(_) => {
                "pass `--source raw` if the file contains only diagram text"
            }
            StratumError::EmptyGeometry { .. } => {
                "a glTF scene needs at least one node; `--to obj` accepts empty diagrams"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a stratum [`Span`](stratum_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: stratum_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`StratumError`] into a list of reportable errors.
///
/// For [`StratumError::Parse`], this returns one [`Reportable`] for
/// each diagnostic in the error. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &StratumError) -> Vec<Reportable<'_>> {
    match err {
        StratumError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use stratum_parser::{
        ParseOptions, Span,
        error::{ErrorCode, ParseError},
        parse,
    };

    use super::*;

    #[test]
    fn test_strict_parse_yields_one_reportable_per_line() {
        let src = "A[a]\nnot a node\nend\nB[b]";
        let parse_err = parse(src, ParseOptions::new().with_strict(true)).unwrap_err();
        let err = StratumError::new_parse_error(parse_err, src);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);

        let codes: Vec<String> = reportables
            .iter()
            .map(|r| r.code().unwrap().to_string())
            .collect();
        assert_eq!(codes, ["E100", "E102"]);
    }

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("test error")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(0..5), "here")
            .with_help("try this");
        let parse_err = ParseError::from(diag);
        let err = StratumError::new_parse_error(parse_err, "hello");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "test error");
                assert_eq!(d.help().unwrap().to_string(), "try this");
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_non_parse_error() {
        let err = StratumError::InputNotFound(PathBuf::from("missing.md"));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "input file not found: missing.md");
                assert_eq!(e.code().unwrap().to_string(), "stratum::input_not_found");
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_empty_geometry_has_help() {
        let err = StratumError::EmptyGeometry {
            vertices: 0,
            triangles: 0,
        };
        let reportables = to_reportables(&err);
        assert_eq!(
            reportables[0].code().unwrap().to_string(),
            "stratum::empty_geometry"
        );
        assert!(reportables[0].help().is_some());
    }

    #[test]
    fn test_primary_flag_on_labels() {
        let diag = Diagnostic::error("error with labels")
            .with_label(Span::new(0..5), "primary")
            .with_secondary_label(Span::new(10..15), "secondary");

        let adapter = DiagnosticAdapter::new(&diag, "some source code");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("primary"));
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }
}
