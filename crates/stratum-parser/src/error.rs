//! Error and diagnostic system for the Stratum parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in [`ParseError`]
//! for returning from a parse.
//!
//! # Example
//!
//! ```
//! # use stratum_parser::error::{Diagnostic, ErrorCode};
//! # use stratum_parser::Span;
//!
//! let open = Span::new(0..14);
//!
//! let diag = Diagnostic::error("subgraph `Core` is never closed")
//!     .with_code(ErrorCode::E101)
//!     .with_label(open, "opened here")
//!     .with_help("add a matching `end` line");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
