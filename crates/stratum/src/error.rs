//! Error types for Stratum operations.
//!
//! This module provides the main error type [`StratumError`] which wraps
//! every way a single conversion can fail. None of them are retried; the
//! caller decides how to report them.

use std::{io, path::PathBuf};

use thiserror::Error;

use stratum_parser::{ExtractError, error::ParseError};

/// The main error type for Stratum operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the diagram source next to the structured
/// diagnostics so that spans can be rendered against it.
#[derive(Debug, Error)]
pub enum StratumError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("no diagram block found: {0}")]
    NoDiagramBlock(#[from] ExtractError),

    #[error("diagram source is empty")]
    EmptyInput,

    #[error("nothing to export: {vertices} vertices, {triangles} triangles")]
    EmptyGeometry { vertices: usize, triangles: usize },

    #[error("invalid mesh on line {line}: {reason}")]
    InvalidMesh { line: usize, reason: String },

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for StratumError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::EmptyGeometry {
                vertices,
                triangles,
            } => Self::EmptyGeometry {
                vertices,
                triangles,
            },
            other => Self::Export(Box::new(other)),
        }
    }
}

impl StratumError {
    /// Create a new `Parse` error with the associated source code.
    ///
    /// A blank source is reported as [`StratumError::EmptyInput`] instead.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        if err.is_empty_input() {
            return Self::EmptyInput;
        }
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use stratum_parser::{ParseOptions, parse};

    use super::*;

    #[test]
    fn test_blank_source_maps_to_empty_input() {
        let err = parse("  \n", ParseOptions::default()).unwrap_err();
        assert!(matches!(
            StratumError::new_parse_error(err, "  \n"),
            StratumError::EmptyInput
        ));
    }

    #[test]
    fn test_strict_failure_keeps_source() {
        let err = parse("oops", ParseOptions::new().with_strict(true)).unwrap_err();
        match StratumError::new_parse_error(err, "oops") {
            StratumError::Parse { src, .. } => assert_eq!(src, "oops"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_geometry_passes_through_export_error() {
        let err: StratumError = crate::export::Error::EmptyGeometry {
            vertices: 0,
            triangles: 0,
        }
        .into();
        assert!(matches!(
            err,
            StratumError::EmptyGeometry {
                vertices: 0,
                triangles: 0
            }
        ));
    }
}
