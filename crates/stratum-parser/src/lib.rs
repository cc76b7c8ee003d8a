//! # Stratum Parser
//!
//! Turns flowchart-style diagram text into a
//! [`ParsedGraph`](stratum_core::graph::ParsedGraph).
//!
//! The grammar is a line-oriented subset: `subgraph` / `end` regions, node
//! declarations (`id[label]`, `id(label)`, `id{label}`) and edges
//! (`a --> b`, `a -.-> b`, `a -->|label| b`). Anything else is skipped unless
//! [`ParseOptions::with_strict`] is set.
//!
//! ## Usage
//!
//! ```
//! # use stratum_parser::{parse, ParseOptions, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "
//!         subgraph Core
//!         A[Deployment: api]
//!         B[Service: api-svc]
//!         end
//!         A --> B
//!     ";
//!
//!     let graph = parse(source, ParseOptions::default())?;
//!     assert_eq!(graph.node_count(), 2);
//!     assert_eq!(graph.subgraphs(), ["Core"]);
//!     Ok(())
//! }
//! ```
//!
//! Diagrams embedded in documents are located first with
//! [`extract_fenced`] or [`extract_container`].

pub mod error;
mod extract;
pub mod lexer;
mod parser;
mod span;

pub use extract::{ExtractError, Strategy, extract_container, extract_fenced};
pub use parser::ParseOptions;
pub use span::Span;

use log::info;
use stratum_core::graph::ParsedGraph;

use error::ParseError;

/// Parse diagram source text into a graph.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying code `E001` when `source` is blank,
/// and in strict mode one diagnostic per rejected line.
pub fn parse(source: &str, options: ParseOptions) -> Result<ParsedGraph, ParseError> {
    info!(bytes = source.len(), strict = options.is_strict(); "Parsing diagram");

    let graph = parser::build_graph(source, options)?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edges().len(),
        subgraphs = graph.subgraphs().len();
        "Parsed diagram"
    );
    Ok(graph)
}
