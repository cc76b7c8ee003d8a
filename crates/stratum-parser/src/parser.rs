//! Grammar state machine.
//!
//! Folds the [`LineKind`] of every source line into a [`ParsedGraph`]. The
//! open region stack and the diagnostics gathered along the way live in
//! [`GraphState`], which is threaded through the fold and consumed at the
//! end.

use log::{debug, trace, warn};
use stratum_core::graph::{Edge, Node, NodeKind, ParsedGraph};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    lexer::{self, LineKind, SkipReason, Title},
    span::Span,
};

/// Options controlling how forgiving the parser is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    strict: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject unrecognized statements and unbalanced `subgraph`/`end` pairs.
    ///
    /// Off by default: such lines are dropped and the parse succeeds.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

/// A `subgraph` block that has not been closed yet.
#[derive(Debug)]
struct OpenRegion {
    title: String,
    span: Span,
}

/// Accumulator for the line fold.
#[derive(Debug)]
struct GraphState {
    graph: ParsedGraph,
    regions: Vec<OpenRegion>,
    collector: DiagnosticCollector,
    strict: bool,
}

/// Build a graph from diagram source text.
///
/// Fails with [`ErrorCode::E001`] when the source is blank. Otherwise a
/// permissive parse always succeeds; a strict parse fails with every
/// diagnostic found.
pub fn build_graph(source: &str, options: ParseOptions) -> Result<ParsedGraph, ParseError> {
    if source.trim().is_empty() {
        return Err(Diagnostic::error("empty diagram source")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(0..source.len()), "nothing to parse")
            .with_help("declare at least one node, for example `A[Deployment: api]`")
            .into());
    }

    lines_with_spans(source)
        .fold(GraphState::new(options), |mut state, (span, line)| {
            state.apply(span, line, lexer::classify_line(line));
            state
        })
        .finish()
}

/// Split `source` into lines, each paired with the span of its trimmed text.
fn lines_with_spans(source: &str) -> impl Iterator<Item = (Span, &str)> {
    source.split_inclusive('\n').scan(0, |offset, raw| {
        let start = *offset;
        *offset += raw.len();

        let leading = raw.len() - raw.trim_start().len();
        let trimmed = raw.trim();
        let span = Span::new(start + leading..start + leading + trimmed.len());
        Some((span, trimmed))
    })
}

/// Split a node label into its semantic type and display name.
///
/// A label such as `Deployment: api` (keyword matched case-insensitively,
/// colon optional) yields the type and the trimmed rest. A keyword with
/// nothing after it is treated as a plain label, and a lone trailing colon
/// does not count as a name: `Service:` stays an untyped label.
fn split_kind(label: &str) -> (Option<NodeKind>, &str) {
    NodeKind::ALL
        .into_iter()
        .find_map(|kind| {
            let keyword = kind.as_str();
            let head = label.get(..keyword.len())?;
            if !head.eq_ignore_ascii_case(keyword) {
                return None;
            }
            let tail = label.get(keyword.len()..)?;
            let rest = tail.strip_prefix(':').unwrap_or(tail).trim();
            (!rest.is_empty()).then_some((Some(kind), rest))
        })
        .unwrap_or((None, label))
}

impl GraphState {
    fn new(options: ParseOptions) -> Self {
        Self {
            graph: ParsedGraph::new(),
            regions: Vec::new(),
            collector: DiagnosticCollector::new(),
            strict: options.is_strict(),
        }
    }

    fn apply(&mut self, span: Span, line: &str, kind: LineKind<'_>) {
        match kind {
            LineKind::RegionOpen { identifier, title } => {
                self.open_region(span, identifier, title);
            }
            LineKind::RegionClose => self.close_region(span),
            LineKind::NodeDecl { id, label } => self.declare_node(id, label),
            LineKind::Edge { from, to, label } => {
                trace!(from, to; "Edge");
                self.graph
                    .push_edge(Edge::new(from, to, label.map(str::to_string)));
            }
            LineKind::Skip(SkipReason::Unrecognized) => self.unrecognized(span, line),
            LineKind::Skip(reason) => trace!(reason:?; "Skipped line"),
        }
    }

    fn open_region(&mut self, span: Span, identifier: Option<&str>, title: Option<Title<'_>>) {
        let (explicit, remainder) = match title {
            Some(Title::Quoted(text) | Title::Bracketed(text)) => (Some(text), None),
            Some(Title::Remainder(text)) => (None, Some(text)),
            None => (None, None),
        };
        let title = [explicit, identifier, remainder]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("sub{}", self.graph.subgraphs().len()));

        if self.graph.record_subgraph(&title) {
            debug!(title = title.as_str(); "New subgraph");
        }
        self.regions.push(OpenRegion { title, span });
    }

    fn close_region(&mut self, span: Span) {
        if self.regions.pop().is_some() {
            return;
        }
        if self.strict {
            self.collector.emit(
                Diagnostic::error("unmatched `end`")
                    .with_code(ErrorCode::E102)
                    .with_label(span, "no open subgraph to close"),
            );
        } else {
            debug!(offset = span.start(); "Ignoring `end` with no open subgraph");
        }
    }

    fn declare_node(&mut self, id: &str, label: &str) {
        let (kind, name) = split_kind(label);
        let subgraph = self.regions.last().map(|region| region.title.clone());
        trace!(id, kind:?, subgraph:?; "Node");
        self.graph
            .insert_node(Node::new(id, label, kind, name, subgraph));
    }

    fn unrecognized(&mut self, span: Span, line: &str) {
        if self.strict {
            self.collector.emit(
                Diagnostic::error(format!("unrecognized statement `{line}`"))
                    .with_code(ErrorCode::E100)
                    .with_label(span, "not a subgraph, `end`, node or edge")
                    .with_help("nodes look like `id[label]`, edges like `a --> b`"),
            );
        } else {
            warn!(offset = span.start(), line; "Skipping unrecognized statement");
        }
    }

    fn finish(mut self) -> Result<ParsedGraph, ParseError> {
        for region in std::mem::take(&mut self.regions) {
            if self.strict {
                self.collector.emit(
                    Diagnostic::error(format!("subgraph `{}` is never closed", region.title))
                        .with_code(ErrorCode::E101)
                        .with_label(region.span, "opened here")
                        .with_help("add a matching `end` line"),
                );
            } else {
                debug!(title = region.title.as_str(); "Subgraph left open at end of input");
            }
        }

        self.collector.finish()?;
        Ok(self.graph)
    }
}
