//! Line tokenizer for diagram source text.
//!
//! Diagram sources are line oriented, so instead of a token stream the lexer
//! classifies each trimmed line into exactly one [`LineKind`]. The grammar
//! state machine in [`crate::parser`] folds over these classifications.
//!
//! Recognition order matters: a line is tried as a region opener, a region
//! close, a node declaration and an edge, in that order. Lines matching none
//! of them become [`LineKind::Skip`] with the reason attached, so callers can
//! tell a blank line from a statement the grammar does not understand.

use winnow::{
    Parser as _,
    ascii::{Caseless, space0, space1},
    combinator::{alt, delimited, eof, opt, peek, preceded, terminated},
    error::ModalResult,
    token::{literal, one_of, rest, take_till, take_while},
};

/// Characters that open a node label.
const LABEL_OPEN: [char; 3] = ['[', '(', '{'];

/// Characters that close a node label. Any closer ends any opener.
const LABEL_CLOSE: [char; 3] = [']', ')', '}'];

/// The classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `subgraph <identifier>? <title>?`
    RegionOpen {
        identifier: Option<&'a str>,
        title: Option<Title<'a>>,
    },
    /// A line consisting only of `end`.
    RegionClose,
    /// `<id><open><label><close>`
    NodeDecl { id: &'a str, label: &'a str },
    /// `<from> <arrow> |<label>|? <to>`
    Edge {
        from: &'a str,
        to: &'a str,
        label: Option<&'a str>,
    },
    /// A line that produces nothing.
    Skip(SkipReason),
}

/// The explicit title written after a `subgraph` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Title<'a> {
    /// `"Title"`
    Quoted(&'a str),
    /// `["Title"]`
    Bracketed(&'a str),
    /// Whatever text is left on the line.
    Remainder(&'a str),
}

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    /// `%%` comment.
    Comment,
    /// `graph TD`, `flowchart LR` and similar headers.
    Header,
    /// Not part of the recognized grammar subset.
    Unrecognized,
}

/// Classify one line of diagram source.
///
/// Leading and trailing whitespace is ignored.
///
/// # Examples
///
/// ```
/// # use stratum_parser::lexer::{classify_line, LineKind};
/// assert_eq!(
///     classify_line("  A[Deployment: api]"),
///     LineKind::NodeDecl { id: "A", label: "Deployment: api" },
/// );
/// assert_eq!(classify_line("END"), LineKind::RegionClose);
/// ```
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Skip(SkipReason::Blank);
    }
    if line.starts_with("%%") {
        return LineKind::Skip(SkipReason::Comment);
    }

    let mut input = line;
    if let Ok(kind) = alt((region_open, region_close, node_decl, edge)).parse_next(&mut input) {
        return kind;
    }

    let mut input = line;
    if header.parse_next(&mut input).is_ok() {
        LineKind::Skip(SkipReason::Header)
    } else {
        LineKind::Skip(SkipReason::Unrecognized)
    }
}

fn identifier<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn region_open<'a>(input: &mut &'a str) -> ModalResult<LineKind<'a>> {
    preceded(
        (literal(Caseless("subgraph")), alt((space1, eof))),
        (
            // The identifier must stand alone; `api-gw Title` is all title.
            opt(terminated(identifier, peek(alt((space1, eof, "\"", "["))))),
            preceded(space0, opt(region_title)),
        ),
    )
    .map(|(identifier, title)| LineKind::RegionOpen { identifier, title })
    .parse_next(input)
}

fn region_title<'a>(input: &mut &'a str) -> ModalResult<Title<'a>> {
    alt((
        delimited("[\"", take_till(1.., '"'), "\"]").map(Title::Bracketed),
        delimited('"', take_till(1.., '"'), '"').map(Title::Quoted),
        rest.verify(|remainder: &str| !remainder.is_empty())
            .map(Title::Remainder),
    ))
    .parse_next(input)
}

fn region_close<'a>(input: &mut &'a str) -> ModalResult<LineKind<'a>> {
    (literal(Caseless("end")), eof)
        .value(LineKind::RegionClose)
        .parse_next(input)
}

fn node_decl<'a>(input: &mut &'a str) -> ModalResult<LineKind<'a>> {
    (
        identifier,
        delimited(
            (space0, one_of(LABEL_OPEN)),
            take_till(1.., LABEL_CLOSE),
            one_of(LABEL_CLOSE),
        ),
    )
        .map(|(id, label): (&'a str, &'a str)| LineKind::NodeDecl {
            id,
            label: label.trim(),
        })
        .parse_next(input)
}

fn edge<'a>(input: &mut &'a str) -> ModalResult<LineKind<'a>> {
    (
        terminated(identifier, (space0, take_while(1.., ['-', '.']), '>', space0)),
        opt(terminated(
            delimited('|', take_till(1.., '|'), '|'),
            space0,
        )),
        identifier,
    )
        .map(
            |(from, label, to): (&'a str, Option<&'a str>, &'a str)| LineKind::Edge {
                from,
                to,
                label: label.map(str::trim),
            },
        )
        .parse_next(input)
}

fn header<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    terminated(
        alt((literal(Caseless("flowchart")), literal(Caseless("graph")))),
        alt((space1, eof)),
    )
    .parse_next(input)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Identifiers that cannot be mistaken for the `end` or `subgraph` keywords.
    fn identifier_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_]{1,16}".prop_filter("avoid keywords", |s| {
            !s.eq_ignore_ascii_case("end") && !s.to_ascii_lowercase().starts_with("subgraph")
        })
    }

    /// Label text without any closing delimiter.
    fn label_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 :_-]{0,24}[A-Za-z0-9]"
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_node_decl_roundtrips(id: &str, label: &str) -> Result<(), TestCaseError> {
        let line = format!("{id}[{label}]");
        prop_assert_eq!(
            classify_line(&line),
            LineKind::NodeDecl {
                id,
                label: label.trim()
            }
        );
        Ok(())
    }

    fn check_edge_arrows(from: &str, to: &str, arrow: &str) -> Result<(), TestCaseError> {
        let line = format!("{from} {arrow}> {to}");
        prop_assert_eq!(
            classify_line(&line),
            LineKind::Edge {
                from,
                to,
                label: None
            }
        );
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn node_decl_roundtrips(id in identifier_strategy(), label in label_strategy()) {
            check_node_decl_roundtrips(&id, &label)?;
        }

        #[test]
        fn edge_arrows(from in identifier_strategy(), to in identifier_strategy(), arrow in "[-.]{1,4}") {
            check_edge_arrows(&from, &to, &arrow)?;
        }

        #[test]
        fn arbitrary_lines_classify(line in "\\PC{0,64}") {
            let _ = classify_line(&line);
        }
    }
}
