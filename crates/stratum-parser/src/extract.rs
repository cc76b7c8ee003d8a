//! Locating diagram text inside larger documents.
//!
//! Two strategies are offered, and neither falls back to the other: the
//! caller decides which to try and in what order.

use std::{fmt, sync::LazyLock};

use log::debug;
use regex::Regex;
use thiserror::Error;

// The info string must be exactly `mermaid`, optionally followed by
// attributes; the body starts on the next line.
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```mermaid(?:[ \t][^\n]*)?\r?\n(.*?)```").expect("valid fenced block pattern")
});

static CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div[^>]*class=["']?mermaid["']?[^>]*>(.*?)</div>"#)
        .expect("valid container pattern")
});

/// The extraction strategy that was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// A ```` ```mermaid ```` fenced block in markdown.
    Fenced,
    /// A `<div class="mermaid">` container in HTML.
    Container,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Fenced => write!(f, "fenced ```mermaid block"),
            Strategy::Container => write!(f, "<div class=\"mermaid\"> container"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no {strategy} found in document")]
    NotFound { strategy: Strategy },
}

/// Return the trimmed body of the first fenced diagram block.
///
/// # Examples
///
/// ```
/// # use stratum_parser::extract_fenced;
/// let doc = "# Arch\n\n```mermaid\ngraph TD\nA --> B\n```\n";
/// assert_eq!(extract_fenced(doc).unwrap(), "graph TD\nA --> B");
/// ```
pub fn extract_fenced(document: &str) -> Result<String, ExtractError> {
    first_capture(&FENCED_BLOCK, document, Strategy::Fenced)
}

/// Return the trimmed inner text of the first diagram container element.
pub fn extract_container(document: &str) -> Result<String, ExtractError> {
    first_capture(&CONTAINER, document, Strategy::Container)
}

fn first_capture(pattern: &Regex, document: &str, strategy: Strategy) -> Result<String, ExtractError> {
    let body = pattern
        .captures(document)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str().trim().to_string())
        .ok_or(ExtractError::NotFound { strategy })?;

    debug!(strategy:?, bytes = body.len(); "Extracted diagram text");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_takes_first_block() {
        let doc = "```mermaid\nA[one]\n```\ntext\n```mermaid\nB[two]\n```";
        assert_eq!(extract_fenced(doc).unwrap(), "A[one]");
    }

    #[test]
    fn test_fenced_ignores_other_languages() {
        let doc = "```rust\nfn main() {}\n```";
        assert_eq!(
            extract_fenced(doc),
            Err(ExtractError::NotFound {
                strategy: Strategy::Fenced
            })
        );
    }

    #[test]
    fn test_fenced_info_string_stays_out_of_body() {
        let doc = "```mermaid title=\"Flow\"\nA --> B\n```";
        assert_eq!(extract_fenced(doc).unwrap(), "A --> B");
    }

    #[test]
    fn test_fenced_requires_exact_language_tag() {
        let doc = "```mermaidjs\nA --> B\n```\n\n```mermaid\nC --> D\n```";
        assert_eq!(extract_fenced(doc).unwrap(), "C --> D");

        assert_eq!(
            extract_fenced("```mermaidjs\nA --> B\n```"),
            Err(ExtractError::NotFound {
                strategy: Strategy::Fenced
            })
        );
    }

    #[test]
    fn test_container_variants() {
        for doc in [
            "<div class=\"mermaid\">\n A --> B \n</div>",
            "<div id='x' class='mermaid' data-k=1>A --> B</div>",
            "<DIV CLASS=mermaid>A --> B</DIV>",
        ] {
            assert_eq!(extract_container(doc).unwrap(), "A --> B", "doc: {doc}");
        }
    }

    #[test]
    fn test_container_missing() {
        let err = extract_container("<div class=\"diagram\">A</div>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "no <div class=\"mermaid\"> container found in document"
        );
    }
}
