//! Input and output formats of a conversion.

use std::{fmt, path::Path};

use log::debug;

use stratum_parser::{ExtractError, extract_container, extract_fenced};

/// How diagram text is located inside an input document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceFormat {
    /// Decide from the file extension.
    #[default]
    Auto,
    /// First ```` ```mermaid ```` fenced block.
    Markdown,
    /// First `<div class="mermaid">` container.
    Html,
    /// The whole document is diagram text.
    Raw,
}

impl SourceFormat {
    /// Resolves [`SourceFormat::Auto`] from the extension of `path`.
    ///
    /// Unknown extensions stay `Auto`, which tries a fenced block and then a
    /// container.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::path::Path;
    /// # use stratum::SourceFormat;
    /// assert_eq!(SourceFormat::Auto.resolve(Path::new("arch.md")), SourceFormat::Markdown);
    /// assert_eq!(SourceFormat::Auto.resolve(Path::new("index.HTML")), SourceFormat::Html);
    /// assert_eq!(SourceFormat::Raw.resolve(Path::new("arch.md")), SourceFormat::Raw);
    /// ```
    pub fn resolve(self, path: &Path) -> Self {
        if self != Self::Auto {
            return self;
        }
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("md" | "markdown") => Self::Markdown,
            Some("html" | "htm") => Self::Html,
            Some("mmd" | "mermaid") => Self::Raw,
            _ => Self::Auto,
        }
    }

    /// Pulls the diagram text out of `document`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::NotFound`] naming the last strategy tried.
    pub fn extract(self, document: &str) -> Result<String, ExtractError> {
        debug!(source_format:? = self; "Extracting diagram text");
        match self {
            Self::Markdown => extract_fenced(document),
            Self::Html => extract_container(document),
            Self::Raw => Ok(document.trim().to_string()),
            Self::Auto => extract_fenced(document).or_else(|_| extract_container(document)),
        }
    }
}

/// The artifact a conversion writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Wavefront text mesh, one cube per node.
    #[default]
    Obj,
    /// glTF scene with one annotated node per diagram node.
    Gltf,
    /// JSON layout metadata.
    Layout,
}

impl OutputFormat {
    /// File name used when no output path is given.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Obj => "model.obj",
            Self::Gltf => "model.gltf",
            Self::Layout => "model_meta.json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Obj => write!(f, "obj"),
            Self::Gltf => write!(f, "gltf"),
            Self::Layout => write!(f, "layout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use stratum_parser::Strategy;

    use super::*;

    #[test]
    fn test_resolve_by_extension() {
        let cases = [
            ("a.markdown", SourceFormat::Markdown),
            ("a.htm", SourceFormat::Html),
            ("a.mmd", SourceFormat::Raw),
            ("a.mermaid", SourceFormat::Raw),
            ("a.txt", SourceFormat::Auto),
            ("no_extension", SourceFormat::Auto),
        ];
        for (path, expected) in cases {
            assert_eq!(SourceFormat::Auto.resolve(Path::new(path)), expected, "{path}");
        }
    }

    #[test]
    fn test_auto_falls_back_to_container() {
        let doc = "<div class='mermaid'>A[a]</div>";
        assert_eq!(SourceFormat::Auto.extract(doc).unwrap(), "A[a]");
    }

    #[test]
    fn test_auto_prefers_fenced_block() {
        let doc = "```mermaid\nA[md]\n```\n<div class='mermaid'>A[html]</div>";
        assert_eq!(SourceFormat::Auto.extract(doc).unwrap(), "A[md]");
    }

    #[test]
    fn test_markdown_does_not_fall_back() {
        let doc = "<div class='mermaid'>A[a]</div>";
        assert_eq!(
            SourceFormat::Markdown.extract(doc),
            Err(ExtractError::NotFound {
                strategy: Strategy::Fenced
            })
        );
    }

    #[test]
    fn test_raw_is_trimmed() {
        assert_eq!(SourceFormat::Raw.extract("\n A[a] \n").unwrap(), "A[a]");
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(OutputFormat::Obj.default_file_name(), "model.obj");
        assert_eq!(OutputFormat::Gltf.default_file_name(), "model.gltf");
        assert_eq!(OutputFormat::Layout.default_file_name(), "model_meta.json");
    }
}
