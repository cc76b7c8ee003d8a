//! Layout metadata as JSON.
//!
//! The document lists every positioned node with its parsed fields, the
//! edges of the diagram and the column order, for tools that pair the
//! geometry with the diagram's semantics.

use log::info;
use serde::Serialize;

use stratum_core::graph::Edge;

use crate::{
    export::{Error, Exporter},
    layout::{ColumnKey, Layout, LayoutedNode},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetaDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<u64>,
    nodes: &'a [LayoutedNode],
    edges: &'a [Edge],
    columns: &'a [ColumnKey],
}

/// Renders layouts as a metadata document.
///
/// Without a timestamp the output depends only on the layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaExporter {
    generated_at: Option<u64>,
}

impl MetaExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps the document with `generatedAt`, in seconds since the Unix epoch.
    pub fn with_generated_at(mut self, seconds: u64) -> Self {
        self.generated_at = Some(seconds);
        self
    }
}

impl Exporter for MetaExporter {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn export_layout(&self, layout: &Layout) -> Result<String, Error> {
        info!(
            nodes = layout.nodes().len(),
            edges = layout.edges().len();
            "Rendering layout metadata"
        );

        let document = MetaDocument {
            generated_at: self.generated_at,
            nodes: layout.nodes(),
            edges: layout.edges(),
            columns: layout.columns(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use stratum_parser::{ParseOptions, parse};

    use super::*;
    use crate::layout::Engine;

    fn layout(source: &str) -> Layout {
        let graph = parse(source, ParseOptions::default()).unwrap();
        Engine::default().calculate(&graph)
    }

    #[test]
    fn test_document_shape() {
        let layout = layout("subgraph Core\nA[Service: api]\nend\nB[db]\nA -->|reads| B");
        let text = MetaExporter::new().export_layout(&layout).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            doc,
            json!({
                "nodes": [
                    {
                        "id": "A",
                        "label": "Service: api",
                        "type": "Service",
                        "name": "api",
                        "subgraph": "Core",
                        "position": [0.0, 0.0, -1.2]
                    },
                    {
                        "id": "B",
                        "label": "db",
                        "type": null,
                        "name": "db",
                        "subgraph": null,
                        "position": [4.0, 0.0, 0.0]
                    }
                ],
                "edges": [{"from": "A", "to": "B", "label": "reads"}],
                "columns": ["Core", "_default_"]
            })
        );
    }

    #[test]
    fn test_timestamp_only_when_injected() {
        let layout = layout("A[a]");

        let plain = MetaExporter::new().export_layout(&layout).unwrap();
        assert!(!plain.contains("generatedAt"));

        let stamped = MetaExporter::new()
            .with_generated_at(1_700_000_000)
            .export_layout(&layout)
            .unwrap();
        let doc: Value = serde_json::from_str(&stamped).unwrap();
        assert_eq!(doc["generatedAt"], 1_700_000_000_u64);
    }

    #[test]
    fn test_empty_layout_is_valid_document() {
        let text = MetaExporter::new()
            .export_layout(&Layout::default())
            .unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc, json!({"nodes": [], "edges": [], "columns": []}));
    }
}
