//! Layout engine placing diagram nodes in 3D space.
//!
//! # Pipeline Position
//!
//! ```text
//! Diagram text
//!     ↓ parse
//! ParsedGraph
//!     ↓ layout (this module)
//! Layout
//!     ↓ export
//! OBJ / glTF / layout JSON
//! ```
//!
//! Every subgraph becomes a column along +X in first-seen order, followed by
//! one reserved column for nodes outside any subgraph. Nodes stack down -Y
//! within their column in declaration order, and their semantic type picks a
//! depth band along Z.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Serialize, Serializer};

use stratum_core::{
    geometry::Point3,
    graph::{DepthBand, Edge, Node, ParsedGraph},
};

use crate::config::LayoutConfig;

/// Name of the column holding nodes that belong to no subgraph.
pub const DEFAULT_COLUMN: &str = "_default_";

/// Identifies a layout column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    /// The column of a named subgraph.
    Region(String),
    /// The trailing column for unassigned nodes.
    Default,
}

impl ColumnKey {
    pub fn as_str(&self) -> &str {
        match self {
            ColumnKey::Region(name) => name,
            ColumnKey::Default => DEFAULT_COLUMN,
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ColumnKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A node with its resolved position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutedNode {
    #[serde(flatten)]
    node: Node,
    position: Point3,
}

impl LayoutedNode {
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn position(&self) -> Point3 {
        self.position
    }
}

/// The positioned nodes of one diagram.
///
/// Nodes are ordered column by column, top row first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    nodes: Vec<LayoutedNode>,
    columns: Vec<ColumnKey>,
    edges: Vec<Edge>,
}

impl Layout {
    pub fn nodes(&self) -> &[LayoutedNode] {
        &self.nodes
    }

    /// Column keys in placement order; the default column is always last.
    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    /// Edges carried over unchanged from the graph.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Column-grid layout engine.
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    config: LayoutConfig,
}

impl Engine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Positions every node of `graph`.
    ///
    /// Node at column `ci`, row `ri` lands at
    /// `(ci * column_spacing, -(ri * row_spacing), depth)`.
    pub fn calculate(&self, graph: &ParsedGraph) -> Layout {
        let mut columns: IndexMap<ColumnKey, Vec<&Node>> = graph
            .subgraphs()
            .iter()
            .map(|name| (ColumnKey::Region(name.clone()), Vec::new()))
            .chain([(ColumnKey::Default, Vec::new())])
            .collect();

        for node in graph.nodes() {
            let key = node
                .subgraph()
                .map_or(ColumnKey::Default, |name| ColumnKey::Region(name.to_string()));
            columns.entry(key).or_default().push(node);
        }

        // A subgraph unknown to the graph would have landed after the default column.
        if let Some(index) = columns.get_index_of(&ColumnKey::Default) {
            let last = columns.len() - 1;
            columns.move_index(index, last);
        }

        let nodes: Vec<LayoutedNode> = columns
            .values()
            .enumerate()
            .flat_map(|(ci, column)| {
                column.iter().enumerate().map(move |(ri, node)| LayoutedNode {
                    node: (*node).clone(),
                    position: self.position(ci, ri, node.depth_band()),
                })
            })
            .collect();

        debug!(
            columns = columns.len(),
            nodes = nodes.len();
            "Layout calculated"
        );
        trace!(nodes:?; "Positioned nodes");

        Layout {
            nodes,
            columns: columns.into_keys().collect(),
            edges: graph.edges().to_vec(),
        }
    }

    fn position(&self, column: usize, row: usize, band: DepthBand) -> Point3 {
        let z = match band {
            DepthBand::Workload => self.config.workload_depth(),
            DepthBand::Service => self.config.service_depth(),
            DepthBand::Neutral => 0.0,
        };
        Point3::new(
            positive_zero(column as f64 * self.config.column_spacing()),
            positive_zero(-(row as f64 * self.config.row_spacing())),
            positive_zero(z),
        )
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

/// Maps `-0.0` to `0.0` so printed coordinates never read `-0`.
fn positive_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use stratum_core::graph::NodeKind;

    use super::*;

    fn node(id: &str, kind: Option<NodeKind>, subgraph: Option<&str>) -> Node {
        Node::new(id, id, kind, id, subgraph.map(str::to_string))
    }

    fn graph(nodes: Vec<Node>, subgraphs: &[&str]) -> ParsedGraph {
        let mut graph = ParsedGraph::new();
        for name in subgraphs {
            graph.record_subgraph(name);
        }
        for node in nodes {
            graph.insert_node(node);
        }
        graph
    }

    #[test]
    fn test_columns_follow_subgraph_order_then_default() {
        let graph = graph(
            vec![
                node("loose", None, None),
                node("b1", None, Some("B")),
                node("a1", None, Some("A")),
                node("a2", None, Some("A")),
            ],
            &["A", "B", "Empty"],
        );

        let layout = Engine::default().calculate(&graph);

        let columns: Vec<_> = layout.columns().iter().map(ColumnKey::as_str).collect();
        assert_eq!(columns, ["A", "B", "Empty", DEFAULT_COLUMN]);

        let placed: Vec<_> = layout
            .nodes()
            .iter()
            .map(|n| (n.node().id(), n.position().to_array()))
            .collect();
        assert_eq!(
            placed,
            [
                ("a1", [0.0, 0.0, 0.0]),
                ("a2", [0.0, -3.0, 0.0]),
                ("b1", [4.0, 0.0, 0.0]),
                ("loose", [12.0, 0.0, 0.0]),
            ]
        );
    }

    #[test]
    fn test_depth_bands() {
        let graph = graph(
            vec![
                node("svc", Some(NodeKind::Service), None),
                node("dep", Some(NodeKind::Deployment), None),
                node("cron", Some(NodeKind::CronJob), None),
                node("cm", Some(NodeKind::ConfigMap), None),
                node("plain", None, None),
            ],
            &[],
        );

        let layout = Engine::default().calculate(&graph);
        let depths: Vec<f64> = layout.nodes().iter().map(|n| n.position().z()).collect();

        assert_approx_eq!(f64, depths[0], -1.2, epsilon = 1e-12);
        assert_approx_eq!(f64, depths[1], 1.2, epsilon = 1e-12);
        assert_approx_eq!(f64, depths[2], 1.2, epsilon = 1e-12);
        assert_eq!(depths[3], 0.0);
        assert_eq!(depths[4], 0.0);
    }

    #[test]
    fn test_first_row_is_positive_zero() {
        let layout = Engine::default().calculate(&graph(vec![node("a", None, None)], &[]));
        let y = layout.nodes()[0].position().y();
        assert!(y == 0.0 && y.is_sign_positive());
    }

    #[test]
    fn test_custom_spacing() {
        let engine = Engine::new(LayoutConfig::new(10.0, 2.0, 5.0, -5.0));
        let graph = graph(
            vec![
                node("a", Some(NodeKind::Pod), Some("S")),
                node("b", Some(NodeKind::Service), Some("S")),
                node("c", None, None),
            ],
            &["S"],
        );

        let layout = engine.calculate(&graph);
        let positions: Vec<_> = layout.nodes().iter().map(|n| n.position().to_array()).collect();

        assert_eq!(
            positions,
            [[0.0, 0.0, 5.0], [0.0, -2.0, -5.0], [10.0, 0.0, 0.0]]
        );
    }

    #[test]
    fn test_empty_graph_keeps_default_column() {
        let layout = Engine::default().calculate(&ParsedGraph::new());
        assert!(layout.is_empty());
        assert_eq!(layout.columns(), [ColumnKey::Default]);
    }
}
