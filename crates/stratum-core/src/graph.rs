//! The typed diagram graph.
//!
//! A [`ParsedGraph`] is the output of the grammar parser and the input of
//! the layout engine. It owns every [`Node`] keyed by identifier, the
//! ordered list of [`Edge`]s, and the first-seen order of subgraph regions.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

/// Semantic node type recognised from a label prefix such as `Service: api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Deployment,
    Service,
    DaemonSet,
    Pod,
    ConfigMap,
    Ingress,
    StatefulSet,
    CronJob,
}

impl NodeKind {
    /// Every kind, in keyword matching order.
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Deployment,
        NodeKind::Service,
        NodeKind::DaemonSet,
        NodeKind::Pod,
        NodeKind::ConfigMap,
        NodeKind::Ingress,
        NodeKind::StatefulSet,
        NodeKind::CronJob,
    ];

    /// Returns the canonical keyword for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Deployment => "Deployment",
            NodeKind::Service => "Service",
            NodeKind::DaemonSet => "DaemonSet",
            NodeKind::Pod => "Pod",
            NodeKind::ConfigMap => "ConfigMap",
            NodeKind::Ingress => "Ingress",
            NodeKind::StatefulSet => "StatefulSet",
            NodeKind::CronJob => "CronJob",
        }
    }

    /// Returns the depth band this kind is placed in.
    pub fn depth_band(&self) -> DepthBand {
        match self {
            NodeKind::Deployment
            | NodeKind::DaemonSet
            | NodeKind::Pod
            | NodeKind::StatefulSet
            | NodeKind::CronJob => DepthBand::Workload,
            NodeKind::Service => DepthBand::Service,
            NodeKind::ConfigMap | NodeKind::Ingress => DepthBand::Neutral,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Z-axis band a node is pushed into by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthBand {
    /// Workloads (deployments, pods, jobs, ...) sit in front.
    Workload,
    /// Services sit behind.
    Service,
    /// Everything else stays on the base plane.
    Neutral,
}

/// A declared diagram node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: String,
    label: String,
    #[serde(rename = "type")]
    kind: Option<NodeKind>,
    name: String,
    subgraph: Option<String>,
}

impl Node {
    /// Creates a new node.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier, the key of the node map
    /// * `label` - Raw text between the node's delimiters
    /// * `kind` - Semantic type detected from the label prefix
    /// * `name` - Label with the type prefix stripped
    /// * `subgraph` - Innermost region open at declaration time
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: Option<NodeKind>,
        name: impl Into<String>,
        subgraph: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            name: name.into(),
            subgraph,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> Option<NodeKind> {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subgraph(&self) -> Option<&str> {
        self.subgraph.as_deref()
    }

    /// Returns the depth band of this node, [`DepthBand::Neutral`] when untyped.
    pub fn depth_band(&self) -> DepthBand {
        self.kind
            .map(|kind| kind.depth_band())
            .unwrap_or(DepthBand::Neutral)
    }
}

/// A directed connection between two node identifiers.
///
/// Endpoints are not checked against the node map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    from: String,
    to: String,
    label: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: Option<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// The result of parsing a diagram.
///
/// # Examples
///
/// ```
/// # use stratum_core::graph::{Node, ParsedGraph};
/// let mut graph = ParsedGraph::new();
/// graph.insert_node(Node::new("a", "first", None, "first", None));
/// graph.insert_node(Node::new("b", "second", None, "second", None));
/// graph.insert_node(Node::new("a", "again", None, "again", None));
///
/// // Redeclaration replaces the node but keeps its original position.
/// let ids: Vec<_> = graph.nodes().map(|n| n.id()).collect();
/// assert_eq!(ids, ["a", "b"]);
/// assert_eq!(graph.node("a").unwrap().label(), "again");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedGraph {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
    subgraphs: Vec<String>,
}

impl ParsedGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, replacing any previous node with the same identifier.
    pub fn insert_node(&mut self, node: Node) {
        if let Some(previous) = self.nodes.insert(node.id.clone(), node) {
            debug!(id = previous.id(); "Node redeclared, previous definition replaced");
        }
    }

    /// Appends an edge.
    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Records a subgraph name in first-seen order.
    ///
    /// Returns `false` if the name was already recorded.
    pub fn record_subgraph(&mut self, name: &str) -> bool {
        if self.subgraphs.iter().any(|seen| seen == name) {
            return false;
        }
        self.subgraphs.push(name.to_string());
        true
    }

    /// Looks up a node by identifier.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Iterates nodes in first-declaration order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Subgraph names in first-seen order.
    pub fn subgraphs(&self) -> &[String] {
        &self.subgraphs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_depth_bands() {
        assert_eq!(NodeKind::Deployment.depth_band(), DepthBand::Workload);
        assert_eq!(NodeKind::DaemonSet.depth_band(), DepthBand::Workload);
        assert_eq!(NodeKind::Pod.depth_band(), DepthBand::Workload);
        assert_eq!(NodeKind::StatefulSet.depth_band(), DepthBand::Workload);
        assert_eq!(NodeKind::CronJob.depth_band(), DepthBand::Workload);
        assert_eq!(NodeKind::Service.depth_band(), DepthBand::Service);
        assert_eq!(NodeKind::ConfigMap.depth_band(), DepthBand::Neutral);
        assert_eq!(NodeKind::Ingress.depth_band(), DepthBand::Neutral);
    }

    #[test]
    fn test_untyped_node_is_neutral() {
        let node = Node::new("a", "plain", None, "plain", None);
        assert_eq!(node.depth_band(), DepthBand::Neutral);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::StatefulSet.to_string(), "StatefulSet");
        assert_eq!(NodeKind::CronJob.as_str(), "CronJob");
    }

    #[test]
    fn test_record_subgraph_is_append_only() {
        let mut graph = ParsedGraph::new();

        assert!(graph.record_subgraph("Core"));
        assert!(graph.record_subgraph("Edge"));
        assert!(!graph.record_subgraph("Core"));

        assert_eq!(graph.subgraphs(), ["Core", "Edge"]);
    }

    #[test]
    fn test_redeclared_node_replaced_entirely() {
        let mut graph = ParsedGraph::new();
        graph.insert_node(Node::new(
            "a",
            "Service: one",
            Some(NodeKind::Service),
            "one",
            Some("Core".to_string()),
        ));
        graph.insert_node(Node::new("a", "two", None, "two", None));

        let node = graph.node("a").expect("node a");
        assert_eq!(graph.node_count(), 1);
        assert_eq!(node.label(), "two");
        assert_eq!(node.kind(), None);
        assert_eq!(node.subgraph(), None);
    }

    #[test]
    fn test_edges_keep_order() {
        let mut graph = ParsedGraph::new();
        graph.push_edge(Edge::new("a", "b", None));
        graph.push_edge(Edge::new("b", "ghost", Some("calls".to_string())));

        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.edges()[1].to(), "ghost");
        assert_eq!(graph.edges()[1].label(), Some("calls"));
    }
}
