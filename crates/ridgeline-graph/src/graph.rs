//! Call graph with one aggregated edge per caller/callee pair.

use std::collections::{HashMap, HashSet};

use crate::edge::{CallEdge, EdgeLabel};
use crate::node::{NodeLabel, Symbol};

/// Nodes and aggregated call edges discovered during resolution.
///
/// Nodes and edges keep their insertion order so rendered output is stable
/// between runs. There is at most one edge per ordered pair of nodes.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    /// All nodes in insertion order.
    nodes: Vec<NodeLabel>,
    /// Membership index for `nodes`.
    node_set: HashSet<NodeLabel>,
    /// All edges in insertion order.
    edges: Vec<CallEdge>,
    /// Index of each edge by its `(caller, callee)` pair.
    edge_index: HashMap<(NodeLabel, NodeLabel), usize>,
}

impl CallGraph {
    /// Creates a new empty call graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph. Adding an existing node has no effect.
    pub fn add_node(&mut self, label: NodeLabel) {
        if self.node_set.insert(label.clone()) {
            self.nodes.push(label);
        }
    }

    /// Records a call from `caller` to `callee` on the zero-based `line`.
    ///
    /// The first call between the pair creates an edge labelled with the call
    /// site. Later calls turn the label into a counter and increment it.
    /// Both endpoints are added as nodes when missing.
    pub fn record_call(&mut self, caller: &Symbol, callee: &Symbol, line: usize) -> EdgeLabel {
        let from_id = caller.node_label();
        let to_id = callee.node_label();
        let key = (from_id, to_id);

        if let Some(edge) = self
            .edge_index
            .get(&key)
            .copied()
            .and_then(|index| self.edges.get_mut(index))
        {
            edge.record_repeat();
            return edge.label();
        }

        let (from_id, to_id) = key;
        self.add_node(from_id.clone());
        self.add_node(to_id.clone());

        let label = EdgeLabel::first_call(line, caller.defined_at_line());
        let edge_index = self.edges.len();
        self.edges
            .push(CallEdge::new(from_id.clone(), to_id.clone(), label));
        self.edge_index.insert((from_id, to_id), edge_index);
        label
    }

    /// Returns an iterator over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeLabel> {
        self.nodes.iter()
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns an iterator over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &CallEdge> {
        self.edges.iter()
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edge from `caller` to `callee`, if one was recorded.
    #[must_use]
    pub fn edge(&self, caller: &NodeLabel, callee: &NodeLabel) -> Option<&CallEdge> {
        self.edge_index
            .get(&(caller.clone(), callee.clone()))
            .and_then(|&index| self.edges.get(index))
    }

    /// Returns whether the graph is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
