//! DOT rendering of the call graph.

use std::collections::HashMap;

use petgraph::dot::{Config as DotConfig, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use ridgeline_graph::{CallGraph, NodeLabel};

/// Renders `graph` as a DOT document.
///
/// Nodes and edges keep their insertion order. When `labelled` is false the
/// edges are written without their site or count labels.
pub(crate) fn render_dot(graph: &CallGraph, labelled: bool) -> String {
    let mut dot_graph: DiGraph<String, String> =
        DiGraph::with_capacity(graph.node_count(), graph.edge_count());
    let mut indices: HashMap<&NodeLabel, NodeIndex> = HashMap::with_capacity(graph.node_count());

    for node in graph.nodes() {
        indices.insert(node, dot_graph.add_node(node.to_string()));
    }

    for edge in graph.edges() {
        let (Some(&caller), Some(&callee)) = (indices.get(edge.caller()), indices.get(edge.callee()))
        else {
            continue;
        };
        dot_graph.add_edge(caller, callee, edge.label().to_string());
    }

    let config: &[DotConfig] = if labelled {
        &[]
    } else {
        &[DotConfig::EdgeNoLabel]
    };
    Dot::with_config(&dot_graph, config).to_string()
}
