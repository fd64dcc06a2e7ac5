//! Weighted alternative outcomes of a replacement graph.
//!
//! A right-hand-side graph may be partitioned into named groups; applying
//! the rule then substitutes exactly one group's induced subgraph, picked
//! by weighted random selection.

use std::collections::HashMap;

use crate::data::GroupData;
use crate::edge::Edge;
use crate::graph::Graph;
use crate::node::NodeId;

/// A weighted subset of a replacement graph's nodes and edges.
///
/// The edge set only ever contains edges whose both endpoints belong to
/// this group.
#[derive(Debug, Clone)]
pub struct Group {
    /// Group id, matching the node records' `group` field.
    pub id: String,
    /// Selection weight; non-negative.
    pub weight: f32,
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
}

impl Group {
    /// An empty group.
    pub fn new(id: impl Into<String>, weight: f32) -> Self {
        Group {
            id: id.into(),
            weight,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Collects the declared groups out of an instantiated replacement
    /// graph.
    ///
    /// A node joins the group named by its `group` field; an edge joins
    /// only when both endpoints carry the same group id. Nodes tagged with
    /// an undeclared group id are dropped.
    pub fn collect(graph: &Graph, declared: &[GroupData]) -> Vec<Group> {
        let mut groups: HashMap<&str, Group> = declared
            .iter()
            .map(|g| (g.id.as_str(), Group::new(g.id.clone(), g.weight)))
            .collect();
        // Declaration order, for deterministic selection downstream.
        let order: Vec<&str> = declared.iter().map(|g| g.id.as_str()).collect();

        for node in graph.nodes() {
            if let Some(group_id) = node.group.as_deref()
                && let Some(group) = groups.get_mut(group_id)
            {
                group.add_node(node.id());
            }
        }

        for edge in graph.edges() {
            let start_group = graph.node(edge.start).and_then(|n| n.group.as_deref());
            let end_group = graph.node(edge.end).and_then(|n| n.group.as_deref());
            if let (Some(sg), Some(eg)) = (start_group, end_group)
                && sg == eg
                && let Some(group) = groups.get_mut(sg)
            {
                group.add_edge(edge.clone());
            }
        }

        order
            .into_iter()
            .filter_map(|id| groups.remove(id))
            .collect()
    }

    /// Member node ids.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Member edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Adds a node to the group, once.
    pub fn add_node(&mut self, node: NodeId) {
        if !self.nodes.contains(&node) {
            self.nodes.push(node);
        }
    }

    /// Adds an edge, provided both endpoints are already members.
    pub fn add_edge(&mut self, edge: Edge) {
        if self.nodes.contains(&edge.start)
            && self.nodes.contains(&edge.end)
            && !self.edges.contains(&edge)
        {
            self.edges.push(edge);
        }
    }

    /// Builds the induced subgraph, copying node data from `parent`.
    pub fn to_graph(&self, parent: &Graph) -> Graph {
        let mut graph = Graph::new();

        for &id in &self.nodes {
            if let Some(node) = parent.node(id) {
                graph.add_node(node.clone());
            }
        }
        for edge in &self.edges {
            graph.add_edge(edge.start, edge.end, edge.symbol.clone());
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EdgeData, GraphData, NodeData};
    use crate::symbol::Symbol;

    fn grouped_graph() -> (Graph, Vec<GroupData>) {
        let data = GraphData {
            id: "R".to_string(),
            nodes: vec![
                NodeData::new("a", Symbol::terminal("a")).with_group("g0"),
                NodeData::new("b", Symbol::terminal("b")).with_group("g0"),
                NodeData::new("c", Symbol::terminal("c")).with_group("g1"),
            ],
            edges: vec![
                EdgeData::new("a", "b", Symbol::asterisk()),
                EdgeData::new("b", "c", Symbol::asterisk()),
            ],
            groups: vec![],
        };
        let declared = vec![
            GroupData {
                id: "g0".to_string(),
                name: String::new(),
                weight: 1.0,
                position: Default::default(),
            },
            GroupData {
                id: "g1".to_string(),
                name: String::new(),
                weight: 3.0,
                position: Default::default(),
            },
        ];
        (Graph::instantiate(&data), declared)
    }

    #[test]
    fn collect_partitions_nodes_by_group_tag() {
        let (graph, declared) = grouped_graph();
        let groups = Group::collect(&graph, &declared);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, "g0");
        assert_eq!(groups[0].nodes().len(), 2);
        assert_eq!(groups[1].id, "g1");
        assert_eq!(groups[1].nodes().len(), 1);
    }

    #[test]
    fn cross_group_edges_are_excluded() {
        let (graph, declared) = grouped_graph();
        let groups = Group::collect(&graph, &declared);

        // a->b stays inside g0; b->c crosses into g1 and is dropped.
        assert_eq!(groups[0].edges().len(), 1);
        assert_eq!(groups[1].edges().len(), 0);
    }

    #[test]
    fn to_graph_builds_the_induced_subgraph() {
        let (graph, declared) = grouped_graph();
        let groups = Group::collect(&graph, &declared);
        let induced = groups[0].to_graph(&graph);

        assert_eq!(induced.node_count(), 2);
        assert_eq!(induced.edge_count(), 1);
    }
}
