//! The mutable directed multigraph rules are matched against and rewritten
//! into.
//!
//! The graph owns its nodes and edges and maintains per-node in/out edge
//! indices so adjacency queries stay O(1) amortized instead of scanning the
//! edge list. Edge queries hand out owned copies; callers cannot reach the
//! internal index storage.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::warn;

use crate::data::GraphData;
use crate::edge::{Edge, EdgeId};
use crate::node::{Node, NodeId};
use crate::symbol::Symbol;

/// A directed multigraph with symbol-labeled nodes and edges.
///
/// Invariants:
/// - every edge's endpoints are members of the node set;
/// - removing a node removes all edges touching it first;
/// - node iteration order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    edges_out: HashMap<NodeId, Vec<EdgeId>>,
    edges_in: HashMap<NodeId, Vec<EdgeId>>,
    next_edge_id: u64,
}

impl Graph {
    /// An empty graph.
    pub fn new() -> Self {
        Graph::default()
    }

    /// Deep-copies a serialized template into a live graph.
    ///
    /// Every template node gets a freshly minted [`NodeId`]; template edges
    /// whose endpoint ids do not resolve are skipped.
    pub fn instantiate(data: &GraphData) -> Graph {
        let mut graph = Graph::new();
        let mut by_template_id: HashMap<&str, NodeId> = HashMap::new();

        for node_data in &data.nodes {
            let mut node = Node::new(node_data.symbol.clone(), node_data.position);
            node.slot = node_data.slot;
            node.group = node_data.group.clone();
            node.exact_input = node_data.exact_input;
            node.exact_output = node_data.exact_output;

            by_template_id.insert(node_data.id.as_str(), node.id());
            graph.add_node(node);
        }

        for edge_data in &data.edges {
            let (Some(&start), Some(&end)) = (
                by_template_id.get(edge_data.start.as_str()),
                by_template_id.get(edge_data.end.as_str()),
            ) else {
                warn!(
                    graph = %data.id,
                    start = %edge_data.start,
                    end = %edge_data.end,
                    "skipping template edge with unresolved endpoint"
                );
                continue;
            };

            graph.add_edge(start, end, edge_data.symbol.clone());
        }

        graph
    }

    // ---- nodes ----

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Looks a node up by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable access to a node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Whether `id` is a member of this graph.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Inserts a node and returns its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id();
        self.edges_out.entry(id).or_default();
        self.edges_in.entry(id).or_default();
        self.nodes.insert(id, node);
        id
    }

    /// Removes a node, cascading removal of every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) {
        let touching: Vec<EdgeId> = self.edge_ids_with(id);
        for edge_id in touching {
            self.remove_edge_id(edge_id);
        }

        self.nodes.shift_remove(&id);
        self.edges_out.remove(&id);
        self.edges_in.remove(&id);
    }

    // ---- edges ----

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Looks an edge up by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// All edges with their ids, in insertion order.
    pub fn edges_with_ids(&self) -> Vec<(EdgeId, Edge)> {
        self.edges.iter().map(|(id, e)| (*id, e.clone())).collect()
    }

    /// Adds a directed edge. Returns `false` (and leaves the graph
    /// untouched) when either endpoint is not a member.
    pub fn add_edge(&mut self, start: NodeId, end: NodeId, symbol: Symbol) -> bool {
        if !self.contains_node(start) || !self.contains_node(end) {
            return false;
        }

        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;

        self.edges.insert(id, Edge::new(start, end, symbol));
        self.edges_out.entry(start).or_default().push(id);
        self.edges_in.entry(end).or_default().push(id);
        true
    }

    /// Removes the edge with the given id.
    pub fn remove_edge_id(&mut self, id: EdgeId) {
        let Some(edge) = self.edges.shift_remove(&id) else {
            return;
        };

        if let Some(out) = self.edges_out.get_mut(&edge.start) {
            out.retain(|&e| e != id);
        }
        if let Some(inc) = self.edges_in.get_mut(&edge.end) {
            inc.retain(|&e| e != id);
        }
    }

    /// Removes the first edge structurally equal to `edge`, if any.
    pub fn remove_edge(&mut self, edge: &Edge) {
        let found = self.edges.iter().find(|(_, e)| *e == edge).map(|(id, _)| *id);
        if let Some(id) = found {
            self.remove_edge_id(id);
        }
    }

    /// Rewrites the symbol of an existing edge in place.
    pub fn set_edge_symbol(&mut self, id: EdgeId, symbol: Symbol) {
        if let Some(edge) = self.edges.get_mut(&id) {
            edge.symbol = symbol;
        }
    }

    // ---- adjacency queries ----

    /// Outgoing edges of `node` (owned copies).
    pub fn edges_from(&self, node: NodeId) -> Vec<Edge> {
        self.edges_out
            .get(&node)
            .into_iter()
            .flatten()
            .filter_map(|id| self.edges.get(id).cloned())
            .collect()
    }

    /// Incoming edges of `node` (owned copies).
    pub fn edges_to(&self, node: NodeId) -> Vec<Edge> {
        self.edges_in
            .get(&node)
            .into_iter()
            .flatten()
            .filter_map(|id| self.edges.get(id).cloned())
            .collect()
    }

    /// All edges touching `node`, outgoing first.
    pub fn edges_with(&self, node: NodeId) -> Vec<Edge> {
        let mut edges = self.edges_from(node);
        edges.extend(self.edges_to(node));
        edges
    }

    /// Ids of all edges touching `node`, outgoing first.
    pub fn edge_ids_with(&self, node: NodeId) -> Vec<EdgeId> {
        let mut ids: Vec<EdgeId> = self
            .edges_out
            .get(&node)
            .into_iter()
            .flatten()
            .copied()
            .collect();
        // Self-loops appear in both indices; keep one occurrence.
        for id in self.edges_in.get(&node).into_iter().flatten() {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }

    /// Distinct predecessors of `node`, in first-edge order.
    pub fn neighbours_in(&self, node: NodeId) -> Vec<NodeId> {
        let mut seen = Vec::new();
        for edge in self.edges_to(node) {
            if !seen.contains(&edge.start) {
                seen.push(edge.start);
            }
        }
        seen
    }

    /// Distinct successors of `node`, in first-edge order.
    pub fn neighbours_out(&self, node: NodeId) -> Vec<NodeId> {
        let mut seen = Vec::new();
        for edge in self.edges_from(node) {
            if !seen.contains(&edge.end) {
                seen.push(edge.end);
            }
        }
        seen
    }

    /// Whether at least one edge runs from `start` to `end`.
    pub fn is_edge(&self, start: NodeId, end: NodeId) -> bool {
        self.edges_out
            .get(&start)
            .is_some_and(|ids| ids.iter().any(|id| self.edges[id].end == end))
    }

    /// Whether the graph contains an edge structurally equal to `edge`.
    pub fn has_similar_edge(&self, edge: &Edge) -> bool {
        self.edges.values().any(|e| e == edge)
    }

    // ---- substitution support ----

    /// Resets every node's correlation slot. Slots are single-use per
    /// substitution step.
    pub fn clear_slots(&mut self) {
        for node in self.nodes.values_mut() {
            node.slot = None;
        }
    }
}
