//! Per-campus routing graph keyed by node and edge identifiers.

use std::collections::HashMap;

use geo::Point;

use crate::Error;
use crate::geometry;
use crate::model::{CampusEdge, CampusNode};

/// Walkable graph for a single campus.
///
/// The adjacency index is the only traversal structure: for every node it
/// lists the edge ids leaving it, honouring directionality. All mutation
/// goes through [`CampusGraph::add_node`] and [`CampusGraph::add_edge`],
/// which keep that index consistent.
#[derive(Debug, Clone, Default)]
pub struct CampusGraph {
    nodes: HashMap<String, CampusNode>,
    edges: HashMap<String, CampusEdge>,
    adjacency: HashMap<String, Vec<String>>,
    /// Monotonic sequence for ids of user-proposed nodes and edges.
    user_sequence: u64,
}

impl CampusGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&CampusNode> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&CampusEdge> {
        self.edges.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CampusNode> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Edge ids traversable from `node_id`.
    pub fn connected_edges(&self, node_id: &str) -> &[String] {
        self.adjacency.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Insert a node and seed its adjacency entry. Replacing an existing id
    /// keeps the previous adjacency list.
    pub fn add_node(&mut self, node: CampusNode) {
        self.adjacency.entry(node.id.clone()).or_default();
        self.nodes.insert(node.id.clone(), node);
    }

    /// Insert an edge and register it in the adjacency index: always under
    /// `from`, and under `to` as well when the edge is bidirectional.
    ///
    /// # Errors
    ///
    /// Rejects edges whose endpoints are not present in the graph or whose
    /// weight is negative, so the adjacency index can never dangle.
    pub fn add_edge(&mut self, edge: CampusEdge) -> Result<(), Error> {
        if !self.nodes.contains_key(&edge.from) {
            return Err(Error::InvalidData(format!(
                "edge {} references missing node {}",
                edge.id, edge.from
            )));
        }
        if !self.nodes.contains_key(&edge.to) {
            return Err(Error::InvalidData(format!(
                "edge {} references missing node {}",
                edge.id, edge.to
            )));
        }
        if edge.weight < 0.0 {
            return Err(Error::InvalidData(format!(
                "edge {} has negative weight {}",
                edge.id, edge.weight
            )));
        }

        self.adjacency
            .entry(edge.from.clone())
            .or_default()
            .push(edge.id.clone());
        if edge.bidirectional {
            self.adjacency
                .entry(edge.to.clone())
                .or_default()
                .push(edge.id.clone());
        }
        self.edges.insert(edge.id.clone(), edge);
        Ok(())
    }

    /// Node closest to `point` by great-circle distance, with the snap
    /// distance in metres. `None` only for an empty graph; ties resolve to
    /// whichever node is scanned first.
    pub fn nearest_node(&self, point: Point<f64>) -> Option<(&CampusNode, f64)> {
        let mut closest: Option<(&CampusNode, f64)> = None;
        for node in self.nodes.values() {
            let d = geometry::distance(point, node.geometry);
            if closest.as_ref().is_none_or(|(_, best)| d < *best) {
                closest = Some((node, d));
            }
        }
        closest
    }

    /// Next value of the per-graph sequence used to mint ids for
    /// user-proposed nodes and edges.
    pub(crate) fn next_user_sequence(&mut self) -> u64 {
        self.user_sequence += 1;
        self.user_sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeKind, NodeKind};

    fn node(id: &str, lon: f64, lat: f64) -> CampusNode {
        CampusNode {
            id: id.into(),
            geometry: Point::new(lon, lat),
            name: None,
            kind: NodeKind::PathIntersection,
            campus: "SJ".into(),
        }
    }

    fn edge(id: &str, from: &str, to: &str, bidirectional: bool) -> CampusEdge {
        CampusEdge {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            weight: 25.0,
            kind: EdgeKind::Walkway,
            bidirectional,
            user_proposed: false,
            difficulty: None,
        }
    }

    #[test]
    fn bidirectional_edge_registers_on_both_endpoints() {
        let mut graph = CampusGraph::new();
        graph.add_node(node("a", 0.0, 0.0));
        graph.add_node(node("b", 0.0, 0.0005));
        graph.add_edge(edge("e1", "a", "b", true)).unwrap();

        assert_eq!(graph.connected_edges("a"), ["e1"]);
        assert_eq!(graph.connected_edges("b"), ["e1"]);
    }

    #[test]
    fn one_way_edge_registers_only_on_origin() {
        let mut graph = CampusGraph::new();
        graph.add_node(node("a", 0.0, 0.0));
        graph.add_node(node("b", 0.0, 0.0005));
        graph.add_edge(edge("e1", "a", "b", false)).unwrap();

        assert_eq!(graph.connected_edges("a"), ["e1"]);
        assert!(graph.connected_edges("b").is_empty());
    }

    #[test]
    fn edge_with_missing_endpoint_is_rejected() {
        let mut graph = CampusGraph::new();
        graph.add_node(node("a", 0.0, 0.0));
        let err = graph.add_edge(edge("e1", "a", "ghost", true)).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.connected_edges("a").is_empty());
    }

    #[test]
    fn nearest_node_on_empty_graph_is_none() {
        let graph = CampusGraph::new();
        assert!(graph.nearest_node(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn nearest_node_minimises_distance() {
        let mut graph = CampusGraph::new();
        graph.add_node(node("far", 0.0, 0.01));
        graph.add_node(node("near", 0.0, 0.0001));

        let (best, snap) = graph.nearest_node(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(best.id, "near");
        assert!(snap < 15.0);
    }
}
