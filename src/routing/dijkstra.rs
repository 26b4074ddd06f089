//! Dijkstra search over a campus graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashMap;

use crate::model::CampusGraph;
use crate::routing::{RouteResult, estimated_minutes};

#[derive(Copy, Clone)]
struct State<'a> {
    cost: f64,
    node: &'a str,
}

impl Eq for State<'_> {}

impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm between two node ids, honouring edge directionality.
///
/// Returns `None` when either id is unknown or the end node is unreachable
/// from the start. Routing a node to itself yields a zero-length,
/// single-node path. The predecessor map records the edge id used during
/// relaxation, so with parallel edges the reported `edges` are exactly the
/// ones whose weights formed `total_distance`.
pub fn shortest_path(graph: &CampusGraph, start_id: &str, end_id: &str) -> Option<RouteResult> {
    let start_node = graph.node(start_id)?;
    let end_node = graph.node(end_id)?;
    // Rebind onto graph-owned ids so every key below borrows from the graph.
    let start_id = start_node.id.as_str();
    let end_id = end_node.id.as_str();

    if start_id == end_id {
        return Some(RouteResult {
            path: vec![start_node.clone()],
            total_distance: 0.0,
            estimated_time: 0,
            edges: Vec::new(),
        });
    }

    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<&str, f64> = HashMap::with_capacity(estimated_nodes);
    // node -> (previous node, edge id used to reach it)
    let mut predecessors: HashMap<&str, (&str, &str)> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start_id,
    });
    distances.insert(start_id, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        if node == end_id {
            break;
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(node)
            && cost > best
        {
            continue;
        }

        // Examine neighbours reachable over the node's edges
        for edge_id in graph.connected_edges(node) {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let Some(next) = edge.neighbour_of(node) else {
                continue;
            };
            let next_cost = cost + edge.weight;

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, (node, edge_id.as_str()));
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, (node, edge_id.as_str()));
                    }
                }
            }
        }
    }

    let total_distance = *distances.get(end_id)?;

    // Follow predecessors backward from the end node
    let mut path = Vec::new();
    let mut edges = Vec::new();
    let mut current = end_id;
    while current != start_id {
        path.push(graph.node(current)?.clone());
        let &(prev, edge_id) = predecessors.get(current)?;
        edges.push(graph.edge(edge_id)?.clone());
        current = prev;
    }
    path.push(start_node.clone());
    path.reverse();
    edges.reverse();

    Some(RouteResult {
        path,
        total_distance,
        estimated_time: estimated_minutes(total_distance),
        edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CampusEdge, CampusNode, EdgeKind, NodeKind};
    use geo::Point;

    fn node(id: &str) -> CampusNode {
        CampusNode {
            id: id.into(),
            geometry: Point::new(0.0, 0.0),
            name: None,
            kind: NodeKind::PathIntersection,
            campus: "SJ".into(),
        }
    }

    fn edge(id: &str, from: &str, to: &str, weight: f64, bidirectional: bool) -> CampusEdge {
        CampusEdge {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            weight,
            kind: EdgeKind::Walkway,
            bidirectional,
            user_proposed: false,
            difficulty: None,
        }
    }

    fn triangle() -> CampusGraph {
        // a-b (40) + b-c (40) is cheaper than the direct a-c (100)
        let mut graph = CampusGraph::new();
        for id in ["a", "b", "c"] {
            graph.add_node(node(id));
        }
        graph.add_edge(edge("ab", "a", "b", 40.0, true)).unwrap();
        graph.add_edge(edge("bc", "b", "c", 40.0, true)).unwrap();
        graph.add_edge(edge("ac", "a", "c", 100.0, true)).unwrap();
        graph
    }

    #[test]
    fn takes_the_cheaper_two_hop_path() {
        let route = shortest_path(&triangle(), "a", "c").unwrap();
        let ids: Vec<&str> = route.path.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(route.total_distance, 80.0);
        assert_eq!(route.estimated_time, 1);
        assert_eq!(route.edges.len(), 2);
    }

    #[test]
    fn one_way_edges_are_not_traversed_backwards() {
        let mut graph = CampusGraph::new();
        graph.add_node(node("x"));
        graph.add_node(node("y"));
        graph.add_edge(edge("xy", "x", "y", 10.0, false)).unwrap();

        assert!(shortest_path(&graph, "x", "y").is_some());
        assert!(shortest_path(&graph, "y", "x").is_none());
    }

    #[test]
    fn same_node_is_a_zero_length_path() {
        let route = shortest_path(&triangle(), "b", "b").unwrap();
        assert_eq!(route.path.len(), 1);
        assert_eq!(route.path[0].id, "b");
        assert_eq!(route.total_distance, 0.0);
        assert_eq!(route.estimated_time, 0);
        assert!(route.edges.is_empty());
    }

    #[test]
    fn unreachable_end_returns_none() {
        let mut graph = triangle();
        graph.add_node(node("island"));
        assert!(shortest_path(&graph, "a", "island").is_none());
    }

    #[test]
    fn unknown_node_returns_none() {
        assert!(shortest_path(&triangle(), "a", "nope").is_none());
    }

    #[test]
    fn parallel_edges_report_the_one_actually_relaxed() {
        let mut graph = CampusGraph::new();
        graph.add_node(node("a"));
        graph.add_node(node("b"));
        graph.add_edge(edge("slow", "a", "b", 100.0, true)).unwrap();
        graph.add_edge(edge("fast", "a", "b", 30.0, true)).unwrap();

        let route = shortest_path(&graph, "a", "b").unwrap();
        assert_eq!(route.total_distance, 30.0);
        assert_eq!(route.edges.len(), 1);
        assert_eq!(route.edges[0].id, "fast");
    }
}
