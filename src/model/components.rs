//! Campus graph components - nodes and edges

use geo::Point;
use serde::{Deserialize, Serialize};

/// Role of a node within the campus graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    BuildingEntrance,
    PathIntersection,
    Landmark,
    /// Synthetic nodes: spliced route endpoints and user-proposed points.
    Custom,
}

/// Physical kind of a walkable segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Walkway,
    Stairs,
    Elevator,
    CoveredPath,
    OutdoorPath,
}

/// Accessibility rating of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Campus graph node
#[derive(Debug, Clone)]
pub struct CampusNode {
    pub id: String,
    /// Node coordinates (x = lon, y = lat)
    pub geometry: Point<f64>,
    pub name: Option<String>,
    pub kind: NodeKind,
    /// Campus code the node belongs to
    pub campus: String,
}

/// Campus graph edge (walkable segment)
#[derive(Debug, Clone)]
pub struct CampusEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    /// Traversal cost in metres. Authoritative for path cost; not
    /// recomputed from the endpoint coordinates.
    pub weight: f64,
    pub kind: EdgeKind,
    /// Traversable in both directions when `true`
    pub bidirectional: bool,
    pub user_proposed: bool,
    pub difficulty: Option<Difficulty>,
}

impl CampusEdge {
    /// Node reached by leaving `node_id` over this edge, honouring
    /// directionality. `None` when the edge cannot be traversed from there.
    pub fn neighbour_of(&self, node_id: &str) -> Option<&str> {
        if self.from == node_id {
            Some(&self.to)
        } else if self.bidirectional && self.to == node_id {
            Some(&self.from)
        } else {
            None
        }
    }
}
