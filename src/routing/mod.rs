//! Shortest-path search and route assembly over a campus graph.

pub mod dijkstra;
mod to_geojson;

use std::fmt;

use serde::Serialize;

pub use dijkstra::shortest_path;

use crate::WALKING_SPEED;
use crate::model::{CampusEdge, CampusNode};

/// Which engine produced a route. Downstream UIs render the two sources
/// distinctly, so the wire names are part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    InternalGraph,
    MapboxApi,
}

impl RouteSource {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteSource::InternalGraph => "internal_graph",
            RouteSource::MapboxApi => "mapbox_api",
        }
    }
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computed walking route through a campus graph.
///
/// `path` is ordered start to end. `edges` holds the graph edges actually
/// traversed; spliced endpoint nodes contribute no edge, so `edges` can be
/// shorter than `path.len() - 1` when real coordinates were attached.
#[derive(Debug, Clone)]
pub struct RouteResult {
    pub path: Vec<CampusNode>,
    /// Total distance in metres, including spliced endpoint legs.
    pub total_distance: f64,
    /// Estimated walking time in whole minutes.
    pub estimated_time: u32,
    pub edges: Vec<CampusEdge>,
}

/// Walking time in whole minutes for a distance in metres, rounded up.
pub fn estimated_minutes(distance: f64) -> u32 {
    (distance / WALKING_SPEED).ceil() as u32
}
