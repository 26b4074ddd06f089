//! Convenience re-exports of the crate's public API.

pub use crate::campus::{campus_from_point, entry_point};
pub use crate::directions::{Direction, DirectionsEngine, ExternalRoute, MapboxDirections};
pub use crate::error::Error;
pub use crate::geometry::distance;
pub use crate::loading::{
    CampusGraphData, EdgeRecord, NodeRecord, build_graph, load_dataset, load_dataset_file,
};
pub use crate::model::{
    CampusEdge, CampusGraph, CampusNode, Difficulty, EdgeKind, NodeKind,
};
pub use crate::routing::{RouteResult, RouteSource, estimated_minutes, shortest_path};
pub use crate::service::{CampusRoutingService, ProposalSink, ProposedEdge};
pub use crate::{
    ENDPOINT_SPLICE_DISTANCE, MAX_SNAP_DISTANCE, NODE_CREATION_DISTANCE, WALKING_SPEED,
    WALKWAY_BIAS,
};
