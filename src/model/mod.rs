//! Campus graph data model
//!
//! Contains the node/edge components and the per-campus graph structure
//! used by the routing engine.

pub mod components;
pub mod graph;

pub use components::{CampusEdge, CampusNode, Difficulty, EdgeKind, NodeKind};
pub use graph::CampusGraph;
