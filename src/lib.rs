//! Graph-based walking directions for university campuses.
//!
//! Each campus is modelled as a small graph of walkways, stairs and
//! elevators. Routing snaps the caller's coordinates onto the graph, runs a
//! shortest-path search and splices the real endpoints back onto the result.
//! When a pair of points cannot be served by a campus graph, the
//! [`directions`] orchestrator falls back to an external walking-directions
//! provider.

pub mod campus;
pub mod directions;
pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod service;

pub use error::Error;

/// Assumed pedestrian speed in metres per minute, used to derive the
/// estimated travel time from a route's total distance.
pub const WALKING_SPEED: f64 = 80.0;

/// Maximum distance in metres between a requested point and its nearest
/// graph node before internal routing is considered unreliable.
pub const MAX_SNAP_DISTANCE: f64 = 200.0;

/// Distance in metres beyond which the caller's literal coordinates are
/// spliced onto the route as synthetic endpoint nodes.
pub const ENDPOINT_SPLICE_DISTANCE: f64 = 10.0;

/// Distance in metres beyond which a route proposal creates a new node
/// instead of reusing the nearest existing one.
pub const NODE_CREATION_DISTANCE: f64 = 50.0;

/// Walkway bias passed to the external provider for the second route
/// variant (negative values prefer walkways).
pub const WALKWAY_BIAS: f64 = -0.2;
