//! Routing service facade over the per-campus graphs.
//!
//! [`CampusRoutingService`] owns every campus graph for the life of the
//! process. Construction is cheap; the graphs themselves are built lazily on
//! first use and exactly once, so the service can be created at startup and
//! shared behind an `Arc` by whatever host embeds it.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use geo::Point;
use log::{debug, warn};
use once_cell::sync::OnceCell;

use crate::geometry;
use crate::loading::{self, CampusGraphData};
use crate::model::{CampusEdge, CampusGraph, CampusNode, EdgeKind, NodeKind};
use crate::routing::{self, RouteResult, estimated_minutes};
use crate::{ENDPOINT_SPLICE_DISTANCE, Error, MAX_SNAP_DISTANCE, NODE_CREATION_DISTANCE};

/// External collaborator that records user-proposed edges durably (for
/// example a moderation queue). The in-memory append succeeds regardless of
/// the sink outcome.
pub trait ProposalSink: Send + Sync {
    fn persist_proposed_edge(&self, campus: &str, edge: &CampusEdge) -> Result<(), Error>;
}

/// Outcome of a route proposal.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedEdge {
    pub edge_id: String,
    /// Metres between the two resolved nodes.
    pub weight: f64,
}

/// Facade over the campus graphs: snapping, internal routing and
/// user-proposed edge appends.
pub struct CampusRoutingService {
    /// Raw dataset, consumed by the first successful initialization.
    source: Mutex<Option<HashMap<String, CampusGraphData>>>,
    graphs: OnceCell<RwLock<HashMap<String, CampusGraph>>>,
    proposal_sink: Option<Box<dyn ProposalSink>>,
}

impl CampusRoutingService {
    pub fn new(dataset: HashMap<String, CampusGraphData>) -> Self {
        Self {
            source: Mutex::new(Some(dataset)),
            graphs: OnceCell::new(),
            proposal_sink: None,
        }
    }

    /// Build a service from the JSON dataset document.
    ///
    /// # Errors
    ///
    /// Returns an error when the document does not match the schema. Graph
    /// level validation happens on first use.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(Self::new(loading::load_dataset(json)?))
    }

    /// Build a service from a dataset document on disk.
    ///
    /// # Errors
    ///
    /// I/O failures and schema mismatches.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        Ok(Self::new(loading::load_dataset_file(path)?))
    }

    pub fn with_proposal_sink(mut self, sink: Box<dyn ProposalSink>) -> Self {
        self.proposal_sink = Some(sink);
        self
    }

    /// Build every campus graph now instead of on the first routing call.
    /// Idempotent; concurrent callers share a single build.
    ///
    /// # Errors
    ///
    /// Surfaces dataset validation failures. A failed build leaves the
    /// service uninitialized so a later call reports the same error.
    pub fn initialize(&self) -> Result<(), Error> {
        self.graphs().map(|_| ())
    }

    fn graphs(&self) -> Result<&RwLock<HashMap<String, CampusGraph>>, Error> {
        self.graphs.get_or_try_init(|| {
            let mut source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
            let dataset = source.take().unwrap_or_default();

            let mut built = HashMap::with_capacity(dataset.len());
            let mut failure = None;
            for (campus, data) in &dataset {
                match loading::build_graph(campus, data) {
                    Ok(graph) => {
                        built.insert(campus.clone(), graph);
                    }
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                }
            }
            if let Some(e) = failure {
                // Put the dataset back so retries fail the same way instead
                // of silently routing over nothing.
                *source = Some(dataset);
                return Err(e);
            }
            Ok(RwLock::new(built))
        })
    }

    /// Campus codes that have a graph, sorted for stable output.
    pub fn available_campuses(&self) -> Result<Vec<String>, Error> {
        let graphs = self.graphs()?.read().unwrap_or_else(PoisonError::into_inner);
        let mut campuses: Vec<String> = graphs.keys().cloned().collect();
        campuses.sort();
        Ok(campuses)
    }

    /// Run a closure against one campus graph. `Ok(None)` when the campus
    /// has no graph.
    pub fn with_graph<R>(
        &self,
        campus: &str,
        f: impl FnOnce(&CampusGraph) -> R,
    ) -> Result<Option<R>, Error> {
        let graphs = self.graphs()?.read().unwrap_or_else(PoisonError::into_inner);
        Ok(graphs.get(campus).map(f))
    }

    /// Compute a walking route within one campus.
    ///
    /// Returns `Ok(None)` for every unavailability case (no graph for the
    /// campus, empty graph, either endpoint farther than
    /// [`MAX_SNAP_DISTANCE`] from the graph, no path between the snapped
    /// nodes) so callers can fall back without inspecting the reason. When
    /// an endpoint lies farther than [`ENDPOINT_SPLICE_DISTANCE`] from its
    /// snap node, the caller's literal coordinate is spliced onto the path
    /// as a synthetic node and the gap is added to the total distance.
    ///
    /// # Errors
    ///
    /// Only dataset validation failures from a pending lazy initialization.
    pub fn find_internal_route(
        &self,
        start: Point<f64>,
        end: Point<f64>,
        campus: &str,
    ) -> Result<Option<RouteResult>, Error> {
        let graphs = self.graphs()?.read().unwrap_or_else(PoisonError::into_inner);
        let Some(graph) = graphs.get(campus) else {
            debug!("No graph available for campus: {campus}");
            return Ok(None);
        };

        let Some(((start_node, start_snap), (end_node, end_snap))) =
            graph.nearest_node(start).zip(graph.nearest_node(end))
        else {
            return Ok(None);
        };

        if start_snap > MAX_SNAP_DISTANCE || end_snap > MAX_SNAP_DISTANCE {
            debug!("Start or end point too far from the {campus} graph");
            return Ok(None);
        }

        let Some(mut route) = routing::shortest_path(graph, &start_node.id, &end_node.id) else {
            debug!("No route found in the {campus} graph");
            return Ok(None);
        };

        // Splice the caller's literal coordinates onto the route when they
        // sit meaningfully off the graph.
        if start_snap > ENDPOINT_SPLICE_DISTANCE {
            route
                .path
                .insert(0, synthetic_node("start_point", start, campus));
            route.total_distance += start_snap;
        }
        if end_snap > ENDPOINT_SPLICE_DISTANCE {
            route.path.push(synthetic_node("end_point", end, campus));
            route.total_distance += end_snap;
        }
        route.estimated_time = estimated_minutes(route.total_distance);

        Ok(Some(route))
    }

    /// Whether both points are close enough to one campus graph for
    /// internal routing to be attempted. Performs the snapping checks of
    /// [`CampusRoutingService::find_internal_route`] without the search.
    pub fn is_internal_routing_available(
        &self,
        start: Point<f64>,
        end: Point<f64>,
        campus: &str,
    ) -> Result<bool, Error> {
        let graphs = self.graphs()?.read().unwrap_or_else(PoisonError::into_inner);
        let Some(graph) = graphs.get(campus) else {
            return Ok(false);
        };
        let Some(((_, start_snap), (_, end_snap))) =
            graph.nearest_node(start).zip(graph.nearest_node(end))
        else {
            return Ok(false);
        };
        Ok(start_snap <= MAX_SNAP_DISTANCE && end_snap <= MAX_SNAP_DISTANCE)
    }

    /// Append a user-proposed edge to the in-memory campus graph.
    ///
    /// Endpoints reuse the nearest existing node when it lies within
    /// [`NODE_CREATION_DISTANCE`]; otherwise a new custom node is created at
    /// the caller's coordinates. The edge weight is the great-circle
    /// distance between the two *resolved* nodes, not the raw coordinates.
    /// `Ok(None)` when the campus has no graph.
    ///
    /// # Errors
    ///
    /// Only dataset validation failures from a pending lazy initialization.
    pub fn propose_route(
        &self,
        campus: &str,
        start: Point<f64>,
        end: Point<f64>,
        kind: EdgeKind,
    ) -> Result<Option<ProposedEdge>, Error> {
        let mut graphs = self.graphs()?.write().unwrap_or_else(PoisonError::into_inner);
        let Some(graph) = graphs.get_mut(campus) else {
            return Ok(None);
        };

        let (from_id, from_point) = resolve_or_create_node(graph, campus, start, "start");
        let (to_id, to_point) = resolve_or_create_node(graph, campus, end, "end");

        let weight = geometry::distance(from_point, to_point);
        let edge = CampusEdge {
            id: format!("user_edge_{}", graph.next_user_sequence()),
            from: from_id,
            to: to_id,
            weight,
            kind,
            bidirectional: true,
            user_proposed: true,
            difficulty: None,
        };
        let edge_id = edge.id.clone();
        graph.add_edge(edge.clone())?;

        if let Some(sink) = &self.proposal_sink
            && let Err(e) = sink.persist_proposed_edge(campus, &edge)
        {
            warn!("Failed to persist proposed edge {edge_id}: {e}");
        }

        Ok(Some(ProposedEdge { edge_id, weight }))
    }
}

fn synthetic_node(id: &str, point: Point<f64>, campus: &str) -> CampusNode {
    CampusNode {
        id: id.to_string(),
        geometry: point,
        name: None,
        kind: NodeKind::Custom,
        campus: campus.to_string(),
    }
}

/// Reuse the nearest node within [`NODE_CREATION_DISTANCE`], or mint a new
/// custom node at the requested coordinates.
fn resolve_or_create_node(
    graph: &mut CampusGraph,
    campus: &str,
    point: Point<f64>,
    suffix: &str,
) -> (String, Point<f64>) {
    if let Some((node, snap)) = graph.nearest_node(point)
        && snap <= NODE_CREATION_DISTANCE
    {
        return (node.id.clone(), node.geometry);
    }

    let id = format!("user_node_{}_{suffix}", graph.next_user_sequence());
    graph.add_node(CampusNode {
        id: id.clone(),
        geometry: point,
        name: None,
        kind: NodeKind::Custom,
        campus: campus.to_string(),
    });
    (id, point)
}
