//! Static dataset loading and validated graph construction.
//!
//! Campus graphs ship as one JSON document mapping campus codes to node and
//! edge record lists. Records are deserialized into raw types first and only
//! become a [`CampusGraph`] after validation, so malformed datasets fail at
//! load time instead of surfacing later as silently unreachable nodes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use geo::Point;
use itertools::Itertools;
use log::info;
use serde::Deserialize;

use crate::Error;
use crate::model::{CampusEdge, CampusGraph, CampusNode, Difficulty, EdgeKind, NodeKind};

/// Raw node record as it appears in the dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    /// `[lon, lat]`
    pub coordinates: [f64; 2],
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub campus: String,
}

/// Raw edge record as it appears in the dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub id: String,
    pub from: String,
    pub to: String,
    pub weight: f64,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub bidirectional: bool,
    #[serde(rename = "userProposed", default)]
    pub user_proposed: bool,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

/// Node and edge records for one campus.
#[derive(Debug, Clone, Deserialize)]
pub struct CampusGraphData {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
struct DatasetDocument {
    graphs: HashMap<String, CampusGraphData>,
}

/// Parse a dataset document of the form `{ "graphs": { "SJ": {...}, ... } }`.
///
/// # Errors
///
/// Returns `Error::InvalidData` when the document does not match the schema.
pub fn load_dataset(json: &str) -> Result<HashMap<String, CampusGraphData>, Error> {
    let document: DatasetDocument = serde_json::from_str(json)
        .map_err(|e| Error::InvalidData(format!("malformed graph dataset: {e}")))?;
    Ok(document.graphs)
}

/// Read and parse a dataset document from disk.
///
/// # Errors
///
/// I/O failures and schema mismatches.
pub fn load_dataset_file(path: impl AsRef<Path>) -> Result<HashMap<String, CampusGraphData>, Error> {
    let json = fs::read_to_string(path)?;
    load_dataset(&json)
}

/// Build a validated routing graph for one campus.
///
/// # Errors
///
/// Rejects duplicate node or edge ids, edges referencing nodes absent from
/// the node list, and negative edge weights. Nodes are never auto-created
/// from edge references.
pub fn build_graph(campus: &str, data: &CampusGraphData) -> Result<CampusGraph, Error> {
    if let Some(node) = data.nodes.iter().duplicates_by(|n| &n.id).next() {
        return Err(Error::InvalidData(format!(
            "campus {campus} declares duplicate node id {}",
            node.id
        )));
    }
    if let Some(edge) = data.edges.iter().duplicates_by(|e| &e.id).next() {
        return Err(Error::InvalidData(format!(
            "campus {campus} declares duplicate edge id {}",
            edge.id
        )));
    }

    let mut graph = CampusGraph::new();
    for record in &data.nodes {
        graph.add_node(CampusNode {
            id: record.id.clone(),
            geometry: Point::new(record.coordinates[0], record.coordinates[1]),
            name: record.name.clone(),
            kind: record.kind,
            campus: record.campus.clone(),
        });
    }
    for record in &data.edges {
        graph.add_edge(CampusEdge {
            id: record.id.clone(),
            from: record.from.clone(),
            to: record.to.clone(),
            weight: record.weight,
            kind: record.kind,
            bidirectional: record.bidirectional,
            user_proposed: record.user_proposed,
            difficulty: record.difficulty,
        })?;
    }

    info!(
        "Built graph for campus {campus}: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
