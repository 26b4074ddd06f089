//! Directions orchestration: internal graph first, external provider as
//! fallback.
//!
//! [`DirectionsEngine::direction`] is the single entry point a host exposes
//! to its UI. Internal routing failures are deliberately soft: any reason
//! the campus graphs cannot answer (points outside a campus, endpoints off
//! the graph, no path, dataset errors) falls through to the external
//! provider, and only the provider's own failure surfaces to the caller.

pub mod mapbox;

use geo::Point;
use geojson::Feature;
use log::{debug, warn};
use serde_json::json;

use crate::Error;
use crate::campus::campus_from_point;
use crate::routing::RouteSource;
use crate::service::CampusRoutingService;

pub use mapbox::{ExternalRoute, MapboxDirections};

/// A renderable direction, whichever engine produced it.
#[derive(Debug, Clone)]
pub struct Direction {
    /// `LineString` feature with `source`, `distance` and `estimatedTime`
    /// properties.
    pub feature: Feature,
    /// Whole minutes.
    pub duration: u32,
    /// Whole metres.
    pub distance: u32,
    pub source: RouteSource,
}

/// Ties the campus routing service to the external provider.
pub struct DirectionsEngine {
    service: CampusRoutingService,
    provider: MapboxDirections,
}

impl DirectionsEngine {
    pub fn new(service: CampusRoutingService, provider: MapboxDirections) -> Self {
        Self { service, provider }
    }

    pub fn service(&self) -> &CampusRoutingService {
        &self.service
    }

    /// Best walking direction between two points.
    ///
    /// When both points fall inside the same campus the internal graph is
    /// tried first; otherwise, or when it cannot answer, the external
    /// provider is queried with both walkway-bias variants.
    ///
    /// # Errors
    ///
    /// Only when the external provider is needed and fails.
    pub fn direction(&self, start: Point<f64>, end: Point<f64>) -> Result<Direction, Error> {
        if let Some(campus) = shared_campus(start, end) {
            match self.service.find_internal_route(start, end, campus) {
                Ok(Some(route)) => match route.to_feature(RouteSource::InternalGraph) {
                    Ok(feature) => {
                        return Ok(Direction {
                            feature,
                            duration: route.estimated_time,
                            distance: route.total_distance.floor() as u32,
                            source: RouteSource::InternalGraph,
                        });
                    }
                    Err(e) => warn!("Internal route feature conversion failed: {e}"),
                },
                Ok(None) => debug!("Internal graph cannot serve this {campus} request"),
                Err(e) => warn!("Internal routing failed for {campus}: {e}"),
            }
        }

        let route = self.provider.optimal_direction(start, end)?;
        let feature = external_feature(&route)?;
        Ok(Direction {
            feature,
            duration: route.duration_min,
            distance: route.distance_m,
            source: RouteSource::MapboxApi,
        })
    }
}

/// The campus containing both points, when they share one.
fn shared_campus(start: Point<f64>, end: Point<f64>) -> Option<&'static str> {
    let start_campus = campus_from_point(start)?;
    let end_campus = campus_from_point(end)?;
    (start_campus == end_campus).then_some(start_campus)
}

fn external_feature(route: &ExternalRoute) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": route.geometry,
        "properties": {
            "source": RouteSource::MapboxApi.as_str(),
            "distance": route.distance_m,
            "estimatedTime": route.duration_min,
        }
    });
    Feature::from_json_value(value).map_err(|e| Error::GeoJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::{CampusGraphData, EdgeRecord, NodeRecord};
    use crate::model::{EdgeKind, NodeKind};
    use std::collections::HashMap;

    fn sj_service() -> CampusRoutingService {
        let data = CampusGraphData {
            nodes: vec![
                NodeRecord {
                    id: "a".into(),
                    coordinates: [-70.6105, -33.4995],
                    name: None,
                    kind: NodeKind::PathIntersection,
                    campus: "SJ".into(),
                },
                NodeRecord {
                    id: "b".into(),
                    coordinates: [-70.6105, -33.499],
                    name: None,
                    kind: NodeKind::PathIntersection,
                    campus: "SJ".into(),
                },
            ],
            edges: vec![EdgeRecord {
                id: "ab".into(),
                from: "a".into(),
                to: "b".into(),
                weight: 55.0,
                kind: EdgeKind::Walkway,
                bidirectional: true,
                user_proposed: false,
                difficulty: None,
            }],
        };
        CampusRoutingService::new(HashMap::from([("SJ".to_string(), data)]))
    }

    /// Provider pointing at a dead endpoint; any request against it fails.
    fn dead_provider() -> MapboxDirections {
        MapboxDirections::new("test-token")
            .unwrap()
            .with_base_url("http://127.0.0.1:1/walking")
    }

    #[test]
    fn shared_campus_requires_both_points_inside() {
        let inside = Point::new(-70.6105, -33.4995);
        let outside = Point::new(-80.0, -33.0);
        assert_eq!(shared_campus(inside, inside), Some("SJ"));
        assert_eq!(shared_campus(inside, outside), None);
        // Lo Contador and San Joaquin are different campuses.
        let lo_contador = Point::new(-70.615, -33.42);
        assert_eq!(shared_campus(inside, lo_contador), None);
    }

    #[test]
    fn same_campus_points_use_the_internal_graph() {
        let engine = DirectionsEngine::new(sj_service(), dead_provider());
        let direction = engine
            .direction(
                Point::new(-70.6105, -33.4995),
                Point::new(-70.6105, -33.499),
            )
            .unwrap();

        assert_eq!(direction.source, RouteSource::InternalGraph);
        assert_eq!(direction.duration, 1);
        assert_eq!(direction.distance, 55);
        let properties = direction.feature.properties.unwrap();
        assert_eq!(properties["source"], "internal_graph");
    }

    #[test]
    fn external_feature_carries_the_provider_tag() {
        let route = ExternalRoute {
            geometry: geojson::Geometry::new(geojson::Value::LineString(vec![
                vec![-70.61, -33.49],
                vec![-70.60, -33.50],
            ])),
            duration_min: 12,
            distance_m: 940,
        };
        let feature = external_feature(&route).unwrap();
        let properties = feature.properties.unwrap();
        assert_eq!(properties["source"], "mapbox_api");
        assert_eq!(properties["estimatedTime"], 12);
        assert_eq!(properties["distance"], 940);
    }
}
