//! Client for the external walking-directions HTTP API.

use std::time::Duration;

use geo::Point;
use geojson::Geometry;
use log::warn;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{Error, WALKWAY_BIAS};

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/directions/v5/mapbox/walking";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One walking route as returned by the external provider.
#[derive(Debug, Clone)]
pub struct ExternalRoute {
    pub geometry: Geometry,
    /// Whole minutes, rounded down as the provider's clients do.
    pub duration_min: u32,
    /// Whole metres, rounded down.
    pub distance_m: u32,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    geometry: Geometry,
    /// Seconds
    duration: f64,
    /// Metres
    distance: f64,
}

impl From<RouteEntry> for ExternalRoute {
    fn from(entry: RouteEntry) -> Self {
        ExternalRoute {
            geometry: entry.geometry,
            duration_min: (entry.duration / 60.0).floor() as u32,
            distance_m: entry.distance.floor() as u32,
        }
    }
}

/// Blocking client for the provider's walking-directions endpoint.
pub struct MapboxDirections {
    client: Client,
    base_url: String,
    access_token: String,
}

impl MapboxDirections {
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(access_token: impl Into<String>) -> Result<Self, Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
        })
    }

    /// Point the client at a different endpoint (test servers, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_url(&self, start: Point<f64>, end: Point<f64>, walkway_bias: f64) -> String {
        format!(
            "{}/{},{};{},{}?geometries=geojson&steps=true&walkway_bias={}&access_token={}",
            self.base_url,
            start.x(),
            start.y(),
            end.x(),
            end.y(),
            walkway_bias,
            self.access_token
        )
    }

    /// Fetch one route variant with the given walkway bias.
    ///
    /// # Errors
    ///
    /// Non-success HTTP status and an empty `routes` array are both errors;
    /// the orchestrator never retries, it surfaces them to its caller.
    pub fn fetch_direction(
        &self,
        start: Point<f64>,
        end: Point<f64>,
        walkway_bias: f64,
    ) -> Result<ExternalRoute, Error> {
        let response = self
            .client
            .get(self.request_url(start, end, walkway_bias))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Provider(format!(
                "directions request failed with status {status}"
            )));
        }

        let body: DirectionsResponse = response.json()?;
        let route = body.routes.into_iter().next().ok_or(Error::NoRoutes)?;
        Ok(route.into())
    }

    /// Fetch the default and the walkway-biased variant and keep the faster
    /// one. A single failed variant is logged and the other is used; both
    /// failing surfaces the default variant's error.
    ///
    /// # Errors
    ///
    /// Only when both variants fail.
    pub fn optimal_direction(
        &self,
        start: Point<f64>,
        end: Point<f64>,
    ) -> Result<ExternalRoute, Error> {
        let default = self.fetch_direction(start, end, 0.0);
        let biased = self.fetch_direction(start, end, WALKWAY_BIAS);
        pick_optimal(default, biased)
    }
}

fn pick_optimal(
    default: Result<ExternalRoute, Error>,
    biased: Result<ExternalRoute, Error>,
) -> Result<ExternalRoute, Error> {
    match (default, biased) {
        (Ok(default), Ok(biased)) => Ok(if biased.duration_min < default.duration_min {
            biased
        } else {
            default
        }),
        (Ok(default), Err(e)) => {
            warn!("Walkway-biased directions variant failed: {e}");
            Ok(default)
        }
        (Err(e), Ok(biased)) => {
            warn!("Default directions variant failed: {e}");
            Ok(biased)
        }
        (Err(e), Err(_)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(duration_min: u32) -> ExternalRoute {
        ExternalRoute {
            geometry: Geometry::new(geojson::Value::LineString(vec![
                vec![0.0, 0.0],
                vec![0.0, 0.0005],
            ])),
            duration_min,
            distance_m: 100,
        }
    }

    #[test]
    fn parses_a_provider_response() {
        let body = r#"{
            "routes": [
                {
                    "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [0.001, 0.001]]},
                    "duration": 125.0,
                    "distance": 160.7
                }
            ]
        }"#;
        let parsed: DirectionsResponse = serde_json::from_str(body).unwrap();
        let route: ExternalRoute = parsed.routes.into_iter().next().unwrap().into();
        assert_eq!(route.duration_min, 2);
        assert_eq!(route.distance_m, 160);
    }

    #[test]
    fn missing_routes_field_parses_as_empty() {
        let parsed: DirectionsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.routes.is_empty());
    }

    #[test]
    fn picks_the_faster_variant() {
        let chosen = pick_optimal(Ok(route(5)), Ok(route(3))).unwrap();
        assert_eq!(chosen.duration_min, 3);

        // Ties keep the default variant's result.
        let chosen = pick_optimal(Ok(route(4)), Ok(route(4))).unwrap();
        assert_eq!(chosen.duration_min, 4);
    }

    #[test]
    fn survives_one_failed_variant() {
        let chosen = pick_optimal(Err(Error::NoRoutes), Ok(route(7))).unwrap();
        assert_eq!(chosen.duration_min, 7);
        let chosen = pick_optimal(Ok(route(6)), Err(Error::NoRoutes)).unwrap();
        assert_eq!(chosen.duration_min, 6);
    }

    #[test]
    fn both_variants_failing_is_an_error() {
        let result = pick_optimal(
            Err(Error::Provider("boom".into())),
            Err(Error::NoRoutes),
        );
        assert!(matches!(result, Err(Error::Provider(_))));
    }

    #[test]
    fn request_url_carries_bias_and_token() {
        let client = MapboxDirections::new("secret")
            .unwrap()
            .with_base_url("http://localhost:9/walking");
        let url = client.request_url(Point::new(-70.61, -33.49), Point::new(-70.60, -33.50), -0.2);
        assert!(url.starts_with("http://localhost:9/walking/-70.61,-33.49;-70.6,-33.5?"));
        assert!(url.contains("walkway_bias=-0.2"));
        assert!(url.contains("access_token=secret"));
        assert!(url.contains("geometries=geojson"));
    }
}
