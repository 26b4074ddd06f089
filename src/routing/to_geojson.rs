use geo::{Coord, LineString};
use geojson::{Feature, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::Error;
use crate::routing::{RouteResult, RouteSource};

impl RouteResult {
    /// Converts the route to a `GeoJSON` `LineString` feature.
    ///
    /// The `source` property tells downstream renderers which engine
    /// produced the route.
    pub fn to_feature(&self, source: RouteSource) -> Result<Feature, Error> {
        let coords: Vec<Coord<f64>> = self.path.iter().map(|node| node.geometry.into()).collect();
        let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "source": source.as_str(),
                "distance": self.total_distance,
                "estimatedTime": self.estimated_time,
            }
        });

        Feature::from_json_value(value).map_err(|e| Error::GeoJson(e.to_string()))
    }
}
