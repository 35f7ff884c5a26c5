use std::str::FromStr;

use geojson::{GeoJson, Position};
use serde_json::Value;

use crate::{
    components::geometry::{Coordinate2D, GeoDocument, Geometry},
    error::ProjectError,
};

pub struct DocumentSystem {}

impl DocumentSystem {
    pub fn parse(json: &Value) -> Result<GeoDocument, ProjectError> {
        let geojson = GeoJson::from_json_value(json.clone()).map_err(invalid)?;
        DocumentSystem::from_geojson(geojson)
    }

    /// Only Feature, FeatureCollection and GeometryCollection are accepted
    /// at the top level.
    pub fn from_geojson(geojson: GeoJson) -> Result<GeoDocument, ProjectError> {
        match geojson {
            GeoJson::Feature(feature) => Ok(GeoDocument::Feature(
                feature
                    .geometry
                    .map(|g| DocumentSystem::from_geojson_geometry(&g.value))
                    .transpose()?,
            )),
            GeoJson::FeatureCollection(collection) => {
                let geometries = collection
                    .features
                    .into_iter()
                    .map(|f| {
                        f.geometry
                            .map(|g| DocumentSystem::from_geojson_geometry(&g.value))
                            .transpose()
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(GeoDocument::FeatureCollection(geometries))
            }
            GeoJson::Geometry(geojson::Geometry {
                value: geojson::Value::GeometryCollection(geometries),
                ..
            }) => {
                let geometries = geometries
                    .iter()
                    .map(|g| DocumentSystem::from_geojson_geometry(&g.value))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(GeoDocument::GeometryCollection(geometries))
            }
            GeoJson::Geometry(_) => Err(ProjectError::invalid_document(
                "a bare geometry is not a Feature, FeatureCollection or GeometryCollection",
            )),
        }
    }

    pub fn parse_geometry(json: &Value) -> Result<Geometry, ProjectError> {
        let geometry = geojson::Geometry::from_json_value(json.clone()).map_err(invalid)?;
        DocumentSystem::from_geojson_geometry(&geometry.value)
    }

    pub fn from_geojson_geometry(value: &geojson::Value) -> Result<Geometry, ProjectError> {
        let geometry = match value {
            geojson::Value::Point(p) => Geometry::Point(position(p)?),
            geojson::Value::MultiPoint(points) => Geometry::MultiPoint(positions(points)?),
            geojson::Value::LineString(line) => Geometry::LineString(positions(line)?),
            geojson::Value::Polygon(polygon) => Geometry::Polygon(rings(polygon)?),
            geojson::Value::MultiLineString(lines) => Geometry::MultiLineString(rings(lines)?),
            geojson::Value::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons
                    .iter()
                    .map(|polygon| rings(polygon))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            geojson::Value::GeometryCollection(_) => {
                return Err(ProjectError::invalid_document(
                    "nested GeometryCollection is not a drawable geometry",
                ))
            }
        };

        Ok(geometry)
    }
}

impl GeoDocument {
    pub fn from_value(json: &Value) -> Result<Self, ProjectError> {
        DocumentSystem::parse(json)
    }
}

impl FromStr for GeoDocument {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let geojson: GeoJson = s.parse().map_err(invalid)?;
        DocumentSystem::from_geojson(geojson)
    }
}

impl TryFrom<&Value> for GeoDocument {
    type Error = ProjectError;

    fn try_from(json: &Value) -> Result<Self, Self::Error> {
        DocumentSystem::parse(json)
    }
}

fn invalid(err: geojson::Error) -> ProjectError {
    ProjectError::invalid_document(err.to_string())
}

// positions may carry an altitude, only lon/lat are read
fn position(p: &Position) -> Result<Coordinate2D, ProjectError> {
    match p.as_slice() {
        [lon, lat, ..] => Ok(Coordinate2D::new(*lon, *lat)),
        _ => Err(ProjectError::invalid_document(format!(
            "position {p:?} needs at least two numbers"
        ))),
    }
}

fn positions(ps: &[Position]) -> Result<Vec<Coordinate2D>, ProjectError> {
    ps.iter().map(position).collect()
}

fn rings(rs: &[Vec<Position>]) -> Result<Vec<Vec<Coordinate2D>>, ProjectError> {
    rs.iter().map(|ring| positions(ring)).collect()
}
