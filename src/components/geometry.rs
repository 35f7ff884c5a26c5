/// A (longitude, latitude) pair in degrees, as it appears in a GeoJSON position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate2D {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate2D {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn midpoint(&self, other: &Coordinate2D) -> Coordinate2D {
        Coordinate2D {
            lon: (self.lon + other.lon) / 2.0,
            lat: (self.lat + other.lat) / 2.0,
        }
    }
}

impl From<[f64; 2]> for Coordinate2D {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Coordinate2D),
    MultiPoint(Vec<Coordinate2D>),
    LineString(Vec<Coordinate2D>),
    // outer ring first, then holes
    Polygon(Vec<Vec<Coordinate2D>>),
    MultiLineString(Vec<Vec<Coordinate2D>>),
    MultiPolygon(Vec<Vec<Vec<Coordinate2D>>>),
}

impl Geometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// how many primitives this geometry turns into once projected
    pub fn primitive_count(&self) -> usize {
        match self {
            Geometry::Point(_) | Geometry::LineString(_) => 1,
            Geometry::MultiPoint(points) => points.len(),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => rings.len(),
            Geometry::MultiPolygon(polygons) => polygons.iter().map(Vec::len).sum(),
        }
    }
}

/// The accepted top level container kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoDocument {
    /// `None` when the feature's geometry is `null`
    Feature(Option<Geometry>),
    FeatureCollection(Vec<Option<Geometry>>),
    GeometryCollection(Vec<Geometry>),
}

impl GeoDocument {
    /// Flattens the container into its geometries, in document order.
    /// Null feature geometries are left out.
    pub fn geometries(&self) -> Vec<&Geometry> {
        match self {
            GeoDocument::Feature(geometry) => geometry.iter().collect(),
            GeoDocument::FeatureCollection(features) => features.iter().flatten().collect(),
            GeoDocument::GeometryCollection(geometries) => geometries.iter().collect(),
        }
    }
}
