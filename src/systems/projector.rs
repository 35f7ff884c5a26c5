use std::f64::consts::FRAC_PI_2;

use cgmath::{Matrix4, Rad};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    components::{
        color::Color,
        geometry::{Coordinate2D, GeoDocument, Geometry},
        primitive::{PointMarker, Polyline, ProjectionResult, RenderPrimitive},
        style::{merge_styles, Style},
    },
    config::ProjectorConfig,
    error::ProjectError,
};

use super::geospatial::{coordinates::CoordinatesSystem, interpolation::InterpolationSystem};

// lines are drawn fully saturated at mid lightness
const LINE_SATURATION: f64 = 1.0;
const LINE_LIGHTNESS: f64 = 0.5;

/// Turns GeoJSON documents into points and polylines sitting on a sphere.
///
/// The projector only holds configuration and the random source used for
/// line styling, every call builds a fresh [`ProjectionResult`].
pub struct Projector {
    config: ProjectorConfig,
    interpolation: InterpolationSystem,
    rng: StdRng,
}

impl Projector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same seed, same document, same output, hues and dash rates included.
    pub fn with_seed(config: ProjectorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ProjectorConfig, rng: StdRng) -> Self {
        let interpolation = InterpolationSystem::new(
            config.interpolation_threshold_deg,
            config.max_interpolation_passes,
        );
        Self {
            config,
            interpolation,
            rng,
        }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    pub fn project(
        &mut self,
        document: &Value,
        radius: f64,
        point_style: Option<&Style>,
        line_style: Option<&Style>,
    ) -> Result<ProjectionResult, ProjectError> {
        let document = GeoDocument::try_from(document)?;
        self.project_document(&document, radius, point_style, line_style)
    }

    pub fn project_document(
        &mut self,
        document: &GeoDocument,
        radius: f64,
        point_style: Option<&Style>,
        line_style: Option<&Style>,
    ) -> Result<ProjectionResult, ProjectError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ProjectError::InvalidRadius(radius));
        }

        let geometries = document.geometries();
        let mut primitives =
            Vec::with_capacity(geometries.iter().map(|g| g.primitive_count()).sum());

        for geometry in &geometries {
            match geometry {
                Geometry::Point(point) => {
                    primitives.push(self.point(point, radius, point_style));
                }
                Geometry::MultiPoint(points) => {
                    for point in points {
                        primitives.push(self.point(point, radius, point_style));
                    }
                }
                Geometry::LineString(line) => {
                    primitives.push(self.line(line, radius, line_style)?);
                }
                Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
                    for ring in rings {
                        primitives.push(self.line(ring, radius, line_style)?);
                    }
                }
                Geometry::MultiPolygon(polygons) => {
                    for ring in polygons.iter().flatten() {
                        primitives.push(self.line(ring, radius, line_style)?);
                    }
                }
            }
        }

        debug!(
            geometries = geometries.len(),
            primitives = primitives.len(),
            radius,
            "projected geojson document"
        );

        Ok(ProjectionResult {
            primitives,
            orientation: Matrix4::from_angle_x(Rad(-FRAC_PI_2)),
        })
    }

    fn point(
        &self,
        coordinate: &Coordinate2D,
        radius: f64,
        style: Option<&Style>,
    ) -> RenderPrimitive {
        RenderPrimitive::Point(PointMarker {
            position: CoordinatesSystem::lon_lat_to_cartesian(coordinate, radius),
            style: style.cloned().unwrap_or_default(),
        })
    }

    fn line(
        &mut self,
        path: &[Coordinate2D],
        radius: f64,
        style: Option<&Style>,
    ) -> Result<RenderPrimitive, ProjectError> {
        let path = self.interpolation.interpolate(path)?;
        let positions = CoordinatesSystem::project_all(&path, radius);

        let hue = self.random_hue();
        let color = Color::from_hsl(hue, LINE_SATURATION, LINE_LIGHTNESS);
        let dash_rate = self.rng.gen::<f64>() * self.config.max_dash_rate;

        Ok(RenderPrimitive::Line(Polyline {
            positions,
            hue,
            color,
            dash_rate,
            dash_offset: 0.0,
            style: merge_styles(self.default_line_style(&color), style),
        }))
    }

    fn random_hue(&mut self) -> f64 {
        let spread = self.rng.gen::<f64>() * self.config.hue_spread;
        let shifted = self.rng.gen::<f64>() < self.config.hue_shift_probability;
        let hue = self.config.hue_base + spread;
        if shifted {
            hue - self.config.hue_shift
        } else {
            hue
        }
    }

    fn default_line_style(&self, color: &Color) -> Style {
        let mut style = Style::new();
        style.insert("color".to_string(), json!(color.to_hex()));
        style.insert("linewidth".to_string(), json!(self.config.default_line_width));
        style.insert("fog".to_string(), json!(self.config.default_fog));
        style.insert(
            "transparent".to_string(),
            json!(self.config.default_transparent),
        );
        style
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(ProjectorConfig::default())
    }
}

/// One-off projection with the default config and unseeded styling.
pub fn project(
    document: &Value,
    radius: f64,
    point_style: Option<&Style>,
    line_style: Option<&Style>,
) -> Result<ProjectionResult, ProjectError> {
    Projector::default().project(document, radius, point_style, line_style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seeded() -> Projector {
        Projector::with_seed(ProjectorConfig::default(), 7)
    }

    #[test]
    fn primitive_counts() {
        let doc = json!({
            "type": "GeometryCollection",
            "geometries": [
                { "type": "Point", "coordinates": [0, 0] },
                { "type": "MultiPoint", "coordinates": [[0, 0], [1, 1], [2, 2]] },
                { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
                { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [0, 0]], [[0.1, 0.1], [0.2, 0.1], [0.1, 0.1]]] },
                { "type": "MultiLineString", "coordinates": [[[0, 0], [1, 1]], [[2, 2], [3, 3]], [[4, 4], [5, 5]]] },
                { "type": "MultiPolygon", "coordinates": [[[[0, 0], [1, 0], [0, 0]]], [[[5, 5], [6, 5], [5, 5]], [[5.1, 5.1], [5.2, 5.1], [5.1, 5.1]]]] }
            ]
        });

        let result = seeded().project(&doc, 1.0, None, None).unwrap();

        assert_eq!(result.points().count(), 4);
        assert_eq!(result.lines().count(), 1 + 2 + 3 + 3);
        assert_eq!(result.len(), 13);
    }

    #[test]
    fn hues_stay_in_band() {
        let mut projector = seeded();
        let doc = json!({
            "type": "Feature",
            "geometry": { "type": "MultiLineString", "coordinates": vec![[[0, 0], [1, 1]]; 200] }
        });
        let result = projector.project(&doc, 1.0, None, None).unwrap();

        for line in result.lines() {
            assert!((0.0..0.5).contains(&line.hue), "hue {} out of band", line.hue);
            assert!((0.0..0.0002).contains(&line.dash_rate));
            assert_eq!(line.dash_offset, 0.0);
        }
        // both sides of the coin flip show up over 200 lines
        assert!(result.lines().any(|l| l.hue < 0.2));
        assert!(result.lines().any(|l| l.hue >= 0.3));
    }

    #[test]
    fn line_style_defaults_and_overrides() {
        let doc = json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] }
        });
        let overrides = json!({ "color": "#f54a00", "opacity": 0.7, "transparent": true });
        let result = seeded()
            .project(&doc, 2.0, None, overrides.as_object())
            .unwrap();

        let line = result.lines().next().unwrap();
        assert_eq!(line.style["color"], json!("#f54a00"));
        assert_eq!(line.style["opacity"], json!(0.7));
        assert_eq!(line.style["transparent"], json!(true));
        assert_eq!(line.style["linewidth"], json!(2.0));
        assert_eq!(line.style["fog"], json!(true));
    }

    #[test]
    fn point_style_is_passed_through() {
        let doc = json!({ "type": "Feature", "geometry": { "type": "Point", "coordinates": [10, 20] } });
        let style = json!({ "size": 0.05, "color": 16777215 });
        let result = seeded().project(&doc, 1.0, style.as_object(), None).unwrap();

        let point = result.points().next().unwrap();
        assert_eq!(Some(&point.style), style.as_object());
    }

    #[test]
    fn rejects_bad_radius() {
        let doc = json!({ "type": "Feature", "geometry": { "type": "Point", "coordinates": [0, 0] } });
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = seeded().project(&doc, radius, None, None).unwrap_err();
            assert!(matches!(err, ProjectError::InvalidRadius(_)));
        }
    }

    #[test]
    fn whole_call_fails_on_one_bad_geometry() {
        let doc = json!({
            "type": "GeometryCollection",
            "geometries": [
                { "type": "Point", "coordinates": [0, 0] },
                { "type": "TriangleMesh", "coordinates": [] }
            ]
        });
        assert!(seeded().project(&doc, 1.0, None, None).is_err());
    }

    #[test]
    fn orientation_turns_z_up_into_y_up() {
        use cgmath::{Point3, Transform};

        let doc = json!({ "type": "Feature", "geometry": { "type": "Point", "coordinates": [0, 90] } });
        let result = seeded().project(&doc, 1.0, None, None).unwrap();
        let north = result.points().next().unwrap().position;

        let turned: Point3<f64> = result.orientation.transform_point(north);
        assert!((turned.y - 1.0).abs() < 1e-9);
        assert!(turned.z.abs() < 1e-9);
    }
}
