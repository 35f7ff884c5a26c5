use bevy_ecs::component::Component;
use cgmath::{Matrix4, Point3};

use super::{color::Color, style::Style};

#[derive(Component, Clone, Debug, PartialEq)]
pub struct PointMarker {
    pub position: Point3<f64>,
    pub style: Style,
}

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Polyline {
    pub positions: Vec<Point3<f64>>,
    pub hue: f64,
    pub color: Color,
    // dash offset advances by `dash_rate` per unit of elapsed time
    pub dash_rate: f64,
    pub dash_offset: f64,
    pub style: Style,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderPrimitive {
    Point(PointMarker),
    Line(Polyline),
}

impl RenderPrimitive {
    pub fn as_point(&self) -> Option<&PointMarker> {
        match self {
            RenderPrimitive::Point(point) => Some(point),
            RenderPrimitive::Line(_) => None,
        }
    }

    pub fn as_line(&self) -> Option<&Polyline> {
        match self {
            RenderPrimitive::Line(line) => Some(line),
            RenderPrimitive::Point(_) => None,
        }
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        match self {
            RenderPrimitive::Point(point) => std::slice::from_ref(&point.position),
            RenderPrimitive::Line(line) => &line.positions,
        }
    }
}

/// Everything drawn for one document. The caller owns it once `project`
/// returns and drives `update` from its render loop.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionResult {
    pub primitives: Vec<RenderPrimitive>,
    // geojson is z-up, the scene is y-up
    pub orientation: Matrix4<f64>,
}

impl ProjectionResult {
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = &PointMarker> {
        self.primitives.iter().filter_map(RenderPrimitive::as_point)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Polyline> {
        self.primitives.iter().filter_map(RenderPrimitive::as_line)
    }
}
