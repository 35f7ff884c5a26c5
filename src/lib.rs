mod components;
mod config;
mod error;
mod systems;

pub use components::{
    color::Color,
    geometry::{Coordinate2D, GeoDocument, Geometry},
    primitive::{PointMarker, Polyline, ProjectionResult, RenderPrimitive},
    style::{merge_styles, Style},
};
pub use config::ProjectorConfig;
pub use error::ProjectError;
pub use systems::{
    animation::{advance, AnimationSystem, ElapsedTime},
    datasets::{Dataset, DatasetSystem, GlobeLayer},
    document::DocumentSystem,
    geospatial::{coordinates::CoordinatesSystem, interpolation::InterpolationSystem},
    mesh::{GlobeLayerBuffers, GlobeLayerMesh, LineVertex, MeshSystem},
    projector::{project, Projector},
};

/// 3D points are `cgmath` points in the sphere's own frame.
pub type Coordinate3D = cgmath::Point3<f64>;

pub fn init_tracing() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            tracing_wasm::set_as_global_default();
        } else {
            // ignore the error if a subscriber is already installed
            let _ = tracing_subscriber::fmt().try_init();
        }
    }
}
