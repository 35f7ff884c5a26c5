pub mod animation;
pub mod datasets;
pub mod document;
pub mod geospatial;
pub mod mesh;
pub mod projector;
