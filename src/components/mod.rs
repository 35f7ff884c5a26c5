pub mod color;
pub mod geometry;
pub mod primitive;
pub mod style;
