pub mod coordinates;
pub mod interpolation;
