use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    /// the document, one of its geometries, or one of its positions
    /// isn't something we know how to draw
    #[error("the geoJSON is not valid: {0}")]
    InvalidDocument(String),

    #[error("sphere radius must be finite and greater than zero, got {0}")]
    InvalidRadius(f64),

    #[error("interpolation did not settle after {passes} passes")]
    InterpolationLimit { passes: usize },

    #[error("invalid projector config: {0}")]
    InvalidConfig(String),
}

impl ProjectError {
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        ProjectError::InvalidDocument(reason.into())
    }
}
