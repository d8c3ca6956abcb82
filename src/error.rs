use std::io;

use thiserror::Error;

/// Problems with the scene, caught before any ray is cast.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("got {positions} light positions but {colors} light colors")]
    LightCountMismatch { positions: usize, colors: usize },

    #[error("sphere #{index} has non-positive radius {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("triangle #{index} has collinear vertices")]
    DegenerateTriangle { index: usize },

    #[error("plane #{index} has a zero-length normal")]
    DegeneratePlane { index: usize },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("invalid render configuration: {0}")]
    Config(String),

    #[error("malformed render configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}
