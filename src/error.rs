use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("Resampling error: {0}")]
    Resampling(String),

    #[error("Invalid shape: {0}")]
    Shape(String),

    #[error("Texture error: {0}")]
    Texture(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    /// The screen point is the projection pole, where longitude is undefined.
    #[error("Undefined at projection pole ({x}, {y})")]
    Singular { x: f64, y: f64 },

    /// The screen point has no preimage: its latitude would fall outside ±90°.
    #[error("Outside projection domain at ({x}, {y})")]
    OutsideDomain { x: f64, y: f64 },

    #[error("Non-finite coordinate ({0}, {1})")]
    NonFinite(f64, f64),

    #[error("Latitude out of range: {0} rad")]
    LatitudeOutOfRange(f64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
