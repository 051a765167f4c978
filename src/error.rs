use thiserror::Error;

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, projecting or drawing a scene
#[derive(Error, Debug)]
pub enum Error {
    #[error("Expected 3 points, got {0}")]
    InvalidPointCount(usize),

    #[error("{channel} value {value} out of range [0, 255]")]
    ColorComponentOutOfRange { channel: &'static str, value: i32 },

    #[error("Invalid hex color format: {0:?}")]
    InvalidHexColor(String),

    #[error("Cannot normalize a zero-length vector")]
    ZeroLengthVector,

    #[error("Mesh has no faces and no base color to vary from")]
    MissingBaseColor,

    #[error("Vertical aspect component cannot be zero")]
    InvalidAspectRatio,

    #[error("Mesh file line {line}: {message}")]
    MeshFormat { line: usize, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
