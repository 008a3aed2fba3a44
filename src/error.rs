//! Error type shared by every stage of the pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdfError>;

#[derive(Error, Debug)]
pub enum SdfError {
    /// A grid was described with a zero extent or a buffer of the wrong size.
    #[error("malformed input: {width}x{height} grid with {cells} cells")]
    MalformedInput {
        width: usize,
        height: usize,
        cells: usize,
    },
    #[error("grid extents differ: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
