//! Error types for versegrid

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VersegridError>;

/// Coarse failure categories, one per way a run can go wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input file missing, unreadable, or not UTF-8
    InputAccess,
    /// Nothing left to draw after parsing and shaping
    EmptyContent,
    /// Grid with zero rows or a uniform value under a strict policy
    DegenerateGrid,
    /// Output could not be encoded or written
    OutputWrite,
    /// Pipeline assembled without a required component
    Config,
    Other,
}

/// Main error type for versegrid
#[derive(Debug, Error)]
pub enum VersegridError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Empty content: {0}")]
    EmptyContent(String),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Rendering failed: {0}")]
    RenderingFailed(#[from] RenderError),

    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl VersegridError {
    /// Which category this failure belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(_) => ErrorKind::InputAccess,
            Self::EmptyContent(_) => ErrorKind::EmptyContent,
            Self::Grid(_) => ErrorKind::DegenerateGrid,
            Self::RenderingFailed(RenderError::UniformGrid { .. }) => ErrorKind::DegenerateGrid,
            Self::ExportFailed(_) => ErrorKind::OutputWrite,
            Self::Pipeline(_) | Self::ConfigError(_) => ErrorKind::Config,
            Self::Io(_) | Self::Other(_) => ErrorKind::Other,
        }
    }
}

/// Input reading errors
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 (line {line})", .path.display())]
    InvalidEncoding { path: PathBuf, line: usize },
}

/// Grid construction errors
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Grid height must be at least 1")]
    ZeroHeight,

    #[error("Grid height {height} exceeds the {len} bytes available")]
    TallerThanContent { height: u32, len: usize },

    #[error("Grid too large: {height}x{width}")]
    TooLarge { height: usize, width: usize },
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Grid is uniform (every cell is {value}); nothing to normalize")]
    UniformGrid { value: u8 },
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Format not supported: {0}")]
    FormatNotSupported(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write to {} failed: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
