use thiserror::Error;

use crate::pipeline::ArtifactKind;
use crate::resource::ResourceKind;

#[derive(Error, Debug)]
pub enum SeamtexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    /// A prerequisite resource has not finished loading. The message is the
    /// alert text shown to the user.
    #[error("{0} file missing!")]
    MissingResource(ResourceKind),

    #[error("Failed to load {kind} file {name}: {message}")]
    LoadFailed {
        kind: ResourceKind,
        name: String,
        message: String,
    },

    #[error("Processor no longer holds mesh {0}, load a mesh again")]
    MeshLost(String),

    #[error("Download prepared for a {expected} but the output is a {actual}")]
    StaleDownload {
        expected: ArtifactKind,
        actual: ArtifactKind,
    },

    #[error("A pipeline run is already in progress")]
    Busy,

    #[error("No {0} texture to display")]
    ViewUnavailable(&'static str),

    #[error("Processor error: {0}")]
    Processor(String),

    #[error("Failed to load processing module {path}: {message}")]
    BackendLoad { path: String, message: String },

    #[error("Processor returned {actual} bytes for {what}, expected {expected}")]
    BufferSize {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl SeamtexError {
    /// True for prerequisite failures that front ends surface as an alert
    /// rather than an error log line.
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::MissingResource(_))
    }
}

pub type Result<T> = std::result::Result<T, SeamtexError>;
