use std::fmt;

use tracing::warn;

use crate::raster::Raster;

/// Which external operation a run invokes, derived from the two
/// compress/smooth options at invocation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineMode {
    Compress,
    Smooth,
    CompressAndSmooth,
}

impl PipelineMode {
    /// `None` when neither option is set: the run is a no-op.
    pub fn from_flags(compress: bool, smooth: bool) -> Option<Self> {
        match (compress, smooth) {
            (true, true) => Some(Self::CompressAndSmooth),
            (true, false) => Some(Self::Compress),
            (false, true) => Some(Self::Smooth),
            (false, false) => None,
        }
    }

    pub fn requires_mesh(&self) -> bool {
        matches!(self, Self::Smooth | Self::CompressAndSmooth)
    }

    pub fn artifact_kind(&self) -> ArtifactKind {
        match self {
            Self::Smooth => ArtifactKind::Raster,
            Self::Compress | Self::CompressAndSmooth => ArtifactKind::Compressed,
        }
    }
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compress => write!(f, "Compress"),
            Self::Smooth => write!(f, "Smooth seams"),
            Self::CompressAndSmooth => write!(f, "Compress + smooth seams"),
        }
    }
}

/// Options read from the controls when the user presses run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineRequest {
    pub compress: bool,
    pub smooth: bool,
    /// Seam blend parameter, only used when smoothing. May be NaN.
    pub alpha: f32,
}

impl PipelineRequest {
    /// Build a request from the raw alpha field text.
    pub fn from_form(compress: bool, smooth: bool, alpha_text: &str) -> Self {
        Self {
            compress,
            smooth,
            alpha: parse_alpha(alpha_text),
        }
    }

    pub fn mode(&self) -> Option<PipelineMode> {
        PipelineMode::from_flags(self.compress, self.smooth)
    }
}

/// Parse the alpha field as a decimal number. Unparsable text yields NaN,
/// which is passed on to the processor unchanged.
pub fn parse_alpha(text: &str) -> f32 {
    match text.trim().parse::<f32>() {
        Ok(alpha) => alpha,
        Err(_) => {
            warn!(text, "Alpha is not a number, passing NaN to the processor");
            f32::NAN
        }
    }
}

/// Classification of a run's output; selects the download encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Raster,
    Compressed,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster => write!(f, "raster image"),
            Self::Compressed => write!(f, "compressed texture"),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ArtifactData {
    /// Same pixel size as the source texture.
    Raster(Raster),
    /// Opaque block-compressed container, plus the processor's decoded view
    /// of it when one was provided.
    Compressed {
        bytes: Vec<u8>,
        preview: Option<Raster>,
    },
}

/// Output of the latest successful run. A new run replaces it.
#[derive(Clone, Debug)]
pub struct OutputArtifact {
    pub name: String,
    pub data: ArtifactData,
}

impl OutputArtifact {
    pub fn kind(&self) -> ArtifactKind {
        match self.data {
            ArtifactData::Raster(_) => ArtifactKind::Raster,
            ArtifactData::Compressed { .. } => ArtifactKind::Compressed,
        }
    }

    /// Surface to paint into the result canvas, if any.
    pub fn raster(&self) -> Option<&Raster> {
        match &self.data {
            ArtifactData::Raster(raster) => Some(raster),
            ArtifactData::Compressed { preview, .. } => preview.as_ref(),
        }
    }
}
