use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
    COMPRESSED_FILE_NAME, DEFAULT_BUSY_DELAY_MS, DEFAULT_ZOOM_PERCENT, INITIAL_LENS_SIZE,
    MAX_ZOOM_PERCENT, RASTER_FILE_NAME,
};
use crate::error::Result;
use crate::pipeline::PipelineRequest;

/// Session settings. Nothing is persisted by the session itself; this is
/// what front ends read from a TOML file or build from arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Milliseconds between showing the busy indicator and running the
    /// blocking external call.
    #[serde(default = "default_busy_delay_ms")]
    pub busy_delay_ms: u64,
    #[serde(default)]
    pub lens: LensConfig,
    #[serde(default)]
    pub pipeline: PipelineDefaults,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            busy_delay_ms: DEFAULT_BUSY_DELAY_MS,
            lens: LensConfig::default(),
            pipeline: PipelineDefaults::default(),
            export: ExportConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

fn default_busy_delay_ms() -> u64 {
    DEFAULT_BUSY_DELAY_MS
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Zoom slider position when the lens is created.
    pub default_zoom_percent: u32,
    /// Upper bound of the zoom slider.
    pub max_zoom_percent: u32,
    /// Lens size in canvas pixels before the first resize.
    pub initial_size: f32,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            default_zoom_percent: DEFAULT_ZOOM_PERCENT,
            max_zoom_percent: MAX_ZOOM_PERCENT,
            initial_size: INITIAL_LENS_SIZE,
        }
    }
}

/// Initial state of the pipeline controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineDefaults {
    pub compress: bool,
    pub smooth: bool,
    /// Alpha field text, parsed at run time.
    pub alpha: String,
}

impl Default for PipelineDefaults {
    fn default() -> Self {
        Self {
            compress: false,
            smooth: true,
            alpha: "0.5".to_string(),
        }
    }
}

impl PipelineDefaults {
    pub fn request(&self) -> PipelineRequest {
        PipelineRequest::from_form(self.compress, self.smooth, &self.alpha)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub raster_file_name: String,
    pub compressed_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            raster_file_name: RASTER_FILE_NAME.to_string(),
            compressed_file_name: COMPRESSED_FILE_NAME.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Path of the native processing module. `None` runs without one.
    pub library: Option<PathBuf>,
}
