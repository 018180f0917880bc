//! The external processing module.
//!
//! Mesh parsing, seam smoothing and block compression live behind
//! [`TextureProcessor`]; the session only drives the operation sequence and
//! moves buffers in and out. [`NativeProcessor`] binds a shared library at
//! runtime, [`UnavailableProcessor`] stands in when none is configured.

mod geometry;
mod native;

pub use geometry::{MeshBounds, MeshGeometry};
pub use native::NativeProcessor;

use crate::error::{Result, SeamtexError};

/// Vertical orientation of the UV buffer handed to the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UvOrientation {
    #[default]
    Native,
    /// `v` replaced by `1 - v`, for renderers with a top-left texture origin.
    MirrorV,
}

/// Operation set of the processing module.
///
/// Every call is blocking. Image operations consume the buffer returned by
/// [`image_buf_mut`](Self::image_buf_mut) and populate
/// [`output_buf`](Self::output_buf) and/or
/// [`compressed_buf`](Self::compressed_buf).
pub trait TextureProcessor {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Parse an in-memory mesh file. Fails on malformed input.
    fn load_mesh(&mut self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Number of triangles in the loaded mesh.
    fn face_count(&self) -> usize;

    /// Un-indexed vertex positions, 9 floats per face.
    fn positions(&self) -> Result<Vec<f32>>;

    /// Un-indexed texture coordinates, 6 floats per face.
    fn uvs(&self, orientation: UvOrientation) -> Result<Vec<f32>>;

    /// Size the input and output image buffers for a `width` x `height` RGBA8 image.
    fn allocate_image_buffers(&mut self, width: u32, height: u32) -> Result<()>;

    /// Writable input image buffer.
    fn image_buf_mut(&mut self) -> &mut [u8];

    /// Raster result buffer (RGBA8).
    fn output_buf(&self) -> &[u8];

    /// Compressed result buffer (block-compressed container).
    fn compressed_buf(&self) -> &[u8];

    fn smooth(&mut self, alpha: f32) -> Result<()>;

    fn compress(&mut self) -> Result<()>;

    fn compress_and_smooth(&mut self, alpha: f32) -> Result<()>;
}

/// Processor used when no processing module is configured. Every operation
/// fails, so texture preview keeps working while mesh and pipeline actions
/// report the missing backend.
#[derive(Debug, Default)]
pub struct UnavailableProcessor;

impl UnavailableProcessor {
    fn unavailable<T>(&self) -> Result<T> {
        Err(SeamtexError::Processor(
            "no processing module configured".into(),
        ))
    }
}

impl TextureProcessor for UnavailableProcessor {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn load_mesh(&mut self, _name: &str, _bytes: &[u8]) -> Result<()> {
        self.unavailable()
    }

    fn face_count(&self) -> usize {
        0
    }

    fn positions(&self) -> Result<Vec<f32>> {
        self.unavailable()
    }

    fn uvs(&self, _orientation: UvOrientation) -> Result<Vec<f32>> {
        self.unavailable()
    }

    fn allocate_image_buffers(&mut self, _width: u32, _height: u32) -> Result<()> {
        self.unavailable()
    }

    fn image_buf_mut(&mut self) -> &mut [u8] {
        &mut []
    }

    fn output_buf(&self) -> &[u8] {
        &[]
    }

    fn compressed_buf(&self) -> &[u8] {
        &[]
    }

    fn smooth(&mut self, _alpha: f32) -> Result<()> {
        self.unavailable()
    }

    fn compress(&mut self) -> Result<()> {
        self.unavailable()
    }

    fn compress_and_smooth(&mut self, _alpha: f32) -> Result<()> {
        self.unavailable()
    }
}

/// Open the configured processing module, or fall back to
/// [`UnavailableProcessor`] when no library path is set.
pub fn open_backend(library: Option<&std::path::Path>) -> Result<Box<dyn TextureProcessor>> {
    match library {
        Some(path) => Ok(Box::new(NativeProcessor::open(path)?)),
        None => Ok(Box::new(UnavailableProcessor)),
    }
}
