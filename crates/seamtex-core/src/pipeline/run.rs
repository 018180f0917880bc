use std::time::Instant;

use tracing::info;

use crate::error::{Result, SeamtexError};
use crate::processor::TextureProcessor;
use crate::raster::{byte_len, Raster};

use super::types::{ArtifactData, OutputArtifact, PipelineMode};

/// A validated run waiting for the busy indicator to paint.
///
/// Produced by [`crate::Session::begin_run`] and consumed by
/// [`crate::Session::finish_run`]; it cannot be cancelled, only finished.
#[derive(Debug)]
#[must_use = "a pending run holds the session busy until it is finished"]
pub struct PendingRun {
    pub(crate) mode: PipelineMode,
    pub(crate) alpha: f32,
}

impl PendingRun {
    pub fn mode(&self) -> PipelineMode {
        self.mode
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

/// Run one external operation on `source` and read its result back.
///
/// `name` is the artifact's download name.
pub fn execute(
    processor: &mut dyn TextureProcessor,
    source: &Raster,
    mode: PipelineMode,
    alpha: f32,
    name: &str,
) -> Result<OutputArtifact> {
    let (width, height) = source.dimensions();
    if source.is_empty() {
        return Err(SeamtexError::InvalidDimensions { width, height });
    }
    let start = Instant::now();

    // Snapshot the source into the processor's input buffer.
    let snapshot = source.as_raw();
    processor.allocate_image_buffers(width, height)?;
    let input = processor.image_buf_mut();
    if input.len() != snapshot.len() {
        return Err(SeamtexError::BufferSize {
            what: "image buffer",
            expected: snapshot.len(),
            actual: input.len(),
        });
    }
    input.copy_from_slice(snapshot);

    match mode {
        PipelineMode::CompressAndSmooth => processor.compress_and_smooth(alpha)?,
        PipelineMode::Compress => processor.compress()?,
        PipelineMode::Smooth => processor.smooth(alpha)?,
    }

    let expected = byte_len(width, height);
    let data = match mode {
        PipelineMode::Smooth => {
            let output = processor.output_buf();
            if output.len() != expected {
                return Err(SeamtexError::BufferSize {
                    what: "output buffer",
                    expected,
                    actual: output.len(),
                });
            }
            ArtifactData::Raster(Raster::from_rgba(width, height, output.to_vec())?)
        }
        PipelineMode::Compress | PipelineMode::CompressAndSmooth => {
            let bytes = processor.compressed_buf().to_vec();
            if bytes.is_empty() {
                return Err(SeamtexError::Processor(format!(
                    "{mode} produced no compressed data"
                )));
            }
            let output = processor.output_buf();
            let preview = if output.len() == expected {
                Some(Raster::from_rgba(width, height, output.to_vec())?)
            } else {
                None
            };
            ArtifactData::Compressed { bytes, preview }
        }
    };

    info!(
        %mode,
        width,
        height,
        backend = processor.name(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Pipeline run complete"
    );

    Ok(OutputArtifact {
        name: name.to_string(),
        data,
    })
}
