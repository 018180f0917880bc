use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use rayon::prelude::*;

use crate::consts::{BYTES_PER_PIXEL, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{Result, SeamtexError};

/// An owned RGBA8 drawing surface. Plays the role of a canvas: the source
/// texture, the result of a pipeline run, the displayed canvas and the
/// magnifier are all rasters.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    image: RgbaImage,
}

/// A rectangle in floating-point pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Raster {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Wrap a tightly packed RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height);
        let actual = pixels.len();
        let image = RgbaImage::from_raw(width, height, pixels).ok_or(SeamtexError::BufferSize {
            what: "raster",
            expected,
            actual,
        })?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The whole surface redrawn at a new size.
    pub fn scaled(&self, width: u32, height: u32) -> Raster {
        if width == 0 || height == 0 || self.is_empty() {
            return Raster::new(width, height);
        }
        if (width, height) == self.dimensions() {
            return self.clone();
        }
        Raster::from_image(imageops::resize(&self.image, width, height, FilterType::Triangle))
    }

    /// Draw `src` (in this raster's pixel space) into a new `dst_width` x
    /// `dst_height` surface, stretching it to fill the destination. Samples
    /// that fall outside this raster are left transparent.
    pub fn draw_region(&self, src: Region, dst_width: u32, dst_height: u32) -> Raster {
        let mut out = Raster::new(dst_width, dst_height);
        if out.is_empty() || self.is_empty() || src.width <= 0.0 || src.height <= 0.0 {
            return out;
        }

        let (w, h) = self.dimensions();
        let src_pixels = self.image.as_raw();
        let step_x = src.width / dst_width as f32;
        let step_y = src.height / dst_height as f32;
        let row_bytes = dst_width as usize * BYTES_PER_PIXEL;

        let fill_row = |(row, out_row): (usize, &mut [u8])| {
            let sy = (src.y + (row as f32 + 0.5) * step_y).floor();
            if sy < 0.0 || sy >= h as f32 {
                return;
            }
            let sy = sy as usize;
            for col in 0..dst_width as usize {
                let sx = (src.x + (col as f32 + 0.5) * step_x).floor();
                if sx < 0.0 || sx >= w as f32 {
                    continue;
                }
                let s = (sy * w as usize + sx as usize) * BYTES_PER_PIXEL;
                let d = col * BYTES_PER_PIXEL;
                out_row[d..d + BYTES_PER_PIXEL].copy_from_slice(&src_pixels[s..s + BYTES_PER_PIXEL]);
            }
        };

        let buf: &mut [u8] = &mut out.image;
        if dst_width as usize * dst_height as usize >= PARALLEL_PIXEL_THRESHOLD {
            buf.par_chunks_mut(row_bytes).enumerate().for_each(fill_row);
        } else {
            buf.chunks_mut(row_bytes).enumerate().for_each(fill_row);
        }
        out
    }

    /// Encode as PNG, the standard image export.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

/// Size in bytes of a tightly packed RGBA8 buffer.
pub fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}
