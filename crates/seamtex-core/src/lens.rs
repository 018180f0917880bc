//! Zoom lens: a rectangle over the displayed canvas whose contents are
//! shown magnified in a separate surface.
//!
//! Lens geometry lives in displayed-canvas pixels. The magnified crop is
//! taken from the active source texture, whose resolution is usually
//! different, by scaling the rectangle linearly.

use crate::raster::{Raster, Region};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LensMode {
    /// The lens follows the pointer.
    #[default]
    Tracking,
    /// The lens stays put until clicked again.
    Fixed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LensGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug)]
pub struct ZoomLens {
    geometry: LensGeometry,
    mode: LensMode,
    zoom_percent: u32,
    max_percent: u32,
    canvas_size: (f32, f32),
}

impl ZoomLens {
    /// Lens at the canvas origin with `initial_size`, then resized to
    /// `zoom_percent`.
    pub fn new(
        canvas_size: (u32, u32),
        initial_size: f32,
        zoom_percent: u32,
        max_percent: u32,
    ) -> Self {
        let mut lens = Self {
            geometry: LensGeometry {
                x: 0.0,
                y: 0.0,
                width: initial_size,
                height: initial_size,
            },
            mode: LensMode::Tracking,
            zoom_percent,
            max_percent,
            canvas_size: (canvas_size.0 as f32, canvas_size.1 as f32),
        };
        lens.resize(zoom_percent);
        lens
    }

    pub fn geometry(&self) -> LensGeometry {
        self.geometry
    }

    pub fn mode(&self) -> LensMode {
        self.mode
    }

    pub fn is_tracking(&self) -> bool {
        self.mode == LensMode::Tracking
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        self.canvas_size
    }

    /// Size the lens to `(100 - percent)%` of the canvas and re-clamp its
    /// position. `percent` is clamped to `[0, max_percent]`.
    pub fn resize(&mut self, percent: u32) {
        let percent = percent.min(self.max_percent);
        self.zoom_percent = percent;
        let fraction = 100u32.saturating_sub(percent) as f32 / 100.0;
        self.geometry.width = fraction * self.canvas_size.0;
        self.geometry.height = fraction * self.canvas_size.1;
        self.place(self.geometry.x, self.geometry.y);
    }

    /// The displayed canvas changed size; keep the zoom percent.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_size = (width as f32, height as f32);
        self.resize(self.zoom_percent);
    }

    /// Center the lens on `pointer` (canvas coordinates). Only effective
    /// while tracking; returns whether the lens moved.
    pub fn move_to(&mut self, pointer: (f32, f32)) -> bool {
        if !self.is_tracking() {
            return false;
        }
        let x = pointer.0 - self.geometry.width / 2.0;
        let y = pointer.1 - self.geometry.height / 2.0;
        self.place(x, y);
        true
    }

    /// Toggle tracking/fixed, then re-evaluate the position at `pointer`.
    pub fn click(&mut self, pointer: (f32, f32)) {
        self.mode = match self.mode {
            LensMode::Tracking => LensMode::Fixed,
            LensMode::Fixed => LensMode::Tracking,
        };
        self.move_to(pointer);
    }

    /// Keep `0 <= x <= canvas_width - width`, same for y.
    fn place(&mut self, mut x: f32, mut y: f32) {
        let (cw, ch) = self.canvas_size;
        if x > cw - self.geometry.width {
            x = cw - self.geometry.width;
        }
        if x < 0.0 {
            x = 0.0;
        }
        if y > ch - self.geometry.height {
            y = ch - self.geometry.height;
        }
        if y < 0.0 {
            y = 0.0;
        }
        self.geometry.x = x;
        self.geometry.y = y;
    }

    /// The lens rectangle mapped into a source of `source_size` pixels.
    pub fn source_region(&self, source_size: (u32, u32)) -> Region {
        let (cw, ch) = self.canvas_size;
        if cw <= 0.0 || ch <= 0.0 {
            return Region::default();
        }
        let sx = source_size.0 as f32 / cw;
        let sy = source_size.1 as f32 / ch;
        Region {
            x: self.geometry.x * sx,
            y: self.geometry.y * sy,
            width: self.geometry.width * sx,
            height: self.geometry.height * sy,
        }
    }

    /// The magnifier is the same size as the displayed canvas.
    pub fn magnifier_size(&self) -> (u32, u32) {
        (
            self.canvas_size.0.round() as u32,
            self.canvas_size.1.round() as u32,
        )
    }

    /// Draw the lens region of `source` filling the whole magnifier.
    pub fn render(&self, source: &Raster) -> Raster {
        let (w, h) = self.magnifier_size();
        source.draw_region(self.source_region(source.dimensions()), w, h)
    }
}
