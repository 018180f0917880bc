use std::fmt;

use crate::pipeline::{describe_compressed, ArtifactData, OutputArtifact};
use crate::raster::Raster;
use crate::resource::TextureResource;

/// Which texture is painted into the displayed canvas and fed to the lens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewSelection {
    #[default]
    Input,
    Output,
}

impl ViewSelection {
    pub fn other(&self) -> Self {
        match self {
            Self::Input => Self::Output,
            Self::Output => Self::Input,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for ViewSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Caption attached to the displayed canvas for the selected texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoAnnotation {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub encoding: String,
}

impl InfoAnnotation {
    pub fn for_texture(texture: &TextureResource) -> Self {
        Self {
            name: texture.name.clone(),
            width: texture.width(),
            height: texture.height(),
            encoding: texture.encoding.clone(),
        }
    }

    /// `source_size` is used when the artifact does not carry its own size.
    pub fn for_artifact(artifact: &OutputArtifact, source_size: (u32, u32)) -> Self {
        let (encoding, width, height) = match &artifact.data {
            ArtifactData::Raster(raster) => {
                ("RGBA8 (PNG export)".to_string(), raster.width(), raster.height())
            }
            ArtifactData::Compressed { bytes, .. } => describe_compressed(bytes)
                .unwrap_or_else(|| ("compressed".to_string(), source_size.0, source_size.1)),
        };
        Self {
            name: artifact.name.clone(),
            width,
            height,
            encoding,
        }
    }
}

impl fmt::Display for InfoAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}x{}, {})",
            self.name, self.width, self.height, self.encoding
        )
    }
}

/// The on-screen canvas: the selected texture scaled to the displayed size.
#[derive(Clone, Debug)]
pub struct DisplayCanvas {
    size: (u32, u32),
    surface: Raster,
}

impl DisplayCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            surface: Raster::new(width, height),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn surface(&self) -> &Raster {
        &self.surface
    }

    /// Repaint from `source`, stretched to fill the canvas.
    pub fn paint(&mut self, source: &Raster) {
        self.surface = source.scaled(self.size.0, self.size.1);
    }

    /// Change the on-screen size and repaint from `source`.
    pub fn resize(&mut self, width: u32, height: u32, source: Option<&Raster>) {
        self.size = (width, height);
        match source {
            Some(source) => self.paint(source),
            None => self.surface = Raster::new(width, height),
        }
    }
}

/// State owned by the texture view switcher.
#[derive(Clone, Debug)]
pub struct TextureView {
    selection: ViewSelection,
    annotation: Option<InfoAnnotation>,
    canvas: DisplayCanvas,
}

impl TextureView {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            selection: ViewSelection::Input,
            annotation: None,
            canvas: DisplayCanvas::new(width, height),
        }
    }

    pub fn selection(&self) -> ViewSelection {
        self.selection
    }

    pub fn annotation(&self) -> Option<&InfoAnnotation> {
        self.annotation.as_ref()
    }

    pub fn canvas(&self) -> &DisplayCanvas {
        &self.canvas
    }

    /// Replace the annotation, repaint the canvas and record the selection.
    pub fn show(&mut self, which: ViewSelection, source: &Raster, annotation: InfoAnnotation) {
        self.annotation = Some(annotation);
        self.canvas.paint(source);
        self.selection = which;
    }

    pub fn resize(&mut self, width: u32, height: u32, source: Option<&Raster>) {
        self.canvas.resize(width, height, source);
    }
}
