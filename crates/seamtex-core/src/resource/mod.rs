pub mod loader;
mod texture;

use std::fmt;
use std::path::{Path, PathBuf};

pub use texture::{decode_texture, TextureResource};

/// The two independently loaded inputs of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Mesh,
    Texture,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mesh => write!(f, "Mesh"),
            Self::Texture => write!(f, "Texture"),
        }
    }
}

/// Where the bytes of a dropped file live.
#[derive(Clone, Debug)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A user-supplied file: what a drop target or a command-line argument hands
/// to the loader.
#[derive(Clone, Debug)]
pub struct FileHandle {
    pub name: String,
    /// Declared media type (e.g. `image/png`), if the platform supplied one.
    pub media_type: Option<String>,
    pub source: FileSource,
}

impl FileHandle {
    /// Handle for a file on disk; the media type is inferred from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = media_type_for_path(&path).map(str::to_string);
        Self {
            name,
            media_type,
            source: FileSource::Path(path),
        }
    }

    /// Handle for in-memory file contents.
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type,
            source: FileSource::Bytes(bytes),
        }
    }

    /// True when the declared media type indicates an image.
    pub fn is_image(&self) -> bool {
        self.media_type
            .as_deref()
            .is_some_and(|t| t.contains("image"))
    }

    /// Read the full contents.
    pub fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => std::fs::read(path),
            FileSource::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Media type for the extensions a drop target is likely to see.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let media = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "tga" => "image/x-tga",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "obj" => "model/obj",
        _ => return None,
    };
    Some(media)
}
