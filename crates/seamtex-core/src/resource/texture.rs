use tracing::info;

use crate::error::Result;
use crate::raster::Raster;

/// A decoded texture: the source surface plus what the info annotation shows.
#[derive(Clone, Debug)]
pub struct TextureResource {
    pub name: String,
    /// Encoding of the dropped file ("Png", "Jpeg", ...).
    pub encoding: String,
    pub raster: Raster,
}

impl TextureResource {
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

/// Decode image file bytes into a texture at its natural pixel size.
pub fn decode_texture(name: &str, bytes: &[u8]) -> Result<TextureResource> {
    let format = image::guess_format(bytes)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let raster = Raster::from_image(decoded.to_rgba8());
    info!(
        name,
        width = raster.width(),
        height = raster.height(),
        format = ?format,
        "Texture decoded"
    );
    Ok(TextureResource {
        name: name.to_string(),
        encoding: format!("{format:?}"),
        raster,
    })
}
