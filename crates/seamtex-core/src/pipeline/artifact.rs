use std::io::Cursor;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::consts::{
    COMPRESSED_DOWNLOAD_LABEL, DDS_HEADER_SIZE, DDS_MAGIC, RASTER_DOWNLOAD_LABEL,
};
use crate::error::{Result, SeamtexError};

use super::types::{ArtifactData, ArtifactKind, OutputArtifact};

/// Byte offset of the pixel format FourCC, counted from the start of the file.
const DDS_FOURCC_OFFSET: u64 = 84;

/// What the save control offers for the current artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadAction {
    pub label: &'static str,
    pub file_name: String,
    pub kind: ArtifactKind,
}

impl DownloadAction {
    pub fn for_artifact(artifact: &OutputArtifact) -> Self {
        let kind = artifact.kind();
        let label = match kind {
            ArtifactKind::Raster => RASTER_DOWNLOAD_LABEL,
            ArtifactKind::Compressed => COMPRESSED_DOWNLOAD_LABEL,
        };
        Self {
            label,
            file_name: artifact.name.clone(),
            kind,
        }
    }

    /// Bytes of the downloadable file: a PNG export for rasters, the raw
    /// container for compressed output. Fails if `artifact` is not the kind
    /// this action was built for.
    pub fn encode(&self, artifact: &OutputArtifact) -> Result<Vec<u8>> {
        let actual = artifact.kind();
        if actual != self.kind {
            return Err(SeamtexError::StaleDownload {
                expected: self.kind,
                actual,
            });
        }
        match &artifact.data {
            ArtifactData::Raster(raster) => raster.encode_png(),
            ArtifactData::Compressed { bytes, .. } => Ok(bytes.clone()),
        }
    }

    /// Encode and write to `path`.
    pub fn save(&self, artifact: &OutputArtifact, path: &Path) -> Result<()> {
        let bytes = self.encode(artifact)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Encoding label and pixel size of a compressed container, read from its
/// DDS header. Returns `None` when the bytes are not a DDS file.
pub fn describe_compressed(bytes: &[u8]) -> Option<(String, u32, u32)> {
    let mut cursor = Cursor::new(bytes);
    if cursor.read_u32::<LittleEndian>().ok()? != DDS_MAGIC {
        return None;
    }
    if cursor.read_u32::<LittleEndian>().ok()? != DDS_HEADER_SIZE {
        return None;
    }
    let _flags = cursor.read_u32::<LittleEndian>().ok()?;
    let height = cursor.read_u32::<LittleEndian>().ok()?;
    let width = cursor.read_u32::<LittleEndian>().ok()?;

    cursor.set_position(DDS_FOURCC_OFFSET);
    let mut fourcc = [0u8; 4];
    for b in &mut fourcc {
        *b = cursor.read_u8().ok()?;
    }
    let label = match &fourcc {
        b"DXT1" => "DXT1 (BC1)".to_string(),
        b"DXT3" => "DXT3 (BC2)".to_string(),
        b"DXT5" => "DXT5 (BC3)".to_string(),
        [0, 0, 0, 0] => "DDS (uncompressed)".to_string(),
        other => format!("DDS ({})", String::from_utf8_lossy(other).trim_end_matches('\0')),
    };
    Some((label, width, height))
}
