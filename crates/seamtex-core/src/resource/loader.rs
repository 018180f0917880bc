//! Background file loading.
//!
//! File reads and image decoding run on a dedicated loader thread so the
//! owning thread stays responsive. Each request produces exactly one
//! [`LoadCompletion`]; completions for a mesh and a texture requested close
//! together may arrive in either order. The owner applies them with
//! [`crate::Session::apply_completion`].

use std::sync::mpsc;

use tracing::{debug, warn};

use super::{decode_texture, FileHandle, ResourceKind, TextureResource};
use crate::error::Result;

/// Work sent to the loader thread.
pub enum LoadRequest {
    Mesh(FileHandle),
    Texture(FileHandle),
}

/// Result of one load request, sent back to the owning thread.
pub enum LoadCompletion {
    /// Raw mesh file contents, ready to hand to the processor.
    Mesh { name: String, bytes: Vec<u8> },
    /// Decoded texture.
    Texture(TextureResource),
    /// The dropped file was not an image; nothing changes.
    Ignored { name: String },
    /// Reading or decoding failed.
    Failed {
        kind: ResourceKind,
        name: String,
        message: String,
    },
}

/// Read a texture file. Returns `Ok(None)` when the declared media type is
/// not an image.
pub fn read_texture(file: &FileHandle) -> Result<Option<TextureResource>> {
    if !file.is_image() {
        warn!(name = %file.name, media_type = ?file.media_type, "Not an image, ignoring");
        return Ok(None);
    }
    let bytes = file.read_bytes()?;
    decode_texture(&file.name, &bytes).map(Some)
}

/// Run a single request to completion on the current thread.
pub fn complete(request: LoadRequest) -> LoadCompletion {
    match request {
        LoadRequest::Mesh(file) => match file.read_bytes() {
            Ok(bytes) => LoadCompletion::Mesh {
                name: file.name,
                bytes,
            },
            Err(e) => LoadCompletion::Failed {
                kind: ResourceKind::Mesh,
                name: file.name,
                message: e.to_string(),
            },
        },
        LoadRequest::Texture(file) => match read_texture(&file) {
            Ok(Some(texture)) => LoadCompletion::Texture(texture),
            Ok(None) => LoadCompletion::Ignored { name: file.name },
            Err(e) => LoadCompletion::Failed {
                kind: ResourceKind::Texture,
                name: file.name,
                message: e.to_string(),
            },
        },
    }
}

/// Spawn the loader thread. Returns the request sender.
///
/// `notify` runs after every completion is sent, e.g. to wake a UI event loop.
pub fn spawn_loader<F>(
    result_tx: mpsc::Sender<LoadCompletion>,
    notify: F,
) -> std::io::Result<mpsc::Sender<LoadRequest>>
where
    F: Fn() + Send + 'static,
{
    let (req_tx, req_rx) = mpsc::channel::<LoadRequest>();

    std::thread::Builder::new()
        .name("seamtex-loader".into())
        .spawn(move || {
            while let Ok(request) = req_rx.recv() {
                let completion = complete(request);
                if result_tx.send(completion).is_err() {
                    debug!("Load result receiver dropped, stopping loader");
                    break;
                }
                notify();
            }
        })?;

    Ok(req_tx)
}
