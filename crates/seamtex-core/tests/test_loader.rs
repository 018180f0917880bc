#[allow(dead_code)]
mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use tempfile::TempDir;

use seamtex_core::resource::loader::{complete, spawn_loader, LoadCompletion, LoadRequest};
use seamtex_core::resource::{decode_texture, FileHandle, ResourceKind};
use seamtex_core::SeamtexError;

use common::{mesh_file, new_session, png_bytes, texture_file};

// ---------------------------------------------------------------------------
// File handles
// ---------------------------------------------------------------------------

#[test]
fn test_from_path_infers_media_type() {
    let png = FileHandle::from_path("/tmp/some/Texture.PNG");
    assert_eq!(png.name, "Texture.PNG");
    assert_eq!(png.media_type.as_deref(), Some("image/png"));
    assert!(png.is_image());

    let obj = FileHandle::from_path("mesh.obj");
    assert_eq!(obj.media_type.as_deref(), Some("model/obj"));
    assert!(!obj.is_image());

    let unknown = FileHandle::from_path("README");
    assert!(unknown.media_type.is_none());
    assert!(!unknown.is_image());
}

#[test]
fn test_decode_texture_natural_size() {
    let texture = decode_texture("t.png", &png_bytes(31, 17)).unwrap();
    assert_eq!((texture.width(), texture.height()), (31, 17));
    assert_eq!(texture.encoding, "Png");
}

#[test]
fn test_decode_garbage_fails() {
    let err = decode_texture("t.png", b"definitely not an image").unwrap_err();
    assert!(matches!(err, SeamtexError::ImageError(_)));
}

// ---------------------------------------------------------------------------
// Single requests
// ---------------------------------------------------------------------------

#[test]
fn test_complete_reads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("disk.png");
    std::fs::write(&path, png_bytes(8, 4)).unwrap();

    match complete(LoadRequest::Texture(FileHandle::from_path(&path))) {
        LoadCompletion::Texture(texture) => {
            assert_eq!(texture.name, "disk.png");
            assert_eq!(texture.raster.dimensions(), (8, 4));
        }
        _ => panic!("expected a decoded texture"),
    }
}

#[test]
fn test_complete_non_image_is_ignored() {
    let file = FileHandle::from_bytes("a.txt", Some("text/plain".into()), b"x".to_vec());
    match complete(LoadRequest::Texture(file)) {
        LoadCompletion::Ignored { name } => assert_eq!(name, "a.txt"),
        _ => panic!("expected the drop to be ignored"),
    }
}

#[test]
fn test_complete_missing_mesh_fails() {
    let dir = TempDir::new().unwrap();
    let file = FileHandle::from_path(dir.path().join("gone.obj"));
    match complete(LoadRequest::Mesh(file)) {
        LoadCompletion::Failed { kind, name, .. } => {
            assert_eq!(kind, ResourceKind::Mesh);
            assert_eq!(name, "gone.obj");
        }
        _ => panic!("expected a failure"),
    }
}

// ---------------------------------------------------------------------------
// Loader thread
// ---------------------------------------------------------------------------

#[test]
fn test_loader_thread_completes_every_request() {
    let (result_tx, result_rx) = mpsc::channel();
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    let requests = spawn_loader(result_tx, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    requests
        .send(LoadRequest::Texture(texture_file("t.png", 16, 16)))
        .unwrap();
    requests.send(LoadRequest::Mesh(mesh_file("m.obj"))).unwrap();
    requests
        .send(LoadRequest::Texture(FileHandle::from_bytes(
            "n.txt",
            None,
            b"text".to_vec(),
        )))
        .unwrap();

    let (mut session, _calls) = new_session();
    for _ in 0..3 {
        let completion = result_rx.recv_timeout(Duration::from_secs(10)).unwrap();
        session.apply_completion(completion).unwrap();
    }
    drop(requests);

    assert!(session.readiness().both_ready());
    assert_eq!(session.texture().unwrap().name, "t.png");
    assert_eq!(notified.load(Ordering::SeqCst), 3);
}

#[test]
fn test_completion_order_does_not_matter() {
    let texture = complete(LoadRequest::Texture(texture_file("t.png", 8, 8)));
    let mesh = complete(LoadRequest::Mesh(mesh_file("m.obj")));

    let (mut session, _calls) = new_session();
    session.apply_completion(mesh).unwrap();
    session.apply_completion(texture).unwrap();
    let c = session.controls();
    assert!(c.compress_enabled && c.smooth_enabled);
}

#[test]
fn test_failed_completion_surfaces_error() {
    let (mut session, _calls) = new_session();
    let err = session
        .apply_completion(LoadCompletion::Failed {
            kind: ResourceKind::Texture,
            name: "t.png".into(),
            message: "truncated".into(),
        })
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to load Texture file t.png: truncated"
    );
    assert!(!session.readiness().texture_ready());
}
