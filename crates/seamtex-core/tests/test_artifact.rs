#[allow(dead_code)]
mod common;

use tempfile::TempDir;

use seamtex_core::pipeline::{describe_compressed, ArtifactKind, PipelineRequest};
use seamtex_core::processor::{
    open_backend, NativeProcessor, TextureProcessor, UnavailableProcessor,
};
use seamtex_core::resource::decode_texture;
use seamtex_core::SeamtexError;

use common::{dds_header, loaded_session};

#[test]
fn test_stale_download_action_rejects_newer_output() {
    let (mut session, _calls) = loaded_session();
    session
        .run_pipeline(&PipelineRequest::from_form(true, false, "0.5"))
        .unwrap();
    let stale = session.download_action().unwrap();
    assert_eq!(stale.kind, ArtifactKind::Compressed);

    session
        .run_pipeline(&PipelineRequest::from_form(false, true, "0.5"))
        .unwrap();
    let artifact = session.output().unwrap();
    let err = stale.encode(artifact).unwrap_err();
    assert!(matches!(
        err,
        SeamtexError::StaleDownload {
            expected: ArtifactKind::Compressed,
            actual: ArtifactKind::Raster,
        }
    ));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(&stale.file_name);
    assert!(stale.save(artifact, &path).is_err());
    assert!(!path.exists());
}

// ---------------------------------------------------------------------------
// Compressed container inspection
// ---------------------------------------------------------------------------

#[test]
fn test_describe_dxt_variants() {
    let cases: [(&[u8; 4], &str); 3] = [
        (b"DXT1", "DXT1 (BC1)"),
        (b"DXT3", "DXT3 (BC2)"),
        (b"DXT5", "DXT5 (BC3)"),
    ];
    for (fourcc, label) in cases {
        let (encoding, w, h) = describe_compressed(&dds_header(64, 32, fourcc)).unwrap();
        assert_eq!(encoding, label);
        assert_eq!((w, h), (64, 32));
    }
}

#[test]
fn test_describe_unknown_and_uncompressed() {
    let (encoding, _, _) = describe_compressed(&dds_header(4, 4, b"ATI2")).unwrap();
    assert_eq!(encoding, "DDS (ATI2)");
    let (encoding, _, _) = describe_compressed(&dds_header(4, 4, &[0; 4])).unwrap();
    assert_eq!(encoding, "DDS (uncompressed)");
}

#[test]
fn test_describe_rejects_non_dds() {
    assert!(describe_compressed(b"").is_none());
    assert!(describe_compressed(b"PNG\x0d\x0a").is_none());
    // Correct magic, truncated header.
    assert!(describe_compressed(&dds_header(4, 4, b"DXT1")[..40]).is_none());
}

// ---------------------------------------------------------------------------
// Download actions
// ---------------------------------------------------------------------------

#[test]
fn test_raster_download_is_png() {
    let (mut session, _calls) = loaded_session();
    session
        .run_pipeline(&PipelineRequest::from_form(false, true, "0.5"))
        .unwrap();
    let artifact = session.output().unwrap();
    let action = session.download_action().unwrap();
    assert_eq!(action.kind, ArtifactKind::Raster);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(&action.file_name);
    action.save(artifact, &path).unwrap();

    let reloaded = decode_texture("optimized.png", &std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(reloaded.raster, *artifact.raster().unwrap());
}

#[test]
fn test_compressed_download_is_raw_container() {
    let (mut session, _calls) = loaded_session();
    session
        .run_pipeline(&PipelineRequest::from_form(true, false, "0.5"))
        .unwrap();
    let artifact = session.output().unwrap();
    let action = session.download_action().unwrap();
    let bytes = action.encode(artifact).unwrap();
    assert_eq!(&bytes[..4], b"DDS ");
    assert_eq!(describe_compressed(&bytes).unwrap().1, 256);
}

// ---------------------------------------------------------------------------
// Backends
// ---------------------------------------------------------------------------

#[test]
fn test_unavailable_processor_fails_every_operation() {
    let mut p = UnavailableProcessor;
    assert!(p.load_mesh("m.obj", b"v 0 0 0").is_err());
    assert!(p.allocate_image_buffers(4, 4).is_err());
    assert!(p.smooth(0.5).is_err());
    assert!(p.compress().is_err());
    assert!(p.output_buf().is_empty());
    assert_eq!(p.face_count(), 0);
}

#[test]
fn test_open_backend_without_library() {
    let backend = open_backend(None).unwrap();
    assert_eq!(backend.name(), "unavailable");
}

#[test]
fn test_native_processor_missing_library() {
    let dir = TempDir::new().unwrap();
    match NativeProcessor::open(&dir.path().join("libnothing.so")) {
        Err(SeamtexError::BackendLoad { message, .. }) => assert_eq!(message, "file not found"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("opened a library that does not exist"),
    }
}
