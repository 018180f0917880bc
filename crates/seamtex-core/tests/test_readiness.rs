#[allow(dead_code)]
mod common;

use seamtex_core::events::SessionEvent;
use seamtex_core::pipeline::{ArtifactKind, PipelineMode, PipelineRequest};
use seamtex_core::readiness::{ControlState, Readiness};
use seamtex_core::resource::ResourceKind;
use seamtex_core::SeamtexError;

use common::{
    broken_mesh_file, loaded_session, mesh_file, mesh_loads, new_session, session_with,
    texture_file, FakeProcessor,
};

// ---------------------------------------------------------------------------
// Readiness flags
// ---------------------------------------------------------------------------

#[test]
fn test_initial_controls_disabled() {
    let r = Readiness::default();
    assert!(!r.mesh_ready());
    assert!(!r.texture_ready());
    assert_eq!(r.controls(), ControlState::default());
}

#[test]
fn test_controls_follow_every_load_order() {
    let orders: [&[ResourceKind]; 5] = [
        &[ResourceKind::Mesh],
        &[ResourceKind::Texture],
        &[ResourceKind::Mesh, ResourceKind::Texture],
        &[ResourceKind::Texture, ResourceKind::Mesh],
        &[ResourceKind::Texture, ResourceKind::Texture, ResourceKind::Mesh],
    ];
    for order in orders {
        let mut r = Readiness::default();
        for &kind in order {
            r.mark_ready(kind);
            let c = r.controls();
            assert_eq!(c.compress_enabled, r.texture_ready(), "order {order:?}");
            assert_eq!(
                c.smooth_enabled,
                r.mesh_ready() && r.texture_ready(),
                "order {order:?}"
            );
        }
    }
}

#[test]
fn test_mark_ready_reports_only_changes() {
    let mut r = Readiness::default();
    // Mesh alone does not enable anything.
    assert_eq!(r.mark_ready(ResourceKind::Mesh), None);
    let changed = r.mark_ready(ResourceKind::Texture).unwrap();
    assert!(changed.compress_enabled);
    assert!(changed.smooth_enabled);
    // Reloading a texture leaves the controls as they were.
    assert_eq!(r.mark_ready(ResourceKind::Texture), None);
}

#[test]
fn test_require_checks_texture_first() {
    let r = Readiness::default();
    let err = r.require(PipelineMode::Smooth).unwrap_err();
    assert!(matches!(
        err,
        SeamtexError::MissingResource(ResourceKind::Texture)
    ));
    assert_eq!(err.to_string(), "Texture file missing!");
    assert!(err.is_alert());
}

#[test]
fn test_require_mesh_only_when_smoothing() {
    let mut r = Readiness::default();
    r.mark_ready(ResourceKind::Texture);
    assert!(r.require(PipelineMode::Compress).is_ok());
    for mode in [PipelineMode::Smooth, PipelineMode::CompressAndSmooth] {
        let err = r.require(mode).unwrap_err();
        assert_eq!(err.to_string(), "Mesh file missing!");
    }
    r.mark_ready(ResourceKind::Mesh);
    assert!(r.require(PipelineMode::CompressAndSmooth).is_ok());
}

// ---------------------------------------------------------------------------
// Session-level readiness
// ---------------------------------------------------------------------------

#[test]
fn test_mesh_then_texture_enables_everything() {
    let (mut session, _calls) = new_session();
    let events = session.subscribe();

    session.load_mesh(&mesh_file("m.obj")).unwrap();
    assert!(session.readiness().mesh_ready());
    assert!(!session.controls().smooth_enabled);

    session.load_texture(&texture_file("t.png", 32, 32)).unwrap();
    let c = session.controls();
    assert!(c.compress_enabled && c.smooth_enabled);

    let received: Vec<SessionEvent> = events.try_iter().collect();
    assert!(matches!(received[0], SessionEvent::MeshReady { .. }));
    let controls: Vec<ControlState> = received
        .iter()
        .filter_map(|e| match e {
            SessionEvent::ControlsChanged(c) => Some(*c),
            _ => None,
        })
        .collect();
    assert_eq!(
        controls,
        vec![ControlState {
            compress_enabled: true,
            smooth_enabled: true,
        }]
    );
}

#[test]
fn test_texture_then_mesh_announces_active_texture_to_viewer() {
    let (mut session, _calls) = new_session();
    session.load_texture(&texture_file("t.png", 16, 16)).unwrap();
    let events = session.subscribe();

    session.load_mesh(&mesh_file("m.obj")).unwrap();
    let received: Vec<SessionEvent> = events.try_iter().collect();
    assert!(matches!(received[0], SessionEvent::MeshReady { .. }));
    assert!(received
        .iter()
        .any(|e| matches!(e, SessionEvent::ActiveTextureChanged { .. })));
}

#[test]
fn test_failed_mesh_changes_nothing() {
    let (mut session, _calls) = new_session();
    let bad = seamtex_core::resource::FileHandle::from_bytes("bad.obj", None, b"bad mesh".to_vec());
    assert!(session.load_mesh(&bad).is_err());
    assert!(!session.readiness().mesh_ready());
    assert!(session.geometry().is_none());
}

#[test]
fn test_rejected_geometry_restores_previous_mesh() {
    let (mut session, calls) = loaded_session();
    let err = session.load_mesh(&broken_mesh_file("broken.obj")).unwrap_err();
    assert!(matches!(err, SeamtexError::BufferSize { .. }));

    assert_eq!(session.geometry().unwrap().name, "mesh.obj");
    assert_eq!(
        mesh_loads(&calls),
        vec!["load_mesh:mesh.obj", "load_mesh:broken.obj", "load_mesh:mesh.obj"]
    );

    let kind = session
        .run_pipeline(&PipelineRequest::from_form(false, true, "0.5"))
        .unwrap();
    assert_eq!(kind, Some(ArtifactKind::Raster));
}

#[test]
fn test_rejected_first_geometry_keeps_smoothing_blocked() {
    let (mut session, _calls) = new_session();
    session.load_texture(&texture_file("tex.png", 64, 64)).unwrap();
    assert!(session.load_mesh(&broken_mesh_file("broken.obj")).is_err());
    assert!(!session.readiness().mesh_ready());
    assert!(session.geometry().is_none());

    let err = session
        .run_pipeline(&PipelineRequest::from_form(false, true, "0.5"))
        .unwrap_err();
    assert!(matches!(err, SeamtexError::MissingResource(ResourceKind::Mesh)));
}

#[test]
fn test_lost_mesh_blocks_smoothing_until_reload() {
    let (fake, calls) = FakeProcessor::new();
    let reject = fake.reject_meshes.clone();
    let mut session = session_with(fake);
    session.load_mesh(&mesh_file("mesh.obj")).unwrap();
    session.load_texture(&texture_file("tex.png", 64, 64)).unwrap();

    reject.set(true);
    assert!(session.load_mesh(&mesh_file("other.obj")).is_err());
    assert_eq!(mesh_loads(&calls).last().unwrap(), "load_mesh:mesh.obj");

    let smooth = PipelineRequest::from_form(false, true, "0.5");
    let err = session.run_pipeline(&smooth).unwrap_err();
    assert!(matches!(err, SeamtexError::MeshLost(ref name) if name == "mesh.obj"));
    assert!(!session.is_busy());

    // Compression does not touch the mesh.
    let compress = PipelineRequest::from_form(true, false, "0.5");
    assert_eq!(session.run_pipeline(&compress).unwrap(), Some(ArtifactKind::Compressed));

    reject.set(false);
    session.load_mesh(&mesh_file("mesh.obj")).unwrap();
    assert_eq!(session.run_pipeline(&smooth).unwrap(), Some(ArtifactKind::Raster));
}

#[test]
fn test_mesh_geometry_exposed() {
    let (mut session, _calls) = new_session();
    session.load_mesh(&mesh_file("m.obj")).unwrap();
    let geometry = session.geometry().unwrap();
    assert_eq!(geometry.face_count(), 2);
    assert_eq!(geometry.positions.len(), 18);
    assert_eq!(geometry.uvs.len(), 12);
    let bounds = geometry.bounds().unwrap();
    assert!(bounds.radius > 0.0);
}

// ---------------------------------------------------------------------------
// Event bus
// ---------------------------------------------------------------------------

#[test]
fn test_dropped_subscriber_is_forgotten() {
    use seamtex_core::events::EventBus;

    let mut bus = EventBus::default();
    let kept = bus.subscribe();
    let dropped = bus.subscribe();
    drop(dropped);
    assert_eq!(bus.subscriber_count(), 2);

    bus.publish(SessionEvent::BusyChanged(true));
    assert_eq!(bus.subscriber_count(), 1);
    assert!(matches!(kept.try_recv(), Ok(SessionEvent::BusyChanged(true))));
}
