use std::sync::Arc;
use std::time::Instant;

use seamtex_core::config::PipelineDefaults;
use seamtex_core::pipeline::{PendingRun, PipelineRequest};
use seamtex_core::processor::MeshGeometry;
use seamtex_core::readiness::ControlState;
use seamtex_core::view::ViewSelection;

/// Form fields and transient UI state.
pub struct UiState {
    pub compress: bool,
    pub smooth: bool,
    pub alpha_text: String,
    pub controls: ControlState,
    pub busy: bool,

    /// Run validated and waiting for the busy indicator to paint.
    pub pending_run: Option<(PendingRun, Instant)>,

    /// Alert dialog text (missing prerequisite).
    pub alert: Option<String>,

    /// Log messages.
    pub log_messages: Vec<String>,

    /// Drop zones laid out this frame, used to route dropped files.
    pub mesh_drop_rect: Option<egui::Rect>,
    pub texture_drop_rect: Option<egui::Rect>,
}

impl UiState {
    pub fn new(defaults: &PipelineDefaults) -> Self {
        Self {
            compress: defaults.compress,
            smooth: defaults.smooth,
            alpha_text: defaults.alpha.clone(),
            controls: ControlState::default(),
            busy: false,
            pending_run: None,
            alert: None,
            log_messages: Vec::new(),
            mesh_drop_rect: None,
            texture_drop_rect: None,
        }
    }

    pub fn request(&self) -> PipelineRequest {
        PipelineRequest::from_form(self.compress, self.smooth, &self.alpha_text)
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}

/// GPU copies of the displayed canvas and the magnifier.
#[derive(Default)]
pub struct CanvasTextures {
    pub display: Option<egui::TextureHandle>,
    pub magnifier: Option<egui::TextureHandle>,
    /// Session surfaces changed since the last upload.
    pub dirty: bool,
}

/// What the mesh viewer panel shows. Built from session events only.
#[derive(Default)]
pub struct ViewerState {
    pub geometry: Option<Arc<MeshGeometry>>,
    /// Texture mapped onto the mesh.
    pub active_view: Option<ViewSelection>,
    /// UV triangles in texture space, `[0, 1]` with v pointing down.
    pub uv_triangles: Vec<[egui::Pos2; 3]>,
}

impl ViewerState {
    /// Scene setup once geometry is available.
    pub fn initialize(&mut self, geometry: Arc<MeshGeometry>) {
        self.uv_triangles = geometry
            .uvs
            .chunks_exact(6)
            .map(|t| {
                [
                    egui::pos2(t[0], t[1]),
                    egui::pos2(t[2], t[3]),
                    egui::pos2(t[4], t[5]),
                ]
            })
            .collect();
        self.geometry = Some(geometry);
    }
}
