//! A single user session: two inputs, one pipeline, one displayed canvas
//! and its zoom lens.
//!
//! All state that a browser page would keep in globals lives here, so two
//! sessions never interfere. Every mutation goes through a `Session`
//! method, and everything other components need to react to is published
//! as a [`SessionEvent`].

use std::sync::mpsc;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::{Result, SeamtexError};
use crate::events::{EventBus, SessionEvent};
use crate::lens::ZoomLens;
use crate::pipeline::{
    execute, ArtifactKind, DownloadAction, OutputArtifact, PendingRun, PipelineMode,
    PipelineRequest,
};
use crate::processor::{MeshGeometry, TextureProcessor};
use crate::raster::Raster;
use crate::readiness::{ControlState, Readiness};
use crate::resource::loader::{read_texture, LoadCompletion};
use crate::resource::{FileHandle, ResourceKind, TextureResource};
use crate::view::{InfoAnnotation, TextureView, ViewSelection};

pub struct Session {
    config: SessionConfig,
    processor: Box<dyn TextureProcessor>,
    readiness: Readiness,
    texture: Option<TextureResource>,
    geometry: Option<Arc<MeshGeometry>>,
    /// Name and bytes of the mesh the processor holds, for restoring it
    /// after a rejected replacement.
    mesh_source: Option<(String, Vec<u8>)>,
    /// False when a restore failed and the processor no longer holds the
    /// mesh described by `geometry`.
    mesh_in_sync: bool,
    output: Option<OutputArtifact>,
    /// Result canvas, repainted by every successful run.
    result_canvas: Option<Raster>,
    view: TextureView,
    lens: Option<ZoomLens>,
    magnifier: Option<Raster>,
    busy: bool,
    events: EventBus,
}

/// The surface backing `which`, if it exists yet.
fn source_for<'a>(
    texture: &'a Option<TextureResource>,
    result_canvas: &'a Option<Raster>,
    which: ViewSelection,
) -> Option<&'a Raster> {
    match which {
        ViewSelection::Input => texture.as_ref().map(|t| &t.raster),
        ViewSelection::Output => result_canvas.as_ref(),
    }
}

impl Session {
    /// A session with a zero-sized displayed canvas. The canvas adopts the
    /// first texture's size unless [`set_display_size`](Self::set_display_size)
    /// is called before.
    pub fn new(config: SessionConfig, processor: Box<dyn TextureProcessor>) -> Self {
        Self {
            config,
            processor,
            readiness: Readiness::default(),
            texture: None,
            geometry: None,
            mesh_source: None,
            mesh_in_sync: true,
            output: None,
            result_canvas: None,
            view: TextureView::new(0, 0),
            lens: None,
            magnifier: None,
            busy: false,
            events: EventBus::default(),
        }
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn processor(&self) -> &dyn TextureProcessor {
        self.processor.as_ref()
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn controls(&self) -> ControlState {
        self.readiness.controls()
    }

    pub fn texture(&self) -> Option<&TextureResource> {
        self.texture.as_ref()
    }

    pub fn geometry(&self) -> Option<&Arc<MeshGeometry>> {
        self.geometry.as_ref()
    }

    pub fn output(&self) -> Option<&OutputArtifact> {
        self.output.as_ref()
    }

    pub fn result_canvas(&self) -> Option<&Raster> {
        self.result_canvas.as_ref()
    }

    /// Save action for the current artifact.
    pub fn download_action(&self) -> Option<DownloadAction> {
        self.output.as_ref().map(DownloadAction::for_artifact)
    }

    pub fn view_selection(&self) -> ViewSelection {
        self.view.selection()
    }

    pub fn annotation(&self) -> Option<&InfoAnnotation> {
        self.view.annotation()
    }

    pub fn display_canvas(&self) -> &Raster {
        self.view.canvas().surface()
    }

    pub fn display_size(&self) -> (u32, u32) {
        self.view.canvas().size()
    }

    pub fn lens(&self) -> Option<&ZoomLens> {
        self.lens.as_ref()
    }

    pub fn magnifier(&self) -> Option<&Raster> {
        self.magnifier.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Surface currently painted into the displayed canvas.
    pub fn active_source(&self) -> Option<&Raster> {
        source_for(&self.texture, &self.result_canvas, self.view.selection())
    }

    // -- Resource loading -------------------------------------------------

    /// Read a mesh file and hand it to the processor.
    pub fn load_mesh(&mut self, file: &FileHandle) -> Result<()> {
        let bytes = file.read_bytes()?;
        self.accept_mesh(&file.name, &bytes)
    }

    /// Read and decode a texture file. Returns `Ok(false)` when the file is
    /// not an image; nothing changes in that case.
    pub fn load_texture(&mut self, file: &FileHandle) -> Result<bool> {
        match read_texture(file)? {
            Some(texture) => {
                self.accept_texture(texture);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply the result of a background load.
    pub fn apply_completion(&mut self, completion: LoadCompletion) -> Result<()> {
        match completion {
            LoadCompletion::Mesh { name, bytes } => self.accept_mesh(&name, &bytes),
            LoadCompletion::Texture(texture) => {
                self.accept_texture(texture);
                Ok(())
            }
            LoadCompletion::Ignored { name } => {
                debug!(name, "Ignored non-image texture drop");
                Ok(())
            }
            LoadCompletion::Failed {
                kind,
                name,
                message,
            } => Err(SeamtexError::LoadFailed {
                kind,
                name,
                message,
            }),
        }
    }

    /// Parse mesh bytes with the processor. On failure the previous mesh is
    /// reloaded into the processor and nothing else changes.
    pub fn accept_mesh(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let loaded = self
            .processor
            .load_mesh(name, bytes)
            .and_then(|()| MeshGeometry::read(name, self.processor.as_ref()));
        let geometry = match loaded {
            Ok(geometry) => Arc::new(geometry),
            Err(e) => {
                warn!(name, error = %e, "Mesh rejected");
                self.restore_mesh();
                return Err(e);
            }
        };
        info!(name, faces = geometry.face_count(), "Mesh loaded");

        self.mesh_source = Some((name.to_string(), bytes.to_vec()));
        self.mesh_in_sync = true;
        self.geometry = Some(Arc::clone(&geometry));
        let controls = self.readiness.mark_ready(ResourceKind::Mesh);
        self.events.publish(SessionEvent::MeshReady { geometry });
        if let Some(controls) = controls {
            self.events.publish(SessionEvent::ControlsChanged(controls));
        }
        if self.readiness.texture_ready() {
            self.events.publish(SessionEvent::ActiveTextureChanged {
                view: self.view.selection(),
            });
        }
        Ok(())
    }

    /// Put the last accepted mesh back into the processor.
    fn restore_mesh(&mut self) {
        let Some((name, bytes)) = self.mesh_source.as_ref() else {
            return;
        };
        match self.processor.load_mesh(name, bytes) {
            Ok(()) => debug!(name = %name, "Previous mesh restored"),
            Err(e) => {
                warn!(name = %name, error = %e, "Previous mesh could not be restored");
                self.mesh_in_sync = false;
            }
        }
    }

    /// Install a decoded texture, replacing any previous one, and show it.
    pub fn accept_texture(&mut self, texture: TextureResource) {
        let (width, height) = (texture.width(), texture.height());
        info!(name = %texture.name, width, height, "Texture loaded");

        let (dw, dh) = self.view.canvas().size();
        if dw == 0 || dh == 0 {
            self.view.resize(width, height, None);
        }
        self.texture = Some(texture);
        let controls = self.readiness.mark_ready(ResourceKind::Texture);

        if self.lens.is_none() {
            let lens_cfg = &self.config.lens;
            self.lens = Some(ZoomLens::new(
                self.view.canvas().size(),
                lens_cfg.initial_size,
                lens_cfg.default_zoom_percent,
                lens_cfg.max_zoom_percent,
            ));
        } else if let Some(lens) = self.lens.as_mut() {
            let (cw, ch) = self.view.canvas().size();
            lens.set_canvas_size(cw, ch);
        }

        self.events
            .publish(SessionEvent::TextureReady { width, height });
        if let Some(controls) = controls {
            self.events.publish(SessionEvent::ControlsChanged(controls));
        }
        if let Err(e) = self.select_view(ViewSelection::Input) {
            debug_assert!(false, "input view unavailable right after texture load: {e}");
            warn!(error = %e, "Input view unavailable after texture load");
        }
    }

    // -- Pipeline ---------------------------------------------------------

    /// Validate a run and mark the session busy.
    ///
    /// Returns `Ok(None)` when neither compress nor smooth is requested, and
    /// an alert error when a required input is missing. In both cases
    /// nothing changes and no external call is made.
    pub fn begin_run(&mut self, request: &PipelineRequest) -> Result<Option<PendingRun>> {
        let Some(mode) = request.mode() else {
            debug!("Neither compress nor smooth requested, nothing to do");
            return Ok(None);
        };
        self.readiness.require(mode)?;
        if mode.requires_mesh() && !self.mesh_in_sync {
            let name = self.mesh_source.as_ref().map(|(n, _)| n.clone()).unwrap_or_default();
            return Err(SeamtexError::MeshLost(name));
        }
        if self.busy {
            return Err(SeamtexError::Busy);
        }
        self.busy = true;
        self.events.publish(SessionEvent::BusyChanged(true));
        Ok(Some(PendingRun {
            mode,
            alpha: request.alpha,
        }))
    }

    /// Run the external operation, install the artifact and switch to the
    /// output view. The session is no longer busy afterwards, whether the
    /// call succeeded or not.
    pub fn finish_run(&mut self, run: PendingRun) -> Result<ArtifactKind> {
        let result = self.execute_run(run.mode, run.alpha);
        self.busy = false;
        self.events.publish(SessionEvent::BusyChanged(false));
        result
    }

    /// [`begin_run`](Self::begin_run) and [`finish_run`](Self::finish_run)
    /// back to back. `Ok(None)` for a no-op request.
    pub fn run_pipeline(&mut self, request: &PipelineRequest) -> Result<Option<ArtifactKind>> {
        match self.begin_run(request)? {
            Some(run) => self.finish_run(run).map(Some),
            None => Ok(None),
        }
    }

    fn execute_run(&mut self, mode: PipelineMode, alpha: f32) -> Result<ArtifactKind> {
        let texture = self
            .texture
            .as_ref()
            .ok_or(SeamtexError::MissingResource(ResourceKind::Texture))?;
        let name = match mode.artifact_kind() {
            ArtifactKind::Raster => &self.config.export.raster_file_name,
            ArtifactKind::Compressed => &self.config.export.compressed_file_name,
        };

        let artifact = execute(self.processor.as_mut(), &texture.raster, mode, alpha, name)?;
        let kind = artifact.kind();

        let (width, height) = texture.raster.dimensions();
        let canvas = artifact
            .raster()
            .cloned()
            .unwrap_or_else(|| Raster::new(width, height));
        self.result_canvas = Some(canvas);
        self.output = Some(artifact);
        self.events.publish(SessionEvent::OutputReady { kind });

        self.select_view(ViewSelection::Output)?;
        Ok(kind)
    }

    // -- Texture view -----------------------------------------------------

    /// Show the input or output texture on the displayed canvas.
    pub fn select_view(&mut self, which: ViewSelection) -> Result<()> {
        let (source, annotation) = match which {
            ViewSelection::Input => {
                let texture = self
                    .texture
                    .as_ref()
                    .ok_or(SeamtexError::ViewUnavailable(which.label()))?;
                (&texture.raster, InfoAnnotation::for_texture(texture))
            }
            ViewSelection::Output => {
                let (Some(artifact), Some(canvas)) =
                    (self.output.as_ref(), self.result_canvas.as_ref())
                else {
                    return Err(SeamtexError::ViewUnavailable(which.label()));
                };
                (canvas, InfoAnnotation::for_artifact(artifact, canvas.dimensions()))
            }
        };

        debug!(view = %which, annotation = %annotation, "Selecting texture view");
        self.view.show(which, source, annotation);
        self.events
            .publish(SessionEvent::ActiveTextureChanged { view: which });
        self.repaint_lens();
        Ok(())
    }

    /// Whether the view-switch control should be shown.
    pub fn can_toggle_view(&self) -> bool {
        self.texture.is_some() && self.output.is_some()
    }

    /// Flip between input and output. No-op unless both exist.
    pub fn toggle_view(&mut self) -> bool {
        self.can_toggle_view() && self.select_view(self.view.selection().other()).is_ok()
    }

    /// The displayed canvas changed its on-screen size.
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        if (width, height) == self.view.canvas().size() {
            return;
        }
        let source = source_for(&self.texture, &self.result_canvas, self.view.selection());
        self.view.resize(width, height, source);
        if let Some(lens) = self.lens.as_mut() {
            lens.set_canvas_size(width, height);
        }
        self.repaint_lens();
    }

    // -- Zoom lens --------------------------------------------------------

    pub fn resize_lens(&mut self, percent: u32) {
        if let Some(lens) = self.lens.as_mut() {
            lens.resize(percent);
            self.repaint_lens();
        }
    }

    /// Pointer moved over the displayed canvas.
    pub fn move_lens(&mut self, pointer: (f32, f32)) -> bool {
        let moved = self
            .lens
            .as_mut()
            .is_some_and(|lens| lens.move_to(pointer));
        if moved {
            self.repaint_lens();
        }
        moved
    }

    /// Pointer clicked on the displayed canvas or the lens.
    pub fn click_lens(&mut self, pointer: (f32, f32)) {
        if let Some(lens) = self.lens.as_mut() {
            lens.click(pointer);
            self.repaint_lens();
        }
    }

    fn repaint_lens(&mut self) {
        let Some(lens) = self.lens.as_ref() else {
            return;
        };
        if let Some(source) = source_for(&self.texture, &self.result_canvas, self.view.selection())
        {
            self.magnifier = Some(lens.render(source));
        }
    }
}
