use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use seamtex_core::config::SessionConfig;
use seamtex_core::events::SessionEvent;
use seamtex_core::pipeline::PipelineRequest;
use seamtex_core::processor::{open_backend, TextureProcessor, UnavailableProcessor};
use seamtex_core::resource::loader::{spawn_loader, LoadCompletion, LoadRequest};
use seamtex_core::resource::{FileHandle, ResourceKind};
use seamtex_core::{SeamtexError, Session};
use tracing::{error, warn};

use crate::convert::upload;
use crate::panels;
use crate::state::{CanvasTextures, UiState, ViewerState};

pub struct SeamtexApp {
    pub session: Session,
    pub load_tx: mpsc::Sender<LoadRequest>,
    pub load_rx: mpsc::Receiver<LoadCompletion>,
    pub events: mpsc::Receiver<SessionEvent>,
    pub ui_state: UiState,
    pub textures: CanvasTextures,
    pub viewer: ViewerState,
}

impl SeamtexApp {
    pub fn new(ctx: &egui::Context, config_path: Option<PathBuf>) -> Self {
        let config = match config_path {
            Some(path) => SessionConfig::load(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Config not loaded, using defaults");
                SessionConfig::default()
            }),
            None => SessionConfig::default(),
        };

        let processor: Box<dyn TextureProcessor> =
            match open_backend(config.backend.library.as_deref()) {
                Ok(processor) => processor,
                Err(e) => {
                    error!(error = %e, "Processing module unavailable");
                    Box::new(UnavailableProcessor)
                }
            };

        let mut ui_state = UiState::new(&config.pipeline);
        ui_state.add_log(format!("Processing module: {}", processor.name()));

        let mut session = Session::new(config, processor);
        let events = session.subscribe();

        let (result_tx, load_rx) = mpsc::channel();
        let repaint_ctx = ctx.clone();
        let load_tx = spawn_loader(result_tx, move || repaint_ctx.request_repaint())
            .expect("Failed to spawn loader thread");

        Self {
            session,
            load_tx,
            load_rx,
            events,
            ui_state,
            textures: CanvasTextures::default(),
            viewer: ViewerState::default(),
        }
    }

    pub fn request_load(&mut self, kind: ResourceKind, file: FileHandle) {
        self.ui_state.add_log(format!("Loading {kind}: {}", file.name));
        let request = match kind {
            ResourceKind::Mesh => LoadRequest::Mesh(file),
            ResourceKind::Texture => LoadRequest::Texture(file),
        };
        let _ = self.load_tx.send(request);
    }

    /// Validate the form and show the busy indicator; the external call runs
    /// once `busy_delay_ms` has passed and the indicator has painted.
    pub fn start_run(&mut self) {
        let request: PipelineRequest = self.ui_state.request();
        match self.session.begin_run(&request) {
            Ok(Some(run)) => self.ui_state.pending_run = Some((run, Instant::now())),
            Ok(None) => self.ui_state.add_log("Nothing selected to run".into()),
            Err(e) => self.report(e),
        }
    }

    pub fn report(&mut self, e: SeamtexError) {
        if e.is_alert() {
            self.ui_state.alert = Some(e.to_string());
        } else {
            error!(error = %e, "Session error");
            self.ui_state.add_log(format!("ERROR: {e}"));
        }
    }

    /// Apply finished background loads.
    fn poll_loads(&mut self) {
        while let Ok(completion) = self.load_rx.try_recv() {
            if let LoadCompletion::Ignored { ref name } = completion {
                self.ui_state.add_log(format!("Ignored {name}: not an image"));
            }
            if let Err(e) = self.session.apply_completion(completion) {
                self.report(e);
            }
        }
    }

    /// React to everything the session published.
    fn poll_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SessionEvent::MeshReady { geometry } => {
                    self.ui_state.add_log(format!(
                        "Mesh {} loaded ({} faces)",
                        geometry.name,
                        geometry.face_count()
                    ));
                    self.viewer.initialize(geometry);
                }
                SessionEvent::TextureReady { width, height } => {
                    self.ui_state.add_log(format!("Texture loaded ({width}x{height})"));
                    self.textures.dirty = true;
                }
                SessionEvent::ControlsChanged(controls) => {
                    self.ui_state.controls = controls;
                }
                SessionEvent::ActiveTextureChanged { view } => {
                    if self.viewer.geometry.is_some() {
                        self.viewer.active_view = Some(view);
                    }
                    self.textures.dirty = true;
                }
                SessionEvent::OutputReady { kind } => {
                    self.ui_state.add_log(format!("Produced {kind}"));
                }
                SessionEvent::BusyChanged(busy) => {
                    self.ui_state.busy = busy;
                }
            }
        }
    }

    /// Run the pending external call once the busy indicator had time to paint.
    fn drive_pending_run(&mut self, ctx: &egui::Context) {
        let delay = Duration::from_millis(self.session.config().busy_delay_ms);
        let ready = match self.ui_state.pending_run {
            Some((_, started)) => started.elapsed() >= delay,
            None => return,
        };
        if !ready {
            ctx.request_repaint_after(delay);
            return;
        }
        if let Some((run, _)) = self.ui_state.pending_run.take() {
            if let Err(e) = self.session.finish_run(run) {
                self.report(e);
            }
            self.textures.dirty = true;
        }
    }

    /// Route files dropped on the window to the drop zone under the pointer.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (dropped, pointer) =
            ctx.input(|i| (i.raw.dropped_files.clone(), i.pointer.latest_pos()));
        for file in dropped {
            let over = |rect: Option<egui::Rect>| {
                matches!((rect, pointer), (Some(r), Some(p)) if r.contains(p))
            };
            let handle = dropped_file_handle(&file);
            let kind = if over(self.ui_state.mesh_drop_rect) {
                ResourceKind::Mesh
            } else if over(self.ui_state.texture_drop_rect) || handle.is_image() {
                ResourceKind::Texture
            } else {
                ResourceKind::Mesh
            };
            self.request_load(kind, handle);
        }
    }

    fn refresh_textures(&mut self, ctx: &egui::Context) {
        if !self.textures.dirty {
            return;
        }
        upload(ctx, &mut self.textures.display, "display", self.session.display_canvas());
        match self.session.magnifier() {
            Some(magnifier) => upload(ctx, &mut self.textures.magnifier, "magnifier", magnifier),
            None => self.textures.magnifier = None,
        }
        self.textures.dirty = false;
    }
}

fn dropped_file_handle(file: &egui::DroppedFile) -> FileHandle {
    let media_type = (!file.mime.is_empty()).then(|| file.mime.clone());
    match (&file.path, &file.bytes) {
        (Some(path), _) => {
            let mut handle = FileHandle::from_path(path);
            if media_type.is_some() {
                handle.media_type = media_type;
            }
            handle
        }
        (None, Some(bytes)) => FileHandle::from_bytes(&file.name, media_type, bytes.to_vec()),
        (None, None) => FileHandle::from_bytes(&file.name, media_type, Vec::new()),
    }
}

impl eframe::App for SeamtexApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();
        self.handle_dropped_files(ctx);
        self.drive_pending_run(ctx);
        self.poll_events();
        self.refresh_textures(ctx);

        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::zoom::show(ctx, self);
        panels::texture::show(ctx, self);

        // Panel interactions changed session surfaces; upload them next frame.
        if self.textures.dirty {
            ctx.request_repaint();
        }

        if let Some(message) = self.ui_state.alert.clone() {
            egui::Window::new("Seamtex")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(message);
                        ui.add_space(8.0);
                        if ui.button("OK").clicked() {
                            self.ui_state.alert = None;
                        }
                    });
                });
        }
    }
}
