use seamtex_core::resource::loader::LoadRequest;
use seamtex_core::resource::{FileHandle, ResourceKind};

use crate::app::SeamtexApp;

pub fn show(ctx: &egui::Context, app: &mut SeamtexApp) {
    egui::SidePanel::left("controls")
        .resizable(false)
        .default_width(280.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                inputs_section(ctx, ui, app);
                ui.separator();
                pipeline_section(ui, app);
                ui.separator();
                output_section(ui, app);
                ui.separator();
                super::mesh::show(ui, app);
            });
        });
}

fn inputs_section(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut SeamtexApp) {
    super::section_header(ui, "Inputs", None);
    ui.add_space(4.0);

    let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
    let pointer = ctx.input(|i| i.pointer.latest_pos());
    let hover_in = |rect: egui::Rect| hovering && pointer.is_some_and(|p| rect.contains(p));

    let mesh_label = match app.session.geometry() {
        Some(g) => g.name.clone(),
        None => "Drop mesh (.obj) here".to_string(),
    };
    let mesh_hover = app.ui_state.mesh_drop_rect.is_some_and(hover_in);
    app.ui_state.mesh_drop_rect = Some(super::drop_zone(ui, &mesh_label, mesh_hover));
    if ui.small_button("Open mesh...").clicked() {
        open_in_background(app, ResourceKind::Mesh, "Meshes", &["obj"]);
    }

    ui.add_space(4.0);
    let texture_label = match app.session.texture() {
        Some(t) => t.name.clone(),
        None => "Drop texture image here".to_string(),
    };
    let texture_hover = app.ui_state.texture_drop_rect.is_some_and(hover_in);
    app.ui_state.texture_drop_rect = Some(super::drop_zone(ui, &texture_label, texture_hover));
    if ui.small_button("Open texture...").clicked() {
        open_in_background(
            app,
            ResourceKind::Texture,
            "Images",
            &["png", "jpg", "jpeg", "bmp", "tga", "tif", "tiff", "webp"],
        );
    }
}

fn pipeline_section(ui: &mut egui::Ui, app: &mut SeamtexApp) {
    let status = app.ui_state.busy.then_some("busy");
    super::section_header(ui, "Optimize", status);
    ui.add_space(4.0);

    let controls = app.ui_state.controls;
    ui.add_enabled(
        controls.compress_enabled,
        egui::Checkbox::new(&mut app.ui_state.compress, "Compress"),
    );
    ui.add_enabled(
        controls.smooth_enabled,
        egui::Checkbox::new(&mut app.ui_state.smooth, "Smooth seams"),
    );
    ui.horizontal(|ui| {
        ui.label("Alpha:");
        ui.add(egui::TextEdit::singleline(&mut app.ui_state.alpha_text).desired_width(80.0));
    });

    ui.add_space(4.0);
    let can_run = !app.ui_state.busy && app.ui_state.pending_run.is_none();
    if ui
        .add_enabled(
            can_run,
            egui::Button::new("Run").min_size(egui::vec2(ui.available_width(), 28.0)),
        )
        .clicked()
    {
        app.start_run();
    }
}

fn output_section(ui: &mut egui::Ui, app: &mut SeamtexApp) {
    super::section_header(ui, "Output", None);
    ui.add_space(4.0);

    if app.session.can_toggle_view() {
        let target = app.session.view_selection().other();
        if ui.button(format!("Show {target} texture")).clicked() && app.session.toggle_view() {
            app.textures.dirty = true;
        }
    }

    let Some(action) = app.session.download_action() else {
        ui.small("No output yet");
        return;
    };
    if ui
        .add_enabled(
            !app.ui_state.busy,
            egui::Button::new(action.label).min_size(egui::vec2(ui.available_width(), 28.0)),
        )
        .clicked()
    {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&action.file_name)
            .save_file()
        else {
            return;
        };
        let Some(artifact) = app.session.output() else {
            return;
        };
        match action.save(artifact, &path) {
            Ok(()) => app.ui_state.add_log(format!("Saved: {}", path.display())),
            Err(e) => app.report(e),
        }
    }
}

/// Show a file dialog off the UI thread and queue the pick for loading.
fn open_in_background(
    app: &SeamtexApp,
    kind: ResourceKind,
    filter: &'static str,
    extensions: &'static [&'static str],
) {
    let load_tx = app.load_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter(filter, extensions)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let file = FileHandle::from_path(path);
            let request = match kind {
                ResourceKind::Mesh => LoadRequest::Mesh(file),
                ResourceKind::Texture => LoadRequest::Texture(file),
            };
            let _ = load_tx.send(request);
        }
    });
}
