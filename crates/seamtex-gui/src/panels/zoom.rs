use crate::app::SeamtexApp;

pub fn show(ctx: &egui::Context, app: &mut SeamtexApp) {
    egui::SidePanel::right("zoom")
        .resizable(true)
        .default_width(320.0)
        .show(ctx, |ui| {
            super::section_header(ui, "Zoom", None);
            ui.add_space(4.0);

            let Some(lens) = app.session.lens() else {
                ui.small("Load a texture to use the zoom lens");
                return;
            };

            let max = app.session.config().lens.max_zoom_percent;
            let mut percent = lens.zoom_percent();
            let fixed = !lens.is_tracking();
            if ui
                .add(egui::Slider::new(&mut percent, 0..=max).text("Zoom %"))
                .changed()
            {
                app.session.resize_lens(percent);
                app.textures.dirty = true;
            }
            if fixed {
                ui.small("Lens fixed, click the texture to follow the pointer again");
            }

            ui.add_space(4.0);
            if let Some(ref handle) = app.textures.magnifier {
                let [w, h] = handle.size();
                let width = ui.available_width();
                let height = width * h as f32 / w.max(1) as f32;
                ui.image((handle.id(), egui::vec2(width, height)));
            }
        });
}
