use crate::app::SeamtexApp;

pub fn show(ctx: &egui::Context, app: &mut SeamtexApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let Some(texture) = app.session.texture() else {
            show_placeholder(ui);
            return;
        };

        let (w, h) = fit_size(texture.width(), texture.height(), rect.size());
        if app.session.display_size() != (w, h) {
            app.session.set_display_size(w, h);
            app.textures.dirty = true;
        }

        let img_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(w as f32, h as f32));
        let response = ui.allocate_rect(img_rect, egui::Sense::click());

        if let Some(ref handle) = app.textures.display {
            ui.painter().image(
                handle.id(),
                img_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        handle_lens_pointer(&response, img_rect, app);
        draw_lens(ui, img_rect, app);

        if let Some(annotation) = app.session.annotation() {
            draw_annotation(ui, rect, &annotation.to_string());
        }
    });
}

/// Largest size with the texture's aspect ratio that fits `available`,
/// never larger than the texture itself.
fn fit_size(width: u32, height: u32, available: egui::Vec2) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let scale = (available.x / width as f32)
        .min(available.y / height as f32)
        .min(1.0);
    (
        ((width as f32 * scale).round() as u32).max(1),
        ((height as f32 * scale).round() as u32).max(1),
    )
}

fn handle_lens_pointer(response: &egui::Response, img_rect: egui::Rect, app: &mut SeamtexApp) {
    let local = |pos: egui::Pos2| {
        let v = pos - img_rect.min;
        (v.x, v.y)
    };
    if let Some(pos) = response.hover_pos() {
        if app.session.move_lens(local(pos)) {
            app.textures.dirty = true;
        }
    }
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            app.session.click_lens(local(pos));
            app.textures.dirty = true;
        }
    }
}

fn draw_lens(ui: &egui::Ui, img_rect: egui::Rect, app: &SeamtexApp) {
    let Some(lens) = app.session.lens() else {
        return;
    };
    let g = lens.geometry();
    let lens_rect = egui::Rect::from_min_size(
        img_rect.min + egui::vec2(g.x, g.y),
        egui::vec2(g.width, g.height),
    );
    let color = if lens.is_tracking() {
        egui::Color32::from_white_alpha(200)
    } else {
        egui::Color32::from_rgb(255, 200, 60)
    };
    ui.painter().rect_stroke(
        lens_rect,
        0.0,
        egui::Stroke::new(1.5, color),
        egui::epaint::StrokeKind::Outside,
    );
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn draw_annotation(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Drop a mesh and a texture to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
