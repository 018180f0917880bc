pub mod controls;
pub mod mesh;
pub mod status;
pub mod texture;
pub mod zoom;

pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}

/// A framed area files can be dropped on. Returns its rect.
pub(crate) fn drop_zone(ui: &mut egui::Ui, text: &str, hovering: bool) -> egui::Rect {
    let size = egui::vec2(ui.available_width(), 48.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let fill = if hovering {
        egui::Color32::from_gray(60)
    } else {
        egui::Color32::from_gray(40)
    };
    ui.painter().rect_filled(rect, 4.0, fill);
    ui.painter().rect_stroke(
        rect,
        4.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(90)),
        egui::epaint::StrokeKind::Inside,
    );
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(13.0),
        egui::Color32::from_gray(170),
    );
    rect
}
