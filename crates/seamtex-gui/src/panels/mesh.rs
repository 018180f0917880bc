use crate::app::SeamtexApp;

/// UV triangles drawn per frame at most.
const MAX_DRAWN_TRIANGLES: usize = 20_000;

/// Mesh viewer summary: geometry stats and the UV layout over the mapped texture.
pub fn show(ui: &mut egui::Ui, app: &SeamtexApp) {
    let viewer = &app.viewer;
    let mapped = viewer.active_view.map(|v| v.label());
    super::section_header(ui, "Viewer", mapped);
    ui.add_space(4.0);

    let Some(ref geometry) = viewer.geometry else {
        ui.small("No mesh loaded");
        return;
    };

    ui.small(format!("{} faces", geometry.face_count()));
    if let Some(bounds) = geometry.bounds() {
        ui.small(format!(
            "center ({:.2}, {:.2}, {:.2}), radius {:.2}",
            bounds.center[0], bounds.center[1], bounds.center[2], bounds.radius
        ));
    }

    let side = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
    ui.painter().rect_filled(rect, 0.0, egui::Color32::from_gray(20));

    if viewer.active_view.is_some() {
        if let Some(ref handle) = app.textures.display {
            ui.painter().image(
                handle.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }

    let stroke = egui::Stroke::new(0.5, egui::Color32::from_rgba_unmultiplied(80, 220, 255, 160));
    let to_screen = |p: egui::Pos2| rect.min + p.to_vec2() * side;
    for tri in viewer.uv_triangles.iter().take(MAX_DRAWN_TRIANGLES) {
        let points = tri.iter().map(|&p| to_screen(p)).collect();
        ui.painter()
            .add(egui::Shape::closed_line(points, stroke));
    }
}
