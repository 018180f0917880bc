use seamtex_core::consts::BUSY_LABEL;

use crate::app::SeamtexApp;

pub fn show(ctx: &egui::Context, app: &mut SeamtexApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if app.ui_state.busy {
            ui.add(egui::ProgressBar::new(0.0).text(BUSY_LABEL).animate(true));
        } else {
            // Invisible placeholder, same height
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            let (w, h) = app.session.display_size();
            if w > 0 && h > 0 {
                ui.label(format!("{w}x{h}"));
                ui.separator();
            }
            if let Some(lens) = app.session.lens() {
                ui.label(format!("Zoom: {}%", lens.zoom_percent()));
                ui.separator();
            }
            ui.label(format!("View: {}", app.session.view_selection()));
            ui.separator();
            ui.label(format!("Module: {}", app.session.processor().name()));
        });

        ui.add_space(2.0);
    });
}
