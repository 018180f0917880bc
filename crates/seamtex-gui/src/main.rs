mod app;
mod convert;
mod panels;
mod state;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Optional session config path as the only argument.
    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true)
            .with_title("Seamtex"),
        ..Default::default()
    };

    eframe::run_native(
        "Seamtex",
        options,
        Box::new(move |cc| Ok(Box::new(app::SeamtexApp::new(&cc.egui_ctx, config_path)))),
    )
}
