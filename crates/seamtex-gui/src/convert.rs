use seamtex_core::raster::Raster;

/// Convert an RGBA8 raster to an egui ColorImage.
pub fn raster_to_color_image(raster: &Raster) -> egui::ColorImage {
    let (w, h) = raster.dimensions();
    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], raster.as_raw())
}

/// Upload `raster` into `slot`, reusing the existing texture when there is one.
pub fn upload(
    ctx: &egui::Context,
    slot: &mut Option<egui::TextureHandle>,
    name: &str,
    raster: &Raster,
) {
    if raster.is_empty() {
        *slot = None;
        return;
    }
    let image = raster_to_color_image(raster);
    match slot {
        Some(handle) => handle.set(image, egui::TextureOptions::LINEAR),
        None => *slot = Some(ctx.load_texture(name, image, egui::TextureOptions::LINEAR)),
    }
}
