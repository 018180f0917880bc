use std::path::Path;

use console::Style;
use seamtex_core::pipeline::PipelineRequest;
use seamtex_core::Session;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_process_summary(session: &Session, request: &PipelineRequest) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Seamtex"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(7)));
    println!();

    if let Some(texture) = session.texture() {
        println!(
            "  {}  {} {}",
            s.label.apply_to("Texture "),
            s.path.apply_to(&texture.name),
            s.value.apply_to(format!(
                "({}x{}, {})",
                texture.width(),
                texture.height(),
                texture.encoding
            )),
        );
    }
    match session.geometry() {
        Some(geometry) => println!(
            "  {}  {} {}",
            s.label.apply_to("Mesh    "),
            s.path.apply_to(&geometry.name),
            s.value.apply_to(format!("({} faces)", geometry.face_count())),
        ),
        None => println!(
            "  {}  {}",
            s.label.apply_to("Mesh    "),
            s.disabled.apply_to("none"),
        ),
    }
    println!(
        "  {}  {}",
        s.label.apply_to("Backend "),
        s.value.apply_to(session.processor().name()),
    );

    match request.mode() {
        Some(mode) => {
            let alpha = if mode.requires_mesh() {
                format!(" alpha={}", request.alpha)
            } else {
                String::new()
            };
            println!(
                "  {}  {}{}",
                s.label.apply_to("Mode    "),
                s.method.apply_to(mode),
                s.value.apply_to(alpha),
            );
        }
        None => println!(
            "  {}  {}",
            s.label.apply_to("Mode    "),
            s.disabled.apply_to("disabled"),
        ),
    }
    println!();
}

pub fn print_result_summary(session: &Session, path: &Path) {
    let s = Styles::new();

    if let Some(annotation) = session.annotation() {
        println!(
            "  {}  {}",
            s.label.apply_to("Result  "),
            s.value.apply_to(annotation),
        );
    }
    println!(
        "  {}  {}",
        s.label.apply_to("Saved   "),
        s.path.apply_to(path.display()),
    );
    println!();
}
