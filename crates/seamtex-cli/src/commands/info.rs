use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use seamtex_core::pipeline::describe_compressed;
use seamtex_core::processor::{open_backend, MeshGeometry};
use seamtex_core::resource::{decode_texture, media_type_for_path};

#[derive(Args)]
pub struct InfoArgs {
    /// Texture image, DDS container or OBJ mesh
    pub file: PathBuf,

    /// Processing module used to parse meshes
    #[arg(long)]
    pub backend: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    println!("File:        {}", args.file.display());
    println!("Size:        {:.1} KB", bytes.len() as f64 / 1024.0);

    if let Some((encoding, width, height)) = describe_compressed(&bytes) {
        println!("Container:   DDS");
        println!("Dimensions:  {}x{}", width, height);
        println!("Encoding:    {}", encoding);
        return Ok(());
    }

    if media_type_for_path(&args.file) == Some("model/obj") {
        let mut processor = open_backend(args.backend.as_deref())?;
        processor
            .load_mesh(&name, &bytes)
            .with_context(|| format!("Failed to parse mesh {}", name))?;
        let geometry = MeshGeometry::read(&name, processor.as_ref())?;
        println!("Faces:       {}", geometry.face_count());
        if let Some(bounds) = geometry.bounds() {
            println!(
                "Bounds:      center ({:.3}, {:.3}, {:.3}), radius {:.3}",
                bounds.center[0], bounds.center[1], bounds.center[2], bounds.radius
            );
        }
        return Ok(());
    }

    let texture = match decode_texture(&name, &bytes) {
        Ok(texture) => texture,
        Err(e) => bail!("{} is not a texture, mesh or DDS file: {}", name, e),
    };
    println!("Dimensions:  {}x{}", texture.width(), texture.height());
    println!("Encoding:    {}", texture.encoding);

    Ok(())
}
