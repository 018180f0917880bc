use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use seamtex_core::config::SessionConfig;
use seamtex_core::consts::BUSY_LABEL;
use seamtex_core::pipeline::PipelineRequest;
use seamtex_core::processor::open_backend;
use seamtex_core::resource::FileHandle;
use seamtex_core::Session;
use tracing::debug;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input texture image
    #[arg(short, long)]
    pub texture: PathBuf,

    /// OBJ mesh the texture is mapped onto (required for smoothing)
    #[arg(short, long)]
    pub mesh: Option<PathBuf>,

    /// Block-compress the texture
    #[arg(long)]
    pub compress: bool,

    /// Smooth texture seams
    #[arg(long)]
    pub smooth: bool,

    /// Seam blend parameter
    #[arg(long)]
    pub alpha: Option<String>,

    /// Processing module (shared library)
    #[arg(long)]
    pub backend: Option<PathBuf>,

    /// Session config TOML file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file path (defaults to the download name for the result)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ProcessArgs) -> Result<()> {
    let config = match args.config {
        Some(ref path) => SessionConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    let request = build_request(args, &config);
    let backend_path = args.backend.as_ref().or(config.backend.library.as_ref());
    let processor = open_backend(backend_path.map(PathBuf::as_path))?;
    debug!(backend = processor.name(), "Processor ready");

    let mut session = Session::new(config, processor);

    if let Some(ref mesh) = args.mesh {
        session
            .load_mesh(&FileHandle::from_path(mesh))
            .with_context(|| format!("Failed to load mesh {}", mesh.display()))?;
    }
    let loaded = session
        .load_texture(&FileHandle::from_path(&args.texture))
        .with_context(|| format!("Failed to load texture {}", args.texture.display()))?;
    if !loaded {
        bail!("{} is not an image", args.texture.display());
    }

    crate::summary::print_process_summary(&session, &request);

    let Some(run) = session.begin_run(&request)? else {
        println!("Neither --compress nor --smooth requested, nothing to do.");
        return Ok(());
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} {elapsed}")?);
    pb.set_message(BUSY_LABEL);
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = session.finish_run(run);
    pb.finish_and_clear();
    result?;

    let (Some(artifact), Some(action)) = (session.output(), session.download_action()) else {
        bail!("Run finished without an output");
    };
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&action.file_name));
    action
        .save(artifact, &path)
        .with_context(|| format!("Failed to save {}", path.display()))?;

    crate::summary::print_result_summary(&session, &path);
    Ok(())
}

/// Flags on the command line win; otherwise the config's pipeline defaults apply.
fn build_request(args: &ProcessArgs, config: &SessionConfig) -> PipelineRequest {
    let defaults = &config.pipeline;
    let alpha = args.alpha.as_deref().unwrap_or(&defaults.alpha);
    if args.compress || args.smooth {
        PipelineRequest::from_form(args.compress, args.smooth, alpha)
    } else {
        PipelineRequest::from_form(defaults.compress, defaults.smooth, alpha)
    }
}
