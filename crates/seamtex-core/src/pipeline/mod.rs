mod artifact;
mod run;
mod types;

pub use artifact::{describe_compressed, DownloadAction};
pub use run::{execute, PendingRun};
pub use types::{parse_alpha, ArtifactData, ArtifactKind, OutputArtifact, PipelineMode, PipelineRequest};
