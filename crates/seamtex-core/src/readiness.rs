use crate::error::{Result, SeamtexError};
use crate::pipeline::PipelineMode;
use crate::resource::ResourceKind;

/// Which pipeline controls a front end should enable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    pub compress_enabled: bool,
    pub smooth_enabled: bool,
}

/// Readiness of the two session inputs.
///
/// Flags only ever go from `false` to `true`; a session never unloads a
/// resource, it only replaces it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Readiness {
    mesh: bool,
    texture: bool,
}

impl Readiness {
    pub fn mesh_ready(&self) -> bool {
        self.mesh
    }

    pub fn texture_ready(&self) -> bool {
        self.texture
    }

    pub fn both_ready(&self) -> bool {
        self.mesh && self.texture
    }

    /// Mark a resource loaded. Returns the new control state when it changed.
    pub fn mark_ready(&mut self, kind: ResourceKind) -> Option<ControlState> {
        let before = self.controls();
        match kind {
            ResourceKind::Mesh => self.mesh = true,
            ResourceKind::Texture => self.texture = true,
        }
        let after = self.controls();
        (after != before).then_some(after)
    }

    /// Compress needs a texture; smoothing needs both inputs.
    pub fn controls(&self) -> ControlState {
        ControlState {
            compress_enabled: self.texture,
            smooth_enabled: self.mesh && self.texture,
        }
    }

    /// Check the prerequisites of `mode`. The texture is checked first, so a
    /// session with neither input reports the missing texture.
    pub fn require(&self, mode: PipelineMode) -> Result<()> {
        if !self.texture {
            return Err(SeamtexError::MissingResource(ResourceKind::Texture));
        }
        if mode.requires_mesh() && !self.mesh {
            return Err(SeamtexError::MissingResource(ResourceKind::Mesh));
        }
        Ok(())
    }
}
