use crate::consts::{POSITION_FLOATS_PER_FACE, UV_FLOATS_PER_FACE};
use crate::error::{Result, SeamtexError};

use super::{TextureProcessor, UvOrientation};

/// Geometry read back from the processor after a mesh load. This is all the
/// viewer needs to build its scene.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshGeometry {
    pub name: String,
    /// 9 floats per face.
    pub positions: Vec<f32>,
    /// 6 floats per face, mirrored in V.
    pub uvs: Vec<f32>,
}

/// Bounding sphere of the mesh, used to frame the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshBounds {
    pub center: [f32; 3],
    pub radius: f32,
}

impl MeshGeometry {
    /// Copy the position and UV arrays out of the processor.
    pub fn read(name: &str, processor: &dyn TextureProcessor) -> Result<Self> {
        let faces = processor.face_count();
        let positions = processor.positions()?;
        let uvs = processor.uvs(UvOrientation::MirrorV)?;
        check_len("positions", faces * POSITION_FLOATS_PER_FACE, positions.len())?;
        check_len("uvs", faces * UV_FLOATS_PER_FACE, uvs.len())?;
        Ok(Self {
            name: name.to_string(),
            positions,
            uvs,
        })
    }

    pub fn face_count(&self) -> usize {
        self.positions.len() / POSITION_FLOATS_PER_FACE
    }

    /// Sphere around the axis-aligned bounding box, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<MeshBounds> {
        let mut points = self.positions.chunks_exact(3);
        let first = points.next()?;
        let mut min = [first[0], first[1], first[2]];
        let mut max = min;
        for p in points {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        let center = [
            (min[0] + max[0]) * 0.5,
            (min[1] + max[1]) * 0.5,
            (min[2] + max[2]) * 0.5,
        ];
        let half = [
            max[0] - center[0],
            max[1] - center[1],
            max[2] - center[2],
        ];
        let radius = (half[0] * half[0] + half[1] * half[1] + half[2] * half[2]).sqrt();
        Some(MeshBounds { center, radius })
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(SeamtexError::BufferSize {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
