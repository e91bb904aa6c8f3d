use thiserror::Error;

/// Contract violations reported by the grid and the mesher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Grid side is zero, or so large that vertex indices would overflow `u32`.
    #[error("invalid grid size {0}: must be in 1..={max}", max = crate::voxel::VoxelGrid::MAX_SIZE)]
    InvalidSize(u32),

    /// Meshing was requested before face visibility was (re)computed.
    #[error("face visibility has not been computed since the grid was last modified")]
    VisibilityNotComputed,
}
