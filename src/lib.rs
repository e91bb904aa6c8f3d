//! Face-culled voxel chunk meshing.
//!
//! A [`VoxelGrid`] holds the occupancy of a cubic chunk and the per-cell set
//! of faces that are not hidden by a solid neighbor. A [`ChunkMesher`] turns
//! that into one quad per visible face, written into buffers sized once for
//! the worst case.
//!
//! ```
//! use voxmesh::{ChunkMesher, VoxelGrid};
//!
//! let mut grid = VoxelGrid::new(16)?;
//! grid.fill_with(|x, y, z| (x + y + z) % 3 == 0);
//! grid.compute_visibility();
//!
//! let mut mesher = ChunkMesher::new(grid.size())?;
//! let mesh = mesher.build(&grid)?;
//! assert_eq!(mesh.face_count(), grid.visible_face_count());
//! # Ok::<(), voxmesh::MeshError>(())
//! ```

pub mod error;
pub mod voxel;

pub use error::MeshError;
pub use voxel::{ChunkMesher, Face, FaceMask, Generator, MeshBuffer, Voxel, VoxelGrid};
