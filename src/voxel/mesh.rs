use super::{Face, Shape, Voxel, VoxelGrid};
use crate::error::MeshError;

pub(in crate::voxel) const FLOATS_PER_VERTEX: usize = 3;
pub(in crate::voxel) const VERTICES_PER_FACE: usize = 4;
pub(in crate::voxel) const INDICES_PER_FACE: usize = 6;

/// Positions and triangle-list indices for one chunk.
///
/// Storage is sized for the worst case of every face of every cell being
/// visible and is reused across rebuilds. Only the prefix reported by
/// [`vertex_count`](Self::vertex_count) and [`index_count`](Self::index_count)
/// is valid.
pub struct MeshBuffer {
    pub(in crate::voxel) vertices: Box<[f32]>,
    pub(in crate::voxel) indices: Box<[u32]>,
    pub(in crate::voxel) vertex_count: usize,
    pub(in crate::voxel) index_count: usize,
}

impl MeshBuffer {
    /// Worst-case storage for a grid of side `size`, which must already be validated.
    pub(in crate::voxel) fn with_grid_size(size: u32) -> Self {
        let faces = Shape::new(size).volume() * Face::COUNT;
        let vertex_floats = faces * VERTICES_PER_FACE * FLOATS_PER_VERTEX;
        Self {
            vertices: vec![0.0; vertex_floats].into_boxed_slice(),
            indices: vec![0; faces * INDICES_PER_FACE].into_boxed_slice(),
            vertex_count: 0,
            index_count: 0,
        }
    }

    /// Flat `[x, y, z, x, y, z, ..]` positions of the emitted vertices.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices[..self.vertex_count * FLOATS_PER_VERTEX]
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices[..self.index_count]
    }

    pub fn positions(&self) -> impl Iterator<Item = uv::Vec3> + '_ {
        self.vertices()
            .chunks_exact(FLOATS_PER_VERTEX)
            .map(|p| uv::Vec3::new(p[0], p[1], p[2]))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn face_count(&self) -> usize {
        self.index_count / INDICES_PER_FACE
    }

    /// Vertices the backing storage can hold.
    pub fn capacity_vertices(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    pub(in crate::voxel) fn capacity_faces(&self) -> usize {
        self.indices.len() / INDICES_PER_FACE
    }

    pub(in crate::voxel) fn clear(&mut self) {
        self.vertex_count = 0;
        self.index_count = 0;
    }
}

impl std::fmt::Debug for MeshBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshBuffer")
            .field("vertex_count", &self.vertex_count)
            .field("index_count", &self.index_count)
            .field("capacity_vertices", &self.capacity_vertices())
            .finish()
    }
}

/// Write cursor over a pre-sized region of a [`MeshBuffer`].
///
/// `base` is the mesh-wide index of the region's first vertex, so regions
/// filled independently still reference the right vertices.
pub(in crate::voxel) struct FaceWriter<'a> {
    vertices: &'a mut [f32],
    indices: &'a mut [u32],
    base: u32,
    vertex_len: usize,
    index_len: usize,
}

impl<'a> FaceWriter<'a> {
    pub fn new(vertices: &'a mut [f32], indices: &'a mut [u32], base: u32) -> Self {
        Self {
            vertices,
            indices,
            base,
            vertex_len: 0,
            index_len: 0,
        }
    }

    pub fn vertex_len(&self) -> usize {
        self.vertex_len
    }

    pub fn index_len(&self) -> usize {
        self.index_len
    }

    fn push_face(&mut self, face: Face, top: [f32; 3]) {
        let v = self.vertex_len * FLOATS_PER_VERTEX;
        debug_assert!(
            v + VERTICES_PER_FACE * FLOATS_PER_VERTEX <= self.vertices.len()
                && self.index_len + INDICES_PER_FACE <= self.indices.len(),
            "mesh capacity exceeded: buffer sizing does not cover this grid"
        );

        let first = self.base + self.vertex_len as u32;
        for (slot, corner) in face.corners().iter().enumerate() {
            let at = v + slot * FLOATS_PER_VERTEX;
            self.vertices[at] = top[0] + corner[0];
            self.vertices[at + 1] = top[1] + corner[1];
            self.vertices[at + 2] = top[2] + corner[2];
        }
        for (slot, &corner) in face.winding().iter().enumerate() {
            self.indices[self.index_len + slot] = first + corner;
        }

        self.vertex_len += VERTICES_PER_FACE;
        self.index_len += INDICES_PER_FACE;
    }

    fn push_voxel(&mut self, voxel: Voxel, x: u32, y: u32, z: u32) {
        let faces = voxel.faces();
        if !voxel.is_solid() || faces.is_empty() {
            return;
        }
        let top = [x as f32, y as f32, z as f32];
        for face in faces.iter() {
            self.push_face(face, top)
        }
    }
}

/// Emits the `x` slab of `grid`, y then z, into `writer`.
pub(in crate::voxel) fn mesh_slab(grid: &VoxelGrid, x: u32, writer: &mut FaceWriter) {
    let shape = grid.shape();
    let voxels = grid.voxels();
    for y in 0..shape.size() {
        for z in 0..shape.size() {
            writer.push_voxel(voxels[shape.linearize(x, y, z)], x, y, z)
        }
    }
}

/// Turns a [`VoxelGrid`] into one quad per visible face.
#[derive(Debug)]
pub struct ChunkMesher {
    pub(in crate::voxel) buffer: MeshBuffer,
}

impl ChunkMesher {
    /// Mesher with storage for grids up to side `size`.
    pub fn new(size: u32) -> Result<Self, MeshError> {
        VoxelGrid::check_size(size)?;
        Ok(Self {
            buffer: MeshBuffer::with_grid_size(size),
        })
    }

    pub fn buffer(&self) -> &MeshBuffer {
        &self.buffer
    }

    /// Rebuilds the mesh from `grid`, whose visibility must be up to date.
    ///
    /// Cells are scanned x outermost, then y, then z, so identical grids
    /// always produce identical buffers.
    pub fn build(&mut self, grid: &VoxelGrid) -> Result<&MeshBuffer, MeshError> {
        self.prepare(grid)?;

        let buffer = &mut self.buffer;
        let mut writer = FaceWriter::new(&mut buffer.vertices, &mut buffer.indices, 0);
        for x in 0..grid.size() {
            mesh_slab(grid, x, &mut writer);
        }
        let (vertex_count, index_count) = (writer.vertex_len(), writer.index_len());
        buffer.vertex_count = vertex_count;
        buffer.index_count = index_count;

        log::debug!(
            "meshed {}³ grid: {} faces, {} vertices, {} indices",
            grid.size(),
            buffer.face_count(),
            vertex_count,
            index_count
        );
        Ok(&self.buffer)
    }

    /// Checks the build preconditions and makes room for `grid` before any emission.
    pub(in crate::voxel) fn prepare(&mut self, grid: &VoxelGrid) -> Result<(), MeshError> {
        let size = grid.size();
        VoxelGrid::check_size(size)?;
        if !grid.is_visibility_computed() {
            return Err(MeshError::VisibilityNotComputed);
        }
        if self.buffer.capacity_faces() < grid.shape().volume() * Face::COUNT {
            log::debug!("growing mesh buffer for {}³ grid", size);
            self.buffer = MeshBuffer::with_grid_size(size);
        }
        self.buffer.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(size: u32, solid: &[(u32, u32, u32)]) -> VoxelGrid {
        let mut grid = VoxelGrid::new(size).unwrap();
        for &(x, y, z) in solid {
            grid.set(x, y, z, true).unwrap();
        }
        grid.compute_visibility();
        grid
    }

    #[test]
    fn refuses_stale_visibility() {
        let mut grid = VoxelGrid::new(2).unwrap();
        let mut mesher = ChunkMesher::new(2).unwrap();
        assert_eq!(
            mesher.build(&grid).unwrap_err(),
            MeshError::VisibilityNotComputed
        );
        grid.compute_visibility();
        assert!(mesher.build(&grid).is_ok());
        grid.set(0, 0, 0, true).unwrap();
        assert!(mesher.build(&grid).is_err());
    }

    #[test]
    fn cell_top_is_its_grid_y() {
        let grid = grid_with(4, &[(2, 3, 1)]);
        let mut mesher = ChunkMesher::new(4).unwrap();
        let mesh = mesher.build(&grid).unwrap();
        let (min_y, max_y) = mesh
            .positions()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });
        assert_eq!((min_y, max_y), (2.0, 3.0));
        assert!(mesh.positions().all(|p| (2.0..=3.0).contains(&p.x)));
        assert!(mesh.positions().all(|p| (1.0..=2.0).contains(&p.z)));
    }

    #[test]
    fn first_face_uses_table_order() {
        let grid = grid_with(1, &[(0, 0, 0)]);
        let mut mesher = ChunkMesher::new(1).unwrap();
        let mesh = mesher.build(&grid).unwrap();
        // Up is emitted first
        assert_eq!(&mesh.indices()[..6], &[2, 1, 0, 0, 3, 2]);
        assert_eq!(
            &mesh.vertices()[..12],
            &[0., 0., 0., 1., 0., 0., 1., 0., 1., 0., 0., 1.]
        );
        // Down follows with indices based at the cursor
        assert_eq!(&mesh.indices()[6..12], &[4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn indices_stay_in_range() {
        let mut grid = VoxelGrid::new(6).unwrap();
        grid.fill(crate::voxel::RandomFill::seeded(3, 0.5));
        grid.compute_visibility();
        let mut mesher = ChunkMesher::new(6).unwrap();
        let mesh = mesher.build(&grid).unwrap();
        assert!(mesh
            .indices()
            .iter()
            .all(|&i| (i as usize) < mesh.vertex_count()));
        assert_eq!(mesh.face_count(), grid.visible_face_count());
    }

    #[test]
    fn rejects_unusable_sizes() {
        assert_eq!(ChunkMesher::new(0).unwrap_err(), MeshError::InvalidSize(0));
        let too_big = VoxelGrid::MAX_SIZE + 1;
        assert_eq!(
            ChunkMesher::new(too_big).unwrap_err(),
            MeshError::InvalidSize(too_big)
        );
        assert_eq!(
            ChunkMesher::new(u32::MAX).unwrap_err(),
            MeshError::InvalidSize(u32::MAX)
        );
        assert!(ChunkMesher::new(1).is_ok());
    }

    #[test]
    fn grows_for_larger_grids() {
        let grid = grid_with(5, &[(4, 4, 4)]);
        let mut mesher = ChunkMesher::new(2).unwrap();
        let mesh = mesher.build(&grid).unwrap();
        assert_eq!(mesh.face_count(), 6);
        assert!(mesh.capacity_vertices() >= 5 * 5 * 5 * 24);
    }
}
