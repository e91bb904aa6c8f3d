//! Slab-partitioned meshing on the rayon pool.
//!
//! Each x slab gets a disjoint, pre-reserved range of the output buffers
//! computed from a prefix sum over per-slab face counts, so workers never
//! share a write cursor. Output matches [`ChunkMesher::build`] exactly.

use super::mesh::{mesh_slab, FaceWriter, FLOATS_PER_VERTEX, INDICES_PER_FACE, VERTICES_PER_FACE};
use super::{ChunkMesher, MeshBuffer, VoxelGrid};
use crate::error::MeshError;
use rayon::prelude::*;

fn slab_face_count(grid: &VoxelGrid, x: u32) -> usize {
    let shape = grid.shape();
    let voxels = grid.voxels();
    let mut count = 0;
    for y in 0..shape.size() {
        for z in 0..shape.size() {
            let voxel = voxels[shape.linearize(x, y, z)];
            if voxel.is_solid() {
                count += voxel.faces().count() as usize;
            }
        }
    }
    count
}

impl ChunkMesher {
    /// Same result as [`build`](Self::build), computed one x slab per task.
    pub fn build_parallel(&mut self, grid: &VoxelGrid) -> Result<&MeshBuffer, MeshError> {
        self.prepare(grid)?;

        let face_counts: Vec<usize> = (0..grid.size())
            .into_par_iter()
            .map(|x| slab_face_count(grid, x))
            .collect();

        let mut vertices: &mut [f32] = &mut self.buffer.vertices;
        let mut indices: &mut [u32] = &mut self.buffer.indices;
        let mut base = 0usize;
        let mut writers = Vec::with_capacity(face_counts.len());
        for &faces in &face_counts {
            let (slab_vertices, rest) = std::mem::take(&mut vertices)
                .split_at_mut(faces * VERTICES_PER_FACE * FLOATS_PER_VERTEX);
            vertices = rest;
            let (slab_indices, rest) =
                std::mem::take(&mut indices).split_at_mut(faces * INDICES_PER_FACE);
            indices = rest;
            writers.push(FaceWriter::new(slab_vertices, slab_indices, base as u32));
            base += faces * VERTICES_PER_FACE;
        }

        writers
            .par_iter_mut()
            .zip(face_counts.par_iter())
            .enumerate()
            .for_each(|(x, (writer, &faces))| {
                mesh_slab(grid, x as u32, writer);
                debug_assert_eq!(writer.index_len(), faces * INDICES_PER_FACE);
                log::trace!("slab {}: {} faces", x, faces);
            });
        drop(writers);

        let total: usize = face_counts.iter().sum();
        self.buffer.vertex_count = total * VERTICES_PER_FACE;
        self.buffer.index_count = total * INDICES_PER_FACE;

        log::debug!(
            "meshed {}³ grid across {} slabs: {} faces",
            grid.size(),
            face_counts.len(),
            total
        );
        Ok(&self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::{Empty, Generator, RandomFill, Solid, SphereFill};
    use test_case::test_case;

    fn assert_same_as_serial(size: u32, generator: impl Generator) -> usize {
        let mut grid = VoxelGrid::new(size).unwrap();
        grid.fill(generator);
        grid.compute_visibility();

        let mut serial = ChunkMesher::new(size).unwrap();
        let mut parallel = ChunkMesher::new(size).unwrap();
        let a = serial.build(&grid).unwrap();
        let b = parallel.build_parallel(&grid).unwrap();
        assert_eq!(a.vertex_count(), b.vertex_count());
        assert_eq!(a.vertices(), b.vertices());
        assert_eq!(a.indices(), b.indices());
        b.face_count()
    }

    #[test_case(1 ; "single cell")]
    #[test_case(5 ; "several slabs")]
    fn empty_grid_has_only_empty_slabs(size: u32) {
        assert_eq!(assert_same_as_serial(size, Empty), 0);
    }

    #[test_case(1 ; "single cell")]
    #[test_case(6 ; "several slabs")]
    fn full_grid_matches_serial(size: u32) {
        let area = (size * size) as usize;
        assert_eq!(assert_same_as_serial(size, Solid), 6 * area);
    }

    #[test]
    fn hollow_slabs_between_full_ones() {
        // empty slabs in the middle get zero-length ranges between non-empty ones
        let faces = assert_same_as_serial(6, |x: u32, _: u32, _: u32| x == 0 || x == 5);
        assert_eq!(faces, 2 * (2 * 6 * 6 + 4 * 6));
    }

    #[test]
    fn matches_serial_build() {
        for seed in 0..4 {
            assert_same_as_serial(9, RandomFill::seeded(seed, 0.4));
        }
        assert_same_as_serial(1, RandomFill::seeded(5, 0.5));
    }

    #[test]
    fn slab_counts_sum_to_grid_total() {
        let mut grid = VoxelGrid::new(12).unwrap();
        grid.fill(SphereFill::inscribed(12));
        grid.compute_visibility();
        let total: usize = (0..12).map(|x| slab_face_count(&grid, x)).sum();
        assert_eq!(total, grid.visible_face_count());
    }

    #[test]
    fn same_precondition_as_serial() {
        let grid = VoxelGrid::new(3).unwrap();
        let mut mesher = ChunkMesher::new(3).unwrap();
        assert_eq!(
            mesher.build_parallel(&grid).unwrap_err(),
            MeshError::VisibilityNotComputed
        );
    }
}
