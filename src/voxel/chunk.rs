use super::{Face, FaceMask, Generator, Shape, Voxel};
use crate::error::MeshError;

/// A dense cubic grid of voxels meshed as a single unit.
pub struct VoxelGrid {
    shape: Shape,
    voxels: Box<[Voxel]>,
    visibility_computed: bool,
}

impl VoxelGrid {
    /// Largest side for which `size³ * 24` vertex indices still fit in a `u32`.
    pub const MAX_SIZE: u32 = 563;

    pub fn new(size: u32) -> Result<Self, MeshError> {
        Self::check_size(size)?;
        let shape = Shape::new(size);
        Ok(Self {
            shape,
            voxels: vec![Voxel::EMPTY; shape.volume()].into_boxed_slice(),
            visibility_computed: false,
        })
    }

    pub(crate) fn check_size(size: u32) -> Result<(), MeshError> {
        if size == 0 || size > Self::MAX_SIZE {
            return Err(MeshError::InvalidSize(size));
        }
        Ok(())
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn size(&self) -> u32 {
        self.shape.size()
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn is_visibility_computed(&self) -> bool {
        self.visibility_computed
    }

    /// Replaces every cell's occupancy from `generator`, in linear index order.
    /// Stale face flags are dropped.
    pub fn fill(&mut self, mut generator: impl Generator) {
        for (index, voxel) in self.voxels.iter_mut().enumerate() {
            let (x, y, z) = self.shape.delinearize(index);
            *voxel = Voxel::from_occupancy(generator.occupied(x, y, z));
        }
        self.visibility_computed = false;
    }

    /// [`fill`](Self::fill) from a closure over cell coordinates.
    pub fn fill_with(&mut self, generator: impl FnMut(u32, u32, u32) -> bool) {
        self.fill(generator)
    }

    /// Sets one cell's occupancy. The whole grid must be recomputed before the next build.
    pub fn set(&mut self, x: u32, y: u32, z: u32, solid: bool) -> Option<()> {
        let coord = uv::IVec3::new(x as i32, y as i32, z as i32);
        let index = self.shape.checked(coord)?;
        self.voxels[index] = Voxel::from_occupancy(solid);
        self.visibility_computed = false;
        Some(())
    }

    pub fn get(&self, x: u32, y: u32, z: u32) -> Option<Voxel> {
        self.get_signed(uv::IVec3::new(x as i32, y as i32, z as i32))
    }

    pub fn is_solid(&self, x: u32, y: u32, z: u32) -> bool {
        self.get(x, y, z).is_some_and(|voxel| voxel.is_solid())
    }

    fn get_signed(&self, coord: uv::IVec3) -> Option<Voxel> {
        self.shape.checked(coord).map(|index| self.voxels[index])
    }

    /// Marks each face of each solid cell visible if its neighbor is outside
    /// the grid or empty.
    pub fn compute_visibility(&mut self) {
        for index in 0..self.voxels.len() {
            if !self.voxels[index].is_solid() {
                continue;
            }
            let (x, y, z) = self.shape.delinearize(index);
            let coord = uv::IVec3::new(x as i32, y as i32, z as i32);
            let faces = Face::iterate()
                .filter(|face| {
                    self.get_signed(coord + face.offset())
                        .is_none_or(|neighbor| !neighbor.is_solid())
                })
                .collect::<FaceMask>();
            self.voxels[index] = self.voxels[index].with_faces(faces);
        }
        self.visibility_computed = true;
        log::debug!(
            "computed visibility for {}³ grid: {} visible faces",
            self.size(),
            self.visible_face_count()
        );
    }

    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|voxel| voxel.is_solid()).count()
    }

    /// Visible faces over all solid cells; zero before visibility is computed.
    pub fn visible_face_count(&self) -> usize {
        if !self.visibility_computed {
            return 0;
        }
        self.voxels
            .iter()
            .filter(|voxel| voxel.is_solid())
            .map(|voxel| voxel.faces().count() as usize)
            .sum()
    }
}

impl std::fmt::Debug for VoxelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelGrid")
            .field("size", &self.size())
            .field("visibility_computed", &self.visibility_computed)
            .finish()
    }
}
