pub use chunk::VoxelGrid;
pub use coord::{Face, Shape};
pub use generator::{Empty, Generator, RandomFill, Solid, SphereFill};
pub use mesh::{ChunkMesher, MeshBuffer};

mod chunk;
mod coord;
mod generator;
mod mesh;
mod parallel;

/// One grid cell packed into a byte: bit 0 is occupancy, bits 1..=6 are the
/// visible-face flags in [`Face`] order.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Voxel(pub(in crate::voxel) u8);

impl Voxel {
    pub const EMPTY: Self = Self(0);
    pub const SOLID: Self = Self(1);

    const OCCUPIED: u8 = 1;
    const FACE_SHIFT: u32 = 1;

    pub fn from_occupancy(solid: bool) -> Self {
        if solid {
            Self::SOLID
        } else {
            Self::EMPTY
        }
    }

    pub fn is_solid(&self) -> bool {
        self.0 & Self::OCCUPIED != 0
    }

    /// Visible faces. Only meaningful for solid cells once visibility has been computed.
    pub fn faces(&self) -> FaceMask {
        FaceMask(self.0 >> Self::FACE_SHIFT)
    }

    pub fn with_faces(self, faces: FaceMask) -> Self {
        Self((self.0 & Self::OCCUPIED) | (faces.0 << Self::FACE_SHIFT))
    }
}

/// A set of [`Face`]s.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FaceMask(u8);

impl FaceMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b11_1111);

    pub fn contains(&self, face: Face) -> bool {
        self.0 & face.bit() != 0
    }

    pub fn insert(&mut self, face: Face) {
        self.0 |= face.bit()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::iterate().filter(move |face| self.contains(*face))
    }
}

impl std::fmt::Debug for FaceMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Face> for FaceMask {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        let mut mask = Self::NONE;
        for face in iter {
            mask.insert(face)
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_do_not_touch_occupancy() {
        let voxel = Voxel::SOLID.with_faces(FaceMask::ALL);
        assert!(voxel.is_solid());
        assert_eq!(voxel.faces(), FaceMask::ALL);

        let cleared = voxel.with_faces(FaceMask::NONE);
        assert_eq!(cleared, Voxel::SOLID);
        assert!(!Voxel::EMPTY.with_faces(FaceMask::ALL).is_solid());
    }

    #[test]
    fn mask_collects_and_counts() {
        let mask: FaceMask = [Face::Up, Face::East, Face::Up].into_iter().collect();
        assert_eq!(mask.count(), 2);
        assert!(mask.contains(Face::East));
        assert!(!mask.contains(Face::Down));
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![Face::Up, Face::East]);
    }
}
