/// Source of cell occupancy for [`VoxelGrid::fill`](super::VoxelGrid::fill).
pub trait Generator {
    fn occupied(&mut self, x: u32, y: u32, z: u32) -> bool;
}

impl<F: FnMut(u32, u32, u32) -> bool> Generator for F {
    fn occupied(&mut self, x: u32, y: u32, z: u32) -> bool {
        self(x, y, z)
    }
}

/// Every cell solid.
#[derive(Debug, Copy, Clone)]
pub struct Solid;

impl Generator for Solid {
    fn occupied(&mut self, _: u32, _: u32, _: u32) -> bool {
        true
    }
}

/// Every cell empty.
#[derive(Debug, Copy, Clone)]
pub struct Empty;

impl Generator for Empty {
    fn occupied(&mut self, _: u32, _: u32, _: u32) -> bool {
        false
    }
}

/// Uniform random fill: each cell is solid with probability `density`.
#[derive(Debug, Clone)]
pub struct RandomFill {
    rng: fastrand::Rng,
    density: f32,
}

impl RandomFill {
    pub const DEFAULT_DENSITY: f32 = 0.5;

    pub fn new(density: f32) -> Self {
        Self::with_rng(fastrand::Rng::new(), density)
    }

    pub fn seeded(seed: u64, density: f32) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed), density)
    }

    fn with_rng(rng: fastrand::Rng, density: f32) -> Self {
        Self {
            rng,
            density: density.clamp(0.0, 1.0),
        }
    }
}

impl Default for RandomFill {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DENSITY)
    }
}

impl Generator for RandomFill {
    fn occupied(&mut self, _: u32, _: u32, _: u32) -> bool {
        self.rng.f32() < self.density
    }
}

/// A solid ball centered in a grid of side `size`.
#[derive(Debug, Copy, Clone)]
pub struct SphereFill {
    center: uv::Vec3,
    radius_sq: f32,
}

impl SphereFill {
    pub fn new(size: u32, radius: f32) -> Self {
        Self {
            center: uv::Vec3::broadcast((size as f32 - 1.0) / 2.0),
            radius_sq: radius * radius,
        }
    }

    /// Largest ball that fits the grid.
    pub fn inscribed(size: u32) -> Self {
        Self::new(size, size as f32 / 2.0)
    }
}

impl Generator for SphereFill {
    fn occupied(&mut self, x: u32, y: u32, z: u32) -> bool {
        let cell = uv::Vec3::new(x as f32, y as f32, z as f32);
        (cell - self.center).mag_sq() < self.radius_sq
    }
}
