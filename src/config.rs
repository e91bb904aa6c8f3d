use voxmesh::voxel::{Empty, RandomFill, Solid, SphereFill};
use voxmesh::VoxelGrid;

#[derive(Debug, Copy, Clone, Eq, PartialEq, clap::ValueEnum)]
pub enum Fill {
    /// Uniform random fill at `--density`.
    Random,
    /// Ball inscribed in the chunk.
    Sphere,
    Solid,
    Empty,
}

/// Fills one chunk, meshes it and reports the mesh statistics.
#[derive(Debug, clap::Parser)]
#[command(name = "voxmesh", version)]
pub struct Config {
    /// Chunk side length in voxels.
    #[arg(long, default_value_t = 16)]
    pub size: u32,

    #[arg(long, value_enum, default_value_t = Fill::Random)]
    pub fill: Fill,

    /// Probability of a cell being solid for `--fill random`.
    #[arg(long, default_value_t = RandomFill::DEFAULT_DENSITY)]
    pub density: f32,

    /// Seed for `--fill random`; a fresh one is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Mesh on the rayon pool, one x slab per task.
    #[arg(long)]
    pub parallel: bool,

    /// Rebuild this many times to time the mesher.
    #[arg(long, default_value_t = 1)]
    pub repeat: u32,
}

impl Config {
    /// Populates `grid` with the configured occupancy pattern.
    pub fn fill(&self, grid: &mut VoxelGrid) {
        match self.fill {
            Fill::Random => grid.fill(match self.seed {
                Some(seed) => RandomFill::seeded(seed, self.density),
                None => RandomFill::new(self.density),
            }),
            Fill::Sphere => grid.fill(SphereFill::inscribed(grid.size())),
            Fill::Solid => grid.fill(Solid),
            Fill::Empty => grid.fill(Empty),
        }
    }
}
