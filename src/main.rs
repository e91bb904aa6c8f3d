mod config;

use clap::Parser;
use voxmesh::{ChunkMesher, VoxelGrid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config = config::Config::parse();
    log::debug!("{:?}", config);

    let mut grid = VoxelGrid::new(config.size)?;
    let start = std::time::Instant::now();
    config.fill(&mut grid);
    grid.compute_visibility();
    log::info!(
        "generated {}³ chunk in {:?}: {} solid cells, {} visible faces",
        grid.size(),
        start.elapsed(),
        grid.solid_count(),
        grid.visible_face_count()
    );

    let mut mesher = ChunkMesher::new(grid.size())?;
    for _ in 0..config.repeat.max(1) {
        let start = std::time::Instant::now();
        let mesh = if config.parallel {
            mesher.build_parallel(&grid)?
        } else {
            mesher.build(&grid)?
        };
        log::info!(
            "meshed in {:?}: {} faces, {} vertices, {} indices",
            start.elapsed(),
            mesh.face_count(),
            mesh.vertex_count(),
            mesh.index_count()
        );
    }

    let mesh = mesher.buffer();
    println!(
        "{} faces, {} vertices, {} indices",
        mesh.face_count(),
        mesh.vertex_count(),
        mesh.index_count()
    );
    Ok(())
}
