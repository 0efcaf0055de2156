//! voxpick - headless world driver
//!
//! Seeds a world, then runs one center-of-view pick per frame, logging what
//! each frame removed and how many faces remain to be drawn.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   JSON world configuration (default: built-in 8x4x8 world)
//!   --picks <N>       Number of frames, one pick each (default: 5)
//!   --undo <N>        Undo the last N removals at the end (default: 0)

use voxpick::core::logging;
use voxpick::core::types::Result;
use voxpick::scene::{VoxelSession, WorldConfig};

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let config = match parse_str_arg(args, "--config") {
        Some(path) => {
            log::info!("Loading world config from {}", path);
            WorldConfig::from_json_file(&path)?
        }
        None => WorldConfig::default(),
    };
    let picks = parse_usize_arg(args, "--picks").unwrap_or(5);
    let undos = parse_usize_arg(args, "--undo").unwrap_or(0);

    let mut session = VoxelSession::new(&config)?;

    let world_bounds = session.mapping().bounds_to_world(&session.grid().lattice_bounds());
    let center_ray = session.camera().center_ray()?;
    match center_ray.intersects_aabb(&world_bounds) {
        Some((t_near, _)) => log::info!("View center enters the world at t={:.2}", t_near),
        None => log::warn!("View center misses the world; picks will not hit anything"),
    }

    let mut removed = 0;
    for _ in 0..picks {
        session.queue_center_pick()?;
        let report = session.frame();
        removed += report.removed.len();
        match report.removed.first() {
            Some(hit) => log::info!(
                "Frame {}: removed {} at {} through {:?}; {} cells / {} faces visible",
                report.frame,
                hit.coord,
                hit.position,
                hit.face,
                report.visible.len(),
                report.exposed_faces
            ),
            None => log::info!("Frame {}: pick missed", report.frame),
        }
    }

    let mut restored = 0;
    for _ in 0..undos {
        match session.undo()? {
            Some(record) => {
                log::info!("Restored {} (edit {})", record.coord, record.id);
                restored += 1;
            }
            None => break,
        }
    }

    let mesh = session.mesh()?;
    println!("=== voxpick ===");
    println!("Frames:      {}", session.frame_count());
    println!("Removed:     {}", removed);
    println!("Restored:    {}", restored);
    println!("Still gone:  {}", session.edit_log().len());
    println!("Solid cells: {}", session.grid().solid_count());
    println!("Quads:       {} ({} bytes of vertices)", mesh.quad_count(), mesh.vertex_bytes().len());
    Ok(())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
