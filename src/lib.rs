#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! A chunk-streamed voxel world: procedural terrain generation, face-culled
//! mesh combining and an editable block grid, all driven headlessly from a
//! per-tick update loop.
//!
//! ## Key Modules
//!
//! * `voxels` - The voxel data model: typed grids, chunks, terrain
//!   generation, resumable generation tasks and the streaming world
//! * `meshing` - Face visibility resolution and per-material mesh combining
//! * `config` - World tunables, loadable from JSON
//! * `error` - The crate error type
//!
//! ## Architecture
//!
//! The world advances in ticks. Each tick re-streams the chunk window around
//! the player, grants every in-flight generation task a bounded step budget
//! and rebuilds any chunk meshes that edits or border resolution have
//! invalidated. Chunks are never evicted: leaving render distance only
//! deactivates them, so returning to a region restores the exact grids the
//! player left behind, edits included.
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::Point2;
//! use voxel_sandbox::config::WorldConfig;
//! use voxel_sandbox::voxels::world::World;
//!
//! let mut world = World::new(WorldConfig::default());
//! world.tick(Point2::new(0.0, 0.0));
//! ```

use std::path::Path;

use cgmath::Point2;
use log::{error, info, warn};

use config::WorldConfig;
use voxels::voxel::voxel_type::VoxelType;
use voxels::world::World;

pub mod config;
pub mod error;
pub mod meshing;
pub mod voxels;

/// Ticks the demo walk runs for.
const DEMO_TICKS: u32 = 600;
/// Ticks between stat lines.
const STATS_INTERVAL: u32 = 60;

/// Runs the headless streaming demo.
///
/// Loads a [`WorldConfig`] from the JSON file given as the first command
/// line argument (defaults otherwise), then walks a simulated player east
/// while ticking the world, placing a torch on the surface partway through
/// and removing it again.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => match WorldConfig::from_file(Path::new(&path)) {
            Ok(config) => {
                info!("loaded config from {path}");
                config
            }
            Err(err) => {
                error!("failed to load config from {path}: {err}");
                return;
            }
        },
        None => WorldConfig::default(),
    };

    let mut world = World::new(config);
    let mut torch: Option<(i32, i32, i32)> = None;

    for tick in 0..DEMO_TICKS {
        let player = Point2::new(tick as f32 * 0.5, 0.0);
        world.tick(player);

        if tick == DEMO_TICKS / 3 {
            torch = place_surface_torch(&mut world);
        }
        if tick == 2 * DEMO_TICKS / 3 {
            if let Some((wx, y, wz)) = torch.take() {
                match world.request_removal(wx, y, wz) {
                    Ok(removed) => info!("removed the torch again: {removed}"),
                    Err(err) => warn!("torch removal failed: {err}"),
                }
            }
        }

        if tick % STATS_INTERVAL == 0 {
            info!(
                "tick {tick}: player chunk ({}, {}), {} chunks ({} active, {} generating), {} visible faces",
                world.player_chunk().x,
                world.player_chunk().y,
                world.chunk_count(),
                world.active_chunk_count(),
                world.generating_chunk_count(),
                world.active_face_count()
            );
        }
    }

    info!(
        "demo finished: {} chunks created, {} still active",
        world.chunk_count(),
        world.active_chunk_count()
    );
}

/// Drops a torch on the terrain surface at the center of the player's
/// current chunk. Returns the voxel coordinates it was placed at.
fn place_surface_torch(world: &mut World) -> Option<(i32, i32, i32)> {
    let size = world.config().chunk_size as i32;
    let height = world.config().chunk_height as i32;
    let center = world.player_chunk();
    let wx = center.x * size + size / 2;
    let wz = center.y * size + size / 2;

    let surface = (0..height)
        .rev()
        .find(|&y| world.voxel_at(wx, y, wz).map_or(false, |t| t != VoxelType::AIR))?;
    match world.request_edit(wx, surface + 1, wz, VoxelType::TORCH) {
        Ok(true) => {
            info!("placed a torch at ({wx}, {}, {wz})", surface + 1);
            Some((wx, surface + 1, wz))
        }
        Ok(false) => {
            warn!("torch placement was a no-op");
            None
        }
        Err(err) => {
            warn!("torch placement failed: {err}");
            None
        }
    }
}
