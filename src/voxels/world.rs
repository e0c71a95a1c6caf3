//! # World Module
//!
//! The [`World`] owns every chunk and drives the streaming lifecycle:
//!
//! - Chunks are keyed by chunk-grid coordinate in a `HashMap` and are never
//!   evicted: a chunk that leaves render distance is deactivated in place and
//!   reactivated with its grid intact when the player returns.
//! - Generation runs through resumable [`ChunkGenerationTask`]s, advanced by
//!   a configured step budget each [`World::tick`]. Edits addressed to a
//!   still-generating chunk are deferred and applied the moment it completes.
//! - When a chunk finishes, the border face masks on both sides of every
//!   shared edge are re-resolved, replacing the conservative always-visible
//!   masks computed while the neighbor was missing.
//!
//! The chunk grid spans `[0, max_chunks)` per axis and is re-centered on the
//! world origin, so the player's float position maps to a chunk coordinate
//! through [`World::active_chunk_at`].

use std::collections::HashMap;

use cgmath::Point2;
use log::{debug, info, warn};

use crate::config::WorldConfig;
use crate::error::VoxelError;
use crate::meshing::visibility::NeighborGrids;
use crate::voxels::chunk::grid::VoxelGrid;
use crate::voxels::chunk::{Chunk, ChunkState, PendingEdit};
use crate::voxels::tasks::chunk_generation_task::ChunkGenerationTask;
use crate::voxels::tasks::StepResult;
use crate::voxels::terrain::TerrainGenerator;
use crate::voxels::voxel::voxel_side::VoxelSide;
use crate::voxels::voxel::voxel_type::VoxelType;

/// Whether `coord` lies inside the Chebyshev window of `radius` around
/// `center`.
fn chebyshev_within(center: Point2<i32>, radius: i32, coord: Point2<i32>) -> bool {
    (coord.x - center.x).abs() <= radius && (coord.y - center.y).abs() <= radius
}

/// The streaming voxel world: chunk store, terrain generator and the
/// in-flight generation tasks.
pub struct World {
    config: WorldConfig,
    generator: TerrainGenerator,
    chunks: HashMap<Point2<i32>, Chunk>,
    /// At most one generation task per chunk, keyed like `chunks`.
    tasks: HashMap<Point2<i32>, ChunkGenerationTask>,
    current_player_chunk: Point2<i32>,
    last_player_chunk: Option<Point2<i32>>,
}

impl World {
    /// Creates an empty world; the first [`World::tick`] spawns the chunks
    /// around the player.
    pub fn new(config: WorldConfig) -> Self {
        let generator = TerrainGenerator::new(config.seed, config.amplitude, config.frequency);
        World {
            config,
            generator,
            chunks: HashMap::new(),
            tasks: HashMap::new(),
            current_player_chunk: Point2::new(0, 0),
            last_player_chunk: None,
        }
    }

    /// The configuration this world was built with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The chunk at `coord`, if the world has created one there.
    pub fn chunk(&self, coord: Point2<i32>) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Number of chunks the world has created so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of chunks currently active (inside render distance and ready).
    pub fn active_chunk_count(&self) -> usize {
        self.chunks.values().filter(|c| c.is_active()).count()
    }

    /// Number of chunks with an in-flight generation task.
    pub fn generating_chunk_count(&self) -> usize {
        self.tasks.len()
    }

    /// Total visible faces across the meshes of all active chunks.
    pub fn active_face_count(&self) -> usize {
        self.chunks
            .values()
            .filter(|c| c.is_active())
            .filter_map(Chunk::mesh)
            .map(crate::meshing::mesh::ChunkMesh::face_count)
            .sum()
    }

    /// The chunk coordinate the player last streamed around.
    pub fn player_chunk(&self) -> Point2<i32> {
        self.current_player_chunk
    }

    /// Maps a player float position to the chunk-grid coordinate it occupies.
    ///
    /// The chunk grid spans `[0, max_chunks)` per axis but is centered on the
    /// world origin, so the grid is shifted by half its extent before
    /// bucketing. The bucket for coordinate `c` covers the half-open float
    /// interval `(c * size - half, (c + 1) * size - half]`.
    pub fn active_chunk_at(&self, px: f32, pz: f32) -> Point2<i32> {
        let size = self.config.chunk_size as f32;
        let half = self.config.max_chunks as f32 * size / 2.0;
        let bucket = |p: f32| ((p + half) / size).ceil() as i32 - 1;
        Point2::new(bucket(px), bucket(pz))
    }

    /// Splits world voxel coordinates into an owning chunk coordinate and
    /// local cell coordinates within it.
    fn world_to_chunk(&self, wx: i32, wz: i32) -> (Point2<i32>, i32, i32) {
        let size = self.config.chunk_size as i32;
        (
            Point2::new(wx.div_euclid(size), wz.div_euclid(size)),
            wx.rem_euclid(size),
            wz.rem_euclid(size),
        )
    }

    /// The voxel type at world voxel coordinates, if that chunk exists.
    pub fn voxel_at(&self, wx: i32, y: i32, wz: i32) -> Option<VoxelType> {
        let (coord, lx, lz) = self.world_to_chunk(wx, wz);
        self.chunks
            .get(&coord)
            .and_then(|chunk| chunk.grid().get(lx, y, lz).ok())
    }

    /// Advances the world by one update tick.
    ///
    /// Re-streams the chunk window when the player crossed into a new chunk,
    /// then grants every in-flight generation task its step budget, then
    /// rebuilds any meshes the border resolution invalidated.
    pub fn tick(&mut self, player: Point2<f32>) {
        let current = self.active_chunk_at(player.x, player.y);
        if self.last_player_chunk != Some(current) {
            debug!("player entered chunk ({}, {})", current.x, current.y);
            self.current_player_chunk = current;
            self.last_player_chunk = Some(current);
            self.stream_chunks();
        }
        self.advance_tasks();
        self.rebuild_flagged();
    }

    /// Requests placement of `voxel_type` at world voxel coordinates.
    ///
    /// Routed to the owning chunk: applied immediately if the chunk is ready,
    /// deferred if it is still generating, dropped if no chunk exists there.
    /// Placing into a non-air cell is a no-op. Returns whether the grid
    /// changed.
    pub fn request_edit(
        &mut self,
        wx: i32,
        y: i32,
        wz: i32,
        voxel_type: VoxelType,
    ) -> Result<bool, VoxelError> {
        let (coord, lx, lz) = self.world_to_chunk(wx, wz);
        self.route_edit(
            coord,
            PendingEdit::Place {
                x: lx,
                y,
                z: lz,
                voxel_type,
            },
        )
    }

    /// Requests removal of the voxel at world voxel coordinates.
    ///
    /// Same routing as [`World::request_edit`]; removing air is a no-op.
    pub fn request_removal(&mut self, wx: i32, y: i32, wz: i32) -> Result<bool, VoxelError> {
        let (coord, lx, lz) = self.world_to_chunk(wx, wz);
        self.route_edit(coord, PendingEdit::Remove { x: lx, y, z: lz })
    }

    fn route_edit(&mut self, coord: Point2<i32>, edit: PendingEdit) -> Result<bool, VoxelError> {
        let state = match self.chunks.get(&coord) {
            Some(chunk) => chunk.state(),
            None => {
                debug!(
                    "dropping edit {:?}: no chunk at ({}, {})",
                    edit, coord.x, coord.y
                );
                return Ok(false);
            }
        };
        match state {
            ChunkState::Ready => self.apply_edit(coord, edit),
            ChunkState::Generating | ChunkState::NotGenerated => {
                debug!(
                    "deferring edit {:?} on generating chunk ({}, {})",
                    edit, coord.x, coord.y
                );
                if let Some(chunk) = self.chunks.get_mut(&coord) {
                    chunk.defer_edit(edit);
                }
                Ok(false)
            }
        }
    }

    /// Applies an edit to a ready chunk and repairs every face mask the
    /// change can affect: the edited cell, its six in-chunk neighbors, and
    /// the facing cell in an adjacent chunk when the edit sits on a border.
    /// Invalidated meshes are rebuilt before returning.
    fn apply_edit(&mut self, coord: Point2<i32>, edit: PendingEdit) -> Result<bool, VoxelError> {
        let mut chunk = self
            .chunks
            .remove(&coord)
            .expect("edit routed to a live chunk");
        let (x, y, z) = match edit {
            PendingEdit::Place { x, y, z, .. } | PendingEdit::Remove { x, y, z } => (x, y, z),
        };
        let result = match edit {
            PendingEdit::Place { voxel_type, .. } => chunk.place_voxel(x, y, z, voxel_type),
            PendingEdit::Remove { .. } => chunk.remove_voxel(x, y, z),
        };
        let changed = match result {
            Ok(changed) => changed,
            Err(err) => {
                self.chunks.insert(coord, chunk);
                return Err(err);
            }
        };
        if !changed {
            self.chunks.insert(coord, chunk);
            return Ok(false);
        }

        {
            let neighbors = self.neighbor_grids(coord);
            chunk.refresh_mask_at(x, y, z, &neighbors);
            for side in VoxelSide::all() {
                let o = side.offset();
                chunk.refresh_mask_at(x + o.x, y + o.y, z + o.z, &neighbors);
            }
        }
        self.chunks.insert(coord, chunk);
        self.refresh_adjacent_borders(coord, x, y, z);
        self.rebuild_flagged();
        Ok(true)
    }

    /// When an edited cell sits on a lateral chunk border, the facing cell
    /// across that border belongs to the neighbor and its mask has to be
    /// recomputed there.
    fn refresh_adjacent_borders(&mut self, coord: Point2<i32>, x: i32, y: i32, z: i32) {
        let size = self.config.chunk_size as i32;
        let mut targets: Vec<(Point2<i32>, i32, i32)> = Vec::new();
        if x == 0 {
            targets.push((Point2::new(coord.x - 1, coord.y), size - 1, z));
        }
        if x == size - 1 {
            targets.push((Point2::new(coord.x + 1, coord.y), 0, z));
        }
        let mut z_targets: Vec<(Point2<i32>, i32, i32)> = Vec::new();
        if z == 0 {
            z_targets.push((Point2::new(coord.x, coord.y - 1), x, size - 1));
        }
        if z == size - 1 {
            z_targets.push((Point2::new(coord.x, coord.y + 1), x, 0));
        }

        for (ncoord, nx, nz) in targets.into_iter().chain(z_targets) {
            let ready = self
                .chunks
                .get(&ncoord)
                .map_or(false, |c| c.state() == ChunkState::Ready);
            if !ready {
                continue;
            }
            let mut neighbor = self
                .chunks
                .remove(&ncoord)
                .expect("readiness checked above");
            let changed = {
                let neighbors = self.neighbor_grids(ncoord);
                neighbor.refresh_mask_at(nx, y, nz, &neighbors)
            };
            if changed {
                neighbor.mark_mesh_rebuild();
            }
            self.chunks.insert(ncoord, neighbor);
        }
    }

    /// The grids of the four lateral neighbor chunks, where those chunks are
    /// ready. A generating neighbor's half-filled grid is never consulted;
    /// its border resolves conservatively instead.
    fn neighbor_grids(&self, coord: Point2<i32>) -> NeighborGrids<'_> {
        let get = |dx: i32, dz: i32| -> Option<&VoxelGrid> {
            self.chunks
                .get(&Point2::new(coord.x + dx, coord.y + dz))
                .filter(|c| c.state() == ChunkState::Ready)
                .map(Chunk::grid)
        };
        NeighborGrids {
            pos_x: get(1, 0),
            neg_x: get(-1, 0),
            pos_z: get(0, 1),
            neg_z: get(0, -1),
        }
    }

    /// Brings the streamed set in line with the current player chunk: spawns
    /// missing chunks in the render-distance window, reactivates retained
    /// ones, deactivates everything that fell outside.
    fn stream_chunks(&mut self) {
        let center = self.current_player_chunk;
        let rd = self.config.render_distance;
        let min_x = (center.x - rd).max(0);
        let max_x = (center.x + rd).min(self.config.max_chunks - 1);
        let min_z = (center.y - rd).max(0);
        let max_z = (center.y + rd).min(self.config.max_chunks - 1);

        for cx in min_x..=max_x {
            for cz in min_z..=max_z {
                let coord = Point2::new(cx, cz);
                match self.chunks.get_mut(&coord) {
                    None => {
                        info!("spawning chunk ({}, {})", cx, cz);
                        let mut chunk =
                            Chunk::new(coord, self.config.chunk_size, self.config.chunk_height);
                        chunk.begin_generation();
                        self.chunks.insert(coord, chunk);
                        self.tasks.insert(coord, ChunkGenerationTask::new(coord));
                    }
                    Some(chunk) => {
                        if chunk.state() == ChunkState::Ready && !chunk.is_active() {
                            debug!("reactivating chunk ({}, {})", cx, cz);
                            chunk.set_active(true);
                        }
                    }
                }
            }
        }

        for chunk in self.chunks.values_mut() {
            if chunk.is_active() && !chebyshev_within(center, rd, chunk.coord) {
                debug!("deactivating chunk ({}, {})", chunk.coord.x, chunk.coord.y);
                chunk.set_active(false);
            }
        }
    }

    /// Grants every in-flight generation task its per-tick step budget.
    ///
    /// A task that leaves render distance mid-generation keeps running; the
    /// activation decision is made once, on completion.
    fn advance_tasks(&mut self) {
        let coords: Vec<Point2<i32>> = self.tasks.keys().copied().collect();
        for coord in coords {
            let mut task = self
                .tasks
                .remove(&coord)
                .expect("task map keys are stable within the loop");
            let mut chunk = self
                .chunks
                .remove(&coord)
                .expect("every task refers to a live chunk");
            let mut done = false;
            for _ in 0..self.config.generation_steps_per_tick {
                let neighbors = self.neighbor_grids(coord);
                if task.step(&mut chunk, &neighbors, &self.generator) == StepResult::Done {
                    done = true;
                    break;
                }
            }
            self.chunks.insert(coord, chunk);
            if done {
                self.on_generation_complete(coord);
            } else {
                self.tasks.insert(coord, task);
            }
        }
    }

    /// Post-completion bookkeeping: deferred edits, border resolution on
    /// both sides of every shared edge, and the activation decision.
    fn on_generation_complete(&mut self, coord: Point2<i32>) {
        info!("chunk ({}, {}) finished generating", coord.x, coord.y);

        let pending = self
            .chunks
            .get_mut(&coord)
            .expect("completed chunk is live")
            .take_pending_edits();
        for edit in pending {
            debug!(
                "applying deferred edit {:?} to chunk ({}, {})",
                edit, coord.x, coord.y
            );
            if let Err(err) = self.apply_edit(coord, edit) {
                warn!("dropping deferred edit: {err}");
            }
        }

        self.resolve_borders(coord);

        let active = chebyshev_within(self.current_player_chunk, self.config.render_distance, coord);
        let chunk = self
            .chunks
            .get_mut(&coord)
            .expect("completed chunk is live");
        chunk.set_active(active);
        if !active {
            debug!(
                "chunk ({}, {}) completed outside render distance, kept inactive",
                coord.x, coord.y
            );
        }
        self.rebuild_flagged();
    }

    /// Re-resolves the border face masks around a freshly completed chunk.
    ///
    /// The chunk itself re-checks all four of its borders against whichever
    /// neighbors are ready now, and each ready neighbor re-checks the border
    /// column facing the new grid. Only borders whose masks actually change
    /// schedule a mesh rebuild.
    fn resolve_borders(&mut self, coord: Point2<i32>) {
        let lateral = [
            VoxelSide::FRONT,
            VoxelSide::BACK,
            VoxelSide::LEFT,
            VoxelSide::RIGHT,
        ];

        let mut chunk = self
            .chunks
            .remove(&coord)
            .expect("completed chunk is live");
        {
            let neighbors = self.neighbor_grids(coord);
            for side in lateral {
                chunk.refresh_border_masks(side, &neighbors);
            }
        }
        self.chunks.insert(coord, chunk);

        for side in lateral {
            let o = side.offset();
            let ncoord = Point2::new(coord.x + o.x, coord.y + o.z);
            let ready = self
                .chunks
                .get(&ncoord)
                .map_or(false, |c| c.state() == ChunkState::Ready);
            if !ready {
                continue;
            }
            let mut neighbor = self
                .chunks
                .remove(&ncoord)
                .expect("readiness checked above");
            {
                let neighbors = self.neighbor_grids(ncoord);
                neighbor.refresh_border_masks(side.opposite(), &neighbors);
            }
            self.chunks.insert(ncoord, neighbor);
        }
    }

    /// Rebuilds the mesh of every ready chunk whose masks or grid changed.
    fn rebuild_flagged(&mut self) {
        for chunk in self.chunks.values_mut() {
            if chunk.state() == ChunkState::Ready && chunk.needs_mesh_rebuild() {
                chunk.rebuild_mesh();
            }
        }
    }
}
