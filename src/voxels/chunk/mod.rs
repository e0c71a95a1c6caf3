//! # Chunk Module
//!
//! The [`Chunk`] is the fundamental streamed unit of the world: one dense
//! [`grid::VoxelGrid`] of typed voxels, the generation/build state for that
//! grid, a cached visible-face mask per cell, and the chunk's current
//! combined mesh.
//!
//! Two parallel per-cell arrays ride along with the grid:
//! - `face_masks`: the culling result consumed by the mesh builder, kept
//!   current by the generation task and by edits
//! - `last_built`: a snapshot of the voxel ids the last mesh build consumed,
//!   so `dirty(x, y, z) = grid != last_built` detects unbuilt changes
//!
//! A chunk never creates or destroys siblings; all cross-chunk resolution
//! goes through the owning [`super::world::World`] by coordinate lookup.

use cgmath::Point2;
use log::debug;

use crate::meshing::builder::build_chunk_mesh;
use crate::meshing::mesh::ChunkMesh;
use crate::meshing::visibility::{visible_faces, NeighborGrids};
use crate::voxels::voxel::voxel_side::{FaceMask, VoxelSide};
use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::voxel::VoxelId;
use grid::VoxelGrid;

pub mod grid;

/// Generation/build state of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    /// Freshly created; the grid is still all air.
    NotGenerated,
    /// An in-flight generation task owns the first population of the grid.
    /// Edits arriving now are deferred until the task completes.
    Generating,
    /// Grid, face masks and mesh exist; the chunk can take edits.
    Ready,
}

/// An edit that arrived while the chunk was still generating.
///
/// Deferred edits are applied in arrival order the moment generation
/// completes; the place-only-into-air and remove-only-non-air rules are
/// evaluated at application time, against the generated terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingEdit {
    /// Place `voxel_type` at the local cell, if it is air by then.
    Place {
        /// Local x
        x: i32,
        /// Local y
        y: i32,
        /// Local z
        z: i32,
        /// Type to place
        voxel_type: VoxelType,
    },
    /// Clear the local cell back to air.
    Remove {
        /// Local x
        x: i32,
        /// Local y
        y: i32,
        /// Local z
        z: i32,
    },
}

/// One streamed cuboid region of the voxel world.
pub struct Chunk {
    /// World chunk-grid coordinates (cx, cz).
    pub coord: Point2<i32>,
    state: ChunkState,
    active: bool,
    grid: VoxelGrid,
    /// Voxel ids the last mesh build consumed, for change detection.
    last_built: Vec<VoxelId>,
    /// Cached visible-face mask per cell, same indexing as the grid.
    face_masks: Vec<FaceMask>,
    needs_mesh_rebuild: bool,
    pending_edits: Vec<PendingEdit>,
    mesh: Option<ChunkMesh>,
}

impl Chunk {
    /// Creates an all-air, not-yet-generated chunk at `coord`.
    pub fn new(coord: Point2<i32>, size: usize, height: usize) -> Self {
        let grid = VoxelGrid::new(size, height, size);
        let cells = size * height * size;
        Chunk {
            coord,
            state: ChunkState::NotGenerated,
            active: false,
            last_built: grid.as_ids().to_vec(),
            face_masks: vec![FaceMask::EMPTY; cells],
            needs_mesh_rebuild: false,
            pending_edits: Vec::new(),
            mesh: None,
            grid,
        }
    }

    /// Current generation/build state.
    pub fn state(&self) -> ChunkState {
        self.state
    }

    /// Whether the chunk is inside render distance and streamed in.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activates or deactivates the chunk. Data is retained either way.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Read-only access to the voxel grid.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Mutable access to the voxel grid, for the generation task only.
    pub(crate) fn grid_mut(&mut self) -> &mut VoxelGrid {
        &mut self.grid
    }

    /// The current combined mesh, if one has been built.
    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    /// The full face-mask cache, indexed like the grid.
    pub(crate) fn face_masks(&self) -> &[FaceMask] {
        &self.face_masks
    }

    /// The cached visible-face mask of a cell.
    pub fn face_mask_at(&self, x: i32, y: i32, z: i32) -> FaceMask {
        match self.grid.linear_index(x, y, z) {
            Ok(idx) => self.face_masks[idx],
            Err(_) => FaceMask::EMPTY,
        }
    }

    /// Whether the cell differs from what the last mesh build consumed.
    pub fn is_dirty_at(&self, x: i32, y: i32, z: i32) -> bool {
        match self.grid.linear_index(x, y, z) {
            Ok(idx) => self.grid.as_ids()[idx] != self.last_built[idx],
            Err(_) => false,
        }
    }

    /// Whether an edit or border refresh has invalidated the mesh.
    pub fn needs_mesh_rebuild(&self) -> bool {
        self.needs_mesh_rebuild
    }

    /// Marks the start of the initial generation task.
    pub(crate) fn begin_generation(&mut self) {
        self.state = ChunkState::Generating;
    }

    /// Installs the generated mesh and promotes the chunk to `Ready`.
    pub(crate) fn finish_generation(&mut self, mesh: ChunkMesh) {
        self.mesh = Some(mesh);
        self.last_built = self.grid.as_ids().to_vec();
        self.needs_mesh_rebuild = false;
        self.state = ChunkState::Ready;
    }

    /// Queues an edit that arrived while the chunk was generating.
    pub(crate) fn defer_edit(&mut self, edit: PendingEdit) {
        self.pending_edits.push(edit);
    }

    /// Drains the edits deferred during generation, in arrival order.
    pub(crate) fn take_pending_edits(&mut self) -> Vec<PendingEdit> {
        std::mem::take(&mut self.pending_edits)
    }

    /// Places `voxel_type` at the local cell.
    ///
    /// Placing is only valid into air; anything else is a no-op, not an
    /// error. Returns whether the grid changed. Face masks are left to the
    /// caller, which also knows the neighbor chunks.
    pub fn place_voxel(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        voxel_type: VoxelType,
    ) -> Result<bool, crate::error::VoxelError> {
        if self.grid.get(x, y, z)? != VoxelType::AIR {
            return Ok(false);
        }
        self.grid.set(x, y, z, voxel_type)?;
        self.needs_mesh_rebuild = true;
        Ok(true)
    }

    /// Clears the local cell back to air.
    ///
    /// Removing air is a no-op. Returns whether the grid changed.
    pub fn remove_voxel(&mut self, x: i32, y: i32, z: i32) -> Result<bool, crate::error::VoxelError> {
        if self.grid.get(x, y, z)? == VoxelType::AIR {
            return Ok(false);
        }
        self.grid.set(x, y, z, VoxelType::AIR)?;
        self.needs_mesh_rebuild = true;
        Ok(true)
    }

    /// Recomputes the face mask of a single cell. Out-of-chunk coordinates
    /// are ignored; the world routes those to the owning neighbor. Returns
    /// whether the mask changed.
    pub fn refresh_mask_at(&mut self, x: i32, y: i32, z: i32, neighbors: &NeighborGrids) -> bool {
        match self.grid.linear_index(x, y, z) {
            Ok(idx) => {
                let mask = visible_faces(&self.grid, x, y, z, neighbors);
                let changed = self.face_masks[idx] != mask;
                self.face_masks[idx] = mask;
                changed
            }
            Err(_) => false,
        }
    }

    /// Flags the mesh for a rebuild without touching the grid.
    pub(crate) fn mark_mesh_rebuild(&mut self) {
        self.needs_mesh_rebuild = true;
    }

    /// Recomputes the face masks of one z-row.
    ///
    /// This is the unit of work the generation task suspends between during
    /// its face-resolution phase.
    pub(crate) fn refresh_masks_row(&mut self, z: usize, neighbors: &NeighborGrids) {
        let grid = &self.grid;
        let masks = &mut self.face_masks;
        for x in 0..grid.size_x() as i32 {
            for y in 0..grid.height() as i32 {
                let idx = grid
                    .linear_index(x, y, z as i32)
                    .expect("row iteration stays in bounds");
                masks[idx] = visible_faces(grid, x, y, z as i32, neighbors);
            }
        }
    }

    /// Recomputes the face masks of the border column facing `side`.
    ///
    /// Called when the neighbor across that border finishes generating; the
    /// conservative always-visible masks computed while the neighbor was
    /// missing get replaced with properly resolved ones.
    pub fn refresh_border_masks(&mut self, side: VoxelSide, neighbors: &NeighborGrids) -> bool {
        let (size_x, size_z) = (self.grid.size_x() as i32, self.grid.size_z() as i32);
        let height = self.grid.height() as i32;
        let grid = &self.grid;
        let masks = &mut self.face_masks;
        let mut changed = false;

        let mut refresh = |x: i32, y: i32, z: i32| {
            let idx = grid
                .linear_index(x, y, z)
                .expect("border iteration stays in bounds");
            let mask = visible_faces(grid, x, y, z, neighbors);
            changed |= masks[idx] != mask;
            masks[idx] = mask;
        };

        match side {
            VoxelSide::BACK => (0..size_z).for_each(|z| (0..height).for_each(|y| refresh(size_x - 1, y, z))),
            VoxelSide::FRONT => (0..size_z).for_each(|z| (0..height).for_each(|y| refresh(0, y, z))),
            VoxelSide::LEFT => (0..size_x).for_each(|x| (0..height).for_each(|y| refresh(x, y, size_z - 1))),
            VoxelSide::RIGHT => (0..size_x).for_each(|x| (0..height).for_each(|y| refresh(x, y, 0))),
            VoxelSide::TOP | VoxelSide::BOTTOM => {}
        }
        if changed {
            self.needs_mesh_rebuild = true;
        }
        changed
    }

    /// Rebuilds the combined mesh from the current grid and mask cache.
    ///
    /// Runs to completion (edit rebuilds never suspend), replaces the
    /// previous mesh wholesale and refreshes the last-built snapshot.
    pub fn rebuild_mesh(&mut self) {
        self.mesh = Some(build_chunk_mesh(&self.grid, &self.face_masks));
        self.last_built = self.grid.as_ids().to_vec();
        self.needs_mesh_rebuild = false;
        debug!(
            "rebuilt mesh for chunk ({}, {}): {} faces",
            self.coord.x,
            self.coord.y,
            self.mesh.as_ref().map_or(0, ChunkMesh::face_count)
        );
    }
}
