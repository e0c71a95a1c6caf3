//! # Face Visibility Module
//!
//! Per-voxel face culling against the six adjacent cells, including
//! cross-chunk borders.
//!
//! A face of an occluding voxel is rendered exactly when the cell across it
//! does not occlude. "Across" resolves in three ways:
//! - inside the chunk's own grid: a direct lookup
//! - past the top or bottom of the world: always visible (no vertical chunk
//!   stacking)
//! - past a lateral border: the corresponding border cell of the neighbor
//!   chunk's grid, when that neighbor is available
//!
//! A neighbor that has not been generated yet is not an error: the face
//! defaults to visible (conservative) and the world schedules a border
//! refresh for both chunks once the neighbor finishes generating.

use crate::voxels::chunk::grid::VoxelGrid;
use crate::voxels::voxel::voxel_side::{FaceMask, VoxelSide};

/// Read-only borrows of the up-to-4 lateral neighbor grids of a chunk.
///
/// These are lookup references only; the visibility pass never mutates a
/// neighbor. A `None` entry means the neighbor chunk does not exist or has
/// not finished generating.
#[derive(Default, Clone, Copy)]
pub struct NeighborGrids<'a> {
    /// Grid of the chunk at (cx + 1, cz), across the `BACK` border.
    pub pos_x: Option<&'a VoxelGrid>,
    /// Grid of the chunk at (cx - 1, cz), across the `FRONT` border.
    pub neg_x: Option<&'a VoxelGrid>,
    /// Grid of the chunk at (cx, cz + 1), across the `LEFT` border.
    pub pos_z: Option<&'a VoxelGrid>,
    /// Grid of the chunk at (cx, cz - 1), across the `RIGHT` border.
    pub neg_z: Option<&'a VoxelGrid>,
}

impl<'a> NeighborGrids<'a> {
    /// No neighbors resolvable; every border face falls back to visible.
    pub fn none() -> Self {
        NeighborGrids::default()
    }
}

/// Computes the visible-face mask for the voxel at `(x, y, z)` of `grid`.
///
/// Non-occluding voxels (air, torches) produce an empty mask; they have no
/// combined-mesh geometry of their own.
pub fn visible_faces(grid: &VoxelGrid, x: i32, y: i32, z: i32, neighbors: &NeighborGrids) -> FaceMask {
    if !grid.is_occluding_at(x, y, z).unwrap_or(false) {
        return FaceMask::EMPTY;
    }

    let mut mask = FaceMask::EMPTY;
    for side in VoxelSide::all() {
        if !occluded_across(grid, x, y, z, side, neighbors) {
            mask.insert(side);
        }
    }
    mask
}

/// Whether the cell across `side` occludes (hides) that face.
fn occluded_across(
    grid: &VoxelGrid,
    x: i32,
    y: i32,
    z: i32,
    side: VoxelSide,
    neighbors: &NeighborGrids,
) -> bool {
    let step = side.offset();
    let (nx, ny, nz) = (x + step.x, y + step.y, z + step.z);

    // Top and bottom of the world: faces there are always rendered.
    if ny < 0 || ny >= grid.height() as i32 {
        return false;
    }

    if grid.contains(nx, ny, nz) {
        return grid
            .is_occluding_at(nx, ny, nz)
            .expect("adjacent cell bounds checked");
    }

    // Lateral border: translate into the neighbor's local frame.
    let (neighbor, bx, bz) = match side {
        VoxelSide::BACK => (neighbors.pos_x, 0, z),
        VoxelSide::FRONT => (neighbors.neg_x, grid.size_x() as i32 - 1, z),
        VoxelSide::LEFT => (neighbors.pos_z, x, 0),
        VoxelSide::RIGHT => (neighbors.neg_z, x, grid.size_z() as i32 - 1),
        // Vertical sides were handled by the world-bounds check above.
        VoxelSide::TOP | VoxelSide::BOTTOM => return false,
    };

    match neighbor {
        Some(neighbor_grid) => neighbor_grid.is_occluding_at(bx, ny, bz).unwrap_or(false),
        // Neighbor not generated: conservative fallback, keep the face.
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::voxel::voxel_type::VoxelType;

    fn grid_4x8x4() -> VoxelGrid {
        VoxelGrid::new(4, 8, 4)
    }

    #[test]
    fn lone_voxel_shows_all_faces() {
        let mut grid = grid_4x8x4();
        grid.set(1, 3, 1, VoxelType::STONE).unwrap();
        let mask = visible_faces(&grid, 1, 3, 1, &NeighborGrids::none());
        assert_eq!(mask, FaceMask::ALL);
    }

    #[test]
    fn shared_face_hidden_on_both_sides() {
        let mut grid = grid_4x8x4();
        grid.set(1, 3, 1, VoxelType::STONE).unwrap();
        grid.set(2, 3, 1, VoxelType::DIRT).unwrap();

        let left = visible_faces(&grid, 1, 3, 1, &NeighborGrids::none());
        let right = visible_faces(&grid, 2, 3, 1, &NeighborGrids::none());
        assert!(!left.contains(VoxelSide::BACK));
        assert!(!right.contains(VoxelSide::FRONT));
        // The other faces stay exposed.
        assert!(left.contains(VoxelSide::TOP));
        assert!(right.contains(VoxelSide::TOP));
    }

    #[test]
    fn torch_does_not_hide_neighbor_faces() {
        let mut grid = grid_4x8x4();
        grid.set(1, 3, 1, VoxelType::STONE).unwrap();
        grid.set(2, 3, 1, VoxelType::TORCH).unwrap();

        let stone = visible_faces(&grid, 1, 3, 1, &NeighborGrids::none());
        assert!(stone.contains(VoxelSide::BACK));
        // The torch itself contributes no faces.
        assert!(visible_faces(&grid, 2, 3, 1, &NeighborGrids::none()).is_empty());
    }

    #[test]
    fn world_top_and_bottom_always_visible() {
        let mut grid = grid_4x8x4();
        grid.set(0, 0, 0, VoxelType::STONE).unwrap();
        grid.set(0, 7, 0, VoxelType::STONE).unwrap();

        let bottom = visible_faces(&grid, 0, 0, 0, &NeighborGrids::none());
        let top = visible_faces(&grid, 0, 7, 0, &NeighborGrids::none());
        assert!(bottom.contains(VoxelSide::BOTTOM));
        assert!(top.contains(VoxelSide::TOP));
    }

    #[test]
    fn missing_neighbor_defaults_border_face_to_visible() {
        let mut grid = grid_4x8x4();
        grid.set(3, 3, 1, VoxelType::STONE).unwrap();
        let mask = visible_faces(&grid, 3, 3, 1, &NeighborGrids::none());
        assert!(mask.contains(VoxelSide::BACK));
    }

    #[test]
    fn generated_neighbor_resolves_border_face() {
        let mut grid = grid_4x8x4();
        grid.set(3, 3, 1, VoxelType::STONE).unwrap();

        // Neighbor chunk with an occluding voxel in its first column.
        let mut neighbor = grid_4x8x4();
        neighbor.set(0, 3, 1, VoxelType::STONE).unwrap();

        let neighbors = NeighborGrids {
            pos_x: Some(&neighbor),
            ..NeighborGrids::none()
        };
        let mask = visible_faces(&grid, 3, 3, 1, &neighbors);
        assert!(!mask.contains(VoxelSide::BACK));

        // The matching face on the neighbor's side is hidden as well.
        let back = NeighborGrids {
            neg_x: Some(&grid),
            ..NeighborGrids::none()
        };
        let neighbor_mask = visible_faces(&neighbor, 0, 3, 1, &back);
        assert!(!neighbor_mask.contains(VoxelSide::FRONT));
    }

    #[test]
    fn generated_neighbor_with_air_keeps_border_face() {
        let mut grid = grid_4x8x4();
        grid.set(0, 3, 1, VoxelType::STONE).unwrap();

        let neighbor = grid_4x8x4();
        let neighbors = NeighborGrids {
            neg_x: Some(&neighbor),
            ..NeighborGrids::none()
        };
        assert!(visible_faces(&grid, 0, 3, 1, &neighbors).contains(VoxelSide::FRONT));
    }
}
