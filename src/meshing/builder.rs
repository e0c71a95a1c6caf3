//! # Chunk Mesh Builder Module
//!
//! Combines the visible faces of every voxel in a chunk into one mesh per
//! material.
//!
//! The builder is a row-resumable accumulator: the chunk generation task
//! feeds it one z-row at a time so a first-time build can suspend between
//! rows, while edit-triggered rebuilds push the whole grid through in one
//! call. Either way the output replaces the chunk's previous mesh entirely;
//! the combine is not incremental.

use std::collections::BTreeMap;

use cgmath::Point3;

use crate::voxels::chunk::grid::VoxelGrid;
use crate::voxels::voxel::voxel_side::FaceMask;
use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::voxel::{material_of, texture_indices_of, MaterialId};

use super::face::{FaceQuad, CORNER_UVS};
use super::mesh::{ChunkMesh, SubMesh, Vertex};

/// Accumulates visible voxel faces into per-material batches.
pub struct MeshBatcher {
    batches: BTreeMap<MaterialId, SubMesh>,
    props: Vec<(Point3<i32>, VoxelType)>,
}

impl MeshBatcher {
    /// An empty batcher.
    pub fn new() -> Self {
        MeshBatcher {
            batches: BTreeMap::new(),
            props: Vec::new(),
        }
    }

    /// Appends the visible faces of one voxel.
    ///
    /// Combinable voxels contribute one quad per set bit in `mask` into the
    /// batch for their material. Non-combinable non-air voxels (torches) are
    /// recorded as props regardless of the mask. Air contributes nothing.
    pub fn push_voxel(&mut self, x: usize, y: usize, z: usize, voxel_type: VoxelType, mask: FaceMask) {
        if voxel_type == VoxelType::AIR {
            return;
        }
        if !voxel_type.is_combinable() {
            self.props
                .push((Point3::new(x as i32, y as i32, z as i32), voxel_type));
            return;
        }

        if mask.is_empty() {
            return;
        }

        let textures = texture_indices_of(voxel_type);
        let batch = self
            .batches
            .entry(material_of(voxel_type))
            .or_insert_with(|| SubMesh::new(material_of(voxel_type)));

        for side in mask.iter() {
            let quad = FaceQuad::new(x, y, z, side);
            let base_index = batch.vertices.len() as u32;
            for (corner, uv) in quad.corners.iter().zip(CORNER_UVS) {
                batch.vertices.push(Vertex {
                    position: [corner.x, corner.y, corner.z],
                    normal: [quad.normal.x, quad.normal.y, quad.normal.z],
                    tex_coords: uv,
                    texture_index: textures[side as usize] as u32,
                });
            }
            batch
                .indices
                .extend([0, 1, 2, 0, 2, 3].map(|i| base_index + i));
        }
    }

    /// Appends every voxel of one z-row of the grid.
    ///
    /// `face_masks` is the chunk's mask cache, indexed by
    /// [`VoxelGrid::linear_index`]. This is the unit of work the generation
    /// task suspends between.
    pub fn push_row(&mut self, grid: &VoxelGrid, face_masks: &[FaceMask], z: usize) {
        for x in 0..grid.size_x() {
            for y in 0..grid.height() {
                let idx = grid
                    .linear_index(x as i32, y as i32, z as i32)
                    .expect("row iteration stays in bounds");
                let voxel_type = grid
                    .get(x as i32, y as i32, z as i32)
                    .expect("row iteration stays in bounds");
                self.push_voxel(x, y, z, voxel_type, face_masks[idx]);
            }
        }
    }

    /// Merges the accumulated batches into the final mesh.
    pub fn finish(self) -> ChunkMesh {
        ChunkMesh {
            submeshes: self.batches.into_values().collect(),
            props: self.props,
        }
    }
}

impl Default for MeshBatcher {
    fn default() -> Self {
        MeshBatcher::new()
    }
}

/// Builds a chunk's complete mesh in one pass over the grid.
///
/// Used for edit-triggered rebuilds, which always run to completion; the
/// face-mask cache must already reflect the grid contents.
pub fn build_chunk_mesh(grid: &VoxelGrid, face_masks: &[FaceMask]) -> ChunkMesh {
    let mut batcher = MeshBatcher::new();
    for z in 0..grid.size_z() {
        batcher.push_row(grid, face_masks, z);
    }
    batcher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meshing::visibility::{visible_faces, NeighborGrids};

    fn masks_for(grid: &VoxelGrid) -> Vec<FaceMask> {
        let mut masks = vec![FaceMask::EMPTY; grid.size_x() * grid.height() * grid.size_z()];
        for x in 0..grid.size_x() as i32 {
            for y in 0..grid.height() as i32 {
                for z in 0..grid.size_z() as i32 {
                    let idx = grid.linear_index(x, y, z).unwrap();
                    masks[idx] = visible_faces(grid, x, y, z, &NeighborGrids::none());
                }
            }
        }
        masks
    }

    #[test]
    fn lone_voxel_meshes_six_quads() {
        let mut grid = VoxelGrid::new(4, 8, 4);
        grid.set(1, 3, 1, VoxelType::STONE).unwrap();

        let mesh = build_chunk_mesh(&grid, &masks_for(&grid));
        assert_eq!(mesh.submeshes.len(), 1);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.index_count(), 36);
        assert!(mesh.props.is_empty());
    }

    #[test]
    fn shared_faces_are_not_emitted() {
        let mut grid = VoxelGrid::new(4, 8, 4);
        grid.set(1, 3, 1, VoxelType::STONE).unwrap();
        grid.set(2, 3, 1, VoxelType::STONE).unwrap();

        let mesh = build_chunk_mesh(&grid, &masks_for(&grid));
        // Two cubes sharing one face: 12 - 2 = 10 quads.
        assert_eq!(mesh.face_count(), 10);
    }

    #[test]
    fn voxels_group_into_one_submesh_per_material() {
        let mut grid = VoxelGrid::new(4, 8, 4);
        grid.set(0, 0, 0, VoxelType::STONE).unwrap();
        grid.set(2, 0, 0, VoxelType::DIRT).unwrap();
        grid.set(0, 0, 2, VoxelType::GRASS).unwrap();

        let mesh = build_chunk_mesh(&grid, &masks_for(&grid));
        assert_eq!(mesh.submeshes.len(), 3);
        let mut materials: Vec<_> = mesh.submeshes.iter().map(|s| s.material).collect();
        materials.dedup();
        assert_eq!(materials.len(), 3, "each submesh has a distinct material");
    }

    #[test]
    fn torch_becomes_a_prop_not_geometry() {
        let mut grid = VoxelGrid::new(4, 8, 4);
        grid.set(1, 3, 1, VoxelType::TORCH).unwrap();

        let mesh = build_chunk_mesh(&grid, &masks_for(&grid));
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.props, vec![(Point3::new(1, 3, 1), VoxelType::TORCH)]);
    }

    #[test]
    fn row_resumable_build_matches_single_pass() {
        let mut grid = VoxelGrid::new(4, 8, 4);
        fastrand::seed(7);
        for x in 0..4 {
            for y in 0..8 {
                for z in 0..4 {
                    if fastrand::f64() < 0.3 {
                        grid.set(x, y, z, VoxelType::STONE).unwrap();
                    }
                }
            }
        }
        let masks = masks_for(&grid);

        let mut batcher = MeshBatcher::new();
        for z in 0..grid.size_z() {
            batcher.push_row(&grid, &masks, z);
        }
        assert_eq!(batcher.finish(), build_chunk_mesh(&grid, &masks));
    }
}
