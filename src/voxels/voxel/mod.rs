//! # Voxel Module
//!
//! Core voxel-level definitions: the [`VoxelType`] enum, the six
//! [`VoxelSide`]s with their visibility masks, and the static tables that map
//! voxel types to render materials and per-face textures.

use voxel_type::VoxelType;

pub mod voxel_side;
pub mod voxel_type;

/// The underlying integer type used to store voxel types in a grid.
pub type VoxelId = u8;

/// Identifies one render material; the mesh builder emits one sub-mesh per
/// distinct material present in a chunk.
pub type MaterialId = u8;

/// Maps each combinable voxel type to its material.
///
/// Indexed by `VoxelType as usize`. `AIR` and `TORCH` never reach the mesh
/// builder, so their slots are unused placeholders.
pub static VOXEL_TYPE_TO_MATERIAL: [MaterialId; 5] = [
    0, // AIR (unused)
    0, // GRASS
    1, // DIRT
    2, // STONE
    0, // TORCH (unused)
];

/// Maps each voxel type to its texture indices for each face.
///
/// The outer array is indexed by `VoxelType as usize`; the inner array holds
/// one texture index per face in [`voxel_side::VoxelSide`] bit order:
/// [Front, Back, Bottom, Top, Left, Right]. Grass uses a dirt texture on the
/// bottom and a grass-cap texture on top.
pub static VOXEL_TYPE_TO_TEXTURE_INDICES: [[usize; 6]; 5] = [
    [0, 0, 0, 0, 0, 0], // AIR (unused)
    [2, 2, 1, 3, 2, 2], // GRASS (bottom: dirt, top: cap, sides: blended)
    [1, 1, 1, 1, 1, 1], // DIRT
    [4, 4, 4, 4, 4, 4], // STONE
    [5, 5, 5, 5, 5, 5], // TORCH (prop texture, not meshed)
];

/// Looks up the material for a voxel type.
pub fn material_of(voxel_type: VoxelType) -> MaterialId {
    VOXEL_TYPE_TO_MATERIAL[voxel_type as usize]
}

/// Looks up the per-face texture indices for a voxel type.
pub fn texture_indices_of(voxel_type: VoxelType) -> [usize; 6] {
    VOXEL_TYPE_TO_TEXTURE_INDICES[voxel_type as usize]
}
