//! # Voxel Type Module
//!
//! Defines the different types of voxels in the sandbox world and the
//! properties the culling and meshing passes care about: whether a type
//! occludes its neighbors and whether it participates in the combined mesh.

use num_derive::FromPrimitive;

use super::VoxelId;

/// Enumerates all voxel types in the sandbox world.
///
/// `AIR` is the universal "empty" sentinel; every generated column is capped
/// with it. The `FromPrimitive` derive allows conversion back from the compact
/// [`VoxelId`] storage format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum VoxelType {
    /// Empty space. Non-occluding, never stored in a mesh.
    AIR,

    /// Grass cap of a terrain column.
    GRASS,

    /// Dirt layer between the grass cap and the stone base.
    DIRT,

    /// Stone base of a terrain column.
    STONE,

    /// A torch. Occupies a cell but neither blocks the faces of its
    /// neighbors nor joins the combined chunk mesh; the host places it as a
    /// standalone prop.
    TORCH,
}

impl VoxelType {
    /// Converts a compact [`VoxelId`] back into a `VoxelType`.
    ///
    /// # Panics
    /// Panics if the id does not correspond to a valid `VoxelType`. Ids only
    /// ever enter a grid through [`VoxelType::id`], so a failure here means
    /// grid memory was corrupted.
    pub fn from_id(id: VoxelId) -> Self {
        num::FromPrimitive::from_u8(id).expect("invalid voxel id in grid")
    }

    /// The compact storage representation of this type.
    pub fn id(self) -> VoxelId {
        self as VoxelId
    }

    /// Whether this voxel blocks visibility of the faces adjacent to it.
    ///
    /// Everything except `AIR` and `TORCH` occludes. A face of a solid voxel
    /// is culled exactly when the cell across it holds an occluding type.
    pub fn is_occluding(self) -> bool {
        !matches!(self, VoxelType::AIR | VoxelType::TORCH)
    }

    /// Whether this voxel contributes quads to the combined chunk mesh.
    ///
    /// `AIR` has no geometry and `TORCH` is handed to the host as an
    /// individual prop, so neither is combinable.
    pub fn is_combinable(self) -> bool {
        !matches!(self, VoxelType::AIR | VoxelType::TORCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        for voxel_type in [
            VoxelType::AIR,
            VoxelType::GRASS,
            VoxelType::DIRT,
            VoxelType::STONE,
            VoxelType::TORCH,
        ] {
            assert_eq!(VoxelType::from_id(voxel_type.id()), voxel_type);
        }
    }

    #[test]
    fn air_and_torch_do_not_occlude() {
        assert!(!VoxelType::AIR.is_occluding());
        assert!(!VoxelType::TORCH.is_occluding());
        assert!(VoxelType::GRASS.is_occluding());
        assert!(VoxelType::DIRT.is_occluding());
        assert!(VoxelType::STONE.is_occluding());
    }

    #[test]
    fn torch_is_not_combinable() {
        assert!(!VoxelType::TORCH.is_combinable());
        assert!(VoxelType::STONE.is_combinable());
    }
}
