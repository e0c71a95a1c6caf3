//! # Voxel Grid Module
//!
//! Dense typed-voxel storage for one chunk.
//!
//! ## Storage layout
//!
//! Two parallel structures are kept in sync on every write:
//! - `voxels`: one [`VoxelId`] per cell, y-contiguous so a terrain column is
//!   a single run of memory
//! - `occluding`: a bit vector with one occlusion bit per cell, giving the
//!   face-culling pass O(1) occlusion checks without decoding voxel ids
//!
//! Indices outside the grid bounds are never readable; border lookups must
//! route through chunk-neighbor resolution, so every accessor returns
//! [`VoxelError::OutOfBounds`] instead of clamping.

use bitvec::prelude::BitVec;

use crate::error::VoxelError;
use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::voxel::VoxelId;

/// A dense 3D grid of typed voxels with chunk-local bounds
/// `[0,size_x) x [0,height) x [0,size_z)`.
#[derive(Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    size_x: usize,
    height: usize,
    size_z: usize,
    /// Cell types in y-major order: `index = y + height * (x + size_x * z)`.
    voxels: Vec<VoxelId>,
    /// One occlusion bit per cell, same indexing as `voxels`.
    occluding: BitVec,
}

impl VoxelGrid {
    /// Creates a grid of the given extents filled with `AIR`.
    pub fn new(size_x: usize, height: usize, size_z: usize) -> Self {
        let len = size_x * height * size_z;
        VoxelGrid {
            size_x,
            height,
            size_z,
            voxels: vec![VoxelType::AIR.id(); len],
            occluding: BitVec::repeat(false, len),
        }
    }

    /// Grid extent along X.
    pub fn size_x(&self) -> usize {
        self.size_x
    }

    /// Grid extent along Y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid extent along Z.
    pub fn size_z(&self) -> usize {
        self.size_z
    }

    /// Linear index of `(x, y, z)` in the y-major cell layout.
    ///
    /// Exposed so parallel per-cell arrays (the face-mask cache, the
    /// last-built snapshot) can share this grid's addressing.
    pub fn linear_index(&self, x: i32, y: i32, z: i32) -> Result<usize, VoxelError> {
        if x < 0
            || y < 0
            || z < 0
            || x as usize >= self.size_x
            || y as usize >= self.height
            || z as usize >= self.size_z
        {
            return Err(VoxelError::OutOfBounds {
                x,
                y,
                z,
                size_x: self.size_x,
                height: self.height,
                size_z: self.size_z,
            });
        }
        Ok(y as usize + self.height * (x as usize + self.size_x * z as usize))
    }

    /// Whether `(x, y, z)` falls inside the grid bounds.
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.linear_index(x, y, z).is_ok()
    }

    /// The voxel type at `(x, y, z)`.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Result<VoxelType, VoxelError> {
        let idx = self.linear_index(x, y, z)?;
        Ok(VoxelType::from_id(self.voxels[idx]))
    }

    /// Overwrites the voxel at `(x, y, z)` unconditionally.
    ///
    /// No side effects beyond the stored cell and its occlusion bit; change
    /// detection and mesh invalidation live on the owning chunk.
    pub fn set(&mut self, x: i32, y: i32, z: i32, voxel_type: VoxelType) -> Result<(), VoxelError> {
        let idx = self.linear_index(x, y, z)?;
        self.voxels[idx] = voxel_type.id();
        self.occluding.set(idx, voxel_type.is_occluding());
        Ok(())
    }

    /// Whether the voxel at `(x, y, z)` occludes adjacent faces.
    ///
    /// Reads the occlusion bit vector directly; this is the hot path of the
    /// face-culling pass.
    pub fn is_occluding_at(&self, x: i32, y: i32, z: i32) -> Result<bool, VoxelError> {
        let idx = self.linear_index(x, y, z)?;
        Ok(self.occluding[idx])
    }

    /// The raw cell contents, for snapshot comparison.
    pub fn as_ids(&self) -> &[VoxelId] {
        &self.voxels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_air() {
        let grid = VoxelGrid::new(4, 8, 4);
        for x in 0..4 {
            for y in 0..8 {
                for z in 0..4 {
                    assert_eq!(grid.get(x, y, z).unwrap(), VoxelType::AIR);
                    assert!(!grid.is_occluding_at(x, y, z).unwrap());
                }
            }
        }
    }

    #[test]
    fn set_updates_type_and_occlusion_bit() {
        let mut grid = VoxelGrid::new(4, 8, 4);
        grid.set(1, 2, 3, VoxelType::STONE).unwrap();
        assert_eq!(grid.get(1, 2, 3).unwrap(), VoxelType::STONE);
        assert!(grid.is_occluding_at(1, 2, 3).unwrap());

        grid.set(1, 2, 3, VoxelType::TORCH).unwrap();
        assert_eq!(grid.get(1, 2, 3).unwrap(), VoxelType::TORCH);
        assert!(!grid.is_occluding_at(1, 2, 3).unwrap());
    }

    #[test]
    fn out_of_bounds_reads_fail_loudly() {
        let grid = VoxelGrid::new(4, 8, 4);
        for (x, y, z) in [(-1, 0, 0), (4, 0, 0), (0, 8, 0), (0, 0, 4), (0, -1, 0)] {
            let err = grid.get(x, y, z).unwrap_err();
            assert_eq!(
                err,
                VoxelError::OutOfBounds {
                    x,
                    y,
                    z,
                    size_x: 4,
                    height: 8,
                    size_z: 4
                }
            );
        }
    }

    #[test]
    fn out_of_bounds_writes_leave_grid_untouched() {
        let mut grid = VoxelGrid::new(4, 8, 4);
        let before = grid.as_ids().to_vec();
        assert!(grid.set(4, 0, 0, VoxelType::STONE).is_err());
        assert_eq!(grid.as_ids(), &before[..]);
    }
}
