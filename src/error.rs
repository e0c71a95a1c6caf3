//! Error types for the voxel world core.

use thiserror::Error;

/// Errors surfaced by the voxel data model.
///
/// The only fatal condition here is `OutOfBounds`, which always indicates a
/// coordinate-translation bug in the caller. Border lookups must route through
/// chunk-neighbor resolution instead of indexing past a grid's extents, so grid
/// accessors fail loudly rather than clamping.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoxelError {
    /// A grid index fell outside the chunk-local bounds.
    #[error("voxel index ({x}, {y}, {z}) outside grid bounds {size_x}x{height}x{size_z}")]
    OutOfBounds {
        /// X index that was requested
        x: i32,
        /// Y index that was requested
        y: i32,
        /// Z index that was requested
        z: i32,
        /// Grid extent along X
        size_x: usize,
        /// Grid extent along Y
        height: usize,
        /// Grid extent along Z
        size_z: usize,
    },
}
