//! # Voxel Side Module
//!
//! Defines the six faces of a voxel and the compact face-visibility mask the
//! culling pass produces for every cell.

use cgmath::Vector3;

/// The six faces of a voxel.
///
/// The axis mapping follows the world convention used throughout the crate:
/// `BACK` faces +X, `FRONT` faces -X, `LEFT` faces +Z, `RIGHT` faces -Z,
/// `TOP` faces +Y and `BOTTOM` faces -Y. Each variant's integer value is its
/// bit position inside a [`FaceMask`].
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum VoxelSide {
    /// The front face (facing negative X)
    FRONT = 0,

    /// The back face (facing positive X)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing positive Z)
    LEFT = 4,

    /// The right face (facing negative Z)
    RIGHT = 5,
}

impl VoxelSide {
    /// All six faces, in bit order.
    pub fn all() -> [VoxelSide; 6] {
        [
            VoxelSide::FRONT,
            VoxelSide::BACK,
            VoxelSide::BOTTOM,
            VoxelSide::TOP,
            VoxelSide::LEFT,
            VoxelSide::RIGHT,
        ]
    }

    /// The unit step from a cell to the cell across this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            VoxelSide::FRONT => Vector3::new(-1, 0, 0),
            VoxelSide::BACK => Vector3::new(1, 0, 0),
            VoxelSide::BOTTOM => Vector3::new(0, -1, 0),
            VoxelSide::TOP => Vector3::new(0, 1, 0),
            VoxelSide::LEFT => Vector3::new(0, 0, 1),
            VoxelSide::RIGHT => Vector3::new(0, 0, -1),
        }
    }

    /// The face of the adjacent voxel that touches this one.
    pub fn opposite(self) -> VoxelSide {
        match self {
            VoxelSide::FRONT => VoxelSide::BACK,
            VoxelSide::BACK => VoxelSide::FRONT,
            VoxelSide::BOTTOM => VoxelSide::TOP,
            VoxelSide::TOP => VoxelSide::BOTTOM,
            VoxelSide::LEFT => VoxelSide::RIGHT,
            VoxelSide::RIGHT => VoxelSide::LEFT,
        }
    }
}

/// A 6-bit set of visible faces, one bit per [`VoxelSide`].
///
/// An empty mask means the voxel contributes no geometry; a full mask means
/// all six faces are exposed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceMask(u8);

impl FaceMask {
    /// A mask with no visible faces.
    pub const EMPTY: FaceMask = FaceMask(0);

    /// A mask with all six faces visible.
    pub const ALL: FaceMask = FaceMask(0b0011_1111);

    /// Marks `side` visible.
    pub fn insert(&mut self, side: VoxelSide) {
        self.0 |= 1 << side as u8;
    }

    /// Whether `side` is visible.
    pub fn contains(self, side: VoxelSide) -> bool {
        self.0 & (1 << side as u8) != 0
    }

    /// Whether no face is visible.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the visible sides.
    pub fn iter(self) -> impl Iterator<Item = VoxelSide> {
        VoxelSide::all().into_iter().filter(move |s| self.contains(*s))
    }
}
