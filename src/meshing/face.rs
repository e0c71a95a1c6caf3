//! Per-side quad geometry for voxel faces.

use cgmath::{Point3, Vector3};

use crate::voxels::voxel::voxel_side::VoxelSide;

/// One unit-size quad face of a voxel, in chunk-local space.
///
/// Corners are ordered counter-clockwise viewed from outside the voxel, so
/// the triangle pair `(0,1,2) (0,2,3)` is front-facing with the face normal.
/// The voxel with local coordinates `(x, y, z)` occupies the unit cube from
/// `(x, y, z)` to `(x+1, y+1, z+1)`, i.e. its center sits at the local offset
/// plus 0.5 on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceQuad {
    /// The four corner positions, counter-clockwise from outside.
    pub corners: [Point3<f32>; 4],
    /// The outward face normal.
    pub normal: Vector3<f32>,
    /// Which side of the voxel this quad covers.
    pub side: VoxelSide,
}

/// Corner offsets for each side, counter-clockwise from outside the cube.
const CORNER_OFFSETS: [[[f32; 3]; 4]; 6] = [
    // FRONT (-x)
    [[0., 0., 0.], [0., 0., 1.], [0., 1., 1.], [0., 1., 0.]],
    // BACK (+x)
    [[1., 0., 0.], [1., 1., 0.], [1., 1., 1.], [1., 0., 1.]],
    // BOTTOM (-y)
    [[0., 0., 0.], [1., 0., 0.], [1., 0., 1.], [0., 0., 1.]],
    // TOP (+y)
    [[0., 1., 0.], [0., 1., 1.], [1., 1., 1.], [1., 1., 0.]],
    // LEFT (+z)
    [[0., 0., 1.], [1., 0., 1.], [1., 1., 1.], [0., 1., 1.]],
    // RIGHT (-z)
    [[0., 0., 0.], [0., 1., 0.], [1., 1., 0.], [1., 0., 0.]],
];

/// Texture coordinates matching the corner order of every side.
pub const CORNER_UVS: [[f32; 2]; 4] = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]];

impl FaceQuad {
    /// Builds the quad for `side` of the voxel at local `(x, y, z)`.
    pub fn new(x: usize, y: usize, z: usize, side: VoxelSide) -> Self {
        let base = Point3::new(x as f32, y as f32, z as f32);
        let offsets = CORNER_OFFSETS[side as usize];
        let step = side.offset();
        FaceQuad {
            corners: [
                base + Vector3::from(offsets[0]),
                base + Vector3::from(offsets[1]),
                base + Vector3::from(offsets[2]),
                base + Vector3::from(offsets[3]),
            ],
            normal: Vector3::new(step.x as f32, step.y as f32, step.z as f32),
            side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    /// Geometric normal of the corner loop via the cross product of two edges.
    fn loop_normal(quad: &FaceQuad) -> Vector3<f32> {
        let e1 = quad.corners[1] - quad.corners[0];
        let e2 = quad.corners[2] - quad.corners[1];
        e1.cross(e2).normalize()
    }

    #[test]
    fn winding_matches_declared_normal() {
        for side in VoxelSide::all() {
            let quad = FaceQuad::new(2, 3, 4, side);
            let computed = loop_normal(&quad);
            assert!(
                (computed - quad.normal).magnitude() < 1e-6,
                "side {:?}: winding normal {:?} != {:?}",
                side,
                computed,
                quad.normal
            );
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for side in VoxelSide::all() {
            let quad = FaceQuad::new(0, 0, 0, side);
            let step = side.offset();
            // The face plane is offset by 1 along the positive directions,
            // 0 along the negative ones.
            let expected = f32::max(step.x as f32, 0.) * 1.
                + f32::max(step.y as f32, 0.)
                + f32::max(step.z as f32, 0.);
            for corner in quad.corners {
                let along = corner.x * step.x.abs() as f32
                    + corner.y * step.y.abs() as f32
                    + corner.z * step.z.abs() as f32;
                assert_eq!(along, expected, "side {:?}", side);
            }
        }
    }
}
