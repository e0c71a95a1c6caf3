//! Combined-mesh output types.
//!
//! A [`ChunkMesh`] is the opaque renderable+collidable object handed to the
//! host per chunk: one vertex/index buffer pair per distinct material, plus
//! the non-combinable voxels (torches) the host instantiates individually.
//! The vertex format is plain `#[repr(C)]` POD so the host can upload the
//! buffers without conversion.

use cgmath::Point3;

use crate::voxels::voxel::voxel_type::VoxelType;
use crate::voxels::voxel::MaterialId;

/// A vertex of the combined chunk mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes), chunk-local
/// - Normal: [f32; 3] (12 bytes)
/// - Texture coordinates: [f32; 2] (8 bytes)
/// - Texture index: u32 (4 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
    /// UV texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
    /// Index of the face's texture in the host's texture array
    pub texture_index: u32,
}

/// The geometry batch for one material: one draw-capable sub-mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubMesh {
    /// The material all faces in this batch share.
    pub material: MaterialId,
    /// Vertex buffer contents.
    pub vertices: Vec<Vertex>,
    /// Index buffer contents, triangle list.
    pub indices: Vec<u32>,
}

impl SubMesh {
    /// An empty batch for `material`.
    pub fn new(material: MaterialId) -> Self {
        SubMesh {
            material,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }
}

/// The complete combined mesh of one chunk.
///
/// Rebuilds replace this object wholesale; geometry is never appended to a
/// previous build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// One sub-mesh per distinct material, ordered by material id.
    pub submeshes: Vec<SubMesh>,
    /// Non-combinable voxels (local position, type) the host places as
    /// standalone props instead of merged geometry.
    pub props: Vec<(Point3<i32>, VoxelType)>,
}

impl ChunkMesh {
    /// Whether the mesh holds no geometry and no props.
    pub fn is_empty(&self) -> bool {
        self.submeshes.is_empty() && self.props.is_empty()
    }

    /// Total number of quad faces across all sub-meshes.
    pub fn face_count(&self) -> usize {
        // 4 vertices per quad.
        self.submeshes.iter().map(|s| s.vertices.len() / 4).sum()
    }

    /// Total number of indices across all sub-meshes.
    pub fn index_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.indices.len()).sum()
    }
}
