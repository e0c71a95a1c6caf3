//! # Meshing Module
//!
//! Face culling and mesh combining for voxel chunks.
//!
//! The pipeline runs in two passes per chunk: [`visibility`] computes a
//! visible-face mask for every voxel (consulting lateral neighbor chunks at
//! the borders), then [`builder`] combines the visible faces into one
//! [`mesh::ChunkMesh`] with one sub-mesh per material. Rebuilds always
//! replace the previous mesh; nothing here is incremental.

pub mod builder;
pub mod face;
pub mod mesh;
pub mod visibility;
