//! # Voxels Module
//!
//! The voxel data model and the streaming world built on top of it:
//! voxel types and face geometry in [`voxel`], the dense per-chunk grid and
//! chunk lifecycle in [`chunk`], procedural terrain in [`terrain`],
//! resumable generation work in [`tasks`], and the chunk store that ties
//! them together in [`world`].

pub mod chunk;
pub mod tasks;
pub mod terrain;
pub mod voxel;
pub mod world;
