//! # Chunk Generation Task
//!
//! The resumable task that takes a chunk from all-air to `Ready`: terrain
//! population, face-mask resolution, then the first combined-mesh build.
//!
//! Suspension points follow the shape of the data: between (x, z) columns
//! while generating terrain, and between z-rows while resolving faces and
//! accumulating the mesh. Only this first pass is suspendable; rebuilds
//! triggered by edits later run to completion in one call.

use cgmath::Point2;
use log::trace;

use crate::meshing::builder::MeshBatcher;
use crate::meshing::visibility::NeighborGrids;
use crate::voxels::chunk::Chunk;
use crate::voxels::terrain::TerrainGenerator;

use super::StepResult;

/// The phase the task will resume in, with its cursor.
enum GenPhase {
    /// Filling terrain, one (x, z) column per step.
    Terrain { column: usize },
    /// Resolving face masks, one z-row per step.
    Faces { row: usize },
    /// Accumulating the mesh, one z-row per step.
    Mesh { row: usize, batcher: MeshBatcher },
}

/// Generates one chunk across multiple update ticks.
pub struct ChunkGenerationTask {
    coord: Point2<i32>,
    phase: GenPhase,
}

impl ChunkGenerationTask {
    /// Creates the task for the chunk at `coord`. The chunk must already be
    /// in the `Generating` state.
    pub fn new(coord: Point2<i32>) -> Self {
        ChunkGenerationTask {
            coord,
            phase: GenPhase::Terrain { column: 0 },
        }
    }

    /// Coordinate of the chunk this task populates.
    pub fn coord(&self) -> Point2<i32> {
        self.coord
    }

    /// Performs one bounded unit of work on `chunk`.
    ///
    /// `neighbors` are the lateral neighbor grids available at this moment;
    /// borders without one resolve conservatively and get refreshed by the
    /// world once the neighbor exists. Returns [`StepResult::Done`] after
    /// the final mesh row, at which point the chunk has been promoted to
    /// `Ready`.
    pub fn step(
        &mut self,
        chunk: &mut Chunk,
        neighbors: &NeighborGrids,
        generator: &TerrainGenerator,
    ) -> StepResult {
        let size_x = chunk.grid().size_x();
        let size_z = chunk.grid().size_z();

        match &mut self.phase {
            GenPhase::Terrain { column } => {
                let x = *column / size_z;
                let z = *column % size_z;
                generator.generate_column(chunk.grid_mut(), self.coord, x, z);

                *column += 1;
                if *column == size_x * size_z {
                    trace!("chunk ({}, {}): terrain done", self.coord.x, self.coord.y);
                    self.phase = GenPhase::Faces { row: 0 };
                }
                StepResult::InProgress
            }

            GenPhase::Faces { row } => {
                chunk.refresh_masks_row(*row, neighbors);

                *row += 1;
                if *row == size_z {
                    trace!("chunk ({}, {}): faces done", self.coord.x, self.coord.y);
                    self.phase = GenPhase::Mesh {
                        row: 0,
                        batcher: MeshBatcher::new(),
                    };
                }
                StepResult::InProgress
            }

            GenPhase::Mesh { row, batcher } => {
                batcher.push_row(chunk.grid(), chunk.face_masks(), *row);

                *row += 1;
                if *row == size_z {
                    let finished = std::mem::replace(
                        &mut self.phase,
                        GenPhase::Terrain { column: 0 },
                    );
                    let GenPhase::Mesh { batcher, .. } = finished else {
                        unreachable!("phase was Mesh");
                    };
                    chunk.finish_generation(batcher.finish());
                    return StepResult::Done;
                }
                StepResult::InProgress
            }
        }
    }
}
