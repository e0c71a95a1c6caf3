//! # Terrain Generation Module
//!
//! Deterministic height-field terrain from 2D coherent noise.
//!
//! Every (x, z) column gets two noise-derived integer thresholds (a stone
//! ceiling and a dirt ceiling), sampled in absolute world coordinates so the
//! field is continuous across chunk borders. The column is then filled bottom
//! to top: stone below the stone ceiling, dirt up to the dirt ceiling, one
//! grass cap at the dirt ceiling, air above.
//!
//! Generation is a pure function of (world coordinate, seed, amplitude,
//! frequency): the Perlin permutation table uses a fixed seed and the world
//! seed enters through the sample coordinates, so regenerating a chunk is
//! idempotent.

use cgmath::Point2;
use noise::{NoiseFn, Perlin};

use crate::voxels::chunk::grid::VoxelGrid;
use crate::voxels::voxel::voxel_type::VoxelType;

/// Offset added to the stone-ceiling noise sample.
pub const STONE_BASE_HEIGHT: i32 = 5;
/// Offset added to the dirt-ceiling noise sample.
pub const DIRT_BASE_HEIGHT: i32 = 10;

/// The two height thresholds of one terrain column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnThresholds {
    /// Voxels strictly below this height are stone.
    pub stone_max_y: i32,
    /// Voxels from `stone_max_y` up to (exclusive) this height are dirt; the
    /// voxel at exactly this height is the grass cap.
    pub dirt_max_y: i32,
}

/// Deterministic noise-based voxel population for chunks.
pub struct TerrainGenerator {
    perlin: Perlin,
    seed: f64,
    amplitude: f64,
    frequency: f64,
}

impl TerrainGenerator {
    /// Creates a generator for the given world seed and noise shape.
    ///
    /// The permutation table behind the Perlin samples is fixed; `seed`
    /// shifts the sample coordinates instead, which keeps two generators
    /// with equal parameters bit-for-bit interchangeable.
    pub fn new(seed: f64, amplitude: f64, frequency: f64) -> Self {
        TerrainGenerator {
            perlin: Perlin::new(0),
            seed,
            amplitude,
            frequency,
        }
    }

    /// A Perlin sample remapped from [-1, 1] to [0, 1].
    ///
    /// The height formulas were tuned against a noise source with a [0, 1]
    /// range, so the raw sample is remapped before scaling by amplitude.
    fn noise01(&self, x: f64, z: f64) -> f64 {
        ((self.perlin.get([x, z]) + 1.0) / 2.0).clamp(0.0, 1.0)
    }

    /// The stone and dirt ceilings of the column at world voxel `(wx, wz)`.
    pub fn column_thresholds(&self, wx: i32, wz: i32) -> ColumnThresholds {
        let stone = self.noise01(
            (self.seed * 2.0 + wx as f64) / self.frequency,
            (self.seed + wz as f64) / self.frequency,
        );
        let dirt = self.noise01(
            (self.seed + wx as f64) / self.frequency,
            (self.seed + wz as f64) / self.frequency,
        );
        ColumnThresholds {
            stone_max_y: (stone * self.amplitude).floor() as i32 + STONE_BASE_HEIGHT,
            dirt_max_y: (dirt * self.amplitude).floor() as i32 + DIRT_BASE_HEIGHT,
        }
    }

    /// Fills one (x, z) column of `grid` for the chunk at `coord`.
    ///
    /// This is the unit of work the chunk generation task suspends between.
    pub fn generate_column(&self, grid: &mut VoxelGrid, coord: Point2<i32>, x: usize, z: usize) {
        let wx = coord.x * grid.size_x() as i32 + x as i32;
        let wz = coord.y * grid.size_z() as i32 + z as i32;
        let thresholds = self.column_thresholds(wx, wz);

        for y in 0..grid.height() as i32 {
            let voxel_type = if y < thresholds.stone_max_y {
                VoxelType::STONE
            } else if y < thresholds.dirt_max_y {
                VoxelType::DIRT
            } else if y == thresholds.dirt_max_y {
                VoxelType::GRASS
            } else {
                VoxelType::AIR
            };
            grid.set(x as i32, y, z as i32, voxel_type)
                .expect("column iteration stays in bounds");
        }
    }

    /// Fills every column of `grid` for the chunk at `coord`.
    pub fn generate_into(&self, grid: &mut VoxelGrid, coord: Point2<i32>) {
        for x in 0..grid.size_x() {
            for z in 0..grid.size_z() {
                self.generate_column(grid, coord, x, z);
            }
        }
    }

    /// Generates a fresh grid for the chunk at `coord`.
    pub fn generate(&self, coord: Point2<i32>, size: usize, height: usize) -> VoxelGrid {
        let mut grid = VoxelGrid::new(size, height, size);
        self.generate_into(&mut grid, coord);
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> TerrainGenerator {
        TerrainGenerator::new(99.0, 10.0, 20.0)
    }

    /// The type the fill rule assigns at height `y` for the given thresholds.
    fn expected_type(t: ColumnThresholds, y: i32) -> VoxelType {
        if y < t.stone_max_y {
            VoxelType::STONE
        } else if y < t.dirt_max_y {
            VoxelType::DIRT
        } else if y == t.dirt_max_y {
            VoxelType::GRASS
        } else {
            VoxelType::AIR
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generator().generate(Point2::new(3, -2), 16, 64);
        let b = generator().generate(Point2::new(3, -2), 16, 64);
        assert_eq!(a.as_ids(), b.as_ids());
    }

    #[test]
    fn columns_layer_stone_dirt_grass_air() {
        let gen = generator();
        let grid = gen.generate(Point2::new(0, 0), 16, 64);

        for x in 0..16 {
            for z in 0..16 {
                let thresholds = gen.column_thresholds(x, z);
                for y in 0..64 {
                    assert_eq!(
                        grid.get(x, y, z).unwrap(),
                        expected_type(thresholds, y),
                        "at ({x}, {y}, {z})"
                    );
                }
            }
        }
    }

    #[test]
    fn at_most_one_grass_cap_per_column_and_air_above() {
        let gen = generator();
        let grid = gen.generate(Point2::new(5, 7), 16, 64);
        for x in 0..16 {
            for z in 0..16 {
                let t = gen.column_thresholds(5 * 16 + x, 7 * 16 + z);
                let grass = (0..64)
                    .filter(|&y| grid.get(x, y, z).unwrap() == VoxelType::GRASS)
                    .count();
                // A stone ceiling above the dirt ceiling buries the cap;
                // otherwise there is exactly one.
                let expected = usize::from(t.stone_max_y <= t.dirt_max_y);
                assert_eq!(grass, expected, "column ({x}, {z})");

                let surface = t.stone_max_y.max(t.dirt_max_y);
                for y in surface + 1..64 {
                    assert_eq!(grid.get(x, y, z).unwrap(), VoxelType::AIR);
                }
            }
        }
    }

    #[test]
    fn noise_is_continuous_across_chunk_borders() {
        let gen = generator();
        // The first column of chunk (1, 0) samples world x = 16, exactly one
        // step past the last column of chunk (0, 0); both must match direct
        // world-coordinate sampling of the same field.
        let right = gen.generate(Point2::new(1, 0), 16, 64);

        for z in 0..16 {
            let border = gen.column_thresholds(16, z);
            for y in 0..64 {
                assert_eq!(
                    right.get(0, y, z).unwrap(),
                    expected_type(border, y),
                    "border column z = {z}, y = {y}"
                );
            }
        }
    }

    #[test]
    fn thresholds_stay_inside_their_bands() {
        let gen = generator();
        for wx in -64..64 {
            for wz in -64..64 {
                let t = gen.column_thresholds(wx, wz);
                assert!((5..=15).contains(&t.stone_max_y), "stone at ({wx}, {wz})");
                assert!((10..=20).contains(&t.dirt_max_y), "dirt at ({wx}, {wz})");
            }
        }
    }
}
