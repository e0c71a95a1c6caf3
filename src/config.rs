//! World configuration.
//!
//! All tunables of the streaming world in one serde-friendly struct, loadable
//! from a JSON file or constructed in code with [`WorldConfig::default`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration of the streaming voxel world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Radius in chunks (Chebyshev distance) around the player within which
    /// chunks are kept active.
    pub render_distance: i32,
    /// Extent of the chunk grid per axis; chunk coordinates live in
    /// `[0, max_chunks)` and the world is re-centered on the origin.
    pub max_chunks: i32,
    /// Chunk extent along X and Z, in voxels.
    pub chunk_size: usize,
    /// Chunk extent along Y, in voxels.
    pub chunk_height: usize,
    /// World seed, folded into the terrain noise sample coordinates.
    pub seed: f64,
    /// Amplitude of the terrain height noise.
    pub amplitude: f64,
    /// Frequency divisor of the terrain height noise.
    pub frequency: f64,
    /// How many generation-task steps each update tick may spend per chunk.
    pub generation_steps_per_tick: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            render_distance: 8,
            max_chunks: 511,
            chunk_size: 16,
            chunk_height: 256,
            seed: 99.0,
            amplitude: 10.0,
            frequency: 20.0,
            generation_steps_per_tick: 64,
        }
    }
}

impl WorldConfig {
    /// Loads a configuration from a JSON file; missing fields fall back to
    /// their defaults.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: WorldConfig = serde_json::from_str(r#"{ "render_distance": 3 }"#).unwrap();
        assert_eq!(config.render_distance, 3);
        assert_eq!(config.chunk_size, WorldConfig::default().chunk_size);
        assert_eq!(config.seed, WorldConfig::default().seed);
    }

    #[test]
    fn round_trips_through_json() {
        let config = WorldConfig {
            render_distance: 2,
            max_chunks: 15,
            chunk_size: 8,
            chunk_height: 32,
            seed: 7.0,
            amplitude: 5.0,
            frequency: 10.0,
            generation_steps_per_tick: 16,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: WorldConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.chunk_size, 8);
        assert_eq!(back.max_chunks, 15);
    }
}
