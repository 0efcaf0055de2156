//! World configuration supplied at session construction

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::{Result, UVec3, Vec3};
use crate::voxel::edit::DEFAULT_PICK_DISTANCE;
use crate::voxel::{SeedPattern, WorldMapping};

/// Configuration for a voxel session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid size in cells, serialized as `[x, y, z]`
    pub dims: UVec3,
    /// Center the grid on the world origin instead of placing cell (0,0,0) there
    pub centered: bool,
    /// Initial fill pattern
    pub seed: SeedPattern,
    /// Initial camera position (world space)
    pub camera_position: Vec3,
    /// Point the camera looks at (world space)
    pub camera_target: Vec3,
    /// Maximum pick distance in cells
    pub pick_distance: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            dims: UVec3::new(8, 4, 8),
            centered: true,
            seed: SeedPattern::Full,
            camera_position: Vec3::new(0.0, 10.0, 10.0),
            camera_target: Vec3::ZERO,
            pick_distance: DEFAULT_PICK_DISTANCE,
        }
    }
}

impl WorldConfig {
    /// Parse a configuration from JSON; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Mapping between lattice and world space for this configuration
    pub fn mapping(&self) -> WorldMapping {
        if self.centered {
            WorldMapping::centered(self.dims)
        } else {
            WorldMapping::IDENTITY
        }
    }
}
