//! Error types for voxpick

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid grid dimensions: {x}x{y}x{z}")]
    InvalidDimensions { x: u32, y: u32, z: u32 },

    #[error("Voxel ({x}, {y}, {z}) is outside the grid")]
    OutOfBounds { x: i32, y: i32, z: i32 },

    #[error("Mesh has {vertices} vertices, more than a u32 index buffer can address")]
    MeshTooLarge { vertices: usize },

    #[error("Degenerate ray: {0}")]
    DegenerateRay(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
