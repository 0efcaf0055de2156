//! Session-level world management

pub mod config;
pub mod session;

pub use config::WorldConfig;
pub use session::{FrameReport, VoxelSession};
