//! voxpick - a small fixed-size voxel world
//!
//! Occupancy storage, neighbor-based face culling, DDA ray picking and
//! pick-to-remove editing. Windowing, input and GPU work belong to the host.

pub mod core;
pub mod math;
pub mod voxel;
pub mod scene;
