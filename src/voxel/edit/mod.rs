//! Voxel editing: ray picks that remove cells, with an undo log.

pub mod controller;
pub mod log;

pub use self::controller::{EditController, DEFAULT_PICK_DISTANCE};
pub use self::log::{EditLog, EditRecord};
