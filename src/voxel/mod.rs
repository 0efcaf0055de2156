//! Voxel data structures and operations

pub mod grid;
pub mod seed;
pub mod mapping;
pub mod face;
pub mod mesh;
pub mod raycast;
pub mod edit;

pub use grid::VoxelGrid;
pub use seed::SeedPattern;
pub use mapping::WorldMapping;
pub use face::{exposed_faces, Face, FaceSet};
pub use mesh::{FaceMesh, FaceVertex};
pub use raycast::{cast, GridTraversal, TraversalStep, VoxelHit};
pub use edit::{EditController, EditLog};
