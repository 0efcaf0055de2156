//! Affine placement of the voxel lattice in world space

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, UVec3, Vec3};
use crate::math::{Aabb, Ray};

/// Translation between lattice space and world space: `world = lattice + offset`.
///
/// Rendering and picking must go through the same mapping so that what is
/// drawn and what is hit agree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldMapping {
    pub offset: Vec3,
}

impl WorldMapping {
    /// Lattice space and world space coincide
    pub const IDENTITY: WorldMapping = WorldMapping { offset: Vec3::ZERO };

    /// Grid of size `dims` centered on the world origin.
    ///
    /// The grid's outer faces sit at `±dims/2`, so cell `i` has its center at
    /// `i - dims/2 + 0.5`, half a cell off from a mapping that puts cell
    /// centers (rather than corners) on `i - dims/2`.
    pub fn centered(dims: UVec3) -> Self {
        Self { offset: -dims.as_vec3() * 0.5 }
    }

    pub fn lattice_to_world(&self, p: Vec3) -> Vec3 {
        p + self.offset
    }

    pub fn world_to_lattice(&self, p: Vec3) -> Vec3 {
        p - self.offset
    }

    /// World-space center of a cell
    pub fn cell_center(&self, cell: IVec3) -> Vec3 {
        self.lattice_to_world(cell.as_vec3() + Vec3::splat(0.5))
    }

    /// Cell containing a world-space point
    pub fn world_to_cell(&self, p: Vec3) -> IVec3 {
        self.world_to_lattice(p).floor().as_ivec3()
    }

    /// Express a world-space ray in lattice space
    pub fn ray_to_lattice(&self, ray: &Ray) -> Ray {
        ray.translated(-self.offset)
    }

    /// World-space bounds of a lattice-space box
    pub fn bounds_to_world(&self, bounds: &Aabb) -> Aabb {
        bounds.translated(self.offset)
    }
}

impl Default for WorldMapping {
    fn default() -> Self {
        Self::IDENTITY
    }
}
