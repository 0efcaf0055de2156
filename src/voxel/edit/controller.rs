//! Pick-to-remove editing

use crate::math::Ray;
use crate::voxel::grid::VoxelGrid;
use crate::voxel::mapping::WorldMapping;
use crate::voxel::raycast::{cast, VoxelHit};

/// Maximum distance, in cells, a pick ray travels
pub const DEFAULT_PICK_DISTANCE: f32 = 64.0;

/// Turns pick events into single-voxel removals.
///
/// Each pick clears at most one cell: the first solid cell along the ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditController {
    max_distance: f32,
}

impl EditController {
    /// Create a controller with a finite pick distance
    pub fn new(max_distance: f32) -> Self {
        let max_distance = if max_distance.is_finite() && max_distance >= 0.0 {
            max_distance
        } else {
            log::warn!("Invalid pick distance {max_distance}, using {DEFAULT_PICK_DISTANCE}");
            DEFAULT_PICK_DISTANCE
        };
        Self { max_distance }
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Remove the first solid cell along a lattice-space ray.
    ///
    /// Returns true if a cell was removed; otherwise the grid is unchanged.
    pub fn pick(&self, ray: &Ray, grid: &mut VoxelGrid) -> bool {
        self.pick_hit(ray, grid).is_some()
    }

    /// Same as [`EditController::pick`], returning the removed hit
    pub fn pick_hit(&self, ray: &Ray, grid: &mut VoxelGrid) -> Option<VoxelHit> {
        let hit = cast(ray, grid, self.max_distance)?;
        if let Err(e) = grid.set_solid_at(hit.coord, false) {
            log::warn!("Pick hit {} but removal failed: {}", hit.coord, e);
            return None;
        }
        log::debug!("Removed voxel {} (face {:?}, t={:.2})", hit.coord, hit.face, hit.distance);
        Some(hit)
    }

    /// Pick with a world-space ray; the returned hit position is in world space
    pub fn pick_world(&self, ray: &Ray, grid: &mut VoxelGrid, mapping: &WorldMapping) -> Option<VoxelHit> {
        let lattice_ray = mapping.ray_to_lattice(ray);
        self.pick_hit(&lattice_ray, grid).map(|hit| VoxelHit {
            position: mapping.lattice_to_world(hit.position),
            ..hit
        })
    }
}

impl Default for EditController {
    fn default() -> Self {
        Self::new(DEFAULT_PICK_DISTANCE)
    }
}
