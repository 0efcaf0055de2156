//! Ray-voxel intersection by incremental grid traversal (3D DDA)
//!
//! The traversal follows Amanatides & Woo: per axis it tracks the ray
//! parameter of the next cell boundary (`t_max`) and the parameter span of
//! one cell (`t_delta`), and always steps across whichever boundary comes
//! first. Every cell the ray passes through is visited, none are skipped.
//!
//! All positions here are in lattice space; see
//! [`WorldMapping`](super::mapping::WorldMapping) for world-space rays.

use crate::core::types::{IVec3, Vec3};
use crate::math::Ray;
use super::face::Face;
use super::grid::VoxelGrid;

/// Result of a successful raycast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelHit {
    /// Struck cell
    pub coord: IVec3,
    /// Point where the ray entered the cell
    pub position: Vec3,
    /// Face the ray entered through; `None` if the ray started inside the cell
    pub face: Option<Face>,
    /// Ray parameter of `position`
    pub distance: f32,
}

impl VoxelHit {
    /// Outward normal of the entered face, or zero if there is none
    pub fn normal(&self) -> IVec3 {
        self.face.map_or(IVec3::ZERO, Face::normal)
    }
}

/// A cell visited by a [`GridTraversal`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraversalStep {
    pub cell: IVec3,
    /// Ray parameter at which the ray enters `cell`
    pub distance: f32,
    /// Face of `cell` the ray crossed to get here; `None` for the start cell
    pub face: Option<Face>,
}

/// Iterator over the cells a ray passes through, in order, up to a maximum distance.
///
/// Ties between axes are broken X before Y before Z. An axis whose direction
/// component is exactly zero never steps.
#[derive(Clone, Debug)]
pub struct GridTraversal {
    cell: IVec3,
    step: IVec3,
    t_max: Vec3,
    t_delta: Vec3,
    distance: f32,
    max_distance: f32,
    face: Option<Face>,
    done: bool,
}

impl GridTraversal {
    /// Start a traversal at the cell containing `ray.origin`.
    ///
    /// The direction is normalized here, so distances are always in cell
    /// units. A zero or non-finite direction, or a non-finite or negative
    /// `max_distance`, yields an empty traversal.
    pub fn new(ray: &Ray, max_distance: f32) -> Self {
        let origin = ray.origin;
        let direction = ray.direction.try_normalize().unwrap_or(Vec3::ZERO);
        let cell = origin.floor().as_ivec3();

        let mut step = IVec3::ZERO;
        let mut t_max = Vec3::splat(f32::INFINITY);
        let mut t_delta = Vec3::splat(f32::INFINITY);

        for axis in 0..3 {
            let d = direction[axis];
            let o = origin[axis];
            let c = cell[axis] as f32;
            if d > 0.0 {
                step[axis] = 1;
                t_delta[axis] = 1.0 / d;
                t_max[axis] = (c + 1.0 - o) / d;
            } else if d < 0.0 {
                step[axis] = -1;
                t_delta[axis] = -1.0 / d;
                // abs() folds the -0.0 from an origin sitting on a boundary
                t_max[axis] = ((c - o) / d).abs();
            }
        }

        let valid = max_distance.is_finite()
            && max_distance >= 0.0
            && origin.is_finite()
            && step != IVec3::ZERO;

        Self {
            cell,
            step,
            t_max,
            t_delta,
            distance: 0.0,
            max_distance,
            face: None,
            done: !valid,
        }
    }

    /// Per-axis step direction (-1, 0 or 1)
    pub fn step(&self) -> IVec3 {
        self.step
    }

    fn advance(&mut self) {
        let t = self.t_max;
        let axis = if t.x <= t.y && t.x <= t.z {
            0
        } else if t.y <= t.z {
            1
        } else {
            2
        };

        if !t[axis].is_finite() {
            self.done = true;
            return;
        }

        self.cell[axis] = self.cell[axis].saturating_add(self.step[axis]);
        self.distance = t[axis];
        self.t_max[axis] += self.t_delta[axis];
        // Entered through the face opposite to the direction of travel
        self.face = Some(Face::from_axis(axis, self.step[axis] < 0));
    }
}

impl Iterator for GridTraversal {
    type Item = TraversalStep;

    fn next(&mut self) -> Option<TraversalStep> {
        if self.done || self.distance > self.max_distance {
            self.done = true;
            return None;
        }
        let current = TraversalStep {
            cell: self.cell,
            distance: self.distance,
            face: self.face,
        };
        self.advance();
        Some(current)
    }
}

/// Whether a ray in `cell` moving by `step` can never enter the grid again
fn leaving_grid(grid: &VoxelGrid, cell: IVec3, step: IVec3) -> bool {
    let dims = grid.dims().as_ivec3();
    (0..3).any(|axis| {
        (cell[axis] < 0 && step[axis] <= 0) || (cell[axis] >= dims[axis] && step[axis] >= 0)
    })
}

/// First solid cell along `ray` within `max_distance`, in lattice space.
///
/// Returns `None` if the ray travels `max_distance` without touching a solid
/// cell. The direction need not be normalized; `distance` is always measured
/// along the unit direction.
pub fn cast(ray: &Ray, grid: &VoxelGrid, max_distance: f32) -> Option<VoxelHit> {
    let Ok(ray) = Ray::try_new(ray.origin, ray.direction) else {
        log::trace!("Degenerate ray from {} ignored", ray.origin);
        return None;
    };
    let traversal = GridTraversal::new(&ray, max_distance);
    let step = traversal.step();

    let hit = traversal
        .take_while(|s| !leaving_grid(grid, s.cell, step))
        .find(|s| grid.is_solid_at(s.cell))
        .map(|s| VoxelHit {
            coord: s.cell,
            position: ray.at(s.distance),
            face: s.face,
            distance: s.distance,
        });

    match &hit {
        Some(h) => log::trace!(
            "Ray from {} hit {} at t={:.3} through {:?}",
            ray.origin, h.coord, h.distance, h.face
        ),
        None => log::trace!("Ray from {} missed within {}", ray.origin, max_distance),
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UVec3;
    use crate::voxel::SeedPattern;

    fn full(size: u32) -> VoxelGrid {
        VoxelGrid::from_seed(UVec3::splat(size), &SeedPattern::Full).unwrap()
    }

    fn single(size: u32, cell: IVec3) -> VoxelGrid {
        let mut grid = VoxelGrid::new(UVec3::splat(size)).unwrap();
        grid.set_solid_at(cell, true).unwrap();
        grid
    }

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray::try_new(origin, direction).unwrap()
    }

    #[test]
    fn test_top_down_hit_on_full_grid() {
        let grid = full(8);
        let hit = cast(&ray(Vec3::new(4.0, 20.0, 4.0), Vec3::NEG_Y), &grid, 100.0).unwrap();
        assert_eq!(hit.coord, IVec3::new(4, 7, 4));
        assert_eq!(hit.normal(), IVec3::new(0, 1, 0));
        assert_eq!(hit.face, Some(Face::PosY));
        assert!((hit.position.y - 8.0).abs() < 1e-5);
        assert!((hit.distance - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_axis_aligned_hits_report_entry_face() {
        let target = IVec3::new(3, 2, 2);
        let grid = single(5, target);
        let center = target.as_vec3() + Vec3::splat(0.5);

        for dir in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
            let origin = center - dir * 10.0;
            let hit = cast(&ray(origin, dir), &grid, 50.0).unwrap();
            assert_eq!(hit.coord, target);
            assert_eq!(hit.normal(), -dir.as_ivec3());
            assert!((hit.distance - 9.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hit_position_lies_on_entry_face() {
        let grid = single(5, IVec3::new(3, 2, 2));
        let hit = cast(&ray(Vec3::new(-3.5, 2.5, 2.5), Vec3::X), &grid, 50.0).unwrap();
        assert_eq!(hit.face, Some(Face::NegX));
        assert!((hit.position - Vec3::new(3.0, 2.5, 2.5)).length() < 1e-5);
    }

    #[test]
    fn test_miss_outside_bounds() {
        let grid = full(8);
        // Parallel to the grid, above it
        let above = ray(Vec3::new(-1.0, 10.0, 0.5), Vec3::X);
        assert!(cast(&above, &grid, 100.0).is_none());

        // Heading towards the grid but stopping short
        let short = ray(Vec3::new(-10.0, 4.5, 4.5), Vec3::X);
        assert!(cast(&short, &grid, 5.0).is_none());

        // Heading away from the grid
        let away = ray(Vec3::new(-1.0, 4.5, 4.5), Vec3::NEG_X);
        assert!(cast(&away, &grid, 1000.0).is_none());
    }

    #[test]
    fn test_max_distance_is_inclusive() {
        let grid = full(8);
        let r = ray(Vec3::new(4.0, 20.0, 4.0), Vec3::NEG_Y);
        assert!(cast(&r, &grid, 11.9).is_none());
        assert!(cast(&r, &grid, 12.0).is_some());
    }

    #[test]
    fn test_unnormalized_direction_measures_unit_distance() {
        let grid = full(8);
        let long = Ray::new(Vec3::new(4.5, 20.0, 4.5), Vec3::new(0.0, -2.0, 0.0));
        assert!(cast(&long, &grid, 10.0).is_none());

        let hit = cast(&long, &grid, 12.0).unwrap();
        assert_eq!(hit.coord, IVec3::new(4, 7, 4));
        assert!((hit.distance - 12.0).abs() < 1e-5);
        assert!((hit.position.y - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_direction_yields_nothing() {
        let grid = full(4);
        assert!(cast(&Ray::new(Vec3::splat(-1.0), Vec3::ZERO), &grid, 10.0).is_none());
        assert_eq!(GridTraversal::new(&Ray::new(Vec3::splat(0.5), Vec3::ZERO), 10.0).count(), 0);
    }

    #[test]
    fn test_origin_inside_solid_has_no_face() {
        let grid = full(4);
        let hit = cast(&ray(Vec3::splat(1.5), Vec3::X), &grid, 10.0).unwrap();
        assert_eq!(hit.coord, IVec3::ONE);
        assert_eq!(hit.face, None);
        assert_eq!(hit.normal(), IVec3::ZERO);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_origin_on_boundary_moving_negative() {
        let grid = full(8);
        let hit = cast(&ray(Vec3::new(8.0, 0.5, 0.5), Vec3::NEG_X), &grid, 10.0).unwrap();
        assert_eq!(hit.coord, IVec3::new(7, 0, 0));
        assert_eq!(hit.face, Some(Face::PosX));
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_diagonal_tie_break_order() {
        let grid = VoxelGrid::new(UVec3::splat(4)).unwrap();
        let cells: Vec<IVec3> = GridTraversal::new(&ray(Vec3::splat(0.5), Vec3::ONE), 3.0)
            .map(|s| s.cell)
            .collect();
        assert_eq!(
            &cells[..7],
            &[
                IVec3::new(0, 0, 0),
                IVec3::new(1, 0, 0),
                IVec3::new(1, 1, 0),
                IVec3::new(1, 1, 1),
                IVec3::new(2, 1, 1),
                IVec3::new(2, 2, 1),
                IVec3::new(2, 2, 2),
            ]
        );
        assert!(cast(&ray(Vec3::splat(0.5), Vec3::ONE), &grid, 10.0).is_none());

        let grid = single(4, IVec3::splat(2));
        let hit = cast(&ray(Vec3::splat(0.5), Vec3::ONE), &grid, 10.0).unwrap();
        assert_eq!(hit.coord, IVec3::splat(2));
        assert_eq!(hit.face, Some(Face::NegZ));
    }

    #[test]
    fn test_traversal_visits_adjacent_cells() {
        let r = ray(Vec3::new(0.2, 0.7, 0.4), Vec3::new(0.6, -0.3, 0.9));
        let steps: Vec<TraversalStep> = GridTraversal::new(&r, 20.0).collect();
        for pair in steps.windows(2) {
            let delta = pair[1].cell - pair[0].cell;
            assert_eq!(delta.abs().element_sum(), 1, "cells must be face-adjacent");
            assert!(pair[1].distance >= pair[0].distance);
            assert_eq!(pair[1].face.map(Face::normal), Some(-delta));
        }
    }

    #[test]
    fn test_traversal_is_bounded() {
        let steps = GridTraversal::new(&ray(Vec3::splat(0.5), Vec3::X), 10.0).count();
        assert_eq!(steps, 11);

        let diagonal = GridTraversal::new(&ray(Vec3::splat(0.1), Vec3::new(1.0, 2.0, 3.0)), 10.0).count();
        assert!(diagonal <= 3 * (10 + 1));
    }

    #[test]
    fn test_invalid_max_distance_yields_nothing() {
        let grid = full(4);
        let r = ray(Vec3::splat(1.5), Vec3::X);
        assert!(cast(&r, &grid, f32::NAN).is_none());
        assert!(cast(&r, &grid, f32::INFINITY).is_none());
        assert!(cast(&r, &grid, -1.0).is_none());
    }

    #[test]
    fn test_cast_is_deterministic() {
        let mut grid = full(8);
        grid.set_solid(3, 7, 3, false).unwrap();
        let r = ray(Vec3::new(-2.0, 12.0, 1.0), Vec3::new(0.5, -1.0, 0.3));
        assert_eq!(cast(&r, &grid, 64.0), cast(&r, &grid, 64.0));
    }
}
