//! Dense occupancy grid for a fixed-size voxel world

use crate::core::error::Error;
use crate::core::types::{IVec3, Result, UVec3, Vec3};
use crate::math::Aabb;
use super::seed::SeedPattern;

/// Fixed-size 3D grid of solid/empty cells.
///
/// Cell `(x, y, z)` occupies the unit cube `[x, x+1] x [y, y+1] x [z, z+1]`
/// in lattice space. Queries outside the grid are never solid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    dims: UVec3,
    /// x-fastest, then y, then z
    cells: Vec<bool>,
}

impl VoxelGrid {
    /// Create an empty grid. Every dimension must be non-zero, and the total
    /// cell count must fit in `usize`.
    pub fn new(dims: UVec3) -> Result<Self> {
        let invalid = || Error::InvalidDimensions { x: dims.x, y: dims.y, z: dims.z };
        if dims.min_element() == 0 || dims.max_element() > i32::MAX as u32 {
            return Err(invalid());
        }
        let len = (dims.x as usize)
            .checked_mul(dims.y as usize)
            .and_then(|n| n.checked_mul(dims.z as usize))
            .ok_or_else(invalid)?;
        Ok(Self {
            dims,
            cells: vec![false; len],
        })
    }

    /// Create a grid and seed it from a fill pattern
    pub fn from_seed(dims: UVec3, seed: &SeedPattern) -> Result<Self> {
        let mut grid = Self::new(dims)?;
        let predicate = seed.predicate(dims);
        grid.fill(predicate);
        Ok(grid)
    }

    /// Grid dimensions in cells
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `pos` lies inside the grid
    pub fn contains(&self, pos: IVec3) -> bool {
        pos.cmpge(IVec3::ZERO).all() && pos.cmplt(self.dims.as_ivec3()).all()
    }

    fn index(&self, pos: IVec3) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let (x, y, z) = (pos.x as usize, pos.y as usize, pos.z as usize);
        let (sx, sy) = (self.dims.x as usize, self.dims.y as usize);
        Some(x + sx * (y + sy * z))
    }

    fn position(&self, index: usize) -> IVec3 {
        let (sx, sy) = (self.dims.x as usize, self.dims.y as usize);
        IVec3::new(
            (index % sx) as i32,
            ((index / sx) % sy) as i32,
            (index / (sx * sy)) as i32,
        )
    }

    /// Occupancy at `(x, y, z)`; false for any coordinate outside the grid
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.is_solid_at(IVec3::new(x, y, z))
    }

    /// Occupancy at `pos`; false for any coordinate outside the grid
    pub fn is_solid_at(&self, pos: IVec3) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i])
    }

    /// Set a single cell.
    ///
    /// Coordinates outside the grid fail with [`Error::OutOfBounds`] and
    /// leave the grid untouched.
    pub fn set_solid(&mut self, x: i32, y: i32, z: i32, value: bool) -> Result<()> {
        self.set_solid_at(IVec3::new(x, y, z), value)
    }

    /// Set a single cell, see [`VoxelGrid::set_solid`]
    pub fn set_solid_at(&mut self, pos: IVec3, value: bool) -> Result<()> {
        let index = self
            .index(pos)
            .ok_or(Error::OutOfBounds { x: pos.x, y: pos.y, z: pos.z })?;
        self.cells[index] = value;
        Ok(())
    }

    /// Overwrite every cell from a per-coordinate predicate
    pub fn fill(&mut self, mut predicate: impl FnMut(IVec3) -> bool) {
        for index in 0..self.cells.len() {
            let pos = self.position(index);
            self.cells[index] = predicate(pos);
        }
    }

    /// Number of solid cells
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&solid| solid).count()
    }

    /// Iterate over the coordinates of all solid cells (x-fastest order)
    pub fn iter_solid(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, solid)| **solid)
            .map(|(i, _)| self.position(i))
    }

    /// Bounds of the grid in lattice space: `[0, dims]`
    pub fn lattice_bounds(&self) -> Aabb {
        Aabb::new(Vec3::ZERO, self.dims.as_vec3())
    }
}
