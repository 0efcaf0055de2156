//! Voxel faces and neighbor-based exposure
//!
//! A face of a solid cell is exposed when the neighbor across it is not
//! solid. Because out-of-bounds cells are never solid, the outer shell of
//! the world is always exposed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, Vec3};
use super::grid::VoxelGrid;

/// One of the six axis-aligned faces of a voxel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

/// Triangle list for one quad from [`Face::quad_corners`]
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Outward unit normal
    pub fn normal(self) -> IVec3 {
        match self {
            Face::PosX => IVec3::X,
            Face::NegX => IVec3::NEG_X,
            Face::PosY => IVec3::Y,
            Face::NegY => IVec3::NEG_Y,
            Face::PosZ => IVec3::Z,
            Face::NegZ => IVec3::NEG_Z,
        }
    }

    /// Face whose outward normal is `normal`, if it is an axis unit vector
    pub fn from_normal(normal: IVec3) -> Option<Face> {
        Face::ALL.into_iter().find(|f| f.normal() == normal)
    }

    /// Face on the negative or positive side of `axis` (0 = x, 1 = y, 2 = z)
    pub fn from_axis(axis: usize, positive: bool) -> Face {
        match (axis, positive) {
            (0, true) => Face::PosX,
            (0, false) => Face::NegX,
            (1, true) => Face::PosY,
            (1, false) => Face::NegY,
            (_, true) => Face::PosZ,
            (_, false) => Face::NegZ,
        }
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }

    /// Tangent axes `(u, v)` with `u x v == normal`
    fn tangents(self) -> (Vec3, Vec3) {
        match self {
            Face::PosX => (Vec3::Y, Vec3::Z),
            Face::NegX => (Vec3::Z, Vec3::Y),
            Face::PosY => (Vec3::Z, Vec3::X),
            Face::NegY => (Vec3::X, Vec3::Z),
            Face::PosZ => (Vec3::X, Vec3::Y),
            Face::NegZ => (Vec3::Y, Vec3::X),
        }
    }

    /// Corners of this face for a unit cube centered at `center`.
    ///
    /// Counter-clockwise when viewed from outside the cube.
    pub fn quad_corners(self, center: Vec3) -> [Vec3; 4] {
        let (u, v) = self.tangents();
        let c = center + self.normal().as_vec3() * 0.5;
        let (u, v) = (u * 0.5, v * 0.5);
        [c - u - v, c + u - v, c + u + v, c - u + v]
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Face::PosX => "+X",
            Face::NegX => "-X",
            Face::PosY => "+Y",
            Face::NegY => "-Y",
            Face::PosZ => "+Z",
            Face::NegZ => "-Z",
        };
        f.write_str(name)
    }
}

/// Compact set of faces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceSet(u8);

impl FaceSet {
    pub const EMPTY: FaceSet = FaceSet(0);
    pub const ALL: FaceSet = FaceSet(0b11_1111);

    pub fn insert(&mut self, face: Face) {
        self.0 |= face.bit();
    }

    pub fn contains(self, face: Face) -> bool {
        self.0 & face.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Faces in the set, in [`Face::ALL`] order
    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<Face> for FaceSet {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        let mut set = FaceSet::EMPTY;
        for face in iter {
            set.insert(face);
        }
        set
    }
}

/// Faces of cell `(x, y, z)` that border a non-solid cell.
///
/// Empty for non-solid cells.
pub fn exposed_faces(grid: &VoxelGrid, x: i32, y: i32, z: i32) -> FaceSet {
    exposed_faces_at(grid, IVec3::new(x, y, z))
}

/// See [`exposed_faces`]
pub fn exposed_faces_at(grid: &VoxelGrid, pos: IVec3) -> FaceSet {
    if !grid.is_solid_at(pos) {
        return FaceSet::EMPTY;
    }
    Face::ALL
        .into_iter()
        .filter(|f| !grid.is_solid_at(pos + f.normal()))
        .collect()
}

/// Every solid cell with at least one exposed face, paired with those faces
pub fn visible_cells(grid: &VoxelGrid) -> impl Iterator<Item = (IVec3, FaceSet)> + '_ {
    grid.iter_solid()
        .map(|pos| (pos, exposed_faces_at(grid, pos)))
        .filter(|(_, faces)| !faces.is_empty())
}

/// Total number of exposed faces in the grid
pub fn exposed_face_count(grid: &VoxelGrid) -> usize {
    visible_cells(grid).map(|(_, faces)| faces.len()).sum()
}
