//! Quad mesh of all exposed voxel faces, ready for GPU upload

use bytemuck::{Pod, Zeroable};

use crate::core::error::Error;
use crate::core::types::Result;

use super::face::{visible_cells, QUAD_INDICES};
use super::grid::VoxelGrid;
use super::mapping::WorldMapping;

/// Single mesh vertex - 24 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FaceVertex {
    /// World-space position
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
}

/// Indexed triangle list with one quad per exposed face
#[derive(Clone, Debug, Default)]
pub struct FaceMesh {
    pub vertices: Vec<FaceVertex>,
    pub indices: Vec<u32>,
}

impl FaceMesh {
    /// Build the mesh for the current grid state.
    ///
    /// Fails if the vertex count outgrows `u32` indices.
    pub fn build(grid: &VoxelGrid, mapping: &WorldMapping) -> Result<Self> {
        let mut mesh = FaceMesh::default();
        for (cell, faces) in visible_cells(grid) {
            let center = mapping.cell_center(cell);
            for face in faces.iter() {
                let base = Self::index_base(mesh.vertices.len())?;
                let normal = face.normal().as_vec3().to_array();
                mesh.vertices.extend(face.quad_corners(center).map(|p| FaceVertex {
                    position: p.to_array(),
                    normal,
                }));
                mesh.indices.extend(QUAD_INDICES.map(|i| base + i));
            }
        }
        Ok(mesh)
    }

    /// First index of the next quad, if all four of its vertices stay addressable
    fn index_base(vertices: usize) -> Result<u32> {
        vertices
            .checked_add(3)
            .and_then(|last| u32::try_from(last).ok())
            .map(|last| last - 3)
            .ok_or(Error::MeshTooLarge { vertices })
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw vertex bytes for a vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for an index buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
