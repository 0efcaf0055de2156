//! Initial fill patterns for a voxel grid

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, UVec3};

/// How a freshly created grid is filled.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedPattern {
    /// Every cell solid
    #[default]
    Full,
    /// Every cell empty
    Empty,
    /// Solid box around the grid center.
    ///
    /// With `center = dims / 2`, a cell is solid when
    /// `-half_extents <= cell - center < half_extents` on every axis,
    /// so `half_extents = dims / 2` fills an even-sized grid completely.
    CenteredBox { half_extents: UVec3 },
    /// Noise heightfield: each (x, z) column is solid up to a height in `[1, dims.y]`
    Terrain {
        seed: u32,
        /// Horizontal scale in cells (larger = smoother)
        scale: f32,
        octaves: u32,
    },
}

impl SeedPattern {
    /// Build the per-cell predicate for a grid of size `dims`
    pub fn predicate(&self, dims: UVec3) -> Box<dyn FnMut(IVec3) -> bool> {
        match self {
            SeedPattern::Full => Box::new(|_| true),
            SeedPattern::Empty => Box::new(|_| false),
            SeedPattern::CenteredBox { half_extents } => {
                let center = (dims / 2).as_ivec3();
                let half = half_extents.as_ivec3();
                Box::new(move |p| {
                    let rel = p - center;
                    rel.cmpge(-half).all() && rel.cmplt(half).all()
                })
            }
            SeedPattern::Terrain { seed, scale, octaves } => {
                let heights = terrain_heights(dims, *seed, *scale, *octaves);
                let width = dims.x as usize;
                Box::new(move |p| {
                    let column = p.x as usize + width * p.z as usize;
                    heights.get(column).is_some_and(|&h| p.y < h)
                })
            }
        }
    }
}

/// Column heights for the terrain pattern, x-fastest
fn terrain_heights(dims: UVec3, seed: u32, scale: f32, octaves: u32) -> Vec<i32> {
    let noise = Fbm::<Perlin>::new(seed)
        .set_octaves(octaves.max(1) as usize)
        .set_persistence(0.5)
        .set_lacunarity(2.0);
    let scale = if scale > 0.0 { scale as f64 } else { 1.0 };
    let max_height = dims.y as f64;

    let mut heights = Vec::with_capacity(dims.x as usize * dims.z as usize);
    for z in 0..dims.z {
        for x in 0..dims.x {
            // Sample cell centers; noise is in [-1, 1]
            let nx = (x as f64 + 0.5) / scale;
            let nz = (z as f64 + 0.5) / scale;
            let normalized = ((noise.get([nx, nz]) + 1.0) / 2.0).clamp(0.0, 1.0);
            let h = (normalized * max_height).round() as i32;
            heights.push(h.clamp(1, dims.y as i32));
        }
    }
    heights
}
