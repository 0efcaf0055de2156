//! Ray type and operations

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use super::aabb::Aabb;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
        }
    }

    /// Create a ray from an arbitrary direction, normalizing it.
    ///
    /// Fails with [`Error::DegenerateRay`] if the origin or direction is not
    /// finite, or the direction has zero length.
    pub fn try_new(origin: Vec3, direction: Vec3) -> Result<Self> {
        if !origin.is_finite() {
            return Err(Error::DegenerateRay(format!("non-finite origin {origin}")));
        }
        if !direction.is_finite() {
            return Err(Error::DegenerateRay(format!("non-finite direction {direction}")));
        }
        let direction = direction
            .try_normalize()
            .ok_or_else(|| Error::DegenerateRay("zero-length direction".to_string()))?;
        Ok(Self::new(origin, direction))
    }

    /// Create a ray from `from` towards `to`
    pub fn between(from: Vec3, to: Vec3) -> Result<Self> {
        Self::try_new(from, to - from)
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-AABB intersection using slab method
    /// Returns Some((t_near, t_far)) if intersection, None otherwise
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<(f32, f32)> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near <= t_far && t_far >= 0.0 {
            Some((t_near.max(0.0), t_far))
        } else {
            None
        }
    }

    /// Same ray with its origin moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Ray {
        Ray { origin: self.origin + offset, ..*self }
    }
}
