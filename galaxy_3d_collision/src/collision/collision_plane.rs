/// CollisionPlane: oriented plane used by the swept-sphere tests.

use glam::{Vec3, Vec4};

/// Immutable plane through `origin` with unit `normal`.
///
/// A zero normal marks a degenerate plane (collinear triangle); callers
/// skip it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionPlane {
    normal: Vec3,
    origin: Vec3,
    equation: Vec4,
}

impl CollisionPlane {
    pub fn new(origin: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            origin,
            equation: normal.extend(-normal.dot(origin)),
        }
    }

    /// Plane of triangle `(p1, p2, p3)`, counter-clockwise front face.
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self::new(p1, (p2 - p1).cross(p3 - p1))
    }

    /// Same plane, opposite orientation.
    pub fn flipped(&self) -> Self {
        Self::new(self.origin, -self.normal)
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// `[nx, ny, nz, -dot(n, origin)]`
    pub fn equation(&self) -> Vec4 {
        self.equation
    }

    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }

    /// True when `direction` does not point along the normal.
    pub fn is_front_facing_to(&self, direction: Vec3, epsilon: f32) -> bool {
        self.normal.dot(direction) <= epsilon
    }

    pub fn signed_distance_to(&self, point: Vec3) -> f32 {
        point.dot(self.normal) + self.equation.w
    }
}

#[cfg(test)]
#[path = "collision_plane_tests.rs"]
mod tests;
