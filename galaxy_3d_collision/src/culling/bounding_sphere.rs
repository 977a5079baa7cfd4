/// BoundingSphere: loose sphere around a vertex range.
///
/// Local center/radius come from the range's axis-aligned extents. The world
/// copies follow the owner's world matrix after each `update()`.

use glam::{Mat4, Vec3, Vec4};
use crate::camera::plane_dot_coordinate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    center: Vec3,
    radius: f32,
    center_world: Vec3,
    radius_world: f32,
}

impl BoundingSphere {
    /// Sphere enclosing the box `[minimum, maximum]`.
    ///
    /// World fields start equal to the local ones (identity transform).
    pub fn from_min_max(minimum: Vec3, maximum: Vec3) -> Self {
        let center = (minimum + maximum) * 0.5;
        let radius = minimum.distance(maximum) * 0.5;
        Self {
            center,
            radius,
            center_world: center,
            radius_world: radius,
        }
    }

    // ===== GETTERS =====

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn center_world(&self) -> Vec3 {
        self.center_world
    }

    pub fn radius_world(&self) -> f32 {
        self.radius_world
    }

    // ===== UPDATE =====

    /// Recompute world-space center and radius.
    ///
    /// `scale_factor` is the largest axis scale of `world`.
    pub fn update(&mut self, world: &Mat4, scale_factor: f32) {
        self.center_world = world.transform_point3(self.center);
        self.radius_world = self.radius * scale_factor;
    }

    // ===== QUERIES =====

    /// True unless the sphere lies entirely behind one of the planes.
    pub fn is_in_frustum(&self, planes: &[Vec4; 6]) -> bool {
        planes
            .iter()
            .all(|plane| plane_dot_coordinate(plane, self.center_world) >= -self.radius_world)
    }

    pub fn intersects_point(&self, point: Vec3) -> bool {
        self.center_world.distance(point) <= self.radius_world
    }

    /// World sphere vs world sphere.
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let radius_sum = self.radius_world + other.radius_world;
        self.center_world.distance_squared(other.center_world) <= radius_sum * radius_sum
    }
}

#[cfg(test)]
#[path = "bounding_sphere_tests.rs"]
mod tests;
