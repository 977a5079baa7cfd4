/// BoundingBox: oriented box around a vertex range.
///
/// Stores the local box, its eight corners, and after `update()` the world
/// corners, their tight axis-aligned envelope, and the world axes used by
/// the separating-axis test in `BoundingInfo::intersects`.

use glam::{Mat4, Vec3, Vec4};
use crate::camera::plane_dot_coordinate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    minimum: Vec3,
    maximum: Vec3,
    center: Vec3,
    extents: Vec3,
    vectors: [Vec3; 8],

    vectors_world: [Vec3; 8],
    minimum_world: Vec3,
    maximum_world: Vec3,
    center_world: Vec3,
    /// World matrix columns 0..3, scale included
    directions: [Vec3; 3],
}

impl BoundingBox {
    /// Box spanning `[minimum, maximum]` in local space.
    ///
    /// World fields start equal to the local ones (identity transform).
    pub fn from_min_max(minimum: Vec3, maximum: Vec3) -> Self {
        let vectors = [
            minimum,
            maximum,
            Vec3::new(maximum.x, minimum.y, minimum.z),
            Vec3::new(minimum.x, maximum.y, minimum.z),
            Vec3::new(minimum.x, minimum.y, maximum.z),
            Vec3::new(maximum.x, maximum.y, minimum.z),
            Vec3::new(minimum.x, maximum.y, maximum.z),
            Vec3::new(maximum.x, minimum.y, maximum.z),
        ];
        let center = (minimum + maximum) * 0.5;

        Self {
            minimum,
            maximum,
            center,
            extents: (maximum - minimum) * 0.5,
            vectors,
            vectors_world: vectors,
            minimum_world: minimum,
            maximum_world: maximum,
            center_world: center,
            directions: [Vec3::X, Vec3::Y, Vec3::Z],
        }
    }

    // ===== GETTERS =====

    pub fn minimum(&self) -> Vec3 {
        self.minimum
    }

    pub fn maximum(&self) -> Vec3 {
        self.maximum
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Local half-size.
    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    /// Local corners.
    pub fn vectors(&self) -> &[Vec3; 8] {
        &self.vectors
    }

    /// Transformed corners.
    pub fn vectors_world(&self) -> &[Vec3; 8] {
        &self.vectors_world
    }

    pub fn minimum_world(&self) -> Vec3 {
        self.minimum_world
    }

    pub fn maximum_world(&self) -> Vec3 {
        self.maximum_world
    }

    pub fn center_world(&self) -> Vec3 {
        self.center_world
    }

    /// World axes (not normalized).
    pub fn directions(&self) -> &[Vec3; 3] {
        &self.directions
    }

    // ===== UPDATE =====

    /// Transform the corners by `world` and rebuild the world envelope.
    pub fn update(&mut self, world: &Mat4) {
        let mut minimum_world = Vec3::splat(f32::MAX);
        let mut maximum_world = Vec3::splat(-f32::MAX);

        for (local, transformed) in self.vectors.iter().zip(self.vectors_world.iter_mut()) {
            *transformed = world.transform_point3(*local);
            minimum_world = minimum_world.min(*transformed);
            maximum_world = maximum_world.max(*transformed);
        }

        self.minimum_world = minimum_world;
        self.maximum_world = maximum_world;
        self.center_world = (minimum_world + maximum_world) * 0.5;
        self.directions = [
            world.col(0).truncate(),
            world.col(1).truncate(),
            world.col(2).truncate(),
        ];
    }

    // ===== QUERIES =====

    /// False only if every world corner is behind the same plane.
    pub fn is_in_frustum(&self, planes: &[Vec4; 6]) -> bool {
        planes.iter().all(|plane| {
            self.vectors_world
                .iter()
                .any(|corner| plane_dot_coordinate(plane, *corner) >= 0.0)
        })
    }

    /// Point inside the world envelope (boundaries included).
    pub fn intersects_point(&self, point: Vec3) -> bool {
        point.cmpge(self.minimum_world).all() && point.cmple(self.maximum_world).all()
    }

    /// World envelope vs world envelope, touching counts.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.intersects_min_max(other.minimum_world, other.maximum_world)
    }

    pub fn intersects_min_max(&self, minimum: Vec3, maximum: Vec3) -> bool {
        self.maximum_world.x >= minimum.x && self.minimum_world.x <= maximum.x
            && self.maximum_world.y >= minimum.y && self.minimum_world.y <= maximum.y
            && self.maximum_world.z >= minimum.z && self.minimum_world.z <= maximum.z
    }

    /// World envelope vs sphere.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        let closest = center.clamp(self.minimum_world, self.maximum_world);
        closest.distance_squared(center) <= radius * radius
    }
}

#[cfg(test)]
#[path = "bounding_box_tests.rs"]
mod tests;
