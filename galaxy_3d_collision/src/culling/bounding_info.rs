/// BoundingInfo: sphere + box pair built from one vertex range.
///
/// The sphere is always tested first since it is cheaper; the box only
/// runs when the sphere could not decide.

use glam::{Mat4, Vec3, Vec4};
use crate::collision::Collider;
use crate::engine_bail;
use crate::error::Result;
use super::bounding_box::BoundingBox;
use super::bounding_sphere::BoundingSphere;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingInfo {
    bounding_sphere: BoundingSphere,
    bounding_box: BoundingBox,
}

impl BoundingInfo {
    /// Build from `positions[start..start + count]`.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` if the range is empty or runs past the end of `positions`.
    pub fn new(positions: &[Vec3], start: usize, count: usize) -> Result<Self> {
        if count == 0 {
            engine_bail!(InvalidGeometry, "galaxy3d::BoundingInfo",
                "cannot bound an empty vertex range (start {})", start);
        }
        let end = match start.checked_add(count) {
            Some(end) if end <= positions.len() => end,
            _ => engine_bail!(InvalidGeometry, "galaxy3d::BoundingInfo",
                "vertex range {}+{} out of bounds ({} vertices)", start, count, positions.len()),
        };

        let (minimum, maximum) = positions[start..end].iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(-f32::MAX)),
            |(minimum, maximum), p| (minimum.min(*p), maximum.max(*p)),
        );

        Ok(Self::from_min_max(minimum, maximum))
    }

    pub fn from_min_max(minimum: Vec3, maximum: Vec3) -> Self {
        Self {
            bounding_sphere: BoundingSphere::from_min_max(minimum, maximum),
            bounding_box: BoundingBox::from_min_max(minimum, maximum),
        }
    }

    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounding_sphere
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Largest axis scale of `world` (length of the longest basis column).
    pub fn scale_factor(world: &Mat4) -> f32 {
        world.col(0).truncate().length()
            .max(world.col(1).truncate().length())
            .max(world.col(2).truncate().length())
    }

    /// Refresh both volumes for a new world matrix.
    pub fn update(&mut self, world: &Mat4) {
        let scale_factor = Self::scale_factor(world);
        self.bounding_box.update(world);
        self.bounding_sphere.update(world, scale_factor);
    }

    pub fn is_in_frustum(&self, planes: &[Vec4; 6]) -> bool {
        self.bounding_sphere.is_in_frustum(planes) && self.bounding_box.is_in_frustum(planes)
    }

    pub fn intersects_point(&self, point: Vec3) -> bool {
        self.bounding_sphere.intersects_point(point) && self.bounding_box.intersects_point(point)
    }

    /// Broad-phase gate for a collider sweep.
    pub fn check_collision(&self, collider: &Collider) -> bool {
        collider.can_do_collision(
            self.bounding_sphere.center_world(),
            self.bounding_sphere.radius_world(),
            self.bounding_box.minimum_world(),
            self.bounding_box.maximum_world(),
        )
    }

    /// Volume overlap. `precise` adds a separating-axis test on the oriented boxes.
    pub fn intersects(&self, other: &BoundingInfo, precise: bool) -> bool {
        if !self.bounding_sphere.intersects(&other.bounding_sphere) {
            return false;
        }
        if !self.bounding_box.intersects(&other.bounding_box) {
            return false;
        }
        if !precise {
            return true;
        }

        let box0 = &self.bounding_box;
        let box1 = &other.bounding_box;
        let d0 = box0.directions();
        let d1 = box1.directions();

        d0.iter().chain(d1.iter()).all(|axis| axis_overlap(*axis, box0, box1))
            && d0.iter().all(|a| d1.iter().all(|b| axis_overlap(a.cross(*b), box0, box1)))
    }
}

/// Projection interval of an oriented box on `axis`.
fn box_extents_on_axis(axis: Vec3, bbox: &BoundingBox) -> (f32, f32) {
    let p = bbox.center_world().dot(axis);
    let directions = bbox.directions();
    let extents = bbox.extents();
    let r = directions[0].dot(axis).abs() * extents.x
        + directions[1].dot(axis).abs() * extents.y
        + directions[2].dot(axis).abs() * extents.z;
    (p - r, p + r)
}

fn axis_overlap(axis: Vec3, box0: &BoundingBox, box1: &BoundingBox) -> bool {
    let (min0, max0) = box_extents_on_axis(axis, box0);
    let (min1, max1) = box_extents_on_axis(axis, box1);
    !(min0 > max1 || min1 > max0)
}

#[cfg(test)]
#[path = "bounding_info_tests.rs"]
mod tests;
