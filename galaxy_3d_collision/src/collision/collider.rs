/// Collider: swept unit sphere against triangles.
///
/// One collider belongs to one moving controller and is borrowed mutably
/// for the whole resolution. `initialize()` resets the per-sweep state at
/// the top of every slide iteration; triangles are then submitted through
/// `collide()` (or `test_triangle()` directly) and the nearest contact is
/// kept. `get_response()` turns that contact into a slide.
///
/// All sweep quantities are in ellipsoid space (world divided by `radius`),
/// except the `*_world` fields used by the broad phase.

use std::ops::Range;
use glam::Vec3;
use crate::engine_trace;
use crate::scene::EntityKey;
use super::collision_plane::CollisionPlane;

/// `|normal . velocity|` at or below which a sweep counts as parallel to the plane.
const PARALLEL_THRESHOLD: f32 = 1e-6;

/// Quadratic leading coefficient treated as zero.
const QUADRATIC_EPSILON: f32 = 1e-12;

/// Front-face order of submitted triangles.
///
/// A world matrix with a negative determinant mirrors geometry and turns
/// counter-clockwise triangles clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    #[default]
    CounterClockwise,
    Clockwise,
}

impl Winding {
    /// Winding of counter-clockwise local triangles once `matrix` is applied.
    pub fn of_transform(matrix: &glam::Mat4) -> Self {
        if matrix.determinant() < 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }
}

/// Smallest root of `a*t^2 + b*t + c = 0` within `(0, max_r]`.
///
/// Returns `None` for a non-positive discriminant or a vanishing `a`.
pub fn lowest_root(a: f32, b: f32, c: f32, max_r: f32) -> Option<f32> {
    let determinant = b * b - 4.0 * a * c;
    if determinant <= 0.0 || a.abs() < QUADRATIC_EPSILON {
        return None;
    }

    let sqrt_d = determinant.sqrt();
    let mut r1 = (-b - sqrt_d) / (2.0 * a);
    let mut r2 = (-b + sqrt_d) / (2.0 * a);
    if r1 > r2 {
        std::mem::swap(&mut r1, &mut r2);
    }

    if r1 > 0.0 && r1 <= max_r {
        return Some(r1);
    }
    if r2 > 0.0 && r2 <= max_r {
        return Some(r2);
    }
    None
}

/// Same-side test: `point` lies inside triangle `(pa, pb, pc)` with plane normal `n`.
fn point_in_triangle(point: Vec3, pa: Vec3, pb: Vec3, pc: Vec3, n: Vec3) -> bool {
    let d1 = (pa - point).cross(pb - point).dot(n);
    let d2 = (pb - point).cross(pc - point).dot(n);
    let d3 = (pc - point).cross(pa - point).dot(n);
    (d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0) || (d1 <= 0.0 && d2 <= 0.0 && d3 <= 0.0)
}

#[derive(Debug, Clone)]
pub struct Collider {
    radius: Vec3,
    retry: u32,

    velocity: Vec3,
    normalized_velocity: Vec3,
    base_point: Vec3,
    base_point_world: Vec3,
    velocity_world: Vec3,
    velocity_world_length: f32,
    epsilon: f32,

    collision_found: bool,
    nearest_distance: f32,
    intersection_point: Vec3,
    /// Entity whose geometry is being submitted right now
    candidate: Option<EntityKey>,
    /// Entity that produced the nearest contact
    collided_entity: Option<EntityKey>,
}

impl Collider {
    /// Collider for an ellipsoid with per-axis `radius`.
    pub fn new(radius: Vec3) -> Self {
        Self {
            radius,
            retry: 0,
            velocity: Vec3::ZERO,
            normalized_velocity: Vec3::ZERO,
            base_point: Vec3::ZERO,
            base_point_world: Vec3::ZERO,
            velocity_world: Vec3::ZERO,
            velocity_world_length: 0.0,
            epsilon: 0.0,
            collision_found: false,
            nearest_distance: f32::INFINITY,
            intersection_point: Vec3::ZERO,
            candidate: None,
            collided_entity: None,
        }
    }

    // ===== GETTERS =====

    pub fn radius(&self) -> Vec3 {
        self.radius
    }

    /// Slide iterations used by the last resolution.
    pub fn retry(&self) -> u32 {
        self.retry
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn base_point(&self) -> Vec3 {
        self.base_point
    }

    pub fn base_point_world(&self) -> Vec3 {
        self.base_point_world
    }

    pub fn velocity_world(&self) -> Vec3 {
        self.velocity_world
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn collision_found(&self) -> bool {
        self.collision_found
    }

    /// Distance travelled (ellipsoid space) before the nearest contact.
    pub fn nearest_distance(&self) -> f32 {
        self.nearest_distance
    }

    pub fn intersection_point(&self) -> Vec3 {
        self.intersection_point
    }

    /// Entity that produced the most recent contact of the current resolution.
    pub fn collided_entity(&self) -> Option<EntityKey> {
        self.collided_entity
    }

    // ===== SETTERS =====

    pub fn set_radius(&mut self, radius: Vec3) {
        self.radius = radius;
    }

    pub(crate) fn set_retry(&mut self, retry: u32) {
        self.retry = retry;
    }

    /// Tag the contacts of following submissions with `key`.
    pub(crate) fn set_candidate(&mut self, key: Option<EntityKey>) {
        self.candidate = key;
    }

    // ===== SWEEP =====

    /// Reset for a sweep from `source` along `dir` (both ellipsoid space).
    pub fn initialize(&mut self, source: Vec3, dir: Vec3, epsilon: f32) {
        self.velocity = dir;
        self.normalized_velocity = dir.normalize_or_zero();
        self.base_point = source;

        self.base_point_world = source * self.radius;
        self.velocity_world = dir * self.radius;
        self.velocity_world_length = self.velocity_world.length();

        self.epsilon = epsilon;
        self.collision_found = false;
        self.nearest_distance = f32::INFINITY;
        self.candidate = None;
    }

    /// Clear the results of a previous resolution.
    pub(crate) fn begin_resolution(&mut self) {
        self.retry = 0;
        self.collided_entity = None;
    }

    /// Broad phase: can the swept ellipsoid reach this volume at all?
    pub fn can_do_collision(
        &self,
        sphere_center: Vec3,
        sphere_radius: f32,
        box_min: Vec3,
        box_max: Vec3,
    ) -> bool {
        let max_radius = self.radius.x.max(self.radius.y);
        let reach = self.velocity_world_length + max_radius;

        if self.base_point_world.distance(sphere_center) > reach + sphere_radius {
            return false;
        }

        let sweep_min = self.base_point_world - reach;
        let sweep_max = self.base_point_world + reach;
        box_min.cmple(sweep_max).all() && box_max.cmpge(sweep_min).all()
    }

    /// Submit an indexed triangle list.
    ///
    /// `positions` must already be in ellipsoid space and start at vertex
    /// `vertex_start` of the mesh, so each index is rebased by it. Triangles
    /// referencing missing vertices are skipped, as are trailing indices
    /// that do not form a whole triangle.
    pub fn collide(
        &mut self,
        positions: &[Vec3],
        indices: &[u32],
        index_range: Range<usize>,
        vertex_start: usize,
        winding: Winding,
        double_sided: bool,
    ) {
        let Some(triangles) = indices.get(index_range.clone()) else {
            engine_trace!("galaxy3d::Collider",
                "index range {:?} outside {} indices, nothing submitted", index_range, indices.len());
            return;
        };

        let chunks = triangles.chunks_exact(3);
        if !chunks.remainder().is_empty() {
            engine_trace!("galaxy3d::Collider",
                "ignoring {} trailing indices of range {:?}", chunks.remainder().len(), index_range);
        }

        for triangle in chunks {
            let vertex = |i: u32| {
                (i as usize)
                    .checked_sub(vertex_start)
                    .and_then(|local| positions.get(local))
                    .copied()
            };
            match (vertex(triangle[0]), vertex(triangle[1]), vertex(triangle[2])) {
                (Some(p1), Some(p2), Some(p3)) => match winding {
                    Winding::CounterClockwise => self.test_triangle(p1, p2, p3, double_sided),
                    Winding::Clockwise => self.test_triangle(p1, p3, p2, double_sided),
                },
                _ => engine_trace!("galaxy3d::Collider",
                    "skipping triangle {:?}: vertices {}..{} available",
                    triangle, vertex_start, vertex_start + positions.len()),
            }
        }
    }

    /// Sweep the unit sphere against one triangle and keep the contact if nearest.
    pub fn test_triangle(&mut self, p1: Vec3, p2: Vec3, p3: Vec3, double_sided: bool) {
        let mut plane = CollisionPlane::from_points(p1, p2, p3);
        if plane.is_degenerate() {
            return;
        }
        if double_sided && plane.signed_distance_to(self.base_point) < 0.0 {
            plane = plane.flipped();
        }
        if !plane.is_front_facing_to(self.normalized_velocity, 0.0) {
            return;
        }

        let normal = plane.normal();
        let signed_dist = plane.signed_distance_to(self.base_point);
        let normal_dot_velocity = normal.dot(self.velocity);

        let mut t0;
        let mut embedded_in_plane = false;

        if normal_dot_velocity.abs() <= PARALLEL_THRESHOLD {
            if signed_dist.abs() >= 1.0 {
                return;
            }
            embedded_in_plane = true;
            t0 = 0.0;
        } else {
            t0 = (-1.0 - signed_dist) / normal_dot_velocity;
            let mut t1 = (1.0 - signed_dist) / normal_dot_velocity;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > 1.0 || t1 < 0.0 {
                return;
            }
            t0 = t0.clamp(0.0, 1.0);
        }

        let mut found = false;
        let mut t = 1.0_f32;
        let mut contact = Vec3::ZERO;

        if !embedded_in_plane {
            let plane_intersection = self.base_point - normal + self.velocity * t0;
            if point_in_triangle(plane_intersection, p1, p2, p3, normal) {
                found = true;
                t = t0;
                contact = plane_intersection;
            }
        }

        if !found {
            let velocity = self.velocity;
            let base = self.base_point;
            let velocity_sq = velocity.length_squared();

            // Vertices
            for p in [p1, p2, p3] {
                let b = 2.0 * velocity.dot(base - p);
                let c = (p - base).length_squared() - 1.0;
                if let Some(root) = lowest_root(velocity_sq, b, c, t) {
                    t = root;
                    found = true;
                    contact = p;
                }
            }

            // Edges
            for (start, end) in [(p1, p2), (p2, p3), (p3, p1)] {
                let edge = end - start;
                let base_to_vertex = start - base;
                let edge_sq = edge.length_squared();
                let edge_dot_velocity = edge.dot(velocity);
                let edge_dot_base = edge.dot(base_to_vertex);

                let a = edge_sq * -velocity_sq + edge_dot_velocity * edge_dot_velocity;
                let b = edge_sq * (2.0 * velocity.dot(base_to_vertex))
                    - 2.0 * edge_dot_velocity * edge_dot_base;
                let c = edge_sq * (1.0 - base_to_vertex.length_squared())
                    + edge_dot_base * edge_dot_base;

                if let Some(root) = lowest_root(a, b, c, t) {
                    let f = (edge_dot_velocity * root - edge_dot_base) / edge_sq;
                    if (0.0..=1.0).contains(&f) {
                        t = root;
                        found = true;
                        contact = start + edge * f;
                    }
                }
            }
        }

        if !found {
            return;
        }

        let distance = t * self.velocity.length();
        let nearer = !self.collision_found
            || distance < self.nearest_distance
            || (distance == self.nearest_distance
                && contact.to_array() < self.intersection_point.to_array());

        if nearer {
            self.nearest_distance = distance;
            self.intersection_point = contact;
            self.collision_found = true;
            self.collided_entity = self.candidate;
        }
    }

    /// Slide response for the nearest contact.
    ///
    /// Moves to the contact, backs off by `epsilon`, and projects what is
    /// left of the requested destination onto the sliding plane. Returns
    /// `(new_position, new_velocity)` in ellipsoid space.
    pub fn get_response(&self, position: Vec3, velocity: Vec3) -> (Vec3, Vec3) {
        let destination = position + velocity;
        let travel = velocity.normalize_or_zero() * self.nearest_distance;

        let mut new_position = position + travel;
        let mut intersection_point = self.intersection_point;

        let slide_normal = (new_position - intersection_point).normalize_or_zero();
        let displacement = slide_normal * self.epsilon;
        new_position += displacement;
        intersection_point += displacement;

        let slide_plane = CollisionPlane::new(intersection_point, slide_normal);
        let new_destination = destination - slide_normal * slide_plane.signed_distance_to(destination);

        (new_position, new_destination - intersection_point)
    }
}

#[cfg(test)]
#[path = "collider_tests.rs"]
mod tests;
