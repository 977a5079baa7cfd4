/// MovementController: collision-aware mover for cameras and characters.
///
/// Holds a position (the eye, at the top of the ellipsoid), an orientation,
/// and the collider used to resolve moves against a scene. Collision
/// resolution runs from the feet: the position minus the ellipsoid's
/// vertical radius.

use glam::{Mat4, Quat, Vec3};
use crate::collision::{Collider, get_new_position};
use crate::config::DEFAULT_MAX_RETRY;
use super::scene::Scene;

pub struct MovementController {
    position: Vec3,
    /// Pitch (x) and yaw (y) in radians
    rotation: Vec3,
    ellipsoid: Vec3,
    check_collisions: bool,
    apply_gravity: bool,
    max_retry: u32,
    need_move_for_gravity: bool,
    collider: Collider,
}

impl MovementController {
    pub fn new(position: Vec3) -> Self {
        let ellipsoid = Vec3::new(0.5, 1.0, 0.5);
        Self {
            position,
            rotation: Vec3::ZERO,
            ellipsoid,
            check_collisions: false,
            apply_gravity: false,
            max_retry: DEFAULT_MAX_RETRY,
            need_move_for_gravity: true,
            collider: Collider::new(ellipsoid),
        }
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn ellipsoid(&self) -> Vec3 {
        self.ellipsoid
    }

    pub fn check_collisions(&self) -> bool {
        self.check_collisions
    }

    pub fn apply_gravity(&self) -> bool {
        self.apply_gravity
    }

    pub fn max_retry(&self) -> u32 {
        self.max_retry
    }

    /// False once gravity stopped moving the controller (it is resting).
    pub fn need_move_for_gravity(&self) -> bool {
        self.need_move_for_gravity
    }

    /// Collider state of the last resolution.
    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.need_move_for_gravity = true;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn set_ellipsoid(&mut self, ellipsoid: Vec3) {
        self.ellipsoid = ellipsoid;
        self.collider.set_radius(ellipsoid);
    }

    pub fn set_check_collisions(&mut self, enabled: bool) {
        self.check_collisions = enabled;
    }

    pub fn set_apply_gravity(&mut self, enabled: bool) {
        self.apply_gravity = enabled;
        self.need_move_for_gravity = true;
    }

    pub fn set_max_retry(&mut self, max_retry: u32) {
        self.max_retry = max_retry;
    }

    // ===== ORIENTATION =====

    fn orientation(&self) -> Quat {
        Quat::from_euler(glam::EulerRot::YXZ, self.rotation.y, self.rotation.x, 0.0)
    }

    /// Convert a local move (x right, y up, z forward) to world space.
    pub fn local_to_world_direction(&self, local: Vec3) -> Vec3 {
        // Forward is -Z in a right-handed view
        self.orientation() * Vec3::new(local.x, local.y, -local.z)
    }

    /// View matrix looking along the current orientation.
    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.orientation() * Vec3::NEG_Z;
        Mat4::look_to_rh(self.position, forward, Vec3::Y)
    }

    // ===== MOVEMENT =====

    /// Per-frame update: move by `direction` unless there is nothing to do.
    ///
    /// Returns true if a move was attempted.
    pub fn update(&mut self, scene: &Scene, direction: Vec3) -> bool {
        let need_to_move = self.need_move_for_gravity || direction != Vec3::ZERO;
        if need_to_move {
            self.move_by(scene, direction);
        }
        need_to_move
    }

    /// Move by `direction` (world space), colliding with the scene if enabled.
    pub fn move_by(&mut self, scene: &Scene, direction: Vec3) {
        if !(self.check_collisions && scene.collisions_enabled()) {
            self.position += direction;
            return;
        }

        self.collide_with_world(scene, direction);

        if self.apply_gravity {
            let old_position = self.position;
            self.collide_with_world(scene, scene.gravity());
            self.need_move_for_gravity = old_position.distance(self.position) != 0.0;
        }
    }

    fn collide_with_world(&mut self, scene: &Scene, velocity: Vec3) {
        let feet = self.position - Vec3::new(0.0, self.ellipsoid.y, 0.0);
        self.collider.set_radius(self.ellipsoid);

        let new_position = get_new_position(scene, feet, velocity, &mut self.collider, self.max_retry);
        let displacement = new_position - feet;

        if displacement.length() > scene.config().epsilon {
            self.position += displacement;
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
