/// Camera: view and projection used to cull a scene.
///
/// The Camera stores matrices supplied by the caller and keeps the
/// matching frustum in sync. It does not move itself: whatever drives
/// it (typically a `MovementController`) computes the view matrix.

use glam::{Mat4, Vec3};
use super::frustum::Frustum;

/// View/projection pair plus the frustum derived from them.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
}

impl Camera {
    /// Create a camera. The frustum is extracted from `projection * view`.
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            frustum: Frustum::from_view_projection(&(projection * view)),
        }
    }

    /// Right-handed perspective camera at `eye` looking at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::new(
            Mat4::look_at_rh(eye, target, Vec3::Y),
            Mat4::perspective_rh(fov_y, aspect, near, far),
        )
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Frustum planes for culling.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.view_matrix.inverse().w_axis.truncate()
    }

    // ===== SETTERS =====

    /// Set the view matrix and refresh the frustum.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
        self.refresh_frustum();
    }

    /// Set the projection matrix and refresh the frustum.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
        self.refresh_frustum();
    }

    /// Override the frustum. Replaced again on the next matrix change.
    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
    }

    fn refresh_frustum(&mut self) {
        self.frustum = Frustum::from_view_projection(&self.view_projection_matrix());
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
