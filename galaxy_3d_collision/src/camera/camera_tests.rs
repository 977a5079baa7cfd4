use glam::{Mat4, Vec3, Vec4};
use super::*;

fn create_test_camera() -> Camera {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
    Camera::new(view, proj)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_new() {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);

    let camera = Camera::new(view, proj);

    assert_eq!(*camera.view_matrix(), view);
    assert_eq!(*camera.projection_matrix(), proj);
    assert_eq!(*camera.frustum(), Frustum::from_view_projection(&(proj * view)));
}

#[test]
fn test_camera_looking_at_matches_new() {
    let camera = Camera::looking_at(
        Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO,
        std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0,
    );
    let reference = create_test_camera();

    assert_eq!(*camera.view_matrix(), *reference.view_matrix());
    assert_eq!(*camera.projection_matrix(), *reference.projection_matrix());
}

#[test]
fn test_camera_position() {
    let camera = create_test_camera();
    let position = camera.position();
    assert!((position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
}

// ============================================================================
// view_projection_matrix
// ============================================================================

#[test]
fn test_view_projection_matrix() {
    let camera = create_test_camera();
    let expected = *camera.projection_matrix() * *camera.view_matrix();
    assert_eq!(camera.view_projection_matrix(), expected);
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn test_set_view_refreshes_frustum() {
    let mut camera = create_test_camera();
    assert!(camera.frustum().contains_point(Vec3::ZERO));

    // Turn around: origin is now behind the camera
    camera.set_view(Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 10.0), Vec3::Y));
    assert!(!camera.frustum().contains_point(Vec3::ZERO));
}

#[test]
fn test_set_projection_refreshes_frustum() {
    let mut camera = create_test_camera();
    let before = *camera.frustum();

    camera.set_projection(Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 10.0));
    assert_ne!(*camera.frustum(), before);
    // Far plane moved closer
    assert!(!camera.frustum().contains_point(Vec3::new(0.0, 0.0, -20.0)));
}

#[test]
fn test_set_frustum_overrides() {
    let mut camera = create_test_camera();
    let custom = Frustum::from_planes([Vec4::new(0.0, 1.0, 0.0, 0.0); 6]);

    camera.set_frustum(custom);
    assert_eq!(*camera.frustum(), custom);
}
