use glam::{Mat4, Quat, Vec3};
use crate::camera::Frustum;
use super::*;

fn unit_box() -> BoundingBox {
    BoundingBox::from_min_max(Vec3::ZERO, Vec3::ONE)
}

fn wide_frustum() -> Frustum {
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 500.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO, Vec3::Y);
    Frustum::from_view_projection(&(projection * view))
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_min_max() {
    let bbox = BoundingBox::from_min_max(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 4.0, 6.0));

    assert_eq!(bbox.center(), Vec3::new(1.0, 2.0, 4.0));
    assert_eq!(bbox.extents(), Vec3::new(2.0, 2.0, 2.0));
    assert_eq!(bbox.minimum_world(), bbox.minimum());
    assert_eq!(bbox.maximum_world(), bbox.maximum());
    assert_eq!(*bbox.directions(), [Vec3::X, Vec3::Y, Vec3::Z]);
}

#[test]
fn test_corners_are_distinct() {
    let bbox = unit_box();
    let corners = bbox.vectors();

    for i in 0..8 {
        for j in (i + 1)..8 {
            assert_ne!(corners[i], corners[j], "corners {} and {} coincide", i, j);
        }
        assert!(corners[i].cmpge(Vec3::ZERO).all() && corners[i].cmple(Vec3::ONE).all());
    }
}

// ============================================================================
// update
// ============================================================================

#[test]
fn test_update_translation() {
    let mut bbox = unit_box();
    bbox.update(&Mat4::from_translation(Vec3::new(10.0, 0.0, -5.0)));

    assert_eq!(bbox.minimum_world(), Vec3::new(10.0, 0.0, -5.0));
    assert_eq!(bbox.maximum_world(), Vec3::new(11.0, 1.0, -4.0));
    assert_eq!(bbox.center_world(), Vec3::new(10.5, 0.5, -4.5));
}

#[test]
fn test_update_rotation_envelope_encloses_corners() {
    let mut bbox = unit_box();
    let world = Mat4::from_rotation_translation(
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_4),
        Vec3::new(1.0, 2.0, 3.0),
    );
    bbox.update(&world);

    for corner in bbox.vectors_world() {
        assert!(corner.cmpge(bbox.minimum_world() - 1e-5).all());
        assert!(corner.cmple(bbox.maximum_world() + 1e-5).all());
    }
    // Rotated 45° around Z: the X extent grows to sqrt(2)
    let size = bbox.maximum_world() - bbox.minimum_world();
    assert!((size.x - 2.0_f32.sqrt()).abs() < 1e-5);
}

#[test]
fn test_update_directions_keep_scale() {
    let mut bbox = unit_box();
    bbox.update(&Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0)));

    assert_eq!(*bbox.directions(), [
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 3.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
    ]);
}

// ============================================================================
// Frustum
// ============================================================================

#[test]
fn test_is_in_frustum_for_any_pose_inside() {
    let frustum = wide_frustum();
    let poses = [
        Mat4::IDENTITY,
        Mat4::from_translation(Vec3::new(5.0, -3.0, 10.0)),
        Mat4::from_rotation_x(1.1),
        Mat4::from_scale_rotation_translation(Vec3::splat(3.0), Quat::from_rotation_y(2.0), Vec3::new(-4.0, 0.0, 0.0)),
    ];

    for world in poses {
        let mut bbox = unit_box();
        bbox.update(&world);
        assert!(bbox.is_in_frustum(&frustum.planes), "box should be visible for {:?}", world);
    }
}

#[test]
fn test_is_in_frustum_rejects_behind_camera() {
    let frustum = wide_frustum();
    let mut bbox = unit_box();
    bbox.update(&Mat4::from_translation(Vec3::new(0.0, 0.0, 150.0)));

    assert!(!bbox.is_in_frustum(&frustum.planes));
}

// ============================================================================
// Intersections
// ============================================================================

#[test]
fn test_intersects_point() {
    let bbox = unit_box();

    assert!(bbox.intersects_point(Vec3::splat(0.5)));
    assert!(bbox.intersects_point(Vec3::ONE));
    assert!(!bbox.intersects_point(Vec3::new(1.5, 0.5, 0.5)));
}

#[test]
fn test_box_intersects_box() {
    let a = unit_box();
    let mut b = BoundingBox::from_min_max(Vec3::splat(2.0), Vec3::splat(3.0));
    assert!(!a.intersects(&b));

    b.update(&Mat4::from_translation(Vec3::splat(-1.5)));
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn test_box_touching_faces_intersect() {
    let a = unit_box();
    let mut b = unit_box();
    b.update(&Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));

    assert!(a.intersects(&b));
}

#[test]
fn test_intersects_sphere() {
    let bbox = unit_box();

    assert!(bbox.intersects_sphere(Vec3::new(1.5, 0.5, 0.5), 0.6));
    assert!(!bbox.intersects_sphere(Vec3::new(1.5, 1.5, 0.5), 0.6));
    assert!(bbox.intersects_sphere(Vec3::splat(0.5), 0.01));
}
