use glam::{Mat4, Vec3};
use crate::camera::Frustum;
use crate::collision::Collider;
use crate::error::Error;
use super::*;

/// Two quads side by side on y = 0: x in [0, 1] and x in [10, 11].
fn two_quads() -> (Vec<Vec3>, Vec<u32>) {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 1.0),
        Vec3::new(11.0, 0.0, 1.0),
        Vec3::new(11.0, 0.0, 0.0),
    ];
    let indices = vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7];
    (positions, indices)
}

fn quads_mesh() -> MeshEntity {
    let (positions, indices) = two_quads();
    MeshEntity::new("quads", positions, indices).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_single_submesh() {
    let mesh = quads_mesh();

    assert_eq!(mesh.name(), "quads");
    assert_eq!(mesh.triangle_count(), 4);
    assert_eq!(mesh.submeshes().len(), 1);
    assert_eq!(mesh.submeshes()[0].vertex_range(), 0..8);
    assert_eq!(mesh.submeshes()[0].index_range(), 0..12);
    assert_eq!(mesh.flags(), EntityFlags::ENABLED | EntityFlags::VISIBLE);
    assert_eq!(*mesh.world_matrix(), Mat4::IDENTITY);
    assert_eq!(mesh.bounding_info().bounding_box().maximum(), Vec3::new(11.0, 0.0, 1.0));
}

#[test]
fn test_new_rejects_partial_triangle() {
    let (positions, _) = two_quads();
    let result = MeshEntity::new("bad", positions, vec![0, 1]);
    assert!(matches!(result, Err(Error::InvalidGeometry(_))));
}

#[test]
fn test_new_rejects_missing_vertex() {
    let (positions, _) = two_quads();
    let result = MeshEntity::new("bad", positions, vec![0, 1, 8]);
    assert!(matches!(result, Err(Error::InvalidGeometry(_))));
}

#[test]
fn test_new_rejects_empty_positions() {
    let result = MeshEntity::new("empty", Vec::new(), Vec::new());
    assert!(matches!(result, Err(Error::InvalidGeometry(_))));
}

#[test]
fn test_from_raw_positions() {
    let raw = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0];
    let mesh = MeshEntity::from_raw_positions("raw", &raw, vec![0, 1, 2]).unwrap();

    assert_eq!(mesh.positions(), &[Vec3::ZERO, Vec3::Z, Vec3::X]);
}

#[test]
fn test_from_raw_positions_rejects_ragged_buffer() {
    let raw = [0.0, 0.0, 0.0, 1.0];
    let result = MeshEntity::from_raw_positions("raw", &raw, Vec::new());
    assert!(matches!(result, Err(Error::InvalidGeometry(_))));
}

// ============================================================================
// Sub-meshes
// ============================================================================

#[test]
fn test_subdivide() {
    let mut mesh = quads_mesh();
    mesh.subdivide(2).unwrap();

    let submeshes = mesh.submeshes();
    assert_eq!(submeshes.len(), 2);
    assert_eq!(submeshes[0].index_range(), 0..6);
    assert_eq!(submeshes[0].vertex_range(), 0..4);
    assert_eq!(submeshes[1].index_range(), 6..12);
    assert_eq!(submeshes[1].vertex_range(), 4..8);
    assert_eq!(submeshes[1].bounding_info().bounding_box().minimum(), Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn test_subdivide_remainder_goes_last() {
    let mut mesh = quads_mesh();
    mesh.subdivide(3).unwrap();

    let ranges: Vec<_> = mesh.submeshes().iter().map(|s| s.index_range()).collect();
    assert_eq!(ranges, vec![0..3, 3..6, 6..12]);
}

#[test]
fn test_subdivide_rejects_bad_counts() {
    let mut mesh = quads_mesh();
    assert!(mesh.subdivide(0).is_err());
    assert!(mesh.subdivide(5).is_err());
    assert_eq!(mesh.submeshes().len(), 1);
}

// ============================================================================
// Transforms and queries
// ============================================================================

#[test]
fn test_update_bounds_follows_world_matrix() {
    let mut mesh = quads_mesh();
    mesh.subdivide(2).unwrap();
    mesh.set_world_matrix(Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0)));

    // Deferred until update_bounds
    assert_eq!(mesh.bounding_info().bounding_box().minimum_world().y, 0.0);

    mesh.update_bounds();
    assert_eq!(mesh.bounding_info().bounding_box().minimum_world().y, 5.0);
    assert_eq!(mesh.submeshes()[1].bounding_info().bounding_box().minimum_world().y, 5.0);
}

#[test]
fn test_intersects_point() {
    let mesh = quads_mesh().with_world_matrix(Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)));

    assert!(mesh.intersects_point(Vec3::new(5.0, 1.0, 0.5)));
    assert!(!mesh.intersects_point(Vec3::new(5.0, 0.0, 0.5)));
}

#[test]
fn test_intersects_mesh() {
    let a = quads_mesh();
    let b = quads_mesh().with_world_matrix(Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
    let c = quads_mesh().with_world_matrix(Mat4::from_translation(Vec3::new(0.0, 0.0, 50.0)));

    assert!(a.intersects_mesh(&b, true));
    assert!(!a.intersects_mesh(&c, false));
}

#[test]
fn test_frustum_uses_submeshes_when_split() {
    // Camera looking down at the gap between the two quads
    let frustum = Frustum::from_view_projection(&(
        Mat4::perspective_rh(0.2, 1.0, 0.1, 100.0)
            * Mat4::look_at_rh(Vec3::new(5.5, 10.0, 0.5), Vec3::new(5.5, 0.0, 0.5), Vec3::Z)
    ));

    let mut mesh = quads_mesh();
    assert!(mesh.is_in_frustum(&frustum));

    mesh.subdivide(2).unwrap();
    assert!(!mesh.is_in_frustum(&frustum));
}

// ============================================================================
// check_collision
// ============================================================================

#[test]
fn test_check_collision_submits_triangles() {
    let mesh = quads_mesh();
    let mut collider = Collider::new(Vec3::splat(0.5));
    // Ellipsoid space: world (0.5, 3, 0.5) / 0.5
    collider.initialize(Vec3::new(1.0, 6.0, 1.0), Vec3::new(0.0, -8.0, 0.0), 0.01);

    mesh.check_collision(&mut collider);

    assert!(collider.collision_found());
    assert!((collider.intersection_point() - Vec3::new(1.0, 0.0, 1.0)).length() < 1e-4);
}

#[test]
fn test_check_collision_rejected_by_bounds() {
    let mesh = quads_mesh().with_world_matrix(Mat4::from_translation(Vec3::new(0.0, -50.0, 0.0)));
    let mut collider = Collider::new(Vec3::splat(0.5));
    collider.initialize(Vec3::new(1.0, 6.0, 1.0), Vec3::new(0.0, -8.0, 0.0), 0.01);

    mesh.check_collision(&mut collider);
    assert!(!collider.collision_found());
}

#[test]
fn test_check_collision_skips_unreachable_submesh() {
    let mut mesh = quads_mesh();
    mesh.subdivide(2).unwrap();
    let mut collider = Collider::new(Vec3::splat(0.5));
    // Above the gap: whole-mesh bounds pass, neither quad is reachable
    collider.initialize(Vec3::new(11.0, 2.0, 1.0), Vec3::new(0.0, -2.0, 0.0), 0.01);

    mesh.check_collision(&mut collider);
    assert!(!collider.collision_found());
}

#[test]
fn test_double_sided_flag_collides_from_below() {
    let mut collider = Collider::new(Vec3::splat(0.5));

    let single = quads_mesh();
    collider.initialize(Vec3::new(1.0, -6.0, 1.0), Vec3::new(0.0, 8.0, 0.0), 0.01);
    single.check_collision(&mut collider);
    assert!(!collider.collision_found());

    let double = quads_mesh().with_flags(EntityFlags::default() | EntityFlags::DOUBLE_SIDED);
    collider.initialize(Vec3::new(1.0, -6.0, 1.0), Vec3::new(0.0, 8.0, 0.0), 0.01);
    double.check_collision(&mut collider);
    assert!(collider.collision_found());
}

#[test]
fn test_mirrored_mesh_keeps_solid_side() {
    // z mirrored: first quad now spans z in [-1, 0], still facing +Y
    let mirrored = quads_mesh().with_world_matrix(Mat4::from_scale(Vec3::new(1.0, 1.0, -1.0)));
    let mut collider = Collider::new(Vec3::splat(0.5));
    collider.initialize(Vec3::new(1.0, 6.0, -1.0), Vec3::new(0.0, -8.0, 0.0), 0.01);

    mirrored.check_collision(&mut collider);

    assert!(collider.collision_found());
    assert!((collider.intersection_point() - Vec3::new(1.0, 0.0, -1.0)).length() < 1e-4);
}

#[test]
fn test_mirrored_mesh_still_single_sided() {
    let mirrored = quads_mesh().with_world_matrix(Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
    let mut collider = Collider::new(Vec3::splat(0.5));
    collider.initialize(Vec3::new(-1.0, -6.0, 1.0), Vec3::new(0.0, 8.0, 0.0), 0.01);

    mirrored.check_collision(&mut collider);
    assert!(!collider.collision_found());
}

// ============================================================================
// Collider vertex cache
// ============================================================================

#[test]
fn test_only_reached_submesh_is_transformed() {
    let mut mesh = quads_mesh();
    mesh.subdivide(2).unwrap();
    let mut collider = Collider::new(Vec3::splat(0.5));
    // Above the first quad only
    collider.initialize(Vec3::new(1.0, 6.0, 1.0), Vec3::new(0.0, -8.0, 0.0), 0.01);

    mesh.check_collision(&mut collider);
    assert!(collider.collision_found());

    let first = mesh.submeshes()[0].collider_vertices.borrow();
    let first = first.as_ref().unwrap();
    assert_eq!(first.vertices.len(), 4);
    assert_eq!(first.transform, Mat4::from_scale(Vec3::splat(2.0)));
    assert!(mesh.submeshes()[1].collider_vertices.borrow().is_none());
}

#[test]
fn test_rebased_submesh_collides() {
    let mut mesh = quads_mesh();
    mesh.subdivide(2).unwrap();
    let mut collider = Collider::new(Vec3::splat(0.5));
    // Above the second quad (vertices 4..8)
    collider.initialize(Vec3::new(21.0, 6.0, 1.0), Vec3::new(0.0, -8.0, 0.0), 0.01);

    mesh.check_collision(&mut collider);

    assert!(collider.collision_found());
    assert!((collider.intersection_point() - Vec3::new(21.0, 0.0, 1.0)).length() < 1e-4);
    assert_eq!(mesh.submeshes()[1].collider_vertices.borrow().as_ref().unwrap().vertices.len(), 4);
}

#[test]
fn test_cache_follows_world_matrix_and_radius() {
    let mut mesh = quads_mesh();
    let mut collider = Collider::new(Vec3::splat(0.5));
    collider.initialize(Vec3::new(1.0, 6.0, 1.0), Vec3::new(0.0, -8.0, 0.0), 0.01);
    mesh.check_collision(&mut collider);

    // Same transform: cached vertices are reused unchanged
    collider.initialize(Vec3::new(1.0, 6.0, 1.0), Vec3::new(0.0, -8.0, 0.0), 0.01);
    mesh.check_collision(&mut collider);
    assert_eq!(
        mesh.submeshes()[0].collider_vertices.borrow().as_ref().unwrap().vertices[2],
        Vec3::new(2.0, 0.0, 2.0)
    );

    // New world matrix
    mesh.set_world_matrix(Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)));
    mesh.update_bounds();
    collider.initialize(Vec3::new(1.0, 6.0, 1.0), Vec3::new(0.0, -8.0, 0.0), 0.01);
    mesh.check_collision(&mut collider);
    assert_eq!(
        mesh.submeshes()[0].collider_vertices.borrow().as_ref().unwrap().vertices[2],
        Vec3::new(2.0, 2.0, 2.0)
    );

    // New radius
    collider.set_radius(Vec3::ONE);
    collider.initialize(Vec3::new(0.5, 3.0, 0.5), Vec3::new(0.0, -4.0, 0.0), 0.01);
    mesh.check_collision(&mut collider);
    let cached = mesh.submeshes()[0].collider_vertices.borrow();
    let cached = cached.as_ref().unwrap();
    assert_eq!(cached.transform, Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)));
    assert_eq!(cached.vertices[2], Vec3::new(1.0, 1.0, 1.0));
}
