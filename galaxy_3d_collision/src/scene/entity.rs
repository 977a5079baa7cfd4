/// Entity types for the collision scene.
///
/// Anything the scene can cull or collide against implements `Collidable`.
/// The scene stores entities as `Box<dyn Collidable>` in a slot map and
/// hands out stable `EntityKey`s.

use bitflags::bitflags;
use glam::Mat4;
use slotmap::new_key_type;
use crate::camera::Frustum;
use crate::collision::Collider;
use crate::culling::BoundingInfo;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for an entity within a Scene.
    ///
    /// Keys remain valid even after other entities are removed.
    /// A key becomes invalid only when its own entity is removed.
    pub struct EntityKey;
}

// ===== FLAGS =====

bitflags! {
    /// Per-entity behavior switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EntityFlags: u32 {
        /// Takes part in culling and collisions at all
        const ENABLED          = 1 << 0;
        /// Returned by frustum evaluation
        const VISIBLE          = 1 << 1;
        /// Submitted to colliders during resolution
        const CHECK_COLLISIONS = 1 << 2;
        /// Back faces collide too
        const DOUBLE_SIDED     = 1 << 3;
    }
}

impl Default for EntityFlags {
    fn default() -> Self {
        EntityFlags::ENABLED | EntityFlags::VISIBLE
    }
}

// ===== COLLIDABLE =====

/// Something with bounds and, optionally, collision geometry.
pub trait Collidable {
    /// Display name, used in logs.
    fn name(&self) -> &str;

    fn flags(&self) -> EntityFlags;

    fn set_flags(&mut self, flags: EntityFlags);

    fn is_enabled(&self) -> bool {
        self.flags().contains(EntityFlags::ENABLED)
    }

    fn is_visible(&self) -> bool {
        self.flags().contains(EntityFlags::VISIBLE)
    }

    fn checks_collisions(&self) -> bool {
        self.flags().contains(EntityFlags::CHECK_COLLISIONS)
    }

    fn is_double_sided(&self) -> bool {
        self.flags().contains(EntityFlags::DOUBLE_SIDED)
    }

    /// Bounds of the whole entity, world fields current as of the last `update_bounds()`.
    fn bounding_info(&self) -> &BoundingInfo;

    fn world_matrix(&self) -> &Mat4;

    /// Store a new world matrix. Bounds are refreshed by `update_bounds()`.
    fn set_world_matrix(&mut self, matrix: Mat4);

    /// Recompute world-space bounds from the current world matrix.
    fn update_bounds(&mut self);

    fn is_in_frustum(&self, frustum: &Frustum) -> bool {
        self.bounding_info().is_in_frustum(frustum.planes())
    }

    /// Submit this entity's triangles to `collider` if its bounds can be reached.
    fn check_collision(&self, collider: &mut Collider);
}
