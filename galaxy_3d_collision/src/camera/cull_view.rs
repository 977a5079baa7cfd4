/// CullView: result of camera culling.
///
/// Created by a `CameraCuller`. Contains a snapshot of the camera
/// at culling time and the keys of the entities that survived.
///
/// Ephemeral: lives for one frame.

use crate::scene::EntityKey;
use super::camera::Camera;

/// Result of camera culling. Lives for one frame.
#[derive(Debug, Clone)]
pub struct CullView {
    camera: Camera,
    visible_entities: Vec<EntityKey>,
}

impl CullView {
    /// Create a new CullView (crate-internal: only cullers create these).
    pub(crate) fn new(camera: Camera, visible_entities: Vec<EntityKey>) -> Self {
        Self {
            camera,
            visible_entities,
        }
    }

    /// Camera snapshot at the time of culling.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Keys of visible entities in the Scene.
    pub fn visible_entities(&self) -> &[EntityKey] {
        &self.visible_entities
    }

    /// Number of visible entities.
    pub fn visible_count(&self) -> usize {
        self.visible_entities.len()
    }

    /// True if `key` survived culling.
    pub fn is_visible(&self, key: EntityKey) -> bool {
        self.visible_entities.contains(&key)
    }
}

#[cfg(test)]
#[path = "cull_view_tests.rs"]
mod tests;
