/// Camera culling strategies.
///
/// A CameraCuller determines which entities are visible from a given
/// camera. Implementations range from brute-force (no frustum test) to
/// bounding-volume tests against the camera frustum.

use crate::camera::{Camera, CullView};
use super::entity::EntityKey;
use super::scene::Scene;

/// Strategy for determining visible entities from a camera.
///
/// Called once per frame. The returned CullView is ephemeral.
///
/// `&mut self` allows stateful implementations (e.g. caching)
/// to maintain state across frames.
pub trait CameraCuller: Send + Sync {
    /// Cull the scene against the camera and return visible entities.
    fn cull(&mut self, scene: &Scene, camera: &Camera) -> CullView;
}

/// Brute-force culler: returns every enabled, visible entity.
///
/// Suitable for small scenes or as a baseline for comparison.
#[derive(Debug, Default)]
pub struct BruteForceCuller;

impl BruteForceCuller {
    pub fn new() -> Self {
        Self
    }
}

impl CameraCuller for BruteForceCuller {
    fn cull(&mut self, scene: &Scene, camera: &Camera) -> CullView {
        let visible: Vec<EntityKey> = scene
            .entities()
            .filter(|(_, entity)| entity.is_enabled() && entity.is_visible())
            .map(|(key, _)| key)
            .collect();
        CullView::new(camera.clone(), visible)
    }
}

/// Frustum culler: tests entity bounds against the camera frustum.
///
/// Sphere first, then box, then sub-meshes for split meshes.
#[derive(Debug, Default)]
pub struct FrustumCuller {
    /// Enabled, visible entities the frustum rejected in the last cull
    last_culled: usize,
}

impl FrustumCuller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of enabled, visible entities the last `cull` found outside the frustum.
    ///
    /// Disabled or hidden entities are never candidates and are not counted.
    pub fn last_culled(&self) -> usize {
        self.last_culled
    }
}

impl CameraCuller for FrustumCuller {
    fn cull(&mut self, scene: &Scene, camera: &Camera) -> CullView {
        let visible = scene.evaluate_active_entities(camera.frustum());
        let candidates = scene
            .entities()
            .filter(|(_, entity)| entity.is_enabled() && entity.is_visible())
            .count();
        self.last_culled = candidates - visible.len();
        CullView::new(camera.clone(), visible)
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
