/// Scene: a collection of collidable entities.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys.
/// World-matrix changes are deferred: `set_world_matrix` only records the
/// key, and `update_world_transforms` refreshes the bounds of every dirty
/// entity in one pass before the frame's queries run.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use crate::camera::Frustum;
use crate::config::CollisionConfig;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_trace};
use super::entity::{Collidable, EntityKey};

pub struct Scene {
    /// Entities stored in a slot map for O(1) insert/remove
    entities: SlotMap<EntityKey, Box<dyn Collidable>>,
    /// Entities whose world matrix changed since last update_world_transforms()
    dirty_transforms: FxHashSet<EntityKey>,
    config: CollisionConfig,
}

impl Scene {
    /// Create an empty scene.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `config` fails validation.
    pub fn new(config: CollisionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entities: SlotMap::with_key(),
            dirty_transforms: FxHashSet::default(),
            config,
        })
    }

    // ===== ENTITIES =====

    /// Add an entity. Its bounds are refreshed immediately.
    pub fn add_entity(&mut self, mut entity: Box<dyn Collidable>) -> EntityKey {
        entity.update_bounds();
        let name = entity.name().to_string();
        let key = self.entities.insert(entity);
        engine_debug!("galaxy3d::Scene", "added entity '{}' ({:?})", name, key);
        key
    }

    /// Remove an entity and return it. None if the key is invalid.
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Box<dyn Collidable>> {
        let entity = self.entities.remove(key)?;
        self.dirty_transforms.remove(&key);
        engine_debug!("galaxy3d::Scene", "removed entity '{}' ({:?})", entity.name(), key);
        Some(entity)
    }

    pub fn entity(&self, key: EntityKey) -> Option<&dyn Collidable> {
        self.entities.get(key).map(|entity| entity.as_ref())
    }

    /// Mutable access. World matrix changes made here must go through
    /// `set_world_matrix` to be picked up by `update_world_transforms`.
    pub fn entity_mut(&mut self, key: EntityKey) -> Option<&mut dyn Collidable> {
        match self.entities.get_mut(key) {
            Some(entity) => Some(entity.as_mut()),
            None => None,
        }
    }

    /// Iterate over all entities with their keys.
    pub fn entities(&self) -> impl Iterator<Item = (EntityKey, &dyn Collidable)> + '_ {
        self.entities.iter().map(|(key, entity)| (key, &**entity as &dyn Collidable))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // ===== TRANSFORMS =====

    /// Set the world matrix of an entity. Returns false if key is invalid.
    pub fn set_world_matrix(&mut self, key: EntityKey, matrix: Mat4) -> bool {
        if let Some(entity) = self.entities.get_mut(key) {
            entity.set_world_matrix(matrix);
            self.dirty_transforms.insert(key);
            true
        } else {
            false
        }
    }

    /// Keys of entities waiting for a bounds refresh.
    pub fn dirty_transforms(&self) -> &FxHashSet<EntityKey> {
        &self.dirty_transforms
    }

    /// Refresh the bounds of every dirty entity. Returns how many were updated.
    pub fn update_world_transforms(&mut self) -> usize {
        let dirty_keys = std::mem::take(&mut self.dirty_transforms);
        let mut updated = 0;
        for key in dirty_keys {
            if let Some(entity) = self.entities.get_mut(key) {
                entity.update_bounds();
                updated += 1;
            }
        }
        engine_trace!("galaxy3d::Scene", "refreshed bounds of {} entities", updated);
        updated
    }

    // ===== SETTINGS =====

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec3 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
    }

    pub fn collisions_enabled(&self) -> bool {
        self.config.collisions_enabled
    }

    pub fn set_collisions_enabled(&mut self, enabled: bool) {
        self.config.collisions_enabled = enabled;
    }

    // ===== QUERIES =====

    /// Keys of enabled, visible entities inside the frustum.
    pub fn evaluate_active_entities(&self, frustum: &Frustum) -> Vec<EntityKey> {
        let active: Vec<EntityKey> = self.entities
            .iter()
            .filter(|(_, entity)| entity.is_enabled() && entity.is_visible())
            .filter(|(_, entity)| entity.is_in_frustum(frustum))
            .map(|(key, _)| key)
            .collect();

        engine_trace!("galaxy3d::Scene", "{} of {} entities active", active.len(), self.entities.len());
        active
    }

    /// Enabled entities whose bounds overlap those of `key`.
    ///
    /// # Errors
    ///
    /// `InvalidEntity` if `key` is not a live entity of this scene.
    pub fn intersecting_entities(&self, key: EntityKey, precise: bool) -> Result<Vec<EntityKey>> {
        let Some(target) = self.entities.get(key) else {
            engine_bail!(InvalidEntity, "galaxy3d::Scene", "no entity with key {:?}", key);
        };

        Ok(self.entities
            .iter()
            .filter(|(other_key, other)| *other_key != key && other.is_enabled())
            .filter(|(_, other)| target.bounding_info().intersects(other.bounding_info(), precise))
            .map(|(other_key, _)| other_key)
            .collect())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            entities: SlotMap::with_key(),
            dirty_transforms: FxHashSet::default(),
            config: CollisionConfig::default(),
        }
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
