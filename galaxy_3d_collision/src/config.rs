/// Collision configuration shared by a scene and everything resolving against it.

use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;

/// Base collision epsilon (world units).
pub const COLLISIONS_EPSILON: f32 = 0.001;

/// Default number of slide iterations per resolution.
pub const DEFAULT_MAX_RETRY: u32 = 3;

/// Scene-level collision configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionConfig {
    /// Base epsilon. Slide offsets and the convergence threshold are `10 * epsilon`.
    pub epsilon: f32,
    /// Maximum slide iterations per `get_new_position` call
    pub max_retry: u32,
    /// Gravity added by controllers that opt into it (units per step)
    pub gravity: Vec3,
    /// Master switch: when false, controllers move freely
    pub collisions_enabled: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            epsilon: COLLISIONS_EPSILON,
            max_retry: DEFAULT_MAX_RETRY,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            collisions_enabled: true,
        }
    }
}

impl CollisionConfig {
    /// Slide offset and "remaining velocity is negligible" threshold.
    pub fn close_distance(&self) -> f32 {
        self.epsilon * 10.0
    }

    /// Check that every field is usable by the resolver.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            engine_bail!(InvalidConfig, "galaxy3d::CollisionConfig",
                "epsilon must be finite and positive (got {})", self.epsilon);
        }
        if self.max_retry == 0 {
            engine_bail!(InvalidConfig, "galaxy3d::CollisionConfig",
                "max_retry must be at least 1");
        }
        if !self.gravity.is_finite() {
            engine_bail!(InvalidConfig, "galaxy3d::CollisionConfig",
                "gravity must be finite (got {})", self.gravity);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
