/// Collision resolver: bounded slide loop against a scene.
///
/// Each iteration sweeps the collider through every collidable entity,
/// stops on free motion, otherwise slides along the nearest contact and
/// tries again with what is left of the velocity.

use glam::Vec3;
use crate::scene::Scene;
use crate::{engine_trace, engine_warn};
use super::collider::Collider;

/// Resolve a move of an ellipsoid through `scene`.
///
/// `position` and `velocity` are in world space; the ellipsoid shape is
/// `collider.radius()`. Returns the corrected world position. At most
/// `max_retry` slide iterations run; when they are used up the current
/// position is accepted as is.
pub fn get_new_position(
    scene: &Scene,
    position: Vec3,
    velocity: Vec3,
    collider: &mut Collider,
    max_retry: u32,
) -> Vec3 {
    collider.begin_resolution();

    let radius = collider.radius();
    if radius.cmple(Vec3::ZERO).any() || !radius.is_finite() {
        engine_warn!("galaxy3d::Resolver",
            "ellipsoid radius {} is not positive, moving without collisions", radius);
        return position + velocity;
    }

    let close_distance = scene.config().close_distance();
    let mut position = position / radius;
    let mut velocity = velocity / radius;
    let mut retry = 0;

    loop {
        if retry >= max_retry {
            engine_trace!("galaxy3d::Resolver", "retry budget ({}) exhausted", max_retry);
            break;
        }

        collider.initialize(position, velocity, close_distance);

        for (key, entity) in scene.entities() {
            if entity.is_enabled() && entity.checks_collisions() {
                collider.set_candidate(Some(key));
                entity.check_collision(collider);
            }
        }
        collider.set_candidate(None);

        if !collider.collision_found() {
            position += velocity;
            break;
        }

        if velocity != Vec3::ZERO {
            (position, velocity) = collider.get_response(position, velocity);
        }

        if velocity.length() <= close_distance {
            break;
        }

        retry += 1;
        collider.set_retry(retry);
    }

    position * radius
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
