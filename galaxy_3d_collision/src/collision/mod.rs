//! Swept-ellipsoid collision and sliding response.
//!
//! Motion is resolved in ellipsoid space: positions and velocities are
//! divided by the ellipsoid radius so the mover becomes a unit sphere.
//! `Collider` holds the per-sweep state, `resolver::get_new_position` runs
//! the bounded slide loop against a `Scene`.

mod collider;
mod collision_plane;
mod resolver;

pub use collider::{Collider, Winding, lowest_root};
pub use collision_plane::CollisionPlane;
pub use resolver::get_new_position;
