//! Scene module: collidable entities, culling, and movement.
//!
//! A `Scene` owns entities behind stable keys. Cullers turn a camera into
//! the frame's visible set; a `MovementController` moves through the scene
//! with collision response.

mod controller;
mod culler;
mod entity;
mod mesh_entity;
mod scene;

pub use controller::MovementController;
pub use culler::{CameraCuller, BruteForceCuller, FrustumCuller};
pub use entity::{Collidable, EntityFlags, EntityKey};
pub use mesh_entity::{MeshEntity, SubMesh};
pub use scene::Scene;
