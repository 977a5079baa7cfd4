/*!
# Galaxy 3D Collision

Swept-ellipsoid collision, sliding response, and bounding-volume culling
for the Galaxy 3D engine.

## Architecture

- **BoundingInfo**: sphere + oriented box per entity and per sub-mesh, shared
  by frustum culling and the collision broad phase
- **Collider**: swept unit sphere against triangles, nearest-contact tracking,
  sliding response
- **get_new_position**: bounded slide loop of a collider through a scene
- **Scene**: slot map of `Collidable` entities with deferred transform refresh
- **CameraCuller**: frustum culling strategies producing a `CullView`
- **MovementController**: collision-aware mover with opt-in gravity

All geometry uses `glam` types, re-exported at the crate root.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod camera;
pub mod culling;
pub mod collision;
pub mod scene;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logging facade)
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::{CollisionConfig, COLLISIONS_EPSILON, DEFAULT_MAX_RETRY};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Bounding volumes sub-module
    pub mod culling {
        pub use crate::culling::*;
    }

    // Collision sub-module
    pub mod collision {
        pub use crate::collision::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
