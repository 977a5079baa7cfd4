//! Camera module: camera, frustum, and cull view.
//!
//! Cameras are owned and driven by the caller. The scene only reads
//! their frustum when evaluating visible entities.

mod camera;
mod cull_view;
mod frustum;

pub use camera::Camera;
pub use cull_view::CullView;
pub use frustum::{
    Frustum, plane_dot_coordinate,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
