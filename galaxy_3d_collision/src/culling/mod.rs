//! Bounding volumes shared by frustum culling and collision broad phase.
//!
//! Every entity (and every sub-mesh) owns one `BoundingInfo`, which pairs a
//! sphere with an oriented box built from the same vertex range. Both are
//! refreshed together when the owner's world matrix changes.

mod bounding_box;
mod bounding_info;
mod bounding_sphere;

pub use bounding_box::BoundingBox;
pub use bounding_info::BoundingInfo;
pub use bounding_sphere::BoundingSphere;
