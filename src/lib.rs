//! Contact Geom – narrow-phase collision detection for rigid primitives.
//!
//! Given two planes, spheres, circles or oriented boxes, the routines in
//! [`collision`] decide whether they intersect and, if so, build a contact
//! manifold: world-space contact points for each body, one contact normal per
//! body and a penetration depth per point. All functions are pure and
//! allocation free; batches of pairs can be processed in parallel through
//! [`NarrowPhase::collide_pairs`].

pub mod collision;
pub mod config;
pub mod core;
pub mod utils;

pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

pub use collision::{
    box_to_box, box_to_plane, circle_to_circle, sphere_to_box, sphere_to_plane, sphere_to_sphere,
    CircleContact, ContactManifold, ContactPoint, NarrowPhase, PlaneHull, PointContact, Polygon,
    RayHit, RayQuery, Raycast, SplitResult,
};
pub use config::{AxisSelection, CollisionConfig};
pub use core::{AxisAlignedBox, Circle, CollisionShape, OrientedBox, Plane, PlaneSide, Sphere};
