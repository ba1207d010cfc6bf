//! Core geometric primitives consumed by the narrow phase.

pub mod boxes;
pub mod plane;
pub mod shape;
pub mod sphere;

pub use boxes::{AxisAlignedBox, OrientedBox};
pub use plane::{Plane, PlaneSide};
pub use shape::CollisionShape;
pub use sphere::{Circle, Sphere};
