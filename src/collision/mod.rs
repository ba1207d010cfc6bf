//! Narrow-phase collision: pairwise tests, box/box SAT, polygon clipping, contact manifolds, ray queries.

pub mod clipping;
pub mod contact;
pub mod narrowphase;
pub mod queries;
pub mod sat;

pub use clipping::{PlaneHull, Polygon, SplitFragments, SplitResult};
pub use contact::{CircleContact, ContactManifold, ContactPoint, PointContact};
pub use narrowphase::{
    box_to_plane, circle_to_circle, sphere_to_box, sphere_to_plane, sphere_to_sphere, NarrowPhase,
};
pub use queries::{RayHit, RayQuery, Raycast};
pub use sat::{box_to_box, select_contact_axis, AxisCandidate, SeparatingAxis};
