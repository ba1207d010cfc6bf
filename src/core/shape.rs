use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{boxes::OrientedBox, plane::Plane, sphere::Sphere};

/// Enumeration of the primitives the narrow phase can pair up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionShape {
    Plane(Plane),
    Sphere(Sphere),
    Box(OrientedBox),
}

impl CollisionShape {
    /// Extent of the shape projected on `axis`. Planes are unbounded.
    pub fn projection_interval(&self, axis: Vec3) -> (f32, f32) {
        match self {
            CollisionShape::Plane(_) => (f32::NEG_INFINITY, f32::INFINITY),
            CollisionShape::Sphere(sphere) => sphere.projection_interval(axis),
            CollisionShape::Box(obb) => obb.projection_interval(axis),
        }
    }

    /// Infinite shapes are skipped by interval-based culling.
    pub fn is_infinite(&self) -> bool {
        matches!(self, CollisionShape::Plane(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            CollisionShape::Plane(_) => "plane",
            CollisionShape::Sphere(_) => "sphere",
            CollisionShape::Box(_) => "box",
        }
    }
}

impl From<Plane> for CollisionShape {
    fn from(plane: Plane) -> Self {
        CollisionShape::Plane(plane)
    }
}

impl From<Sphere> for CollisionShape {
    fn from(sphere: Sphere) -> Self {
        CollisionShape::Sphere(sphere)
    }
}

impl From<OrientedBox> for CollisionShape {
    fn from(obb: OrientedBox) -> Self {
        CollisionShape::Box(obb)
    }
}
