use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::boxes::{AxisAlignedBox, OrientedBox};
use crate::config::GEOMETRY_EPSILON;

/// Ball primitive in 3D.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sphere {
    pub origin: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Negative radii are clamped to zero.
    pub fn new(origin: Vec3, radius: f32) -> Self {
        Self {
            origin,
            radius: radius.max(0.0),
        }
    }

    /// Bounding sphere of a point cloud, circumscribing its axis-aligned bounds.
    pub fn from_points(points: &[Vec3]) -> Self {
        AxisAlignedBox::from_points(points).circumscribed_sphere()
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.origin.distance_squared(point) <= self.radius * self.radius
    }

    /// Parameters `(t1, t2)` where the line `p1 + t * (p2 - p1)` crosses the sphere,
    /// larger root first. `None` for a degenerate segment or a miss.
    pub fn intersect_line(&self, p1: Vec3, p2: Vec3) -> Option<(f32, f32)> {
        let line = p2 - p1;
        let a = line.length_squared();
        if a < GEOMETRY_EPSILON {
            return None;
        }

        let rel = p1 - self.origin;
        let b = 2.0 * line.dot(rel);
        let c = rel.length_squared() - self.radius * self.radius;

        let determinant = b * b - 4.0 * a * c;
        if determinant < 0.0 {
            return None;
        }

        let root = determinant.sqrt();
        Some(((-b + root) / (2.0 * a), (-b - root) / (2.0 * a)))
    }

    /// Smallest axis-aligned box containing the sphere.
    pub fn circumscribed_box(&self) -> OrientedBox {
        OrientedBox::axis_aligned(self.origin, Vec3::splat(self.radius))
    }

    /// Largest axis-aligned cube inside the sphere.
    pub fn inscribed_box(&self) -> OrientedBox {
        OrientedBox::axis_aligned(self.origin, Vec3::splat(self.radius / 3.0_f32.sqrt()))
    }

    pub fn projection_interval(&self, axis: Vec3) -> (f32, f32) {
        let center = axis.dot(self.origin);
        (center - self.radius, center + self.radius)
    }
}

/// Ball primitive in 2D.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub origin: Vec2,
    pub radius: f32,
}

impl Circle {
    /// Negative radii are clamped to zero.
    pub fn new(origin: Vec2, radius: f32) -> Self {
        Self {
            origin,
            radius: radius.max(0.0),
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}
