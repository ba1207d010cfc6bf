use arrayvec::ArrayVec;
use glam::{Vec2, Vec3};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::MAX_CONTACT_POINTS;

/// Single contact point as seen by each of the two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactPoint {
    pub on_first: Vec3,
    pub on_second: Vec3,
    pub penetration: f32,
}

impl ContactPoint {
    pub fn new(on_first: Vec3, on_second: Vec3, penetration: f32) -> Self {
        Self {
            on_first,
            on_second,
            penetration,
        }
    }

    /// Same world point on both bodies.
    pub fn shared(point: Vec3, penetration: f32) -> Self {
        Self::new(point, point, penetration)
    }

    /// Averaged contact location.
    pub fn midpoint(&self) -> Vec3 {
        (self.on_first + self.on_second) * 0.5
    }
}

/// Contact manifold for an intersecting pair: up to [`MAX_CONTACT_POINTS`]
/// points plus one contact normal per body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactManifold {
    pub normal_first: Vec3,
    pub normal_second: Vec3,
    points: ArrayVec<ContactPoint, MAX_CONTACT_POINTS>,
}

impl ContactManifold {
    pub fn new(normal_first: Vec3, normal_second: Vec3) -> Self {
        Self {
            normal_first,
            normal_second,
            points: ArrayVec::new(),
        }
    }

    /// Manifold holding one point, with `normal` for the first body and its
    /// negation for the second.
    pub fn from_point_contact(contact: &PointContact) -> Self {
        let mut manifold = Self::new(contact.normal, -contact.normal);
        manifold.push(ContactPoint::shared(contact.point, contact.depth));
        manifold
    }

    /// Appends a point. Returns `false` (and drops it) when the manifold is full.
    pub fn push(&mut self, point: ContactPoint) -> bool {
        if self.points.try_push(point).is_err() {
            warn!("contact manifold capacity ({MAX_CONTACT_POINTS}) exceeded, point dropped");
            return false;
        }
        true
    }

    pub fn points(&self) -> &[ContactPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Deepest penetration over all points, zero when empty.
    pub fn max_penetration(&self) -> f32 {
        self.points
            .iter()
            .map(|p| p.penetration)
            .fold(0.0, f32::max)
    }

    /// Exchanges the roles of the two bodies.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.normal_first, &mut self.normal_second);
        for point in self.points.iter_mut() {
            std::mem::swap(&mut point.on_first, &mut point.on_second);
        }
    }

    pub fn swapped(mut self) -> Self {
        self.swap();
        self
    }
}

/// Single-point result of the sphere/plane and sphere/sphere tests.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointContact {
    pub point: Vec3,
    pub normal: Vec3,
    pub depth: f32,
}

/// Planar counterpart of [`PointContact`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CircleContact {
    pub point: Vec2,
    pub normal: Vec2,
    pub depth: f32,
}
