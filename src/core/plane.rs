use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::utils::math::complementary_basis;

/// Where a point or a volume lies relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneSide {
    Front,
    Back,
    OnPlane,
    /// Only produced for volumes with points on both sides.
    Straddling,
}

/// Oriented half-space `dot(normal, x) + offset = 0`.
///
/// The normal is expected to be unit length. Constructors that derive it
/// (`from_points`, `from_point_normal`) normalize; [`Plane::new`] trusts the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub offset: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::X,
            offset: 0.0,
        }
    }
}

impl Plane {
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self { normal, offset }
    }

    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let n = normal.normalize_or_zero();
        Self {
            normal: n,
            offset: -n.dot(point),
        }
    }

    /// Plane through three points, normal along `(b - a) x (c - a)`.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self::from_point_normal(a, (b - a).cross(c - a))
    }

    pub fn from_equation(equation: Vec4) -> Self {
        Self {
            normal: equation.truncate(),
            offset: equation.w,
        }
    }

    pub fn equation(&self) -> Vec4 {
        self.normal.extend(self.offset)
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }

    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.signed_distance(point).abs()
    }

    /// Front/back/on-plane classification with a symmetric `epsilon` band.
    pub fn classify_point(&self, point: Vec3, epsilon: f32) -> PlaneSide {
        let d = self.signed_distance(point);
        if d > epsilon {
            PlaneSide::Front
        } else if d < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Nearest point on the plane.
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.signed_distance(point)
    }

    /// Foot of the perpendicular from the origin.
    pub fn point_on_plane(&self) -> Vec3 {
        let len_sq = self.normal.length_squared();
        if len_sq <= f32::EPSILON {
            return Vec3::ZERO;
        }
        -self.offset * self.normal / len_sq
    }

    /// Two unit vectors spanning the plane.
    pub fn basis(&self) -> (Vec3, Vec3) {
        complementary_basis(self.normal)
    }

    /// Same half-space boundary, opposite orientation.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Reflection across the plane as a homogeneous matrix.
    pub fn reflection_matrix(&self) -> Mat4 {
        let n = self.normal;
        let d = self.offset;
        Mat4::from_cols(
            Vec4::new(1.0 - 2.0 * n.x * n.x, -2.0 * n.y * n.x, -2.0 * n.z * n.x, 0.0),
            Vec4::new(-2.0 * n.x * n.y, 1.0 - 2.0 * n.y * n.y, -2.0 * n.z * n.y, 0.0),
            Vec4::new(-2.0 * n.x * n.z, -2.0 * n.y * n.z, 1.0 - 2.0 * n.z * n.z, 0.0),
            Vec4::new(-2.0 * n.x * d, -2.0 * n.y * d, -2.0 * n.z * d, 1.0),
        )
    }

    /// Component-wise comparison of the plane equations.
    pub fn abs_diff_eq(&self, other: &Plane, epsilon: f32) -> bool {
        self.equation().abs_diff_eq(other.equation(), epsilon)
    }
}
