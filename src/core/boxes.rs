use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::{
    plane::{Plane, PlaneSide},
    sphere::Sphere,
};

/// Sign pattern of the eight corners: the upper loop (`+e2`) first, then the lower loop.
const CORNER_SIGNS: [[f32; 3]; 8] = [
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
];

/// Oriented box: center, three orthonormal axes and a half-extent along each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    pub center: Vec3,
    pub axes: [Vec3; 3],
    pub extents: Vec3,
}

impl Default for OrientedBox {
    fn default() -> Self {
        Self::axis_aligned(Vec3::ZERO, Vec3::ZERO)
    }
}

impl OrientedBox {
    /// Negative extents are clamped to zero.
    pub fn new(center: Vec3, axes: [Vec3; 3], extents: Vec3) -> Self {
        Self {
            center,
            axes,
            extents: extents.max(Vec3::ZERO),
        }
    }

    pub fn axis_aligned(center: Vec3, extents: Vec3) -> Self {
        Self::new(center, [Vec3::X, Vec3::Y, Vec3::Z], extents)
    }

    pub fn from_rotation(center: Vec3, rotation: Mat3, extents: Vec3) -> Self {
        Self::new(
            center,
            [rotation.x_axis, rotation.y_axis, rotation.z_axis],
            extents,
        )
    }

    /// Box with the rotation and translation of `transform`. Scale is stripped from the axes.
    pub fn from_transform(transform: &Mat4, extents: Vec3) -> Self {
        let axes = [
            transform.x_axis.truncate().normalize_or_zero(),
            transform.y_axis.truncate().normalize_or_zero(),
            transform.z_axis.truncate().normalize_or_zero(),
        ];
        Self::new(transform.w_axis.truncate(), axes, extents)
    }

    /// Rotates the axes and moves the center by `transform`.
    pub fn transformed(&self, transform: &Mat4) -> Self {
        let axes = self
            .axes
            .map(|axis| transform.transform_vector3(axis).normalize_or_zero());
        Self {
            center: transform.transform_point3(self.center),
            axes,
            extents: self.extents,
        }
    }

    pub fn rotation(&self) -> Mat3 {
        Mat3::from_cols(self.axes[0], self.axes[1], self.axes[2])
    }

    /// World point expressed in box coordinates.
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        let d = point - self.center;
        Vec3::new(d.dot(self.axes[0]), d.dot(self.axes[1]), d.dot(self.axes[2]))
    }

    /// Box coordinates mapped back to world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.center + self.axes[0] * local.x + self.axes[1] * local.y + self.axes[2] * local.z
    }

    pub fn corner_points(&self) -> [Vec3; 8] {
        CORNER_SIGNS.map(|s| self.to_world(Vec3::from_array(s) * self.extents))
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        let local = self.to_local(point).abs();
        local.cmple(self.extents).all()
    }

    /// Sphere through all eight corners.
    pub fn circumscribed_sphere(&self) -> Sphere {
        let diagonal =
            self.axes[0] * self.extents.x + self.axes[1] * self.extents.y + self.axes[2] * self.extents.z;
        Sphere::new(self.center, diagonal.length())
    }

    /// Sphere touching the nearest pair of faces.
    pub fn inscribed_sphere(&self) -> Sphere {
        Sphere::new(self.center, self.extents.min_element())
    }

    /// Half-width of the box projected onto `axis`.
    #[inline]
    pub fn projected_radius(&self, axis: Vec3) -> f32 {
        self.extents.x * self.axes[0].dot(axis).abs()
            + self.extents.y * self.axes[1].dot(axis).abs()
            + self.extents.z * self.axes[2].dot(axis).abs()
    }

    pub fn projection_interval(&self, axis: Vec3) -> (f32, f32) {
        let center = self.center.dot(axis);
        let radius = self.projected_radius(axis);
        (center - radius, center + radius)
    }

    /// Support vertex in `direction`. Components perpendicular to `direction` pick the positive side.
    pub fn support_point(&self, direction: Vec3) -> Vec3 {
        let mut point = self.center;
        for i in 0..3 {
            let sign = if self.axes[i].dot(direction) >= 0.0 { 1.0 } else { -1.0 };
            point += self.axes[i] * (sign * self.extents[i]);
        }
        point
    }

    pub fn classify_plane(&self, plane: &Plane, epsilon: f32) -> PlaneSide {
        classify_corners(&self.corner_points(), plane, epsilon)
    }
}

/// Box aligned with the world axes, stored as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAlignedBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for AxisAlignedBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl AxisAlignedBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    /// Inverted box that any `combine_point` call replaces.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Vec3]) -> Self {
        let mut bounds = Self::empty();
        for &point in points {
            bounds.combine_point(point);
        }
        bounds
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn combine_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn combine(&mut self, other: &AxisAlignedBox) {
        if other.is_empty() {
            return;
        }
        self.combine_point(other.min);
        self.combine_point(other.max);
    }

    pub fn grow(&mut self, delta: f32) {
        self.min -= Vec3::splat(delta);
        self.max += Vec3::splat(delta);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Corner `index` in `0..8`: bit 0 selects max x, bit 1 max y, bit 2 max z.
    pub fn corner_point(&self, index: usize) -> Vec3 {
        Vec3::new(
            if index & 1 != 0 { self.max.x } else { self.min.x },
            if index & 2 != 0 { self.max.y } else { self.min.y },
            if index & 4 != 0 { self.max.z } else { self.min.z },
        )
    }

    pub fn corner_points(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| self.corner_point(i))
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn intersects(&self, other: &AxisAlignedBox) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    pub fn clamp_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    pub fn to_oriented(&self) -> OrientedBox {
        OrientedBox::axis_aligned(self.center(), self.size() * 0.5)
    }

    pub fn circumscribed_sphere(&self) -> Sphere {
        if self.is_empty() {
            return Sphere::default();
        }
        Sphere::new(self.center(), self.size().length() * 0.5)
    }

    pub fn inscribed_sphere(&self) -> Sphere {
        if self.is_empty() {
            return Sphere::default();
        }
        Sphere::new(self.center(), self.size().min_element() * 0.5)
    }

    pub fn classify_plane(&self, plane: &Plane, epsilon: f32) -> PlaneSide {
        classify_corners(&self.corner_points(), plane, epsilon)
    }
}

fn classify_corners(corners: &[Vec3; 8], plane: &Plane, epsilon: f32) -> PlaneSide {
    let mut front = 0;
    let mut back = 0;
    for &corner in corners {
        match plane.classify_point(corner, epsilon) {
            PlaneSide::Front => front += 1,
            PlaneSide::Back => back += 1,
            _ => {}
        }
    }

    match (front > 0, back > 0) {
        (true, true) => PlaneSide::Straddling,
        (true, false) => PlaneSide::Front,
        (false, true) => PlaneSide::Back,
        (false, false) => PlaneSide::OnPlane,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Quat;

    #[test]
    fn corner_points_span_extents() {
        let obb = OrientedBox::axis_aligned(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0));
        let corners = obb.corner_points();
        assert!(corners[0].abs_diff_eq(Vec3::new(2.0, 2.0, 3.0), 1e-6));
        assert!(corners[6].abs_diff_eq(Vec3::new(0.0, -2.0, -3.0), 1e-6));
        assert!(corners.iter().all(|c| obb.contains_point(*c)));
    }

    #[test]
    fn rotated_projection_matches_corners() {
        let rotation = Mat3::from_quat(Quat::from_rotation_z(0.7) * Quat::from_rotation_x(0.3));
        let obb = OrientedBox::from_rotation(Vec3::new(0.5, -1.0, 2.0), rotation, Vec3::new(1.0, 0.5, 0.25));
        let axis = Vec3::new(0.3, 0.8, -0.2).normalize();
        let (min, max) = obb.projection_interval(axis);
        let projected: Vec<f32> = obb.corner_points().iter().map(|c| c.dot(axis)).collect();
        let expected_min = projected.iter().copied().fold(f32::INFINITY, f32::min);
        let expected_max = projected.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert_abs_diff_eq!(min, expected_min, epsilon = 1e-5);
        assert_abs_diff_eq!(max, expected_max, epsilon = 1e-5);
    }

    #[test]
    fn local_world_round_trip() {
        let rotation = Mat3::from_quat(Quat::from_rotation_y(1.1));
        let obb = OrientedBox::from_rotation(Vec3::new(3.0, 1.0, -2.0), rotation, Vec3::ONE);
        let p = Vec3::new(-1.0, 4.0, 0.5);
        assert!(obb.to_world(obb.to_local(p)).abs_diff_eq(p, 1e-5));
    }

    #[test]
    fn aabb_conversion_and_spheres() {
        let aabb = AxisAlignedBox::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        let obb = aabb.to_oriented();
        assert!(obb.extents.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
        assert_abs_diff_eq!(aabb.inscribed_sphere().radius, 1.0);
        assert_abs_diff_eq!(aabb.circumscribed_sphere().radius, obb.circumscribed_sphere().radius, epsilon = 1e-5);
    }

    #[test]
    fn aabb_from_points_and_corners() {
        let aabb = AxisAlignedBox::from_points(&[Vec3::new(1.0, 5.0, -2.0), Vec3::new(-1.0, 0.0, 4.0)]);
        assert!(aabb.min.abs_diff_eq(Vec3::new(-1.0, 0.0, -2.0), 1e-6));
        assert!(aabb.max.abs_diff_eq(Vec3::new(1.0, 5.0, 4.0), 1e-6));
        assert!(aabb.corner_point(7).abs_diff_eq(aabb.max, 1e-6));
        assert!(aabb.corner_point(0).abs_diff_eq(aabb.min, 1e-6));
        assert!(AxisAlignedBox::empty().is_empty());
    }

    #[test]
    fn classify_box_against_plane() {
        let aabb = AxisAlignedBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(aabb.classify_plane(&Plane::new(Vec3::Y, 0.0), 1e-4), PlaneSide::Straddling);
        assert_eq!(aabb.classify_plane(&Plane::new(Vec3::Y, 2.0), 1e-4), PlaneSide::Front);
        assert_eq!(aabb.classify_plane(&Plane::new(Vec3::Y, -2.0), 1e-4), PlaneSide::Back);
    }
}
