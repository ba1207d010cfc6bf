use glam::Vec3;

use crate::{
    config::GEOMETRY_EPSILON,
    core::{CollisionShape, OrientedBox, Plane, Sphere},
};

/// Result of a ray cast against a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

/// Ray starting at `origin`. The direction is normalized by every query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayQuery {
    pub origin: Vec3,
    pub direction: Vec3,
    pub max_distance: f32,
}

impl RayQuery {
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32) -> Self {
        Self {
            origin,
            direction,
            max_distance,
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction.normalize_or_zero() * distance
    }
}

pub struct Raycast;

impl Raycast {
    /// Nearest hit among `shapes`, with the index of the shape that was hit.
    pub fn cast(query: &RayQuery, shapes: &[CollisionShape]) -> Option<(usize, RayHit)> {
        shapes
            .iter()
            .enumerate()
            .filter_map(|(index, shape)| Self::ray_shape(query, shape).map(|hit| (index, hit)))
            .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
    }

    pub fn ray_shape(query: &RayQuery, shape: &CollisionShape) -> Option<RayHit> {
        match shape {
            CollisionShape::Plane(plane) => Self::ray_plane(query, plane),
            CollisionShape::Sphere(sphere) => Self::ray_sphere(query, sphere),
            CollisionShape::Box(obb) => Self::ray_box(query, obb),
        }
    }

    /// Hits the plane from either side. The reported normal faces the ray origin.
    pub fn ray_plane(query: &RayQuery, plane: &Plane) -> Option<RayHit> {
        let dir = query.direction.normalize_or_zero();
        let denom = plane.normal.dot(dir);
        if denom.abs() < GEOMETRY_EPSILON {
            return None;
        }

        let t = -plane.signed_distance(query.origin) / denom;
        if t < 0.0 || t > query.max_distance {
            return None;
        }

        let normal = if denom < 0.0 { plane.normal } else { -plane.normal };
        Some(RayHit {
            point: query.origin + dir * t,
            normal,
            distance: t,
        })
    }

    /// Rays starting inside the sphere report no hit.
    pub fn ray_sphere(query: &RayQuery, sphere: &Sphere) -> Option<RayHit> {
        let dir = query.direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }
        let oc = query.origin - sphere.origin;
        let b = oc.dot(dir);
        let c = oc.length_squared() - sphere.radius * sphere.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let t = -b - discriminant.sqrt();
        if t < 0.0 || t > query.max_distance {
            return None;
        }

        let point = query.origin + dir * t;
        Some(RayHit {
            point,
            normal: (point - sphere.origin).normalize_or_zero(),
            distance: t,
        })
    }

    /// Slab test in box coordinates. Rays starting inside the box report no hit.
    pub fn ray_box(query: &RayQuery, obb: &OrientedBox) -> Option<RayHit> {
        let dir_world = query.direction.normalize_or_zero();
        let origin = obb.to_local(query.origin);
        let dir = Vec3::new(
            dir_world.dot(obb.axes[0]),
            dir_world.dot(obb.axes[1]),
            dir_world.dot(obb.axes[2]),
        );

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = query.max_distance;
        let mut hit_axis = None;

        for i in 0..3 {
            let min = -obb.extents[i];
            let max = obb.extents[i];

            if dir[i].abs() < GEOMETRY_EPSILON {
                if origin[i] < min || origin[i] > max {
                    return None;
                }
                continue;
            }

            let inv_dir = 1.0 / dir[i];
            let t1 = (min - origin[i]) * inv_dir;
            let t2 = (max - origin[i]) * inv_dir;
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

            if near > t_min {
                t_min = near;
                hit_axis = Some(i);
            }
            t_max = t_max.min(far);
            if t_min > t_max {
                return None;
            }
        }

        let axis = hit_axis?;
        if t_min < 0.0 {
            return None;
        }

        Some(RayHit {
            point: query.origin + dir_world * t_min,
            normal: obb.axes[axis] * -dir[axis].signum(),
            distance: t_min,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::{Mat3, Quat};

    #[test]
    fn ray_hits_plane_from_above() {
        let query = RayQuery::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y, 10.0);
        let hit = Raycast::ray_plane(&query, &Plane::new(Vec3::Y, 0.0)).expect("plane below");
        assert_abs_diff_eq!(hit.distance, 5.0, epsilon = 1e-6);
        assert_eq!(hit.normal, Vec3::Y);

        let short = RayQuery::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y, 1.0);
        assert!(Raycast::ray_plane(&short, &Plane::new(Vec3::Y, 0.0)).is_none());
    }

    #[test]
    fn ray_hits_sphere_front_surface() {
        let query = RayQuery::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X * 2.0, 100.0);
        let hit = Raycast::ray_sphere(&query, &Sphere::new(Vec3::ZERO, 1.0)).expect("sphere ahead");
        assert_abs_diff_eq!(hit.distance, 4.0, epsilon = 1e-5);
        assert!(hit.normal.abs_diff_eq(-Vec3::X, 1e-5));
    }

    #[test]
    fn ray_hits_rotated_box_face() {
        let rotation = Mat3::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let obb = OrientedBox::from_rotation(Vec3::new(0.0, 0.0, 0.0), rotation, Vec3::new(2.0, 1.0, 0.5));
        let query = RayQuery::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, 100.0);
        let hit = Raycast::ray_box(&query, &obb).expect("box ahead");
        // Local z (extent 0.5) now lies along world x.
        assert_abs_diff_eq!(hit.distance, 4.5, epsilon = 1e-5);
        assert!(hit.normal.abs_diff_eq(-Vec3::X, 1e-5));
    }

    #[test]
    fn ray_from_negative_direction_reports_facing_normal() {
        let obb = OrientedBox::axis_aligned(Vec3::ZERO, Vec3::ONE);
        let query = RayQuery::new(Vec3::new(5.0, 0.0, 0.0), -Vec3::X, 100.0);
        let hit = Raycast::ray_box(&query, &obb).expect("box ahead");
        assert_abs_diff_eq!(hit.distance, 4.0, epsilon = 1e-5);
        assert!(hit.normal.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn cast_returns_nearest_shape() {
        let shapes = [
            CollisionShape::Plane(Plane::new(Vec3::Y, 0.0)),
            CollisionShape::Box(OrientedBox::axis_aligned(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(0.5))),
        ];
        let query = RayQuery::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y, 10.0);
        let (index, hit) = Raycast::cast(&query, &shapes).expect("something below");
        assert_eq!(index, 1);
        assert_abs_diff_eq!(hit.distance, 3.5, epsilon = 1e-5);
        assert!(hit.normal.abs_diff_eq(Vec3::Y, 1e-6));
    }
}
