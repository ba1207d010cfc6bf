//! Additional math helpers layered on top of `glam`.

use glam::Vec3;

use crate::config::GEOMETRY_EPSILON;

/// `+1.0` for positive values, `-1.0` otherwise (zero maps to `-1.0`).
#[inline]
pub fn strict_sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// `+1.0` for non-negative values, `-1.0` otherwise.
#[inline]
pub fn sign_or_one(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Builds two unit vectors orthogonal to `normal` and to each other.
///
/// Tries the world X, Y and Z axes in turn as the seed so that the result is
/// stable for axis-aligned normals.
pub fn complementary_basis(normal: Vec3) -> (Vec3, Vec3) {
    let mut v1 = normal.cross(Vec3::X);
    if v1.length_squared() <= GEOMETRY_EPSILON {
        v1 = normal.cross(Vec3::Y);
        if v1.length_squared() <= GEOMETRY_EPSILON {
            v1 = normal.cross(Vec3::Z);
        }
    }
    let v2 = normal.cross(v1);
    (v1.normalize_or_zero(), v2.normalize_or_zero())
}

/// Line parameters of the closest points between `p1 + t1 * d1` and `p2 + t2 * d2`.
///
/// Returns `(t1, t2, true)` for non-parallel lines. For parallel lines the
/// first parameter is the projection of `p2` onto the first line, the second
/// is zero and the flag is `false`.
pub fn closest_points_on_lines(p1: Vec3, d1: Vec3, p2: Vec3, d2: Vec3) -> (f32, f32, bool) {
    let offset = p2 - p1;
    let c0 = offset.dot(d1);
    let c1 = offset.dot(d2);

    let a11 = d1.dot(d1);
    let a12 = -d1.dot(d2);
    let a21 = -a12;
    let a22 = -d2.dot(d2);

    let det = a11 * a22 - a21 * a12;
    if det.abs() > GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        let t1 = (c0 * a22 - c1 * a12) / det;
        let t2 = (a11 * c1 - a21 * c0) / det;
        return (t1, t2, true);
    }

    let t1 = if a11 > GEOMETRY_EPSILON { c0 / a11 } else { 0.0 };
    (t1, 0.0, false)
}
