//! Pairwise intersection tests for spheres, circles, planes and boxes, and the
//! [`NarrowPhase`] dispatcher over [`CollisionShape`] pairs.

use glam::Vec3;
use log::debug;

use super::{
    contact::{CircleContact, ContactManifold, ContactPoint, PointContact},
    sat::box_to_box,
};
use crate::{
    config::{CollisionConfig, FALLBACK_BOX_NORMAL, FALLBACK_SPHERE_NORMAL, GEOMETRY_EPSILON},
    core::{Circle, CollisionShape, OrientedBox, Plane, Sphere},
    utils::{logging::ScopedTimer, math::strict_sign},
};

/// Sphere against an infinite plane. The plane is two-sided.
pub fn sphere_to_plane(sphere: &Sphere, plane: &Plane) -> Option<PointContact> {
    let dist = plane.distance(sphere.origin) - sphere.radius;
    if dist >= 0.0 {
        return None;
    }

    Some(PointContact {
        point: plane.project_point(sphere.origin),
        normal: plane.normal,
        depth: dist.abs(),
    })
}

/// Sphere against sphere. The normal points from the second origin toward the
/// first; depth is half the overlap.
pub fn sphere_to_sphere(first: &Sphere, second: &Sphere) -> Option<PointContact> {
    let d = first.origin - second.origin;
    let diff = d.length() - first.radius - second.radius;
    if diff >= 0.0 {
        return None;
    }

    let n = d.normalize();
    let surface_first = first.origin - n * first.radius;
    let surface_second = second.origin + n * second.radius;

    Some(PointContact {
        point: (surface_first + surface_second) * 0.5,
        normal: n,
        depth: diff.abs() * 0.5,
    })
}

/// Planar version of [`sphere_to_sphere`].
pub fn circle_to_circle(first: &Circle, second: &Circle) -> Option<CircleContact> {
    let d = first.origin - second.origin;
    let diff = d.length() - first.radius - second.radius;
    if diff >= 0.0 {
        return None;
    }

    let n = d.normalize();
    let surface_first = first.origin - n * first.radius;
    let surface_second = second.origin + n * second.radius;

    Some(CircleContact {
        point: (surface_first + surface_second) * 0.5,
        normal: n,
        depth: diff.abs() * 0.5,
    })
}

/// Sphere against oriented box using the 27-region nearest point.
///
/// The sphere center is taken into box coordinates and clamped to the extents;
/// the regions it falls outside of select the box normal (face, edge or
/// vertex). A center inside the box has no outside region and gets
/// [`FALLBACK_BOX_NORMAL`]. When the nearest box point coincides with the
/// center the sphere normal falls back to [`FALLBACK_SPHERE_NORMAL`].
///
/// The sphere is the first body of the returned manifold.
pub fn sphere_to_box(sphere: &Sphere, obb: &OrientedBox) -> Option<ContactManifold> {
    let local = obb.to_local(sphere.origin);

    let mut clamped = Vec3::ZERO;
    let mut box_normal = Vec3::ZERO;
    let mut outside = 0;
    for i in 0..3 {
        let sign = strict_sign(local[i]);
        clamped[i] = sign * local[i].abs().min(obb.extents[i]);
        if local[i].abs() > obb.extents[i] {
            box_normal += obb.axes[i] * sign;
            outside += 1;
        }
    }

    let box_point = obb.to_world(clamped);
    let dist = box_point.distance(sphere.origin);
    if dist > sphere.radius {
        return None;
    }

    let box_normal = if outside > 0 {
        box_normal.normalize()
    } else {
        debug!("sphere center inside box, using fallback box normal");
        FALLBACK_BOX_NORMAL
    };

    let sphere_normal = if dist > GEOMETRY_EPSILON {
        (box_point - sphere.origin) / dist
    } else {
        debug!("sphere center on box surface, using fallback sphere normal");
        FALLBACK_SPHERE_NORMAL
    };

    let sphere_point = sphere.origin + sphere_normal * sphere.radius;

    let mut manifold = ContactManifold::new(sphere_normal, box_normal);
    manifold.push(ContactPoint::new(
        sphere_point,
        box_point,
        box_point.distance(sphere_point),
    ));
    Some(manifold)
}

/// Box against plane. Not implemented: always reports no contact.
pub fn box_to_plane(_obb: &OrientedBox, _plane: &Plane) -> Option<ContactManifold> {
    debug!("box/plane contact generation is not implemented");
    None
}

/// Narrow phase dispatcher over shape pairs.
pub struct NarrowPhase;

impl NarrowPhase {
    /// Runs the routine matching the two shape kinds. Point sides and normals of
    /// the result always refer to `first` then `second`.
    pub fn collide(
        first: &CollisionShape,
        second: &CollisionShape,
        config: &CollisionConfig,
    ) -> Option<ContactManifold> {
        use CollisionShape as S;

        match (first, second) {
            (S::Sphere(a), S::Sphere(b)) => {
                sphere_to_sphere(a, b).map(|c| ContactManifold::from_point_contact(&c))
            }
            (S::Sphere(sphere), S::Plane(plane)) => {
                sphere_to_plane(sphere, plane).map(|c| ContactManifold::from_point_contact(&c))
            }
            (S::Plane(plane), S::Sphere(sphere)) => sphere_to_plane(sphere, plane)
                .map(|c| ContactManifold::from_point_contact(&c).swapped()),
            (S::Sphere(sphere), S::Box(obb)) => sphere_to_box(sphere, obb),
            (S::Box(obb), S::Sphere(sphere)) => sphere_to_box(sphere, obb).map(ContactManifold::swapped),
            (S::Box(a), S::Box(b)) => box_to_box(a, b, config),
            (S::Box(obb), S::Plane(plane)) => box_to_plane(obb, plane),
            (S::Plane(plane), S::Box(obb)) => box_to_plane(obb, plane).map(ContactManifold::swapped),
            (S::Plane(_), S::Plane(_)) => None,
        }
    }

    /// Tests every pair, in parallel when the `parallel` feature is enabled.
    /// Results keep the input order.
    pub fn collide_pairs(
        pairs: &[(CollisionShape, CollisionShape)],
        config: &CollisionConfig,
    ) -> Vec<Option<ContactManifold>> {
        let mut timer = ScopedTimer::new("narrowphase::collide_pairs", pairs.len());

        #[cfg(feature = "parallel")]
        let results: Vec<Option<ContactManifold>> = {
            use rayon::prelude::*;
            pairs
                .par_iter()
                .map(|(a, b)| Self::collide(a, b, config))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<Option<ContactManifold>> = pairs
            .iter()
            .map(|(a, b)| Self::collide(a, b, config))
            .collect();

        timer.record_contacts(|| results.iter().flatten().count());
        results
    }
}
