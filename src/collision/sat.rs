//! Box/box separating axis test with contact generation.
//!
//! Fifteen axes are tested: the three face normals of each box and the nine
//! cross products of their edge directions. Any axis with negative overlap
//! separates the boxes. Among the overlapping axes one is chosen by
//! [`select_axis`] according to [`AxisSelection`]; a face axis produces up to
//! eight points by clipping the reference face against the incident face, a
//! cross axis produces one point between the two closest edges.

use arrayvec::ArrayVec;
use glam::Vec3;
use log::{debug, trace};

use super::{
    clipping::{PlaneHull, Polygon},
    contact::{ContactManifold, ContactPoint},
};
use crate::{
    config::{AxisSelection, CollisionConfig, GEOMETRY_EPSILON, LEGACY_DEPTH_SENTINEL},
    core::OrientedBox,
    utils::math::{closest_points_on_lines, sign_or_one},
};

/// One of the fifteen SAT axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeparatingAxis {
    /// Face normal `i` of the first box.
    FaceA(usize),
    /// Face normal `i` of the second box.
    FaceB(usize),
    /// Cross product of edge `i` of the first box with edge `j` of the second.
    Edge(usize, usize),
}

impl SeparatingAxis {
    pub fn is_edge(&self) -> bool {
        matches!(self, SeparatingAxis::Edge(..))
    }
}

/// Overlapping axis with its unit normal oriented from the first box toward the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCandidate {
    pub axis: SeparatingAxis,
    pub overlap: f32,
    pub normal: Vec3,
}

/// Running state of the best-axis reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTracker {
    pub depth: f32,
    pub best: Option<AxisCandidate>,
}

impl AxisTracker {
    pub fn new(policy: AxisSelection) -> Self {
        let depth = match policy {
            AxisSelection::LeastPenetration => f32::INFINITY,
            AxisSelection::LegacySentinel => LEGACY_DEPTH_SENTINEL,
        };
        Self { depth, best: None }
    }
}

/// Folds one candidate into the tracker.
///
/// `LeastPenetration` keeps the smallest overlap; edge axes must win by
/// `edge_axis_bias`. `LegacySentinel` replaces only when the tracked depth is
/// larger than the candidate overlap.
pub fn select_axis(
    tracker: AxisTracker,
    candidate: AxisCandidate,
    config: &CollisionConfig,
) -> AxisTracker {
    let replace = match config.axis_selection {
        AxisSelection::LeastPenetration => {
            let margin = if candidate.axis.is_edge() { config.edge_axis_bias } else { 0.0 };
            candidate.overlap + margin < tracker.depth
        }
        AxisSelection::LegacySentinel => tracker.depth > candidate.overlap,
    };

    if replace {
        AxisTracker {
            depth: candidate.overlap,
            best: Some(candidate),
        }
    } else {
        tracker
    }
}

enum AxisTest {
    Separated,
    Degenerate,
    Overlapping(AxisCandidate),
}

fn test_axis(a: &OrientedBox, b: &OrientedBox, d: Vec3, axis: SeparatingAxis, l: Vec3) -> AxisTest {
    let len_sq = l.length_squared();
    if len_sq <= GEOMETRY_EPSILON {
        return AxisTest::Degenerate;
    }

    let relative = l.dot(d);
    let overlap = a.projected_radius(l) + b.projected_radius(l) - relative.abs();
    if overlap < 0.0 {
        return AxisTest::Separated;
    }

    let len = len_sq.sqrt();
    AxisTest::Overlapping(AxisCandidate {
        axis,
        overlap: overlap / len,
        normal: l / len * sign_or_one(relative),
    })
}

/// Runs the separating axis test. `None` when the boxes are separated or when
/// the selection policy records no axis.
pub fn select_contact_axis(
    a: &OrientedBox,
    b: &OrientedBox,
    config: &CollisionConfig,
) -> Option<AxisCandidate> {
    let d = b.center - a.center;

    let mut axes: ArrayVec<(SeparatingAxis, Vec3), 15> = ArrayVec::new();
    for i in 0..3 {
        axes.push((SeparatingAxis::FaceA(i), a.axes[i]));
    }
    for i in 0..3 {
        axes.push((SeparatingAxis::FaceB(i), b.axes[i]));
    }
    for i in 0..3 {
        for j in 0..3 {
            axes.push((SeparatingAxis::Edge(i, j), a.axes[i].cross(b.axes[j])));
        }
    }

    let mut tracker = AxisTracker::new(config.axis_selection);
    for (axis, l) in axes {
        match test_axis(a, b, d, axis, l) {
            AxisTest::Separated => return None,
            AxisTest::Degenerate => {}
            AxisTest::Overlapping(candidate) => tracker = select_axis(tracker, candidate, config),
        }
    }

    if tracker.best.is_none() {
        debug!("boxes overlap on every axis but no contact axis was recorded");
    }
    tracker.best
}

/// Box against box. Normals and points are ordered first box, then second.
pub fn box_to_box(a: &OrientedBox, b: &OrientedBox, config: &CollisionConfig) -> Option<ContactManifold> {
    let candidate = select_contact_axis(a, b, config)?;
    trace!(
        "box/box contact axis {:?} overlap {:.5} normal {:?}",
        candidate.axis,
        candidate.overlap,
        candidate.normal
    );

    let manifold = match candidate.axis {
        SeparatingAxis::FaceA(i) => face_contact(a, i, candidate.normal, b, candidate.overlap, config),
        SeparatingAxis::FaceB(i) => {
            face_contact(b, i, -candidate.normal, a, candidate.overlap, config).swapped()
        }
        SeparatingAxis::Edge(i, j) => edge_contact(a, i, b, j, candidate.normal),
    };
    Some(manifold)
}

/// Face `axis_index` of `reference` facing along `reference_normal`, as a quad.
fn reference_face(reference: &OrientedBox, axis_index: usize, reference_normal: Vec3) -> Polygon {
    let u_index = (axis_index + 1) % 3;
    let v_index = (axis_index + 2) % 3;
    let u = reference.axes[u_index] * reference.extents[u_index];
    let v = reference.axes[v_index] * reference.extents[v_index];
    let center = reference.center + reference_normal * reference.extents[axis_index];

    Polygon::quad(center + u + v, center - u + v, center - u - v, center + u - v)
}

/// Face of `obb` whose outward normal is most anti-parallel to `reference_normal`.
fn incident_face(obb: &OrientedBox, reference_normal: Vec3) -> (usize, Vec3) {
    let mut best = (0, obb.axes[0]);
    let mut best_dot = f32::INFINITY;
    for (i, axis) in obb.axes.iter().enumerate() {
        for normal in [*axis, -*axis] {
            let dot = normal.dot(reference_normal);
            if dot < best_dot {
                best_dot = dot;
                best = (i, normal);
            }
        }
    }
    best
}

/// Builds the manifold with `reference` as the first body.
fn face_contact(
    reference: &OrientedBox,
    axis_index: usize,
    reference_normal: Vec3,
    incident: &OrientedBox,
    overlap: f32,
    config: &CollisionConfig,
) -> ContactManifold {
    let (inc_index, inc_normal) = incident_face(incident, reference_normal);
    let inc_center = incident.center + inc_normal * incident.extents[inc_index];

    let u_index = (inc_index + 1) % 3;
    let v_index = (inc_index + 2) % 3;
    let hull = PlaneHull::for_quad(
        inc_center,
        incident.axes[u_index],
        incident.axes[v_index],
        incident.extents[u_index],
        incident.extents[v_index],
    );

    let mut face = reference_face(reference, axis_index, reference_normal);
    hull.clip_polygon(&mut face, false, config.hull_clip_threshold);

    let penetration = |v: Vec3| {
        if config.estimate_face_penetration {
            (-(v - inc_center).dot(inc_normal)).max(0.0)
        } else {
            0.0
        }
    };

    let mut manifold = ContactManifold::new(reference_normal, inc_normal);
    for &v in face.vertices() {
        if !manifold.push(ContactPoint::shared(v, penetration(v))) {
            break;
        }
    }

    if manifold.is_empty() {
        debug!("face clipping left no vertices, using face centers");
        let ref_center = reference.center + reference_normal * reference.extents[axis_index];
        manifold.push(ContactPoint::shared((ref_center + inc_center) * 0.5, overlap));
    }

    manifold
}

fn edge_contact(a: &OrientedBox, i: usize, b: &OrientedBox, j: usize, normal: Vec3) -> ContactManifold {
    let dir_a = a.axes[i];
    let dir_b = b.axes[j];
    let pa = a.support_point(normal);
    let pb = b.support_point(-normal);

    let (ta, tb, _) = closest_points_on_lines(pa, dir_a, pb, dir_b);
    let on_a = pa + dir_a * ta;
    let on_b = pb + dir_b * tb;

    let mut manifold = ContactManifold::new(normal, -normal);
    manifold.push(ContactPoint::new(on_a, on_b, on_a.distance(on_b)));
    manifold
}
