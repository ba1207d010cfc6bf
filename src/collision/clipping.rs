//! Fixed-capacity polygon and plane-hull clipping.
//!
//! A [`Polygon`] is an ordered, planar, convex loop of at most
//! [`MAX_POLY_VERTICES`] vertices. It can split itself by a plane into front
//! and back fragments, or clip itself keeping only one side. A [`PlaneHull`]
//! is a small convex region described by outward-facing planes; clipping a
//! polygon by a hull intersects it with every half-space in turn.
//!
//! Nothing here allocates: both types live on the stack.

use arrayvec::ArrayVec;
use glam::{Mat4, Vec3};
use log::warn;

use crate::{
    config::{MAX_HULL_PLANES, MAX_POLY_VERTICES, POINTS_SAME_THRESHOLD},
    core::{AxisAlignedBox, OrientedBox, Plane},
};

/// Outcome of classifying or splitting a polygon by a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitResult {
    /// The plane cuts the polygon into two non-degenerate fragments.
    Two,
    /// Entirely in front of the plane (or only a sliver behind it).
    Front,
    /// Entirely behind the plane (or only a sliver in front of it).
    Back,
    /// Every vertex lies inside the on-plane band.
    Coplanar,
    /// Fewer than three vertices; nothing to split.
    NoVertices,
}

/// Fragments produced by [`Polygon::split_by_plane`] when the result is [`SplitResult::Two`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitFragments {
    pub front: Polygon,
    pub back: Polygon,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VertexSide {
    Front,
    Back,
    Either,
}

/// Ordered vertex loop with a planar texture basis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: ArrayVec<Vec3, MAX_POLY_VERTICES>,
    /// Texture basis for planar mapping. Not used by collision.
    pub tex_u: Vec3,
    pub tex_v: Vec3,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies up to [`MAX_POLY_VERTICES`] vertices; the rest are dropped with a warning.
    pub fn from_vertices(vertices: &[Vec3]) -> Self {
        let mut poly = Self::new();
        for &v in vertices {
            if !poly.push_vertex(v) {
                break;
            }
        }
        poly
    }

    pub fn triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self::from_vertices(&[a, b, c])
    }

    pub fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Self {
        Self::from_vertices(&[a, b, c, d])
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Appends a vertex. Returns `false` (and drops it) when the polygon is full.
    pub fn push_vertex(&mut self, vertex: Vec3) -> bool {
        if self.vertices.try_push(vertex).is_err() {
            warn!("polygon vertex capacity ({MAX_POLY_VERTICES}) exceeded, vertex dropped");
            return false;
        }
        true
    }

    /// Inserts before `position`. Out-of-range positions and a full polygon are rejected.
    pub fn insert_vertex(&mut self, position: usize, vertex: Vec3) -> bool {
        if position > self.vertices.len() {
            return false;
        }
        if self.vertices.try_insert(position, vertex).is_err() {
            warn!("polygon vertex capacity ({MAX_POLY_VERTICES}) exceeded, insert rejected");
            return false;
        }
        true
    }

    /// Removes every vertex exactly equal to `vertex`.
    pub fn remove_vertex(&mut self, vertex: Vec3) {
        self.vertices.retain(|v| *v != vertex);
    }

    /// Reverses the winding order.
    pub fn invert(&mut self) {
        self.vertices.reverse();
    }

    pub fn shift(&mut self, delta: Vec3) {
        for v in self.vertices.iter_mut() {
            *v += delta;
        }
    }

    pub fn transform(&mut self, matrix: &Mat4) {
        for v in self.vertices.iter_mut() {
            *v = matrix.transform_point3(*v);
        }
    }

    /// Vertex average; zero for an empty polygon.
    pub fn center(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        self.vertices.iter().copied().sum::<Vec3>() / self.vertices.len() as f32
    }

    /// Unit normal following the winding; zero when degenerate.
    pub fn normal(&self) -> Vec3 {
        if self.vertices.len() < 3 {
            return Vec3::ZERO;
        }
        let c = self.center();
        (c - self.vertices[0]).cross(c - self.vertices[1]).normalize_or_zero()
    }

    pub fn plane(&self) -> Plane {
        let n = self.normal();
        let anchor = self.vertices.first().copied().unwrap_or(Vec3::ZERO);
        Plane::new(n, -n.dot(anchor))
    }

    /// Area of a convex polygon by triangle fan.
    pub fn area(&self) -> f32 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        let base = self.vertices[0];
        self.vertices
            .windows(2)
            .skip(1)
            .map(|w| (w[0] - base).cross(w[1] - base).length())
            .sum::<f32>()
            * 0.5
    }

    /// Drops consecutive near-equal vertices, including the wrap-around pair.
    /// A loop left with fewer than three vertices is cleared. Returns the new count.
    pub fn remove_duplicates(&mut self) -> usize {
        let mut kept: ArrayVec<Vec3, MAX_POLY_VERTICES> = ArrayVec::new();
        for &v in self.vertices.iter() {
            if kept.last().map_or(true, |last| !points_approx_same(*last, v)) {
                kept.push(v);
            }
        }
        while kept.len() > 1 && points_approx_same(kept[0], kept[kept.len() - 1]) {
            kept.pop();
        }
        if kept.len() < 3 {
            kept.clear();
        }
        self.vertices = kept;
        self.vertices.len()
    }

    /// Classifies the polygon against the plane through `plane_point` with
    /// `plane_normal` without building fragments.
    pub fn classify(&self, plane_point: Vec3, plane_normal: Vec3, threshold: f32) -> SplitResult {
        match self.prepare_split(plane_point, plane_normal, threshold) {
            Ok(_) => SplitResult::Two,
            Err(result) => result,
        }
    }

    /// Splits by the plane through `plane_point` with `plane_normal`.
    ///
    /// Vertices within `threshold` of the plane keep the side of the previous
    /// vertex. Edge crossings are interpolated linearly and shared by both
    /// fragments. A fragment that collapses below three vertices is treated
    /// as a sliver and the result degrades to the other side.
    pub fn split_by_plane(
        &self,
        plane_point: Vec3,
        plane_normal: Vec3,
        threshold: f32,
    ) -> (SplitResult, Option<SplitFragments>) {
        let (dists, mut prev_side) = match self.prepare_split(plane_point, plane_normal, threshold) {
            Ok(prepared) => prepared,
            Err(result) => return (result, None),
        };

        let mut front = Polygon {
            vertices: ArrayVec::new(),
            tex_u: self.tex_u,
            tex_v: self.tex_v,
        };
        let mut back = front.clone();

        let n = self.vertices.len();
        let mut prev_vtx = self.vertices[n - 1];
        let mut dist = dists[n - 1];
        let on_plane = |d: f32| d >= -threshold && d < threshold;

        for (i, &vtx) in self.vertices.iter().enumerate() {
            let prev_dist = dist;
            dist = dists[i];

            let side = if dist > threshold {
                VertexSide::Front
            } else if dist < -threshold {
                VertexSide::Back
            } else {
                prev_side
            };

            if side != prev_side {
                if on_plane(dist) {
                    front.push_vertex(vtx);
                    back.push_vertex(vtx);
                } else if on_plane(prev_dist) {
                    let dest = if side == VertexSide::Front { &mut front } else { &mut back };
                    dest.push_vertex(prev_vtx);
                    dest.push_vertex(vtx);
                } else {
                    let crossing = prev_vtx + (vtx - prev_vtx) * (prev_dist / (prev_dist - dist));
                    front.push_vertex(crossing);
                    back.push_vertex(crossing);
                    if prev_side == VertexSide::Front {
                        back.push_vertex(vtx);
                    } else {
                        front.push_vertex(vtx);
                    }
                }
            } else if side == VertexSide::Front {
                front.push_vertex(vtx);
            } else {
                back.push_vertex(vtx);
            }

            prev_side = side;
            prev_vtx = vtx;
        }

        if front.remove_duplicates() < 3 {
            return (SplitResult::Back, None);
        }
        if back.remove_duplicates() < 3 {
            return (SplitResult::Front, None);
        }

        (SplitResult::Two, Some(SplitFragments { front, back }))
    }

    /// Keeps the front (`keep_front`) or back part of the polygon.
    ///
    /// A polygon entirely on the discarded side, or with fewer than three
    /// vertices, becomes empty. A coplanar polygon is left untouched.
    pub fn clip_by_plane(
        &mut self,
        plane_point: Vec3,
        plane_normal: Vec3,
        keep_front: bool,
        threshold: f32,
    ) -> SplitResult {
        let (result, fragments) = self.split_by_plane(plane_point, plane_normal, threshold);
        match result {
            SplitResult::Two => {
                if let Some(SplitFragments { front, back }) = fragments {
                    *self = if keep_front { front } else { back };
                }
            }
            SplitResult::NoVertices => self.vertices.clear(),
            SplitResult::Back if keep_front => self.vertices.clear(),
            SplitResult::Front if !keep_front => self.vertices.clear(),
            _ => {}
        }
        result
    }

    /// Signed distances and the initial walking side, or the early result when
    /// no real split is needed.
    fn prepare_split(
        &self,
        plane_point: Vec3,
        plane_normal: Vec3,
        threshold: f32,
    ) -> Result<([f32; MAX_POLY_VERTICES], VertexSide), SplitResult> {
        if self.vertices.len() < 3 {
            return Err(SplitResult::NoVertices);
        }

        let mut dists = [0.0_f32; MAX_POLY_VERTICES];
        let mut max_dist = f32::NEG_INFINITY;
        let mut min_dist = f32::INFINITY;
        let mut side = VertexSide::Either;

        for (i, v) in self.vertices.iter().enumerate() {
            let d = (*v - plane_point).dot(plane_normal);
            dists[i] = d;
            max_dist = max_dist.max(d);
            min_dist = min_dist.min(d);
            if d > threshold {
                side = VertexSide::Front;
            } else if d < -threshold {
                side = VertexSide::Back;
            }
        }

        if max_dist < threshold && min_dist > -threshold {
            return Err(SplitResult::Coplanar);
        }
        if max_dist < threshold {
            return Err(SplitResult::Back);
        }
        if min_dist > -threshold {
            return Err(SplitResult::Front);
        }

        Ok((dists, side))
    }
}

fn points_approx_same(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() <= POINTS_SAME_THRESHOLD
}

/// Convex region bounded by up to [`MAX_HULL_PLANES`] outward-facing planes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaneHull {
    planes: ArrayVec<Plane, MAX_HULL_PLANES>,
}

impl PlaneHull {
    pub fn new() -> Self {
        Self::default()
    }

    /// Six face planes of an oriented box, normals pointing out.
    pub fn for_box(obb: &OrientedBox) -> Self {
        let mut hull = Self::new();
        for i in 0..6 {
            let sign = if i % 2 == 1 { -1.0 } else { 1.0 };
            let normal = obb.axes[i / 2] * sign;
            let point = obb.center + normal * obb.extents[i / 2];
            hull.add_plane(Plane::from_point_normal(point, normal));
        }
        hull
    }

    pub fn for_aabb(aabb: &AxisAlignedBox) -> Self {
        Self::for_box(&aabb.to_oriented())
    }

    /// Four side planes around a rectangle centered at `center`, spanned by
    /// unit `axis1`/`axis2` with half sizes `size1`/`size2`. Used for
    /// rectangle-by-rectangle clipping.
    pub fn for_quad(center: Vec3, axis1: Vec3, axis2: Vec3, size1: f32, size2: f32) -> Self {
        let mut hull = Self::new();
        hull.add_plane(Plane::from_point_normal(center + axis1 * size1, axis1));
        hull.add_plane(Plane::from_point_normal(center - axis1 * size1, -axis1));
        hull.add_plane(Plane::from_point_normal(center + axis2 * size2, axis2));
        hull.add_plane(Plane::from_point_normal(center - axis2 * size2, -axis2));
        hull
    }

    /// Returns `false` (and drops the plane) when the hull is full.
    pub fn add_plane(&mut self, plane: Plane) -> bool {
        if self.planes.try_push(plane).is_err() {
            warn!("plane hull capacity ({MAX_HULL_PLANES}) exceeded, plane dropped");
            return false;
        }
        true
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Turns the hull inside out.
    pub fn invert(&mut self) {
        for plane in self.planes.iter_mut() {
            *plane = plane.flipped();
        }
    }

    pub fn contains_point(&self, point: Vec3, epsilon: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) <= epsilon)
    }

    /// Clips `poly` by every plane in order. With `keep_front == false` the
    /// result is the part of the polygon inside the hull.
    pub fn clip_polygon(&self, poly: &mut Polygon, keep_front: bool, threshold: f32) {
        for plane in self.planes.iter() {
            if poly.is_empty() {
                break;
            }
            poly.clip_by_plane(plane.point_on_plane(), plane.normal, keep_front, threshold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_square() -> Polygon {
        Polygon::quad(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        )
    }

    #[test]
    fn split_through_middle_produces_two_halves() {
        let (result, fragments) = unit_square().split_by_plane(Vec3::ZERO, Vec3::X, 1e-4);
        assert_eq!(result, SplitResult::Two);
        let SplitFragments { front, back } = fragments.expect("two fragments");
        assert_eq!(front.len(), 4);
        assert_eq!(back.len(), 4);
        assert_abs_diff_eq!(front.area(), 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(back.area(), 2.0, epsilon = 1e-5);
        assert!(front.vertices().iter().all(|v| v.x >= -1e-6));
        assert!(back.vertices().iter().all(|v| v.x <= 1e-6));
    }

    #[test]
    fn whole_side_and_coplanar_results() {
        let square = unit_square();
        assert_eq!(square.classify(Vec3::new(-2.0, 0.0, 0.0), Vec3::X, 1e-4), SplitResult::Front);
        assert_eq!(square.classify(Vec3::new(2.0, 0.0, 0.0), Vec3::X, 1e-4), SplitResult::Back);
        assert_eq!(square.classify(Vec3::ZERO, Vec3::Z, 1e-4), SplitResult::Coplanar);
        assert_eq!(Polygon::new().classify(Vec3::ZERO, Vec3::Z, 1e-4), SplitResult::NoVertices);
    }

    #[test]
    fn clip_keeps_requested_side() {
        let mut poly = unit_square();
        let result = poly.clip_by_plane(Vec3::new(0.5, 0.0, 0.0), Vec3::X, false, 1e-4);
        assert_eq!(result, SplitResult::Two);
        assert_abs_diff_eq!(poly.area(), 3.0, epsilon = 1e-5);

        let mut gone = unit_square();
        gone.clip_by_plane(Vec3::new(2.0, 0.0, 0.0), Vec3::X, true, 1e-4);
        assert!(gone.is_empty());

        let mut coplanar = unit_square();
        assert_eq!(coplanar.clip_by_plane(Vec3::ZERO, Vec3::Z, true, 1e-4), SplitResult::Coplanar);
        assert_eq!(coplanar.len(), 4);
    }

    #[test]
    fn sliver_is_ignored() {
        // Plane barely clipping one corner: front fragment collapses to duplicates.
        let (result, fragments) =
            unit_square().split_by_plane(Vec3::new(1.0 - 5e-5, 0.0, 0.0), Vec3::X, 1e-6);
        assert_eq!(result, SplitResult::Back);
        assert!(fragments.is_none());
    }

    #[test]
    fn vertex_on_plane_is_shared() {
        let diamond = Polygon::quad(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
        );
        let (result, fragments) = diamond.split_by_plane(Vec3::ZERO, Vec3::X, 1e-4);
        assert_eq!(result, SplitResult::Two);
        let SplitFragments { front, back } = fragments.expect("two fragments");
        assert_eq!(front.len(), 3);
        assert_eq!(back.len(), 3);
    }

    #[test]
    fn quad_hull_clips_to_overlap() {
        let hull = PlaneHull::for_quad(Vec3::new(1.0, 1.0, 0.0), Vec3::X, Vec3::Y, 1.0, 1.0);
        let mut poly = unit_square();
        hull.clip_polygon(&mut poly, false, 1e-3);
        assert_eq!(poly.len(), 4);
        assert_abs_diff_eq!(poly.area(), 1.0, epsilon = 1e-5);
        assert!(poly
            .vertices()
            .iter()
            .all(|v| v.x >= -1e-5 && v.y >= -1e-5 && v.x <= 1.0 + 1e-5 && v.y <= 1.0 + 1e-5));
    }

    #[test]
    fn rotated_quad_clip_yields_octagon() {
        let angle = std::f32::consts::FRAC_PI_4;
        let (s, c) = angle.sin_cos();
        let hull = PlaneHull::for_quad(
            Vec3::ZERO,
            Vec3::new(c, s, 0.0),
            Vec3::new(-s, c, 0.0),
            1.0,
            1.0,
        );
        let mut poly = unit_square();
        hull.clip_polygon(&mut poly, false, 1e-3);
        assert_eq!(poly.len(), 8);
    }

    #[test]
    fn box_hull_contains_center_but_not_outside() {
        let obb = OrientedBox::axis_aligned(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5));
        let hull = PlaneHull::for_box(&obb);
        assert_eq!(hull.len(), 6);
        assert!(hull.contains_point(obb.center, 0.0));
        assert!(!hull.contains_point(Vec3::ZERO, 1e-4));

        let mut inverted = hull.clone();
        inverted.invert();
        assert!(!inverted.contains_point(obb.center, 0.0));
    }

    #[test]
    fn vertex_count_stays_bounded() {
        let ring: Vec<Vec3> = (0..40)
            .map(|i| {
                let t = i as f32 / 40.0 * std::f32::consts::TAU;
                Vec3::new(t.cos(), t.sin(), 0.0)
            })
            .collect();
        let mut poly = Polygon::from_vertices(&ring);
        assert_eq!(poly.len(), MAX_POLY_VERTICES);

        for k in 0..16 {
            let t = k as f32 * 0.7;
            let normal = Vec3::new(t.cos(), t.sin(), 0.0);
            poly.clip_by_plane(normal * 0.9, normal, false, 1e-4);
            assert!(poly.len() <= MAX_POLY_VERTICES);
        }
        assert!(!poly.is_empty());
    }

    #[test]
    fn remove_duplicates_collapses_repeats() {
        let mut poly = Polygon::from_vertices(&[
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::X,
            Vec3::X + Vec3::splat(1e-6),
            Vec3::Y,
            Vec3::ZERO,
        ]);
        assert_eq!(poly.remove_duplicates(), 3);

        let mut degenerate = Polygon::from_vertices(&[Vec3::ZERO, Vec3::X, Vec3::X]);
        assert_eq!(degenerate.remove_duplicates(), 0);
        assert!(degenerate.is_empty());
    }

    #[test]
    fn invert_flips_normal() {
        let mut poly = unit_square();
        let normal = poly.normal();
        poly.invert();
        assert!(poly.normal().abs_diff_eq(-normal, 1e-6));
        assert_abs_diff_eq!(poly.plane().signed_distance(Vec3::ZERO), 0.0, epsilon = 1e-6);
    }
}
