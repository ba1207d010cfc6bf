use approx::assert_abs_diff_eq;
use contact_geom::{
    collision::SplitFragments,
    config::{DEFAULT_HULL_CLIP_THRESHOLD, DEFAULT_SPLIT_THRESHOLD, MAX_POLY_VERTICES},
    *,
};

fn square(size: f32) -> Polygon {
    Polygon::quad(
        Vec3::new(-size, 0.0, -size),
        Vec3::new(size, 0.0, -size),
        Vec3::new(size, 0.0, size),
        Vec3::new(-size, 0.0, size),
    )
}

#[test]
fn split_fragments_cover_the_original_area() {
    let poly = square(1.0);
    let normal = Vec3::new(1.0, 0.0, 1.0).normalize();
    let (result, fragments) = poly.split_by_plane(Vec3::new(0.2, 0.0, 0.0), normal, DEFAULT_SPLIT_THRESHOLD);
    assert_eq!(result, SplitResult::Two);

    let SplitFragments { front, back } = fragments.expect("two fragments");
    assert_abs_diff_eq!(front.area() + back.area(), poly.area(), epsilon = 1e-4);
    assert!(front.vertices().iter().all(|v| (*v - Vec3::new(0.2, 0.0, 0.0)).dot(normal) >= -1e-4));
    assert!(back.vertices().iter().all(|v| (*v - Vec3::new(0.2, 0.0, 0.0)).dot(normal) <= 1e-4));
}

#[test]
fn aabb_hull_trims_polygon_to_box_section() {
    let aabb = AxisAlignedBox::new(Vec3::new(-0.5, -1.0, -0.25), Vec3::new(0.5, 1.0, 0.25));
    let hull = PlaneHull::for_aabb(&aabb);
    assert_eq!(hull.len(), 6);

    let mut poly = square(2.0);
    hull.clip_polygon(&mut poly, false, DEFAULT_HULL_CLIP_THRESHOLD);
    assert_eq!(poly.len(), 4);
    assert_abs_diff_eq!(poly.area(), 0.5, epsilon = 1e-5);
    assert!(poly.vertices().iter().all(|v| aabb.contains_point(*v)));
}

#[test]
fn front_clip_keeps_part_beyond_quad_edge() {
    let hull = PlaneHull::for_quad(Vec3::ZERO, Vec3::X, Vec3::Z, 0.5, 0.5);
    let mut poly = Polygon::quad(
        Vec3::new(0.25, 0.0, -0.25),
        Vec3::new(1.0, 0.0, -0.25),
        Vec3::new(1.0, 0.0, 0.25),
        Vec3::new(0.25, 0.0, 0.25),
    );
    poly.clip_by_plane(hull.planes()[0].point_on_plane(), hull.planes()[0].normal, true, DEFAULT_SPLIT_THRESHOLD);
    assert_abs_diff_eq!(poly.area(), 0.25, epsilon = 1e-5);
    assert!(poly.vertices().iter().all(|v| v.x >= 0.5 - 1e-5));
}

#[test]
fn polygon_editing_helpers() {
    let mut poly = Polygon::triangle(Vec3::ZERO, Vec3::X, Vec3::Z);
    assert!(poly.insert_vertex(1, Vec3::new(0.5, 0.0, -0.5)));
    assert!(!poly.insert_vertex(10, Vec3::ONE));
    assert_eq!(poly.len(), 4);

    poly.remove_vertex(Vec3::new(0.5, 0.0, -0.5));
    assert_eq!(poly.len(), 3);

    poly.shift(Vec3::Y);
    assert!(poly.vertices().iter().all(|v| v.y == 1.0));

    poly.transform(&Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0)));
    assert!(poly.vertices().iter().all(|v| v.y.abs() < 1e-6));
    assert!(poly.center().abs_diff_eq(Vec3::new(1.0 / 3.0, 0.0, 1.0 / 3.0), 1e-6));
}

#[test]
fn capacity_is_enforced_on_push() {
    let mut poly = Polygon::new();
    for i in 0..MAX_POLY_VERTICES {
        assert!(poly.push_vertex(Vec3::new(i as f32, 0.0, 0.0)));
    }
    assert!(!poly.push_vertex(Vec3::ONE));
    assert!(!poly.insert_vertex(0, Vec3::ONE));
    assert_eq!(poly.len(), MAX_POLY_VERTICES);
}

#[test]
fn box_hull_membership_follows_rotation() {
    let obb = OrientedBox::from_rotation(
        Vec3::new(2.0, 0.0, 0.0),
        Mat3::from_quat(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4)),
        Vec3::new(1.0, 0.1, 1.0),
    );
    let hull = PlaneHull::for_box(&obb);
    assert!(hull.contains_point(obb.center + obb.axes[0] * 0.9, 1e-5));
    assert!(!hull.contains_point(obb.center + Vec3::X * 0.9, 1e-5));
}

#[test]
fn inverted_hull_rejects_its_interior() {
    let mut hull = PlaneHull::for_quad(Vec3::ZERO, Vec3::X, Vec3::Z, 0.5, 0.5);
    hull.invert();
    assert!(!hull.contains_point(Vec3::ZERO, 0.0));
    assert!(hull.planes().iter().all(|plane| plane.signed_distance(Vec3::ZERO) > 0.0));
}
