use contact_geom::*;

/// Prints the contact manifolds of a small twisted stack of boxes resting on a table.
fn main() {
    env_logger::init();

    let config = CollisionConfig::default();
    let table = OrientedBox::axis_aligned(Vec3::ZERO, Vec3::new(3.0, 0.5, 3.0));

    let mut stack = vec![table];
    for level in 0..4 {
        let below = stack[stack.len() - 1];
        let height = below.center.y + below.extents.y + 0.45;
        stack.push(OrientedBox::from_rotation(
            Vec3::new(0.05 * level as f32, height, 0.0),
            Mat3::from_quat(Quat::from_rotation_y(0.3 * (level + 1) as f32)),
            Vec3::splat(0.5),
        ));
    }

    let pairs: Vec<(CollisionShape, CollisionShape)> = stack
        .windows(2)
        .map(|w| (CollisionShape::Box(w[0]), CollisionShape::Box(w[1])))
        .collect();

    for (level, result) in NarrowPhase::collide_pairs(&pairs, &config).iter().enumerate() {
        match result {
            Some(manifold) => {
                println!(
                    "level {level}: {} points, normal {:.3?}, max depth {:.3}",
                    manifold.len(),
                    manifold.normal_first,
                    manifold.max_penetration()
                );
                for point in manifold.points() {
                    println!("    {:.3?} depth {:.3}", point.midpoint(), point.penetration);
                }
            }
            None => println!("level {level}: no contact"),
        }
    }
}
