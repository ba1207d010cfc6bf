use contact_geom::*;

const DT: f32 = 1.0 / 60.0;
const GRAVITY: f32 = -9.81;

/// Sphere "feet" walking across a row of boxes. Each step the controller
/// probes for the box below and resolves standing contact with it.
fn main() {
    env_logger::init();

    let ground = [
        OrientedBox::axis_aligned(Vec3::new(0.0, -0.5, 0.0), Vec3::new(2.0, 0.5, 2.0)),
        OrientedBox::axis_aligned(Vec3::new(4.0, -0.25, 0.0), Vec3::new(2.0, 0.5, 2.0)),
        OrientedBox::from_rotation(
            Vec3::new(8.0, -0.2, 0.0),
            Mat3::from_quat(Quat::from_rotation_z(0.1)),
            Vec3::new(2.0, 0.5, 2.0),
        ),
    ];
    let shapes: Vec<CollisionShape> = ground.iter().copied().map(CollisionShape::Box).collect();

    let mut feet = Sphere::new(Vec3::new(-1.5, 1.0, 0.0), 0.5);
    let mut vertical_speed = 0.0;
    let walk_speed = 2.0;

    for step in 0..300 {
        vertical_speed += GRAVITY * DT;
        feet.origin += Vec3::new(walk_speed * DT, vertical_speed * DT, 0.0);

        let probe = RayQuery::new(feet.origin, -Vec3::Y, 2.0);
        let Some((index, _)) = Raycast::cast(&probe, &shapes) else {
            continue;
        };

        if let Some(manifold) = sphere_to_box(&feet, &ground[index]) {
            let contact = manifold.points()[0];
            // Push the feet out of the box along the box normal.
            feet.origin += manifold.normal_second * contact.penetration;
            if manifold.normal_second.y > 0.5 {
                vertical_speed = 0.0;
            }
            if step % 30 == 0 {
                println!(
                    "step {step:3}: standing on box {index} at {:.3?}, depth {:.4}",
                    contact.midpoint(),
                    contact.penetration
                );
            }
        }
    }

    println!("final position {:.3?}", feet.origin);
}
