use collide2d::*;

fn main() {
    let bounds = QuadBounds::axis_aligned(Vec2::ZERO, Vec2::new(200.0, 200.0));
    let mut engine = CollisionEngine::new(bounds, 3);

    engine.add_shape(Collidable::aabb(60.0, 60.0, 20.0, 20.0).with_tag(1));
    engine.add_shape(Collidable::aabb(70.0, 60.0, 20.0, 20.0).with_tag(2));
    engine.add_shape(Collidable::circle(150.0, 150.0, 8.0).unwrap().with_tag(3));

    engine.set_resolve(|reference, incident, face, support| {
        println!(
            "overlap: {} vs {} (face {:?}, support {:?})",
            reference.tag(),
            incident.tag(),
            face,
            support
        );
    });

    engine.step();
    engine.world().profiler().report();
}
