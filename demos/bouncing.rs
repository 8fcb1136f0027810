use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use collide2d::*;

const DT: f32 = 1.0 / 60.0;

fn main() {
    let bounds = QuadBounds::axis_aligned(Vec2::ZERO, Vec2::new(400.0, 300.0));
    let mut engine = CollisionEngine::new(bounds, 4);

    // Static walls just inside the world bound.
    engine.add_shape(Collidable::aabb(200.0, 15.0, 360.0, 10.0).with_tag(-1));
    engine.add_shape(Collidable::aabb(200.0, 285.0, 360.0, 10.0).with_tag(-2));
    engine.add_shape(Collidable::aabb(15.0, 150.0, 10.0, 260.0).with_tag(-3));
    engine.add_shape(Collidable::aabb(385.0, 150.0, 10.0, 260.0).with_tag(-4));

    let velocities: Rc<RefCell<HashMap<i64, Vec2>>> = Rc::new(RefCell::new(HashMap::new()));
    let mut ball_ids = Vec::new();
    for i in 0..8 {
        let tag = i as i64;
        let x = 60.0 + i as f32 * 40.0;
        let id = engine.add_shape(Collidable::circle(x, 150.0, 12.0).unwrap().with_tag(tag));
        ball_ids.push(id);
        velocities
            .borrow_mut()
            .insert(tag, Vec2::new(40.0 + i as f32 * 15.0, 25.0 - i as f32 * 10.0));
    }

    let handler_velocities = Rc::clone(&velocities);
    engine.set_resolve(move |reference, incident, _face, _support| {
        // Crude response: reverse whichever moving shape took part.
        let mut velocities = handler_velocities.borrow_mut();
        for shape in [&*reference, &*incident] {
            if let Some(velocity) = velocities.get_mut(&shape.tag()) {
                *velocity = -*velocity;
            }
        }
    });

    for frame in 0..240 {
        {
            let world = engine.world_mut();
            let velocities = velocities.borrow();
            for &id in &ball_ids {
                if let Some(shape) = world.shape_mut(id) {
                    if let (Some(velocity), ShapeKind::Circle { center, .. }) =
                        (velocities.get(&shape.tag()), &mut shape.kind)
                    {
                        *center += *velocity * DT;
                    }
                }
            }
        }
        engine.step();

        if frame % 60 == 0 {
            let first = engine.get_shape(ball_ids[0]).and_then(|s| s.as_circle());
            println!("frame {frame}: ball 0 at {:?}", first.map(|(c, _)| c));
        }
    }

    engine.world().profiler().report();
}
