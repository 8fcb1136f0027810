use approx::assert_relative_eq;
use collide2d::*;

#[test]
fn children_tile_the_parent_exactly() {
    let bounds = QuadBounds::axis_aligned(Vec2::ZERO, Vec2::new(100.0, 80.0));
    let tree = Quadtree::new(bounds, 1);

    let expected: [[(f32, f32); 4]; 4] = [
        [(0.0, 0.0), (50.0, 0.0), (50.0, 40.0), (0.0, 40.0)],
        [(0.0, 40.0), (50.0, 40.0), (50.0, 80.0), (0.0, 80.0)],
        [(50.0, 40.0), (100.0, 40.0), (100.0, 80.0), (50.0, 80.0)],
        [(50.0, 0.0), (100.0, 0.0), (100.0, 40.0), (50.0, 40.0)],
    ];

    assert_eq!(tree.children().len(), 4);
    for (child, corners) in tree.children().iter().zip(expected) {
        for (vertex, (x, y)) in child.bounds().corners().iter().zip(corners) {
            assert_relative_eq!(vertex.x, x, epsilon = 1e-6);
            assert_relative_eq!(vertex.y, y, epsilon = 1e-6);
        }
    }
}

#[test]
fn deep_tree_tiles_at_every_level() {
    let bounds = QuadBounds::axis_aligned(Vec2::ZERO, Vec2::new(64.0, 64.0));
    let tree = Quadtree::new(bounds, 3);

    // Sibling quads share edge midpoints, so the areas of the leaves must
    // add back up to the root's area.
    fn leaf_area_sum(node: &Quadtree) -> f32 {
        if node.children().is_empty() {
            let c = node.bounds().corners();
            // Shoelace formula.
            let mut doubled = 0.0;
            for i in 0..4 {
                let a = c[i];
                let b = c[(i + 1) % 4];
                doubled += a.x * b.y - b.x * a.y;
            }
            (doubled / 2.0).abs()
        } else {
            node.children().iter().map(leaf_area_sum).sum()
        }
    }

    assert_relative_eq!(leaf_area_sum(&tree), 64.0 * 64.0, epsilon = 1e-2);
}

#[test]
fn single_item_triggers_no_narrow_phase_tests() {
    let bounds = QuadBounds::axis_aligned(Vec2::ZERO, Vec2::new(100.0, 100.0));
    let mut world = CollisionWorld::new(bounds, 2);
    world.add_shape(Collidable::aabb(30.0, 30.0, 10.0, 10.0));

    world.step();
    assert_eq!(world.profiler().narrow_phase_tests, 0);
    assert_eq!(world.profiler().contact_count, 0);
}

#[test]
fn disjoint_sibling_items_are_never_tested() {
    let bounds = QuadBounds::axis_aligned(Vec2::ZERO, Vec2::new(100.0, 100.0));
    let mut world = CollisionWorld::new(bounds, 1);
    // One shape per sibling quadrant: the sweep must not probe the pair.
    world.add_shape(Collidable::aabb(25.0, 25.0, 10.0, 10.0));
    world.add_shape(Collidable::aabb(75.0, 75.0, 10.0, 10.0));

    world.step();
    assert_eq!(world.profiler().shape_count, 2);
    assert_eq!(world.profiler().narrow_phase_tests, 0);
}

#[test]
fn items_sharing_a_node_are_tested_once() {
    let bounds = QuadBounds::axis_aligned(Vec2::ZERO, Vec2::new(100.0, 100.0));
    let mut world = CollisionWorld::new(bounds, 1);
    world.add_shape(Collidable::aabb(20.0, 20.0, 10.0, 10.0));
    world.add_shape(Collidable::aabb(35.0, 20.0, 10.0, 10.0));

    world.step();
    assert_eq!(world.profiler().narrow_phase_tests, 1);
    // Separated by 5 units inside the same quadrant: tested, no contact.
    assert_eq!(world.profiler().contact_count, 0);
}

#[test]
fn ancestor_items_are_tested_against_descendants() {
    let bounds = QuadBounds::axis_aligned(Vec2::ZERO, Vec2::new(100.0, 100.0));
    let mut world = CollisionWorld::new(bounds, 2);
    // Straddles the root's center: stays at the root.
    world.add_shape(Collidable::aabb(50.0, 50.0, 20.0, 20.0));
    // Sinks into the SW quadrant, overlapping the ancestor item.
    world.add_shape(Collidable::aabb(42.0, 42.0, 4.0, 4.0));

    world.step();
    assert_eq!(world.profiler().narrow_phase_tests, 1);
    assert_eq!(world.profiler().contact_count, 1);
}

#[test]
fn cleared_tree_returns_an_empty_item_set() {
    let arena: Arena<Collidable> = Arena::new();
    let bounds = QuadBounds::axis_aligned(Vec2::ZERO, Vec2::new(100.0, 100.0));
    let mut tree = Quadtree::new(bounds, 2);

    tree.clear();
    let mut fired = 0;
    let mut profiler = CollisionProfiler::default();
    let items = tree.check_collisions_profiled(&arena, &mut |_| fired += 1, &mut profiler);
    assert!(items.is_empty());
    assert_eq!(fired, 0);
    assert_eq!(profiler.narrow_phase_tests, 0);
}

#[test]
fn check_collisions_returns_all_items_at_or_below() {
    let bounds = QuadBounds::axis_aligned(Vec2::ZERO, Vec2::new(100.0, 100.0));
    let mut world = CollisionWorld::new(bounds, 2);
    let a = world.add_shape(Collidable::aabb(50.0, 50.0, 20.0, 20.0));
    let b = world.add_shape(Collidable::aabb(20.0, 20.0, 4.0, 4.0));
    let c = world.add_shape(Collidable::circle(80.0, 80.0, 3.0).unwrap());

    let contacts = world.collect_contacts();
    assert!(contacts.is_empty());

    let mut items = world.tree().check_collisions(&world.shapes, |_| {});
    items.sort();
    let mut expected = vec![a, b, c];
    expected.sort();
    assert_eq!(items, expected);
}
