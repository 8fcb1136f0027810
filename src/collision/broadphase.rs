use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::narrowphase::{Contact, NarrowPhase};
use super::queries::{polygon_contains_point, polygon_contains_polygon, polygon_distance_to_point};
use crate::core::shape::{Collidable, ShapeKind};
use crate::utils::allocator::{Arena, ShapeId};
use crate::utils::profiling::CollisionProfiler;

/// Four-corner quad bound of a quadtree node, wound corner 0 -> 1 -> 2 -> 3.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuadBounds {
    corners: [Vec2; 4],
}

impl QuadBounds {
    pub fn new(corners: [Vec2; 4]) -> Self {
        Self { corners }
    }

    /// Axis-aligned bound, counter-clockwise from the bottom-left corner.
    pub fn axis_aligned(min: Vec2, max: Vec2) -> Self {
        Self::new([
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ])
    }

    pub fn corners(&self) -> &[Vec2; 4] {
        &self.corners
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        polygon_contains_point(&self.corners, point)
    }

    /// Distance from `point` to the bound's boundary.
    pub fn boundary_distance(&self, point: Vec2) -> f32 {
        polygon_distance_to_point(&self.corners, point)
    }

    pub fn contains_polygon(&self, vertices: &[Vec2]) -> bool {
        polygon_contains_polygon(&self.corners, vertices)
    }

    /// Full containment: the center lies inside and the boundary is at
    /// least `radius` away.
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        self.contains_point(center) && self.boundary_distance(center) >= radius
    }

    /// The four equal child quads, computed from edge midpoints and the
    /// centroid. Fixed order: the quadrant sharing corner 0, then corner 3,
    /// then corner 2, then corner 1 (SW, NW, NE, SE for an axis-aligned
    /// bound wound counter-clockwise from the bottom-left).
    pub fn split(&self) -> [QuadBounds; 4] {
        let [a, b, c, d] = self.corners;
        let ab = (a + b) / 2.0;
        let bc = (b + c) / 2.0;
        let cd = (c + d) / 2.0;
        let da = (d + a) / 2.0;
        let center = (a + b + c + d) / 4.0;
        [
            QuadBounds::new([a, ab, center, da]),
            QuadBounds::new([da, center, cd, d]),
            QuadBounds::new([center, bc, c, cd]),
            QuadBounds::new([ab, b, bc, center]),
        ]
    }
}

/// Whether an inserted shape found a node that fully contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Stored,
    /// The shape does not fit the tree's outer bound; it will not take
    /// part in this tick's sweep. Reportable, never fatal.
    OutOfBounds,
}

impl InsertOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, InsertOutcome::Stored)
    }
}

/// Items and contacts gathered by a collecting sweep.
#[derive(Debug, Default)]
pub struct Sweep {
    pub items: Vec<ShapeId>,
    pub contacts: Vec<Contact>,
    pub tests: usize,
}

impl Sweep {
    fn test_pair(&mut self, shapes: &Arena<Collidable>, id_a: ShapeId, id_b: ShapeId) {
        let (Some(a), Some(b)) = (shapes.get(id_a), shapes.get(id_b)) else {
            debug_assert!(false, "stale shape id in quadtree: {id_a:?} / {id_b:?}");
            return;
        };
        self.tests += 1;
        if let Some(contact) = NarrowPhase::test(a, b) {
            self.contacts.push(contact);
        }
    }
}

/// Recursive 4-way spatial partition over caller-owned shapes.
///
/// The full 4^depth tree is allocated up front; occupancy only changes the
/// per-node item lists. Each item is stored at the smallest node whose
/// bound fully contains it, so two items that land in different sibling
/// subtrees can never overlap and are never narrow-phase tested.
pub struct Quadtree {
    bounds: QuadBounds,
    children: Vec<Quadtree>,
    items: Vec<ShapeId>,
}

impl Quadtree {
    /// Eagerly builds the subdivision down to `depth`; depth 0 is a
    /// childless leaf.
    pub fn new(bounds: QuadBounds, depth: usize) -> Self {
        let children = if depth > 0 {
            bounds
                .split()
                .into_iter()
                .map(|child_bounds| Quadtree::new(child_bounds, depth - 1))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            bounds,
            children,
            items: Vec::new(),
        }
    }

    pub fn bounds(&self) -> &QuadBounds {
        &self.bounds
    }

    pub fn children(&self) -> &[Quadtree] {
        &self.children
    }

    pub fn items(&self) -> &[ShapeId] {
        &self.items
    }

    /// Empties every node's item list without touching the structure.
    /// Idempotent.
    pub fn clear(&mut self) {
        for child in &mut self.children {
            child.clear();
        }
        self.items.clear();
    }

    /// Places `item.id` at the smallest node fully containing the shape:
    /// children are probed in fixed order first, then the node's own
    /// bound, identically at every level.
    pub fn insert(&mut self, item: &Collidable) -> InsertOutcome {
        debug_assert!(!item.id.is_null(), "inserting a shape without an arena id");
        match &item.kind {
            ShapeKind::Circle { center, radius } => {
                for child in &mut self.children {
                    if child.bounds.contains_circle(*center, *radius) {
                        return child.insert(item);
                    }
                }
                if self.bounds.contains_circle(*center, *radius) {
                    self.items.push(item.id);
                    InsertOutcome::Stored
                } else {
                    InsertOutcome::OutOfBounds
                }
            }
            ShapeKind::Polygon { vertices, .. } => {
                for child in &mut self.children {
                    if child.bounds.contains_polygon(vertices) {
                        return child.insert(item);
                    }
                }
                if self.bounds.contains_polygon(vertices) {
                    self.items.push(item.id);
                    InsertOutcome::Stored
                } else {
                    InsertOutcome::OutOfBounds
                }
            }
        }
    }

    /// Depth-first sweep: tests every item returned by a child subtree
    /// against the items stored at this node, then this node's items
    /// pairwise, invoking `on_contact` for each detected overlap. Returns
    /// all items at or below this node.
    pub fn check_collisions<F>(&self, shapes: &Arena<Collidable>, mut on_contact: F) -> Vec<ShapeId>
    where
        F: FnMut(Contact),
    {
        let mut profiler = CollisionProfiler::default();
        self.check_collisions_profiled(shapes, &mut on_contact, &mut profiler)
    }

    /// Same sweep with test/contact counters threaded through.
    pub fn check_collisions_profiled(
        &self,
        shapes: &Arena<Collidable>,
        on_contact: &mut dyn FnMut(Contact),
        profiler: &mut CollisionProfiler,
    ) -> Vec<ShapeId> {
        let mut all_items = Vec::new();
        for child in &self.children {
            let child_items = child.check_collisions_profiled(shapes, on_contact, profiler);
            for &sub_item in &child_items {
                for &own_item in &self.items {
                    Self::test_pair(shapes, own_item, sub_item, on_contact, profiler);
                }
            }
            all_items.extend(child_items);
        }
        for (i, &item_a) in self.items.iter().enumerate() {
            for &item_b in &self.items[i + 1..] {
                Self::test_pair(shapes, item_a, item_b, on_contact, profiler);
            }
        }
        all_items.extend_from_slice(&self.items);
        all_items
    }

    fn test_pair(
        shapes: &Arena<Collidable>,
        id_a: ShapeId,
        id_b: ShapeId,
        on_contact: &mut dyn FnMut(Contact),
        profiler: &mut CollisionProfiler,
    ) {
        let (Some(a), Some(b)) = (shapes.get(id_a), shapes.get(id_b)) else {
            debug_assert!(false, "stale shape id in quadtree: {id_a:?} / {id_b:?}");
            return;
        };
        profiler.narrow_phase_tests += 1;
        if let Some(contact) = NarrowPhase::test(a, b) {
            profiler.contact_count += 1;
            on_contact(contact);
        }
    }

    /// Collecting sweep over the whole tree.
    pub fn sweep(&self, shapes: &Arena<Collidable>) -> Sweep {
        let mut sweep = Sweep::default();
        for child in &self.children {
            let child_sweep = child.sweep(shapes);
            self.merge_child(shapes, &mut sweep, child_sweep);
        }
        self.own_pairs(shapes, &mut sweep);
        sweep
    }

    /// Collecting sweep with the four child subtrees traversed in
    /// parallel. Contacts come back in child order, so the result matches
    /// the sequential sweep; handler dispatch stays with the caller.
    #[cfg(feature = "parallel")]
    pub fn par_sweep(&self, shapes: &Arena<Collidable>) -> Sweep {
        use rayon::prelude::*;

        let mut sweep = Sweep::default();
        let child_sweeps: Vec<Sweep> = self
            .children
            .par_iter()
            .map(|child| child.par_sweep(shapes))
            .collect();
        for child_sweep in child_sweeps {
            self.merge_child(shapes, &mut sweep, child_sweep);
        }
        self.own_pairs(shapes, &mut sweep);
        sweep
    }

    fn merge_child(&self, shapes: &Arena<Collidable>, sweep: &mut Sweep, child_sweep: Sweep) {
        sweep.tests += child_sweep.tests;
        sweep.contacts.extend(child_sweep.contacts);
        for &sub_item in &child_sweep.items {
            for &own_item in &self.items {
                sweep.test_pair(shapes, own_item, sub_item);
            }
        }
        sweep.items.extend(child_sweep.items);
    }

    fn own_pairs(&self, shapes: &Arena<Collidable>, sweep: &mut Sweep) {
        for (i, &item_a) in self.items.iter().enumerate() {
            for &item_b in &self.items[i + 1..] {
                sweep.test_pair(shapes, item_a, item_b);
            }
        }
        sweep.items.extend_from_slice(&self.items);
    }
}
