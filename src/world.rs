use std::time::Instant;

use glam::Vec2;
use log::warn;

use crate::{
    collision::{
        broadphase::{InsertOutcome, QuadBounds, Quadtree, Sweep},
        narrowphase::Contact,
    },
    config::DEFAULT_TICK_BUDGET_MS,
    core::shape::Collidable,
    utils::{
        allocator::{Arena, ShapeId},
        logging::{warn_if_tick_budget_exceeded, ScopedTimer},
        profiling,
        profiling::CollisionProfiler,
    },
};

/// Resolution handler invoked once per detected overlap with the reference
/// shape, the incident shape, the reference face (`None` for circle/circle
/// pairs) and the support point.
pub type ResolveFn = dyn FnMut(&mut Collidable, &mut Collidable, Option<usize>, Vec2);

/// Central simulation container owning the shapes and the spatial
/// partition.
///
/// One `step()` per simulation tick: the tree is cleared, every live shape
/// re-inserted, the tree swept once, and the registered resolve handler
/// invoked per contact. Detection completes before resolution runs, so
/// handler mutations are never re-validated within the same tick.
pub struct CollisionWorld {
    pub shapes: Arena<Collidable>,
    tree: Quadtree,
    resolve: Option<Box<ResolveFn>>,
    profiler: CollisionProfiler,
    parallel_enabled: bool,
}

impl CollisionWorld {
    pub fn new(bounds: QuadBounds, depth: usize) -> Self {
        Self {
            shapes: Arena::new(),
            tree: Quadtree::new(bounds, depth),
            resolve: None,
            profiler: CollisionProfiler::default(),
            parallel_enabled: false,
        }
    }

    /// Adds a shape to the world and returns its generated [`ShapeId`].
    pub fn add_shape(&mut self, shape: Collidable) -> ShapeId {
        let id = self.shapes.insert(shape);
        if let Some(stored) = self.shapes.get_mut(id) {
            stored.id = id;
        }
        id
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Collidable> {
        self.shapes.remove(id)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Collidable> {
        self.shapes.get(id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Collidable> {
        self.shapes.get_mut(id)
    }

    /// Registers the resolution handler. Without one, detected overlaps
    /// are dropped with a warning; detection itself still runs.
    pub fn set_resolve<F>(&mut self, resolve: F)
    where
        F: FnMut(&mut Collidable, &mut Collidable, Option<usize>, Vec2) + 'static,
    {
        self.resolve = Some(Box::new(resolve));
    }

    /// Enables or disables parallel subtree sweeps (requires the
    /// `parallel` feature; a no-op flag otherwise).
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    /// Timing and counter data from the most recent `step()`.
    pub fn profiler(&self) -> &CollisionProfiler {
        &self.profiler
    }

    pub fn tree(&self) -> &Quadtree {
        &self.tree
    }

    /// Collects contacts for the current world state without resolving
    /// them. Useful for debugging and tests.
    pub fn collect_contacts(&mut self) -> Vec<Contact> {
        rebuild(&mut self.tree, &self.shapes);
        run_sweep(&self.tree, &self.shapes, self.parallel_enabled).contacts
    }

    /// Runs one full collision tick: clear, re-insert, sweep, resolve.
    pub fn step(&mut self) {
        self.profiler.reset();
        let tick_start = Instant::now();

        let (inserted, dropped) = {
            let _trace = ScopedTimer::new("broadphase::rebuild");
            let _timer = profiling::ScopedTimer::new(&mut self.profiler.broad_phase_time);
            rebuild(&mut self.tree, &self.shapes)
        };
        self.profiler.shape_count = inserted;
        self.profiler.dropped_count = dropped;

        let sweep = {
            let _trace = ScopedTimer::new("narrowphase::sweep");
            let _timer = profiling::ScopedTimer::new(&mut self.profiler.narrow_phase_time);
            run_sweep(&self.tree, &self.shapes, self.parallel_enabled)
        };
        self.profiler.narrow_phase_tests = sweep.tests;
        self.profiler.contact_count = sweep.contacts.len();

        {
            let _trace = ScopedTimer::new("resolve::dispatch");
            let _timer = profiling::ScopedTimer::new(&mut self.profiler.resolve_time);
            match self.resolve.as_mut() {
                Some(resolve) => {
                    for contact in &sweep.contacts {
                        if let Some((reference, incident)) =
                            self.shapes.get2_mut(contact.reference, contact.incident)
                        {
                            resolve(reference, incident, contact.face, contact.support);
                        }
                    }
                }
                None => {
                    if !sweep.contacts.is_empty() {
                        warn!(
                            "{} collision(s) detected but unresolved; no resolve handler registered",
                            sweep.contacts.len()
                        );
                    }
                }
            }
        }

        self.profiler.total_tick_time = tick_start.elapsed();
        warn_if_tick_budget_exceeded(self.profiler.total_tick_time, DEFAULT_TICK_BUDGET_MS);
    }
}

/// Clears the tree and re-inserts every live shape. Returns how many were
/// stored and how many fell outside the world bound.
fn rebuild(tree: &mut Quadtree, shapes: &Arena<Collidable>) -> (usize, usize) {
    tree.clear();
    let mut inserted = 0;
    let mut dropped = 0;
    for id in shapes.ids() {
        let shape = match shapes.get(id) {
            Some(shape) => shape,
            None => continue,
        };
        match tree.insert(shape) {
            InsertOutcome::Stored => inserted += 1,
            InsertOutcome::OutOfBounds => {
                warn!(
                    "shape {:?} (tag {}) does not fit the world bound; skipped this tick",
                    id, shape.tag
                );
                dropped += 1;
            }
        }
    }
    (inserted, dropped)
}

fn run_sweep(tree: &Quadtree, shapes: &Arena<Collidable>, parallel: bool) -> Sweep {
    #[cfg(feature = "parallel")]
    if parallel {
        return tree.par_sweep(shapes);
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    tree.sweep(shapes)
}
