//! Collide2D – quadtree-accelerated 2D collision detection for Rust.
//!
//! This crate determines which pairs of moving shapes currently overlap
//! and hands each overlapping pair to a caller-supplied resolver. It
//! combines a small geometric query library (separating-axis probes,
//! containment and distance tests) with an eagerly subdivided quadtree
//! that prunes the pairwise narrow phase down to spatially relevant
//! pairs.

pub mod collision;
pub mod config;
pub mod core;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use crate::collision::{
    broadphase::{InsertOutcome, QuadBounds, Quadtree, Sweep},
    narrowphase::{Contact, NarrowPhase, Penetration, SatProbe},
    queries::{ClosestEdgePoint, LineSegment},
};
pub use crate::core::{
    shape::{Collidable, InvalidGeometry, ShapeKind},
    types::Material,
};
pub use crate::utils::allocator::{Arena, ShapeId};
pub use crate::utils::profiling::CollisionProfiler;
pub use crate::world::CollisionWorld;

use crate::config::{DEFAULT_TREE_DEPTH, DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};

/// High-level convenience wrapper that owns a [`CollisionWorld`].
pub struct CollisionEngine {
    world: CollisionWorld,
}

impl CollisionEngine {
    /// Creates a new engine over the given world bound and tree depth.
    pub fn new(bounds: QuadBounds, depth: usize) -> Self {
        Self {
            world: CollisionWorld::new(bounds, depth),
        }
    }

    /// Engine spanning the default world extent at the default depth.
    pub fn with_defaults() -> Self {
        let bounds = QuadBounds::axis_aligned(
            Vec2::ZERO,
            Vec2::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT),
        );
        Self::new(bounds, DEFAULT_TREE_DEPTH)
    }

    /// Adds a shape to the world and returns its generated [`ShapeId`].
    pub fn add_shape(&mut self, shape: Collidable) -> ShapeId {
        self.world.add_shape(shape)
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Collidable> {
        self.world.remove_shape(id)
    }

    /// Registers the resolution handler invoked once per detected overlap.
    pub fn set_resolve<F>(&mut self, resolve: F)
    where
        F: FnMut(&mut Collidable, &mut Collidable, Option<usize>, Vec2) + 'static,
    {
        self.world.set_resolve(resolve);
    }

    /// Runs one collision tick.
    pub fn step(&mut self) {
        self.world.step();
    }

    /// Enables or disables parallel subtree sweeps.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.world.set_parallel_enabled(enabled);
    }

    /// Returns whether the engine is currently using parallel sweeps.
    pub fn parallel_enabled(&self) -> bool {
        self.world.parallel_enabled()
    }

    /// Immutable access to a shape by id.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Collidable> {
        self.world.shape(id)
    }

    /// Mutable access to a shape by id.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Collidable> {
        self.world.shape_mut(id)
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut CollisionWorld {
        &mut self.world
    }
}

impl Default for CollisionEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
