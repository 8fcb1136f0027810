//! Collision detection modules: geometric queries, narrow phase, and the
//! quadtree broad phase.

pub mod broadphase;
pub mod narrowphase;
pub mod queries;

pub use broadphase::{InsertOutcome, QuadBounds, Quadtree, Sweep};
pub use narrowphase::{Contact, NarrowPhase, Penetration, SatProbe};
pub use queries::{ClosestEdgePoint, LineSegment};
