//! Utility helpers including the shape arena, logging, and profiling.

pub mod allocator;
pub mod logging;
pub mod profiling;

pub use allocator::{Arena, ShapeId};
pub use profiling::CollisionProfiler;
