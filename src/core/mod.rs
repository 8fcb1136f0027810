//! Core types describing collidable shapes and shared data.

pub mod shape;
pub mod types;

pub use shape::{Collidable, InvalidGeometry, ShapeKind};
pub use types::Material;
