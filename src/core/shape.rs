use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Material;
use crate::utils::allocator::ShapeId;

/// Geometry rejected at construction time.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidGeometry {
    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("circle radius must be non-negative, got {0}")]
    NegativeRadius(f32),
}

/// Enumeration of supported shape geometries.
///
/// Polygon normals satisfy `normals.len() == vertices.len()`; normal `i`
/// is the perpendicular of edge `i -> i+1` (wrapping) and is NOT unit
/// length — its magnitude equals the edge length, which weights the
/// penetration depths reported along it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle {
        center: Vec2,
        radius: f32,
    },
    Polygon {
        vertices: Vec<Vec2>,
        normals: Vec<Vec2>,
    },
}

/// A shape registered for collision detection.
///
/// The engine only reads the geometry; `tag` and `material` are carried
/// through to the resolve handler for the caller's own bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collidable {
    /// Arena handle, assigned when the shape is added to a world.
    pub id: ShapeId,
    /// Opaque caller-side identity.
    pub tag: i64,
    pub kind: ShapeKind,
    pub material: Material,
}

/// One perpendicular per edge, wrapping at the last vertex. Deliberately
/// left unnormalized.
fn face_normals(vertices: &[Vec2]) -> Vec<Vec2> {
    let count = vertices.len();
    (0..count)
        .map(|i| {
            let edge = vertices[(i + 1) % count] - vertices[i];
            Vec2::new(edge.y, -edge.x)
        })
        .collect()
}

impl Collidable {
    pub fn circle(x: f32, y: f32, radius: f32) -> Result<Self, InvalidGeometry> {
        if radius < 0.0 {
            return Err(InvalidGeometry::NegativeRadius(radius));
        }
        Ok(Self {
            id: ShapeId::default(),
            tag: 0,
            kind: ShapeKind::Circle {
                center: Vec2::new(x, y),
                radius,
            },
            material: Material::default(),
        })
    }

    pub fn polygon(vertices: Vec<Vec2>) -> Result<Self, InvalidGeometry> {
        if vertices.len() < 3 {
            return Err(InvalidGeometry::TooFewVertices(vertices.len()));
        }
        let normals = face_normals(&vertices);
        Ok(Self {
            id: ShapeId::default(),
            tag: 0,
            kind: ShapeKind::Polygon { vertices, normals },
            material: Material::default(),
        })
    }

    /// Axis-aligned box centred on (x, y), counter-clockwise from the
    /// bottom-left corner.
    pub fn aabb(x: f32, y: f32, w: f32, h: f32) -> Self {
        let (hw, hh) = (w / 2.0, h / 2.0);
        let vertices = vec![
            Vec2::new(x - hw, y - hh),
            Vec2::new(x + hw, y - hh),
            Vec2::new(x + hw, y + hh),
            Vec2::new(x - hw, y + hh),
        ];
        let normals = face_normals(&vertices);
        Self {
            id: ShapeId::default(),
            tag: 0,
            kind: ShapeKind::Polygon { vertices, normals },
            material: Material::default(),
        }
    }

    pub fn with_tag(mut self, tag: i64) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Rotates every vertex about `position` by `angle` (radians) and
    /// recomputes all face normals. No-op for circles.
    pub fn transform_vertices(&mut self, position: Vec2, angle: f32) {
        let ShapeKind::Polygon { vertices, normals } = &mut self.kind else {
            return;
        };
        let rotation = Vec2::from_angle(angle);
        for vertex in vertices.iter_mut() {
            *vertex = position + rotation.rotate(*vertex - position);
        }
        *normals = face_normals(vertices);
    }

    pub fn is_circle(&self) -> bool {
        matches!(self.kind, ShapeKind::Circle { .. })
    }

    pub fn as_circle(&self) -> Option<(Vec2, f32)> {
        match self.kind {
            ShapeKind::Circle { center, radius } => Some((center, radius)),
            ShapeKind::Polygon { .. } => None,
        }
    }

    pub fn vertices(&self) -> &[Vec2] {
        match &self.kind {
            ShapeKind::Circle { .. } => &[],
            ShapeKind::Polygon { vertices, .. } => vertices,
        }
    }

    pub fn normals(&self) -> &[Vec2] {
        match &self.kind {
            ShapeKind::Circle { .. } => &[],
            ShapeKind::Polygon { normals, .. } => normals,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    pub fn tag(&self) -> i64 {
        self.tag
    }

    pub fn restitution(&self) -> f32 {
        self.material.restitution
    }

    pub fn inertia(&self) -> f32 {
        self.material.inertia
    }
}
