use serde::{Deserialize, Serialize};

/// Common math types re-exported for convenience.
pub use glam::Vec2;

/// Material coefficients attached to a shape.
///
/// The engine stores these and hands them to the resolve handler untouched;
/// detection itself never reads them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub restitution: f32,
    pub inertia: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: 0.1,
            inertia: 1.0,
        }
    }
}

impl Material {
    pub fn rubber() -> Self {
        Self {
            restitution: 0.8,
            inertia: 1.4,
        }
    }

    pub fn steel() -> Self {
        Self {
            restitution: 0.4,
            inertia: 7.8,
        }
    }
}
