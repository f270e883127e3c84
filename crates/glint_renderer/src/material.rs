//! Local-illumination material coefficients.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Ambient, diffuse and specular reflectance of a surface.
///
/// Components are in [0, 1] by convention; nothing enforces it.
/// Materials are plain values, copied into every hit record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    /// Ambient reflectance
    pub ka: Color,
    /// Diffuse reflectance, also the surface's reported color
    pub kd: Color,
    /// Specular reflectance
    pub ks: Color,
    /// Specular exponent (>= 0)
    pub spec_power: f32,
}

impl Material {
    /// Create a new material from its coefficients.
    pub const fn new(ka: Color, kd: Color, ks: Color, spec_power: f32) -> Self {
        Self {
            ka,
            kd,
            ks,
            spec_power,
        }
    }

    /// A purely diffuse material: no specular term.
    pub const fn matte(ka: Color, kd: Color) -> Self {
        Self::new(ka, kd, Color::ZERO, 0.0)
    }
}
