//! Horizontal ground plane.

use crate::{Material, Surface, SurfaceHit};
use glint_math::{Ray, Vec3};

/// An infinite plane `y = height` with a fixed upward normal.
///
/// The normal is never flipped toward the incoming ray, so rays hitting the
/// plane from below still see `+Y`.
#[derive(Debug, Clone)]
pub struct Plane {
    y: f32,
    material: Material,
}

impl Plane {
    /// The plane's normal.
    pub const NORMAL: Vec3 = Vec3::Y;

    /// Create a plane at height `y`.
    pub fn new(y: f32, material: Material) -> Self {
        Self { y, material }
    }

    /// Height of the plane.
    pub fn height(&self) -> f32 {
        self.y
    }
}

impl Surface for Plane {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let dy = ray.direction().y;
        if dy == 0.0 {
            return None;
        }

        let t = (self.y - ray.origin().y) / dy;
        if t < 0.0 {
            return None;
        }

        Some(SurfaceHit {
            t,
            normal: Self::NORMAL,
        })
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
