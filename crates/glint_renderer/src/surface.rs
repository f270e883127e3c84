//! Surface trait for ray-object intersection.

use crate::Material;
use glint_math::{Ray, Vec3};

/// Result of a successful surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ray parameter of the hit (always >= 0)
    pub t: f32,
    /// Surface normal at the hit point (unit length, not flipped toward the ray)
    pub normal: Vec3,
}

/// Trait for geometry that rays can hit.
///
/// Implementations report "no hit" through `None`: parallel rays, roots
/// behind the origin and missed quadratics are normal control flow.
pub trait Surface: Send + Sync {
    /// Intersect a ray with this surface.
    ///
    /// Returns the hit parameter and normal, or `None` on a miss.
    /// A returned `t` is never negative.
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit>;

    /// World-space position at parameter `t` along `ray`.
    fn position(&self, ray: &Ray, t: f32) -> Vec3 {
        ray.at(t)
    }

    /// The material this surface owns.
    fn material(&self) -> &Material;
}
