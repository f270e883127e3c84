//! Sphere primitive for ray casting.

use crate::{Material, Surface, SurfaceHit};
use glint_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. `radius` must be positive.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Center point of the sphere.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Radius of the sphere.
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Surface for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().dot(ray.direction());
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Only the near root is considered; an origin inside the sphere misses.
        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if t < 0.0 {
            return None;
        }

        let hit_point = ray.at(t);
        Some(SurfaceHit {
            t,
            normal: (hit_point - self.center).normalize(),
        })
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
