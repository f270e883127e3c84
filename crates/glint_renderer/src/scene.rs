//! Scene container and nearest-hit resolution.

use crate::{Color, Material, Plane, Sphere, Surface};
use glint_math::{Ray, Vec3};

/// Record of the nearest ray-scene intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Ray parameter of the hit
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Surface normal at the intersection (as reported by the surface)
    pub normal: Vec3,
    /// Surface color (the material's diffuse coefficient)
    pub color: Color,
    /// Material of the surface that was hit
    pub material: Material,
}

/// An ordered collection of surfaces.
///
/// Built once, then read-only while rendering. Insertion order only matters
/// as the tie-break between surfaces hit at exactly the same `t`.
#[derive(Default)]
pub struct Scene {
    surfaces: Vec<Box<dyn Surface>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
        }
    }

    /// Add a surface to the scene.
    pub fn add(&mut self, surface: Box<dyn Surface>) {
        self.surfaces.push(surface);
    }

    /// Builder-style [`Scene::add`].
    pub fn with(mut self, surface: impl Surface + 'static) -> Self {
        self.add(Box::new(surface));
        self
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Find the nearest surface hit along `ray`.
    ///
    /// Scans every surface; a later surface only replaces the current best
    /// when its `t` is strictly smaller, so ties go to the first inserted.
    /// Used unchanged for both primary and shadow rays.
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let mut closest_so_far = f32::MAX;
        let mut nearest = None;

        for surface in &self.surfaces {
            let Some(hit) = surface.intersect(ray) else {
                continue;
            };
            if hit.t < closest_so_far {
                closest_so_far = hit.t;
                let material = *surface.material();
                nearest = Some(HitRecord {
                    t: hit.t,
                    position: surface.position(ray, hit.t),
                    normal: hit.normal,
                    color: material.kd,
                    material,
                });
            }
        }

        nearest
    }

    /// The literal four-object scene: a ground plane with red, green and
    /// blue spheres lined up at `z = -7`.
    pub fn reference() -> Self {
        Scene::new()
            .with(Plane::new(
                -2.0,
                Material::matte(Color::splat(0.2), Color::ONE),
            ))
            .with(Sphere::new(
                Vec3::new(-4.0, 0.0, -7.0),
                1.0,
                Material::matte(Color::new(0.2, 0.0, 0.0), Color::new(1.0, 0.0, 0.0)),
            ))
            .with(Sphere::new(
                Vec3::new(0.0, 0.0, -7.0),
                2.0,
                Material::new(
                    Color::new(0.0, 0.2, 0.0),
                    Color::new(0.0, 0.5, 0.0),
                    Color::splat(0.5),
                    32.0,
                ),
            ))
            .with(Sphere::new(
                Vec3::new(4.0, 0.0, -7.0),
                1.0,
                Material::matte(Color::new(0.0, 0.0, 0.2), Color::new(0.0, 0.0, 1.0)),
            ))
    }
}
