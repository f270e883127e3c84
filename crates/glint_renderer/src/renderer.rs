//! Core Whitted-style renderer.
//!
//! Implements local illumination ray casting with:
//! - A single point light with hard shadows
//! - Ambient, diffuse and specular (reflection vector) terms
//! - Gamma correction
//! - Anti-aliasing via jittered multi-sampling

use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::sampling::{pixel_jitter, stream_rng};
use crate::{Camera, Color, HitRecord, Scene};
use glint_math::{Interval, Ray, Vec3};
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Sample count of the antialiased variant.
pub const ANTIALIAS_SAMPLES: u32 = 64;

/// A point light with an ambient term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLight {
    /// World-space position of the light
    pub position: Vec3,
    /// Ambient light intensity (Ia)
    pub ambient: Color,
    /// Point light intensity (Il)
    pub intensity: Color,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(-4.0, 4.0, -3.0),
            ambient: Color::ONE,
            intensity: Color::ONE,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel; 1 disables jitter
    pub samples_per_pixel: u32,
    /// Display gamma; channels are raised to `1 / gamma`
    pub gamma: f32,
    /// Offset along the light direction applied to shadow ray origins
    pub shadow_epsilon: f32,
    /// The scene's only light
    pub light: PointLight,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
    /// Seed for sample jitter; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: ANTIALIAS_SAMPLES,
            gamma: 2.2,
            shadow_epsilon: 0.001,
            light: PointLight::default(),
            bucket_size: crate::bucket::DEFAULT_BUCKET_SIZE,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Configuration of the single-sample, unjittered variant.
    pub fn aliased() -> Self {
        Self {
            samples_per_pixel: 1,
            ..Self::default()
        }
    }
}

/// Returns true if anything along the ray from `position` toward the light
/// blocks it.
///
/// The search is not bounded by the light's distance: a surface beyond the
/// light still shadows.
pub fn in_shadow(scene: &Scene, position: Vec3, light_dir: Vec3, epsilon: f32) -> bool {
    let shadow_ray = Ray::new(position + epsilon * light_dir, light_dir);
    scene.intersect(&shadow_ray).is_some()
}

/// Shade a hit with the local illumination model.
///
/// Returns `ambient + diffuse + specular` clamped to [0, 1] per channel.
/// Diffuse and specular vanish when the point is in shadow.
pub fn shade(scene: &Scene, ray: &Ray, hit: &HitRecord, config: &RenderConfig) -> Color {
    let light = &config.light;
    let material = &hit.material;
    let normal = hit.normal;

    let light_dir = (light.position - hit.position).normalize();
    let shadowed = in_shadow(scene, hit.position, light_dir, config.shadow_epsilon);

    let ambient = material.ka * light.ambient;
    let mut color = ambient;

    if !shadowed {
        let n_dot_l = normal.dot(light_dir);
        let view = (-ray.direction()).normalize();
        let reflected = (2.0 * n_dot_l * normal - light_dir).normalize();

        let diffuse = material.kd * light.intensity * n_dot_l.max(0.0);
        let specular =
            material.ks * light.intensity * reflected.dot(view).max(0.0).powf(material.spec_power);
        color += diffuse + specular;
    }

    clamp_color(color)
}

/// Linear color of the scene along a primary ray; black on a miss.
pub fn trace(ray: &Ray, scene: &Scene, config: &RenderConfig) -> Color {
    match scene.intersect(ray) {
        Some(hit) => shade(scene, ray, &hit, config),
        None => Color::ZERO,
    }
}

/// Clamp each channel to [0, 1].
#[inline]
pub fn clamp_color(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Apply gamma correction: each channel becomes `channel^(1/gamma)`.
#[inline]
pub fn gamma_correct(color: Color, gamma: f32) -> Color {
    let inv = 1.0 / gamma;
    Color::new(color.x.powf(inv), color.y.powf(inv), color.z.powf(inv))
}

/// Render a single pixel with multi-sampling.
///
/// Every sample is gamma corrected before it is averaged.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.samples_per_pixel;
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let (rx, ry) = pixel_jitter(samples, rng);
        let ray = camera.generate_ray(i as f32 + rx - 0.5, j as f32 + ry - 0.5);
        let sample = trace(&ray, scene, config);
        pixel_color += gamma_correct(sample, config.gamma);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Number of f32 channels in a `width x height` RGB image.
#[inline]
fn channel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Finished image: `width * height` RGB triples of f32.
///
/// Row-major with `j` outer; row 0 is the bottom of the image plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; channel_count(width, height)],
        }
    }

    #[inline]
    fn offset(&self, i: u32, j: u32) -> usize {
        (j as usize * self.width as usize + i as usize) * 3
    }

    /// Get the pixel at column `i`, row `j`.
    pub fn pixel(&self, i: u32, j: u32) -> Color {
        let o = self.offset(i, j);
        Color::new(self.data[o], self.data[o + 1], self.data[o + 2])
    }

    /// Set the pixel at column `i`, row `j`.
    pub fn set(&mut self, i: u32, j: u32, color: Color) {
        let o = self.offset(i, j);
        self.data[o..o + 3].copy_from_slice(&color.to_array());
    }

    /// Copy a rendered bucket into its slots.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (k, color) in result.pixels.iter().enumerate() {
            let local_x = k as u32 % bucket.width;
            let local_y = k as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Number of floats in the buffer (`width * height * 3`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat RGB float data.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Take ownership of the flat RGB float data.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Convert to 8-bit RGB with the top row first (for saving to disk).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len());
        for j in (0..self.height).rev() {
            let start = self.offset(0, j);
            let end = start + self.width as usize * 3;
            bytes.extend(
                self.data[start..end]
                    .iter()
                    .map(|&c| (255.0 * Interval::UNIT.clamp(c)) as u8),
            );
        }
        bytes
    }
}

/// Render the entire scene to a pixel buffer.
///
/// Buckets are rendered in parallel and copied into disjoint regions of the
/// buffer after all of them finish. The output size comes from the camera.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> PixelBuffer {
    let width = camera.width();
    let height = camera.height();
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp, {} surfaces, {} buckets",
        width,
        height,
        config.samples_per_pixel,
        scene.len(),
        buckets.len()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = stream_rng(config.seed, bucket.index);
            let pixels = render_bucket(bucket, camera, scene, config, &mut rng);
            log::debug!(
                "Bucket {} done ({}x{} at {},{})",
                bucket.index,
                bucket.width,
                bucket.height,
                bucket.x,
                bucket.y
            );
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = PixelBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn green_sphere_scene() -> Scene {
        Scene::new().with(Sphere::new(
            Vec3::new(0.0, 0.0, -7.0),
            2.0,
            Material::new(
                Color::new(0.0, 0.2, 0.0),
                Color::new(0.0, 0.5, 0.0),
                Color::splat(0.5),
                32.0,
            ),
        ))
    }

    fn small_camera(n: u32) -> Camera {
        Camera::default().with_resolution(n, n)
    }

    #[test]
    fn test_gamma_correct() {
        let c = gamma_correct(Color::new(0.0, 1.0, 0.25), 2.0);
        assert_eq!(c.x, 0.0);
        assert!((c.y - 1.0).abs() < 1e-6);
        assert!((c.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_shading_is_clamped() {
        // Every coefficient at 1 drives the unclamped sum above 1
        let hot = Material::new(Color::ONE, Color::ONE, Color::ONE, 1.0);
        let scene = Scene::new().with(Plane::new(-2.0, hot));
        let config = RenderConfig {
            light: PointLight {
                position: Vec3::new(0.0, 4.0, 0.0),
                ..PointLight::default()
            },
            ..RenderConfig::aliased()
        };

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Y);
        let hit = scene.intersect(&ray).unwrap();
        let color = shade(&scene, &ray, &hit, &config);
        assert_eq!(color, Color::ONE);
    }

    #[test]
    fn test_shadowed_point_gets_only_ambient() {
        let ground = Material::matte(Color::splat(0.2), Color::ONE);
        let blocker = Material::matte(Color::ZERO, Color::ZERO);
        let scene = Scene::new()
            .with(Plane::new(-2.0, ground))
            .with(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.5, blocker));
        let config = RenderConfig {
            light: PointLight {
                position: Vec3::new(0.0, 4.0, 0.0),
                ..PointLight::default()
            },
            ..RenderConfig::aliased()
        };

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Y);
        let color = trace(&ray, &scene, &config);
        assert!((color - Color::splat(0.2)).length() < 1e-5);
    }

    #[test]
    fn test_occluder_beyond_light_still_shadows() {
        let ground = Material::matte(Color::splat(0.2), Color::ONE);
        let scene = Scene::new()
            .with(Plane::new(-2.0, ground))
            .with(Sphere::new(Vec3::new(0.0, 10.0, 0.0), 1.0, Material::default()));
        let light = Vec3::new(0.0, 4.0, 0.0);

        let floor_point = Vec3::new(0.0, -2.0, 0.0);
        let light_dir = (light - floor_point).normalize();
        assert!(in_shadow(&scene, floor_point, light_dir, 0.001));

        let open_scene = Scene::new().with(Plane::new(-2.0, ground));
        assert!(!in_shadow(&open_scene, floor_point, light_dir, 0.001));
    }

    #[test]
    fn test_lit_plane_matches_lambert() {
        let ground = Material::matte(Color::splat(0.2), Color::splat(0.5));
        let scene = Scene::new().with(Plane::new(-2.0, ground));
        let config = RenderConfig {
            light: PointLight {
                position: Vec3::new(0.0, 4.0, 0.0),
                ..PointLight::default()
            },
            ..RenderConfig::aliased()
        };

        // Light straight above: n.l = 1, so 0.2 + 0.5
        let color = trace(&Ray::new(Vec3::ZERO, Vec3::NEG_Y), &scene, &config);
        assert!((color - Color::splat(0.7)).length() < 1e-5);
    }

    #[test]
    fn test_specular_highlight_follows_reflection_vector() {
        let shiny = Material::new(Color::ZERO, Color::ZERO, Color::splat(0.5), 8.0);
        let scene = Scene::new().with(Plane::new(-2.0, shiny));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Y);
        let hit = scene.intersect(&ray).unwrap();
        let lit_from = |position: Vec3| RenderConfig {
            light: PointLight {
                position,
                ..PointLight::default()
            },
            ..RenderConfig::aliased()
        };

        // Light straight above: R is parallel to V
        let color = shade(&scene, &ray, &hit, &lit_from(Vec3::new(0.0, 4.0, 0.0)));
        assert!((color - Color::splat(0.5)).length() < 1e-5);

        // L = (0.6, 0.8, 0) so R = (-0.6, 0.8, 0) and R.V = 0.8
        let color = shade(&scene, &ray, &hit, &lit_from(Vec3::new(3.0, 2.0, 0.0)));
        let expected = 0.5 * 0.8f32.powi(8);
        assert!((color - Color::splat(expected)).length() < 1e-5);
    }

    #[test]
    fn test_center_pixel_is_green() {
        let camera = small_camera(64);
        let scene = green_sphere_scene();
        let config = RenderConfig::aliased();
        let mut rng = StdRng::seed_from_u64(1);

        let color = render_pixel(&camera, &scene, 32, 32, &config, &mut rng);
        assert!(color.length() > 0.0);
        assert!(color.y > 0.5);
        assert!(color.x < 0.01 && color.z < 0.01);
    }

    #[test]
    fn test_corner_pixel_is_black() {
        let camera = small_camera(64);
        let scene = green_sphere_scene();
        let config = RenderConfig::aliased();
        let mut rng = StdRng::seed_from_u64(1);

        for (i, j) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            let color = render_pixel(&camera, &scene, i, j, &config, &mut rng);
            assert_eq!(color, Color::ZERO);
        }
    }

    #[test]
    fn test_buffer_layout() {
        let camera = small_camera(8).with_resolution(8, 4);
        let image = render(&camera, &green_sphere_scene(), &RenderConfig::aliased());

        assert_eq!(image.width, 8);
        assert_eq!(image.height, 4);
        assert_eq!(image.len(), 8 * 4 * 3);
        assert!(image.as_slice().iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn test_render_is_idempotent_without_jitter() {
        let camera = small_camera(32);
        let scene = Scene::reference();
        let config = RenderConfig::aliased();

        let a = render(&camera, &scene, &config);
        let b = render(&camera, &scene, &config);
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_bucketed_render_matches_serial_pass() {
        let camera = small_camera(24);
        let scene = Scene::reference();
        let config = RenderConfig {
            bucket_size: 7,
            ..RenderConfig::aliased()
        };

        let image = render(&camera, &scene, &config);

        let mut rng = StdRng::seed_from_u64(0);
        let mut serial = Vec::new();
        for j in 0..24 {
            for i in 0..24 {
                let c = render_pixel(&camera, &scene, i, j, &config, &mut rng);
                serial.extend_from_slice(&c.to_array());
            }
        }
        assert_eq!(image.as_slice(), serial.as_slice());
    }

    #[test]
    fn test_seeded_antialiased_render_is_reproducible() {
        let camera = small_camera(16);
        let scene = Scene::reference();
        let config = RenderConfig {
            samples_per_pixel: 8,
            seed: Some(1234),
            bucket_size: 5,
            ..RenderConfig::default()
        };

        let a = render(&camera, &scene, &config);
        let b = render(&camera, &scene, &config);
        assert_eq!(a, b);
        assert!(a.as_slice().iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn test_antialiased_interior_converges_to_unjittered() {
        let camera = small_camera(64);
        let scene = green_sphere_scene();
        let mut rng = StdRng::seed_from_u64(99);

        let reference = render_pixel(&camera, &scene, 32, 32, &RenderConfig::aliased(), &mut rng);
        let config = RenderConfig {
            samples_per_pixel: 256,
            ..RenderConfig::default()
        };
        let averaged = render_pixel(&camera, &scene, 32, 32, &config, &mut rng);

        assert!((averaged - reference).abs().max_element() < 0.02);
    }

    #[test]
    fn test_antialiasing_softens_silhouette() {
        let camera = small_camera(64);
        let scene = green_sphere_scene();
        let config = RenderConfig {
            samples_per_pixel: 64,
            seed: Some(5),
            ..RenderConfig::default()
        };

        // Any hit pixel is at least the gamma-corrected ambient term,
        // 0.2^(1/2.2) ~ 0.48, so only partial coverage lands in between.
        let partial = |image: &PixelBuffer| {
            (0..64).any(|i| {
                let g = image.pixel(i, 32).y;
                g > 0.0 && g < 0.45
            })
        };

        let aliased = render(&camera, &scene, &RenderConfig::aliased());
        let antialiased = render(&camera, &scene, &config);
        assert!(!partial(&aliased));
        assert!(partial(&antialiased));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_channel_count_does_not_wrap_in_u32() {
        assert_eq!(channel_count(40000, 40000), 4_800_000_000);
    }

    #[test]
    fn test_offset_of_last_pixel() {
        let image = PixelBuffer::new(7, 5);
        assert_eq!(image.offset(6, 4), image.len() - 3);
    }

    #[test]
    fn test_to_rgb8_flips_rows() {
        let mut image = PixelBuffer::new(2, 2);
        image.set(0, 0, Color::new(1.0, 0.0, 0.0)); // bottom-left
        image.set(1, 1, Color::new(0.0, 0.0, 1.0)); // top-right

        let bytes = image.to_rgb8();
        assert_eq!(bytes.len(), 12);
        // Top row first: top-right pixel is the second triple
        assert_eq!(&bytes[3..6], &[0, 0, 255]);
        // Bottom row last: bottom-left pixel is the third triple
        assert_eq!(&bytes[6..9], &[255, 0, 0]);
    }
}
