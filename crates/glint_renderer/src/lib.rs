//! Glint Renderer - CPU Whitted-style ray casting
//!
//! Casts primary rays from a pinhole camera into a small analytic scene and
//! shades the nearest hit with ambient, diffuse and specular terms from a
//! single point light, with hard shadows and optional jittered supersampling.
//!
//! The output is a flat buffer of gamma-corrected RGB floats; presenting it
//! is left to the caller.

mod bucket;
mod camera;
mod config;
mod material;
mod plane;
mod renderer;
mod sampling;
mod scene;
mod sphere;
mod surface;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use config::{CameraConfig, ConfigError, ConfigResult, Settings};
pub use material::{Color, Material};
pub use plane::Plane;
pub use renderer::{
    clamp_color, gamma_correct, in_shadow, render, render_pixel, shade, trace, PixelBuffer,
    PointLight, RenderConfig, ANTIALIAS_SAMPLES,
};
pub use sampling::{gen_f32, pixel_jitter, stream_rng};
pub use scene::{HitRecord, Scene};
pub use sphere::Sphere;
pub use surface::{Surface, SurfaceHit};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};
