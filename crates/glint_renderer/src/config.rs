//! Render settings loaded from JSON.
//!
//! Every field is optional in the file; anything missing falls back to the
//! reference setup (512 x 512, 90 degree view down `-Z`, light at (-4, 4, -3)).

use std::path::{Path, PathBuf};

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Camera, RenderConfig};

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Camera description, convertible to an immutable [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub focal_distance: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            left: -0.1,
            right: 0.1,
            bottom: -0.1,
            top: 0.1,
            focal_distance: 0.1,
            width: 512,
            height: 512,
        }
    }
}

impl CameraConfig {
    /// Build the camera.
    pub fn build(&self) -> Camera {
        Camera::new(self.eye, self.u, self.v, self.w)
            .with_image_plane(self.left, self.right, self.bottom, self.top)
            .with_focal_distance(self.focal_distance)
            .with_resolution(self.width, self.height)
    }
}

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

impl Settings {
    /// Parse and validate settings from a JSON string.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check the preconditions the renderer relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        let camera = &self.camera;
        let render = &self.render;

        require(camera.width > 0, "camera.width", "must be positive")?;
        require(camera.height > 0, "camera.height", "must be positive")?;
        // 8-bit output and the image writers address channels with u32
        require(
            camera
                .width
                .checked_mul(camera.height)
                .and_then(|n| n.checked_mul(3))
                .is_some(),
            "camera.width",
            "width * height * 3 must fit in a u32",
        )?;
        require(
            camera.focal_distance > 0.0,
            "camera.focal_distance",
            "must be positive",
        )?;
        require(camera.left < camera.right, "camera.left", "must be less than camera.right")?;
        require(camera.bottom < camera.top, "camera.bottom", "must be less than camera.top")?;
        for (field, axis) in [("camera.u", camera.u), ("camera.v", camera.v), ("camera.w", camera.w)] {
            require(
                (axis.length() - 1.0).abs() < 1e-3,
                field,
                "must be a unit vector",
            )?;
        }
        require(camera.eye.is_finite(), "camera.eye", "must be finite")?;

        require(
            render.samples_per_pixel > 0,
            "render.samples_per_pixel",
            "must be positive",
        )?;
        require(
            render.gamma.is_finite() && render.gamma > 0.0,
            "render.gamma",
            "must be positive",
        )?;
        require(
            render.shadow_epsilon.is_finite() && render.shadow_epsilon >= 0.0,
            "render.shadow_epsilon",
            "must be non-negative",
        )?;
        require(render.bucket_size > 0, "render.bucket_size", "must be positive")?;
        require(
            render.light.position.is_finite(),
            "render.light.position",
            "must be finite",
        )?;

        Ok(())
    }
}

fn require(ok: bool, field: &'static str, reason: &str) -> ConfigResult<()> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        })
    }
}
