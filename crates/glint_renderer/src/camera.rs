//! Pinhole camera for primary ray generation.

use glint_math::{Ray, Vec3};

/// Pinhole camera with an explicit image plane.
///
/// The basis `(u, v, w)` is orthonormal with `w` pointing away from the view
/// direction. The image plane spans `[left, right] x [bottom, top]` at
/// distance `focal_distance` along `-w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,

    // Image plane bounds
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    focal_distance: f32,

    // Resolution in pixels
    nx: u32,
    ny: u32,
}

impl Camera {
    /// Create a camera at `eye` with an explicit basis.
    ///
    /// Starts with a 0.2 x 0.2 image plane at focal distance 0.1 (a 90 degree
    /// field of view) and a 512 x 512 resolution.
    pub fn new(eye: Vec3, u: Vec3, v: Vec3, w: Vec3) -> Self {
        Self {
            eye,
            u,
            v,
            w,
            left: -0.1,
            right: 0.1,
            bottom: -0.1,
            top: 0.1,
            focal_distance: 0.1,
            nx: 512,
            ny: 512,
        }
    }

    /// Create a camera at `eye` looking toward `target`.
    ///
    /// `up` must not be parallel to the view direction.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let w = (eye - target).normalize();
        let u = up.cross(w).normalize();
        let v = w.cross(u);
        Self::new(eye, u, v, w)
    }

    /// Set the image plane bounds.
    pub fn with_image_plane(mut self, left: f32, right: f32, bottom: f32, top: f32) -> Self {
        self.left = left;
        self.right = right;
        self.bottom = bottom;
        self.top = top;
        self
    }

    /// Set the distance from the eye to the image plane (> 0).
    pub fn with_focal_distance(mut self, d: f32) -> Self {
        self.focal_distance = d;
        self
    }

    /// Set image resolution (both > 0).
    pub fn with_resolution(mut self, nx: u32, ny: u32) -> Self {
        self.nx = nx;
        self.ny = ny;
        self
    }

    /// Horizontal resolution in pixels.
    pub fn width(&self) -> u32 {
        self.nx
    }

    /// Vertical resolution in pixels.
    pub fn height(&self) -> u32 {
        self.ny
    }

    /// Camera position.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Camera basis `(u, v, w)`.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Generate the primary ray through pixel-space location `(i, j)`.
    ///
    /// `(i, j)` may be fractional; integer coordinates address the pixel's
    /// lower-left corner, and the ray passes through `(i + 0.5, j + 0.5)`.
    /// `j = 0` is the bottom row of the image plane.
    pub fn generate_ray(&self, i: f32, j: f32) -> Ray {
        let u_coord = self.left + (self.right - self.left) * (i + 0.5) / self.nx as f32;
        let v_coord = self.bottom + (self.top - self.bottom) * (j + 0.5) / self.ny as f32;
        let direction = self.u * u_coord + self.v * v_coord - self.w * self.focal_distance;
        Ray::new(self.eye, direction)
    }
}

impl Default for Camera {
    /// The reference camera: eye at the origin looking down `-Z`.
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z)
    }
}
