//! Perspective camera for the particle variant.
//!
//! Kept free of platform APIs; the web painter only ever sees the
//! screen-space output of [`Camera::project`].

use crate::constants::*;
use glam::{Mat4, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// A world point mapped onto the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Pixel coordinates, origin top-left.
    pub x: f32,
    pub y: f32,
    /// Normalized device coordinates of the same point.
    pub ndc: Vec3,
    /// Distance along the view direction, used for perspective sizing.
    pub depth: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn with_aspect(aspect: f32) -> Self {
        Self {
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            ..Self::default()
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Map normalized device coordinates back into world space.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        let inv = self.view_projection().inverse();
        let p = inv * Vec4::new(ndc.x, ndc.y, ndc.z, 1.0);
        p.truncate() / p.w
    }

    /// Project a world point onto a `width` x `height` pixel surface.
    /// Points behind the camera yield `None`.
    pub fn project(&self, world: Vec3, width: f32, height: f32) -> Option<Projected> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Projected {
            x: (ndc.x * 0.5 + 0.5) * width,
            y: (1.0 - (ndc.y * 0.5 + 0.5)) * height,
            ndc,
            depth: clip.w,
        })
    }

    /// Pixels covered by one world unit at `depth` for a surface `height`
    /// pixels tall.
    pub fn pixels_per_unit(&self, depth: f32, height: f32) -> f32 {
        let focal = (height * 0.5) / (self.fovy_radians * 0.5).tan();
        focal / depth.max(1e-4)
    }
}
