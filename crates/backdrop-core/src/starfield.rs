use crate::camera::Camera;
use crate::constants::*;
use crate::noise::smoothstep;
use crate::palette::{ParticlePalette, Rgb};
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub color: Rgb,
    /// Diameter in CSS pixels; the painter multiplies by the pixel ratio.
    pub size_px: f32,
    /// Final alpha with vignette and bottom fade applied.
    pub alpha: f32,
}

/// Immutable star set, regenerated only on theme or aspect change.
#[derive(Clone, Debug)]
pub struct StarField {
    stars: Vec<Star>,
    is_dark_mode: bool,
    aspect: f32,
}

impl StarField {
    pub fn generate<R: Rng + ?Sized>(
        camera: &Camera,
        palette: &ParticlePalette,
        is_dark_mode: bool,
        count: usize,
        rng: &mut R,
    ) -> Self {
        let mut stars = Vec::with_capacity(count);
        for _ in 0..count {
            let ndc_x = (rng.gen::<f32>() * 2.0 - 1.0) * STAR_NDC_SPREAD;
            let ndc_y = (rng.gen::<f32>() * 2.0 - 1.0) * STAR_NDC_SPREAD;
            // Depth is chosen in GL's [-1, 1] convention and mapped onto the
            // [0, 1] range glam's projection uses.
            let gl_z = STAR_DEPTH_MIN + rng.gen::<f32>() * STAR_DEPTH_SPAN;
            let position = camera.unproject(Vec3::new(ndc_x, ndc_y, (gl_z + 1.0) * 0.5));

            let base = palette.stars[rng.gen_range(0..palette.stars.len())];
            let tint = 0.85 + rng.gen::<f32>() * 0.3;
            let size_px = palette.star_size_min + rng.gen::<f32>() * palette.star_size_span;

            let alpha = palette.star_base_opacity * edge_fade(ndc_x, ndc_y);
            if alpha <= 0.001 {
                continue;
            }
            stars.push(Star {
                position,
                color: base.scale(tint),
                size_px,
                alpha: alpha.min(1.0),
            });
        }
        Self {
            stars,
            is_dark_mode,
            aspect: camera.aspect,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Whether this field still matches the requested theme and aspect.
    pub fn matches(&self, is_dark_mode: bool, aspect: f32) -> bool {
        self.is_dark_mode == is_dark_mode && (self.aspect - aspect).abs() < 1e-4
    }
}

/// Vignette toward the container edges plus a stronger fade at the bottom.
pub fn edge_fade(ndc_x: f32, ndc_y: f32) -> f32 {
    let x = ndc_x.clamp(-1.5, 1.5);
    let y = ndc_y.clamp(-1.5, 1.5);
    let edge = 1.0 - x.abs().max(y.abs());
    smoothstep(0.0, 0.75, edge) * smoothstep(-1.5, -0.3, y)
}
