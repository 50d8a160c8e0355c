//! The two scenes a component can drive. Each turns a tick plus smoothed
//! parameters into a self-contained frame; nothing here touches a surface.

use crate::camera::Camera;
use crate::clock::FrameTick;
use crate::constants::*;
use crate::field::{BranchField, BranchFrame};
use crate::orbit::{BurstTint, OrbitingPair, PairFrame, PairId, PairKind};
use crate::palette::{ParticlePalette, Rgb};
use crate::quality::QualityTier;
use crate::smoother::ParamSnapshot;
use crate::starfield::StarField;
use crate::viewport::ViewportState;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

/// Pure simulation step of a background variant.
pub trait Scene {
    type Frame;

    fn set_dark_mode(&mut self, _is_dark_mode: bool) {}

    fn resize(&mut self, _viewport: &ViewportState) {}

    fn simulate(&mut self, tick: &FrameTick, params: &ParamSnapshot) -> Self::Frame;
}

// ---------------- Branch variant ----------------

pub struct BranchScene {
    field: BranchField,
}

impl BranchScene {
    pub fn new(tier: QualityTier) -> Self {
        Self {
            field: BranchField::new(tier),
        }
    }

    pub fn field(&self) -> &BranchField {
        &self.field
    }
}

impl Scene for BranchScene {
    type Frame = BranchFrame;

    fn simulate(&mut self, tick: &FrameTick, params: &ParamSnapshot) -> BranchFrame {
        self.field.frame(tick.elapsed_sec, *params)
    }
}

// ---------------- Particle variant ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteShape {
    /// Solid disc.
    Disc,
    /// Soft radial glow.
    Glow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    Normal,
    Additive,
}

/// One screen-space draw, in backing-store pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Rgb,
    pub alpha: f32,
    pub shape: SpriteShape,
    pub blend: Blend,
}

#[derive(Clone, Debug, Default)]
pub struct SceneFrame {
    pub sprites: Vec<Sprite>,
    /// One-shot pairs that finished this tick and were removed.
    pub completed: SmallVec<[PairId; 4]>,
    /// Flash intensity of the auto-respawning pair, 0 outside collisions.
    pub collision_intensity: f32,
    pub collision_origin: Vec3,
}

#[derive(Clone, Copy, Debug)]
pub struct ParticleSceneConfig {
    pub star_count: usize,
    pub burst_count: usize,
    pub seed: u64,
}

impl ParticleSceneConfig {
    pub fn new(tier: QualityTier, seed: u64) -> Self {
        Self {
            star_count: STAR_COUNT,
            burst_count: tier.burst_count(),
            seed,
        }
    }
}

pub struct ParticleScene {
    config: ParticleSceneConfig,
    camera: Camera,
    viewport: ViewportState,
    is_dark_mode: bool,
    palette: ParticlePalette,
    stars: StarField,
    pairs: Vec<OrbitingPair>,
    next_id: u32,
    rng: StdRng,
}

impl ParticleScene {
    pub fn new(config: ParticleSceneConfig, is_dark_mode: bool) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let camera = Camera::default();
        let palette = ParticlePalette::for_theme(is_dark_mode);
        let stars = StarField::generate(&camera, &palette, is_dark_mode, config.star_count, &mut rng);
        let auto = OrbitingPair::new(
            PairId(0),
            PairKind::AutoRespawn,
            None,
            config.burst_count,
            &mut rng,
        );
        Self {
            config,
            camera,
            viewport: ViewportState::default(),
            is_dark_mode,
            palette,
            stars,
            pairs: vec![auto],
            next_id: 1,
            rng,
        }
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn palette(&self) -> &ParticlePalette {
        &self.palette
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Spawn a one-shot pair under a click. `uv` is relative to the
    /// container with the origin at the top-left.
    pub fn spawn_at(&mut self, uv: Vec2) -> PairId {
        let x = uv.x.clamp(0.0, 1.0) * 2.0 - 1.0;
        let y = -(uv.y.clamp(0.0, 1.0) * 2.0) + 1.0;
        let z = (self.rng.gen::<f32>() - 0.5) * SPAWN_DEPTH_SPREAD;
        let position = Vec3::new(x * CLICK_SPAWN_SCALE, y * CLICK_SPAWN_SCALE, z);
        let id = PairId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        self.pairs.push(OrbitingPair::new(
            id,
            PairKind::OneShot,
            Some(position),
            self.config.burst_count,
            &mut self.rng,
        ));
        log::debug!("[scene] spawned pair {} at ({:.2},{:.2},{:.2})", id.0, position.x, position.y, z);
        id
    }

    fn regenerate_stars(&mut self) {
        self.stars = StarField::generate(
            &self.camera,
            &self.palette,
            self.is_dark_mode,
            self.config.star_count,
            &mut self.rng,
        );
    }

    fn push_star_sprites(&self, out: &mut Vec<Sprite>) {
        let (w, h) = self.viewport.backing_size();
        let dpr = self.viewport.device_pixel_ratio;
        for star in self.stars.stars() {
            if let Some(p) = self.camera.project(star.position, w as f32, h as f32) {
                out.push(Sprite {
                    x: p.x,
                    y: p.y,
                    radius: star.size_px * dpr * 0.5,
                    color: star.color,
                    alpha: star.alpha,
                    shape: SpriteShape::Disc,
                    blend: Blend::Normal,
                });
            }
        }
    }

    fn push_pair_sprites(&self, pair: &OrbitingPair, frame: &PairFrame, out: &mut Vec<Sprite>) {
        let (w, h) = self.viewport.backing_size();
        let (w, h) = (w as f32, h as f32);
        let pal = &self.palette;
        let s = &frame.sample;

        if s.opacity > 0.001 {
            let glow_radius = pal.glow_scale * (0.6 + s.dot_scale) * 0.5;
            let brightness = 0.6 + 0.1 * s.emissive();
            for (pos, color) in [(frame.matter, pal.matter), (frame.antimatter, pal.antimatter)] {
                let Some(p) = self.camera.project(pos, w, h) else {
                    continue;
                };
                let ppu = self.camera.pixels_per_unit(p.depth, h);
                out.push(Sprite {
                    x: p.x,
                    y: p.y,
                    radius: glow_radius * ppu,
                    color,
                    alpha: pal.glow_opacity * s.opacity,
                    shape: SpriteShape::Glow,
                    blend: Blend::Additive,
                });
                out.push(Sprite {
                    x: p.x,
                    y: p.y,
                    radius: pal.dot_radius * s.dot_scale * ppu,
                    color: color.scale(brightness),
                    alpha: s.opacity,
                    shape: SpriteShape::Disc,
                    blend: Blend::Normal,
                });
            }
        }

        let intensity = s.flash();
        if intensity <= 0.0 {
            return;
        }
        let Some(center) = self.camera.project(frame.origin, w, h) else {
            return;
        };
        let flash = intensity.powf(1.6);
        if flash > 0.001 {
            let ppu = self.camera.pixels_per_unit(center.depth, h);
            out.push(Sprite {
                x: center.x,
                y: center.y,
                radius: (0.12 + flash * 0.65) * 0.5 * ppu,
                color: pal.flash,
                alpha: pal.flash_opacity * flash,
                shape: SpriteShape::Glow,
                blend: Blend::Additive,
            });
        }

        let burst_alpha = pal.burst_opacity * intensity.powf(1.2);
        if burst_alpha <= 0.002 {
            return;
        }
        let shell = s.burst_radius();
        for (dir, tint) in pair.burst() {
            let Some(p) = self.camera.project(frame.origin + dir * shell, w, h) else {
                continue;
            };
            let color = match tint {
                BurstTint::Matter => pal.matter,
                BurstTint::Antimatter => pal.antimatter,
                BurstTint::White => pal.white,
            };
            out.push(Sprite {
                x: p.x,
                y: p.y,
                radius: pal.burst_size * 0.5 * self.camera.pixels_per_unit(p.depth, h),
                color,
                alpha: burst_alpha,
                shape: SpriteShape::Glow,
                blend: Blend::Additive,
            });
        }
    }
}

impl Scene for ParticleScene {
    type Frame = SceneFrame;

    fn set_dark_mode(&mut self, is_dark_mode: bool) {
        if is_dark_mode == self.is_dark_mode {
            return;
        }
        self.is_dark_mode = is_dark_mode;
        self.palette = ParticlePalette::for_theme(is_dark_mode);
        self.regenerate_stars();
    }

    fn resize(&mut self, viewport: &ViewportState) {
        self.viewport = *viewport;
        let aspect = viewport.aspect();
        if !self.stars.matches(self.is_dark_mode, aspect) {
            self.camera = Camera::with_aspect(aspect);
            self.regenerate_stars();
        }
    }

    fn simulate(&mut self, tick: &FrameTick, _params: &ParamSnapshot) -> SceneFrame {
        let mut frame = SceneFrame::default();
        self.push_star_sprites(&mut frame.sprites);

        let mut pairs = std::mem::take(&mut self.pairs);
        for pair in pairs.iter_mut() {
            let pf = pair.step(tick.dt_sec, &mut self.rng);
            if pair.kind() == PairKind::AutoRespawn {
                frame.collision_intensity = pf.sample.flash();
                frame.collision_origin = pf.origin;
            }
            if pf.completed {
                frame.completed.push(pf.id);
            }
            self.push_pair_sprites(pair, &pf, &mut frame.sprites);
        }
        pairs.retain(|p| !(p.kind() == PairKind::OneShot && p.is_completed()));
        self.pairs = pairs;
        frame
    }
}
