//! Matter/antimatter pairs: two points split from a shared origin, spiral
//! back in on a precessing orbital plane, annihilate in a flash and burst,
//! then pause until the next cycle.

use crate::constants::*;
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Split,
    Spiral,
    Collision,
    Pause,
}

/// Deterministic state of a pair at a given time within its cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseSample {
    pub phase: Phase,
    pub split_progress: f32,
    pub spiral_progress: f32,
    /// Rises 0 -> 1 during the collision phase, 0 everywhere else.
    pub collision_progress: f32,
    pub radius: f32,
    pub opacity: f32,
    pub dot_scale: f32,
}

pub const SPIRAL_START: f32 = SPLIT_DURATION;
pub const COLLISION_START: f32 = SPIRAL_START + SPIRAL_DURATION;
pub const COLLISION_END: f32 = COLLISION_START + COLLISION_DURATION;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl PhaseSample {
    pub fn at(loop_time: f32) -> Self {
        let t = loop_time.max(0.0);
        let split_progress = (t / SPLIT_DURATION).min(1.0);
        let spiral_progress = ((t - SPIRAL_START) / SPIRAL_DURATION).clamp(0.0, 1.0);
        let collision_raw = ((t - COLLISION_START) / COLLISION_DURATION).clamp(0.0, 1.0);

        if t > COLLISION_END {
            return Self {
                phase: Phase::Pause,
                split_progress,
                spiral_progress,
                collision_progress: 0.0,
                radius: 0.0,
                opacity: 0.0,
                dot_scale: 0.0,
            };
        }

        if split_progress < 1.0 {
            Self {
                phase: Phase::Split,
                split_progress,
                spiral_progress,
                collision_progress: 0.0,
                radius: lerp(0.0, MAX_ORBIT_RADIUS, split_progress * split_progress),
                opacity: split_progress,
                dot_scale: split_progress,
            }
        } else if spiral_progress < 1.0 {
            Self {
                phase: Phase::Spiral,
                split_progress,
                spiral_progress,
                collision_progress: 0.0,
                radius: lerp(MAX_ORBIT_RADIUS, 0.0, spiral_progress * spiral_progress),
                opacity: 1.0,
                dot_scale: 1.0,
            }
        } else {
            Self {
                phase: Phase::Collision,
                split_progress,
                spiral_progress,
                collision_progress: collision_raw,
                radius: lerp(COLLISION_START_RADIUS, 0.0, collision_raw),
                opacity: 1.0 - collision_raw,
                dot_scale: 1.0 - collision_raw * 0.8,
            }
        }
    }

    /// Flash intensity, `sin(pi * collision_progress)`.
    pub fn flash(&self) -> f32 {
        if self.collision_progress > 0.0 {
            (self.collision_progress * PI).sin()
        } else {
            0.0
        }
    }

    /// Emissive intensity of the dots: grows through the spiral, pops at
    /// the collision.
    pub fn emissive(&self) -> f32 {
        let glow = EMISSIVE_BASE + self.spiral_progress * EMISSIVE_SPIRAL_GAIN;
        let pop = if self.collision_progress > 0.0 {
            (self.collision_progress * PI).sin().powi(2) * EMISSIVE_POP
        } else {
            0.0
        };
        glow + pop
    }

    /// Radius of the annihilation burst shell.
    pub fn burst_radius(&self) -> f32 {
        let ease = 1.0 - (1.0 - self.collision_progress).powi(3);
        BURST_START_RADIUS + ease * BURST_SPREAD
    }
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    let z = 2.0 * rng.gen::<f32>() - 1.0;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Random unit vector orthogonal to `normal`.
fn random_orthogonal<R: Rng + ?Sized>(rng: &mut R, normal: Vec3) -> Vec3 {
    for _ in 0..8 {
        let v = random_unit_vector(rng);
        let projected = v - normal * v.dot(normal);
        if projected.length_squared() > 1e-6 {
            return projected.normalize();
        }
    }
    normal.any_orthonormal_vector()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairKind {
    /// Loops forever, respawning at a new random position each cycle.
    AutoRespawn,
    /// Runs one cycle, reports completion, then is removed.
    OneShot,
}

/// Which palette entry a burst particle uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstTint {
    Matter,
    Antimatter,
    White,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(pub u32);

/// Per-tick output of a pair, in world space.
#[derive(Clone, Copy, Debug)]
pub struct PairFrame {
    pub id: PairId,
    pub origin: Vec3,
    pub matter: Vec3,
    pub antimatter: Vec3,
    pub sample: PhaseSample,
    /// True on the single tick where a one-shot pair finishes its collision.
    pub completed: bool,
}

#[derive(Clone, Debug)]
pub struct OrbitingPair {
    id: PairId,
    kind: PairKind,
    spawn: Vec3,
    base_normal: Vec3,
    precession_axis: Vec3,
    wobble_axis: Vec3,
    wobble_freq: f32,
    wobble_amp: f32,
    wobble_phase: f32,
    precession_speed: f32,
    base_speed: f32,
    max_speed_multiplier: f32,
    speed_wobble_phase: f32,
    speed_wobble_freq: f32,
    time: f32,
    angle: f32,
    prev_loop_time: f32,
    completed: bool,
    burst_dirs: Vec<Vec3>,
    burst_tints: Vec<BurstTint>,
}

impl OrbitingPair {
    pub fn new<R: Rng + ?Sized>(
        id: PairId,
        kind: PairKind,
        spawn: Option<Vec3>,
        burst_count: usize,
        rng: &mut R,
    ) -> Self {
        let spawn = spawn.unwrap_or_else(|| {
            Vec3::new(
                (rng.gen::<f32>() - 0.5) * SPAWN_SPREAD,
                (rng.gen::<f32>() - 0.5) * SPAWN_SPREAD,
                0.0,
            )
        });
        let mut pair = Self {
            id,
            kind,
            spawn,
            base_normal: Vec3::Z,
            precession_axis: Vec3::X,
            wobble_axis: Vec3::Y,
            wobble_freq: 2.0,
            wobble_amp: 0.12,
            wobble_phase: 0.0,
            precession_speed: 0.15,
            base_speed: 1.6,
            max_speed_multiplier: 18.0,
            speed_wobble_phase: 0.0,
            speed_wobble_freq: 1.4,
            time: 0.0,
            angle: 0.0,
            prev_loop_time: 0.0,
            completed: false,
            burst_dirs: vec![Vec3::ZERO; burst_count],
            burst_tints: vec![BurstTint::White; burst_count],
        };
        pair.reseed(rng);
        pair
    }

    pub fn id(&self) -> PairId {
        self.id
    }

    pub fn kind(&self) -> PairKind {
        self.kind
    }

    pub fn spawn_position(&self) -> Vec3 {
        self.spawn
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn burst(&self) -> impl Iterator<Item = (Vec3, BurstTint)> + '_ {
        self.burst_dirs
            .iter()
            .copied()
            .zip(self.burst_tints.iter().copied())
    }

    /// Pick a fresh orbital plane, motion constants and burst pattern.
    fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.base_normal = random_unit_vector(rng);
        self.precession_axis = random_orthogonal(rng, self.base_normal);
        self.wobble_axis = random_orthogonal(rng, self.base_normal);

        self.wobble_freq = 1.1 + rng.gen::<f32>() * 2.4;
        self.wobble_amp = 0.06 + rng.gen::<f32>() * 0.16;
        self.wobble_phase = rng.gen::<f32>() * TAU;
        self.precession_speed = (rng.gen::<f32>() - 0.5) * 0.45;

        self.base_speed = 1.1 + rng.gen::<f32>() * 1.4;
        self.max_speed_multiplier = 12.0 + rng.gen::<f32>() * 14.0;
        self.speed_wobble_phase = rng.gen::<f32>() * TAU;
        self.speed_wobble_freq = 0.9 + rng.gen::<f32>() * 1.6;

        for (dir, tint) in self.burst_dirs.iter_mut().zip(self.burst_tints.iter_mut()) {
            *dir = random_unit_vector(rng);
            let pick = rng.gen::<f32>();
            *tint = if pick < 0.42 {
                BurstTint::Matter
            } else if pick < 0.84 {
                BurstTint::Antimatter
            } else {
                BurstTint::White
            };
        }
    }

    /// Current orbital plane normal after precession and wobble.
    fn orbital_normal(&self, loop_time: f32) -> Vec3 {
        let precession = (loop_time - SPIRAL_START) * self.precession_speed;
        let wobble =
            (self.time * self.wobble_freq + self.wobble_phase).sin() * self.wobble_amp;
        let n = Quat::from_axis_angle(self.precession_axis, precession) * self.base_normal;
        let n = Quat::from_axis_angle(self.wobble_axis, wobble) * n;
        n.normalize_or_zero()
    }

    pub fn step<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> PairFrame {
        self.time += dt.max(0.0);
        let loop_time = self.time % CYCLE_DURATION;

        if loop_time < self.prev_loop_time {
            self.angle = 0.0;
            if self.kind == PairKind::AutoRespawn {
                self.spawn = Vec3::new(
                    (rng.gen::<f32>() - 0.5) * SPAWN_SPREAD,
                    (rng.gen::<f32>() - 0.5) * SPAWN_SPREAD,
                    (rng.gen::<f32>() - 0.5) * SPAWN_DEPTH_SPREAD,
                );
            }
            self.reseed(rng);
        }
        self.prev_loop_time = loop_time;

        let sample = PhaseSample::at(loop_time);

        let mut completed = false;
        if self.kind == PairKind::OneShot
            && !self.completed
            && (sample.collision_progress >= 1.0 || sample.phase == Phase::Pause)
        {
            self.completed = true;
            completed = true;
        }

        // Angular velocity climbs sharply as the radius shrinks.
        let normalized_radius = sample.radius / MAX_ORBIT_RADIUS;
        let speed_multiplier =
            1.0 + (1.0 - normalized_radius).powi(3) * (self.max_speed_multiplier - 1.0);
        let speed_wobble = 1.0
            + SPEED_WOBBLE_AMOUNT
                * (self.time * self.speed_wobble_freq + self.speed_wobble_phase).sin();
        self.angle += self.base_speed * speed_multiplier * speed_wobble * dt.max(0.0);

        let n = self.orbital_normal(loop_time);
        let helper = if n.z.abs() < 0.9 { Vec3::Z } else { Vec3::Y };
        let u = helper.cross(n).normalize_or_zero();
        let v = n.cross(u).normalize_or_zero();
        let offset = (u * self.angle.cos() + v * self.angle.sin()) * sample.radius;

        PairFrame {
            id: self.id,
            origin: self.spawn,
            matter: self.spawn + offset,
            antimatter: self.spawn - offset,
            sample,
            completed,
        }
    }
}
