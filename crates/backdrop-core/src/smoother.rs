//! Exponential "lerp toward target" smoothing for animation inputs.
//!
//! Input events (scroll, pointer, theme toggles) only ever write targets; the
//! frame loop advances the current values once per executed tick. That keeps
//! high-frequency input decoupled from render cadence.

use crate::constants::*;
use glam::Vec2;

/// Values that can be smoothed inside the unit domain.
pub trait Lerp: Copy + PartialEq {
    fn lerp_toward(self, target: Self, k: f32) -> Self;
    fn clamp_unit(self) -> Self;
    fn distance_to(self, other: Self) -> f32;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_toward(self, target: Self, k: f32) -> Self {
        self + (target - self) * k
    }
    #[inline]
    fn clamp_unit(self) -> Self {
        if self.is_nan() {
            0.0
        } else {
            self.clamp(0.0, 1.0)
        }
    }
    #[inline]
    fn distance_to(self, other: Self) -> f32 {
        (self - other).abs()
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp_toward(self, target: Self, k: f32) -> Self {
        self.lerp(target, k)
    }
    #[inline]
    fn clamp_unit(self) -> Self {
        Vec2::new(self.x.clamp_unit(), self.y.clamp_unit())
    }
    #[inline]
    fn distance_to(self, other: Self) -> f32 {
        self.distance(other)
    }
}

/// A current/target pair advanced by a fixed blend factor.
#[derive(Clone, Copy, Debug)]
pub struct Smoothed<T: Lerp> {
    current: T,
    target: T,
    rate: f32,
    snap: bool,
}

impl<T: Lerp> Smoothed<T> {
    /// `rate` is clamped into (0, 1) so the current value never overshoots.
    pub fn new(initial: T, rate: f32) -> Self {
        let v = initial.clamp_unit();
        Self {
            current: v,
            target: v,
            rate: rate.clamp(1e-4, 0.9999),
            snap: false,
        }
    }

    /// Under snap mode every target write lands on `current` immediately.
    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    pub fn current(&self) -> T {
        self.current
    }

    pub fn target(&self) -> T {
        self.target
    }

    pub fn set_target(&mut self, value: T) {
        self.target = value.clamp_unit();
        if self.snap {
            self.current = self.target;
        }
    }

    /// Jump both current and target, bypassing smoothing.
    pub fn reset(&mut self, value: T) {
        self.target = value.clamp_unit();
        self.current = self.target;
    }

    pub fn advance(&mut self) {
        if self.current == self.target {
            return;
        }
        self.current = self.current.lerp_toward(self.target, self.rate).clamp_unit();
    }

    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.current.distance_to(self.target) <= epsilon
    }
}

/// All smoothed inputs a generator reads. One instance per mounted component.
#[derive(Clone, Copy, Debug)]
pub struct AnimationParameters {
    pub theme_blend: Smoothed<f32>,
    pub scroll_progress: Smoothed<f32>,
    pub pointer: Smoothed<Vec2>,
    pub opacity: Smoothed<f32>,
}

impl AnimationParameters {
    pub fn new(is_dark_mode: bool, scroll_progress: f32, reduced_motion: bool) -> Self {
        let theme = if is_dark_mode { 1.0 } else { 0.0 };
        Self {
            theme_blend: Smoothed::new(theme, THEME_LERP).with_snap(reduced_motion),
            scroll_progress: Smoothed::new(scroll_progress, SCROLL_LERP)
                .with_snap(reduced_motion),
            pointer: Smoothed::new(Vec2::splat(0.5), POINTER_LERP).with_snap(reduced_motion),
            opacity: Smoothed::new(1.0, OPACITY_LERP).with_snap(reduced_motion),
        }
    }

    pub fn advance(&mut self) {
        self.theme_blend.advance();
        self.scroll_progress.advance();
        self.pointer.advance();
        self.opacity.advance();
    }

    /// Immutable view of the current values, taken after smoothing.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            theme: self.theme_blend.current(),
            scroll: self.scroll_progress.current(),
            pointer: self.pointer.current(),
            opacity: self.opacity.current(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSnapshot {
    pub theme: f32,
    pub scroll: f32,
    pub pointer: Vec2,
    pub opacity: f32,
}

/// Document scroll position as a fraction of the scrollable range.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f32 {
    let max = (scroll_height - viewport_height).max(1.0);
    let p = (scroll_y / max) as f32;
    p.clamp_unit()
}
