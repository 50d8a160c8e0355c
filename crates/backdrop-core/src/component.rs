//! One mounted background: smoothed inputs, a clock, a scene and the
//! surface the scene's frames are applied to.

use crate::clock::{FrameClock, FrameTick};
use crate::error::Result;
use crate::lifecycle::{FrameSlot, Host, LifecycleController, ListenerKind, MountOutcome};
use crate::quality::MotionPolicy;
use crate::scene::Scene;
use crate::smoother::AnimationParameters;
use crate::viewport::{ViewportAdapter, ViewportState};
use glam::Vec2;

/// Drawing side of a component. Receives only finished frames.
pub trait Surface {
    type Frame;

    fn resize(&mut self, viewport: &ViewportState);

    fn apply(&mut self, frame: &Self::Frame);
}

/// Initial container and page state at mount time.
#[derive(Clone, Copy, Debug)]
pub struct MountState {
    pub is_dark_mode: bool,
    pub scroll_progress: f32,
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
}

/// Latest value of a throttled input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputSample {
    Scroll(f32),
    Pointer(Vec2),
}

impl InputSample {
    pub fn slot(&self) -> FrameSlot {
        match self {
            InputSample::Scroll(_) => FrameSlot::Scroll,
            InputSample::Pointer(_) => FrameSlot::Pointer,
        }
    }
}

pub struct Component<S, P>
where
    S: Scene,
    P: Surface<Frame = S::Frame>,
{
    policy: MotionPolicy,
    scene: S,
    surface: Option<P>,
    params: AnimationParameters,
    clock: FrameClock,
    viewport: ViewportAdapter,
    lifecycle: LifecycleController,
    latest_scroll: Option<f32>,
    latest_pointer: Option<Vec2>,
}

impl<S, P> Component<S, P>
where
    S: Scene,
    P: Surface<Frame = S::Frame>,
{
    /// Build the surface, size it, attach `listeners` and start the loop
    /// (or render one static frame under reduced motion). A surface that
    /// fails to build leaves the component running without output.
    pub fn mount(
        policy: MotionPolicy,
        mut scene: S,
        state: MountState,
        host: &mut impl Host,
        listeners: &[ListenerKind],
        make_surface: impl FnOnce() -> Result<P>,
    ) -> Self {
        let surface = match make_surface() {
            Ok(surface) => Some(surface),
            Err(err) => {
                log::warn!("[component] no drawing surface: {err}");
                None
            }
        };
        scene.set_dark_mode(state.is_dark_mode);

        let mut component = Self {
            policy,
            scene,
            surface,
            params: AnimationParameters::new(
                state.is_dark_mode,
                state.scroll_progress,
                policy.reduced_motion,
            ),
            clock: FrameClock::new(policy.max_fps),
            viewport: ViewportAdapter::new(policy.variant.dpr_max()),
            lifecycle: LifecycleController::new(policy.reduced_motion),
            latest_scroll: None,
            latest_pointer: None,
        };
        component.apply_viewport(state.css_width, state.css_height, state.device_pixel_ratio);

        if component.lifecycle.mount(host, listeners) == MountOutcome::StaticFrame {
            component.render_static();
        }
        log::info!(
            "[component] mounted {:?} ({:?}, {} fps, surface: {})",
            policy.variant,
            policy.tier,
            policy.max_fps,
            component.surface.is_some()
        );
        component
    }

    pub fn policy(&self) -> &MotionPolicy {
        &self.policy
    }

    pub fn params(&self) -> &AnimationParameters {
        &self.params
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn surface(&self) -> Option<&P> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut P> {
        self.surface.as_mut()
    }

    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn viewport(&self) -> Option<ViewportState> {
        self.viewport.current()
    }

    /// Render callback. Returns the executed tick, if any.
    pub fn on_render_frame(&mut self, host: &mut impl Host, now_ms: f64) -> Option<FrameTick> {
        if !self.lifecycle.begin_frame(host) {
            return None;
        }
        let tick = self.clock.tick(now_ms)?;
        self.params.advance();
        self.render(&tick);
        Some(tick)
    }

    fn render(&mut self, tick: &FrameTick) {
        let snapshot = self.params.snapshot();
        let frame = self.scene.simulate(tick, &snapshot);
        if let Some(surface) = self.surface.as_mut() {
            surface.apply(&frame);
        }
    }

    fn render_static(&mut self) {
        if !self.lifecycle.is_torn_down() {
            self.render(&FrameTick::STATIC);
        }
    }

    fn after_change(&mut self) {
        if self.policy.reduced_motion {
            self.render_static();
        }
    }

    pub fn set_dark_mode(&mut self, is_dark_mode: bool) {
        self.params
            .theme_blend
            .set_target(if is_dark_mode { 1.0 } else { 0.0 });
        self.scene.set_dark_mode(is_dark_mode);
        self.after_change();
    }

    pub fn set_scroll_progress(&mut self, progress: f32) {
        self.params.scroll_progress.set_target(progress);
        self.after_change();
    }

    pub fn set_pointer(&mut self, uv: Vec2) {
        self.params.pointer.set_target(uv);
        self.after_change();
    }

    /// Record an input and make sure one frame-aligned callback is queued
    /// for its slot. Bursts collapse; the last value wins.
    pub fn schedule_input(&mut self, host: &mut impl Host, sample: InputSample) -> bool {
        if self.lifecycle.is_torn_down() {
            return false;
        }
        match sample {
            InputSample::Scroll(p) => self.latest_scroll = Some(p),
            InputSample::Pointer(uv) => self.latest_pointer = Some(uv),
        }
        self.lifecycle.schedule(host, sample.slot())
    }

    /// Input slot callback. Applies the latest recorded value.
    pub fn complete_input(&mut self, slot: FrameSlot) {
        if !self.lifecycle.complete(slot) {
            return;
        }
        match slot {
            FrameSlot::Scroll => {
                if let Some(p) = self.latest_scroll.take() {
                    self.set_scroll_progress(p);
                }
            }
            FrameSlot::Pointer => {
                if let Some(uv) = self.latest_pointer.take() {
                    self.set_pointer(uv);
                }
            }
            FrameSlot::Render | FrameSlot::Scramble => {}
        }
    }

    fn apply_viewport(&mut self, css_width: f64, css_height: f64, raw_dpr: f64) -> Option<ViewportState> {
        let viewport = self.viewport.observe(css_width, css_height, raw_dpr)?;
        self.scene.resize(&viewport);
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(&viewport);
        }
        Some(viewport)
    }

    /// Container resized. Only an actual change reaches the surface.
    pub fn on_resize(&mut self, css_width: f64, css_height: f64, raw_dpr: f64) -> Option<ViewportState> {
        if self.lifecycle.is_torn_down() {
            return None;
        }
        let changed = self.apply_viewport(css_width, css_height, raw_dpr);
        if changed.is_some() {
            self.after_change();
        }
        changed
    }

    pub fn on_visibility_change(&mut self, host: &mut impl Host, visible: bool) {
        if self.lifecycle.on_visibility_change(host, visible) {
            self.clock.resume();
        }
    }

    /// Tear everything down. Safe to call more than once.
    pub fn unmount(&mut self, host: &mut impl Host) {
        let surface = &mut self.surface;
        self.lifecycle.teardown(host, || {
            surface.take();
        });
    }
}
