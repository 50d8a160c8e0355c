//! Character scramble used when a label changes, e.g. on language switch.
//!
//! Each position waits, cycles through random letters for a while, then
//! settles on its target character. Non-letters settle immediately.

use crate::constants::*;
use crate::lifecycle::{FrameSlot, Host, LifecycleController, TimerId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Frames needed for `duration_ms` at `fps`, never less than one.
pub fn total_frames_for(duration_ms: u32, fps: u32) -> u32 {
    ((duration_ms as f32 / 1000.0) * fps as f32).round().max(1.0) as u32
}

#[derive(Clone, Debug)]
struct CharSlot {
    from: Option<char>,
    to: Option<char>,
    start: u32,
    end: u32,
    shown: Option<char>,
}

/// Output of one scramble frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrambleStep {
    pub text: String,
    pub opacity: f32,
    pub done: bool,
}

#[derive(Clone, Debug)]
pub struct ScrambleTransition {
    from: String,
    to: String,
    slots: Vec<CharSlot>,
    charset: Vec<char>,
    refresh_chance: f32,
    total_frames: u32,
    frame: u32,
    done: bool,
}

impl ScrambleTransition {
    pub fn new<R: Rng + ?Sized>(
        from: &str,
        to: &str,
        total_frames: u32,
        refresh_chance: f32,
        charset: &str,
        rng: &mut R,
    ) -> Self {
        let total_frames = total_frames.max(1);
        let from_chars: Vec<char> = from.chars().collect();
        let to_chars: Vec<char> = to.chars().collect();
        let len = from_chars.len().max(to_chars.len());
        let slots = (0..len)
            .map(|i| {
                let to = to_chars.get(i).copied();
                let from = from_chars.get(i).copied();
                let start = rng.gen_range(0..=total_frames / 4);
                let end = rng.gen_range(start + 1..=total_frames);
                let (start, end) = match to {
                    Some(c) if c.is_ascii_alphabetic() => (start, end),
                    _ => (0, 0),
                };
                CharSlot {
                    from,
                    to,
                    start,
                    end,
                    shown: None,
                }
            })
            .collect();
        let mut charset: Vec<char> = charset.chars().collect();
        if charset.is_empty() {
            charset = SCRAMBLE_CHARS.chars().collect();
        }
        Self {
            from: from.to_string(),
            to: to.to_string(),
            slots,
            charset,
            refresh_chance: refresh_chance.clamp(0.0, 1.0),
            total_frames,
            frame: 0,
            done: false,
        }
    }

    pub fn from_text(&self) -> &str {
        &self.from
    }

    pub fn target(&self) -> &str {
        &self.to
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn random_char_for<R: Rng + ?Sized>(&self, target: char, rng: &mut R) -> char {
        let base = self.charset[rng.gen_range(0..self.charset.len())];
        if target.is_uppercase() {
            base.to_ascii_uppercase()
        } else {
            base.to_ascii_lowercase()
        }
    }

    /// Produce the next frame of text.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ScrambleStep {
        if self.done {
            return ScrambleStep {
                text: self.to.clone(),
                opacity: 1.0,
                done: true,
            };
        }
        let frame = self.frame;
        let progress = (frame as f32 / self.total_frames as f32).min(1.0);
        let opacity = SCRAMBLE_FADE_FROM + (1.0 - SCRAMBLE_FADE_FROM) * progress;

        let mut text = String::with_capacity(self.to.len().max(self.from.len()));
        let mut settled = 0;
        for i in 0..self.slots.len() {
            let slot = &self.slots[i];
            if frame >= slot.end {
                settled += 1;
                text.extend(slot.to);
            } else if frame >= slot.start {
                let target = slot.to.unwrap_or('a');
                let refresh = slot.shown.is_none() || rng.gen::<f32>() < self.refresh_chance;
                if refresh {
                    let c = self.random_char_for(target, rng);
                    self.slots[i].shown = Some(c);
                }
                text.extend(self.slots[i].shown);
            } else {
                text.extend(slot.from);
            }
        }

        if settled == self.slots.len() {
            self.done = true;
            return ScrambleStep {
                text: self.to.clone(),
                opacity: 1.0,
                done: true,
            };
        }
        self.frame += 1;
        ScrambleStep {
            text,
            opacity,
            done: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrambleOptions {
    pub delay_ms: u32,
    pub duration_ms: u32,
    pub fps: u32,
    pub charset: String,
    pub refresh_chance: f32,
}

impl Default for ScrambleOptions {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            duration_ms: SCRAMBLE_DURATION_MS,
            fps: SCRAMBLE_FPS,
            charset: SCRAMBLE_CHARS.to_string(),
            refresh_chance: SCRAMBLE_REFRESH_CHANCE,
        }
    }
}

/// A label that scrambles into each new text it is given. Scheduling goes
/// through a [`Host`]: one delay timer, then one frame request at a time.
pub struct ScrambleText {
    target: String,
    shown: String,
    opacity: f32,
    transition: Option<ScrambleTransition>,
    delay: Option<TimerId>,
    options: ScrambleOptions,
    lifecycle: LifecycleController,
    rng: StdRng,
    disposed: bool,
}

impl ScrambleText {
    pub fn new(text: &str, options: ScrambleOptions, reduced_motion: bool, seed: u64) -> Self {
        Self {
            target: text.to_string(),
            shown: text.to_string(),
            opacity: 1.0,
            transition: None,
            delay: None,
            options,
            lifecycle: LifecycleController::new(reduced_motion),
            rng: StdRng::seed_from_u64(seed),
            disposed: false,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Text currently on screen.
    pub fn shown(&self) -> &str {
        &self.shown
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    /// Start scrambling toward `text`. Under reduced motion the new text
    /// is shown immediately.
    pub fn set_text(&mut self, host: &mut impl Host, text: &str) {
        if self.disposed {
            return;
        }
        if self.lifecycle.reduced_motion() {
            self.target = text.to_string();
            self.shown = text.to_string();
            self.opacity = 1.0;
            return;
        }
        if text == self.target {
            return;
        }
        let from = std::mem::replace(&mut self.target, text.to_string());
        self.lifecycle.cancel_all(host);
        self.transition = Some(ScrambleTransition::new(
            &from,
            text,
            total_frames_for(self.options.duration_ms, self.options.fps),
            self.options.refresh_chance,
            &self.options.charset,
            &mut self.rng,
        ));
        self.delay = self.lifecycle.set_timer(host, self.options.delay_ms);
        if self.delay.is_none() {
            self.begin(host);
        }
    }

    fn begin(&mut self, host: &mut impl Host) {
        let Some(transition) = self.transition.as_ref() else {
            return;
        };
        self.shown = transition.from_text().to_string();
        self.opacity = SCRAMBLE_FADE_FROM;
        self.lifecycle.schedule(host, FrameSlot::Scramble);
    }

    /// Delay timer fired.
    pub fn on_timer(&mut self, host: &mut impl Host, id: TimerId) {
        if !self.lifecycle.timer_fired(id) || self.delay != Some(id) {
            return;
        }
        self.delay = None;
        self.begin(host);
    }

    /// Frame callback of the scramble slot.
    pub fn on_frame(&mut self, host: &mut impl Host) {
        if !self.lifecycle.complete(FrameSlot::Scramble) {
            return;
        }
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        let step = transition.step(&mut self.rng);
        self.shown = step.text;
        self.opacity = step.opacity;
        if step.done {
            self.transition = None;
        } else {
            self.lifecycle.schedule(host, FrameSlot::Scramble);
        }
    }

    /// Cancel any pending timer or frame. The label keeps its last text.
    pub fn dispose(&mut self, host: &mut impl Host) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.lifecycle.cancel_all(host);
        self.transition = None;
        self.delay = None;
    }
}
