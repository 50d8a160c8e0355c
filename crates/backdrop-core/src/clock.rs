use crate::constants::{FRAME_EPSILON_MS, MAX_FRAME_DT_SEC};
use instant::Instant;

/// Monotonic millisecond source feeding the frame clock.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Wall-clock source backed by `instant`, which maps to `performance.now()`
/// on the web.
pub struct InstantSource {
    origin: Instant,
}

impl InstantSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for InstantSource {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// One executed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    pub elapsed_sec: f32,
    pub dt_sec: f32,
    pub frame: u64,
}

impl FrameTick {
    /// The frame used for reduced-motion static renders.
    pub const STATIC: FrameTick = FrameTick {
        elapsed_sec: 0.0,
        dt_sec: 0.0,
        frame: 0,
    };
}

/// Throttling frame clock. Host callbacks arrive at display rate; only those
/// at least `1000 / max_fps` ms after the previous frame slot produce a
/// [`FrameTick`].
///
/// Slots advance by whole intervals, so a display cadence that does not
/// divide the cap evenly never runs more than `max_fps` frames a second.
/// After a gap of two intervals or more the slot snaps to the callback.
#[derive(Clone, Debug)]
pub struct FrameClock {
    max_fps: u32,
    interval_ms: f64,
    origin_ms: Option<f64>,
    last_frame_ms: Option<f64>,
    slot_ms: Option<f64>,
    elapsed_sec: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new(max_fps: u32) -> Self {
        let interval_ms = if max_fps > 0 {
            1000.0 / max_fps as f64
        } else {
            0.0
        };
        Self {
            max_fps,
            interval_ms,
            origin_ms: None,
            last_frame_ms: None,
            slot_ms: None,
            elapsed_sec: 0.0,
            frames: 0,
        }
    }

    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed_sec
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Forget the last executed frame so the next callback runs immediately
    /// with zero delta. Elapsed time keeps following the wall clock.
    pub fn resume(&mut self) {
        self.last_frame_ms = None;
        self.slot_ms = None;
    }

    pub fn tick(&mut self, now_ms: f64) -> Option<FrameTick> {
        if self.max_fps == 0 {
            return None;
        }
        let (slot_ms, dt_ms) = match (self.slot_ms, self.last_frame_ms) {
            (Some(slot), Some(last)) => {
                let since = now_ms - slot;
                if since + FRAME_EPSILON_MS < self.interval_ms {
                    return None;
                }
                let next = if since < 2.0 * self.interval_ms {
                    slot + self.interval_ms
                } else {
                    now_ms
                };
                (next, (now_ms - last).max(0.0))
            }
            _ => (now_ms, 0.0),
        };
        self.slot_ms = Some(slot_ms);
        let origin = *self.origin_ms.get_or_insert(now_ms);
        self.last_frame_ms = Some(now_ms);
        self.elapsed_sec = ((now_ms - origin).max(0.0) / 1000.0) as f32;
        self.frames += 1;
        Some(FrameTick {
            elapsed_sec: self.elapsed_sec,
            dt_sec: ((dt_ms / 1000.0) as f32).min(MAX_FRAME_DT_SEC),
            frame: self.frames,
        })
    }
}
