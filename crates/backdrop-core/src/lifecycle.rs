//! Start/stop/teardown state machine for a mounted background.
//!
//! The controller is the single owner of outstanding frame requests,
//! timers and listener registrations. Platform effects go through [`Host`].

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub i32);

/// Kind of frame-aligned callback. Each slot has at most one outstanding
/// request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameSlot {
    Render,
    Scroll,
    Pointer,
    Scramble,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Scroll,
    PointerMove,
    Visibility,
    Resize,
    Click,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountOutcome {
    /// The render loop was started.
    Running,
    /// Reduced motion: the caller renders one static frame, no loop.
    StaticFrame,
}

/// Platform side effects needed by the controller.
pub trait Host {
    fn request_frame(&mut self, slot: FrameSlot) -> Option<FrameId>;
    fn cancel_frame(&mut self, slot: FrameSlot, id: FrameId);
    fn set_timeout(&mut self, delay_ms: u32) -> Option<TimerId>;
    fn clear_timeout(&mut self, id: TimerId);
    /// Returns whether the listener was actually registered.
    fn attach_listener(&mut self, kind: ListenerKind) -> bool;
    fn detach_listener(&mut self, kind: ListenerKind);
    fn release_surface(&mut self);
    fn detach_node(&mut self);
}

#[derive(Debug)]
pub struct LifecycleController {
    state: RunState,
    reduced_motion: bool,
    torn_down: bool,
    render_request: Option<FrameId>,
    pending: SmallVec<[(FrameSlot, FrameId); 4]>,
    timers: SmallVec<[TimerId; 2]>,
    listeners: SmallVec<[ListenerKind; 5]>,
    starts: u32,
}

impl LifecycleController {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            state: RunState::Stopped,
            reduced_motion,
            torn_down: false,
            render_request: None,
            pending: SmallVec::new(),
            timers: SmallVec::new(),
            listeners: SmallVec::new(),
            starts: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Number of Stopped -> Running transitions so far.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Outstanding frame requests of every slot, render included.
    pub fn pending_frames(&self) -> usize {
        self.pending.len() + usize::from(self.render_request.is_some())
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn mount(&mut self, host: &mut impl Host, listeners: &[ListenerKind]) -> MountOutcome {
        for &kind in listeners {
            if self.listeners.contains(&kind) {
                continue;
            }
            if host.attach_listener(kind) {
                self.listeners.push(kind);
            } else {
                log::warn!("[lifecycle] could not attach {:?} listener", kind);
            }
        }
        if self.reduced_motion {
            log::debug!("[lifecycle] mounted static (reduced motion)");
            MountOutcome::StaticFrame
        } else {
            self.start(host);
            MountOutcome::Running
        }
    }

    /// Returns true if the loop was started by this call.
    pub fn start(&mut self, host: &mut impl Host) -> bool {
        if self.torn_down || self.reduced_motion || self.state == RunState::Running {
            return false;
        }
        self.state = RunState::Running;
        self.starts += 1;
        self.render_request = host.request_frame(FrameSlot::Render);
        log::debug!("[lifecycle] running");
        true
    }

    pub fn stop(&mut self, host: &mut impl Host) {
        if let Some(id) = self.render_request.take() {
            host.cancel_frame(FrameSlot::Render, id);
        }
        if self.state == RunState::Running {
            self.state = RunState::Stopped;
            log::debug!("[lifecycle] stopped");
        }
    }

    /// Returns true if the loop was (re)started.
    pub fn on_visibility_change(&mut self, host: &mut impl Host, visible: bool) -> bool {
        if visible {
            self.start(host)
        } else {
            self.stop(host);
            false
        }
    }

    /// Called at the top of the render callback. Consumes the request that
    /// fired and, while running, queues the next one before any work is
    /// done. Returns whether the frame should execute.
    pub fn begin_frame(&mut self, host: &mut impl Host) -> bool {
        self.render_request = None;
        if self.torn_down || self.state != RunState::Running {
            return false;
        }
        self.render_request = host.request_frame(FrameSlot::Render);
        true
    }

    /// Queue a callback for an input slot. Returns false when one is
    /// already outstanding; the caller keeps only the latest value.
    pub fn schedule(&mut self, host: &mut impl Host, slot: FrameSlot) -> bool {
        if self.torn_down || self.pending.iter().any(|(s, _)| *s == slot) {
            return false;
        }
        match host.request_frame(slot) {
            Some(id) => {
                self.pending.push((slot, id));
                true
            }
            None => false,
        }
    }

    /// Clear the pending flag of a slot whose callback fired. Returns
    /// whether the callback should run.
    pub fn complete(&mut self, slot: FrameSlot) -> bool {
        let Some(index) = self.pending.iter().position(|(s, _)| *s == slot) else {
            return false;
        };
        self.pending.swap_remove(index);
        !self.torn_down
    }

    pub fn is_pending(&self, slot: FrameSlot) -> bool {
        self.pending.iter().any(|(s, _)| *s == slot)
    }

    pub fn set_timer(&mut self, host: &mut impl Host, delay_ms: u32) -> Option<TimerId> {
        if self.torn_down {
            return None;
        }
        let id = host.set_timeout(delay_ms)?;
        self.timers.push(id);
        Some(id)
    }

    /// Forget a timer that fired. Returns whether it was still tracked.
    pub fn timer_fired(&mut self, id: TimerId) -> bool {
        let Some(index) = self.timers.iter().position(|t| *t == id) else {
            return false;
        };
        self.timers.swap_remove(index);
        !self.torn_down
    }

    /// Cancel every outstanding frame request and timer, keeping
    /// listeners and the surface.
    pub fn cancel_all(&mut self, host: &mut impl Host) {
        self.stop(host);
        for (slot, id) in self.pending.drain(..) {
            host.cancel_frame(slot, id);
        }
        for id in self.timers.drain(..) {
            host.clear_timeout(id);
        }
    }

    /// Ordered, idempotent teardown: listeners, frame requests and timers,
    /// then `release` (drops the caller's surface state), then the host
    /// surface, then the host node.
    pub fn teardown(&mut self, host: &mut impl Host, release: impl FnOnce()) {
        if self.torn_down {
            return;
        }
        for kind in self.listeners.drain(..) {
            host.detach_listener(kind);
        }
        self.cancel_all(host);
        self.torn_down = true;
        release();
        host.release_surface();
        host.detach_node();
        log::debug!("[lifecycle] torn down");
    }
}
