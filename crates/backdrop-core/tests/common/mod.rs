// Shared test doubles: a host that records every platform call into an
// event log, and a surface that counts what it was given.

#![allow(dead_code)]

use backdrop_core::{FrameId, FrameSlot, Host, ListenerKind, Surface, TimerId, ViewportState};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    RequestFrame(FrameSlot, FrameId),
    CancelFrame(FrameSlot, FrameId),
    SetTimeout(TimerId, u32),
    ClearTimeout(TimerId),
    Attach(ListenerKind),
    Detach(ListenerKind),
    SurfaceDropped,
    ReleaseSurface,
    DetachNode,
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub struct SpyHost {
    pub log: EventLog,
    next_id: i32,
    /// Listener kinds whose registration should fail.
    pub refuse: Vec<ListenerKind>,
}

impl SpyHost {
    pub fn new() -> Self {
        Self::with_log(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn with_log(log: EventLog) -> Self {
        Self {
            log,
            next_id: 1,
            refuse: Vec::new(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.log.borrow().iter().filter(|e| pred(e)).count()
    }

    /// Frame requests of `slot` not followed by a cancel. Does not know
    /// which requests fired; tests account for that themselves.
    pub fn outstanding_requests(&self, slot: FrameSlot) -> usize {
        let log = self.log.borrow();
        let requested: Vec<FrameId> = log
            .iter()
            .filter_map(|e| match e {
                Event::RequestFrame(s, id) if *s == slot => Some(*id),
                _ => None,
            })
            .collect();
        requested
            .iter()
            .filter(|id| {
                !log.iter()
                    .any(|e| matches!(e, Event::CancelFrame(s, c) if *s == slot && c == *id))
            })
            .count()
    }

    pub fn last_timer(&self) -> Option<TimerId> {
        self.log.borrow().iter().rev().find_map(|e| match e {
            Event::SetTimeout(id, _) => Some(*id),
            _ => None,
        })
    }

    fn next(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Host for SpyHost {
    fn request_frame(&mut self, slot: FrameSlot) -> Option<FrameId> {
        let id = FrameId(self.next());
        self.log.borrow_mut().push(Event::RequestFrame(slot, id));
        Some(id)
    }

    fn cancel_frame(&mut self, slot: FrameSlot, id: FrameId) {
        self.log.borrow_mut().push(Event::CancelFrame(slot, id));
    }

    fn set_timeout(&mut self, delay_ms: u32) -> Option<TimerId> {
        let id = TimerId(self.next());
        self.log.borrow_mut().push(Event::SetTimeout(id, delay_ms));
        Some(id)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.log.borrow_mut().push(Event::ClearTimeout(id));
    }

    fn attach_listener(&mut self, kind: ListenerKind) -> bool {
        if self.refuse.contains(&kind) {
            return false;
        }
        self.log.borrow_mut().push(Event::Attach(kind));
        true
    }

    fn detach_listener(&mut self, kind: ListenerKind) {
        self.log.borrow_mut().push(Event::Detach(kind));
    }

    fn release_surface(&mut self) {
        self.log.borrow_mut().push(Event::ReleaseSurface);
    }

    fn detach_node(&mut self) {
        self.log.borrow_mut().push(Event::DetachNode);
    }
}

/// Surface that remembers the last frame and viewport it saw.
pub struct SpySurface<F> {
    pub log: EventLog,
    pub applied: usize,
    pub resized: Vec<ViewportState>,
    pub last: Option<F>,
}

impl<F> SpySurface<F> {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            applied: 0,
            resized: Vec::new(),
            last: None,
        }
    }
}

impl<F: Clone> Surface for SpySurface<F> {
    type Frame = F;

    fn resize(&mut self, viewport: &ViewportState) {
        self.resized.push(*viewport);
    }

    fn apply(&mut self, frame: &F) {
        self.applied += 1;
        self.last = Some(frame.clone());
    }
}

impl<F> Drop for SpySurface<F> {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Event::SurfaceDropped);
    }
}

pub const LISTENERS: [ListenerKind; 4] = [
    ListenerKind::Scroll,
    ListenerKind::PointerMove,
    ListenerKind::Visibility,
    ListenerKind::Resize,
];
