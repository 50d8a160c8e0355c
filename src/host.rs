use backdrop_core::{FrameId, FrameSlot, Host, ListenerKind, TimerId};
use fnv::FnvHashMap;
use std::collections::VecDeque;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Browser implementation of [`Host`]. Owns every closure handed to the
/// page so that dropping the host (or tearing down) leaves nothing behind.
///
/// Callbacks are installed with the `on_*` methods before the controller
/// asks for them; a request for a slot without a callback is refused.
pub struct WebHost {
    window: web::Window,
    document: web::Document,
    container: Option<web::Element>,
    canvas: Option<web::HtmlCanvasElement>,
    frame_callbacks: FnvHashMap<FrameSlot, Closure<dyn FnMut()>>,
    listeners: FnvHashMap<ListenerKind, Closure<dyn FnMut(web::Event)>>,
    resize_callback: Option<Closure<dyn FnMut()>>,
    resize_observer: Option<web::ResizeObserver>,
    timer_callback: Option<Closure<dyn FnMut()>>,
    // Browser timeouts don't tell the callback which id fired; issued ids
    // are kept in order and at most one is outstanding per owner.
    issued_timers: VecDeque<TimerId>,
}

impl WebHost {
    pub fn new(window: web::Window, document: web::Document) -> Self {
        Self {
            window,
            document,
            container: None,
            canvas: None,
            frame_callbacks: FnvHashMap::default(),
            listeners: FnvHashMap::default(),
            resize_callback: None,
            resize_observer: None,
            timer_callback: None,
            issued_timers: VecDeque::new(),
        }
    }

    pub fn window(&self) -> &web::Window {
        &self.window
    }

    pub fn document(&self) -> &web::Document {
        &self.document
    }

    pub fn set_container(&mut self, container: web::Element) {
        self.container = Some(container);
    }

    pub fn set_canvas(&mut self, canvas: web::HtmlCanvasElement) {
        self.canvas = Some(canvas);
    }

    pub fn on_frame(&mut self, slot: FrameSlot, callback: Closure<dyn FnMut()>) {
        self.frame_callbacks.insert(slot, callback);
    }

    pub fn on_event(&mut self, kind: ListenerKind, callback: Closure<dyn FnMut(web::Event)>) {
        self.listeners.insert(kind, callback);
    }

    pub fn on_resize(&mut self, callback: Closure<dyn FnMut()>) {
        self.resize_callback = Some(callback);
    }

    pub fn on_timer(&mut self, callback: Closure<dyn FnMut()>) {
        self.timer_callback = Some(callback);
    }

    /// Id of the timeout that is firing now.
    pub fn take_fired_timer(&mut self) -> Option<TimerId> {
        self.issued_timers.pop_front()
    }

    fn event_target(&self, kind: ListenerKind) -> Option<(web::EventTarget, &'static str)> {
        match kind {
            ListenerKind::Scroll => Some((self.window.clone().into(), "scroll")),
            ListenerKind::PointerMove => Some((self.window.clone().into(), "pointermove")),
            ListenerKind::Visibility => Some((self.document.clone().into(), "visibilitychange")),
            ListenerKind::Click => self.container.clone().map(|c| (c.into(), "click")),
            ListenerKind::Resize => None,
        }
    }

    fn observe_resize(&mut self) -> bool {
        let (Some(callback), Some(container)) = (&self.resize_callback, &self.container) else {
            return false;
        };
        match web::ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(container);
                self.resize_observer = Some(observer);
                true
            }
            Err(e) => {
                log::warn!("[host] ResizeObserver unavailable: {:?}", e);
                false
            }
        }
    }
}

impl Host for WebHost {
    fn request_frame(&mut self, slot: FrameSlot) -> Option<FrameId> {
        let callback = self.frame_callbacks.get(&slot)?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
            .map(FrameId)
    }

    fn cancel_frame(&mut self, _slot: FrameSlot, id: FrameId) {
        _ = self.window.cancel_animation_frame(id.0);
    }

    fn set_timeout(&mut self, delay_ms: u32) -> Option<TimerId> {
        let callback = self.timer_callback.as_ref()?;
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .ok()
            .map(TimerId)?;
        self.issued_timers.push_back(id);
        Some(id)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.window.clear_timeout_with_handle(id.0);
        self.issued_timers.retain(|t| *t != id);
    }

    fn attach_listener(&mut self, kind: ListenerKind) -> bool {
        if kind == ListenerKind::Resize {
            return self.observe_resize();
        }
        let Some((target, name)) = self.event_target(kind) else {
            return false;
        };
        let Some(callback) = self.listeners.get(&kind) else {
            return false;
        };
        target
            .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
            .is_ok()
    }

    fn detach_listener(&mut self, kind: ListenerKind) {
        if kind == ListenerKind::Resize {
            if let Some(observer) = self.resize_observer.take() {
                observer.disconnect();
            }
            self.resize_callback = None;
            return;
        }
        if let (Some((target, name)), Some(callback)) =
            (self.event_target(kind), self.listeners.remove(&kind))
        {
            _ = target.remove_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
        }
    }

    fn release_surface(&mut self) {
        if let Some(canvas) = &self.canvas {
            // A zero-sized backing store lets the browser drop the context's
            // memory right away.
            canvas.set_width(0);
            canvas.set_height(0);
        }
    }

    fn detach_node(&mut self) {
        if let Some(canvas) = self.canvas.take() {
            canvas.remove();
        }
    }
}
