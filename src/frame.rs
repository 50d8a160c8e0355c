use crate::dom;
use crate::host::WebHost;
use crate::input::{self, ClientRect};
use backdrop_core::{
    Component, FrameSlot, InputSample, InstantSource, ListenerKind, Scene, Surface, TimeSource,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-instance state shared between the exported handle and the page
/// callbacks. Callbacks only hold a `Weak`, so dropping the handle drops
/// everything, and `Drop` makes sure the page is left clean.
pub(crate) struct Mounted<S, P>
where
    S: Scene,
    P: Surface<Frame = S::Frame>,
{
    pub(crate) host: WebHost,
    pub(crate) component: Option<Component<S, P>>,
    time: InstantSource,
    container: web::Element,
    rect: ClientRect,
    // Branch shader space has its origin at the bottom-left.
    flip_pointer_y: bool,
}

pub(crate) type SharedMount<S, P> = Rc<RefCell<Mounted<S, P>>>;

impl<S, P> Mounted<S, P>
where
    S: Scene,
    P: Surface<Frame = S::Frame>,
{
    pub(crate) fn new(host: WebHost, container: web::Element, flip_pointer_y: bool) -> Self {
        let rect = dom::client_rect(&container);
        Self {
            host,
            component: None,
            time: InstantSource::new(),
            container,
            rect,
            flip_pointer_y,
        }
    }

    pub(crate) fn refresh_rect(&mut self) -> ClientRect {
        self.rect = dom::client_rect(&self.container);
        self.rect
    }

    fn render_frame(&mut self) {
        let Mounted {
            host,
            component,
            time,
            ..
        } = self;
        if let Some(component) = component.as_mut() {
            component.on_render_frame(host, time.now_ms());
        }
    }

    fn scroll_event(&mut self, _event: &web::Event) {
        let Mounted {
            host, component, ..
        } = self;
        if let Some(component) = component.as_mut() {
            let progress = dom::page_scroll_progress(host.window());
            component.schedule_input(host, InputSample::Scroll(progress));
        }
    }

    fn scroll_frame(&mut self) {
        // Scrolling moves the container; keep pointer mapping in sync.
        self.refresh_rect();
        if let Some(component) = self.component.as_mut() {
            component.complete_input(FrameSlot::Scroll);
        }
    }

    fn pointer_event(&mut self, event: &web::Event) {
        let Some(ev) = event.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
        let uv = if self.flip_pointer_y {
            input::client_uv_bottom_left(x, y, &self.rect)
        } else {
            input::client_uv(x, y, &self.rect)
        };
        let Mounted {
            host, component, ..
        } = self;
        if let (Some(component), Some(uv)) = (component.as_mut(), uv) {
            component.schedule_input(host, InputSample::Pointer(uv));
        }
    }

    fn pointer_frame(&mut self) {
        if let Some(component) = self.component.as_mut() {
            component.complete_input(FrameSlot::Pointer);
        }
    }

    fn visibility_event(&mut self, _event: &web::Event) {
        let hidden = self.host.document().hidden();
        let Mounted {
            host, component, ..
        } = self;
        if let Some(component) = component.as_mut() {
            component.on_visibility_change(host, !hidden);
        }
    }

    fn resized(&mut self) {
        let rect = self.refresh_rect();
        if let Some(component) = self.component.as_mut() {
            if let Some(viewport) = component.on_resize(rect.width, rect.height, dom::device_pixel_ratio()) {
                log::debug!(
                    "[frame] viewport {}x{} @{:.2}",
                    viewport.width_px,
                    viewport.height_px,
                    viewport.device_pixel_ratio
                );
            }
        }
    }

    pub(crate) fn unmount(&mut self) {
        let Mounted {
            host, component, ..
        } = self;
        if let Some(component) = component.as_mut() {
            component.unmount(host);
        }
    }
}

impl<S, P> Drop for Mounted<S, P>
where
    S: Scene,
    P: Surface<Frame = S::Frame>,
{
    fn drop(&mut self) {
        self.unmount();
    }
}

pub(crate) fn frame_closure<S, P>(
    weak: Weak<RefCell<Mounted<S, P>>>,
    handler: fn(&mut Mounted<S, P>),
) -> Closure<dyn FnMut()>
where
    S: Scene + 'static,
    P: Surface<Frame = S::Frame> + 'static,
{
    Closure::wrap(Box::new(move || {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if let Ok(mut mounted) = shared.try_borrow_mut() {
            handler(&mut *mounted);
        }
    }) as Box<dyn FnMut()>)
}

pub(crate) fn event_closure<S, P>(
    weak: Weak<RefCell<Mounted<S, P>>>,
    handler: fn(&mut Mounted<S, P>, &web::Event),
) -> Closure<dyn FnMut(web::Event)>
where
    S: Scene + 'static,
    P: Surface<Frame = S::Frame> + 'static,
{
    Closure::wrap(Box::new(move |event: web::Event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if let Ok(mut mounted) = shared.try_borrow_mut() {
            handler(&mut *mounted, &event);
        }
    }) as Box<dyn FnMut(web::Event)>)
}

/// Install the render loop and the callbacks behind `listeners` on the
/// host. Click handling is variant specific and installed by the caller.
pub(crate) fn wire<S, P>(shared: &SharedMount<S, P>, listeners: &[ListenerKind])
where
    S: Scene + 'static,
    P: Surface<Frame = S::Frame> + 'static,
{
    let weak = Rc::downgrade(shared);
    let mut mounted = shared.borrow_mut();
    let host = &mut mounted.host;
    host.on_frame(FrameSlot::Render, frame_closure(weak.clone(), Mounted::render_frame));
    for &kind in listeners {
        match kind {
            ListenerKind::Scroll => {
                host.on_event(kind, event_closure(weak.clone(), Mounted::scroll_event));
                host.on_frame(FrameSlot::Scroll, frame_closure(weak.clone(), Mounted::scroll_frame));
            }
            ListenerKind::PointerMove => {
                host.on_event(kind, event_closure(weak.clone(), Mounted::pointer_event));
                host.on_frame(FrameSlot::Pointer, frame_closure(weak.clone(), Mounted::pointer_frame));
            }
            ListenerKind::Visibility => {
                host.on_event(kind, event_closure(weak.clone(), Mounted::visibility_event));
            }
            ListenerKind::Resize => {
                host.on_resize(frame_closure(weak.clone(), Mounted::resized));
            }
            ListenerKind::Click => {}
        }
    }
}
