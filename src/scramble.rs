use crate::constants::*;
use crate::dom;
use crate::host::WebHost;
use backdrop_core::{FrameSlot, ScrambleOptions, ScrambleText};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys as web;

struct ScrambleMount {
    host: WebHost,
    text: ScrambleText,
    visible: web::HtmlElement,
    accessible: web::Element,
    element: web::Element,
}

impl ScrambleMount {
    fn paint(&self) {
        self.visible.set_text_content(Some(self.text.shown()));
        _ = self
            .visible
            .style()
            .set_property("opacity", &format!("{:.3}", self.text.opacity()));
    }

    fn on_frame(&mut self) {
        let ScrambleMount { host, text, .. } = self;
        text.on_frame(host);
        self.paint();
    }

    fn on_timer(&mut self) {
        let ScrambleMount { host, text, .. } = self;
        if let Some(id) = host.take_fired_timer() {
            text.on_timer(host, id);
        }
        self.paint();
    }

    fn set_text(&mut self, value: &str) {
        // Assistive tech gets the final text right away.
        _ = self.element.set_attribute("aria-label", value);
        self.accessible.set_text_content(Some(value));
        let ScrambleMount { host, text, .. } = self;
        text.set_text(host, value);
        self.paint();
    }
}

impl Drop for ScrambleMount {
    fn drop(&mut self) {
        let ScrambleMount { host, text, .. } = self;
        text.dispose(host);
    }
}

fn callback(weak: Weak<RefCell<ScrambleMount>>, handler: fn(&mut ScrambleMount)) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if let Ok(mut mount) = shared.try_borrow_mut() {
            handler(&mut *mount);
        }
    }) as Box<dyn FnMut()>)
}

fn span(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    document
        .create_element("span")
        .map_err(|e| anyhow::anyhow!("create span: {:?}", e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow::anyhow!("span is not an HtmlElement"))
}

fn bind(element: web::HtmlElement, text: &str) -> anyhow::Result<Rc<RefCell<ScrambleMount>>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let reduced_motion = dom::prefers_reduced_motion(&window);

    let visible = span(&document)?;
    _ = visible.set_attribute("aria-hidden", "true");
    _ = visible
        .style()
        .set_property("transition", SCRAMBLE_FADE_TRANSITION);
    let accessible = span(&document)?;
    accessible.set_class_name(SR_ONLY_CLASS);
    accessible.set_text_content(Some(text));

    element.set_text_content(None);
    _ = element.set_attribute("aria-label", text);
    element
        .append_child(&visible)
        .map_err(|e| anyhow::anyhow!("append: {:?}", e))?;
    element
        .append_child(&accessible)
        .map_err(|e| anyhow::anyhow!("append: {:?}", e))?;

    let mount = ScrambleMount {
        host: WebHost::new(window, document),
        text: ScrambleText::new(text, ScrambleOptions::default(), reduced_motion, rand::random::<u64>()),
        visible,
        accessible: accessible.into(),
        element: element.into(),
    };
    mount.paint();
    let shared = Rc::new(RefCell::new(mount));
    {
        let weak = Rc::downgrade(&shared);
        let mut mount = shared.borrow_mut();
        mount
            .host
            .on_frame(FrameSlot::Scramble, callback(weak.clone(), ScrambleMount::on_frame));
        mount.host.on_timer(callback(weak, ScrambleMount::on_timer));
    }
    Ok(shared)
}

/// Label that scrambles into each new text, e.g. after a language switch.
/// The element's children are replaced by a decorative span and a
/// screen-reader copy of the real text.
#[wasm_bindgen]
pub struct ScrambleBinding {
    mount: Option<Rc<RefCell<ScrambleMount>>>,
}

#[wasm_bindgen]
impl ScrambleBinding {
    #[wasm_bindgen(constructor)]
    pub fn new(element: web::HtmlElement, text: &str) -> ScrambleBinding {
        let mount = match bind(element, text) {
            Ok(mount) => Some(mount),
            Err(e) => {
                log::warn!("[scramble] {:?}", e);
                None
            }
        };
        ScrambleBinding { mount }
    }

    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&self, text: &str) {
        if let Some(mount) = &self.mount {
            mount.borrow_mut().set_text(text);
        }
    }

    pub fn dispose(&mut self) {
        self.mount.take();
    }
}
