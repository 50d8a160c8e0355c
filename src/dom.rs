use crate::constants::*;
use crate::input::ClientRect;
use backdrop_core::{scroll_progress, DeviceCapabilities, MotionConfig};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    matches!(window.match_media(REDUCED_MOTION_QUERY), Ok(Some(mql)) if mql.matches())
}

// `navigator.connection` is not typed in every web-sys release.
fn save_data(navigator: &web::Navigator) -> bool {
    js_sys::Reflect::get(navigator, &JsValue::from_str("connection"))
        .ok()
        .filter(|c| c.is_object())
        .and_then(|c| js_sys::Reflect::get(&c, &JsValue::from_str("saveData")).ok())
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

pub fn device_capabilities(window: &web::Window) -> DeviceCapabilities {
    let navigator = window.navigator();
    let cores = navigator.hardware_concurrency();
    DeviceCapabilities {
        reduced_motion: prefers_reduced_motion(window),
        save_data: save_data(&navigator),
        hardware_concurrency: (cores.is_finite() && cores >= 1.0).then_some(cores as u32),
    }
}

/// Page scroll as a fraction of the scrollable height.
pub fn page_scroll_progress(window: &web::Window) -> f32 {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport_h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let scroll_h = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    scroll_progress(scroll_y, scroll_h, viewport_h)
}

pub fn client_rect(element: &web::Element) -> ClientRect {
    let rect = element.get_bounding_client_rect();
    ClientRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

/// Append an absolutely positioned, non-interactive canvas to `container`.
pub fn create_surface_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("element is not a canvas"))?;
    _ = canvas.set_attribute("style", SURFACE_CANVAS_STYLE);
    _ = canvas.set_attribute("aria-hidden", "true");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

/// Overrides from the container's `data-*` attributes. Bad values are
/// reported and ignored as a whole.
pub fn read_config(container: &web::Element) -> MotionConfig {
    match MotionConfig::from_attributes(|name| container.get_attribute(name)) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("[config] {err}; using defaults");
            MotionConfig::default()
        }
    }
}
