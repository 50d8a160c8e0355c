use crate::constants::*;
use crate::dom;
use backdrop_core::{Rgb, SharedPool};
use wasm_bindgen::prelude::*;
use web_sys as web;

/// Glow sprites keyed by packed colour, shared by every particle surface
/// that was handed the same registry.
pub type GlowPool = SharedPool<u32, web::HtmlCanvasElement>;

/// Page-level owner of the glow sprite pool. Create one and pass it to each
/// `HawkingBackground` that should share textures.
#[wasm_bindgen]
#[derive(Clone, Default)]
pub struct GlowRegistry {
    pool: GlowPool,
}

#[wasm_bindgen]
impl GlowRegistry {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GlowRegistry {
        GlowRegistry::default()
    }

    /// Sprites currently held by at least one surface.
    #[wasm_bindgen(js_name = liveCount)]
    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    /// Sprites built since the registry was created.
    #[wasm_bindgen(js_name = allocations)]
    pub fn allocations(&self) -> f64 {
        self.pool.allocations() as f64
    }
}

impl GlowRegistry {
    pub fn pool(&self) -> GlowPool {
        self.pool.clone()
    }
}

/// Paint a soft radial glow of `color` into an offscreen canvas.
pub fn glow_sprite(document: &web::Document, color: Rgb) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("element is not a canvas"))?;
    canvas.set_width(GLOW_SPRITE_PX);
    canvas.set_height(GLOW_SPRITE_PX);
    let ctx = dom::context_2d(&canvas).ok_or_else(|| anyhow::anyhow!("no 2d context"))?;

    let half = GLOW_SPRITE_PX as f64 * 0.5;
    let gradient = ctx
        .create_radial_gradient(half, half, 0.0, half, half, half)
        .map_err(|e| anyhow::anyhow!("gradient: {:?}", e))?;
    for (offset, alpha) in GLOW_STOPS {
        gradient
            .add_color_stop(offset, &color.css(alpha))
            .map_err(|e| anyhow::anyhow!("color stop: {:?}", e))?;
    }
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, GLOW_SPRITE_PX as f64, GLOW_SPRITE_PX as f64);
    Ok(canvas)
}
