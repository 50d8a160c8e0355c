use super::glow::{glow_sprite, GlowPool};
use crate::dom;
use backdrop_core::{Blend, Lease, ParticlePalette, Rgb, SceneFrame, Sprite, SpriteShape, Surface, ViewportState};
use fnv::FnvHashMap;
use std::f64::consts::TAU;
use web_sys as web;

type GlowLease = Lease<u32, web::HtmlCanvasElement>;

/// Canvas2D painter for the particle variant. Holds leases on the glow
/// sprites of the current palette; switching palette takes the new leases
/// before letting the old ones go, so shared colours are never rebuilt.
pub struct ParticleSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    document: web::Document,
    pool: GlowPool,
    glows: FnvHashMap<u32, GlowLease>,
    width: u32,
    height: u32,
}

impl ParticleSurface {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        document: web::Document,
        pool: GlowPool,
        palette: &ParticlePalette,
    ) -> anyhow::Result<Self> {
        let ctx = dom::context_2d(&canvas).ok_or_else(|| anyhow::anyhow!("no 2d context"))?;
        let mut surface = Self {
            width: canvas.width(),
            height: canvas.height(),
            canvas,
            ctx,
            document,
            pool,
            glows: FnvHashMap::default(),
        };
        surface.set_palette(palette);
        Ok(surface)
    }

    fn lease(&self, color: Rgb) -> anyhow::Result<GlowLease> {
        self.pool.acquire(color.key(), || glow_sprite(&self.document, color))
    }

    pub fn set_palette(&mut self, palette: &ParticlePalette) {
        let mut next = FnvHashMap::default();
        for color in palette.glow_colors() {
            if next.contains_key(&color.key()) {
                continue;
            }
            match self.lease(color) {
                Ok(lease) => {
                    next.insert(color.key(), lease);
                }
                Err(err) => log::warn!("[painter] glow sprite: {err}"),
            }
        }
        self.glows = next;
    }

    fn glow_for(&mut self, color: Rgb) -> Option<web::HtmlCanvasElement> {
        if let Some(lease) = self.glows.get(&color.key()) {
            return Some((**lease).clone());
        }
        let lease = self.lease(color).ok()?;
        let sprite = (*lease).clone();
        self.glows.insert(color.key(), lease);
        Some(sprite)
    }

    fn set_blend(&self, blend: Blend) {
        let op = match blend {
            Blend::Normal => "source-over",
            Blend::Additive => "lighter",
        };
        _ = self.ctx.set_global_composite_operation(op);
    }

    fn draw(&mut self, sprite: &Sprite) {
        if sprite.alpha <= 0.0 || sprite.radius <= 0.0 {
            return;
        }
        self.set_blend(sprite.blend);
        let (x, y, r) = (sprite.x as f64, sprite.y as f64, sprite.radius as f64);
        match sprite.shape {
            SpriteShape::Disc => {
                self.ctx.set_global_alpha(1.0);
                self.ctx.set_fill_style_str(&sprite.color.css(sprite.alpha));
                self.ctx.begin_path();
                _ = self.ctx.arc(x, y, r, 0.0, TAU);
                self.ctx.fill();
            }
            SpriteShape::Glow => {
                let Some(image) = self.glow_for(sprite.color) else {
                    return;
                };
                self.ctx.set_global_alpha(sprite.alpha.clamp(0.0, 1.0) as f64);
                _ = self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                    &image,
                    x - r,
                    y - r,
                    r * 2.0,
                    r * 2.0,
                );
            }
        }
    }
}

impl Surface for ParticleSurface {
    type Frame = SceneFrame;

    fn resize(&mut self, viewport: &ViewportState) {
        let (w, h) = viewport.backing_size();
        if w == self.width && h == self.height {
            return;
        }
        self.width = w;
        self.height = h;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }

    fn apply(&mut self, frame: &SceneFrame) {
        self.ctx.set_global_alpha(1.0);
        _ = self.ctx.set_global_composite_operation("source-over");
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        for sprite in &frame.sprites {
            self.draw(sprite);
        }
        self.set_blend(Blend::Normal);
        self.ctx.set_global_alpha(1.0);
    }
}
