use crate::constants::raster_size;
use crate::dom;
use backdrop_core::field::rasterize;
use backdrop_core::{BranchFrame, ViewportState};
use wasm_bindgen::Clamped;
use web_sys as web;

/// Canvas2D fallback for the branch field: the frame is shaded on the CPU
/// at a fraction of the backing size and CSS stretches it to fill.
pub struct RasterSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = dom::context_2d(&canvas).ok_or_else(|| anyhow::anyhow!("no 2d context"))?;
        let (width, height) = raster_size(canvas.width(), canvas.height());
        let mut surface = Self {
            canvas,
            ctx,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        surface.set_size(width, height);
        Ok(surface)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize * 4, 0);
    }

    pub fn resize(&mut self, viewport: &ViewportState) {
        let (w, h) = viewport.backing_size();
        let (w, h) = raster_size(w, h);
        self.set_size(w, h);
    }

    pub fn apply(&mut self, frame: &BranchFrame) {
        if let Err(err) = rasterize(frame, self.width, self.height, &mut self.pixels) {
            log::warn!("[raster] {err}");
            return;
        }
        let image = web::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&self.pixels),
            self.width,
            self.height,
        );
        match image {
            Ok(image) => {
                _ = self.ctx.put_image_data(&image, 0.0, 0.0);
            }
            Err(e) => log::warn!("[raster] ImageData: {:?}", e),
        }
    }
}
