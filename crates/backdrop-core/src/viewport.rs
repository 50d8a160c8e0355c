/// Clamp a reported device pixel ratio into `[1, max]`. Missing or nonsense
/// values (NaN, zero, negative) fall back to 1.
#[inline]
pub fn clamp_dpr(raw: f64, max: f32) -> f32 {
    let max = max.max(1.0);
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    (raw as f32).clamp(1.0, max)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub width_px: u32,
    pub height_px: u32,
    pub device_pixel_ratio: f32,
}

impl ViewportState {
    pub fn new(css_width: f64, css_height: f64, raw_dpr: f64, dpr_max: f32) -> Self {
        Self {
            width_px: floor_px(css_width),
            height_px: floor_px(css_height),
            device_pixel_ratio: clamp_dpr(raw_dpr, dpr_max),
        }
    }

    /// Backing-store size in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width_px as f32 * self.device_pixel_ratio).round() as u32;
        let h = (self.height_px as f32 * self.device_pixel_ratio).round() as u32;
        (w.max(1), h.max(1))
    }

    pub fn aspect(&self) -> f32 {
        self.width_px as f32 / self.height_px.max(1) as f32
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            width_px: 1,
            height_px: 1,
            device_pixel_ratio: 1.0,
        }
    }
}

#[inline]
fn floor_px(css: f64) -> u32 {
    if !css.is_finite() || css < 1.0 {
        1
    } else {
        css.floor().min(u32::MAX as f64) as u32
    }
}

/// Tracks the last applied viewport so sub-pixel layout churn never
/// reallocates the drawing surface.
#[derive(Clone, Debug)]
pub struct ViewportAdapter {
    dpr_max: f32,
    last: Option<ViewportState>,
}

impl ViewportAdapter {
    pub fn new(dpr_max: f32) -> Self {
        Self {
            dpr_max,
            last: None,
        }
    }

    pub fn current(&self) -> Option<ViewportState> {
        self.last
    }

    /// Returns the new state only if width, height or clamped DPR changed.
    pub fn observe(&mut self, css_width: f64, css_height: f64, raw_dpr: f64) -> Option<ViewportState> {
        let next = ViewportState::new(css_width, css_height, raw_dpr, self.dpr_max);
        if self.last == Some(next) {
            return None;
        }
        self.last = Some(next);
        Some(next)
    }
}
