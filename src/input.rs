use glam::Vec2;

/// Container-space rectangle in CSS pixels, as reported by
/// `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

// ---------------- Pointer helpers ----------------
/// Pointer position relative to `rect`, origin top-left, clamped to [0,1].
/// `None` for a collapsed rectangle.
#[inline]
pub fn client_uv(client_x: f64, client_y: f64, rect: &ClientRect) -> Option<Vec2> {
    if rect.is_empty() {
        return None;
    }
    let u = ((client_x - rect.left) / rect.width).clamp(0.0, 1.0);
    let v = ((client_y - rect.top) / rect.height).clamp(0.0, 1.0);
    Some(Vec2::new(u as f32, v as f32))
}

/// Same as [`client_uv`] with the origin at the bottom-left, the convention
/// of the branch shader.
#[inline]
pub fn client_uv_bottom_left(client_x: f64, client_y: f64, rect: &ClientRect) -> Option<Vec2> {
    client_uv(client_x, client_y, rect).map(|uv| Vec2::new(uv.x, 1.0 - uv.y))
}
