// Browser-side presentation constants. Engine tuning lives in
// `backdrop_core::constants`.

// Canvas2D fallback renders the branch field at this fraction of the
// backing size and lets CSS scale it up.
pub const RASTER_DOWNSCALE: u32 = 6;

/// Raster fallback resolution for a backing store, never below 1x1.
#[inline]
pub fn raster_size(width: u32, height: u32) -> (u32, u32) {
    ((width / RASTER_DOWNSCALE).max(1), (height / RASTER_DOWNSCALE).max(1))
}

// Glow sprite texture
pub const GLOW_SPRITE_PX: u32 = 64;
pub const GLOW_STOPS: [(f32, f32); 4] = [(0.0, 1.0), (0.25, 0.9), (0.55, 0.35), (1.0, 0.0)];

// Surface canvas
pub const SURFACE_CANVAS_STYLE: &str = "position:absolute;inset:0;width:100%;height:100%;\
display:block;pointer-events:none;";

// Scrambled label
pub const SCRAMBLE_FADE_TRANSITION: &str = "opacity 0.1s ease-out";
pub const SR_ONLY_CLASS: &str = "sr-only";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
