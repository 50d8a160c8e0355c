//! Shader-style scalar helpers. These mirror the WGSL in
//! `shaders/branches.wgsl` so the raster fallback and the GPU agree.

use glam::Vec2;

#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn mix3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [mix(a[0], b[0], t), mix(a[1], b[1], t), mix(a[2], b[2], t)]
}

/// Hermite step. Edges may be given in either order; `e0 > e1` yields the
/// falling edge.
#[inline]
pub fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let span = e1 - e0;
    if span == 0.0 {
        return if x < e0 { 0.0 } else { 1.0 };
    }
    let t = ((x - e0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Hash of a lattice point into [0, 1).
#[inline]
pub fn hash(p: Vec2) -> f32 {
    fract((p.dot(Vec2::new(127.1, 311.7))).sin() * 43758.545)
}

/// Bilinear value noise with smooth interpolation.
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    let a = hash(i);
    let b = hash(i + Vec2::new(1.0, 0.0));
    let c = hash(i + Vec2::new(0.0, 1.0));
    let d = hash(i + Vec2::new(1.0, 1.0));
    mix(mix(a, b, u.x), mix(c, d, u.x), u.y)
}

/// Three-octave fractal sum, range [0, 0.875].
pub fn fbm(mut p: Vec2) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    for _ in 0..3 {
        value += amplitude * value_noise(p);
        p *= 2.0;
        amplitude *= 0.5;
    }
    value
}

/// Normalize, falling back when the vector is degenerate.
#[inline]
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let len = v.length();
    if len > 1e-6 && len.is_finite() {
        v / len
    } else {
        fallback
    }
}
