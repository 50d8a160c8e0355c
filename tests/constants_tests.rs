// Host-side tests for web presentation constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn glow_stops_fade_out_monotonically() {
    let offsets: Vec<f32> = GLOW_STOPS.iter().map(|(o, _)| *o).collect();
    let alphas: Vec<f32> = GLOW_STOPS.iter().map(|(_, a)| *a).collect();
    assert_eq!(offsets.first(), Some(&0.0));
    assert_eq!(offsets.last(), Some(&1.0));
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    assert!(alphas.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(alphas.last(), Some(&0.0), "glow must reach transparent at its rim");
}

#[test]
fn raster_size_divides_backing_store() {
    assert_eq!(raster_size(1200, 600), (200, 100));
    assert_eq!(raster_size(1201, 605), (200, 100));
}

#[test]
fn raster_size_never_collapses() {
    assert_eq!(raster_size(0, 0), (1, 1));
    assert_eq!(raster_size(5, 3), (1, 1));
}

#[test]
fn surface_canvas_never_intercepts_input() {
    assert!(SURFACE_CANVAS_STYLE.contains("pointer-events:none"));
    assert!(SURFACE_CANVAS_STYLE.contains("position:absolute"));
}
