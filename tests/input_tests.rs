// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

fn rect() -> ClientRect {
    ClientRect {
        left: 100.0,
        top: 50.0,
        width: 400.0,
        height: 200.0,
    }
}

#[test]
fn client_uv_is_relative_to_top_left() {
    assert_eq!(client_uv(100.0, 50.0, &rect()), Some(Vec2::new(0.0, 0.0)));
    assert_eq!(client_uv(300.0, 100.0, &rect()), Some(Vec2::new(0.5, 0.25)));
    assert_eq!(client_uv(500.0, 250.0, &rect()), Some(Vec2::new(1.0, 1.0)));
}

#[test]
fn client_uv_clamps_outside_points() {
    assert_eq!(client_uv(0.0, 1000.0, &rect()), Some(Vec2::new(0.0, 1.0)));
    assert_eq!(client_uv(-50.0, -50.0, &rect()), Some(Vec2::ZERO));
}

#[test]
fn bottom_left_origin_flips_vertical_axis() {
    assert_eq!(
        client_uv_bottom_left(300.0, 100.0, &rect()),
        Some(Vec2::new(0.5, 0.75))
    );
    assert_eq!(
        client_uv_bottom_left(100.0, 250.0, &rect()),
        Some(Vec2::new(0.0, 0.0))
    );
}

#[test]
fn collapsed_rect_yields_no_position() {
    let empty = ClientRect {
        width: 0.0,
        ..rect()
    };
    assert!(empty.is_empty());
    assert_eq!(client_uv(120.0, 60.0, &empty), None);
    assert_eq!(client_uv_bottom_left(120.0, 60.0, &empty), None);
    assert!(ClientRect {
        height: f64::NAN,
        ..rect()
    }
    .is_empty());
}
