use backdrop_core::constants::{POINTER_LERP, SCROLL_LERP, THEME_LERP};
use backdrop_core::{scroll_progress, AnimationParameters, Smoothed};
use glam::Vec2;
use proptest::prelude::*;

#[test]
fn converges_to_target() {
    let mut s = Smoothed::new(0.0_f32, THEME_LERP);
    s.set_target(1.0);
    let mut steps = 0;
    while !s.is_settled(1e-3) {
        s.advance();
        steps += 1;
        assert!(steps < 1_000, "did not converge");
    }
    assert!((s.current() - 1.0).abs() <= 1e-3);
}

#[test]
fn advance_moves_by_rate_fraction() {
    let mut s = Smoothed::new(0.0_f32, SCROLL_LERP);
    s.set_target(1.0);
    s.advance();
    assert!((s.current() - SCROLL_LERP).abs() < 1e-6);
}

#[test]
fn snap_mode_lands_on_target_in_one_write() {
    let mut s = Smoothed::new(0.25_f32, THEME_LERP).with_snap(true);
    s.set_target(0.8);
    assert_eq!(s.current(), 0.8);

    let mut p = Smoothed::new(Vec2::splat(0.5), POINTER_LERP).with_snap(true);
    p.set_target(Vec2::new(0.1, 0.9));
    assert_eq!(p.current(), Vec2::new(0.1, 0.9));
}

#[test]
fn targets_are_clamped_into_unit_domain() {
    let mut s = Smoothed::new(0.5_f32, THEME_LERP);
    s.set_target(3.0);
    assert_eq!(s.target(), 1.0);
    s.set_target(-2.0);
    assert_eq!(s.target(), 0.0);
    s.set_target(f32::NAN);
    assert_eq!(s.target(), 0.0);
}

#[test]
fn parameters_start_from_theme_and_center_pointer() {
    let dark = AnimationParameters::new(true, 0.3, false);
    let snap = dark.snapshot();
    assert_eq!(snap.theme, 1.0);
    assert!((snap.scroll - 0.3).abs() < 1e-6);
    assert_eq!(snap.pointer, Vec2::splat(0.5));
    assert_eq!(snap.opacity, 1.0);

    let light = AnimationParameters::new(false, 0.0, false);
    assert_eq!(light.snapshot().theme, 0.0);
}

#[test]
fn reduced_motion_parameters_snap() {
    let mut params = AnimationParameters::new(true, 0.0, true);
    params.theme_blend.set_target(0.0);
    params.scroll_progress.set_target(0.7);
    let snap = params.snapshot();
    assert_eq!(snap.theme, 0.0);
    assert!((snap.scroll - 0.7).abs() < 1e-6);
}

#[test]
fn scroll_progress_handles_short_pages() {
    assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
    assert_eq!(scroll_progress(100.0, 800.0, 800.0), 1.0);
    assert!((scroll_progress(500.0, 2000.0, 1000.0) - 0.5).abs() < 1e-6);
    assert_eq!(scroll_progress(5000.0, 2000.0, 1000.0), 1.0);
    assert_eq!(scroll_progress(-50.0, 2000.0, 1000.0), 0.0);
}

proptest! {
    #[test]
    fn current_stays_between_start_and_target(
        start in 0.0f32..=1.0,
        target in -2.0f32..3.0,
        rate in 0.01f32..0.99,
        steps in 1usize..200,
    ) {
        let mut s = Smoothed::new(start, rate);
        s.set_target(target);
        let goal = s.target();
        let (lo, hi) = if start < goal { (start, goal) } else { (goal, start) };
        for _ in 0..steps {
            s.advance();
            let c = s.current();
            prop_assert!(c >= lo - 1e-6 && c <= hi + 1e-6);
            prop_assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn vector_current_stays_in_unit_square(
        x in -1.0f32..2.0,
        y in -1.0f32..2.0,
        steps in 1usize..100,
    ) {
        let mut p = Smoothed::new(Vec2::splat(0.5), POINTER_LERP);
        p.set_target(Vec2::new(x, y));
        for _ in 0..steps {
            p.advance();
            let c = p.current();
            prop_assert!((0.0..=1.0).contains(&c.x) && (0.0..=1.0).contains(&c.y));
        }
    }

    #[test]
    fn scroll_progress_is_a_unit_fraction(
        y in -1e6f64..1e6,
        height in 0.0f64..1e6,
        viewport in 0.0f64..1e5,
    ) {
        let p = scroll_progress(y, height, viewport);
        prop_assert!((0.0..=1.0).contains(&p));
    }
}
