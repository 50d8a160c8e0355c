use backdrop_core::constants::{BRANCH_DPR_MAX, PARTICLE_DPR_MAX};
use backdrop_core::{clamp_dpr, ViewportAdapter, ViewportState};
use proptest::prelude::*;

#[test]
fn unavailable_dpr_defaults_to_one() {
    assert_eq!(clamp_dpr(f64::NAN, BRANCH_DPR_MAX), 1.0);
    assert_eq!(clamp_dpr(0.0, BRANCH_DPR_MAX), 1.0);
    assert_eq!(clamp_dpr(-2.0, BRANCH_DPR_MAX), 1.0);
    assert_eq!(clamp_dpr(f64::INFINITY, PARTICLE_DPR_MAX), 1.0);
}

#[test]
fn dpr_is_capped_per_variant() {
    assert!((clamp_dpr(3.0, BRANCH_DPR_MAX) - 1.4).abs() < 1e-6);
    assert_eq!(clamp_dpr(3.0, PARTICLE_DPR_MAX), 2.0);
    assert_eq!(clamp_dpr(0.5, PARTICLE_DPR_MAX), 1.0);
    assert!((clamp_dpr(1.25, BRANCH_DPR_MAX) - 1.25).abs() < 1e-6);
}

#[test]
fn size_is_floored_and_at_least_one() {
    let v = ViewportState::new(1279.9, 719.2, 2.0, PARTICLE_DPR_MAX);
    assert_eq!((v.width_px, v.height_px), (1279, 719));
    assert_eq!(v.backing_size(), (2558, 1438));

    let tiny = ViewportState::new(0.0, -10.0, 1.0, BRANCH_DPR_MAX);
    assert_eq!((tiny.width_px, tiny.height_px), (1, 1));
}

#[test]
fn adapter_reports_only_changes() {
    let mut adapter = ViewportAdapter::new(BRANCH_DPR_MAX);
    assert!(adapter.observe(800.0, 600.0, 1.0).is_some());
    // sub-pixel layout churn
    assert!(adapter.observe(800.4, 600.9, 1.0).is_none());
    // DPR change above the cap is invisible
    assert!(adapter.observe(800.0, 600.0, 1.4).is_some());
    assert!(adapter.observe(800.0, 600.0, 2.0).is_none());
    assert!(adapter.observe(801.0, 600.0, 2.0).is_some());
    assert_eq!(adapter.current().map(|v| v.width_px), Some(801));
}

proptest! {
    #[test]
    fn clamped_dpr_is_always_in_bounds(raw in proptest::num::f64::ANY, max in 1.0f32..4.0) {
        let d = clamp_dpr(raw, max);
        prop_assert!(d >= 1.0 && d <= max);
    }

    #[test]
    fn viewport_is_never_degenerate(
        w in proptest::num::f64::ANY,
        h in proptest::num::f64::ANY,
        dpr in proptest::num::f64::ANY,
    ) {
        let v = ViewportState::new(w, h, dpr, PARTICLE_DPR_MAX);
        prop_assert!(v.width_px >= 1 && v.height_px >= 1);
        prop_assert!(v.device_pixel_ratio >= 1.0 && v.device_pixel_ratio <= PARTICLE_DPR_MAX);
        let (bw, bh) = v.backing_size();
        prop_assert!(bw >= 1 && bh >= 1);
    }
}
