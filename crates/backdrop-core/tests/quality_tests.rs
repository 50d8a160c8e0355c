use backdrop_core::{DeviceCapabilities, MotionPolicy, QualityTier, Variant};

fn caps(reduced_motion: bool, save_data: bool, cores: Option<u32>) -> DeviceCapabilities {
    DeviceCapabilities {
        reduced_motion,
        save_data,
        hardware_concurrency: cores,
    }
}

#[test]
fn tier_detection() {
    assert_eq!(QualityTier::detect(&caps(false, false, Some(8))), QualityTier::High);
    assert_eq!(QualityTier::detect(&caps(false, false, Some(4))), QualityTier::Low);
    assert_eq!(QualityTier::detect(&caps(false, true, Some(16))), QualityTier::Low);
    assert_eq!(QualityTier::detect(&caps(false, false, None)), QualityTier::High);
}

#[test]
fn frame_rates_per_variant_and_tier() {
    let high = caps(false, false, Some(8));
    let low = caps(false, false, Some(2));
    assert_eq!(MotionPolicy::resolve(Variant::Branches, &high).max_fps, 30);
    assert_eq!(MotionPolicy::resolve(Variant::Branches, &low).max_fps, 24);
    assert_eq!(MotionPolicy::resolve(Variant::Particles, &high).max_fps, 60);
    assert_eq!(MotionPolicy::resolve(Variant::Particles, &low).max_fps, 30);
}

#[test]
fn reduced_motion_zeroes_frame_rate_and_ignores_caps() {
    let policy = MotionPolicy::resolve(Variant::Particles, &caps(true, false, Some(8)))
        .with_max_fps(Some(20));
    assert!(policy.reduced_motion);
    assert_eq!(policy.max_fps, 0);
}

#[test]
fn configured_cap_only_lowers() {
    let high = caps(false, false, Some(8));
    let capped = MotionPolicy::resolve(Variant::Branches, &high).with_max_fps(Some(15));
    assert_eq!(capped.max_fps, 15);
    let raised = MotionPolicy::resolve(Variant::Branches, &high).with_max_fps(Some(120));
    assert_eq!(raised.max_fps, 30);
}

#[test]
fn zero_cap_keeps_animation_drawing() {
    let policy = MotionPolicy::resolve(Variant::Branches, &caps(false, false, Some(8)))
        .with_max_fps(Some(0));
    assert!(!policy.reduced_motion);
    assert_eq!(policy.max_fps, 1);
}

#[test]
fn tier_scales_generator_sizes() {
    assert_eq!(QualityTier::High.tree_count(), 5);
    assert_eq!(QualityTier::Low.tree_count(), 3);
    assert_eq!(QualityTier::High.branch_count(), 3);
    assert_eq!(QualityTier::Low.branch_count(), 2);
    assert!(QualityTier::Low.burst_count() < QualityTier::High.burst_count());
}
