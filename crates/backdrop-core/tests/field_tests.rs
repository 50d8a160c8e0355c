use backdrop_core::constants::{FIELD_ALPHA, MAX_SEGMENTS};
use backdrop_core::field::{rasterize, sample, segment_coverage};
use backdrop_core::{BranchField, BranchUniforms, MotionError, ParamSnapshot, QualityTier};
use glam::Vec2;

fn params(theme: f32, scroll: f32) -> ParamSnapshot {
    ParamSnapshot {
        theme,
        scroll,
        pointer: Vec2::splat(0.5),
        opacity: 1.0,
    }
}

#[test]
fn segment_count_follows_tier() {
    let high = BranchField::new(QualityTier::High);
    let low = BranchField::new(QualityTier::Low);
    // trunk + branches * (branch + two sub-branches)
    assert_eq!(high.segments_per_frame(), 5 * (1 + 3 * 3));
    assert_eq!(low.segments_per_frame(), 3 * (1 + 2 * 3));
    let frame = high.frame(1.0, params(1.0, 0.0));
    assert_eq!(frame.segments.len(), high.segments_per_frame());
    assert!(frame.segments.len() <= MAX_SEGMENTS);
}

#[test]
fn trunks_grow_from_bottom_edge() {
    let field = BranchField::new(QualityTier::High);
    let segs = field.skeleton(0.0, 0.0, Vec2::splat(0.5));
    let trunks: Vec<_> = segs.iter().filter(|s| (s.start.y - 0.05).abs() < 1e-6).collect();
    assert_eq!(trunks.len(), 5);
    for t in trunks {
        assert!(t.dir.y > 0.5, "trunk should point mostly upward");
        assert!((t.dir.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn scrolling_lengthens_trunks() {
    let field = BranchField::new(QualityTier::Low);
    let top = field.skeleton(2.0, 0.0, Vec2::new(0.5, 2.0));
    let bottom = field.skeleton(2.0, 1.0, Vec2::new(0.5, 2.0));
    assert!(bottom[0].length > top[0].length + 0.3);
}

#[test]
fn pointer_on_root_stretches_trunk() {
    let field = BranchField::new(QualityTier::High);
    let root = field.skeleton(0.0, 0.0, Vec2::new(0.5, 5.0))[0].start;
    let far = field.skeleton(0.0, 0.0, Vec2::new(root.x, 5.0))[0];
    let near = field.skeleton(0.0, 0.0, root)[0];
    assert!((near.length / far.length - 1.22).abs() < 1e-5);
    // nothing to bend toward, growth stays vertical
    assert!((near.dir - Vec2::Y).length() < 1e-6);
}

#[test]
fn branches_bend_toward_pointer_side() {
    let field = BranchField::new(QualityTier::High);
    let per_tree = 1 + 3 * 3;
    let root = field.skeleton(0.0, 0.0, Vec2::new(0.5, 5.0))[0].start;
    let right = field.skeleton(0.0, 0.0, root + Vec2::new(0.2, 0.0));
    let left = field.skeleton(0.0, 0.0, root - Vec2::new(0.2, 0.0));

    assert!(right[0].dir.x > 0.1);
    assert!(left[0].dir.x < -0.1);
    assert!((right[0].dir.x + left[0].dir.x).abs() < 1e-6);
    for i in 1..per_tree {
        assert!(
            right[i].dir.x > left[i].dir.x,
            "segment {i} should lean toward the pointer"
        );
    }
}

#[test]
fn pointer_beyond_reach_leaves_trunk_length_alone() {
    let field = BranchField::new(QualityTier::High);
    let root = field.skeleton(0.0, 0.0, Vec2::new(0.5, 5.0))[0].start;
    let far = field.skeleton(0.0, 0.0, Vec2::new(root.x, 5.0))[0];
    let outside = field.skeleton(0.0, 0.0, root + Vec2::new(0.0, 0.55))[0];
    let inside = field.skeleton(0.0, 0.0, root + Vec2::new(0.0, 0.45))[0];
    assert_eq!(outside.length, far.length);
    assert!(inside.length > far.length);
}

#[test]
fn coverage_is_zero_far_from_segment() {
    let field = BranchField::new(QualityTier::High);
    let seg = field.skeleton(0.0, 0.5, Vec2::splat(0.5))[0];
    let far = seg.start - seg.dir * 0.5;
    assert_eq!(segment_coverage(&seg, far, 0.0), 0.0);
    let on = seg.start + seg.dir * (seg.length * 0.1);
    assert!(segment_coverage(&seg, on, 0.0) > 0.0);
}

#[test]
fn alpha_stays_under_ambient_ceiling() {
    let field = BranchField::new(QualityTier::High);
    let frame = field.frame(3.0, params(0.0, 1.0));
    let mut max_alpha: f32 = 0.0;
    let mut sum = 0.0;
    for y in 0..64 {
        for x in 0..64 {
            let uv = Vec2::new((x as f32 + 0.5) / 64.0, (y as f32 + 0.5) / 64.0);
            let rgba = sample(&frame, uv);
            assert!(rgba.iter().all(|c| (0.0..=1.0).contains(c)));
            max_alpha = max_alpha.max(rgba[3]);
            sum += rgba[3];
        }
    }
    assert!(max_alpha > 0.0, "some branch pixels expected");
    // Segments stack at forks, but the field as a whole stays faint.
    assert!(max_alpha < 0.5);
    assert!(sum / (64.0 * 64.0) < FIELD_ALPHA * 0.5);
}

#[test]
fn zero_opacity_is_fully_transparent() {
    let field = BranchField::new(QualityTier::Low);
    let mut p = params(1.0, 0.5);
    p.opacity = 0.0;
    let frame = field.frame(1.0, p);
    let seg = frame.segments[0];
    let rgba = sample(&frame, seg.start + seg.dir * 0.05);
    assert_eq!(rgba[3], 0.0);
}

#[test]
fn rasterize_checks_buffer_size() {
    let field = BranchField::new(QualityTier::Low);
    let frame = field.frame(0.0, params(1.0, 0.0));
    let mut small = vec![0u8; 10];
    assert_eq!(
        rasterize(&frame, 4, 4, &mut small),
        Err(MotionError::BufferSize {
            expected: 64,
            actual: 10
        })
    );

    let (w, h) = (64, 48);
    let mut buf = vec![0u8; w * h * 4];
    rasterize(&frame, w as u32, h as u32, &mut buf).unwrap();
    assert!(buf.chunks_exact(4).any(|px| px[3] > 0));
}

#[test]
fn uniforms_pack_every_segment() {
    let field = BranchField::new(QualityTier::High);
    let frame = field.frame(1.5, params(0.25, 0.5));
    let u = frame.to_uniforms(640, 480);
    assert_eq!(u.segment_count as usize, frame.segments.len());
    assert_eq!(u.resolution, [640.0, 480.0]);
    assert_eq!(u.theme, 0.25);
    let first = frame.segments[0];
    assert_eq!(u.segments[0].start_dir[0], first.start.x);
    assert_eq!(u.segments[0].shape[0], first.length);
    // 16-byte aligned header followed by 64 packed segments
    assert_eq!(std::mem::size_of::<BranchUniforms>(), 48 + 64 * 32);
    assert_eq!(bytemuck::bytes_of(&u).len(), std::mem::size_of::<BranchUniforms>());
}
