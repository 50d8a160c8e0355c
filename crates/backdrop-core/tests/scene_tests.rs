use backdrop_core::{
    edge_fade, Blend, Camera, FrameTick, ParamSnapshot, ParticlePalette, ParticleScene,
    ParticleSceneConfig, QualityTier, Scene, SpriteShape, StarField, ViewportState,
};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn snapshot() -> ParamSnapshot {
    ParamSnapshot {
        theme: 1.0,
        scroll: 0.0,
        pointer: Vec2::splat(0.5),
        opacity: 1.0,
    }
}

fn tick(frame: u64, dt: f32) -> FrameTick {
    FrameTick {
        elapsed_sec: frame as f32 * dt,
        dt_sec: dt,
        frame,
    }
}

fn scene(seed: u64) -> ParticleScene {
    let mut s = ParticleScene::new(ParticleSceneConfig::new(QualityTier::High, seed), true);
    s.resize(&ViewportState::new(1200.0, 800.0, 1.0, 2.0));
    s
}

#[test]
fn camera_projects_origin_to_center() {
    let cam = Camera::with_aspect(1.5);
    let p = cam.project(Vec3::ZERO, 1200.0, 800.0).unwrap();
    assert!((p.x - 600.0).abs() < 1e-3);
    assert!((p.y - 400.0).abs() < 1e-3);
    assert!((p.depth - 2.0).abs() < 1e-4);
    assert!(cam.project(Vec3::new(0.0, 0.0, 5.0), 1200.0, 800.0).is_none());
}

#[test]
fn unproject_inverts_project() {
    let cam = Camera::with_aspect(1.0);
    let world = cam.unproject(Vec3::new(0.3, -0.4, 0.9));
    let back = cam.project(world, 2.0, 2.0).unwrap();
    assert!((back.ndc.x - 0.3).abs() < 1e-3);
    assert!((back.ndc.y + 0.4).abs() < 1e-3);
}

#[test]
fn starfield_is_deterministic_and_faded_at_edges() {
    let cam = Camera::with_aspect(1.5);
    let palette = ParticlePalette::for_theme(true);
    let a = StarField::generate(&cam, &palette, true, 250, &mut StdRng::seed_from_u64(1));
    let b = StarField::generate(&cam, &palette, true, 250, &mut StdRng::seed_from_u64(1));
    assert_eq!(a.stars(), b.stars());
    assert!(!a.is_empty() && a.len() <= 250);
    assert!(a.stars().iter().all(|s| s.alpha > 0.001 && s.alpha <= 1.0));
    assert!(a.matches(true, 1.5));
    assert!(!a.matches(false, 1.5));
    assert!(!a.matches(true, 1.0));

    assert_eq!(edge_fade(1.2, 0.0), 0.0);
    assert!(edge_fade(0.0, 0.3) > edge_fade(0.0, -0.8));
}

#[test]
fn stars_are_regenerated_on_theme_and_aspect_change() {
    let mut s = scene(3);
    let dark = s.stars().stars().to_vec();
    s.set_dark_mode(false);
    assert_ne!(s.stars().stars(), &dark[..]);
    assert!(s.stars().matches(false, 1.5));

    let light = s.stars().stars().to_vec();
    // same aspect, different pixel size: stars are kept
    s.resize(&ViewportState::new(600.0, 400.0, 2.0, 2.0));
    assert_eq!(s.stars().stars(), &light[..]);
    s.resize(&ViewportState::new(800.0, 800.0, 1.0, 2.0));
    assert!(s.stars().matches(false, 1.0));
}

#[test]
fn static_frame_shows_only_stars() {
    let mut s = scene(5);
    let frame = s.simulate(&FrameTick::STATIC, &snapshot());
    assert_eq!(frame.sprites.len(), s.stars().len());
    assert!(frame
        .sprites
        .iter()
        .all(|sp| sp.shape == SpriteShape::Disc && sp.blend == Blend::Normal));
    assert_eq!(frame.collision_intensity, 0.0);
}

#[test]
fn collision_produces_additive_flash_and_burst() {
    let mut s = scene(6);
    let snap = snapshot();
    let mut saw_flash = false;
    let mut max_sprites = 0;
    for i in 0..(60 * 5) {
        let frame = s.simulate(&tick(i, 1.0 / 60.0), &snap);
        if frame.collision_intensity > 0.5 {
            saw_flash = true;
            let additive = frame
                .sprites
                .iter()
                .filter(|sp| sp.blend == Blend::Additive)
                .count();
            // flash + burst particles at least
            assert!(additive > 10);
        }
        max_sprites = max_sprites.max(frame.sprites.len());
        for sp in &frame.sprites {
            assert!(sp.alpha > 0.0 && sp.alpha <= 1.0 + 1e-6);
            assert!(sp.radius >= 0.0 && sp.radius.is_finite());
        }
    }
    assert!(saw_flash);
    assert!(max_sprites > s.stars().len());
}

#[test]
fn click_spawns_at_scaled_container_position() {
    let mut s = scene(8);
    let before = s.pair_count();
    let id = s.spawn_at(Vec2::new(1.0, 0.0));
    assert_eq!(s.pair_count(), before + 1);
    assert_eq!(id.0, 1);
    let second = s.spawn_at(Vec2::new(0.5, 0.5));
    assert_ne!(id, second);
}
