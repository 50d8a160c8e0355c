mod common;

use backdrop_core::{total_frames_for, FrameSlot, ScrambleOptions, ScrambleText, ScrambleTransition};
use common::{Event, SpyHost};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn frame_budget_from_duration() {
    assert_eq!(total_frames_for(450, 60), 27);
    assert_eq!(total_frames_for(0, 60), 1);
    assert_eq!(total_frames_for(1000, 30), 30);
}

#[test]
fn transition_ends_on_target_with_full_opacity() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut t = ScrambleTransition::new("Projects", "Projekte", 27, 0.15, "etaoinshrdlucm", &mut rng);
    let mut steps = 0;
    let last = loop {
        let step = t.step(&mut rng);
        steps += 1;
        assert!(step.opacity >= 0.5 && step.opacity <= 1.0);
        if step.done {
            break step;
        }
        assert!(steps <= 28, "transition overran its frame budget");
    };
    assert_eq!(last.text, "Projekte");
    assert_eq!(last.opacity, 1.0);
    assert!(t.is_done());
}

#[test]
fn non_letters_resolve_immediately() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut t = ScrambleTransition::new("ab", "x - 2", 30, 0.15, "etaoinshrdlucm", &mut rng);
    let first = t.step(&mut rng);
    let chars: Vec<char> = first.text.chars().collect();
    assert_eq!(chars.len(), 5);
    assert_eq!(chars[1], ' ');
    assert_eq!(chars[2], '-');
    assert_eq!(chars[3], ' ');
    assert_eq!(chars[4], '2');
}

#[test]
fn scrambled_letters_follow_target_case() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut t = ScrambleTransition::new("", "ABCDEFGH", 40, 1.0, "xyz", &mut rng);
    for _ in 0..20 {
        let step = t.step(&mut rng);
        for c in step.text.chars() {
            assert!(c.is_ascii_uppercase(), "unexpected {c:?} in {:?}", step.text);
        }
    }
}

#[test]
fn shorter_target_drops_trailing_characters() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut t = ScrambleTransition::new("Contact me", "Kontakt", 10, 0.15, "abc", &mut rng);
    let mut last = t.step(&mut rng);
    while !last.done {
        last = t.step(&mut rng);
    }
    assert_eq!(last.text, "Kontakt");
}

#[test]
fn label_runs_delay_then_frames() {
    let mut host = SpyHost::new();
    let options = ScrambleOptions {
        delay_ms: 120,
        ..ScrambleOptions::default()
    };
    let mut label = ScrambleText::new("About", options, false, 1);
    label.set_text(&mut host, "Über");
    assert!(label.is_animating());
    assert_eq!(label.shown(), "About");
    let timer = host.last_timer().unwrap();
    assert_eq!(host.events().last(), Some(&Event::SetTimeout(timer, 120)));

    label.on_timer(&mut host, timer);
    assert_eq!(label.opacity(), 0.5);

    let mut frames = 0;
    while label.is_animating() {
        assert_eq!(label.lifecycle().pending_frames(), 1);
        label.on_frame(&mut host);
        frames += 1;
        assert!(frames <= 40);
    }
    assert_eq!(label.shown(), "Über");
    assert_eq!(label.opacity(), 1.0);
    assert_eq!(label.lifecycle().pending_frames(), 0);
    assert_eq!(
        host.count(|e| matches!(e, Event::RequestFrame(FrameSlot::Scramble, _))),
        frames
    );
}

#[test]
fn reduced_motion_label_snaps() {
    let mut host = SpyHost::new();
    let mut label = ScrambleText::new("Home", ScrambleOptions::default(), true, 1);
    label.set_text(&mut host, "Start");
    assert_eq!(label.shown(), "Start");
    assert_eq!(label.opacity(), 1.0);
    assert!(!label.is_animating());
    assert!(host.events().is_empty());
}

#[test]
fn dispose_cancels_timer_and_frame() {
    let mut host = SpyHost::new();
    let mut label = ScrambleText::new("One", ScrambleOptions::default(), false, 2);
    label.set_text(&mut host, "Two");
    let timer = host.last_timer().unwrap();
    label.dispose(&mut host);
    assert!(host.events().contains(&Event::ClearTimeout(timer)));

    // a late timer or frame callback is ignored
    label.on_timer(&mut host, timer);
    label.on_frame(&mut host);
    assert_eq!(host.count(|e| matches!(e, Event::RequestFrame(..))), 0);
    label.set_text(&mut host, "Three");
    assert_eq!(label.target(), "Two");

    let mut host = SpyHost::new();
    let mut label = ScrambleText::new("One", ScrambleOptions::default(), false, 2);
    label.set_text(&mut host, "Two");
    let timer = host.last_timer().unwrap();
    label.on_timer(&mut host, timer);
    label.dispose(&mut host);
    assert_eq!(host.count(|e| matches!(e, Event::CancelFrame(FrameSlot::Scramble, _))), 1);
}

#[test]
fn retargeting_mid_flight_restarts_from_last_target() {
    let mut host = SpyHost::new();
    let mut label = ScrambleText::new("A", ScrambleOptions::default(), false, 4);
    label.set_text(&mut host, "B");
    let first = host.last_timer().unwrap();
    label.set_text(&mut host, "C");
    assert!(host.events().contains(&Event::ClearTimeout(first)));
    let second = host.last_timer().unwrap();
    assert_ne!(first, second);
    label.on_timer(&mut host, second);
    while label.is_animating() {
        label.on_frame(&mut host);
    }
    assert_eq!(label.shown(), "C");
}
