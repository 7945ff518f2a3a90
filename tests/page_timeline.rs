use std::time::Duration;

use glam::Vec2;
use particle_portfolio::{
    FrameLoop, LoopState, ParticleField, SiteConfig, Visibility,
    clock::{Clock, ManualClock},
    code_typing::{CodePhase, CodeTyper},
    konami::{KONAMI, KonamiDetector},
    loading::{LoadingEvent, LoadingPhase, LoadingSplash},
    typing::{TypingCycler, TypingPhase},
};
use rand::{SeedableRng, rngs::StdRng};

#[test]
fn animation_starts_only_when_loading_is_ready() {
    let config = SiteConfig::default();
    let clock = ManualClock::new();
    let mut rng = StdRng::seed_from_u64(21);
    let mut splash = LoadingSplash::new(config.loading.clone(), clock.now());
    let mut frame_loop = FrameLoop::new(ParticleField::seeded(
        config.field.clone(),
        Vec2::new(1280.0, 800.0),
        21,
    ));

    let mut ready_at = None;
    for _ in 0..1000 {
        clock.advance_ms(16);
        if splash.poll(clock.now(), &mut rng) == Some(LoadingEvent::Ready) {
            assert!(ready_at.is_none());
            ready_at = Some(clock.now());
            frame_loop.start();
        }
        let frame = frame_loop.next_frame();
        assert_eq!(frame.is_some(), ready_at.is_some());
    }

    assert!(ready_at.is_some());
    assert_eq!(frame_loop.state(), LoopState::Running);
}

#[test]
fn splash_stays_hidden_until_page_is_ready() {
    let config = SiteConfig::default();
    let clock = ManualClock::new();
    let mut rng = StdRng::seed_from_u64(33);
    let mut splash = LoadingSplash::new(config.loading.clone(), clock.now());

    let mut hidden_at = None;
    let mut ready_at = None;
    for _ in 0..2000 {
        clock.advance_ms(10);
        match splash.poll(clock.now(), &mut rng) {
            Some(LoadingEvent::Hidden) => hidden_at = Some(clock.now()),
            Some(LoadingEvent::Ready) => {
                ready_at = Some(clock.now());
                break;
            }
            None => {}
        }
        if hidden_at.is_some() {
            assert!(!splash.is_visible());
            assert_eq!(splash.phase(), LoadingPhase::Hidden);
        } else {
            assert!(splash.is_visible());
        }
    }

    let (hidden_at, ready_at) = (hidden_at.unwrap(), ready_at.unwrap());
    assert_eq!(ready_at - hidden_at, config.loading.ready_delay());
    assert!(!splash.is_visible());
}

#[test]
fn hidden_page_freezes_background_but_not_timers() {
    let config = SiteConfig::default();
    let clock = ManualClock::new();
    let mut frame_loop = FrameLoop::new(ParticleField::seeded(
        config.field.clone(),
        Vec2::new(800.0, 600.0),
        4,
    ));
    let mut typing = TypingCycler::new(config.typing.clone(), clock.now());
    frame_loop.start();

    frame_loop.set_visibility(Visibility::Hidden);
    let frozen = frame_loop.field().particles().to_vec();

    for _ in 0..60 {
        clock.advance_ms(16);
        typing.poll(clock.now());
        assert!(frame_loop.next_frame().is_none());
    }

    assert_eq!(frame_loop.field().particles(), frozen.as_slice());
    assert!(!typing.current().is_empty());

    frame_loop.set_visibility(Visibility::Visible);
    assert!(frame_loop.next_frame().is_some());
}

#[test]
fn typing_cycles_through_all_texts() {
    let config = SiteConfig::default();
    let texts = config.typing.texts.clone();
    let clock = ManualClock::new();
    let mut typing = TypingCycler::new(config.typing, clock.now());
    let mut seen_full = Vec::new();

    // 30s of 10ms polls is enough for every default phrase.
    for _ in 0..3000 {
        clock.advance(Duration::from_millis(10));
        typing.poll(clock.now());
        if typing.phase() == TypingPhase::Pausing && seen_full.last() != Some(&typing.current().to_string()) {
            seen_full.push(typing.current().to_string());
        }
    }

    assert!(seen_full.len() >= texts.len());
    assert_eq!(&seen_full[..texts.len()], texts.as_slice());
}

#[test]
fn code_sample_is_fully_typed_then_restarts() {
    let config = SiteConfig::default();
    let full: String = config.code.lines.iter().map(|line| format!("{line}\n")).collect();
    let clock = ManualClock::new();
    let mut code = CodeTyper::new(config.code, clock.now());

    let mut longest = 0;
    for _ in 0..2000 {
        clock.advance_ms(50);
        code.poll(clock.now());
        longest = longest.max(code.shown().len());
        if code.phase() == CodePhase::Resting {
            assert_eq!(code.shown(), full);
        }
    }

    assert_eq!(longest, full.len());
    assert!(code.runs() >= 2);
}

#[test]
fn konami_reseeds_with_easter_egg_count() {
    let config = SiteConfig::default();
    let mut frame_loop = FrameLoop::new(ParticleField::seeded(
        config.field.clone(),
        Vec2::new(800.0, 600.0),
        1,
    ));
    frame_loop.start();
    let mut detector = KonamiDetector::new();

    for key in KONAMI {
        if detector.push(key) {
            frame_loop.field_mut().reseed(config.easter_egg.particle_count);
        }
    }

    assert_eq!(frame_loop.field().len(), 200);
    assert_eq!(frame_loop.next_frame().unwrap().dots.len(), 200);
}
