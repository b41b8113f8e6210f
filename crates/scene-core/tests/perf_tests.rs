use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_core::constants::*;
use scene_core::perf::{FrameQuality, QualityController, QualityEvent};

#[test]
fn five_declines_from_ceiling_stay_above_floor() {
    let mut ctl = QualityController::new(820, PARTICLE_FLOOR, 820);
    let mut prev = ctl.count();
    for _ in 0..5 {
        let next = ctl.on_decline();
        assert!(next <= prev, "decline increased the count");
        assert!(next >= PARTICLE_FLOOR);
        prev = next;
    }
    // keep going: the floor holds for any further sequence
    for _ in 0..100 {
        assert!(ctl.on_decline() >= PARTICLE_FLOOR);
    }
    assert_eq!(ctl.count(), PARTICLE_FLOOR);
}

#[test]
fn incline_never_exceeds_tier_ceiling() {
    let mut ctl = QualityController::new(300, PARTICLE_FLOOR, 600);
    for _ in 0..100 {
        assert!(ctl.on_incline() <= 600);
    }
    assert_eq!(ctl.count(), 600);
}

#[test]
fn arbitrary_event_sequences_respect_bounds() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut ctl = QualityController::new(820, PARTICLE_FLOOR, 820);
    for _ in 0..10_000 {
        let ev = if rng.gen::<bool>() {
            QualityEvent::Decline
        } else {
            QualityEvent::Incline
        };
        let count = ctl.apply(ev);
        assert!((PARTICLE_FLOOR..=820).contains(&count));
    }
}

#[test]
fn initial_count_is_clamped_into_bounds() {
    let ctl = QualityController::new(10_000, PARTICLE_FLOOR, 820);
    assert_eq!(ctl.count(), 820);
    let ctl = QualityController::new(0, PARTICLE_FLOOR, 820);
    assert_eq!(ctl.count(), PARTICLE_FLOOR);
}

#[test]
fn monitor_emits_nothing_inside_the_window() {
    let mut q = FrameQuality::new(2.0, 40.0, 55.0);
    for _ in 0..60 {
        assert_eq!(q.push(1.0 / 60.0), None);
    }
}

#[test]
fn monitor_classifies_fps_at_window_boundaries() {
    // steady 64 fps -> incline (1/64 is exactly representable, so the
    // window boundary lands deterministically)
    let mut q = FrameQuality::new(2.0, 40.0, 55.0);
    let mut event = None;
    for _ in 0..128 {
        if let Some(ev) = q.push(1.0 / 64.0) {
            event = Some(ev);
            break;
        }
    }
    assert_eq!(event, Some(QualityEvent::Incline));

    // steady 32 fps -> decline
    let mut q = FrameQuality::new(2.0, 40.0, 55.0);
    let mut event = None;
    for _ in 0..64 {
        if let Some(ev) = q.push(1.0 / 32.0) {
            event = Some(ev);
            break;
        }
    }
    assert_eq!(event, Some(QualityEvent::Decline));

    // 48 fps sits inside the acceptable band
    let mut q = FrameQuality::new(2.0, 40.0, 55.0);
    for _ in 0..200 {
        assert_eq!(q.push(1.0 / 48.0), None);
    }
}

#[test]
fn monitor_debounces_after_each_event() {
    let mut q = FrameQuality::new(2.0, 40.0, 55.0);
    let mut events = 0;
    for _ in 0..256 {
        if q.push(1.0 / 64.0).is_some() {
            events += 1;
        }
    }
    // 256 frames at 64 fps span 4 seconds: two evaluation windows
    assert_eq!(events, 2);
}
