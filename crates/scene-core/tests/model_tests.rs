use scene_core::constants::*;
use scene_core::model::{ClipPlayer, ModelAnimator};
use scene_core::tier::{DeviceTier, TierProfile};

fn animator() -> ModelAnimator {
    ModelAnimator::new(&TierProfile::for_tier(DeviceTier::Full), Some(2.0))
}

#[test]
fn clip_fades_in_after_play() {
    let mut clip = ClipPlayer::new(2.0);
    clip.play();
    assert_eq!(clip.weight(), 0.0);
    let dt = MODEL_CLIP_FADE_SEC / 4.0;
    for _ in 0..4 {
        clip.advance(dt);
    }
    assert!((clip.weight() - 1.0).abs() < 1e-5, "fade-in incomplete");
    assert!(clip.is_playing());
}

#[test]
fn clip_fades_out_after_stop() {
    let mut clip = ClipPlayer::new(2.0);
    clip.play();
    clip.advance(1.0);
    clip.stop();
    for _ in 0..8 {
        clip.advance(MODEL_CLIP_FADE_SEC / 4.0);
    }
    assert_eq!(clip.weight(), 0.0);
    assert!(!clip.is_playing());
}

#[test]
fn clip_weight_and_phase_stay_bounded() {
    let mut clip = ClipPlayer::new(1.7);
    clip.play();
    for i in 0..1_000 {
        clip.advance(0.013);
        if i == 500 {
            clip.stop();
        }
        if i == 700 {
            clip.play();
        }
        assert!((0.0..=1.0).contains(&clip.weight()));
        assert!((0.0..1.0).contains(&clip.phase()));
    }
}

#[test]
fn spin_integrates_base_rate_plus_amplitude_boost() {
    let mut quiet = animator();
    let mut loud = animator();
    let y0 = quiet.rotation_y();
    quiet.tick(0.0, 1.0, 0.0);
    loud.tick(0.0, 1.0, 1.0);
    assert!((quiet.rotation_y() - (y0 + MODEL_BASE_SPIN)).abs() < 1e-5);
    assert!(
        (loud.rotation_y() - (y0 + MODEL_BASE_SPIN + MODEL_AMP_SPIN_BOOST)).abs() < 1e-5
    );
}

#[test]
fn bob_oscillates_around_base_height() {
    let profile = TierProfile::for_tier(DeviceTier::Full);
    let mut m = ModelAnimator::new(&profile, None);
    let base_y = profile.model_position.y;
    for i in 0..500 {
        let now = i as f32 * 0.05;
        m.tick(now, 0.016, 0.0);
        let dy = m.position().y - base_y;
        assert!(dy.abs() <= MODEL_BOB_DEPTH + 1e-5, "bob escaped depth at t={now}");
    }
}

#[test]
fn bob_can_be_disabled() {
    let profile = TierProfile::for_tier(DeviceTier::Full);
    let mut m = ModelAnimator::new(&profile, None);
    m.set_bob(false);
    m.tick(1.3, 0.016, 0.0);
    assert_eq!(m.position().y, profile.model_position.y);
}

#[test]
fn scale_pulses_with_amplitude() {
    let profile = TierProfile::for_tier(DeviceTier::Full);
    let mut m = ModelAnimator::new(&profile, None);
    m.tick(0.0, 0.016, 0.0);
    assert!((m.scale() - profile.model_scale).abs() < 1e-6);
    m.tick(0.0, 0.016, 1.0);
    let expected = profile.model_scale * (1.0 + MODEL_AMP_SCALE_BOOST);
    assert!((m.scale() - expected).abs() < 1e-6);
}

#[test]
fn clip_sway_is_small_and_fade_weighted() {
    let mut m = animator();
    // before any advance the fade weight is zero, so no sway
    assert_eq!(m.clip_sway(), 0.0);
    for _ in 0..100 {
        m.tick(0.0, 0.02, 0.0);
        assert!(m.clip_sway().abs() <= MODEL_SWAY_AMPLITUDE + 1e-6);
    }
}
