// Host-side tests for the web-shell constants. The main crate is wasm-only,
// so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use scene_core::tier::{DeviceTier, TierProfile};

#[test]
fn analyser_fft_size_is_a_power_of_two() {
    assert!(ANALYSER_FFT_SIZE.is_power_of_two());
    assert!(ANALYSER_FFT_SIZE >= 32);
}

#[test]
fn audio_levels_are_normalized() {
    assert!((0.0..=1.0).contains(&ANALYSER_SMOOTHING));
    assert!((0.0..=1.0).contains(&AUDIO_VOLUME));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn layout_thresholds_are_sane() {
    assert!(REDUCED_LAYOUT_MAX_WIDTH > 0.0);
    assert!(DPR_CAP >= 1.0);
    assert!(IDLE_MOUNT_FALLBACK_MS > 0);
}

#[test]
fn shape_instance_capacity_covers_the_worst_case() {
    let full = TierProfile::for_tier(DeviceTier::Full);
    let constrained = TierProfile::for_tier(DeviceTier::Constrained);
    for p in [full, constrained] {
        // pool + anchors + the model
        assert!(p.shape_pool + p.anchor_count + 1 <= SHAPE_INSTANCE_CAPACITY);
    }
}

#[test]
fn asset_urls_are_absolute_paths() {
    assert!(AUDIO_URL.starts_with('/'));
    assert!(MODEL_URL.starts_with('/'));
}
