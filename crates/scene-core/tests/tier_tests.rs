// Sanity checks on the device-tier table and the tuning constants that key
// off it.

use scene_core::constants::*;
use scene_core::tier::{DeviceTier, TierProfile};

#[test]
fn reduced_layout_maps_to_constrained() {
    assert_eq!(DeviceTier::from_reduced_layout(true), DeviceTier::Constrained);
    assert_eq!(DeviceTier::from_reduced_layout(false), DeviceTier::Full);
}

#[test]
fn constrained_tier_never_exceeds_full() {
    let c = TierProfile::for_tier(DeviceTier::Constrained);
    let f = TierProfile::for_tier(DeviceTier::Full);
    assert!(c.particle_ceiling <= f.particle_ceiling);
    assert!(c.galaxy_radius <= f.galaxy_radius);
    assert!(c.particle_size <= f.particle_size);
    assert!(c.shape_pool <= f.shape_pool);
    assert!(c.anchor_count <= f.anchor_count);
    assert!(c.passing_base_speed <= f.passing_base_speed);
    assert!(c.camera_z <= f.camera_z);
    assert!(c.model_scale <= f.model_scale);
}

#[test]
fn particle_floor_fits_under_both_ceilings() {
    for tier in [DeviceTier::Constrained, DeviceTier::Full] {
        let p = TierProfile::for_tier(tier);
        assert!(PARTICLE_FLOOR <= p.particle_ceiling);
        assert!(p.shape_pool >= 1);
        assert!(p.anchor_count >= 1);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn quality_factors_bracket_unity() {
    assert!(QUALITY_DECLINE_FACTOR < 1.0 && QUALITY_DECLINE_FACTOR > 0.0);
    assert!(QUALITY_INCLINE_FACTOR > 1.0);
    assert!(QUALITY_FPS_LOWER < QUALITY_FPS_UPPER);
    assert!(QUALITY_EVAL_INTERVAL_SEC > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn fade_and_fog_constants_have_logical_relationships() {
    // A shape must be able to fade fully inside the off-band span.
    assert!(PASSING_FADE_BAND < PASSING_X_BOUND);
    assert!(PASSING_MIN_OPACITY < PASSING_TARGET_OPACITY);
    assert!(PASSING_SPAWN_DELAY_MIN > 0.0 && PASSING_SPAWN_DELAY_SPAN > 0.0);
    assert!(FOG_NEAR < FOG_FAR);
    assert!(CAMERA_ZNEAR < CAMERA_ZFAR);
}
