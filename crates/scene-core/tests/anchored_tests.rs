use scene_core::anchored::AnchoredShapes;
use scene_core::constants::*;
use scene_core::tier::{DeviceTier, TierProfile};

fn full() -> AnchoredShapes {
    AnchoredShapes::new(&TierProfile::for_tier(DeviceTier::Full))
}

#[test]
fn anchor_count_follows_tier() {
    assert_eq!(full().len(), 6);
    let constrained = AnchoredShapes::new(&TierProfile::for_tier(DeviceTier::Constrained));
    assert_eq!(constrained.len(), 3);
}

#[test]
fn shapes_never_leave_their_anchor_vicinity() {
    let mut shapes = full();
    let [ax, ay, az] = ANCHOR_OSC_AMPLITUDE;
    for step in 0..2_000 {
        let now = step as f32 * 0.11;
        shapes.tick(now, 1.0 / 60.0);
        for i in 0..shapes.len() {
            let d = shapes.position(i) - shapes.anchor(i);
            assert!(d.x.abs() <= ax + 1e-4);
            assert!(d.y.abs() <= ay + 1e-4);
            assert!(d.z.abs() <= az + 1e-4);
        }
    }
}

#[test]
fn group_yaw_is_proportional_to_elapsed_time() {
    let mut shapes = full();
    shapes.tick(10.0, 1.0 / 60.0);
    assert!((shapes.group_yaw() - 10.0 * ANCHOR_GROUP_YAW_RATE).abs() < 1e-5);
    shapes.tick(20.0, 1.0 / 60.0);
    assert!((shapes.group_yaw() - 20.0 * ANCHOR_GROUP_YAW_RATE).abs() < 1e-5);
}

#[test]
fn z_spin_completes_one_turn_per_period() {
    let mut shapes = full();
    shapes.tick(0.0, 0.0);
    let z0 = shapes.rotation(0).z;
    shapes.tick(ANCHOR_SPIN_Z_PERIOD_SEC, 0.0);
    let z1 = shapes.rotation(0).z;
    // clockwise: exactly -2π over one period
    assert!((z1 - z0 + std::f32::consts::TAU).abs() < 1e-3);
}

#[test]
fn per_index_phases_desynchronize_the_shapes() {
    let mut shapes = full();
    shapes.tick(5.0, 1.0 / 60.0);
    for i in 1..shapes.len() {
        assert_ne!(
            shapes.position(0) - shapes.anchor(0),
            shapes.position(i) - shapes.anchor(i),
            "shapes {i} and 0 oscillate in lockstep"
        );
        assert!(
            (shapes.rotation(i).z - shapes.rotation(0).z).abs() > 1e-3,
            "z phases coincide for {i}"
        );
    }
}

#[test]
fn xy_rotation_accumulates_with_delta_time() {
    let mut shapes = full();
    shapes.tick(1.0, 0.5);
    let rx1 = shapes.rotation(0).x;
    shapes.tick(1.0, 0.5);
    let rx2 = shapes.rotation(0).x;
    assert!(rx2 > rx1, "x rotation should keep integrating");
    assert!(((rx2 - rx1) - 0.1 * 0.5 * 0.1 * ANCHOR_SPEED).abs() < 1e-6);
}
