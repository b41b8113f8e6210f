//! Persistent shapes drifting around fixed anchor points.
//!
//! Two tiers of motion: a slow deterministic group yaw plus per-shape
//! phase-offset oscillation and spin. Phases are fixed per index, never
//! re-randomized, so the motion is stable and reproducible while never
//! visibly repeating.

use glam::Vec3;

use crate::constants::*;
use crate::passing::ShapeKind;
use crate::tier::TierProfile;

const ANCHORS_FULL: [[f32; 3]; 6] = [
    [-3.0, 1.6, -1.2],
    [3.2, 1.0, -0.4],
    [-3.4, -0.4, -0.2],
    [3.0, -1.2, 0.6],
    [-0.6, 1.0, 0.4],
    [0.8, -1.6, -0.8],
];

const ANCHORS_CONSTRAINED: [[f32; 3]; 3] = [
    [-2.3, 1.2, -0.9],
    [2.1, 0.8, -0.3],
    [-0.8, -1.4, 0.5],
];

pub struct AnchoredShapes {
    anchors: Vec<Vec3>,
    phases: Vec<Vec3>,
    freqs: Vec<Vec3>,
    kinds: Vec<ShapeKind>,
    positions: Vec<Vec3>,
    rotations: Vec<Vec3>,
    group_yaw: f32,
}

impl AnchoredShapes {
    pub fn new(profile: &TierProfile) -> Self {
        let anchors: Vec<Vec3> = if profile.anchor_count <= ANCHORS_CONSTRAINED.len() {
            ANCHORS_CONSTRAINED.iter().map(|a| Vec3::from(*a)).collect()
        } else {
            ANCHORS_FULL.iter().map(|a| Vec3::from(*a)).collect()
        };
        let n = anchors.len();
        let speed = ANCHOR_SPEED;
        let phases = (0..n)
            .map(|i| {
                let i = i as f32;
                Vec3::new(0.6 + i * 0.9, 1.3 + i * 0.7, 2.1 + i * 0.8)
            })
            .collect();
        let freqs = (0..n)
            .map(|i| {
                let i = i as f32;
                Vec3::new(
                    0.25 * speed + i * 0.01,
                    0.2 * speed + i * 0.008,
                    0.16 * speed + i * 0.006,
                )
            })
            .collect();
        Self {
            positions: anchors.clone(),
            rotations: vec![Vec3::ZERO; n],
            kinds: (0..n).map(ShapeKind::for_index).collect(),
            anchors,
            phases,
            freqs,
            group_yaw: 0.0,
        }
    }

    pub fn tick(&mut self, now: f32, dt: f32) {
        self.group_yaw = now * ANCHOR_GROUP_YAW_RATE;
        let omega = std::f32::consts::TAU / ANCHOR_SPIN_Z_PERIOD_SEC;
        let [ax, ay, az] = ANCHOR_OSC_AMPLITUDE;

        for i in 0..self.anchors.len() {
            let base = self.anchors[i];
            let ph = self.phases[i];
            let f = self.freqs[i];
            self.positions[i] = Vec3::new(
                base.x + (now * f.x + ph.x).sin() * ax,
                base.y + (now * f.y + ph.y).cos() * ay,
                base.z + (now * f.z + ph.z).sin() * az,
            );

            let fi = i as f32;
            self.rotations[i].x += (0.1 + fi * 0.01) * dt * 0.1 * ANCHOR_SPEED;
            self.rotations[i].y += (0.14 + fi * 0.01) * dt * 0.1 * ANCHOR_SPEED;
            // Deliberate clockwise z spin, one full turn per configured
            // period, with a small per-index phase.
            self.rotations[i].z = -omega * now + fi * ANCHOR_SPIN_Z_PHASE_STEP;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    #[inline]
    pub fn group_yaw(&self) -> f32 {
        self.group_yaw
    }

    #[inline]
    pub fn anchor(&self, i: usize) -> Vec3 {
        self.anchors[i]
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.positions[i]
    }

    #[inline]
    pub fn rotation(&self, i: usize) -> Vec3 {
        self.rotations[i]
    }

    #[inline]
    pub fn kind(&self, i: usize) -> ShapeKind {
        self.kinds[i]
    }
}
