//! Pooled transient shapes that drift across the viewport.
//!
//! Slots are parallel arrays indexed by integer, sized once from the device
//! tier and never resized. A due spawn with no free slot is skipped, not an
//! error; the bounded pool is the backpressure.

use glam::Vec3;
use rand::Rng;

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Tetra,
    Sphere,
    Box,
}

impl ShapeKind {
    #[inline]
    pub fn for_index(i: usize) -> Self {
        match i % 3 {
            0 => ShapeKind::Tetra,
            1 => ShapeKind::Sphere,
            _ => ShapeKind::Box,
        }
    }
}

/// Snapshot of one live slot, handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct PassingShape {
    pub slot: usize,
    pub kind: ShapeKind,
    pub position: Vec3,
    pub rotation: Vec3,
    pub opacity: f32,
}

pub struct PassingShapes {
    active: Vec<bool>,
    // set once a slot has faded past the visibility threshold, so the
    // opacity exit only fires on the way back down
    visible: Vec<bool>,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    rotations: Vec<Vec3>,
    opacities: Vec<f32>,
    kinds: Vec<ShapeKind>,
    base_speed: f32,
    next_spawn: f32,
}

impl PassingShapes {
    pub fn new(pool: usize, base_speed: f32) -> Self {
        Self {
            active: vec![false; pool],
            visible: vec![false; pool],
            positions: vec![Vec3::ZERO; pool],
            velocities: vec![Vec3::ZERO; pool],
            rotations: vec![Vec3::ZERO; pool],
            opacities: vec![0.0; pool],
            kinds: (0..pool).map(ShapeKind::for_index).collect(),
            base_speed,
            next_spawn: PASSING_FIRST_SPAWN_AT,
        }
    }

    #[inline]
    pub fn pool_size(&self) -> usize {
        self.active.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    #[inline]
    pub fn next_spawn_at(&self) -> f32 {
        self.next_spawn
    }

    /// Spawn into the first inactive slot if a spawn is due. No-op (and no
    /// reschedule) when the pool is saturated; the attempt repeats next tick.
    pub fn try_spawn(&mut self, now: f32, rng: &mut impl Rng) -> bool {
        if now <= self.next_spawn {
            return false;
        }
        let Some(idx) = self.active.iter().position(|a| !*a) else {
            return false;
        };

        let y = (rng.gen::<f32>() - 0.5) * PASSING_Y_SPREAD;
        let z = PASSING_Z_MIN + rng.gen::<f32>() * PASSING_Z_SPAN;
        // Shapes enter from the left extreme and travel +x; those nearer the
        // camera move faster for a simple parallax cue.
        let depth_factor = 0.8 + (z - PASSING_Z_MIN) / PASSING_Z_SPAN;

        self.positions[idx] = Vec3::new(-PASSING_X_BOUND, y, z);
        self.velocities[idx] = Vec3::new(
            self.base_speed * depth_factor,
            0.0,
            (rng.gen::<f32>() - 0.5) * PASSING_Z_DRIFT,
        );
        self.rotations[idx] = Vec3::new(
            rng.gen::<f32>() * 0.5,
            rng.gen::<f32>() * 0.5,
            rng.gen::<f32>() * 0.5,
        );
        self.opacities[idx] = 0.0;
        self.visible[idx] = false;
        self.active[idx] = true;
        self.next_spawn = now + PASSING_SPAWN_DELAY_MIN + rng.gen::<f32>() * PASSING_SPAWN_DELAY_SPAN;
        true
    }

    pub fn tick(&mut self, now: f32, dt: f32, rng: &mut impl Rng) {
        self.try_spawn(now, rng);

        for i in 0..self.active.len() {
            if !self.active[i] {
                continue;
            }
            self.positions[i] += self.velocities[i] * dt;
            self.rotations[i].x += PASSING_ROT_RATE_X * dt;
            self.rotations[i].y += PASSING_ROT_RATE_Y * dt;

            // Near-full opacity inside the central band, linear falloff
            // toward either extreme, approached exponentially to avoid pops.
            let dist = self.positions[i].x.abs();
            let target = if dist < PASSING_FADE_BAND {
                PASSING_TARGET_OPACITY
            } else {
                (PASSING_TARGET_OPACITY - (dist - PASSING_FADE_BAND) * PASSING_FADE_SLOPE).max(0.0)
            };
            self.opacities[i] += (target - self.opacities[i]) * (PASSING_FADE_RATE * dt).min(1.0);
            if self.opacities[i] >= PASSING_MIN_OPACITY {
                self.visible[i] = true;
            }

            let out_of_bounds = self.positions[i].x.abs() > PASSING_X_BOUND;
            let faded_out = self.visible[i] && self.opacities[i] < PASSING_MIN_OPACITY;
            if out_of_bounds || faded_out {
                self.active[i] = false;
                self.visible[i] = false;
                self.opacities[i] = 0.0;
            }
        }
    }

    pub fn iter_active(&self) -> impl Iterator<Item = PassingShape> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, a)| **a)
            .map(move |(i, _)| PassingShape {
                slot: i,
                kind: self.kinds[i],
                position: self.positions[i],
                rotation: self.rotations[i],
                opacity: self.opacities[i],
            })
    }

    #[inline]
    pub fn opacity(&self, slot: usize) -> f32 {
        self.opacities[slot]
    }

    #[inline]
    pub fn is_active(&self, slot: usize) -> bool {
        self.active[slot]
    }

    #[inline]
    pub fn position(&self, slot: usize) -> Vec3 {
        self.positions[slot]
    }
}
