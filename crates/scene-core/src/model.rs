//! Animation state for the single decorative foreground model.

use glam::Vec3;

use crate::constants::*;
use crate::tier::TierProfile;

/// Looping clip playback with short fade-in/out so the idle animation never
/// starts or stops abruptly.
#[derive(Clone, Debug)]
pub struct ClipPlayer {
    duration: f32,
    time: f32,
    weight: f32,
    target_weight: f32,
    playing: bool,
}

impl ClipPlayer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(f32::EPSILON),
            time: 0.0,
            weight: 0.0,
            target_weight: 0.0,
            playing: false,
        }
    }

    pub fn play(&mut self) {
        self.time = 0.0;
        self.target_weight = 1.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.target_weight = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.playing {
            self.time = (self.time + dt) % self.duration;
        }
        let step = dt / MODEL_CLIP_FADE_SEC;
        if self.weight < self.target_weight {
            self.weight = (self.weight + step).min(self.target_weight);
        } else if self.weight > self.target_weight {
            self.weight = (self.weight - step).max(self.target_weight);
            if self.weight <= 0.0 {
                self.playing = false;
            }
        }
    }

    /// Blend weight in [0, 1].
    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Normalized position within the loop, [0, 1).
    #[inline]
    pub fn phase(&self) -> f32 {
        self.time / self.duration
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

pub struct ModelAnimator {
    base_position: Vec3,
    base_scale: f32,
    rotation_y: f32,
    position_y: f32,
    scale: f32,
    bob: bool,
    clip: ClipPlayer,
}

impl ModelAnimator {
    pub fn new(profile: &TierProfile, clip_duration: Option<f32>) -> Self {
        let mut clip =
            ClipPlayer::new(clip_duration.unwrap_or(MODEL_CLIP_FALLBACK_DURATION_SEC));
        clip.play();
        Self {
            base_position: profile.model_position,
            base_scale: profile.model_scale,
            rotation_y: profile.model_yaw,
            position_y: profile.model_position.y,
            scale: profile.model_scale,
            bob: true,
            clip,
        }
    }

    pub fn set_bob(&mut self, bob: bool) {
        self.bob = bob;
    }

    pub fn tick(&mut self, now: f32, dt: f32, amplitude: f32) {
        self.rotation_y += (MODEL_BASE_SPIN + amplitude * MODEL_AMP_SPIN_BOOST) * dt;
        if self.bob {
            self.position_y =
                self.base_position.y + (now * MODEL_BOB_FREQ).sin() * MODEL_BOB_DEPTH;
        }
        self.scale = self.base_scale * (1.0 + amplitude * MODEL_AMP_SCALE_BOOST);
        self.clip.advance(dt);
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.base_position.x, self.position_y, self.base_position.z)
    }

    #[inline]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Small z sway contributed by the idle clip, already weighted by its
    /// fade envelope.
    #[inline]
    pub fn clip_sway(&self) -> f32 {
        (self.clip.phase() * std::f32::consts::TAU).sin()
            * self.clip.weight()
            * MODEL_SWAY_AMPLITUDE
    }

    #[inline]
    pub fn clip(&self) -> &ClipPlayer {
        &self.clip
    }

    #[inline]
    pub fn clip_mut(&mut self) -> &mut ClipPlayer {
        &mut self.clip
    }
}
