//! Scene-level state shared with the web frontend.
//!
//! These types avoid platform-specific APIs so the frontend can build its
//! matrices and lighting uniforms from them on any target.

use glam::{Mat4, Vec3};

use crate::constants::*;
use crate::tier::TierProfile;

/// Simple right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Fixed hero-scene camera for the given tier: on the z axis, looking at
    /// the origin.
    pub fn for_profile(profile: &TierProfile, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, profile.camera_z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Linear distance fog.
#[derive(Clone, Copy, Debug)]
pub struct Fog {
    pub color: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            color: Vec3::from(FOG_COLOR),
            near: FOG_NEAR,
            far: FOG_FAR,
        }
    }
}

/// One ambient plus one directional light, with a global intensity scale for
/// easy tuning.
#[derive(Clone, Copy, Debug)]
pub struct LightRig {
    pub ambient_color: Vec3,
    pub ambient_intensity: f32,
    pub directional_color: Vec3,
    pub directional_intensity: f32,
    pub directional_position: Vec3,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient_color: Vec3::from(AMBIENT_COLOR),
            ambient_intensity: AMBIENT_INTENSITY,
            directional_color: Vec3::from(DIRECTIONAL_COLOR),
            directional_intensity: DIRECTIONAL_INTENSITY,
            directional_position: Vec3::from(DIRECTIONAL_POSITION),
        }
    }
}

impl LightRig {
    pub fn scaled(mut self, intensity_scale: f32) -> Self {
        self.ambient_intensity *= intensity_scale;
        self.directional_intensity *= intensity_scale;
        self
    }
}
