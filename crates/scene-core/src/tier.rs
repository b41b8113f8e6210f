//! Device-tier parameter table.
//!
//! The hosting page derives a "reduced layout" flag from its viewport
//! breakpoint; everything else keys off the resulting tier. The profile is
//! resolved once at mount and consumed read-only by every component, so the
//! thresholds live in exactly one place.

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceTier {
    /// Small viewport or otherwise constrained device.
    Constrained,
    /// Regular desktop-class viewport.
    Full,
}

impl DeviceTier {
    #[inline]
    pub fn from_reduced_layout(reduced: bool) -> Self {
        if reduced {
            DeviceTier::Constrained
        } else {
            DeviceTier::Full
        }
    }
}

#[derive(Clone, Debug)]
pub struct TierProfile {
    pub particle_ceiling: u32,
    pub galaxy_radius: f32,
    pub particle_size: f32,
    pub shape_pool: usize,
    pub anchor_count: usize,
    pub passing_base_speed: f32,
    pub camera_z: f32,
    pub antialias: bool,
    pub model_position: Vec3,
    pub model_yaw: f32,
    pub model_scale: f32,
}

impl TierProfile {
    pub fn for_tier(tier: DeviceTier) -> Self {
        match tier {
            DeviceTier::Constrained => Self {
                particle_ceiling: 360,
                galaxy_radius: 7.0,
                particle_size: 0.085,
                shape_pool: 1,
                anchor_count: 3,
                passing_base_speed: 0.5,
                camera_z: 8.0,
                antialias: false,
                model_position: Vec3::new(0.2, -1.1, 1.1),
                model_yaw: 0.0,
                // constrained devices get a slightly smaller model on top of
                // the tier scale
                model_scale: 0.95 * 0.9,
            },
            DeviceTier::Full => Self {
                particle_ceiling: 820,
                galaxy_radius: 12.0,
                particle_size: 0.11,
                shape_pool: 2,
                anchor_count: 6,
                passing_base_speed: 0.7,
                camera_z: 10.0,
                antialias: true,
                model_position: Vec3::new(2.6, -1.1, 0.6),
                model_yaw: -0.25,
                model_scale: 1.2,
            },
        }
    }
}
