//! Procedural spiral-galaxy particle field.
//!
//! Positions and colors are generated once per mount up to the device-tier
//! ceiling; runtime count changes from the quality controller only move the
//! draw range. The backing arrays are never reallocated after generation.

use glam::Vec3;
use rand::Rng;

use crate::constants::*;
use crate::palette::{self, ThemeColors};
use crate::tier::TierProfile;

#[derive(Clone, Debug)]
pub struct GalaxyParams {
    pub max_count: u32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
}

impl GalaxyParams {
    pub fn for_profile(profile: &TierProfile) -> Self {
        Self {
            max_count: profile.particle_ceiling,
            radius: profile.galaxy_radius,
            branches: GALAXY_BRANCHES,
            spin: GALAXY_SPIN,
            randomness: GALAXY_RANDOMNESS,
        }
    }
}

pub struct GalaxyField {
    positions: Vec<f32>,
    colors: Vec<f32>,
    max_count: u32,
    count: u32,
    radius: f32,
}

impl GalaxyField {
    pub fn generate(params: &GalaxyParams, theme: &ThemeColors, rng: &mut impl Rng) -> Self {
        let n = params.max_count as usize;
        let branches = params.branches.max(1);
        let mut positions = vec![0.0_f32; n * 3];
        let mut colors = vec![0.0_f32; n * 3];

        for i in 0..n {
            let i3 = i * 3;
            let r = rng.gen::<f32>().powf(GALAXY_RADIAL_BIAS) * params.radius;
            let branch_phase = (i as u32 % branches) as f32 / branches as f32;
            let branch_angle = branch_phase * std::f32::consts::TAU;
            let spin_angle = r * params.spin;

            let jx = signed_sq(rng) * params.randomness * r;
            let jy = signed_sq(rng) * params.randomness * GALAXY_Y_PRESCALE * r;
            let jz = signed_sq(rng) * params.randomness * r;

            positions[i3] = (branch_angle + spin_angle).cos() * r + jx;
            positions[i3 + 1] = jy * GALAXY_Y_FLATTEN;
            positions[i3 + 2] = (branch_angle + spin_angle).sin() * r + jz;

            let t = r / params.radius;
            let base = palette::radial_color(theme, t);
            // Branch-biased vibrance: the two halves of the branch cycle pull
            // toward the outer and accent hues respectively.
            let bias = if branch_phase < 0.5 {
                theme.outer
            } else {
                theme.accent
            };
            let mix = 0.2 + rng.gen::<f32>() * 0.3;
            let mut c = base.lerp(bias, mix);
            let dh = (rng.gen::<f32>() - 0.5) * 0.03;
            let ds = (rng.gen::<f32>() - 0.5) * 0.12;
            let dl = (rng.gen::<f32>() - 0.5) * 0.06;
            c = palette::offset_hsl(c, dh, ds, dl);
            c *= 0.9 + rng.gen::<f32>() * 0.25;

            colors[i3] = c.x;
            colors[i3 + 1] = c.y;
            colors[i3 + 2] = c.z;
        }

        Self {
            positions,
            colors,
            max_count: params.max_count,
            count: params.max_count,
            radius: params.radius,
        }
    }

    /// Adjust the drawn prefix. Counts beyond the generated ceiling indicate
    /// a controller bug; debug builds assert, release builds clamp.
    pub fn set_count(&mut self, count: u32) {
        debug_assert!(
            count <= self.max_count,
            "draw range {} exceeds generated ceiling {}",
            count,
            self.max_count
        );
        if count > self.max_count {
            log::warn!(
                "clamping particle count {} to ceiling {}",
                count,
                self.max_count
            );
        }
        self.count = count.min(self.max_count);
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Full backing storage, `3 * max_count` floats.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// The prefix actually drawn this frame.
    #[inline]
    pub fn drawn_positions(&self) -> &[f32] {
        &self.positions[..self.count as usize * 3]
    }

    #[inline]
    pub fn drawn_colors(&self) -> &[f32] {
        &self.colors[..self.count as usize * 3]
    }

    /// Whole-field yaw as a function of elapsed time. Time-based rather than
    /// delta-accumulated so variable frame timing cannot drift the field;
    /// wrapped to keep the product well inside f32 precision.
    #[inline]
    pub fn rotation_y(elapsed: f32) -> f32 {
        (elapsed % GALAXY_TIME_WRAP_SEC) * GALAXY_ROTATION_RATE
    }

    /// Slow size pulsation around the tier's base point size.
    #[inline]
    pub fn point_size(base: f32, elapsed: f32) -> f32 {
        base * (1.0 + GALAXY_SIZE_PULSE_AMPLITUDE * (elapsed * GALAXY_SIZE_PULSE_FREQ).sin())
    }
}

// Squared magnitude with random sign: jitter biased toward zero, so the core
// stays tight while the rim loosens.
#[inline]
fn signed_sq(rng: &mut impl Rng) -> f32 {
    let sign = if rng.gen::<f32>() < 0.5 { -1.0 } else { 1.0 };
    let m = rng.gen::<f32>();
    m * m * sign
}
