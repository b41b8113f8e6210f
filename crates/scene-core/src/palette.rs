//! Theme-derived gradient stops and color sampling.
//!
//! The scene consumes already-resolved theme colors from the hosting page as
//! `#RRGGBB` strings; everything here is pure math over the parsed values.
//! The same stop list feeds both the radial particle gradient and the
//! axis-based gradient baked into shape geometry.

use glam::Vec3;
use smallvec::{smallvec, SmallVec};
use thiserror::Error;

// Fallback theme, used when the host provides no (or unparseable) colors.
pub const DEFAULT_INNER_HEX: &str = "#17EAD9";
pub const DEFAULT_OUTER_HEX: &str = "#7A5CE6";
pub const DEFAULT_ACCENT_HEX: &str = "#ff37c7";

/// Blend factor applied toward white for the light end of the vibrant
/// gradient.
pub const ACCENT_LIGHTEN: f32 = 0.35;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected '#RRGGBB', got {0:?}")]
    BadFormat(String),
    #[error("invalid hex digits in {0:?}")]
    BadDigits(String),
}

pub fn parse_hex(s: &str) -> Result<Vec3, ColorParseError> {
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| ColorParseError::BadFormat(s.to_string()))?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ColorParseError::BadFormat(s.to_string()));
    }
    let parse =
        |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map(|v| v as f32 / 255.0);
    match (parse(0), parse(2), parse(4)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(Vec3::new(r, g, b)),
        _ => Err(ColorParseError::BadDigits(s.to_string())),
    }
}

/// The three scene colors resolved from the host theme: `inner` at the
/// galaxy core, `outer` at the rim, `accent` for branch bias and the vibrant
/// shape gradient.
#[derive(Clone, Copy, Debug)]
pub struct ThemeColors {
    pub inner: Vec3,
    pub outer: Vec3,
    pub accent: Vec3,
}

impl Default for ThemeColors {
    fn default() -> Self {
        // parsed forms of the DEFAULT_*_HEX constants
        Self {
            inner: Vec3::new(0x17 as f32 / 255.0, 0xEA as f32 / 255.0, 0xD9 as f32 / 255.0),
            outer: Vec3::new(0x7A as f32 / 255.0, 0x5C as f32 / 255.0, 0xE6 as f32 / 255.0),
            accent: Vec3::new(1.0, 0x37 as f32 / 255.0, 0xC7 as f32 / 255.0),
        }
    }
}

impl ThemeColors {
    pub fn from_hex(inner: &str, outer: &str, accent: &str) -> Result<Self, ColorParseError> {
        Ok(Self {
            inner: parse_hex(inner)?,
            outer: parse_hex(outer)?,
            accent: parse_hex(accent)?,
        })
    }
}

/// Ordered `(offset, color)` pairs; offsets non-decreasing, first 0, last 1.
pub type GradientStops = SmallVec<[(f32, Vec3); 4]>;

/// Three-stop gradient used for shape geometry: primary at the bottom,
/// accent through the middle, accent lightened toward white at the top.
pub fn vibrant_stops(theme: &ThemeColors) -> GradientStops {
    let light = theme.accent.lerp(Vec3::ONE, ACCENT_LIGHTEN);
    smallvec![(0.0, theme.outer), (0.55, theme.accent), (1.0, light)]
}

/// Sample a stop list at `t`, clamped to [0, 1], interpolating channel-wise
/// between the bracketing pair. Outside all brackets the nearest terminal
/// stop wins.
pub fn sample(stops: &GradientStops, t: f32) -> Vec3 {
    let Some(first) = stops.first() else {
        return Vec3::ONE;
    };
    let t = t.clamp(0.0, 1.0);
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let span = o1 - o0;
            if span <= f32::EPSILON {
                return c1;
            }
            return c0.lerp(c1, (t - o0) / span);
        }
    }
    stops[stops.len() - 1].1
}

/// Radial particle gradient: inner core blending through an inner/accent mid
/// tone to the outer rim color.
pub fn radial_color(theme: &ThemeColors, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let mid = theme.inner.lerp(theme.accent, 0.6);
    if t < 0.5 {
        theme.inner.lerp(mid, t / 0.5)
    } else {
        mid.lerp(theme.outer, (t - 0.5) / 0.5)
    }
}

// ---------------- HSL jitter helpers ----------------

pub fn rgb_to_hsl(c: Vec3) -> (f32, f32, f32) {
    let max = c.x.max(c.y).max(c.z);
    let min = c.x.min(c.y).min(c.z);
    let l = (max + min) * 0.5;
    if (max - min).abs() <= f32::EPSILON {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == c.x {
        (c.y - c.z) / d + if c.y < c.z { 6.0 } else { 0.0 }
    } else if max == c.y {
        (c.z - c.x) / d + 2.0
    } else {
        (c.x - c.y) / d + 4.0
    };
    (h / 6.0, s, l)
}

fn hue_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    if s <= f32::EPSILON {
        return Vec3::splat(l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    )
}

/// Shift a color in HSL space; hue wraps, saturation and lightness clamp.
pub fn offset_hsl(c: Vec3, dh: f32, ds: f32, dl: f32) -> Vec3 {
    let (h, s, l) = rgb_to_hsl(c);
    hsl_to_rgb(
        (h + dh).rem_euclid(1.0),
        (s + ds).clamp(0.0, 1.0),
        (l + dl).clamp(0.0, 1.0),
    )
}
