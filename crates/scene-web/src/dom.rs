use scene_core::palette::{self, ThemeColors};
use web_sys as web;

use crate::constants::{DPR_CAP, REDUCED_LAYOUT_MAX_WIDTH};

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Keep the canvas backing store at CSS size x devicePixelRatio, with the
/// ratio capped so constrained devices are not asked to shade 3x pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(DPR_CAP);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// The hosting page's breakpoint flag: viewports narrower than the reduced
/// layout bound get the constrained tier.
pub fn reduced_layout() -> bool {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w < REDUCED_LAYOUT_MAX_WIDTH)
        .unwrap_or(false)
}

/// Resolve the scene theme from data attributes on the canvas element.
/// Missing or unparseable colors fall back to the packaged defaults.
pub fn theme_from_canvas(canvas: &web::HtmlCanvasElement) -> ThemeColors {
    let defaults = ThemeColors::default();
    let read = |attr: &str, fallback: glam::Vec3| -> glam::Vec3 {
        match canvas.get_attribute(attr) {
            Some(hex) => match palette::parse_hex(&hex) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("theme attribute {attr}: {e}; using default");
                    fallback
                }
            },
            None => fallback,
        }
    };
    ThemeColors {
        inner: read(crate::constants::THEME_ATTR_INNER, defaults.inner),
        outer: read(crate::constants::THEME_ATTR_OUTER, defaults.outer),
        accent: read(crate::constants::THEME_ATTR_ACCENT, defaults.accent),
    }
}

/// Whether the host opted into adaptive particle scaling.
pub fn adaptive_perf_enabled(canvas: &web::HtmlCanvasElement) -> bool {
    canvas
        .get_attribute(crate::constants::ADAPTIVE_PERF_ATTR)
        .map(|v| v == "true")
        .unwrap_or(false)
}
