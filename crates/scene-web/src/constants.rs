// Web-shell wiring and tuning constants.

// Host page contract
pub const CANVAS_ID: &str = "scene-canvas";
pub const THEME_ATTR_INNER: &str = "data-color-secondary";
pub const THEME_ATTR_OUTER: &str = "data-color-primary";
pub const THEME_ATTR_ACCENT: &str = "data-color-accent";
pub const ADAPTIVE_PERF_ATTR: &str = "data-adaptive-perf";

// Static assets served by the hosting page
pub const AUDIO_URL: &str = "/audio/hero-loop.mp3";
pub const MODEL_URL: &str = "/models/hero.glb";

// Viewport breakpoint below which the reduced layout (constrained tier)
// applies, in CSS pixels
pub const REDUCED_LAYOUT_MAX_WIDTH: f64 = 900.0;

// Device-pixel-ratio cap for the canvas backing store
pub const DPR_CAP: f64 = 1.5;

// Deferred mount: fallback delay when requestIdleCallback is unavailable
pub const IDLE_MOUNT_FALLBACK_MS: i32 = 200;

// WebAudio analysis graph
pub const ANALYSER_FFT_SIZE: u32 = 2048;
pub const ANALYSER_SMOOTHING: f64 = 0.8;
pub const AUDIO_VOLUME: f64 = 0.8;

// Upper bound on per-frame shape draws (pool + anchors + model)
pub const SHAPE_INSTANCE_CAPACITY: usize = 16;
