// Shared visual/audio tuning constants used by the core animators and the
// web frontend.

// Camera
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Fog (hex 0x0f1624)
pub const FOG_COLOR: [f32; 3] = [0.0588, 0.0863, 0.1412];
pub const FOG_NEAR: f32 = 6.0;
pub const FOG_FAR: f32 = 20.0;

// Light rig (ambient 0x00eaff, directional 0xef7f34)
pub const AMBIENT_COLOR: [f32; 3] = [0.0, 0.9176, 1.0];
pub const AMBIENT_INTENSITY: f32 = 0.8;
pub const DIRECTIONAL_COLOR: [f32; 3] = [0.9373, 0.4980, 0.2039];
pub const DIRECTIONAL_INTENSITY: f32 = 0.8;
pub const DIRECTIONAL_POSITION: [f32; 3] = [2.0, 4.0, 4.0];

// Galaxy particle field
pub const GALAXY_BRANCHES: u32 = 4;
pub const GALAXY_SPIN: f32 = 1.0;
pub const GALAXY_RANDOMNESS: f32 = 0.32;
pub const GALAXY_RADIAL_BIAS: f32 = 0.9; // concentrates particles toward the core
pub const GALAXY_Y_PRESCALE: f32 = 0.5;
pub const GALAXY_Y_FLATTEN: f32 = 0.6;
pub const GALAXY_Z_OFFSET: f32 = -2.0;
pub const GALAXY_ROTATION_RATE: f32 = 0.03; // radians per elapsed second
pub const GALAXY_TIME_WRAP_SEC: f32 = 10_000.0; // bound elapsed time to avoid precision drift
pub const GALAXY_SIZE_PULSE_AMPLITUDE: f32 = 0.08;
pub const GALAXY_SIZE_PULSE_FREQ: f32 = 0.5;
pub const GALAXY_OPACITY: f32 = 0.85;

// Adaptive quality
pub const PARTICLE_FLOOR: u32 = 300;
pub const QUALITY_DECLINE_FACTOR: f32 = 0.85;
pub const QUALITY_INCLINE_FACTOR: f32 = 1.08;
pub const QUALITY_EVAL_INTERVAL_SEC: f32 = 2.0;
pub const QUALITY_FPS_LOWER: f32 = 40.0;
pub const QUALITY_FPS_UPPER: f32 = 55.0;

// Passing shapes
pub const PASSING_X_BOUND: f32 = 8.0;
pub const PASSING_Y_SPREAD: f32 = 2.2;
pub const PASSING_Z_MIN: f32 = -1.2;
pub const PASSING_Z_SPAN: f32 = 2.2;
pub const PASSING_Z_DRIFT: f32 = 0.15;
pub const PASSING_TARGET_OPACITY: f32 = 0.9;
pub const PASSING_FADE_BAND: f32 = 4.0; // |x| below this holds full target opacity
pub const PASSING_FADE_SLOPE: f32 = 0.3; // opacity lost per unit beyond the band
pub const PASSING_FADE_RATE: f32 = 1.3;
pub const PASSING_MIN_OPACITY: f32 = 0.02;
pub const PASSING_FIRST_SPAWN_AT: f32 = 0.75;
pub const PASSING_SPAWN_DELAY_MIN: f32 = 3.0;
pub const PASSING_SPAWN_DELAY_SPAN: f32 = 4.0;
pub const PASSING_ROT_RATE_X: f32 = 0.10;
pub const PASSING_ROT_RATE_Y: f32 = 0.12;

// Anchored shapes
pub const ANCHOR_SPEED: f32 = 0.26;
pub const ANCHOR_GROUP_YAW_RATE: f32 = 0.016;
pub const ANCHOR_SPIN_Z_PERIOD_SEC: f32 = 60.0; // full 360° z-rotation period
pub const ANCHOR_SPIN_Z_PHASE_STEP: f32 = 0.6;
pub const ANCHOR_OSC_AMPLITUDE: [f32; 3] = [0.14, 0.11, 0.10];

// Foreground model
pub const MODEL_BASE_SPIN: f32 = 0.18; // radians/sec
pub const MODEL_AMP_SPIN_BOOST: f32 = 0.3;
pub const MODEL_AMP_SCALE_BOOST: f32 = 0.03;
pub const MODEL_BOB_FREQ: f32 = 0.9;
pub const MODEL_BOB_DEPTH: f32 = 0.06;
pub const MODEL_CLIP_FADE_SEC: f32 = 0.2;
pub const MODEL_CLIP_FALLBACK_DURATION_SEC: f32 = 2.4;
pub const MODEL_SWAY_AMPLITUDE: f32 = 0.05;

// Audio amplitude
pub const AMPLITUDE_RMS_GAIN: f32 = 3.5;
