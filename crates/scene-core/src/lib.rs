pub mod amplitude;
pub mod anchored;
pub mod constants;
pub mod galaxy;
pub mod mesh;
pub mod model;
pub mod palette;
pub mod passing;
pub mod perf;
pub mod state;
pub mod tier;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static SHAPES_WGSL: &str = include_str!("../shaders/shapes.wgsl");

pub use amplitude::{amplitude, rms};
pub use anchored::AnchoredShapes;
pub use constants::*;
pub use galaxy::{GalaxyField, GalaxyParams};
pub use mesh::{MeshData, Vertex};
pub use model::{ClipPlayer, ModelAnimator};
pub use palette::{ColorParseError, GradientStops, ThemeColors};
pub use passing::{PassingShape, PassingShapes, ShapeKind};
pub use perf::{FrameQuality, QualityController, QualityEvent};
pub use state::{Camera, Fog, LightRig};
pub use tier::{DeviceTier, TierProfile};
