pub mod asset;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod effect;
pub mod error;
pub mod gate;
pub mod lifecycle;
pub mod pointer;
pub mod render;
pub mod sampling;
pub mod session;
pub mod uniforms;

pub use camera::Camera;
pub use clock::FrameClock;
pub use config::EffectConfig;
pub use constants::*;
pub use effect::{EffectKind, GridAberration, HoverRipple, ShaderEffect};
pub use error::{FxError, LifecycleError};
pub use gate::{GateCommand, HoverGate, LeavePolicy};
pub use lifecycle::{Lifecycle, MountTicket, SurfaceState};
pub use pointer::{ContainerRect, PointerEventKind, PointerSample};
pub use render::{GpuContext, ImageTexture, QuadRenderer};
pub use session::EffectSession;
pub use uniforms::{CameraUniforms, GridUniforms, RippleUniforms};

// Shaders bundled as string constants
pub static QUAD_WGSL: &str = include_str!("../shaders/quad.wgsl");
pub static RIPPLE_WGSL: &str = include_str!("../shaders/ripple.wgsl");
pub static GRID_WGSL: &str = include_str!("../shaders/grid.wgsl");
