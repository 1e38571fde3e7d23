//! Pluggable shader strategies.
//!
//! A surface owns exactly one `ShaderEffect`, chosen at construction. The
//! strategy owns the uniform block and decides how pointer events mutate it;
//! the surface only forwards events, ticks time and uploads `uniform_bytes`.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::config::EffectConfig;
use crate::constants::*;
use crate::error::FxError;
use crate::gate::GateCommand;
use crate::pointer::PointerSample;

mod grid;
mod ripple;

pub use grid::GridAberration;
pub use ripple::HoverRipple;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EffectKind {
    #[default]
    HoverRipple,
    GridAberration,
}

impl EffectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectKind::HoverRipple => "ripple",
            EffectKind::GridAberration => "grid",
        }
    }

    /// Vertical field of view, near and far planes used for this effect.
    pub fn camera_params(self) -> (f32, f32, f32) {
        match self {
            EffectKind::HoverRipple => (RIPPLE_FOV_DEG, RIPPLE_ZNEAR, RIPPLE_ZFAR),
            EffectKind::GridAberration => (GRID_FOV_DEG, GRID_ZNEAR, GRID_ZFAR),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectKind {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "ripple" | "hover" | "hover-ripple" => Ok(EffectKind::HoverRipple),
            "grid" | "aberration" | "grid-aberration" => Ok(EffectKind::GridAberration),
            other => Err(FxError::Config(format!("unknown effect '{}'", other))),
        }
    }
}

pub trait ShaderEffect {
    fn kind(&self) -> EffectKind;

    /// WGSL declaring `EffectUniforms`, binding 1, and `fs_main`.
    fn fragment_source(&self) -> &'static str;

    /// Snapshot of the uniform block, uploaded once per frame.
    fn uniform_bytes(&self) -> &[u8];

    fn pointer_enter(&mut self) -> GateCommand {
        GateCommand::None
    }

    fn pointer_leave(&mut self) -> GateCommand {
        GateCommand::None
    }

    fn pointer_move(&mut self, sample: PointerSample);

    /// A deferred deactivation armed by `pointer_leave` elapsed.
    fn deferred_fire(&mut self, _token: u64) {}

    /// Drop any pending deferred work; used on teardown.
    fn cancel_deferred(&mut self) -> GateCommand {
        GateCommand::None
    }

    fn advance(&mut self, dt_sec: f32);

    fn distortion_enabled(&self) -> bool;

    fn pointer(&self) -> PointerSample;
}

/// Build the strategy selected by `config`, seeded with default uniforms.
pub fn build(config: &EffectConfig) -> Box<dyn ShaderEffect> {
    match config.kind {
        EffectKind::HoverRipple => Box::new(HoverRipple::new(config.leave_policy)),
        EffectKind::GridAberration => Box::new(GridAberration::new(config.aberration_intensity)),
    }
}

/// Tuning values the fragment stages read, by their WGSL name.
pub const SHADER_CONSTANTS: [(&str, f32); 9] = [
    ("RIPPLE_WAVE_AMPLITUDE", RIPPLE_WAVE_AMPLITUDE),
    ("RIPPLE_WAVE_FREQUENCY", RIPPLE_WAVE_FREQUENCY),
    ("RIPPLE_WAVE_SPEED", RIPPLE_WAVE_SPEED),
    ("RIPPLE_RADIAL_AMPLITUDE", RIPPLE_RADIAL_AMPLITUDE),
    ("RIPPLE_RADIAL_FREQUENCY_U", RIPPLE_RADIAL_FREQUENCY_U),
    ("RIPPLE_RADIAL_SPEED_U", RIPPLE_RADIAL_SPEED_U),
    ("RIPPLE_RADIAL_FREQUENCY_V", RIPPLE_RADIAL_FREQUENCY_V),
    ("RIPPLE_RADIAL_SPEED_V", RIPPLE_RADIAL_SPEED_V),
    ("ABERRATION_OFFSET_SCALE", ABERRATION_OFFSET_SCALE),
];

/// Full WGSL module: tuning constants, the shared quad vertex stage, then the
/// effect's fragment stage.
pub fn compose_shader(effect: &dyn ShaderEffect) -> String {
    let mut src = String::with_capacity(crate::QUAD_WGSL.len() + 2048);
    for (name, value) in SHADER_CONSTANTS {
        // `{:?}` keeps the decimal point, so WGSL reads an f32 literal
        let _ = writeln!(src, "const {}: f32 = {:?};", name, value);
    }
    src.push('\n');
    src.push_str(crate::QUAD_WGSL);
    src.push('\n');
    src.push_str(effect.fragment_source());
    src
}
