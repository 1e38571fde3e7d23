// Shared tuning constants used by both web and native frontends.

// Pointer
pub const DEFAULT_POINTER: [f32; 2] = [0.5, 0.5]; // center of the quad in uv space

// Hover ripple
pub const DEFAULT_LEAVE_DELAY_MS: u64 = 500; // delay before distortion switches off after leave
pub const RIPPLE_WAVE_AMPLITUDE: f32 = 0.005; // travelling wave uv offset
pub const RIPPLE_WAVE_FREQUENCY: f32 = 1.0; // spatial frequency of the travelling wave
pub const RIPPLE_WAVE_SPEED: f32 = 1.0; // time multiplier of the travelling wave
pub const RIPPLE_RADIAL_AMPLITUDE: f32 = 0.005; // pointer ripple uv offset
pub const RIPPLE_RADIAL_FREQUENCY_U: f32 = 1.0; // distance multiplier, horizontal offset
pub const RIPPLE_RADIAL_SPEED_U: f32 = 1.0; // time multiplier, horizontal offset
pub const RIPPLE_RADIAL_FREQUENCY_V: f32 = 10.0; // distance multiplier, vertical offset
pub const RIPPLE_RADIAL_SPEED_V: f32 = 5.0; // time multiplier, vertical offset

// Grid aberration
pub const GRID_CELLS: f32 = 20.0; // cells per axis
pub const GRID_FALLOFF_RADIUS: f32 = 0.3; // strength reaches zero at this uv distance
pub const GRID_DISPLACEMENT: f32 = 0.2; // uv displacement per unit of pointer motion
pub const DEFAULT_ABERRATION_INTENSITY: f32 = 0.5;
pub const ABERRATION_OFFSET_SCALE: f32 = 0.01; // channel split per unit strength * intensity

// Camera, matched per effect to the quad framing
pub const CAMERA_Z: f32 = 1.0;
pub const RIPPLE_FOV_DEG: f32 = 80.0;
pub const RIPPLE_ZNEAR: f32 = 0.01;
pub const RIPPLE_ZFAR: f32 = 10.0;
pub const GRID_FOV_DEG: f32 = 75.0;
pub const GRID_ZNEAR: f32 = 0.1;
pub const GRID_ZFAR: f32 = 1000.0;

// Quad
pub const QUAD_SIZE: f32 = 2.0; // plane width/height in world units

pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
