//! CPU mirrors of the fragment-stage math.
//!
//! The WGSL in `shaders/` is the source of truth at runtime; these functions
//! reproduce it term for term so the distortion can be reasoned about and
//! tested on the host.

use glam::Vec2;

use crate::constants::*;
use crate::uniforms::{GridUniforms, RippleUniforms};

/// Hermite interpolation with the GLSL/WGSL edge semantics, including
/// reversed edges (`edge0 > edge1`) which produce a falling curve.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Lower-left corner of the grid cell containing `uv`.
#[inline]
pub fn grid_cell_origin(uv: Vec2, cells: f32) -> Vec2 {
    (uv * cells).floor() / cells
}

/// Center of the grid cell containing `uv`.
#[inline]
pub fn grid_cell_center(uv: Vec2, cells: f32) -> Vec2 {
    grid_cell_origin(uv, cells) + Vec2::splat(0.5 / cells)
}

/// Falloff of a cell with distance to the pointer: 1 at the pointer, 0 at
/// and beyond `radius`.
#[inline]
pub fn falloff(distance: f32, radius: f32) -> f32 {
    smoothstep(radius, 0.0, distance)
}

/// Per-cell strength for the grid effect.
pub fn grid_strength(uv: Vec2, pointer: Vec2, cells: f32, radius: f32) -> f32 {
    let center = grid_cell_center(uv, cells);
    falloff(center.distance(pointer), radius)
}

/// Sample coordinates for the three color channels of the grid effect,
/// returned as `(red, green, blue)`.
pub fn grid_sample_coords(uv: Vec2, u: &GridUniforms) -> (Vec2, Vec2, Vec2) {
    let pointer = Vec2::from(u.pointer);
    let motion = pointer - Vec2::from(u.prev_pointer);
    let strength = grid_strength(uv, pointer, u.grid_cells, u.falloff_radius);
    let displaced = uv + strength * motion * u.displacement;
    let split = Vec2::new(
        strength * u.aberration_intensity * ABERRATION_OFFSET_SCALE,
        0.0,
    );
    (displaced + split, displaced, displaced - split)
}

/// Sample coordinate for the ripple effect; identity while disabled.
pub fn ripple_sample_coord(uv: Vec2, u: &RippleUniforms) -> Vec2 {
    if u.distortion_enabled <= 0.5 {
        return uv;
    }
    let t = u.time;
    let dist = uv.distance(Vec2::from(u.pointer));
    let mut out = uv;
    out.y += (out.x * RIPPLE_WAVE_FREQUENCY + t * RIPPLE_WAVE_SPEED).sin() * RIPPLE_WAVE_AMPLITUDE;
    out.x += (out.y * RIPPLE_WAVE_FREQUENCY + t * RIPPLE_WAVE_SPEED).cos() * RIPPLE_WAVE_AMPLITUDE;
    out += Vec2::new(
        (dist * RIPPLE_RADIAL_FREQUENCY_U - t * RIPPLE_RADIAL_SPEED_U).sin()
            * RIPPLE_RADIAL_AMPLITUDE,
        (dist * RIPPLE_RADIAL_FREQUENCY_V - t * RIPPLE_RADIAL_SPEED_V).cos()
            * RIPPLE_RADIAL_AMPLITUDE,
    );
    out
}
