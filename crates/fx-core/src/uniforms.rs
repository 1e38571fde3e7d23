//! GPU-facing uniform blocks.
//!
//! Layouts mirror the WGSL structs in `shaders/` and stay multiples of 16
//! bytes so they can be bound directly as uniform buffers.

use crate::constants::*;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
}

/// Shader inputs for the hover ripple effect.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RippleUniforms {
    pub pointer: [f32; 2],
    pub time: f32,
    /// `1.0` while distortion is active, `0.0` otherwise.
    pub distortion_enabled: f32,
}

impl Default for RippleUniforms {
    fn default() -> Self {
        Self {
            pointer: DEFAULT_POINTER,
            time: 0.0,
            distortion_enabled: 0.0,
        }
    }
}

/// Shader inputs for the grid aberration effect.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridUniforms {
    pub pointer: [f32; 2],
    pub prev_pointer: [f32; 2],
    pub aberration_intensity: f32,
    pub grid_cells: f32,
    pub falloff_radius: f32,
    pub displacement: f32,
}

impl Default for GridUniforms {
    fn default() -> Self {
        Self {
            pointer: DEFAULT_POINTER,
            prev_pointer: DEFAULT_POINTER,
            aberration_intensity: DEFAULT_ABERRATION_INTENSITY,
            grid_cells: GRID_CELLS,
            falloff_radius: GRID_FALLOFF_RADIUS,
            displacement: GRID_DISPLACEMENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_blocks_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 64);
        assert_eq!(std::mem::size_of::<RippleUniforms>(), 16);
        assert_eq!(std::mem::size_of::<GridUniforms>(), 32);
    }

    #[test]
    fn defaults_center_the_pointer() {
        let r = RippleUniforms::default();
        assert_eq!(r.pointer, [0.5, 0.5]);
        assert_eq!(r.time, 0.0);
        assert_eq!(r.distortion_enabled, 0.0);
        let g = GridUniforms::default();
        assert_eq!(g.pointer, g.prev_pointer);
        assert_eq!(g.grid_cells, 20.0);
    }
}
