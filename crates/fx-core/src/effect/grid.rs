use super::{EffectKind, ShaderEffect};
use crate::pointer::PointerSample;
use crate::uniforms::GridUniforms;

/// Pixel-grid chromatic aberration that trails the pointer. Always active.
pub struct GridAberration {
    uniforms: GridUniforms,
}

impl GridAberration {
    pub fn new(aberration_intensity: f32) -> Self {
        Self {
            uniforms: GridUniforms {
                aberration_intensity,
                ..Default::default()
            },
        }
    }

    #[inline]
    pub fn uniforms(&self) -> &GridUniforms {
        &self.uniforms
    }
}

impl ShaderEffect for GridAberration {
    fn kind(&self) -> EffectKind {
        EffectKind::GridAberration
    }

    fn fragment_source(&self) -> &'static str {
        crate::GRID_WGSL
    }

    fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.uniforms)
    }

    fn pointer_move(&mut self, sample: PointerSample) {
        self.uniforms.prev_pointer = self.uniforms.pointer;
        self.uniforms.pointer = sample.to_array();
    }

    // No time term in this effect.
    fn advance(&mut self, _dt_sec: f32) {}

    fn distortion_enabled(&self) -> bool {
        true
    }

    fn pointer(&self) -> PointerSample {
        PointerSample::new(self.uniforms.pointer[0], self.uniforms.pointer[1])
    }
}
