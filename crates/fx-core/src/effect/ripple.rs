use super::{EffectKind, ShaderEffect};
use crate::gate::{GateCommand, HoverGate, LeavePolicy};
use crate::pointer::PointerSample;
use crate::uniforms::RippleUniforms;

/// Wave and pointer ripple, active only while hovered.
pub struct HoverRipple {
    uniforms: RippleUniforms,
    gate: HoverGate,
}

impl HoverRipple {
    pub fn new(policy: LeavePolicy) -> Self {
        Self {
            uniforms: RippleUniforms::default(),
            gate: HoverGate::new(policy),
        }
    }

    #[inline]
    pub fn uniforms(&self) -> &RippleUniforms {
        &self.uniforms
    }

    #[inline]
    pub fn gate(&self) -> &HoverGate {
        &self.gate
    }

    fn sync_enabled(&mut self) {
        self.uniforms.distortion_enabled = if self.gate.is_active() { 1.0 } else { 0.0 };
    }
}

impl ShaderEffect for HoverRipple {
    fn kind(&self) -> EffectKind {
        EffectKind::HoverRipple
    }

    fn fragment_source(&self) -> &'static str {
        crate::RIPPLE_WGSL
    }

    fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.uniforms)
    }

    fn pointer_enter(&mut self) -> GateCommand {
        let cmd = self.gate.enter();
        self.sync_enabled();
        cmd
    }

    fn pointer_leave(&mut self) -> GateCommand {
        let cmd = self.gate.leave();
        self.sync_enabled();
        cmd
    }

    fn pointer_move(&mut self, sample: PointerSample) {
        self.uniforms.pointer = sample.to_array();
    }

    fn deferred_fire(&mut self, token: u64) {
        if self.gate.fire(token) {
            log::debug!("[ripple] distortion off after delay");
        }
        self.sync_enabled();
    }

    fn cancel_deferred(&mut self) -> GateCommand {
        self.gate.cancel_pending()
    }

    fn advance(&mut self, dt_sec: f32) {
        self.uniforms.time += dt_sec.max(0.0);
    }

    fn distortion_enabled(&self) -> bool {
        self.uniforms.distortion_enabled > 0.5
    }

    fn pointer(&self) -> PointerSample {
        PointerSample::new(self.uniforms.pointer[0], self.uniforms.pointer[1])
    }
}
