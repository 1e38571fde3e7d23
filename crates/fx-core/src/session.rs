//! Host-independent controller for one effect surface.
//!
//! Front-ends own the platform resources (canvas or window, GPU context,
//! listeners, timers, frame scheduling) and drive a session with the events
//! they receive. The session decides what those events mean.

use instant::Instant;

use crate::camera::Camera;
use crate::clock::FrameClock;
use crate::config::EffectConfig;
use crate::effect::{self, ShaderEffect};
use crate::error::{FxError, LifecycleError};
use crate::gate::GateCommand;
use crate::lifecycle::{Lifecycle, MountTicket, SurfaceState};
use crate::pointer::{ContainerRect, PointerSample};

pub struct EffectSession {
    config: EffectConfig,
    lifecycle: Lifecycle,
    rect: ContainerRect,
    camera: Option<Camera>,
    effect: Option<Box<dyn ShaderEffect>>,
    clock: FrameClock,
    diagnostics: u32,
}

impl EffectSession {
    pub fn new(config: EffectConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::new(),
            rect: ContainerRect::default(),
            camera: None,
            effect: None,
            clock: FrameClock::new(),
            diagnostics: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> SurfaceState {
        self.lifecycle.state()
    }

    #[inline]
    pub fn rect(&self) -> ContainerRect {
        self.rect
    }

    #[inline]
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    #[inline]
    pub fn effect(&self) -> Option<&dyn ShaderEffect> {
        self.effect.as_deref()
    }

    /// Number of errors reported through the logging channel.
    #[inline]
    pub fn diagnostics(&self) -> u32 {
        self.diagnostics
    }

    pub fn mount(&mut self, rect: ContainerRect) -> Result<MountTicket, LifecycleError> {
        let ticket = self.lifecycle.begin_mount()?;
        let (fov, znear, zfar) = self.config.kind.camera_params();
        self.rect = rect;
        self.camera = Some(Camera::for_container(
            rect.width,
            rect.height,
            fov,
            znear,
            zfar,
        ));
        log::info!(
            "[surface] mount {} effect {}x{} (generation {})",
            self.config.kind,
            rect.width,
            rect.height,
            ticket.generation()
        );
        Ok(ticket)
    }

    /// The image decoded. Returns `false` if the ticket went stale, in which
    /// case the caller must not build a quad.
    pub fn asset_ready(&mut self, ticket: MountTicket, now: Instant) -> bool {
        if !self.lifecycle.asset_ready(ticket) {
            log::warn!(
                "[surface] dropping asset for stale mount {}",
                ticket.generation()
            );
            return false;
        }
        self.effect = Some(effect::build(&self.config));
        self.clock.reset(now);
        true
    }

    pub fn asset_failed(&mut self, ticket: MountTicket, err: &FxError) -> bool {
        if !self.lifecycle.asset_failed(ticket) {
            return false;
        }
        self.diagnostics += 1;
        log::error!("Error loading texture: {}", err);
        true
    }

    fn ready_effect(&mut self) -> Option<&mut (dyn ShaderEffect + 'static)> {
        if self.lifecycle.state() != SurfaceState::Ready {
            return None;
        }
        self.effect.as_deref_mut()
    }

    pub fn pointer_enter(&mut self) -> GateCommand {
        self.ready_effect()
            .map(|fx| fx.pointer_enter())
            .unwrap_or(GateCommand::None)
    }

    pub fn pointer_leave(&mut self) -> GateCommand {
        self.ready_effect()
            .map(|fx| fx.pointer_leave())
            .unwrap_or(GateCommand::None)
    }

    /// Normalize client coordinates against `rect` (the container's current
    /// bounding rectangle) and forward them to the effect.
    pub fn pointer_move(
        &mut self,
        client_x: f32,
        client_y: f32,
        rect: ContainerRect,
    ) -> Option<PointerSample> {
        let sample = rect.normalize(client_x, client_y);
        let fx = self.ready_effect()?;
        fx.pointer_move(sample);
        Some(sample)
    }

    pub fn deferred_fire(&mut self, token: u64) {
        if let Some(fx) = self.ready_effect() {
            fx.deferred_fire(token);
        }
    }

    /// Advance the time uniform. Returns the delta, or `None` when there is
    /// nothing to draw.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        if self.lifecycle.state() != SurfaceState::Ready {
            return None;
        }
        let dt = self.clock.tick_at(now);
        self.effect.as_deref_mut()?.advance(dt);
        Some(dt)
    }

    pub fn resize(&mut self, rect: ContainerRect) {
        self.rect = rect;
        if let Some(camera) = self.camera.as_mut() {
            camera.set_aspect(rect.width, rect.height);
        }
    }

    /// Tear down. The returned flag is `true` exactly once per mount; the
    /// command tells the host which pending timer to clear.
    pub fn dispose(&mut self) -> (bool, GateCommand) {
        let cancel = self
            .effect
            .as_deref_mut()
            .map(|fx| fx.cancel_deferred())
            .unwrap_or(GateCommand::None);
        if !self.lifecycle.dispose() {
            return (false, cancel);
        }
        self.effect = None;
        self.camera = None;
        log::info!("[surface] disposed");
        (true, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKind;
    use crate::gate::LeavePolicy;

    fn ready(config: EffectConfig) -> EffectSession {
        let mut s = EffectSession::new(config);
        let t = s.mount(ContainerRect::sized(600.0, 600.0)).unwrap();
        assert!(s.asset_ready(t, Instant::now()));
        s
    }

    #[test]
    fn events_before_ready_are_ignored() {
        let mut s = EffectSession::new(EffectConfig::default());
        s.mount(ContainerRect::sized(100.0, 100.0)).unwrap();
        assert_eq!(s.pointer_enter(), GateCommand::None);
        assert!(s
            .pointer_move(10.0, 10.0, ContainerRect::sized(100.0, 100.0))
            .is_none());
        assert!(s.tick(Instant::now()).is_none());
    }

    #[test]
    fn camera_uses_effect_fov_and_container_aspect() {
        let mut s = EffectSession::new(EffectConfig::new(EffectKind::GridAberration));
        s.mount(ContainerRect::sized(800.0, 400.0)).unwrap();
        let cam = s.camera().unwrap();
        assert!((cam.aspect - 2.0).abs() < 1e-6);
        assert!((cam.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn dispose_cancels_pending_deactivation() {
        let mut s = ready(EffectConfig::default());
        s.pointer_enter();
        let GateCommand::Arm { token, .. } = s.pointer_leave() else {
            panic!("expected arm");
        };
        let (released, cmd) = s.dispose();
        assert!(released);
        assert_eq!(cmd, GateCommand::Cancel { token });
        assert!(s.effect().is_none());
        assert!(!s.dispose().0);
    }

    #[test]
    fn immediate_policy_session() {
        let mut s = ready(EffectConfig {
            leave_policy: LeavePolicy::Immediate,
            ..Default::default()
        });
        s.pointer_enter();
        assert!(s.effect().unwrap().distortion_enabled());
        assert_eq!(s.pointer_leave(), GateCommand::None);
        assert!(!s.effect().unwrap().distortion_enabled());
    }
}
