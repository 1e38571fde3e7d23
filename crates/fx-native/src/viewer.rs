//! Desktop stand-in for the web container: the window plays the container,
//! cursor events play the pointer events.

use std::path::Path;
use std::sync::Arc;

use fx_core::asset::decode_image;
use fx_core::{
    ContainerRect, EffectConfig, EffectSession, FxError, GateCommand, GpuContext, ImageTexture,
    QuadRenderer, SurfaceState,
};
use instant::Instant;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Pending delayed deactivation, polled from the event loop.
#[derive(Debug, Default)]
pub struct Deadline {
    pending: Option<(Instant, u64)>,
}

impl Deadline {
    pub fn apply(&mut self, cmd: GateCommand, now: Instant) {
        match cmd {
            GateCommand::None => {}
            GateCommand::Arm { delay, token } => self.pending = Some((now + delay, token)),
            GateCommand::Cancel { .. } => self.pending = None,
        }
    }

    /// Token of the deactivation that is due at `now`, if any.
    pub fn take_due(&mut self, now: Instant) -> Option<u64> {
        match self.pending {
            Some((at, token)) if now >= at => {
                self.pending = None;
                Some(token)
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    #[inline]
    pub fn at(&self) -> Option<Instant> {
        self.pending.map(|(at, _)| at)
    }
}

fn rect_for(size: PhysicalSize<u32>) -> ContainerRect {
    ContainerRect::sized(size.width as f32, size.height as f32)
}

pub struct Viewer {
    window: Arc<Window>,
    session: EffectSession,
    gpu: Option<GpuContext>,
    texture: Option<ImageTexture>,
    quad: Option<QuadRenderer>,
    deadline: Deadline,
}

impl Viewer {
    pub fn new(window: Arc<Window>, config: EffectConfig) -> Self {
        Self {
            window,
            session: EffectSession::new(config),
            gpu: None,
            texture: None,
            quad: None,
            deadline: Deadline::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> SurfaceState {
        self.session.state()
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Load `path` and build the quad. Failures leave the window open but
    /// blank, like a web surface whose image failed to load.
    pub fn mount(&mut self, path: &Path) {
        let rect = rect_for(self.window.inner_size());
        let ticket = match self.session.mount(rect) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("[surface] mount ignored: {}", e);
                return;
            }
        };
        match self.prepare(path) {
            Ok((texture, gpu)) => {
                if !self.session.asset_ready(ticket, Instant::now()) {
                    drop(texture);
                    gpu.dispose();
                    return;
                }
                let Some(effect) = self.session.effect() else {
                    drop(texture);
                    gpu.dispose();
                    return;
                };
                self.quad = Some(QuadRenderer::new(&gpu, &texture, effect));
                self.texture = Some(texture);
                self.gpu = Some(gpu);
            }
            Err(err) => {
                self.session.asset_failed(ticket, &err);
            }
        }
    }

    fn prepare(&self, path: &Path) -> Result<(ImageTexture, GpuContext), FxError> {
        let url = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| FxError::AssetFetch {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        let image = decode_image(&url, &bytes)?;
        let size = self.window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(Arc::clone(&self.window))
            .map_err(|e| FxError::Gpu(e.to_string()))?;
        let gpu = pollster::block_on(GpuContext::new(
            &instance,
            surface,
            size.width,
            size.height,
        ))?;
        match ImageTexture::from_rgba(gpu.device(), gpu.queue(), &image) {
            Ok(texture) => Ok((texture, gpu)),
            Err(e) => {
                gpu.dispose();
                Err(e)
            }
        }
    }

    pub fn pointer_enter(&mut self) {
        let cmd = self.session.pointer_enter();
        self.deadline.apply(cmd, Instant::now());
    }

    pub fn pointer_leave(&mut self) {
        let cmd = self.session.pointer_leave();
        self.deadline.apply(cmd, Instant::now());
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let rect = self.session.rect();
        self.session.pointer_move(x as f32, y as f32, rect);
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.session.resize(rect_for(size));
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(size.width, size.height);
        }
    }

    /// Fire a due deactivation. Returns when the next one is due.
    pub fn poll_deadline(&mut self) -> Option<Instant> {
        if let Some(token) = self.deadline.take_due(Instant::now()) {
            self.session.deferred_fire(token);
        }
        self.deadline.at()
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if self.session.tick(Instant::now()).is_none() {
            return Ok(());
        }
        let (Some(gpu), Some(quad)) = (self.gpu.as_ref(), self.quad.as_ref()) else {
            return Ok(());
        };
        let (Some(camera), Some(effect)) = (self.session.camera(), self.session.effect()) else {
            return Ok(());
        };
        quad.render(gpu, camera, effect)
    }

    pub fn dispose(&mut self) {
        let (released, _) = self.session.dispose();
        self.deadline.clear();
        self.quad = None;
        self.texture = None;
        if let Some(gpu) = self.gpu.take() {
            gpu.dispose();
        }
        if released {
            log::info!("[surface] window closed");
        }
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.dispose();
    }
}
