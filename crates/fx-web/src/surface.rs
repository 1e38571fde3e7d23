use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fx_core::asset::decode_image;
use fx_core::{
    EffectConfig, EffectSession, FxError, GateCommand, GpuContext, ImageTexture, MountTicket,
    PointerEventKind, QuadRenderer, SurfaceState,
};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::asset::fetch_bytes;
use crate::dom;
use crate::frame::FrameLoop;
use crate::listeners::ListenerSet;
use crate::timer::DeferredTimer;

struct SurfaceInner {
    container: web::HtmlElement,
    session: EffectSession,
    canvas: Option<web::HtmlCanvasElement>,
    gpu: Option<GpuContext>,
    texture: Option<ImageTexture>,
    quad: Option<QuadRenderer>,
    listeners: ListenerSet,
    resize_listener: Option<Closure<dyn FnMut()>>,
    frame: Option<FrameLoop>,
    timer: DeferredTimer,
}

/// One effect bound to one DOM container.
pub struct EffectSurface {
    inner: Rc<RefCell<SurfaceInner>>,
}

impl EffectSurface {
    pub fn new(container: web::HtmlElement, config: EffectConfig) -> Self {
        let target: web::EventTarget = container.clone().into();
        Self {
            inner: Rc::new(RefCell::new(SurfaceInner {
                container,
                session: EffectSession::new(config),
                canvas: None,
                gpu: None,
                texture: None,
                quad: None,
                listeners: ListenerSet::new(target),
                resize_listener: None,
                frame: None,
                timer: DeferredTimer::default(),
            })),
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.inner.borrow().session.state()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn diagnostics(&self) -> u32 {
        self.inner.borrow().session.diagnostics()
    }

    /// Start loading `url` into a fresh surface. Returns `false` without
    /// side effects when already mounted or the container is detached.
    pub fn mount(&self, url: &str) -> bool {
        let weak = Rc::downgrade(&self.inner);
        let mut inner = self.inner.borrow_mut();
        if !inner.container.is_connected() {
            log::warn!("[surface] container is not in the document; mount skipped");
            return false;
        }
        let rect = dom::container_rect(&inner.container);
        let ticket = match inner.session.mount(rect) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("[surface] mount ignored: {}", e);
                return false;
            }
        };
        let canvas = match dom::attach_canvas(&inner.container, rect) {
            Ok(c) => c,
            Err(e) => {
                let err = FxError::Gpu(e.to_string());
                inner.session.asset_failed(ticket, &err);
                return true;
            }
        };
        inner.canvas = Some(canvas.clone());
        wire_pointer(&mut inner, &weak);
        if inner.session.config().track_resize {
            wire_resize(&mut inner, &weak);
        }
        drop(inner);

        let url = url.to_string();
        spawn_local(async move {
            load(weak, ticket, url, canvas).await;
        });
        true
    }

    /// Tear everything down. Returns `true` if a mounted surface was released.
    pub fn unmount(&self) -> bool {
        self.inner.borrow_mut().teardown()
    }

    /// Swap the image: tear down, then mount again with `url`.
    pub fn set_image(&self, url: &str) -> bool {
        self.unmount();
        self.mount(url)
    }
}

impl Drop for EffectSurface {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.teardown();
        }
    }
}

impl SurfaceInner {
    fn teardown(&mut self) -> bool {
        let (released, cmd) = self.session.dispose();
        if let GateCommand::Cancel { token } = cmd {
            log::debug!("[pointer] cancelled pending deactivation {}", token);
        }
        self.timer.cancel();
        self.listeners.remove_all();
        if let Some(cb) = self.resize_listener.take() {
            if let Some(w) = web::window() {
                w.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
                    .ok();
            }
        }
        if let Some(mut frame) = self.frame.take() {
            frame.stop();
        }
        // Pipeline and texture go before the device that owns them.
        self.quad = None;
        self.texture = None;
        if let Some(gpu) = self.gpu.take() {
            gpu.dispose();
        }
        if let Some(canvas) = self.canvas.take() {
            canvas.remove();
        }
        released
    }

    fn apply_gate(&mut self, cmd: GateCommand, weak: &Weak<RefCell<SurfaceInner>>) {
        match cmd {
            GateCommand::None => {}
            GateCommand::Cancel { token } => {
                log::debug!("[pointer] re-entered, keeping distortion ({})", token);
                self.timer.cancel();
            }
            GateCommand::Arm { delay, token } => {
                let weak = weak.clone();
                self.timer.arm(delay, move || {
                    let Some(rc) = weak.upgrade() else {
                        return;
                    };
                    let Ok(mut inner) = rc.try_borrow_mut() else {
                        return;
                    };
                    inner.timer.mark_fired();
                    inner.session.deferred_fire(token);
                });
            }
        }
    }

    fn draw(&mut self) -> bool {
        if self.session.tick(Instant::now()).is_none() {
            return false;
        }
        let (Some(gpu), Some(quad)) = (self.gpu.as_ref(), self.quad.as_ref()) else {
            return false;
        };
        let (Some(camera), Some(effect)) = (self.session.camera(), self.session.effect()) else {
            return false;
        };
        match quad.render(gpu, camera, effect) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory; stopping frame loop");
                false
            }
            Err(e) => {
                log::warn!("[gpu] frame skipped: {:?}", e);
                true
            }
        }
    }

    fn resize_to_container(&mut self) {
        let rect = dom::container_rect(&self.container);
        if rect.is_empty() {
            return;
        }
        self.session.resize(rect);
        if let Some(canvas) = self.canvas.as_ref() {
            let (w, h) = dom::sync_canvas_backing_size(canvas, rect);
            if let Some(gpu) = self.gpu.as_mut() {
                gpu.resize(w, h);
            }
        }
    }
}

fn wire_pointer(inner: &mut SurfaceInner, weak: &Weak<RefCell<SurfaceInner>>) {
    for kind in PointerEventKind::ALL {
        let weak_h = weak.clone();
        inner.listeners.add(kind, move |ev: web::PointerEvent| {
            let Some(rc) = weak_h.upgrade() else {
                return;
            };
            let Ok(mut guard) = rc.try_borrow_mut() else {
                return;
            };
            let inner = &mut *guard;
            match kind {
                PointerEventKind::Enter => {
                    let cmd = inner.session.pointer_enter();
                    inner.apply_gate(cmd, &weak_h);
                }
                PointerEventKind::Leave => {
                    let cmd = inner.session.pointer_leave();
                    inner.apply_gate(cmd, &weak_h);
                }
                PointerEventKind::Move => {
                    let rect = dom::container_rect(&inner.container);
                    inner
                        .session
                        .pointer_move(ev.client_x() as f32, ev.client_y() as f32, rect);
                }
            }
        });
    }
}

fn wire_resize(inner: &mut SurfaceInner, weak: &Weak<RefCell<SurfaceInner>>) {
    let Some(window) = web::window() else {
        return;
    };
    let weak = weak.clone();
    let cb = Closure::wrap(Box::new(move || {
        if let Some(rc) = weak.upgrade() {
            if let Ok(mut inner) = rc.try_borrow_mut() {
                inner.resize_to_container();
            }
        }
    }) as Box<dyn FnMut()>);
    match window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref()) {
        Ok(()) => inner.resize_listener = Some(cb),
        Err(e) => log::warn!("[surface] resize listener failed: {:?}", e),
    }
}

/// WebGPU where the browser has it, WebGL2 otherwise.
pub(crate) async fn browser_instance() -> wgpu::Instance {
    wgpu::util::new_instance_with_webgpu_detection(&wgpu::InstanceDescriptor::default()).await
}

async fn prepare(
    url: &str,
    canvas: web::HtmlCanvasElement,
) -> Result<(ImageTexture, GpuContext), FxError> {
    let bytes = fetch_bytes(url).await?;
    let image = decode_image(url, &bytes)?;
    let (width, height) = (canvas.width(), canvas.height());
    let instance = browser_instance().await;
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
        .map_err(|e| FxError::Gpu(e.to_string()))?;
    let gpu = GpuContext::new(&instance, surface, width, height).await?;
    match ImageTexture::from_rgba(gpu.device(), gpu.queue(), &image) {
        Ok(texture) => Ok((texture, gpu)),
        Err(e) => {
            gpu.dispose();
            Err(e)
        }
    }
}

async fn load(
    weak: Weak<RefCell<SurfaceInner>>,
    ticket: MountTicket,
    url: String,
    canvas: web::HtmlCanvasElement,
) {
    let prepared = prepare(&url, canvas).await;
    let Some(rc) = weak.upgrade() else {
        if let Ok((texture, gpu)) = prepared {
            drop(texture);
            gpu.dispose();
        }
        return;
    };
    let mut guard = rc.borrow_mut();
    let inner = &mut *guard;
    let (texture, gpu) = match prepared {
        Ok(p) => p,
        Err(err) => {
            inner.session.asset_failed(ticket, &err);
            return;
        }
    };
    if !inner.session.asset_ready(ticket, Instant::now()) {
        drop(texture);
        gpu.dispose();
        return;
    }
    let Some(effect) = inner.session.effect() else {
        drop(texture);
        gpu.dispose();
        return;
    };
    let quad = QuadRenderer::new(&gpu, &texture, effect);
    inner.texture = Some(texture);
    inner.quad = Some(quad);
    inner.gpu = Some(gpu);

    let weak_f = weak.clone();
    inner.frame = Some(FrameLoop::start(move || {
        let Some(rc) = weak_f.upgrade() else {
            return false;
        };
        let Ok(mut inner) = rc.try_borrow_mut() else {
            return true;
        };
        inner.draw()
    }));
}
