use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Self-rescheduling `requestAnimationFrame` loop with an explicit stop.
///
/// The callback returns `false` to end the loop from the inside; `stop` ends it
/// from the outside. Either way nothing is rescheduled afterwards.
pub struct FrameLoop {
    cancelled: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Tick,
}

impl FrameLoop {
    pub fn start(mut frame: impl FnMut() -> bool + 'static) -> Self {
        let cancelled = Rc::new(Cell::new(false));
        let raf_id = Rc::new(Cell::new(None));
        let tick: Tick = Rc::new(RefCell::new(None));

        let cancelled_t = cancelled.clone();
        let raf_id_t = raf_id.clone();
        let tick_t = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_id_t.set(None);
            if cancelled_t.get() {
                return;
            }
            if !frame() || cancelled_t.get() {
                return;
            }
            if let Some(cb) = tick_t.borrow().as_ref() {
                raf_id_t.set(request_frame(cb));
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = tick.borrow().as_ref() {
            raf_id.set(request_frame(cb));
        }
        log::info!("[surface] frame loop started");
        Self {
            cancelled,
            raf_id,
            tick,
        }
    }

    /// Must not be called from inside the frame callback.
    pub fn stop(&mut self) {
        if self.cancelled.replace(true) {
            return;
        }
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            w.cancel_animation_frame(id).ok();
        }
        // Breaks the closure's reference to itself.
        self.tick.borrow_mut().take();
        log::info!("[surface] frame loop stopped");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    let w = web::window()?;
    match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("[surface] requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}
