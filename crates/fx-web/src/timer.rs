use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One cancellable `setTimeout`. Arming again replaces the previous timeout.
#[derive(Default)]
pub struct DeferredTimer {
    handle: Option<i32>,
    // Kept alive until replaced or cancelled; the callback may be running when
    // `mark_fired` is called, so it is never dropped from there.
    callback: Option<Closure<dyn FnMut()>>,
}

impl DeferredTimer {
    pub fn arm(&mut self, delay: Duration, f: impl FnOnce() + 'static) {
        self.cancel();
        let Some(w) = web::window() else {
            return;
        };
        let mut f = Some(f);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(f) = f.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match w.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        ) {
            Ok(id) => {
                self.handle = Some(id);
                self.callback = Some(closure);
            }
            Err(e) => log::warn!("[pointer] setTimeout failed: {:?}", e),
        }
    }

    /// Called from inside the timeout callback.
    pub fn mark_fired(&mut self) {
        self.handle = None;
    }

    pub fn cancel(&mut self) {
        if let (Some(id), Some(w)) = (self.handle.take(), web::window()) {
            w.clear_timeout_with_handle(id);
        }
        self.callback = None;
    }
}

impl Drop for DeferredTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
